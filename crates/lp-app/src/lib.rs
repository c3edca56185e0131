//! lp-app: application service layer over the study pipeline.
//!
//! Glues configuration, the sweep, plotting and run storage together behind
//! a small API the CLI calls. No domain logic lives here.

pub mod config;
pub mod error;
pub mod study;

pub use config::StudyConfig;
pub use error::{AppError, AppResult};
pub use study::{RunOptions, StudyOutcome, list_runs, load_run, load_run_series, run_study};
