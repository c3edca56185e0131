//! lp-sweep: the experiment sweep and signal-extraction pipeline.
//!
//! Sequencing is strictly: condition each model variant with a reference
//! discharge, seed its starting state from the conditioning end state, then
//! solve one charge-characterization protocol per rate and pull a fixed set
//! of signals out of each solution's final rest phase, aligned to a common
//! zero time origin.

pub mod conditioning;
pub mod derive;
pub mod error;
pub mod extract;
pub mod runner;

pub use conditioning::{condition_all, condition_and_seed};
pub use derive::{CapacityConstants, intercalated_capacity_ah};
pub use error::{SweepError, SweepResult};
pub use extract::{RateBundle, SignalBundle, extract_bundle, extract_bundles};
pub use runner::{RateSolution, charge_protocols, run_sweep};
