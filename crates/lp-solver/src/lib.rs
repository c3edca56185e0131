//! lp-solver: protocol solves and solution traces.
//!
//! Provides:
//! - the solution-trace data model (cycles -> steps -> named signal series)
//! - solve options (time step, recording interval, state-of-health flag)
//! - a reference reduced-order lumped-cell solver with plating/stripping
//!   kinetics, integrating each phase with a fixed-step loop until its
//!   termination condition

pub mod cell;
pub mod error;
pub mod signals;
pub mod solve;
pub mod trace;

pub use error::{SolverError, SolverResult};
pub use solve::{SolveOptions, solve};
pub use trace::{Cycle, SolutionTrace, StepSolution};
