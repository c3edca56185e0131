//! Error types for protocol solves.

use thiserror::Error;

pub type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub enum SolverError {
    /// The phase's termination condition cannot be satisfied.
    #[error("Infeasible phase \"{phase}\": {reason}")]
    Infeasible { phase: String, reason: String },

    /// The numerical integration failed internally.
    #[error("Solve did not converge in phase \"{phase}\" after {steps} steps")]
    NonConvergence { phase: String, steps: usize },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A named signal was requested from a step that never recorded it.
    #[error("Missing signal: {name}")]
    MissingSignal { name: String },

    #[error("Model error: {0}")]
    Model(#[from] lp_model::ModelError),

    #[error("Parameter error: {0}")]
    Params(#[from] lp_params::ParamError),
}
