//! Error types for sweep orchestration and extraction.

use lp_solver::SolverError;
use thiserror::Error;

pub type SweepResult<T> = Result<T, SweepError>;

#[derive(Error, Debug)]
pub enum SweepError {
    /// The conditioning solve for a variant failed. Fatal: conditioning is
    /// a prerequisite, not best-effort.
    #[error("Conditioning failed for variant \"{variant}\"")]
    Conditioning {
        variant: String,
        #[source]
        source: SolverError,
    },

    /// A charge solve failed; carries the rate so the failing sweep member
    /// is identifiable.
    #[error("Solve failed for rate {rate}")]
    Solve {
        rate: String,
        #[source]
        source: SolverError,
    },

    /// A charge sweep was requested for a model that was never seeded from
    /// a conditioning solve.
    #[error("Model \"{variant}\" has not been seeded from a conditioning solve")]
    Unseeded { variant: String },

    /// The trace does not match the protocol shape the extractor expects.
    #[error("Shape precondition violated: {what}")]
    ShapePrecondition { what: String },

    /// An extracted signal contains NaN or infinite samples.
    #[error("Signal \"{name}\" contains non-finite samples")]
    NonFiniteSignal { name: String },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Parameter error: {0}")]
    Params(#[from] lp_params::ParamError),
}
