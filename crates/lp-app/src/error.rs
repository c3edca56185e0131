//! Error types for the lp-app service layer.

/// Application error type that wraps errors from the backend crates and
/// provides a unified interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parameter error: {0}")]
    Params(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Sweep error: {0}")]
    Sweep(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for lp-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<lp_core::CoreError> for AppError {
    fn from(err: lp_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<lp_params::ParamError> for AppError {
    fn from(err: lp_params::ParamError) -> Self {
        AppError::Params(err.to_string())
    }
}

impl From<lp_solver::SolverError> for AppError {
    fn from(err: lp_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<lp_sweep::SweepError> for AppError {
    fn from(err: lp_sweep::SweepError) -> Self {
        AppError::Sweep(err.to_string())
    }
}

impl From<lp_plot::PlotError> for AppError {
    fn from(err: lp_plot::PlotError) -> Self {
        AppError::Plot(err.to_string())
    }
}

impl From<lp_results::ResultsError> for AppError {
    fn from(err: lp_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
