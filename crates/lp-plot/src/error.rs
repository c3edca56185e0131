use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    /// The drawing backend rejected an operation.
    #[error("plot backend error: {message}")]
    Backend { message: String },

    /// The figure cannot be drawn as described.
    #[error("invalid figure: {what}")]
    InvalidFigure { what: String },
}

pub type PlotResult<T> = Result<T, PlotError>;
