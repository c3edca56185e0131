use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unparseable C-rate label: {label}")]
    BadRateLabel { label: String },
}
