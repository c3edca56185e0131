use thiserror::Error;

pub type ParamResult<T> = Result<T, ParamError>;

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("Non-finite value for parameter {name}: {value}")]
    NonFinite { name: String, value: f64 },

    #[error("Unknown parameter preset: {name}")]
    UnknownPreset { name: String },
}
