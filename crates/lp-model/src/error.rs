use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Non-physical state: {what}")]
    NonPhysical { what: &'static str },

    #[error("Unknown plating variant: {label}")]
    UnknownVariant { label: String },

    #[error("Parameter error: {0}")]
    Params(#[from] lp_params::ParamError),
}
