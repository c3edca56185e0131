//! lp-params: cell parameter presets, overrides, and expression evaluation.
//!
//! A `ParameterSet` is built once from a named preset plus construction-time
//! overrides and is read-only afterwards; every solve in a sweep shares the
//! same set. Symbolic `Expr` values let models expose parameter combinations
//! (e.g. electrode area = width * height) that callers evaluate numerically
//! without knowing the underlying names.

pub mod error;
pub mod expr;
pub mod names;
pub mod preset;
pub mod set;

pub use error::{ParamError, ParamResult};
pub use expr::Expr;
pub use preset::Preset;
pub use set::{ParameterSet, ParameterSetBuilder};
