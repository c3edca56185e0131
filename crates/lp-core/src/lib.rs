//! lp-core: stable foundation for liplate.
//!
//! Contains:
//! - units (uom SI types + constructors, plus documented f64 aliases)
//! - rate (C-rate value type and label parsing)
//! - numeric (float helpers shared by solver and extraction code)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod rate;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use rate::CRate;
pub use units::*;
