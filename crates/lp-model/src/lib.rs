//! lp-model: cell model variants and internal state.
//!
//! A `CellModel` selects one lithium-plating behavior and owns the starting
//! state for its solves. Seeding (`set_initial_conditions_from`) overwrites
//! that state in place with the end state of a prior solve, so a family of
//! charge experiments can start from one conditioned condition.

pub mod error;
pub mod model;
pub mod state;
pub mod variant;

pub use error::{ModelError, ModelResult};
pub use model::{CellModel, ParameterSymbols};
pub use state::CellState;
pub use variant::PlatingVariant;
