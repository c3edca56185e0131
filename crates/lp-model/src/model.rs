//! Cell model: variant selector, starting state, parameter symbols.

use crate::error::ModelResult;
use crate::state::CellState;
use crate::variant::PlatingVariant;
use lp_params::{Expr, ParameterSet, names};

/// Symbolic parameter expressions the model exposes to post-processing.
///
/// Mirrors how the model, not the caller, knows which database entries make
/// up a derived quantity. Callers evaluate these against a `ParameterSet`.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSymbols;

impl ParameterSymbols {
    /// Faraday's constant [C.mol-1].
    pub fn faraday(&self) -> Expr {
        Expr::param(names::FARADAY)
    }

    /// Electrode cross-sectional area = width * height [m2].
    pub fn electrode_area(&self) -> Expr {
        Expr::param(names::ELECTRODE_WIDTH) * Expr::param(names::ELECTRODE_HEIGHT)
    }

    /// Negative-electrode thickness [m].
    pub fn negative_thickness(&self) -> Expr {
        Expr::param(names::NEGATIVE_THICKNESS)
    }
}

/// One cell-model variant with its own starting state.
///
/// Created once at startup and kept alive for the whole study; seeding
/// mutates it in place, nothing else does.
#[derive(Debug, Clone)]
pub struct CellModel {
    variant: PlatingVariant,
    name: String,
    seeded: Option<CellState>,
}

impl CellModel {
    pub fn new(variant: PlatingVariant) -> Self {
        Self {
            variant,
            name: variant.label().to_string(),
            seeded: None,
        }
    }

    pub fn variant(&self) -> PlatingVariant {
        self.variant
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self) -> ParameterSymbols {
        ParameterSymbols
    }

    /// Overwrite this model's starting state in place.
    ///
    /// Subsequent solves start from `state` instead of the parameter-set
    /// default. Must be called with a conditioning end state before any
    /// charge-characterization solve.
    pub fn set_initial_conditions_from(&mut self, state: &CellState) {
        self.seeded = Some(state.clone());
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded.is_some()
    }

    /// The state a solve of this model starts from.
    ///
    /// Seeded state wins; otherwise the parameter set's initial
    /// concentration with no plated or dead lithium.
    pub fn initial_state(&self, params: &ParameterSet) -> ModelResult<CellState> {
        if let Some(state) = &self.seeded {
            return Ok(state.clone());
        }
        let c0 = params.get(names::NEGATIVE_INITIAL_CONCENTRATION)?;
        CellState::new(c0, 0.0, 0.0)
    }
}
