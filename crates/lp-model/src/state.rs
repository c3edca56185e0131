//! Internal electrochemical cell state.

use crate::error::{ModelError, ModelResult};
use lp_core::{CapacityAh, Concentration};
use serde::{Deserialize, Serialize};

/// Lumped internal state of one cell-model variant.
///
/// This is the complete state a solve starts from and the complete state a
/// solution trace ends with, so seeding one from the other is a plain copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    /// Volume-averaged negative-electrode lithium concentration.
    pub neg_concentration: Concentration,
    /// Capacity currently held in reversibly plated lithium.
    pub plated_capacity_ah: CapacityAh,
    /// Capacity lost to electrically isolated dead lithium.
    pub dead_capacity_ah: CapacityAh,
}

impl CellState {
    pub fn new(
        neg_concentration: Concentration,
        plated_capacity_ah: CapacityAh,
        dead_capacity_ah: CapacityAh,
    ) -> ModelResult<Self> {
        let state = Self {
            neg_concentration,
            plated_capacity_ah,
            dead_capacity_ah,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check physical plausibility: everything finite and non-negative.
    pub fn validate(&self) -> ModelResult<()> {
        for (value, finite_msg, sign_msg) in [
            (
                self.neg_concentration,
                "negative concentration must be finite",
                "negative concentration must be non-negative",
            ),
            (
                self.plated_capacity_ah,
                "plated capacity must be finite",
                "plated capacity must be non-negative",
            ),
            (
                self.dead_capacity_ah,
                "dead capacity must be finite",
                "dead capacity must be non-negative",
            ),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonPhysical { what: finite_msg });
            }
            if value < 0.0 {
                return Err(ModelError::NonPhysical { what: sign_msg });
            }
        }
        Ok(())
    }

    /// Total capacity currently lost to plating, recovered or not.
    pub fn plating_loss_ah(&self) -> CapacityAh {
        self.plated_capacity_ah + self.dead_capacity_ah
    }
}
