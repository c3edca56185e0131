//! Derived-quantity calculation: intercalated-lithium capacity.

use crate::error::SweepResult;
use lp_core::constants::SECONDS_PER_HOUR;
use lp_model::ParameterSymbols;
use lp_params::ParameterSet;

/// Conversion constants for concentration -> capacity, evaluated from the
/// parameter set exactly once per run and reused across all rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityConstants {
    pub faraday_c_per_mol: f64,
    pub electrode_area_m2: f64,
    pub neg_thickness_m: f64,
}

impl CapacityConstants {
    pub fn from_parameters(
        symbols: ParameterSymbols,
        params: &ParameterSet,
    ) -> SweepResult<Self> {
        Ok(Self {
            faraday_c_per_mol: params.evaluate(&symbols.faraday())?,
            electrode_area_m2: params.evaluate(&symbols.electrode_area())?,
            neg_thickness_m: params.evaluate(&symbols.negative_thickness())?,
        })
    }
}

/// Intercalated-lithium capacity [A.h] from a concentration series.
///
/// Pure elementwise transform: c * F * A * L_n, converted from ampere-
/// seconds to ampere-hours.
pub fn intercalated_capacity_ah(
    concentration_mol_m3: &[f64],
    constants: &CapacityConstants,
) -> Vec<f64> {
    let scale = constants.faraday_c_per_mol
        * constants.electrode_area_m2
        * constants.neg_thickness_m
        / SECONDS_PER_HOUR;
    concentration_mol_m3.iter().map(|c| c * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{Tolerances, nearly_equal};
    use lp_model::{CellModel, PlatingVariant};
    use lp_params::Preset;
    use proptest::prelude::*;

    #[test]
    fn constant_concentration_gives_constant_capacity() {
        let constants = CapacityConstants {
            faraday_c_per_mol: 96_485.0,
            electrode_area_m2: 0.01,
            neg_thickness_m: 1e-4,
        };
        let conc = [1000.0; 5];
        let capacity = intercalated_capacity_ah(&conc, &constants);
        assert_eq!(capacity.len(), 5);
        let expected = 1000.0 * 96_485.0 * 0.01 * 1e-4 / 3600.0;
        for q in &capacity {
            assert!(nearly_equal(*q, expected, Tolerances::default()));
            assert!((q - 0.0268).abs() < 1e-4);
        }
    }

    #[test]
    fn constants_come_from_the_parameter_set_once() {
        let params = ParameterSet::from_preset(Preset::Okane2022).build();
        let model = CellModel::new(PlatingVariant::Reversible);
        let constants = CapacityConstants::from_parameters(model.param(), &params).unwrap();
        assert!((constants.electrode_area_m2 - 1.58 * 0.065).abs() < 1e-12);
        assert!((constants.neg_thickness_m - 8.52e-5).abs() < 1e-18);
    }

    proptest! {
        // Pure function: same input, bit-identical output.
        #[test]
        fn idempotent_over_reruns(conc in proptest::collection::vec(0.0f64..40_000.0, 0..50)) {
            let constants = CapacityConstants {
                faraday_c_per_mol: 96_485.332_12,
                electrode_area_m2: 0.1027,
                neg_thickness_m: 8.52e-5,
            };
            let first = intercalated_capacity_ah(&conc, &constants);
            let second = intercalated_capacity_ah(&conc, &constants);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn output_length_matches_input(len in 0usize..100) {
            let constants = CapacityConstants {
                faraday_c_per_mol: 96_485.0,
                electrode_area_m2: 0.01,
                neg_thickness_m: 1e-4,
            };
            let conc = vec![500.0; len];
            prop_assert_eq!(intercalated_capacity_ah(&conc, &constants).len(), len);
        }
    }
}
