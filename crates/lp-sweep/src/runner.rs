//! Charge-characterization sweep execution.

use crate::error::{SweepError, SweepResult};
use lp_core::CRate;
use lp_model::CellModel;
use lp_params::ParameterSet;
use lp_protocol::Protocol;
use lp_solver::{SolutionTrace, SolveOptions, solve};

/// One solved sweep member: the rate, the protocol it was built from, and
/// the resulting trace. The protocol travels with the trace so extraction
/// can resolve phases by role.
#[derive(Debug, Clone)]
pub struct RateSolution {
    pub rate: CRate,
    pub protocol: Protocol,
    pub trace: SolutionTrace,
}

/// Build one charge-characterization protocol per rate, preserving order.
pub fn charge_protocols(rates: &[CRate]) -> Vec<(CRate, Protocol)> {
    rates
        .iter()
        .map(|rate| (rate.clone(), Protocol::charge_characterization(rate)))
        .collect()
}

/// Solve each protocol in turn against one seeded model variant.
///
/// Iteration order follows the input; it determines legend and color order
/// downstream. Fail-fast: the first failing solve aborts the sweep with the
/// failing rate label attached.
pub fn run_sweep(
    model: &CellModel,
    protocols: &[(CRate, Protocol)],
    params: &ParameterSet,
    options: &SolveOptions,
) -> SweepResult<Vec<RateSolution>> {
    if !model.is_seeded() {
        return Err(SweepError::Unseeded {
            variant: model.name().to_string(),
        });
    }
    let mut solutions = Vec::with_capacity(protocols.len());
    for (rate, protocol) in protocols {
        tracing::info!(variant = %model.name(), rate = %rate, "solving charge protocol");
        let trace = solve(model, params, protocol, options).map_err(|source| SweepError::Solve {
            rate: rate.label().to_string(),
            source,
        })?;
        solutions.push(RateSolution {
            rate: rate.clone(),
            protocol: protocol.clone(),
            trace,
        });
    }
    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_model::{CellState, PlatingVariant};
    use lp_params::{Preset, names};

    fn rates(labels: &[&str]) -> Vec<CRate> {
        labels.iter().map(|l| CRate::parse(l).unwrap()).collect()
    }

    fn seeded_model(variant: PlatingVariant) -> CellModel {
        let mut model = CellModel::new(variant);
        // A drained post-conditioning state; exact values are not load-bearing.
        model.set_initial_conditions_from(&CellState::new(2_150.0, 0.0, 0.0).unwrap());
        model
    }

    #[test]
    fn sweep_preserves_input_order() {
        let params = ParameterSet::from_preset(Preset::Okane2022).build();
        let model = seeded_model(PlatingVariant::Reversible);
        let protocols = charge_protocols(&rates(&["2C", "C/2", "1C"]));
        let solutions =
            run_sweep(&model, &protocols, &params, &SolveOptions::default()).unwrap();
        let labels: Vec<&str> = solutions.iter().map(|s| s.rate.label()).collect();
        assert_eq!(labels, ["2C", "C/2", "1C"]);
    }

    #[test]
    fn unseeded_model_is_rejected() {
        let params = ParameterSet::from_preset(Preset::Okane2022).build();
        let model = CellModel::new(PlatingVariant::Reversible);
        let protocols = charge_protocols(&rates(&["1C"]));
        let err = run_sweep(&model, &protocols, &params, &SolveOptions::default()).unwrap_err();
        assert!(matches!(err, SweepError::Unseeded { .. }));
    }

    #[test]
    fn failure_carries_the_rate_label() {
        // Drop the upper cut-off below the charge target so every solve is
        // infeasible; the error must name the first rate in order.
        let params = ParameterSet::from_preset(Preset::Okane2022)
            .override_value(names::UPPER_VOLTAGE_CUTOFF, 4.0)
            .unwrap()
            .build();
        let model = seeded_model(PlatingVariant::Reversible);
        let protocols = charge_protocols(&rates(&["C/4", "1C"]));
        let err = run_sweep(&model, &protocols, &params, &SolveOptions::default()).unwrap_err();
        match err {
            SweepError::Solve { rate, .. } => assert_eq!(rate, "C/4"),
            other => panic!("expected solve error, got {other:?}"),
        }
    }
}
