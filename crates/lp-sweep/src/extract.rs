//! Signal extraction from the final rest phase of a solved trace.

use crate::derive::{CapacityConstants, intercalated_capacity_ah};
use crate::error::{SweepError, SweepResult};
use crate::runner::RateSolution;
use lp_core::{CRate, CapacityAh, Concentration, VolCurrentDensity, all_finite};
use lp_protocol::{PhaseRole, Protocol};
use lp_solver::{SolutionTrace, signals};

/// The fixed set of signals compared across rates, aligned to t = 0.
///
/// Invariant: every sequence has the same length and shares the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBundle {
    pub time_min: Vec<f64>,
    pub voltage_v: Vec<f64>,
    pub deintercalation_a_m3: Vec<VolCurrentDensity>,
    pub stripping_a_m3: Vec<VolCurrentDensity>,
    pub total_a_m3: Vec<VolCurrentDensity>,
    pub plated_capacity_ah: Vec<CapacityAh>,
    pub concentration_mol_m3: Vec<Concentration>,
    pub intercalated_capacity_ah: Vec<CapacityAh>,
}

impl SignalBundle {
    pub fn len(&self) -> usize {
        self.time_min.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_min.is_empty()
    }
}

/// A bundle keyed by the rate that produced it.
#[derive(Debug, Clone)]
pub struct RateBundle {
    pub rate: CRate,
    pub bundle: SignalBundle,
}

/// Extract the comparison signals from one trace's final rest phase.
///
/// The rest phase is resolved through the protocol's role map, never by a
/// hardcoded position; a trace whose first cycle does not match the
/// protocol's shape is rejected before any signal is read.
pub fn extract_bundle(
    trace: &SolutionTrace,
    protocol: &Protocol,
    constants: &CapacityConstants,
) -> SweepResult<SignalBundle> {
    let rest_index =
        protocol
            .phase_index(PhaseRole::FinalRest)
            .ok_or_else(|| SweepError::ShapePrecondition {
                what: "protocol has no final rest phase".to_string(),
            })?;
    let cycle = trace.cycle(0).ok_or_else(|| SweepError::ShapePrecondition {
        what: "trace has no cycles".to_string(),
    })?;
    if cycle.steps().len() != protocol.phase_count() {
        return Err(SweepError::ShapePrecondition {
            what: format!(
                "trace cycle 0 has {} steps but the protocol has {} phases",
                cycle.steps().len(),
                protocol.phase_count()
            ),
        });
    }
    // In range after the step-count check above.
    let step = cycle
        .step(rest_index)
        .ok_or_else(|| SweepError::ShapePrecondition {
            what: "final rest phase index out of range".to_string(),
        })?;

    let time_min = step.signal(signals::TIME_MIN)?;
    let voltage_v = step.signal(signals::VOLTAGE)?;
    let deintercalation = step.signal(signals::NEG_INTERFACIAL_CURRENT_DENSITY)?;
    let stripping = step.signal(signals::PLATING_INTERFACIAL_CURRENT_DENSITY)?;
    let total = step.signal(signals::TOTAL_INTERFACIAL_CURRENT_DENSITY)?;
    let plated = step.signal(signals::PLATING_CAPACITY_LOSS)?;
    let concentration = step.signal(signals::NEG_AVG_CONCENTRATION)?;

    let len = time_min.len();
    for (name, series) in [
        (signals::TIME_MIN, time_min),
        (signals::VOLTAGE, voltage_v),
        (signals::NEG_INTERFACIAL_CURRENT_DENSITY, deintercalation),
        (signals::PLATING_INTERFACIAL_CURRENT_DENSITY, stripping),
        (signals::TOTAL_INTERFACIAL_CURRENT_DENSITY, total),
        (signals::PLATING_CAPACITY_LOSS, plated),
        (signals::NEG_AVG_CONCENTRATION, concentration),
    ] {
        if series.len() != len {
            return Err(SweepError::ShapePrecondition {
                what: format!(
                    "signal \"{name}\" has {} samples, time axis has {len}",
                    series.len()
                ),
            });
        }
        if !all_finite(series) {
            return Err(SweepError::NonFiniteSignal {
                name: name.to_string(),
            });
        }
    }

    // Common zero origin: overlays stay comparable across rates even though
    // each rate reaches its rest phase at a different absolute time.
    let t0 = time_min.first().copied().unwrap_or(0.0);
    let time_min: Vec<f64> = time_min.iter().map(|t| t - t0).collect();

    let intercalated = intercalated_capacity_ah(concentration, constants);

    Ok(SignalBundle {
        time_min,
        voltage_v: voltage_v.to_vec(),
        deintercalation_a_m3: deintercalation.to_vec(),
        stripping_a_m3: stripping.to_vec(),
        total_a_m3: total.to_vec(),
        plated_capacity_ah: plated.to_vec(),
        concentration_mol_m3: concentration.to_vec(),
        intercalated_capacity_ah: intercalated,
    })
}

/// Extract one bundle per solved rate, preserving sweep order.
pub fn extract_bundles(
    solutions: &[RateSolution],
    constants: &CapacityConstants,
) -> SweepResult<Vec<RateBundle>> {
    solutions
        .iter()
        .map(|solution| {
            let bundle = extract_bundle(&solution.trace, &solution.protocol, constants)?;
            Ok(RateBundle {
                rate: solution.rate.clone(),
                bundle,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_model::CellState;
    use lp_solver::{Cycle, StepSolution};

    fn test_constants() -> CapacityConstants {
        CapacityConstants {
            faraday_c_per_mol: 96_485.0,
            electrode_area_m2: 0.01,
            neg_thickness_m: 1e-4,
        }
    }

    fn rest_step(samples: usize) -> StepSolution {
        let mut step = StepSolution::new("Rest for 60 minutes");
        let time: Vec<f64> = (0..samples).map(|i| 100.0 + i as f64).collect();
        step.insert_signal(signals::TIME_MIN, time);
        step.insert_signal(signals::VOLTAGE, vec![4.0; samples]);
        step.insert_signal(signals::NEG_INTERFACIAL_CURRENT_DENSITY, vec![-5.0; samples]);
        step.insert_signal(signals::PLATING_INTERFACIAL_CURRENT_DENSITY, vec![5.0; samples]);
        step.insert_signal(signals::TOTAL_INTERFACIAL_CURRENT_DENSITY, vec![0.0; samples]);
        step.insert_signal(signals::PLATING_CAPACITY_LOSS, vec![0.01; samples]);
        step.insert_signal(signals::NEG_AVG_CONCENTRATION, vec![1000.0; samples]);
        step
    }

    fn filler_step() -> StepSolution {
        rest_step(2)
    }

    fn trace_with_steps(steps: Vec<StepSolution>) -> SolutionTrace {
        SolutionTrace::new(
            vec![Cycle::new(steps)],
            CellState::new(1000.0, 0.0, 0.0).unwrap(),
        )
    }

    fn charge_protocol() -> Protocol {
        Protocol::charge_characterization(&CRate::parse("1C").unwrap())
    }

    #[test]
    fn normalizes_time_to_zero_origin() {
        let trace = trace_with_steps(vec![filler_step(), filler_step(), rest_step(5)]);
        let bundle = extract_bundle(&trace, &charge_protocol(), &test_constants()).unwrap();
        assert_eq!(bundle.len(), 5);
        assert_eq!(bundle.time_min[0], 0.0);
        for pair in bundle.time_min.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn two_step_trace_violates_shape_precondition() {
        let trace = trace_with_steps(vec![filler_step(), rest_step(5)]);
        let err = extract_bundle(&trace, &charge_protocol(), &test_constants()).unwrap_err();
        assert!(matches!(err, SweepError::ShapePrecondition { .. }));
    }

    #[test]
    fn empty_trace_violates_shape_precondition() {
        let trace = SolutionTrace::new(Vec::new(), CellState::new(1.0, 0.0, 0.0).unwrap());
        let err = extract_bundle(&trace, &charge_protocol(), &test_constants()).unwrap_err();
        assert!(matches!(err, SweepError::ShapePrecondition { .. }));
    }

    #[test]
    fn missing_signal_surfaces_not_defaults() {
        let mut step = rest_step(3);
        step = {
            // Rebuild the step without the voltage signal.
            let mut bare = StepSolution::new(step.description().to_string());
            for name in [
                signals::TIME_MIN,
                signals::NEG_INTERFACIAL_CURRENT_DENSITY,
                signals::PLATING_INTERFACIAL_CURRENT_DENSITY,
                signals::TOTAL_INTERFACIAL_CURRENT_DENSITY,
                signals::PLATING_CAPACITY_LOSS,
                signals::NEG_AVG_CONCENTRATION,
            ] {
                bare.insert_signal(name, step.signal(name).unwrap().to_vec());
            }
            bare
        };
        let trace = trace_with_steps(vec![filler_step(), filler_step(), step]);
        let err = extract_bundle(&trace, &charge_protocol(), &test_constants()).unwrap_err();
        assert!(matches!(
            err,
            SweepError::Solver(lp_solver::SolverError::MissingSignal { .. })
        ));
    }

    #[test]
    fn mismatched_signal_lengths_are_rejected() {
        let mut step = rest_step(5);
        step.insert_signal(signals::VOLTAGE, vec![4.0; 4]);
        let trace = trace_with_steps(vec![filler_step(), filler_step(), step]);
        let err = extract_bundle(&trace, &charge_protocol(), &test_constants()).unwrap_err();
        assert!(matches!(err, SweepError::ShapePrecondition { .. }));
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let mut step = rest_step(5);
        step.insert_signal(signals::VOLTAGE, vec![4.0, 4.0, f64::NAN, 4.0, 4.0]);
        let trace = trace_with_steps(vec![filler_step(), filler_step(), step]);
        let err = extract_bundle(&trace, &charge_protocol(), &test_constants()).unwrap_err();
        assert!(matches!(
            err,
            SweepError::NonFiniteSignal { name } if name == signals::VOLTAGE
        ));
    }

    #[test]
    fn all_bundle_sequences_share_one_length() {
        let trace = trace_with_steps(vec![filler_step(), filler_step(), rest_step(7)]);
        let b = extract_bundle(&trace, &charge_protocol(), &test_constants()).unwrap();
        for len in [
            b.voltage_v.len(),
            b.deintercalation_a_m3.len(),
            b.stripping_a_m3.len(),
            b.total_a_m3.len(),
            b.plated_capacity_ah.len(),
            b.concentration_mol_m3.len(),
            b.intercalated_capacity_ah.len(),
        ] {
            assert_eq!(len, b.len());
        }
    }
}
