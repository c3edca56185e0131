//! Phase-by-phase protocol solving.

use crate::cell::CellProperties;
use crate::error::{SolverError, SolverResult};
use crate::signals;
use crate::trace::{Cycle, SolutionTrace, StepSolution};
use lp_core::constants::SECONDS_PER_HOUR;
use lp_core::{seconds_of, volts_of};
use lp_model::{CellModel, CellState, PlatingVariant};
use lp_params::ParameterSet;
use lp_protocol::{PhaseInstruction, PhaseSpec, Protocol};

/// How far past a voltage cut-off the solve may drift before aborting.
const VOLTAGE_GUARD_MARGIN_V: f64 = 0.05;

/// Options for protocol solves.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Record extended state-of-health signals. Off by default; the
    /// charge-rate study does not consume them.
    pub calc_soh: bool,
    /// Fixed integration step [s].
    pub dt_s: f64,
    /// Recording interval for phases without a reporting hint [s].
    pub default_period_s: f64,
    /// Step budget per phase before the solve is declared infeasible.
    pub max_steps_per_phase: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            calc_soh: false,
            dt_s: 0.5,
            default_period_s: 30.0,
            max_steps_per_phase: 1_000_000,
        }
    }
}

/// Solve a protocol against a model variant and a shared parameter set.
///
/// The model is not mutated; its starting state (seeded or default) is
/// copied out and integrated forward phase by phase. Any failure aborts the
/// solve with no partial trace.
pub fn solve(
    model: &CellModel,
    params: &ParameterSet,
    protocol: &Protocol,
    options: &SolveOptions,
) -> SolverResult<SolutionTrace> {
    if options.dt_s <= 0.0 || !options.dt_s.is_finite() {
        return Err(SolverError::InvalidArg {
            what: "dt_s must be positive and finite",
        });
    }
    if options.default_period_s <= 0.0 {
        return Err(SolverError::InvalidArg {
            what: "default_period_s must be positive",
        });
    }
    if options.max_steps_per_phase == 0 {
        return Err(SolverError::InvalidArg {
            what: "max_steps_per_phase must be positive",
        });
    }

    let props = CellProperties::from_parameters(params)?;
    let mut state = model.initial_state(params)?;
    let variant = model.variant();

    tracing::info!(
        model = %model.name(),
        phases = protocol.phase_count(),
        "solving protocol"
    );

    let mut t = 0.0;
    let mut steps = Vec::with_capacity(protocol.phase_count());
    for spec in protocol.phases() {
        steps.push(solve_phase(
            &mut state, &mut t, variant, &props, spec, options,
        )?);
    }

    Ok(SolutionTrace::new(vec![Cycle::new(steps)], state))
}

fn solve_phase(
    state: &mut CellState,
    t: &mut f64,
    variant: PlatingVariant,
    props: &CellProperties,
    spec: &PhaseSpec,
    options: &SolveOptions,
) -> SolverResult<StepSolution> {
    let descr = spec.instruction.to_string();
    let period = spec
        .period
        .map(seconds_of)
        .unwrap_or(options.default_period_s);
    let dt = options.dt_s;

    if let PhaseInstruction::ChargeAtRate { until, .. } = &spec.instruction {
        let target = volts_of(*until);
        if target > props.upper_cutoff_v + VOLTAGE_GUARD_MARGIN_V {
            return Err(SolverError::Infeasible {
                phase: descr,
                reason: format!(
                    "charge target {target} V exceeds upper voltage cut-off {} V",
                    props.upper_cutoff_v
                ),
            });
        }
    }

    let mut rec = Recorder::new(options.calc_soh);
    let mut t_phase = 0.0;
    let mut last_record = f64::NEG_INFINITY;
    let mut n: usize = 0;

    loop {
        let sth = props.stoichiometry(state.neg_concentration);
        let ocv = props.ocv(sth);

        // External current, charge positive.
        let i_ext = match &spec.instruction {
            PhaseInstruction::DischargeAtRate { rate, .. } => -rate.current_a(props.capacity_ah),
            PhaseInstruction::ChargeAtRate { rate, .. } => rate.current_a(props.capacity_ah),
            PhaseInstruction::HoldVoltage { at, .. } => {
                ((volts_of(*at) - ocv) / props.resistance_ohm).max(0.0)
            }
            PhaseInstruction::Rest { .. } => 0.0,
        };
        let v = ocv + i_ext * props.resistance_ohm;

        // Internal split at this instant: plating diverts part of an applied
        // charge current; stripping feeds plated lithium back at rest.
        let i_pl = props.plating_current_a(sth, i_ext);
        let i_str = stripping_current(state, variant, props, i_ext, dt);
        // Net current into the electrode.
        let i_int = i_ext - i_pl + i_str;

        let done = match &spec.instruction {
            PhaseInstruction::DischargeAtRate { until, .. } => v <= volts_of(*until),
            PhaseInstruction::ChargeAtRate { until, .. } => v >= volts_of(*until),
            PhaseInstruction::HoldVoltage { until_rate, .. } => {
                i_ext <= until_rate.current_a(props.capacity_ah)
            }
            PhaseInstruction::Rest { duration } => t_phase >= seconds_of(*duration) - 1e-9,
        };

        if done || *t - last_record >= period - 1e-9 {
            rec.push(*t, v, i_ext, i_pl, i_str, i_int, state, props);
            last_record = *t;
        }
        if done {
            break;
        }

        if v > props.upper_cutoff_v + VOLTAGE_GUARD_MARGIN_V {
            return Err(SolverError::Infeasible {
                phase: descr,
                reason: format!("voltage {v:.4} V exceeded the upper cut-off"),
            });
        }
        if v < props.lower_cutoff_v - VOLTAGE_GUARD_MARGIN_V {
            return Err(SolverError::Infeasible {
                phase: descr,
                reason: format!("voltage {v:.4} V fell below the lower cut-off"),
            });
        }
        if n >= options.max_steps_per_phase {
            return Err(SolverError::Infeasible {
                phase: descr,
                reason: "termination condition not reached within the step budget".to_string(),
            });
        }

        integrate(state, variant, props, i_pl, i_str, i_int, dt);

        if !(state.neg_concentration.is_finite()
            && state.plated_capacity_ah.is_finite()
            && state.dead_capacity_ah.is_finite())
        {
            return Err(SolverError::NonConvergence {
                phase: descr,
                steps: n,
            });
        }
        match &spec.instruction {
            PhaseInstruction::ChargeAtRate { .. } | PhaseInstruction::HoldVoltage { .. }
                if state.neg_concentration >= props.c_max =>
            {
                return Err(SolverError::Infeasible {
                    phase: descr,
                    reason: "electrode saturated before the cutoff was reached".to_string(),
                });
            }
            PhaseInstruction::DischargeAtRate { .. } if state.neg_concentration <= 0.0 => {
                return Err(SolverError::Infeasible {
                    phase: descr,
                    reason: "electrode depleted before the cutoff was reached".to_string(),
                });
            }
            _ => {}
        }

        *t += dt;
        t_phase += dt;
        n += 1;
    }

    tracing::debug!(
        phase = %descr,
        steps = n,
        samples = rec.len(),
        "phase complete"
    );
    Ok(rec.into_step(descr))
}

/// Stripping current feeding plated lithium back into the electrode [A].
///
/// Active only under non-charging conditions and for variants that strip;
/// limited so one explicit step cannot push the electrode past c_max.
fn stripping_current(
    state: &CellState,
    variant: PlatingVariant,
    props: &CellProperties,
    i_ext: f64,
    dt: f64,
) -> f64 {
    if i_ext > 0.0 || !variant.strips() || state.plated_capacity_ah <= 0.0 {
        return 0.0;
    }
    let nominal = SECONDS_PER_HOUR * state.plated_capacity_ah / props.stripping_time_constant_s;
    let headroom = (props.c_max - state.neg_concentration).max(0.0) * props.faraday
        * props.neg_volume_m3()
        / dt;
    nominal.min(headroom)
}

fn integrate(
    state: &mut CellState,
    variant: PlatingVariant,
    props: &CellProperties,
    i_pl: f64,
    i_str: f64,
    i_int: f64,
    dt: f64,
) {
    let f_vn = props.faraday * props.neg_volume_m3();
    state.neg_concentration += i_int / f_vn * dt;
    state.plated_capacity_ah += (i_pl - i_str) / SECONDS_PER_HOUR * dt;
    if state.plated_capacity_ah < 0.0 {
        state.plated_capacity_ah = 0.0;
    }
    if variant.decays_to_dead() && state.plated_capacity_ah > 0.0 {
        let transfer = props.dead_decay_per_s * state.plated_capacity_ah * dt;
        state.plated_capacity_ah -= transfer;
        state.dead_capacity_ah += transfer;
    }
}

/// Accumulates recorded samples for one phase.
struct Recorder {
    calc_soh: bool,
    time_s: Vec<f64>,
    time_min: Vec<f64>,
    voltage: Vec<f64>,
    current: Vec<f64>,
    j_neg: Vec<f64>,
    j_plating: Vec<f64>,
    j_total: Vec<f64>,
    plating_loss: Vec<f64>,
    concentration: Vec<f64>,
    soh_capacity: Vec<f64>,
    soh_inventory_loss: Vec<f64>,
}

impl Recorder {
    fn new(calc_soh: bool) -> Self {
        Self {
            calc_soh,
            time_s: Vec::new(),
            time_min: Vec::new(),
            voltage: Vec::new(),
            current: Vec::new(),
            j_neg: Vec::new(),
            j_plating: Vec::new(),
            j_total: Vec::new(),
            plating_loss: Vec::new(),
            concentration: Vec::new(),
            soh_capacity: Vec::new(),
            soh_inventory_loss: Vec::new(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        t: f64,
        v: f64,
        i_ext: f64,
        i_pl: f64,
        i_str: f64,
        i_int: f64,
        state: &CellState,
        props: &CellProperties,
    ) {
        let vn = props.neg_volume_m3();
        // Anodic-positive interfacial densities.
        let j_neg = -i_int / vn;
        let j_pl = (i_str - i_pl) / vn;

        self.time_s.push(t);
        self.time_min.push(t / 60.0);
        self.voltage.push(v);
        self.current.push(i_ext);
        self.j_neg.push(j_neg);
        self.j_plating.push(j_pl);
        self.j_total.push(j_neg + j_pl);
        self.plating_loss.push(state.plating_loss_ah());
        self.concentration.push(state.neg_concentration);
        if self.calc_soh {
            self.soh_capacity
                .push(state.neg_concentration * props.faraday * vn / SECONDS_PER_HOUR
                    + state.plated_capacity_ah);
            self.soh_inventory_loss
                .push(100.0 * state.dead_capacity_ah / props.capacity_ah);
        }
    }

    fn len(&self) -> usize {
        self.time_s.len()
    }

    fn into_step(self, description: String) -> StepSolution {
        let mut step = StepSolution::new(description);
        step.insert_signal(signals::TIME_S, self.time_s);
        step.insert_signal(signals::TIME_MIN, self.time_min);
        step.insert_signal(signals::VOLTAGE, self.voltage);
        step.insert_signal(signals::CURRENT, self.current);
        step.insert_signal(signals::NEG_INTERFACIAL_CURRENT_DENSITY, self.j_neg);
        step.insert_signal(signals::PLATING_INTERFACIAL_CURRENT_DENSITY, self.j_plating);
        step.insert_signal(signals::TOTAL_INTERFACIAL_CURRENT_DENSITY, self.j_total);
        step.insert_signal(signals::PLATING_CAPACITY_LOSS, self.plating_loss);
        step.insert_signal(signals::NEG_AVG_CONCENTRATION, self.concentration);
        if self.calc_soh {
            step.insert_signal(signals::TOTAL_LITHIUM_CAPACITY, self.soh_capacity);
            step.insert_signal(signals::LITHIUM_INVENTORY_LOSS, self.soh_inventory_loss);
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::CRate;
    use lp_params::{Preset, names};

    fn params() -> ParameterSet {
        ParameterSet::from_preset(Preset::Okane2022).build()
    }

    #[test]
    fn rejects_invalid_options() {
        let model = CellModel::new(PlatingVariant::Reversible);
        let protocol = Protocol::charge_characterization(&CRate::parse("1C").unwrap());
        let options = SolveOptions {
            dt_s: 0.0,
            ..SolveOptions::default()
        };
        let err = solve(&model, &params(), &protocol, &options).unwrap_err();
        assert!(matches!(err, SolverError::InvalidArg { .. }));
    }

    #[test]
    fn charge_target_above_cutoff_is_infeasible_immediately() {
        let params = ParameterSet::from_preset(Preset::Okane2022)
            .override_value(names::UPPER_VOLTAGE_CUTOFF, 4.0)
            .unwrap()
            .build();
        let model = CellModel::new(PlatingVariant::Reversible);
        let protocol = Protocol::charge_characterization(&CRate::parse("1C").unwrap());
        let err = solve(&model, &params, &protocol, &SolveOptions::default()).unwrap_err();
        assert!(matches!(err, SolverError::Infeasible { .. }));
    }

    #[test]
    fn exhausted_step_budget_is_infeasible() {
        let model = CellModel::new(PlatingVariant::Reversible);
        let protocol = Protocol::discharge_conditioning();
        let options = SolveOptions {
            max_steps_per_phase: 10,
            ..SolveOptions::default()
        };
        let err = solve(&model, &params(), &protocol, &options).unwrap_err();
        match err {
            SolverError::Infeasible { reason, .. } => {
                assert!(reason.contains("step budget"));
            }
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    #[test]
    fn soh_signals_only_present_when_enabled() {
        let mut model = CellModel::new(PlatingVariant::Reversible);
        model.set_initial_conditions_from(&CellState::new(3000.0, 0.0, 0.0).unwrap());
        let protocol = Protocol::charge_characterization(&CRate::parse("1C").unwrap());

        let plain = solve(&model, &params(), &protocol, &SolveOptions::default()).unwrap();
        let step = &plain.cycles()[0].steps()[0];
        assert!(step.signal(signals::TOTAL_LITHIUM_CAPACITY).is_err());

        let options = SolveOptions {
            calc_soh: true,
            ..SolveOptions::default()
        };
        let soh = solve(&model, &params(), &protocol, &options).unwrap();
        let step = &soh.cycles()[0].steps()[0];
        assert!(step.signal(signals::TOTAL_LITHIUM_CAPACITY).is_ok());
        assert!(step.signal(signals::LITHIUM_INVENTORY_LOSS).is_ok());
    }
}
