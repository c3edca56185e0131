//! Conditioning solves and state transfer.

use crate::error::{SweepError, SweepResult};
use lp_model::CellModel;
use lp_params::ParameterSet;
use lp_protocol::Protocol;
use lp_solver::{SolutionTrace, SolveOptions, solve};

/// Solve the reference discharge protocol for one variant and seed the
/// variant's starting state from the end state, in place.
///
/// After this returns, every subsequent solve of `model` starts from the
/// conditioned state instead of the parameter-set default.
pub fn condition_and_seed(
    model: &mut CellModel,
    params: &ParameterSet,
    options: &SolveOptions,
) -> SweepResult<SolutionTrace> {
    let protocol = Protocol::discharge_conditioning();
    tracing::info!(variant = %model.name(), "running conditioning discharge");
    let trace =
        solve(model, params, &protocol, options).map_err(|source| SweepError::Conditioning {
            variant: model.name().to_string(),
            source,
        })?;
    model.set_initial_conditions_from(trace.final_state());
    Ok(trace)
}

/// Condition every variant in turn. Any failure aborts the whole run.
pub fn condition_all(
    models: &mut [CellModel],
    params: &ParameterSet,
    options: &SolveOptions,
) -> SweepResult<Vec<SolutionTrace>> {
    let mut traces = Vec::with_capacity(models.len());
    for model in models.iter_mut() {
        traces.push(condition_and_seed(model, params, options)?);
    }
    Ok(traces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_model::PlatingVariant;
    use lp_params::Preset;

    #[test]
    fn conditioning_seeds_the_exact_end_state() {
        let params = ParameterSet::from_preset(Preset::Okane2022).build();
        let mut model = CellModel::new(PlatingVariant::Reversible);
        let trace = condition_and_seed(&mut model, &params, &SolveOptions::default()).unwrap();

        assert!(model.is_seeded());
        // Byte-for-byte: the seeded start is the conditioning end state.
        let seeded = model.initial_state(&params).unwrap();
        assert_eq!(&seeded, trace.final_state());
        // The discharge actually drained the electrode.
        let fresh = CellModel::new(PlatingVariant::Reversible)
            .initial_state(&params)
            .unwrap();
        assert!(seeded.neg_concentration < fresh.neg_concentration);
    }

    #[test]
    fn each_variant_keeps_its_own_seeded_state() {
        let params = ParameterSet::from_preset(Preset::Okane2022).build();
        let mut models: Vec<CellModel> =
            PlatingVariant::ALL.iter().map(|v| CellModel::new(*v)).collect();
        let traces = condition_all(&mut models, &params, &SolveOptions::default()).unwrap();
        assert_eq!(traces.len(), 3);
        for (model, trace) in models.iter().zip(&traces) {
            assert_eq!(
                &model.initial_state(&params).unwrap(),
                trace.final_state(),
                "variant {}",
                model.name()
            );
        }
    }
}
