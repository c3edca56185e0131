//! Study execution and caching service.

use std::path::PathBuf;

use lp_core::CRate;
use lp_model::CellModel;
use lp_params::{ParameterSet, Preset};
use lp_plot::{DEFAULT_PALETTE, assemble, render_png};
use lp_results::{RunManifest, RunStore, SeriesRecord, StudyDescriptor, compute_run_id};
use lp_solver::SolveOptions;
use lp_sweep::{
    CapacityConstants, RateBundle, SignalBundle, charge_protocols, condition_all, extract_bundles,
    run_sweep,
};

use crate::config::StudyConfig;
use crate::error::{AppError, AppResult};

/// Options for executing a study.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
    pub solve: SolveOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
            solve: SolveOptions::default(),
        }
    }
}

/// Summary of an executed (or cache-loaded) study.
#[derive(Debug, Clone)]
pub struct StudyOutcome {
    pub run_id: String,
    pub variant: String,
    pub rate_labels: Vec<String>,
    pub loaded_from_cache: bool,
    pub figure_path: PathBuf,
}

fn descriptor_for(config: &StudyConfig) -> StudyDescriptor {
    StudyDescriptor {
        preset: config.preset.clone(),
        overrides: config.overrides.clone(),
        variant: config.sweep_variant.label().to_string(),
        rate_labels: config.rates.clone(),
        calc_soh: config.calc_soh,
    }
}

fn build_parameters(config: &StudyConfig) -> AppResult<ParameterSet> {
    let preset: Preset = config.preset.parse()?;
    let mut builder = ParameterSet::from_preset(preset);
    for (name, value) in &config.overrides {
        builder = builder.override_value(name, *value)?;
    }
    Ok(builder.build())
}

fn bundles_from_records(records: &[SeriesRecord]) -> AppResult<Vec<RateBundle>> {
    records
        .iter()
        .map(|record| {
            Ok(RateBundle {
                rate: CRate::parse(&record.rate)?,
                bundle: SignalBundle {
                    time_min: record.time_min.clone(),
                    voltage_v: record.voltage_v.clone(),
                    deintercalation_a_m3: record.deintercalation_a_m3.clone(),
                    stripping_a_m3: record.stripping_a_m3.clone(),
                    total_a_m3: record.total_a_m3.clone(),
                    plated_capacity_ah: record.plated_capacity_ah.clone(),
                    concentration_mol_m3: record.concentration_mol_m3.clone(),
                    intercalated_capacity_ah: record.intercalated_capacity_ah.clone(),
                },
            })
        })
        .collect()
}

fn solve_study(
    config: &StudyConfig,
    params: &ParameterSet,
    rates: &[CRate],
    options: &SolveOptions,
) -> AppResult<Vec<RateBundle>> {
    let mut models: Vec<CellModel> = config
        .variants
        .iter()
        .map(|variant| CellModel::new(*variant))
        .collect();
    condition_all(&mut models, params, options)?;

    let sweep_model = models
        .iter()
        .find(|model| model.variant() == config.sweep_variant)
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "sweep variant '{}' was not conditioned",
                config.sweep_variant.label()
            ))
        })?;

    let protocols = charge_protocols(rates);
    let solutions = run_sweep(sweep_model, &protocols, params, options)?;
    let constants = CapacityConstants::from_parameters(sweep_model.param(), params)?;
    Ok(extract_bundles(&solutions, &constants)?)
}

/// Execute a study, or reuse a stored run with the same descriptor.
///
/// Either way the comparison figure is (re)rendered from the bundles so a
/// deleted or stale PNG comes back without a solve.
pub fn run_study(config: &StudyConfig, options: &RunOptions) -> AppResult<StudyOutcome> {
    config.validate()?;
    let rates = config.parsed_rates()?;
    let params = build_parameters(config)?;

    let descriptor = descriptor_for(config);
    let run_id = compute_run_id(&descriptor, &options.solver_version);
    let store = RunStore::for_output_dir(&config.output_dir)?;

    let mut solve_options = options.solve.clone();
    solve_options.calc_soh = config.calc_soh;

    let (bundles, loaded_from_cache) = if options.use_cache && store.has_run(&run_id) {
        tracing::info!(run_id, "loading cached study run");
        let records = store.load_series(&run_id)?;
        (bundles_from_records(&records)?, true)
    } else {
        tracing::info!(
            run_id,
            variant = %config.sweep_variant.label(),
            rates = ?config.rates,
            "solving study"
        );
        let bundles = solve_study(config, &params, &rates, &solve_options)?;
        let manifest = RunManifest {
            run_id: run_id.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            solver_version: options.solver_version.clone(),
            descriptor,
        };
        let records: Vec<SeriesRecord> = bundles.iter().map(SeriesRecord::from_bundle).collect();
        store.save_run(&manifest, &records)?;
        (bundles, false)
    };

    let figure = assemble(&bundles, &DEFAULT_PALETTE);
    let figure_path = config.figure_path();
    if let Some(parent) = figure_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    render_png(&figure, &figure_path)?;

    Ok(StudyOutcome {
        run_id,
        variant: config.sweep_variant.label().to_string(),
        rate_labels: config.rates.clone(),
        loaded_from_cache,
        figure_path,
    })
}

/// Load the stored manifest for a run id.
pub fn load_run(config: &StudyConfig, run_id: &str) -> AppResult<RunManifest> {
    let store = RunStore::for_output_dir(&config.output_dir)?;
    store
        .load_manifest(run_id)
        .map_err(|_| AppError::RunNotFound(run_id.to_string()))
}

/// Stored series for a run id, in sweep order.
pub fn load_run_series(config: &StudyConfig, run_id: &str) -> AppResult<Vec<SeriesRecord>> {
    let store = RunStore::for_output_dir(&config.output_dir)?;
    store
        .load_series(run_id)
        .map_err(|_| AppError::RunNotFound(run_id.to_string()))
}

/// Manifests stored for the configured sweep variant.
pub fn list_runs(config: &StudyConfig) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_output_dir(&config.output_dir)?;
    Ok(store.list_runs(config.sweep_variant.label())?)
}
