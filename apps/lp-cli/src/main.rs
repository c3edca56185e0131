use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use lp_app::{AppError, AppResult, RunOptions, StudyConfig, study};
use lp_results::SeriesRecord;

#[derive(Parser)]
#[command(name = "lp-cli")]
#[command(about = "liplate CLI - Lithium-plating charge-rate study tool", long_about = None)]
struct Cli {
    /// Path to a study config YAML file (defaults to the built-in study)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default study config to a YAML file
    Init {
        /// Output path for the config file
        path: PathBuf,
    },
    /// Validate a study config
    Validate,
    /// Run the study (conditioning, sweep, extraction, figure)
    Run {
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for the configured sweep variant
    Runs,
    /// Show details of a cached run
    ShowRun {
        /// Run ID to display
        run_id: String,
    },
    /// Export one extracted signal series as CSV
    ExportSeries {
        /// Run ID
        run_id: String,
        /// Rate label (e.g. 2C, C/8)
        rate: String,
        /// Signal name (voltage, electrode-current, plating-current,
        /// total-current, plating-loss, concentration, capacity)
        signal: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate => cmd_validate(&config),
        Commands::Run { no_cache } => cmd_run(&config, !no_cache),
        Commands::Runs => cmd_runs(&config),
        Commands::ShowRun { run_id } => cmd_show_run(&config, &run_id),
        Commands::ExportSeries {
            run_id,
            rate,
            signal,
            output,
        } => cmd_export_series(&config, &run_id, &rate, &signal, output.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> AppResult<StudyConfig> {
    match path {
        Some(path) => StudyConfig::load_yaml(path),
        None => Ok(StudyConfig::default()),
    }
}

fn cmd_init(path: &Path) -> AppResult<()> {
    let config = StudyConfig::default();
    config.save_yaml(path)?;
    println!("✓ Wrote default study config to {}", path.display());
    Ok(())
}

fn cmd_validate(config: &StudyConfig) -> AppResult<()> {
    config.validate()?;
    println!("✓ Config is valid");
    println!("  Preset:   {}", config.preset);
    println!(
        "  Variants: {}",
        config
            .variants
            .iter()
            .map(|v| v.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Sweep:    {}", config.sweep_variant.label());
    println!("  Rates:    {}", config.rates.join(", "));
    for (name, value) in &config.overrides {
        println!("  Override: {name} = {value}");
    }
    Ok(())
}

fn cmd_run(config: &StudyConfig, use_cache: bool) -> AppResult<()> {
    println!(
        "Running charge-rate study for variant: {}",
        config.sweep_variant.label()
    );

    let started = Instant::now();
    let options = RunOptions {
        use_cache,
        ..RunOptions::default()
    };
    let outcome = study::run_study(config, &options)?;

    if outcome.loaded_from_cache {
        println!("✓ Loaded from cache: {}", outcome.run_id);
    } else {
        println!("✓ Study completed: {}", outcome.run_id);
    }
    println!("  Elapsed: {:.2} s", started.elapsed().as_secs_f64());
    println!("  Figure:  {}", outcome.figure_path.display());

    let records = study::load_run_series(config, &outcome.run_id)?;
    for record in &records {
        println!("  {}: {} samples", record.rate, record.sample_count());
    }

    Ok(())
}

fn cmd_runs(config: &StudyConfig) -> AppResult<()> {
    let mut runs = study::list_runs(config)?;
    runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    if runs.is_empty() {
        println!(
            "No cached runs for variant '{}'",
            config.sweep_variant.label()
        );
    } else {
        println!("Cached runs for variant '{}':", config.sweep_variant.label());
        for run in runs {
            println!(
                "  {}  {}  rates=[{}]",
                run.run_id,
                run.timestamp,
                run.descriptor.rate_labels.join(", ")
            );
        }
    }
    Ok(())
}

fn cmd_show_run(config: &StudyConfig, run_id: &str) -> AppResult<()> {
    let manifest = study::load_run(config, run_id)?;
    println!("Run {}", manifest.run_id);
    println!("  Timestamp: {}", manifest.timestamp);
    println!("  Solver:    {}", manifest.solver_version);
    println!("  Preset:    {}", manifest.descriptor.preset);
    println!("  Variant:   {}", manifest.descriptor.variant);
    println!("  Rates:     {}", manifest.descriptor.rate_labels.join(", "));
    println!("  SOH:       {}", manifest.descriptor.calc_soh);
    for (name, value) in &manifest.descriptor.overrides {
        println!("  Override:  {name} = {value}");
    }

    let records = study::load_run_series(config, run_id)?;
    for record in &records {
        println!("  {}: {} samples", record.rate, record.sample_count());
    }
    Ok(())
}

fn cmd_export_series(
    config: &StudyConfig,
    run_id: &str,
    rate: &str,
    signal: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let records = study::load_run_series(config, run_id)?;
    let record = records
        .iter()
        .find(|r| r.rate == rate)
        .ok_or_else(|| AppError::InvalidInput(format!("no series for rate '{rate}'")))?;

    let (header, values) = select_signal(record, signal)?;

    let mut csv = String::from("time_min,");
    csv.push_str(header);
    csv.push('\n');
    for (t, v) in record.time_min.iter().zip(values) {
        csv.push_str(&format!("{t},{v}\n"));
    }

    match output {
        Some(path) => {
            std::fs::write(path, csv)?;
            println!("✓ Exported {signal} for {rate} to {}", path.display());
        }
        None => {
            io::stdout().write_all(csv.as_bytes())?;
        }
    }
    Ok(())
}

fn select_signal<'a>(
    record: &'a SeriesRecord,
    signal: &str,
) -> AppResult<(&'static str, &'a [f64])> {
    let selected = match signal {
        "voltage" => ("voltage_v", record.voltage_v.as_slice()),
        "electrode-current" => (
            "deintercalation_a_m3",
            record.deintercalation_a_m3.as_slice(),
        ),
        "plating-current" => ("stripping_a_m3", record.stripping_a_m3.as_slice()),
        "total-current" => ("total_a_m3", record.total_a_m3.as_slice()),
        "plating-loss" => ("plated_capacity_ah", record.plated_capacity_ah.as_slice()),
        "concentration" => (
            "concentration_mol_m3",
            record.concentration_mol_m3.as_slice(),
        ),
        "capacity" => (
            "intercalated_capacity_ah",
            record.intercalated_capacity_ah.as_slice(),
        ),
        other => {
            return Err(AppError::InvalidInput(format!(
                "unknown signal '{other}'"
            )));
        }
    };
    Ok(selected)
}
