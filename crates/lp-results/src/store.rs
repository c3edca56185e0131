//! Run storage API.

use crate::types::{RunManifest, SeriesRecord};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store rooted under `<output_dir>/runs`.
    pub fn for_output_dir(output_dir: &Path) -> ResultsResult<Self> {
        Self::new(output_dir.join("runs"))
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, records: &[SeriesRecord]) -> ResultsResult<()> {
        for record in records {
            let n = record.sample_count();
            let aligned = record.voltage_v.len() == n
                && record.deintercalation_a_m3.len() == n
                && record.stripping_a_m3.len() == n
                && record.total_a_m3.len() == n
                && record.plated_capacity_ah.len() == n
                && record.concentration_mol_m3.len() == n
                && record.intercalated_capacity_ah.len() == n;
            if !aligned {
                return Err(ResultsError::MalformedRecord {
                    rate: record.rate.clone(),
                });
            }
        }

        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_path = run_dir.join("manifest.json");
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(manifest_path, manifest_json)?;

        let series_path = run_dir.join("series.jsonl");
        let mut series_content = String::new();
        for record in records {
            let line = serde_json::to_string(record)?;
            series_content.push_str(&line);
            series_content.push('\n');
        }
        fs::write(series_path, series_content)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_series(&self, run_id: &str) -> ResultsResult<Vec<SeriesRecord>> {
        let series_path = self.run_dir(run_id).join("series.jsonl");

        if !series_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(series_path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                let record: SeriesRecord = serde_json::from_str(line)?;
                records.push(record);
            }
        }

        Ok(records)
    }

    /// All stored manifests for one plating variant.
    pub fn list_runs(&self, variant: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id)
                    && manifest.descriptor.variant == variant
                {
                    runs.push(manifest);
                }
            }
        }

        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
