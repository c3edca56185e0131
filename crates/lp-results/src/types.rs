//! Stored result data types.

use std::collections::BTreeMap;

use lp_sweep::RateBundle;
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Everything that determines a study's numerical output. Two runs with
/// equal descriptors and solver versions produce the same signals, so the
/// descriptor is what gets hashed into the run id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyDescriptor {
    pub preset: String,
    pub overrides: BTreeMap<String, f64>,
    pub variant: String,
    pub rate_labels: Vec<String>,
    pub calc_soh: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub timestamp: String,
    pub solver_version: String,
    pub descriptor: StudyDescriptor,
}

/// One extracted signal bundle, flattened for JSONL storage. One record
/// per rate, in sweep order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub rate: String,
    pub time_min: Vec<f64>,
    pub voltage_v: Vec<f64>,
    pub deintercalation_a_m3: Vec<f64>,
    pub stripping_a_m3: Vec<f64>,
    pub total_a_m3: Vec<f64>,
    pub plated_capacity_ah: Vec<f64>,
    pub concentration_mol_m3: Vec<f64>,
    pub intercalated_capacity_ah: Vec<f64>,
}

impl SeriesRecord {
    pub fn from_bundle(entry: &RateBundle) -> Self {
        let bundle = &entry.bundle;
        Self {
            rate: entry.rate.label().to_string(),
            time_min: bundle.time_min.clone(),
            voltage_v: bundle.voltage_v.clone(),
            deintercalation_a_m3: bundle.deintercalation_a_m3.clone(),
            stripping_a_m3: bundle.stripping_a_m3.clone(),
            total_a_m3: bundle.total_a_m3.clone(),
            plated_capacity_ah: bundle.plated_capacity_ah.clone(),
            concentration_mol_m3: bundle.concentration_mol_m3.clone(),
            intercalated_capacity_ah: bundle.intercalated_capacity_ah.clone(),
        }
    }

    pub fn sample_count(&self) -> usize {
        self.time_min.len()
    }
}
