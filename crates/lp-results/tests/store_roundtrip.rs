use std::collections::BTreeMap;
use std::path::PathBuf;

use lp_results::*;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("{}_{}", prefix, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn descriptor(variant: &str) -> StudyDescriptor {
    StudyDescriptor {
        preset: "okane2022".to_string(),
        overrides: BTreeMap::from([("Ambient temperature [K]".to_string(), 268.15)]),
        variant: variant.to_string(),
        rate_labels: vec!["2C".to_string(), "C/8".to_string()],
        calc_soh: false,
    }
}

fn manifest(run_id: &str, variant: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        timestamp: "2026-08-29T12:00:00Z".to_string(),
        solver_version: "v1".to_string(),
        descriptor: descriptor(variant),
    }
}

fn record(rate: &str, n: usize) -> SeriesRecord {
    SeriesRecord {
        rate: rate.to_string(),
        time_min: (0..n).map(|i| i as f64 * 0.5).collect(),
        voltage_v: vec![4.2; n],
        deintercalation_a_m3: vec![-1.0e4; n],
        stripping_a_m3: vec![2.0e3; n],
        total_a_m3: vec![0.0; n],
        plated_capacity_ah: vec![0.03; n],
        concentration_mol_m3: vec![3.1e4; n],
        intercalated_capacity_ah: vec![4.9; n],
    }
}

#[test]
fn save_and_load_run() {
    let dir = unique_temp_dir("lp_results_roundtrip");
    let store = RunStore::new(dir.clone()).unwrap();

    let manifest = manifest("run_abc", "reversible");
    let records = vec![record("2C", 4), record("C/8", 7)];
    store.save_run(&manifest, &records).unwrap();
    assert!(store.has_run("run_abc"));

    let loaded = store.load_manifest("run_abc").unwrap();
    assert_eq!(loaded.run_id, "run_abc");
    assert_eq!(loaded.descriptor, manifest.descriptor);

    let series = store.load_series("run_abc").unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].rate, "2C");
    assert_eq!(series[1].rate, "C/8");
    assert_eq!(series[1].sample_count(), 7);
    assert_eq!(series, records);
}

#[test]
fn missing_run_is_reported() {
    let dir = unique_temp_dir("lp_results_missing");
    let store = RunStore::new(dir).unwrap();

    assert!(!store.has_run("nope"));
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
    assert!(matches!(
        store.load_series("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn misaligned_record_is_rejected() {
    let dir = unique_temp_dir("lp_results_misaligned");
    let store = RunStore::new(dir).unwrap();

    let mut bad = record("1C", 5);
    bad.voltage_v.pop();
    let result = store.save_run(&manifest("run_bad", "reversible"), &[bad]);
    assert!(matches!(
        result,
        Err(ResultsError::MalformedRecord { rate }) if rate == "1C"
    ));
    assert!(!store.has_run("run_bad"));
}

#[test]
fn list_runs_filters_by_variant() {
    let dir = unique_temp_dir("lp_results_list");
    let store = RunStore::new(dir).unwrap();

    store
        .save_run(&manifest("run1", "reversible"), &[record("2C", 3)])
        .unwrap();
    store
        .save_run(&manifest("run2", "reversible"), &[record("1C", 3)])
        .unwrap();
    store
        .save_run(&manifest("run3", "irreversible"), &[record("2C", 3)])
        .unwrap();

    let mut ids: Vec<String> = store
        .list_runs("reversible")
        .unwrap()
        .into_iter()
        .map(|m| m.run_id)
        .collect();
    ids.sort();
    assert_eq!(ids, ["run1", "run2"]);

    store.delete_run("run1").unwrap();
    assert_eq!(store.list_runs("reversible").unwrap().len(), 1);
}
