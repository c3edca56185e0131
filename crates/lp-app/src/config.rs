//! YAML-backed study configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lp_core::CRate;
use lp_model::PlatingVariant;
use lp_params::names;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Full description of one charge-rate study. Defaults reproduce the cold
/// fast-charge comparison: OKane 2022 parameters at 268.15 K with a relaxed
/// 4.21 V cut-off, all three plating variants conditioned, and the sweep run
/// on the reversible variant over five rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    pub preset: String,
    pub overrides: BTreeMap<String, f64>,
    pub variants: Vec<PlatingVariant>,
    pub sweep_variant: PlatingVariant,
    pub rates: Vec<String>,
    pub calc_soh: bool,
    pub output_dir: PathBuf,
    pub figure_file: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            preset: "okane2022".to_string(),
            overrides: BTreeMap::from([
                (names::AMBIENT_TEMPERATURE.to_string(), 268.15),
                (names::UPPER_VOLTAGE_CUTOFF.to_string(), 4.21),
                (names::PLATING_TRANSFER_COEFFICIENT.to_string(), 0.5),
                (names::DEAD_LITHIUM_DECAY.to_string(), 1e-4),
            ]),
            variants: PlatingVariant::ALL.to_vec(),
            sweep_variant: PlatingVariant::Reversible,
            rates: ["2C", "1C", "C/2", "C/4", "C/8"]
                .map(String::from)
                .to_vec(),
            calc_soh: false,
            output_dir: PathBuf::from("output"),
            figure_file: "rate_comparison.png".to_string(),
        }
    }
}

impl StudyConfig {
    pub fn load_yaml(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StudyConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_yaml(&self, path: &Path) -> AppResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.rates.is_empty() {
            return Err(AppError::Config("rate list is empty".to_string()));
        }
        self.parsed_rates()?;
        if self.variants.is_empty() {
            return Err(AppError::Config("variant list is empty".to_string()));
        }
        if !self.variants.contains(&self.sweep_variant) {
            return Err(AppError::Config(format!(
                "sweep variant '{}' is not in the conditioned variant list",
                self.sweep_variant.label()
            )));
        }
        if self.figure_file.is_empty() {
            return Err(AppError::Config("figure file name is empty".to_string()));
        }
        Ok(())
    }

    pub fn parsed_rates(&self) -> AppResult<Vec<CRate>> {
        self.rates
            .iter()
            .map(|label| CRate::parse(label).map_err(AppError::from))
            .collect()
    }

    pub fn figure_path(&self) -> PathBuf {
        self.output_dir.join(&self.figure_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_reference_study() {
        let config = StudyConfig::default();
        config.validate().unwrap();
        assert_eq!(config.preset, "okane2022");
        assert_eq!(config.overrides[names::AMBIENT_TEMPERATURE], 268.15);
        assert_eq!(config.overrides[names::UPPER_VOLTAGE_CUTOFF], 4.21);
        assert_eq!(config.variants.len(), 3);
        assert_eq!(config.sweep_variant, PlatingVariant::Reversible);
        assert_eq!(config.rates, ["2C", "1C", "C/2", "C/4", "C/8"]);
        assert!(!config.calc_soh);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: StudyConfig = serde_yaml::from_str(
            "rates: [\"1C\"]\nsweep_variant: irreversible\n",
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.rates, ["1C"]);
        assert_eq!(config.sweep_variant, PlatingVariant::Irreversible);
        assert_eq!(config.preset, "okane2022");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<StudyConfig, _> = serde_yaml::from_str("ratez: [\"1C\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn bad_rate_label_fails_validation() {
        let mut config = StudyConfig::default();
        config.rates.push("fast".to_string());
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn sweep_variant_must_be_conditioned() {
        let mut config = StudyConfig::default();
        config.variants = vec![PlatingVariant::Irreversible];
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn yaml_roundtrip_preserves_config() {
        let config = StudyConfig::default();
        let text = serde_yaml::to_string(&config).unwrap();
        let back: StudyConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
