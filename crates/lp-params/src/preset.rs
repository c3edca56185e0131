//! Named parameter presets.

use crate::names;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named, versioned parameter table for a specific cell build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Reduced-order table for an LG M50 21700 cell with plating-side
    /// reaction constants from the low-temperature plating literature.
    Okane2022,
}

impl Preset {
    /// The full parameter table for this preset.
    ///
    /// Geometry and concentration entries are the published LG M50 values;
    /// the plating-kinetics entries parameterize the reduced-order side
    /// reaction in lp-solver.
    pub fn table(self) -> Vec<(&'static str, f64)> {
        match self {
            Preset::Okane2022 => vec![
                (names::AMBIENT_TEMPERATURE, 298.15),
                (names::REFERENCE_TEMPERATURE, 298.15),
                (names::UPPER_VOLTAGE_CUTOFF, 4.2),
                (names::LOWER_VOLTAGE_CUTOFF, 2.5),
                (names::NOMINAL_CAPACITY, 5.0),
                (names::INTERNAL_RESISTANCE, 0.015),
                (names::FARADAY, 96_485.332_12),
                (names::ELECTRODE_WIDTH, 1.58),
                (names::ELECTRODE_HEIGHT, 0.065),
                (names::NEGATIVE_THICKNESS, 8.52e-5),
                (names::NEGATIVE_MAX_CONCENTRATION, 33_133.0),
                (names::NEGATIVE_INITIAL_CONCENTRATION, 29_820.0),
                (names::NEGATIVE_SURFACE_AREA_RATIO, 383_959.0),
                (names::ELECTROLYTE_CONCENTRATION, 1000.0),
                (names::PLATING_RATE_CONSTANT, 1e-9),
                (names::PLATING_TRANSFER_COEFFICIENT, 0.65),
                (names::PLATING_ONSET_STOICHIOMETRY, 0.8),
                (names::PLATING_ACTIVATION_ENERGY, 35_000.0),
                (names::STRIPPING_TIME_CONSTANT, 600.0),
                (names::DEAD_LITHIUM_DECAY, 1e-6),
            ],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Okane2022 => write!(f, "okane2022"),
        }
    }
}

impl FromStr for Preset {
    type Err = crate::ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "okane2022" => Ok(Preset::Okane2022),
            _ => Err(crate::ParamError::UnknownPreset {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_no_duplicate_names() {
        let table = Preset::Okane2022.table();
        let mut names: Vec<_> = table.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), table.len());
    }

    #[test]
    fn table_values_are_finite() {
        for (name, value) in Preset::Okane2022.table() {
            assert!(value.is_finite(), "{name} is not finite");
        }
    }

    #[test]
    fn preset_round_trips_through_str() {
        let preset: Preset = "okane2022".parse().unwrap();
        assert_eq!(preset, Preset::Okane2022);
        assert!("unknown".parse::<Preset>().is_err());
    }
}
