//! Plating-behavior variants.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How deposited (plated) lithium can evolve after deposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatingVariant {
    /// Plated lithium strips fully back into the electrode at rest.
    Reversible,
    /// Plated lithium never strips; it decays into dead lithium.
    Irreversible,
    /// Stripping and dead-lithium decay compete.
    PartiallyReversible,
}

impl PlatingVariant {
    pub const ALL: [PlatingVariant; 3] = [
        PlatingVariant::Reversible,
        PlatingVariant::Irreversible,
        PlatingVariant::PartiallyReversible,
    ];

    /// Human-readable label, matching the parameter-database option names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Reversible => "reversible",
            Self::Irreversible => "irreversible",
            Self::PartiallyReversible => "partially reversible",
        }
    }

    /// Whether plated lithium strips back into the electrode at rest.
    pub fn strips(self) -> bool {
        matches!(self, Self::Reversible | Self::PartiallyReversible)
    }

    /// Whether plated lithium decays into electrically isolated dead lithium.
    pub fn decays_to_dead(self) -> bool {
        matches!(self, Self::Irreversible | Self::PartiallyReversible)
    }
}

impl fmt::Display for PlatingVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PlatingVariant {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reversible" => Ok(Self::Reversible),
            "irreversible" => Ok(Self::Irreversible),
            "partially reversible" | "partially-reversible" => Ok(Self::PartiallyReversible),
            other => Err(ModelError::UnknownVariant {
                label: other.to_string(),
            }),
        }
    }
}
