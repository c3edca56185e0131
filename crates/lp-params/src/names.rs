//! Canonical parameter names.
//!
//! Names follow the "Quantity [unit]" convention used by battery parameter
//! databases so configs and exports read the same as the literature.

pub const AMBIENT_TEMPERATURE: &str = "Ambient temperature [K]";
pub const REFERENCE_TEMPERATURE: &str = "Reference temperature [K]";
pub const UPPER_VOLTAGE_CUTOFF: &str = "Upper voltage cut-off [V]";
pub const LOWER_VOLTAGE_CUTOFF: &str = "Lower voltage cut-off [V]";
pub const NOMINAL_CAPACITY: &str = "Nominal cell capacity [A.h]";
pub const INTERNAL_RESISTANCE: &str = "Internal resistance [Ohm]";

pub const FARADAY: &str = "Faraday constant [C.mol-1]";
pub const ELECTRODE_WIDTH: &str = "Electrode width [m]";
pub const ELECTRODE_HEIGHT: &str = "Electrode height [m]";
pub const NEGATIVE_THICKNESS: &str = "Negative electrode thickness [m]";
pub const NEGATIVE_MAX_CONCENTRATION: &str =
    "Maximum concentration in negative electrode [mol.m-3]";
pub const NEGATIVE_INITIAL_CONCENTRATION: &str =
    "Initial concentration in negative electrode [mol.m-3]";
pub const NEGATIVE_SURFACE_AREA_RATIO: &str =
    "Negative electrode surface area to volume ratio [m-1]";
pub const ELECTROLYTE_CONCENTRATION: &str = "Typical electrolyte concentration [mol.m-3]";

pub const PLATING_RATE_CONSTANT: &str = "Lithium plating kinetic rate constant [m.s-1]";
pub const PLATING_TRANSFER_COEFFICIENT: &str = "Lithium plating transfer coefficient";
pub const PLATING_ONSET_STOICHIOMETRY: &str = "Lithium plating onset stoichiometry";
pub const PLATING_ACTIVATION_ENERGY: &str = "Lithium plating activation energy [J.mol-1]";
pub const STRIPPING_TIME_CONSTANT: &str = "Lithium plating stripping time constant [s]";
pub const DEAD_LITHIUM_DECAY: &str = "Dead lithium decay constant [s-1]";
