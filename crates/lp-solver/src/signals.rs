//! Canonical signal names recorded into solution steps.
//!
//! Sign conventions: external current is positive while charging; interfacial
//! current densities follow the electrochemical convention (anodic positive),
//! so deintercalation and stripping are positive, intercalation and plating
//! negative.

pub const TIME_S: &str = "Time [s]";
pub const TIME_MIN: &str = "Time [min]";
pub const VOLTAGE: &str = "Voltage [V]";
pub const CURRENT: &str = "Current [A]";

pub const NEG_INTERFACIAL_CURRENT_DENSITY: &str =
    "X-averaged negative electrode volumetric interfacial current density [A.m-3]";
pub const PLATING_INTERFACIAL_CURRENT_DENSITY: &str =
    "X-averaged lithium plating volumetric interfacial current density [A.m-3]";
pub const TOTAL_INTERFACIAL_CURRENT_DENSITY: &str =
    "Sum of x-averaged negative electrode volumetric interfacial current densities [A.m-3]";

pub const PLATING_CAPACITY_LOSS: &str = "Loss of capacity to lithium plating [A.h]";
pub const NEG_AVG_CONCENTRATION: &str =
    "Negative electrode volume-averaged concentration [mol.m-3]";

// Recorded only when extended state-of-health post-processing is enabled.
pub const TOTAL_LITHIUM_CAPACITY: &str = "Total lithium capacity [A.h]";
pub const LITHIUM_INVENTORY_LOSS: &str = "Loss of lithium inventory [%]";
