// lp-core/src/units.rs

use uom::si::f64::{ElectricPotential as UomElectricPotential, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Time = UomTime;
pub type Voltage = UomElectricPotential;

/// Volumetric interfacial current density [A.m-3].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type VolCurrentDensity = f64;

/// Volume-averaged lithium concentration [mol.m-3], carried as plain f64
/// because solution traces store it in bulk sample arrays.
pub type Concentration = f64;

/// Cell capacity [A.h]; kept as f64 for the same bulk-array reason.
pub type CapacityAh = f64;

#[inline]
pub fn volt(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn minutes(v: f64) -> Time {
    use uom::si::time::minute;
    Time::new::<minute>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn seconds_of(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

#[inline]
pub fn volts_of(v: Voltage) -> f64 {
    use uom::si::electric_potential::volt;
    v.get::<volt>()
}

pub mod constants {
    /// Seconds per hour, for A.s -> A.h conversions.
    pub const SECONDS_PER_HOUR: f64 = 3600.0;

    /// Universal gas constant [J.mol-1.K-1].
    pub const GAS_CONSTANT: f64 = 8.314_462_618;
}
