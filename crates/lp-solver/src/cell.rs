//! Reduced-order lumped-cell properties.
//!
//! The reference solver collapses the cell to a volume-averaged negative
//! electrode with an open-circuit-voltage curve, an ohmic resistance, and a
//! plating side reaction whose rate grows with charge rate, stoichiometry
//! above an onset, and Arrhenius temperature dependence.

use crate::error::SolverResult;
use lp_core::units::constants::GAS_CONSTANT;
use lp_params::{ParameterSet, names};

// Open-circuit voltage curve U(s) = OFFSET + SLOPE*s + KNEE*exp(SHARP*(s-1)).
const OCV_OFFSET_V: f64 = 2.4;
const OCV_SLOPE_V: f64 = 1.6;
const OCV_KNEE_V: f64 = 0.3;
const OCV_KNEE_SHARPNESS: f64 = 10.0;

// Plating never takes more than half the applied current.
const MAX_PLATING_FRACTION: f64 = 0.5;

/// Numeric cell properties evaluated once per solve from the parameter set.
#[derive(Debug, Clone)]
pub struct CellProperties {
    pub capacity_ah: f64,
    pub resistance_ohm: f64,
    pub faraday: f64,
    pub electrode_area_m2: f64,
    pub neg_thickness_m: f64,
    pub c_max: f64,
    pub upper_cutoff_v: f64,
    pub lower_cutoff_v: f64,
    /// Plating exchange current at 1C [A], from the kinetic rate constant,
    /// electrolyte concentration, and surface-area-to-volume ratio.
    pub plating_exchange_current_a: f64,
    pub plating_onset_sth: f64,
    /// Shape exponent 1/alpha for the stoichiometry dependence.
    pub plating_shape_exponent: f64,
    /// Arrhenius acceleration at the ambient temperature (>1 when cold).
    pub arrhenius_factor: f64,
    pub stripping_time_constant_s: f64,
    pub dead_decay_per_s: f64,
}

impl CellProperties {
    pub fn from_parameters(params: &ParameterSet) -> SolverResult<Self> {
        let faraday = params.get(names::FARADAY)?;
        let electrode_area_m2 =
            params.get(names::ELECTRODE_WIDTH)? * params.get(names::ELECTRODE_HEIGHT)?;
        let neg_thickness_m = params.get(names::NEGATIVE_THICKNESS)?;
        let neg_volume = electrode_area_m2 * neg_thickness_m;

        let t_amb = params.get(names::AMBIENT_TEMPERATURE)?;
        let t_ref = params.get(names::REFERENCE_TEMPERATURE)?;
        let e_act = params.get(names::PLATING_ACTIVATION_ENERGY)?;
        let arrhenius_factor = (e_act / GAS_CONSTANT * (1.0 / t_amb - 1.0 / t_ref)).exp();

        let plating_exchange_current_a = params.get(names::PLATING_RATE_CONSTANT)?
            * faraday
            * params.get(names::ELECTROLYTE_CONCENTRATION)?
            * params.get(names::NEGATIVE_SURFACE_AREA_RATIO)?
            * neg_volume;

        Ok(Self {
            capacity_ah: params.get(names::NOMINAL_CAPACITY)?,
            resistance_ohm: params.get(names::INTERNAL_RESISTANCE)?,
            faraday,
            electrode_area_m2,
            neg_thickness_m,
            c_max: params.get(names::NEGATIVE_MAX_CONCENTRATION)?,
            upper_cutoff_v: params.get(names::UPPER_VOLTAGE_CUTOFF)?,
            lower_cutoff_v: params.get(names::LOWER_VOLTAGE_CUTOFF)?,
            plating_exchange_current_a,
            plating_onset_sth: params.get(names::PLATING_ONSET_STOICHIOMETRY)?,
            plating_shape_exponent: 1.0 / params.get(names::PLATING_TRANSFER_COEFFICIENT)?,
            arrhenius_factor,
            stripping_time_constant_s: params.get(names::STRIPPING_TIME_CONSTANT)?,
            dead_decay_per_s: params.get(names::DEAD_LITHIUM_DECAY)?,
        })
    }

    /// Negative-electrode volume [m3].
    pub fn neg_volume_m3(&self) -> f64 {
        self.electrode_area_m2 * self.neg_thickness_m
    }

    /// Stoichiometry of the negative electrode at a given concentration.
    pub fn stoichiometry(&self, neg_concentration: f64) -> f64 {
        (neg_concentration / self.c_max).clamp(0.0, 1.0)
    }

    /// Open-circuit voltage at a given stoichiometry [V]. Strictly
    /// increasing on [0, 1].
    pub fn ocv(&self, sth: f64) -> f64 {
        OCV_OFFSET_V
            + OCV_SLOPE_V * sth
            + OCV_KNEE_V * (OCV_KNEE_SHARPNESS * (sth - 1.0)).exp()
    }

    /// Plating current diverted from an applied charge current [A].
    ///
    /// Zero below the onset stoichiometry; grows with the shape power of
    /// the excess, with the square of the instantaneous C-rate (so the
    /// diverted fraction of the applied current rises with rate), and with
    /// the Arrhenius factor. Capped at half the applied current.
    pub fn plating_current_a(&self, sth: f64, applied_a: f64) -> f64 {
        if applied_a <= 0.0 {
            return 0.0;
        }
        let excess = (sth - self.plating_onset_sth) / (1.0 - self.plating_onset_sth);
        let shape = excess.clamp(0.0, 1.0).powf(self.plating_shape_exponent);
        let rate_now = applied_a / self.capacity_ah;
        (self.plating_exchange_current_a * shape * self.arrhenius_factor * rate_now * rate_now)
            .min(MAX_PLATING_FRACTION * applied_a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_params::Preset;

    fn props() -> CellProperties {
        let params = ParameterSet::from_preset(Preset::Okane2022).build();
        CellProperties::from_parameters(&params).unwrap()
    }

    #[test]
    fn ocv_is_strictly_increasing() {
        let p = props();
        let mut last = f64::NEG_INFINITY;
        for i in 0..=100 {
            let v = p.ocv(i as f64 / 100.0);
            assert!(v > last);
            last = v;
        }
    }

    #[test]
    fn no_plating_below_onset() {
        let p = props();
        assert_eq!(p.plating_current_a(0.5, 10.0), 0.0);
        assert!(p.plating_current_a(0.9, 10.0) > 0.0);
    }

    #[test]
    fn plating_never_exceeds_half_the_applied_current() {
        let p = props();
        for applied in [0.1, 1.0, 10.0, 100.0] {
            assert!(p.plating_current_a(1.0, applied) <= 0.5 * applied + 1e-12);
        }
    }

    #[test]
    fn cold_cell_plates_faster() {
        let params = ParameterSet::from_preset(Preset::Okane2022)
            .override_value(lp_params::names::AMBIENT_TEMPERATURE, 268.15)
            .unwrap()
            .build();
        let cold = CellProperties::from_parameters(&params).unwrap();
        let warm = props();
        assert!(cold.arrhenius_factor > warm.arrhenius_factor);
        assert!(cold.plating_current_a(0.9, 10.0) > warm.plating_current_a(0.9, 10.0));
    }

    #[test]
    fn plated_fraction_of_applied_current_rises_with_rate() {
        let p = props();
        let slow = p.plating_current_a(0.95, 0.625) / 0.625;
        let fast = p.plating_current_a(0.95, 10.0) / 10.0;
        assert!(fast > slow);
    }

    #[test]
    fn no_plating_during_discharge_or_rest() {
        let p = props();
        assert_eq!(p.plating_current_a(0.95, 0.0), 0.0);
        assert_eq!(p.plating_current_a(0.95, -5.0), 0.0);
    }
}
