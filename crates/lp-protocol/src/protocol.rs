//! Protocol construction from static templates.

use crate::phase::{PhaseInstruction, PhaseSpec};
use lp_core::{CRate, hours, minutes, volt};
use std::collections::BTreeMap;

/// Named role of a phase inside a protocol.
///
/// Roles make the protocol-shape contract explicit: extraction code asks
/// for `FinalRest` instead of assuming "step 2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PhaseRole {
    ConstantCurrentDischarge,
    ConstantCurrentCharge,
    VoltageHold,
    FinalRest,
}

/// Charge target shared by the whole characterization family [V].
pub const CHARGE_TARGET_V: f64 = 4.2;
/// Discharge cutoff used by the conditioning protocol [V].
pub const DISCHARGE_CUTOFF_V: f64 = 2.5;
/// Conditioning discharge rate.
pub const CONDITIONING_RATE: &str = "C/20";
/// Hold terminates when the current decays to rate divided by this.
pub const HOLD_CUTOFF_DIVISOR: f64 = 20.0;

/// An immutable ordered list of phases, one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Protocol {
    phases: Vec<PhaseSpec>,
    roles: BTreeMap<PhaseRole, usize>,
}

impl Protocol {
    /// Two-phase discharge-then-rest conditioning protocol: discharge at
    /// C/20 until 2.5 V (10 minute reporting period), then rest for one
    /// hour (3 minute period).
    pub fn discharge_conditioning() -> Self {
        // Static literal, cannot fail to parse.
        let rate = CRate::parse(CONDITIONING_RATE).expect("conditioning rate literal");
        let phases = vec![
            PhaseSpec::new(PhaseInstruction::DischargeAtRate {
                rate,
                until: volt(DISCHARGE_CUTOFF_V),
            })
            .with_period(minutes(10.0)),
            PhaseSpec::new(PhaseInstruction::Rest {
                duration: hours(1.0),
            })
            .with_period(minutes(3.0)),
        ];
        let roles = BTreeMap::from([
            (PhaseRole::ConstantCurrentDischarge, 0),
            (PhaseRole::FinalRest, 1),
        ]);
        Self { phases, roles }
    }

    /// Three-phase charge-characterization protocol for one rate: charge
    /// until 4.2 V, hold 4.2 V until the current decays to rate/20, rest
    /// for one hour.
    pub fn charge_characterization(rate: &CRate) -> Self {
        let phases = vec![
            PhaseSpec::new(PhaseInstruction::ChargeAtRate {
                rate: rate.clone(),
                until: volt(CHARGE_TARGET_V),
            }),
            PhaseSpec::new(PhaseInstruction::HoldVoltage {
                at: volt(CHARGE_TARGET_V),
                until_rate: rate.fraction(HOLD_CUTOFF_DIVISOR),
            }),
            PhaseSpec::new(PhaseInstruction::Rest {
                duration: hours(1.0),
            }),
        ];
        let roles = BTreeMap::from([
            (PhaseRole::ConstantCurrentCharge, 0),
            (PhaseRole::VoltageHold, 1),
            (PhaseRole::FinalRest, 2),
        ]);
        Self { phases, roles }
    }

    pub fn phases(&self) -> &[PhaseSpec] {
        &self.phases
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Position of the phase with the given role, if the protocol has one.
    pub fn phase_index(&self, role: PhaseRole) -> Option<usize> {
        self.roles.get(&role).copied()
    }
}
