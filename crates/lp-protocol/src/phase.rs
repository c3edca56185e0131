//! Phase instructions: single operating conditions with termination rules.

use lp_core::{CRate, Time, Voltage, seconds_of, volts_of};
use std::fmt;

/// One operating condition with its termination condition.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseInstruction {
    /// Constant-current discharge until the voltage falls to `until`.
    DischargeAtRate { rate: CRate, until: Voltage },
    /// Constant-current charge until the voltage rises to `until`.
    ChargeAtRate { rate: CRate, until: Voltage },
    /// Constant-voltage hold until the current decays to `until_rate`.
    HoldVoltage { at: Voltage, until_rate: CRate },
    /// Zero-current rest for a fixed duration.
    Rest { duration: Time },
}

/// A phase instruction plus an optional reporting-interval hint.
///
/// The hint controls how densely the solver records samples for this phase;
/// phases without one use the solver's default interval.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSpec {
    pub instruction: PhaseInstruction,
    pub period: Option<Time>,
}

impl PhaseSpec {
    pub fn new(instruction: PhaseInstruction) -> Self {
        Self {
            instruction,
            period: None,
        }
    }

    pub fn with_period(mut self, period: Time) -> Self {
        self.period = Some(period);
        self
    }
}

impl fmt::Display for PhaseInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DischargeAtRate { rate, until } => {
                write!(f, "Discharge at {} until {} V", rate, volts_of(*until))
            }
            Self::ChargeAtRate { rate, until } => {
                write!(f, "Charge at {} until {} V", rate, volts_of(*until))
            }
            Self::HoldVoltage { at, until_rate } => {
                write!(f, "Hold at {} V until {}", volts_of(*at), until_rate)
            }
            Self::Rest { duration } => {
                let mins = seconds_of(*duration) / 60.0;
                write!(f, "Rest for {mins} minutes")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{hours, minutes, volt};

    #[test]
    fn instructions_render_like_experiment_strings() {
        let charge = PhaseInstruction::ChargeAtRate {
            rate: CRate::parse("1C").unwrap(),
            until: volt(4.2),
        };
        assert_eq!(format!("{charge}"), "Charge at 1C until 4.2 V");

        let hold = PhaseInstruction::HoldVoltage {
            at: volt(4.2),
            until_rate: CRate::parse("C/20").unwrap(),
        };
        assert_eq!(format!("{hold}"), "Hold at 4.2 V until C/20");

        let rest = PhaseInstruction::Rest {
            duration: hours(1.0),
        };
        assert_eq!(format!("{rest}"), "Rest for 60 minutes");
    }

    #[test]
    fn period_hint_is_optional() {
        let spec = PhaseSpec::new(PhaseInstruction::Rest {
            duration: hours(1.0),
        });
        assert!(spec.period.is_none());
        let spec = spec.with_period(minutes(3.0));
        assert!((seconds_of(spec.period.unwrap()) - 180.0).abs() < 1e-9);
    }
}
