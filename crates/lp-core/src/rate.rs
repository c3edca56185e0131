//! C-rate value type and label parsing.
//!
//! A C-rate is a charge/discharge rate normalized by nominal capacity:
//! "1C" fully charges in one hour, "C/2" in two hours, "2C" in half an hour.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// A parsed C-rate, keeping the label it was written with.
///
/// The label is preserved because it keys sweep results, legends, and
/// exported series downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct CRate {
    label: String,
    per_hour: f64,
}

impl CRate {
    /// Parse a rate label of the form "2C", "1C", "C/2", or bare "C".
    pub fn parse(label: &str) -> CoreResult<Self> {
        let trimmed = label.trim();
        let per_hour = Self::parse_value(trimmed).ok_or_else(|| CoreError::BadRateLabel {
            label: label.to_string(),
        })?;
        if !per_hour.is_finite() || per_hour <= 0.0 {
            return Err(CoreError::BadRateLabel {
                label: label.to_string(),
            });
        }
        Ok(Self {
            label: trimmed.to_string(),
            per_hour,
        })
    }

    fn parse_value(s: &str) -> Option<f64> {
        if s == "C" {
            return Some(1.0);
        }
        if let Some(denom) = s.strip_prefix("C/") {
            return denom.parse::<f64>().ok().map(|d| 1.0 / d);
        }
        if let Some(mult) = s.strip_suffix('C') {
            return mult.parse::<f64>().ok();
        }
        None
    }

    /// The rate in inverse hours (1C == 1.0 h^-1).
    pub fn per_hour(&self) -> f64 {
        self.per_hour
    }

    /// The label as written ("C/2", "2C", ...).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current this rate corresponds to for a cell of the given capacity.
    pub fn current_a(&self, capacity_ah: f64) -> f64 {
        self.per_hour * capacity_ah
    }

    /// This rate divided by a positive factor, with a canonical label.
    ///
    /// Used for hold-phase current cutoffs ("until the current decays to
    /// rate/20"). The divisor must be positive; a `CRate` always carries a
    /// positive finite rate, so the result does too.
    pub fn fraction(&self, divisor: f64) -> Self {
        debug_assert!(divisor > 0.0 && divisor.is_finite());
        let per_hour = self.per_hour / divisor;
        Self {
            label: Self::canonical_label(per_hour),
            per_hour,
        }
    }

    fn canonical_label(per_hour: f64) -> String {
        if per_hour >= 1.0 {
            format!("{}C", trim_float(per_hour))
        } else {
            format!("C/{}", trim_float(1.0 / per_hour))
        }
    }
}

fn trim_float(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v}")
    }
}

impl fmt::Display for CRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_forms() {
        assert_eq!(CRate::parse("2C").unwrap().per_hour(), 2.0);
        assert_eq!(CRate::parse("1C").unwrap().per_hour(), 1.0);
        assert_eq!(CRate::parse("C").unwrap().per_hour(), 1.0);
        assert_eq!(CRate::parse("C/2").unwrap().per_hour(), 0.5);
        assert_eq!(CRate::parse("C/20").unwrap().per_hour(), 0.05);
        assert_eq!(CRate::parse("0.5C").unwrap().per_hour(), 0.5);
    }

    #[test]
    fn keeps_label_verbatim() {
        let rate = CRate::parse("C/8").unwrap();
        assert_eq!(rate.label(), "C/8");
        assert_eq!(format!("{rate}"), "C/8");
    }

    #[test]
    fn rejects_malformed_labels() {
        for bad in ["", "C/", "C/0", "-1C", "fast", "2"] {
            assert!(CRate::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn fraction_produces_canonical_labels() {
        assert_eq!(CRate::parse("2C").unwrap().fraction(20.0).label(), "C/10");
        assert_eq!(CRate::parse("1C").unwrap().fraction(20.0).label(), "C/20");
        assert_eq!(CRate::parse("C/2").unwrap().fraction(20.0).label(), "C/40");
        assert_eq!(CRate::parse("C/4").unwrap().fraction(0.25).label(), "1C");
    }

    #[test]
    fn current_scales_with_capacity() {
        let rate = CRate::parse("C/4").unwrap();
        assert!((rate.current_a(5.0) - 1.25).abs() < 1e-12);
    }
}
