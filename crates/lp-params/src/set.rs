//! Parameter set construction and evaluation.

use crate::error::{ParamError, ParamResult};
use crate::expr::Expr;
use crate::preset::Preset;
use std::collections::BTreeMap;

/// Immutable mapping from parameter names to numeric values.
///
/// Built once from a preset plus overrides; sweeps only ever read it.
/// There is deliberately no mutating API on the finished set.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    preset: Preset,
    values: BTreeMap<String, f64>,
}

/// Builder applying overrides before the set is frozen.
#[derive(Debug)]
pub struct ParameterSetBuilder {
    preset: Preset,
    values: BTreeMap<String, f64>,
}

impl ParameterSet {
    /// Start building a set from a named preset.
    pub fn from_preset(preset: Preset) -> ParameterSetBuilder {
        let values = preset
            .table()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        ParameterSetBuilder { preset, values }
    }

    /// The preset this set was built from.
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Look up a single parameter value.
    pub fn get(&self, name: &str) -> ParamResult<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ParamError::UnknownParameter {
                name: name.to_string(),
            })
    }

    /// Evaluate a symbolic expression against this set.
    pub fn evaluate(&self, expr: &Expr) -> ParamResult<f64> {
        match expr {
            Expr::Const(v) => Ok(*v),
            Expr::Param(name) => self.get(name),
            Expr::Product(factors) => {
                let mut product = 1.0;
                for factor in factors {
                    product *= self.evaluate(factor)?;
                }
                Ok(product)
            }
        }
    }

    /// Iterate over all (name, value) entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

impl ParameterSetBuilder {
    /// Override an existing parameter. Unknown names are rejected so config
    /// typos cannot silently add dead entries.
    pub fn override_value(mut self, name: &str, value: f64) -> ParamResult<Self> {
        if !value.is_finite() {
            return Err(ParamError::NonFinite {
                name: name.to_string(),
                value,
            });
        }
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(self)
            }
            None => Err(ParamError::UnknownParameter {
                name: name.to_string(),
            }),
        }
    }

    /// Freeze the set. No further mutation is possible afterwards.
    pub fn build(self) -> ParameterSet {
        ParameterSet {
            preset: self.preset,
            values: self.values,
        }
    }
}
