//! Solution traces: cycles -> steps -> named signal series.

use crate::error::{SolverError, SolverResult};
use lp_model::CellState;
use std::collections::BTreeMap;

/// Time-indexed output of one phase instruction.
#[derive(Debug, Clone)]
pub struct StepSolution {
    description: String,
    signals: BTreeMap<String, Vec<f64>>,
}

impl StepSolution {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            signals: BTreeMap::new(),
        }
    }

    /// The phase instruction this step solved, as text.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn insert_signal(&mut self, name: impl Into<String>, samples: Vec<f64>) {
        self.signals.insert(name.into(), samples);
    }

    /// Look up a named signal. Absent names are an error, never a default:
    /// substituting a fallback series would silently corrupt comparisons.
    pub fn signal(&self, name: &str) -> SolverResult<&[f64]> {
        self.signals
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SolverError::MissingSignal {
                name: name.to_string(),
            })
    }

    pub fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.signals.keys().map(String::as_str)
    }

    /// Number of recorded samples (every signal in a step shares it).
    pub fn sample_count(&self) -> usize {
        self.signals.values().next().map_or(0, Vec::len)
    }
}

/// One protocol cycle: one step per phase instruction, in protocol order.
#[derive(Debug, Clone)]
pub struct Cycle {
    steps: Vec<StepSolution>,
}

impl Cycle {
    pub fn new(steps: Vec<StepSolution>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[StepSolution] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepSolution> {
        self.steps.get(index)
    }
}

/// Full output of solving one (model, parameters, protocol) triple.
///
/// Owned by the sweep that produced it and read-only afterwards. Carries the
/// end state so the next solve can be seeded from it.
#[derive(Debug, Clone)]
pub struct SolutionTrace {
    cycles: Vec<Cycle>,
    final_state: CellState,
}

impl SolutionTrace {
    pub fn new(cycles: Vec<Cycle>, final_state: CellState) -> Self {
        Self {
            cycles,
            final_state,
        }
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn cycle(&self, index: usize) -> Option<&Cycle> {
        self.cycles.get(index)
    }

    /// The internal state at the end of the last recorded sample.
    pub fn final_state(&self) -> &CellState {
        &self.final_state
    }
}
