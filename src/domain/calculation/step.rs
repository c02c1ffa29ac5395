//! Calculation steps and the append-only trace that collects them.

use serde::{Deserialize, Serialize};

/// One named matrix snapshot in a calculation's derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    pub name: String,
    pub description: String,
    pub matrix: Vec<Vec<f64>>,
    pub column_headers: Vec<String>,
    pub row_headers: Vec<String>,
}

impl CalculationStep {
    /// Creates a step from a full matrix snapshot.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        matrix: Vec<Vec<f64>>,
        column_headers: Vec<String>,
        row_headers: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            matrix,
            column_headers,
            row_headers,
        }
    }

    /// Creates a single-column step, one row per header.
    pub fn column(
        name: impl Into<String>,
        description: impl Into<String>,
        column_header: impl Into<String>,
        values: &[f64],
        row_headers: Vec<String>,
    ) -> Self {
        Self::new(
            name,
            description,
            values.iter().map(|v| vec![*v]).collect(),
            vec![column_header.into()],
            row_headers,
        )
    }

    /// Returns (rows, columns) of the snapshot.
    pub fn dimensions(&self) -> (usize, usize) {
        let cols = self.matrix.first().map(|r| r.len()).unwrap_or(0);
        (self.matrix.len(), cols)
    }
}

/// Ordered record of the steps produced during one calculation.
///
/// Steps can only be appended; the trace is consumed when the result is built.
#[derive(Debug, Default)]
pub struct StepTrace {
    steps: Vec<CalculationStep>,
}

impl StepTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn record(&mut self, step: CalculationStep) {
        self.steps.push(step);
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consumes the trace, yielding the steps in recording order.
    pub fn into_steps(self) -> Vec<CalculationStep> {
        self.steps
    }
}
