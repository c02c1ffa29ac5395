//! Decision Problem - Alternatives, criteria, raw values, weights and orientations.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::ValidationError;

/// Allowed distance between the weight sum and 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Orientation of a criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CriterionType {
    /// Higher values are better.
    #[default]
    Benefit,
    /// Lower values are better.
    Cost,
}

impl CriterionType {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            CriterionType::Benefit => "Benefit",
            CriterionType::Cost => "Cost",
        }
    }

    /// Returns true for cost criteria.
    pub fn is_cost(&self) -> bool {
        matches!(self, CriterionType::Cost)
    }
}

/// A complete decision problem snapshot.
///
/// Row `i` of `matrix` holds the values of alternative `i`; column `j`
/// corresponds to criterion `j`. The engine trusts the structural invariants
/// and never re-validates them; callers run [`DecisionProblem::validate`]
/// before handing the snapshot over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionProblem {
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub weights: Vec<f64>,
    pub criteria_types: Vec<CriterionType>,
}

impl DecisionProblem {
    /// Creates a builder for constructing a decision problem.
    pub fn builder() -> DecisionProblemBuilder {
        DecisionProblemBuilder::new()
    }

    /// Returns the number of alternatives (`m`).
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns the number of criteria (`n`).
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Returns the orientation of criterion `j`, defaulting to benefit.
    pub fn criterion_type(&self, j: usize) -> CriterionType {
        self.criteria_types.get(j).copied().unwrap_or_default()
    }

    /// Returns the weight of criterion `j`, or 0 when missing.
    pub fn weight(&self, j: usize) -> f64 {
        self.weights.get(j).copied().unwrap_or(0.0)
    }

    /// Checks the structural invariants a calculation relies on.
    ///
    /// # Rules
    /// - At least one alternative and one criterion, names unique
    /// - Every row has one entry per criterion, values finite and >= 0
    /// - One weight and one orientation per criterion
    /// - Weights finite and > 0, summing to 1.0 within [`WEIGHT_SUM_TOLERANCE`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.alternatives.is_empty() {
            return Err(ValidationError::empty_field("alternatives"));
        }
        if self.criteria.is_empty() {
            return Err(ValidationError::empty_field("criteria"));
        }
        Self::check_names("alternatives", &self.alternatives)?;
        Self::check_names("criteria", &self.criteria)?;

        let n = self.criteria.len();
        if self.matrix.len() != self.alternatives.len() {
            return Err(ValidationError::dimension_mismatch(
                "matrix",
                self.alternatives.len(),
                self.matrix.len(),
            ));
        }
        for (i, row) in self.matrix.iter().enumerate() {
            if row.len() != n {
                return Err(ValidationError::dimension_mismatch(
                    format!("matrix[{}]", i),
                    n,
                    row.len(),
                ));
            }
            for (j, value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ValidationError::invalid_format(
                        format!("matrix[{}][{}]", i, j),
                        "value must be a finite number",
                    ));
                }
                if *value < 0.0 {
                    return Err(ValidationError::out_of_range(
                        format!("matrix[{}][{}]", i, j),
                        0.0,
                        f64::MAX,
                        *value,
                    ));
                }
            }
        }

        if self.weights.len() != n {
            return Err(ValidationError::dimension_mismatch("weights", n, self.weights.len()));
        }
        if self.criteria_types.len() != n {
            return Err(ValidationError::dimension_mismatch(
                "criteria_types",
                n,
                self.criteria_types.len(),
            ));
        }
        for (j, weight) in self.weights.iter().enumerate() {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(ValidationError::out_of_range(
                    format!("weights[{}]", j),
                    f64::MIN_POSITIVE,
                    1.0,
                    *weight,
                ));
            }
        }
        let sum: f64 = self.weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::out_of_range(
                "weights (sum)",
                1.0 - WEIGHT_SUM_TOLERANCE,
                1.0 + WEIGHT_SUM_TOLERANCE,
                sum,
            ));
        }

        Ok(())
    }

    fn check_names(field: &str, names: &[String]) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for name in names {
            if name.trim().is_empty() {
                return Err(ValidationError::empty_field(format!("{} (name)", field)));
            }
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::duplicate_name(field, name.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for constructing DecisionProblem instances.
#[derive(Debug, Default)]
pub struct DecisionProblemBuilder {
    alternatives: Vec<String>,
    criteria: Vec<String>,
    matrix: Vec<Vec<f64>>,
    weights: Vec<f64>,
    criteria_types: Vec<CriterionType>,
}

impl DecisionProblemBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alternatives.
    pub fn alternatives(mut self, names: Vec<impl Into<String>>) -> Self {
        self.alternatives = names.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Adds one criterion with its weight and orientation.
    pub fn criterion(mut self, name: impl Into<String>, weight: f64, kind: CriterionType) -> Self {
        self.criteria.push(name.into());
        self.weights.push(weight);
        self.criteria_types.push(kind);
        self
    }

    /// Appends one row of raw values.
    pub fn row(mut self, values: Vec<f64>) -> Self {
        self.matrix.push(values);
        self
    }

    /// Replaces the whole matrix.
    pub fn matrix(mut self, matrix: Vec<Vec<f64>>) -> Self {
        self.matrix = matrix;
        self
    }

    /// Builds the decision problem.
    pub fn build(self) -> DecisionProblem {
        DecisionProblem {
            alternatives: self.alternatives,
            criteria: self.criteria,
            matrix: self.matrix,
            weights: self.weights,
            criteria_types: self.criteria_types,
        }
    }
}
