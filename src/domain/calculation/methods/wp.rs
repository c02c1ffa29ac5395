//! WP - Weighted Product.

use serde::{Deserialize, Serialize};

use crate::domain::calculation::engine::{
    finish, record_decision_matrix, safe_ratio, weighted_headers, CalculationEngine,
};
use crate::domain::calculation::normalization::{column, column_max, vector};
use crate::domain::calculation::{
    CalculationResult, CalculationStep, DecisionProblem, Method, StepTrace,
};

/// How WP rescales raw values before exponentiation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WpNormalization {
    /// `x / max` per column.
    #[default]
    ColumnMax,
    /// `x / sqrt(Σ x²)` per column.
    Vector,
}

/// Product of normalized values raised to signed weights.
///
/// Cost criteria use the negated weight as exponent; a zero cost value is
/// raised from half the smallest positive value of its column. The vector `S`
/// is divided by its sum to give the preference value `V`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WpEngine {
    normalization: WpNormalization,
}

impl WpEngine {
    pub fn new(normalization: WpNormalization) -> Self {
        Self { normalization }
    }

    /// Stand-in for a zero value under a negative exponent: half the smallest
    /// positive value of the column, or 1 when the column has none.
    fn zero_floor(normalized: &[Vec<f64>], j: usize) -> f64 {
        column(normalized, j)
            .into_iter()
            .filter(|r| *r > 0.0)
            .fold(None, |min: Option<f64>, r| Some(min.map_or(r, |m| m.min(r))))
            .map_or(1.0, |min| min / 2.0)
    }

    /// `base^exponent`. A zero base under a negative exponent is raised from
    /// `floor` instead, so it stays the best value of its column.
    fn factor(base: f64, exponent: f64, floor: f64) -> f64 {
        if base == 0.0 && exponent < 0.0 {
            floor.powf(exponent)
        } else {
            base.powf(exponent)
        }
    }
}

impl CalculationEngine for WpEngine {
    fn method(&self) -> Method {
        Method::Wp
    }

    fn calculate(&self, problem: &DecisionProblem) -> CalculationResult {
        let mut trace = StepTrace::new();
        record_decision_matrix(&mut trace, problem);

        let (normalized, description) = match self.normalization {
            WpNormalization::ColumnMax => (
                column_max(&problem.matrix),
                "Every value divided by the maximum of its column",
            ),
            WpNormalization::Vector => (
                vector(&problem.matrix),
                "Every value divided by the Euclidean norm of its column",
            ),
        };
        trace.record(CalculationStep::new(
            "Normalized Matrix",
            description,
            normalized.clone(),
            problem.criteria.clone(),
            problem.alternatives.clone(),
        ));

        let exponents: Vec<f64> = (0..problem.criterion_count())
            .map(|j| {
                let w = problem.weight(j);
                if problem.criterion_type(j).is_cost() {
                    -w
                } else {
                    w
                }
            })
            .collect();
        let floors: Vec<f64> = (0..problem.criterion_count())
            .map(|j| Self::zero_floor(&normalized, j))
            .collect();

        let powered: Vec<Vec<f64>> = normalized
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(j, &r)| {
                        Self::factor(
                            r,
                            exponents.get(j).copied().unwrap_or(0.0),
                            floors.get(j).copied().unwrap_or(1.0),
                        )
                    })
                    .collect()
            })
            .collect();
        trace.record(CalculationStep::new(
            "Weighted Power Matrix",
            "Normalized values raised to their weight, negated for cost criteria",
            powered.clone(),
            weighted_headers(problem),
            problem.alternatives.clone(),
        ));

        let s_vector: Vec<f64> = powered.iter().map(|row| row.iter().product()).collect();
        let total: f64 = s_vector.iter().sum();
        let v_vector: Vec<f64> = s_vector.iter().map(|s| safe_ratio(*s, total)).collect();

        trace.record(CalculationStep::new(
            "Vector S and V",
            "S is the product of weighted powers; V is S divided by the sum of all S",
            s_vector
                .iter()
                .zip(&v_vector)
                .map(|(s, v)| vec![*s, *v])
                .collect(),
            vec!["S".to_string(), "V".to_string()],
            problem.alternatives.clone(),
        ));

        finish(Method::Wp, problem, trace, "Preference Value", &v_vector, None)
    }
}
