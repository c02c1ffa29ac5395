//! PROMETHEE - Preference Ranking Organization Method for Enrichment Evaluation (PROMETHEE II).

use serde::{Deserialize, Serialize};

use crate::domain::calculation::engine::{finish, record_decision_matrix, CalculationEngine};
use crate::domain::calculation::normalization::min_max;
use crate::domain::calculation::{
    CalculationError, CalculationResult, CalculationStep, DecisionProblem, Method, StepTrace,
};

/// Preference function turning a normalized difference into a degree in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreferenceFunction {
    /// Strict preference as soon as the difference is positive.
    Usual,
    /// Preference grows linearly up to the threshold `p`.
    Linear { p: f64 },
}

impl Default for PreferenceFunction {
    fn default() -> Self {
        PreferenceFunction::Linear { p: 1.0 }
    }
}

impl PreferenceFunction {
    /// Preference degree for a difference `d` (already oriented, positive is better).
    pub fn degree(&self, d: f64) -> f64 {
        if d <= 0.0 {
            return 0.0;
        }
        match self {
            PreferenceFunction::Usual => 1.0,
            PreferenceFunction::Linear { p } => (d / p).min(1.0),
        }
    }

    /// Checks that the threshold of a linear function is positive.
    pub fn validate(&self) -> Result<(), CalculationError> {
        match self {
            PreferenceFunction::Linear { p } if !p.is_finite() || *p <= 0.0 => Err(
                CalculationError::invalid_parameter(
                    "promethee_p",
                    format!("linear threshold must be positive, got {}", p),
                ),
            ),
            _ => Ok(()),
        }
    }

    fn describe(&self) -> String {
        match self {
            PreferenceFunction::Usual => "usual criterion".to_string(),
            PreferenceFunction::Linear { p } => format!("linear criterion with p = {}", p),
        }
    }
}

/// Net outranking flow from pairwise preference degrees.
///
/// # Algorithm
/// - Oriented min-max normalization, so a positive difference always favors
///   the first alternative
/// - `π(a,b) = Σ_j w_j P_j(r_aj - r_bj)`
/// - Leaving flow: row sum of π; entering flow: column sum; net = leaving - entering
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheeEngine {
    preference: PreferenceFunction,
}

impl PrometheeEngine {
    pub fn new(preference: PreferenceFunction) -> Result<Self, CalculationError> {
        preference.validate()?;
        Ok(Self { preference })
    }
}

impl CalculationEngine for PrometheeEngine {
    fn method(&self) -> Method {
        Method::Promethee
    }

    fn calculate(&self, problem: &DecisionProblem) -> CalculationResult {
        let mut trace = StepTrace::new();
        record_decision_matrix(&mut trace, problem);

        let normalized = min_max(&problem.matrix, &problem.criteria_types);
        trace.record(CalculationStep::new(
            "Normalized Matrix",
            "Min-max normalization where 1 is the best value of each criterion",
            normalized.clone(),
            problem.criteria.clone(),
            problem.alternatives.clone(),
        ));

        let m = problem.alternative_count();
        let index: Vec<Vec<f64>> = (0..m)
            .map(|a| {
                (0..m)
                    .map(|b| {
                        if a == b {
                            return 0.0;
                        }
                        (0..problem.criterion_count())
                            .map(|j| {
                                let d = normalized[a][j] - normalized[b][j];
                                problem.weight(j) * self.preference.degree(d)
                            })
                            .sum()
                    })
                    .collect()
            })
            .collect();
        trace.record(CalculationStep::new(
            "Preference Index Matrix",
            format!(
                "Weighted preference of the row alternative over the column alternative ({})",
                self.preference.describe()
            ),
            index.clone(),
            problem.alternatives.clone(),
            problem.alternatives.clone(),
        ));

        let flows: Vec<[f64; 3]> = (0..m)
            .map(|a| {
                let leaving: f64 = index[a].iter().sum();
                let entering: f64 = index.iter().map(|row| row[a]).sum();
                [leaving, entering, leaving - entering]
            })
            .collect();
        trace.record(CalculationStep::new(
            "Outranking Flows",
            "Leaving flow (row sum), entering flow (column sum) and net flow",
            flows.iter().map(|f| f.to_vec()).collect(),
            vec![
                "Leaving Flow".to_string(),
                "Entering Flow".to_string(),
                "Net Flow".to_string(),
            ],
            problem.alternatives.clone(),
        ));

        let scores: Vec<f64> = flows.iter().map(|f| f[2]).collect();

        finish(Method::Promethee, problem, trace, "Net Flow", &scores, None)
    }
}
