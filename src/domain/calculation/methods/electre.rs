//! ELECTRE - Elimination and Choice Expressing Reality (ELECTRE I).

use serde::{Deserialize, Serialize};

use crate::domain::calculation::engine::{
    finish, record_decision_matrix, safe_ratio, weighted_headers, CalculationEngine,
};
use crate::domain::calculation::normalization::{apply_weights, vector};
use crate::domain::calculation::{
    CalculationError, CalculationResult, CalculationStep, CriterionType, DecisionProblem, Method,
    StepTrace,
};

/// Optional fixed thresholds for the outranking relation.
///
/// A missing threshold defaults to the mean of the off-diagonal indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectreThresholds {
    pub concordance: Option<f64>,
    pub discordance: Option<f64>,
}

impl ElectreThresholds {
    /// Checks that provided thresholds lie in [0, 1].
    pub fn validate(&self) -> Result<(), CalculationError> {
        for (name, value) in [
            ("electre_concordance", self.concordance),
            ("electre_discordance", self.discordance),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(CalculationError::invalid_parameter(
                        name,
                        format!("must be within [0, 1], got {}", v),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Pairwise outranking by concordance and discordance.
///
/// # Algorithm
/// - `c(k,l)`: sum of weights of criteria where `k` is at least as good as `l`
/// - `d(k,l)`: largest weighted gap on criteria where `k` is worse, divided
///   by the largest gap on any criterion
/// - `k` outranks `l` iff `c(k,l) >= c̄` and `d(k,l) <= d̄`
/// - Score: number of alternatives outranked minus number outranking it
#[derive(Debug, Clone, Copy, Default)]
pub struct ElectreEngine {
    thresholds: ElectreThresholds,
}

impl ElectreEngine {
    pub fn new(thresholds: ElectreThresholds) -> Result<Self, CalculationError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    fn at_least_as_good(kind: CriterionType, a: f64, b: f64) -> bool {
        match kind {
            CriterionType::Benefit => a >= b,
            CriterionType::Cost => a <= b,
        }
    }

    fn concordance(problem: &DecisionProblem, weighted: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let m = weighted.len();
        (0..m)
            .map(|k| {
                (0..m)
                    .map(|l| {
                        if k == l {
                            return 0.0;
                        }
                        (0..problem.criterion_count())
                            .filter(|&j| {
                                Self::at_least_as_good(
                                    problem.criterion_type(j),
                                    weighted[k][j],
                                    weighted[l][j],
                                )
                            })
                            .map(|j| problem.weight(j))
                            .sum()
                    })
                    .collect()
            })
            .collect()
    }

    fn discordance(problem: &DecisionProblem, weighted: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let m = weighted.len();
        (0..m)
            .map(|k| {
                (0..m)
                    .map(|l| {
                        if k == l {
                            return 0.0;
                        }
                        let mut worst_gap: f64 = 0.0;
                        let mut any_gap: f64 = 0.0;
                        for j in 0..problem.criterion_count() {
                            let gap = (weighted[k][j] - weighted[l][j]).abs();
                            any_gap = any_gap.max(gap);
                            if !Self::at_least_as_good(
                                problem.criterion_type(j),
                                weighted[k][j],
                                weighted[l][j],
                            ) {
                                worst_gap = worst_gap.max(gap);
                            }
                        }
                        safe_ratio(worst_gap, any_gap)
                    })
                    .collect()
            })
            .collect()
    }

    fn off_diagonal_mean(matrix: &[Vec<f64>]) -> f64 {
        let m = matrix.len();
        if m < 2 {
            return 0.0;
        }
        let total: f64 = matrix
            .iter()
            .enumerate()
            .flat_map(|(k, row)| row.iter().enumerate().filter(move |(l, _)| *l != k))
            .map(|(_, v)| v)
            .sum();
        total / (m * (m - 1)) as f64
    }
}

impl CalculationEngine for ElectreEngine {
    fn method(&self) -> Method {
        Method::Electre
    }

    fn calculate(&self, problem: &DecisionProblem) -> CalculationResult {
        let mut trace = StepTrace::new();
        record_decision_matrix(&mut trace, problem);

        let normalized = vector(&problem.matrix);
        trace.record(CalculationStep::new(
            "Normalized Matrix",
            "Every value divided by the Euclidean norm of its column",
            normalized.clone(),
            problem.criteria.clone(),
            problem.alternatives.clone(),
        ));

        let weighted = apply_weights(&normalized, &problem.weights);
        trace.record(CalculationStep::new(
            "Weighted Normalized Matrix",
            "Normalized values multiplied by the weight of their criterion",
            weighted.clone(),
            weighted_headers(problem),
            problem.alternatives.clone(),
        ));

        let concordance = Self::concordance(problem, &weighted);
        let c_threshold = self
            .thresholds
            .concordance
            .unwrap_or_else(|| Self::off_diagonal_mean(&concordance));
        trace.record(CalculationStep::new(
            "Concordance Matrix",
            format!(
                "Sum of weights of criteria where the row alternative is at least as good as the column alternative (threshold {:.4})",
                c_threshold
            ),
            concordance.clone(),
            problem.alternatives.clone(),
            problem.alternatives.clone(),
        ));

        let discordance = Self::discordance(problem, &weighted);
        let d_threshold = self
            .thresholds
            .discordance
            .unwrap_or_else(|| Self::off_diagonal_mean(&discordance));
        trace.record(CalculationStep::new(
            "Discordance Matrix",
            format!(
                "Largest relative gap on criteria where the row alternative is worse (threshold {:.4})",
                d_threshold
            ),
            discordance.clone(),
            problem.alternatives.clone(),
            problem.alternatives.clone(),
        ));

        let m = problem.alternative_count();
        let outranking: Vec<Vec<f64>> = (0..m)
            .map(|k| {
                (0..m)
                    .map(|l| {
                        let outranks = k != l
                            && concordance[k][l] >= c_threshold
                            && discordance[k][l] <= d_threshold;
                        if outranks {
                            1.0
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect();
        trace.record(CalculationStep::new(
            "Outranking Matrix",
            "1 where the row alternative outranks the column alternative",
            outranking.clone(),
            problem.alternatives.clone(),
            problem.alternatives.clone(),
        ));

        let scores: Vec<f64> = (0..m)
            .map(|k| {
                let wins: f64 = outranking[k].iter().sum();
                let losses: f64 = outranking.iter().map(|row| row[k]).sum();
                wins - losses
            })
            .collect();

        finish(Method::Electre, problem, trace, "Net Outranking", &scores, None)
    }
}
