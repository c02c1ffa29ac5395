//! AHP - Analytical Hierarchy Process.

use crate::domain::calculation::engine::{
    finish, record_decision_matrix, safe_ratio, CalculationEngine,
};
use crate::domain::calculation::normalization::{apply_weights, benefit_ratio};
use crate::domain::calculation::{
    CalculationError, CalculationResult, CalculationStep, DecisionProblem, Method, StepTrace,
};

/// Consistency ratio above which judgments are considered inconsistent.
pub const CONSISTENCY_RATIO_LIMIT: f64 = 0.1;

const POWER_ITERATIONS: usize = 100;
const POWER_TOLERANCE: f64 = 1e-10;

/// Saaty's random consistency index for matrices of order 1 to 10.
const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Returns the random index for a matrix of order `n`.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX[RANDOM_INDEX.len() - 1],
    }
}

/// Consistency measures of a pairwise comparison matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consistency {
    pub lambda_max: f64,
    pub index: f64,
    pub random_index: f64,
    pub ratio: f64,
}

impl Consistency {
    /// Computes λmax, CI and CR for `pairwise` given its priority vector.
    ///
    /// Rows whose priority is 0 carry no information and are skipped when
    /// estimating λmax.
    pub fn measure(pairwise: &[Vec<f64>], priorities: &[f64]) -> Self {
        let n = priorities.len();
        let ratios: Vec<f64> = pairwise
            .iter()
            .zip(priorities)
            .filter(|(_, &p)| p > 0.0)
            .map(|(row, &p)| {
                let weighted: f64 = row.iter().zip(priorities).map(|(a, w)| a * w).sum();
                weighted / p
            })
            .collect();

        let lambda_max = if ratios.is_empty() {
            n as f64
        } else {
            ratios.iter().sum::<f64>() / ratios.len() as f64
        };
        let index = if n > 1 {
            ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0)
        } else {
            0.0
        };
        let random_index = random_index(n);

        Self {
            lambda_max,
            index,
            random_index,
            ratio: safe_ratio(index, random_index),
        }
    }

    /// Returns true when the consistency ratio is within the accepted limit.
    pub fn is_acceptable(&self) -> bool {
        self.ratio <= CONSISTENCY_RATIO_LIMIT
    }
}

/// Principal eigenvector of a positive matrix, normalized to sum to 1.
///
/// Uses power iteration starting from the uniform vector.
pub fn principal_eigenvector(matrix: &[Vec<f64>]) -> Vec<f64> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    let mut v = vec![1.0 / n as f64; n];
    for _ in 0..POWER_ITERATIONS {
        let next: Vec<f64> = matrix
            .iter()
            .map(|row| row.iter().zip(&v).map(|(a, x)| a * x).sum())
            .collect();
        let sum: f64 = next.iter().sum();
        if sum <= 0.0 || !sum.is_finite() {
            break;
        }
        let next: Vec<f64> = next.iter().map(|x| x / sum).collect();
        let delta: f64 = next.iter().zip(&v).map(|(a, b)| (a - b).abs()).sum();
        v = next;
        if delta <= POWER_TOLERANCE {
            break;
        }
    }
    v
}

/// Pairwise-comparison weighting applied to a ratio-normalized matrix.
///
/// With an explicit criteria comparison matrix the priorities are its
/// principal eigenvector. Otherwise the supplied weights are accepted as
/// priorities and the implied ratio matrix `w_j / w_k` is recorded.
#[derive(Debug, Clone, Default)]
pub struct AhpEngine {
    pairwise: Option<Vec<Vec<f64>>>,
}

impl AhpEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an explicit criteria comparison matrix.
    ///
    /// # Errors
    /// The matrix must be square, non-empty, with finite positive entries.
    pub fn with_pairwise(matrix: Vec<Vec<f64>>) -> Result<Self, CalculationError> {
        let n = matrix.len();
        if n == 0 {
            return Err(CalculationError::invalid_parameter(
                "ahp_pairwise",
                "comparison matrix is empty",
            ));
        }
        if matrix.iter().any(|row| row.len() != n) {
            return Err(CalculationError::invalid_parameter(
                "ahp_pairwise",
                format!("comparison matrix must be {}x{}", n, n),
            ));
        }
        if matrix.iter().flatten().any(|a| !a.is_finite() || *a <= 0.0) {
            return Err(CalculationError::invalid_parameter(
                "ahp_pairwise",
                "comparison values must be finite and positive",
            ));
        }
        Ok(Self {
            pairwise: Some(matrix),
        })
    }

    fn implied_pairwise(weights: &[f64]) -> Vec<Vec<f64>> {
        weights
            .iter()
            .enumerate()
            .map(|(j, &wj)| {
                weights
                    .iter()
                    .enumerate()
                    .map(|(k, &wk)| if j == k { 1.0 } else { safe_ratio(wj, wk) })
                    .collect()
            })
            .collect()
    }

    fn priorities(&self, problem: &DecisionProblem) -> (Vec<Vec<f64>>, Vec<f64>) {
        match &self.pairwise {
            Some(matrix) if matrix.len() == problem.criterion_count() => {
                (matrix.clone(), principal_eigenvector(matrix))
            }
            Some(matrix) => {
                tracing::warn!(
                    expected = problem.criterion_count(),
                    actual = matrix.len(),
                    "AHP comparison matrix does not match criteria, using supplied weights"
                );
                (Self::implied_pairwise(&problem.weights), problem.weights.clone())
            }
            None => (Self::implied_pairwise(&problem.weights), problem.weights.clone()),
        }
    }
}

impl CalculationEngine for AhpEngine {
    fn method(&self) -> Method {
        Method::Ahp
    }

    fn calculate(&self, problem: &DecisionProblem) -> CalculationResult {
        let mut trace = StepTrace::new();
        record_decision_matrix(&mut trace, problem);

        let (pairwise, priorities) = self.priorities(problem);
        trace.record(CalculationStep::new(
            "Pairwise Comparison Matrix",
            "Relative importance of every criterion against every other criterion",
            pairwise.clone(),
            problem.criteria.clone(),
            problem.criteria.clone(),
        ));
        trace.record(CalculationStep::column(
            "Priority Vector",
            "Principal eigenvector of the comparison matrix",
            "Priority",
            &priorities,
            problem.criteria.clone(),
        ));

        let normalized = benefit_ratio(&problem.matrix, &problem.criteria_types);
        trace.record(CalculationStep::new(
            "Normalized Matrix",
            "Benefit columns divided by their maximum, cost column minimum divided by each value",
            normalized.clone(),
            problem.criteria.clone(),
            problem.alternatives.clone(),
        ));

        let weighted = apply_weights(&normalized, &priorities);
        trace.record(CalculationStep::new(
            "Weighted Matrix",
            "Normalized values multiplied by the priority of their criterion",
            weighted.clone(),
            problem
                .criteria
                .iter()
                .zip(&priorities)
                .map(|(name, p)| format!("{} ({:.4})", name, p))
                .collect(),
            problem.alternatives.clone(),
        ));

        let consistency = Consistency::measure(&pairwise, &priorities);
        trace.record(CalculationStep::column(
            "Consistency Check",
            "Principal eigenvalue, consistency index, random index and consistency ratio",
            "Value",
            &[
                consistency.lambda_max,
                consistency.index,
                consistency.random_index,
                consistency.ratio,
            ],
            vec![
                "Lambda Max".to_string(),
                "CI".to_string(),
                "RI".to_string(),
                "CR".to_string(),
            ],
        ));

        let scores: Vec<f64> = weighted.iter().map(|row| row.iter().sum()).collect();

        let note = if consistency.is_acceptable() {
            format!("Consistency ratio {:.4} is acceptable.", consistency.ratio)
        } else {
            format!(
                "Consistency ratio {:.4} exceeds {:.1}; the pairwise judgments should be revisited.",
                consistency.ratio, CONSISTENCY_RATIO_LIMIT
            )
        };

        finish(Method::Ahp, problem, trace, "Global Priority", &scores, Some(note))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculation::CriterionType;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    fn problem() -> DecisionProblem {
        DecisionProblem::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion("Price", 0.5, CriterionType::Cost)
            .criterion("Quality", 0.3, CriterionType::Benefit)
            .criterion("Support", 0.2, CriterionType::Benefit)
            .row(vec![100.0, 7.0, 5.0])
            .row(vec![80.0, 6.0, 9.0])
            .row(vec![120.0, 9.0, 6.0])
            .build()
    }

    #[test]
    fn eigenvector_of_consistent_matrix_recovers_ratios() {
        let matrix = vec![
            vec![1.0, 2.0, 4.0],
            vec![0.5, 1.0, 2.0],
            vec![0.25, 0.5, 1.0],
        ];
        let v = principal_eigenvector(&matrix);
        assert_close(v[0], 4.0 / 7.0);
        assert_close(v[1], 2.0 / 7.0);
        assert_close(v[2], 1.0 / 7.0);

        let consistency = Consistency::measure(&matrix, &v);
        assert_close(consistency.lambda_max, 3.0);
        assert_close(consistency.ratio, 0.0);
        assert!(consistency.is_acceptable());
    }

    #[test]
    fn inconsistent_matrix_is_flagged() {
        let matrix = vec![
            vec![1.0, 9.0, 1.0 / 9.0],
            vec![1.0 / 9.0, 1.0, 9.0],
            vec![9.0, 1.0 / 9.0, 1.0],
        ];
        let v = principal_eigenvector(&matrix);
        let consistency = Consistency::measure(&matrix, &v);
        assert!(consistency.ratio > CONSISTENCY_RATIO_LIMIT);
        assert!(!consistency.is_acceptable());
    }

    #[test]
    fn random_index_table() {
        assert_eq!(random_index(1), 0.0);
        assert_eq!(random_index(3), 0.58);
        assert_eq!(random_index(10), 1.49);
        assert_eq!(random_index(15), 1.49);
    }

    #[test]
    fn supplied_weights_match_saw_scores() {
        let ahp = AhpEngine::new().calculate(&problem());
        let saw = super::super::SawEngine.calculate(&problem());
        for (a, s) in ahp.final_scores.iter().zip(&saw.final_scores) {
            assert_close(a.score, s.score);
        }
        assert!(ahp.conclusion.contains("acceptable"));
    }

    #[test]
    fn trace_reports_consistency_before_scores() {
        let result = AhpEngine::new().calculate(&problem());
        let n = result.steps.len();
        assert_eq!(result.steps[n - 2].name, "Consistency Check");
        assert_eq!(result.steps[n - 2].row_headers[3], "CR");
        assert_eq!(result.steps[n - 1].dimensions(), (3, 1));
    }

    #[test]
    fn explicit_pairwise_matrix_drives_priorities() {
        let engine = AhpEngine::with_pairwise(vec![
            vec![1.0, 1.0 / 3.0, 1.0 / 3.0],
            vec![3.0, 1.0, 1.0],
            vec![3.0, 1.0, 1.0],
        ])
        .unwrap();

        let result = engine.calculate(&problem());
        let priorities = &result.step("Priority Vector").unwrap().matrix;
        assert_close(priorities[0][0], 1.0 / 7.0);
        assert_close(priorities[1][0], 3.0 / 7.0);
    }

    #[test]
    fn mismatched_pairwise_falls_back_to_weights() {
        let engine = AhpEngine::with_pairwise(vec![vec![1.0, 2.0], vec![0.5, 1.0]]).unwrap();
        let result = engine.calculate(&problem());
        let priorities = &result.step("Priority Vector").unwrap().matrix;
        assert_eq!(priorities[0][0], 0.5);
    }

    #[test]
    fn with_pairwise_rejects_bad_matrices() {
        assert!(AhpEngine::with_pairwise(vec![]).is_err());
        assert!(AhpEngine::with_pairwise(vec![vec![1.0, 2.0]]).is_err());
        assert!(AhpEngine::with_pairwise(vec![vec![1.0, 0.0], vec![1.0, 1.0]]).is_err());
    }

    #[test]
    fn zero_weight_stays_finite() {
        let mut problem = problem();
        problem.weights = vec![0.0, 0.5, 0.5];
        let result = AhpEngine::new().calculate(&problem);
        for entry in &result.final_scores {
            assert!(entry.score.is_finite());
        }
        let consistency = result.step("Consistency Check").unwrap();
        assert!(consistency.matrix.iter().all(|r| r[0].is_finite()));
    }
}
