//! VIKOR - Multi-criteria compromise ranking.

use crate::domain::calculation::engine::{
    finish, record_decision_matrix, safe_ratio, CalculationEngine,
};
use crate::domain::calculation::normalization::column_extremes;
use crate::domain::calculation::ranking::rank_order;
use crate::domain::calculation::{
    CalculationError, CalculationResult, CalculationStep, CriterionType, DecisionProblem, Method,
    RankDirection, StepTrace,
};

/// Default weight of the group-utility strategy.
pub const DEFAULT_V: f64 = 0.5;

/// Compromise index balancing group utility against individual regret.
///
/// # Algorithm
/// - `f*`/`f-`: best and worst value per criterion
/// - Distance: `w_j (f*_j - f_ij) / (f*_j - f-_j)`, 0 for a constant column
/// - `S_i`: sum of distances, `R_i`: largest distance
/// - `Q_i = v (S_i - S*) / (S- - S*) + (1 - v) (R_i - R*) / (R- - R*)`
///
/// Lower `Q` is better.
#[derive(Debug, Clone, Copy)]
pub struct VikorEngine {
    v: f64,
}

impl Default for VikorEngine {
    fn default() -> Self {
        Self { v: DEFAULT_V }
    }
}

impl VikorEngine {
    /// Creates an engine with the given balancing parameter.
    ///
    /// # Errors
    /// `v` must lie within [0, 1].
    pub fn new(v: f64) -> Result<Self, CalculationError> {
        if !(0.0..=1.0).contains(&v) {
            return Err(CalculationError::invalid_parameter(
                "vikor_v",
                format!("must be within [0, 1], got {}", v),
            ));
        }
        Ok(Self { v })
    }

    pub fn v(&self) -> f64 {
        self.v
    }

    fn min_max(values: &[f64]) -> (f64, f64) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if values.is_empty() {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }

    /// Describes the acceptable advantage and stability conditions for the
    /// top compromise solution.
    fn compromise_note(alternatives: &[String], s: &[f64], r: &[f64], q: &[f64]) -> Option<String> {
        let m = alternatives.len().min(q.len());
        if m < 2 {
            return None;
        }
        let by_q = rank_order(&q[..m], RankDirection::Ascending);
        let (top, runner_up) = (by_q[0], by_q[1]);
        let threshold = 1.0 / (m as f64 - 1.0);
        let advantage = q[runner_up] - q[top] >= threshold;

        let (s_min, _) = Self::min_max(s);
        let (r_min, _) = Self::min_max(r);
        let stable = s.get(top).is_some_and(|v| *v <= s_min)
            || r.get(top).is_some_and(|v| *v <= r_min);
        let (first, second) = (&alternatives[top], &alternatives[runner_up]);

        let note = match (advantage, stable) {
            (true, true) => format!(
                "'{}' has an acceptable advantage (threshold {:.4}) and is stable in decision making.",
                first, threshold
            ),
            (true, false) => format!(
                "'{}' has an acceptable advantage (threshold {:.4}) but is not the best by utility or regret alone.",
                first, threshold
            ),
            (false, _) => format!(
                "The advantage of '{}' over '{}' is below the threshold {:.4}; both belong to the compromise set.",
                first, second, threshold
            ),
        };
        Some(note)
    }
}

impl CalculationEngine for VikorEngine {
    fn method(&self) -> Method {
        Method::Vikor
    }

    fn calculate(&self, problem: &DecisionProblem) -> CalculationResult {
        let mut trace = StepTrace::new();
        record_decision_matrix(&mut trace, problem);

        let n = problem.criterion_count();
        let (best, worst): (Vec<f64>, Vec<f64>) = (0..n)
            .map(|j| {
                let (min, max) = column_extremes(&problem.matrix, j);
                match problem.criterion_type(j) {
                    CriterionType::Benefit => (max, min),
                    CriterionType::Cost => (min, max),
                }
            })
            .unzip();
        trace.record(CalculationStep::new(
            "Best and Worst Values",
            "Best (f*) and worst (f-) value of every criterion",
            vec![best.clone(), worst.clone()],
            problem.criteria.clone(),
            vec!["f*".to_string(), "f-".to_string()],
        ));

        let distances: Vec<Vec<f64>> = problem
            .matrix
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(j, &x)| {
                        let gap = (best[j] - x).abs();
                        let span = (best[j] - worst[j]).abs();
                        problem.weight(j) * safe_ratio(gap, span)
                    })
                    .collect()
            })
            .collect();
        trace.record(CalculationStep::new(
            "Weighted Normalized Distance",
            "Weighted distance of every value from the best value, relative to the best-worst span",
            distances.clone(),
            problem.criteria.clone(),
            problem.alternatives.clone(),
        ));

        let s: Vec<f64> = distances.iter().map(|row| row.iter().sum()).collect();
        let r: Vec<f64> = distances
            .iter()
            .map(|row| row.iter().copied().fold(0.0, f64::max))
            .collect();
        let (s_best, s_worst) = Self::min_max(&s);
        let (r_best, r_worst) = Self::min_max(&r);
        let q: Vec<f64> = s
            .iter()
            .zip(&r)
            .map(|(si, ri)| {
                self.v * safe_ratio(si - s_best, s_worst - s_best)
                    + (1.0 - self.v) * safe_ratio(ri - r_best, r_worst - r_best)
            })
            .collect();
        trace.record(CalculationStep::new(
            "Utility, Regret and Compromise",
            format!(
                "Group utility S, individual regret R and compromise index Q with v = {}",
                self.v
            ),
            (0..s.len()).map(|i| vec![s[i], r[i], q[i]]).collect(),
            vec!["S".to_string(), "R".to_string(), "Q".to_string()],
            problem.alternatives.clone(),
        ));

        let note = Self::compromise_note(&problem.alternatives, &s, &r, &q);

        finish(Method::Vikor, problem, trace, "Compromise Index (Q)", &q, note)
    }
}
