//! SAW - Simple Additive Weighting.

use crate::domain::calculation::engine::{
    finish, record_decision_matrix, weighted_headers, CalculationEngine,
};
use crate::domain::calculation::normalization::{apply_weights, benefit_ratio};
use crate::domain::calculation::{
    CalculationResult, CalculationStep, DecisionProblem, Method, StepTrace,
};

/// Weighted sum of ratio-normalized values.
///
/// # Algorithm
/// 1. Normalize: benefit `x / max`, cost `min / x`
/// 2. Weight: `r * w`
/// 3. Score: `Σ_j r_ij * w_j`
#[derive(Debug, Clone, Copy, Default)]
pub struct SawEngine;

impl CalculationEngine for SawEngine {
    fn method(&self) -> Method {
        Method::Saw
    }

    fn calculate(&self, problem: &DecisionProblem) -> CalculationResult {
        let mut trace = StepTrace::new();
        record_decision_matrix(&mut trace, problem);

        let normalized = benefit_ratio(&problem.matrix, &problem.criteria_types);
        trace.record(CalculationStep::new(
            "Normalized Matrix",
            "Benefit columns divided by their maximum, cost column minimum divided by each value",
            normalized.clone(),
            problem.criteria.clone(),
            problem.alternatives.clone(),
        ));

        let weighted = apply_weights(&normalized, &problem.weights);
        trace.record(CalculationStep::new(
            "Weighted Matrix",
            "Normalized values multiplied by the weight of their criterion",
            weighted.clone(),
            weighted_headers(problem),
            problem.alternatives.clone(),
        ));

        let scores: Vec<f64> = weighted.iter().map(|row| row.iter().sum()).collect();

        finish(Method::Saw, problem, trace, "Preference Value", &scores, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculation::CriterionType;

    fn cost_quality_problem() -> DecisionProblem {
        DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion("Cost", 0.5, CriterionType::Cost)
            .criterion("Quality", 0.5, CriterionType::Benefit)
            .row(vec![2.0, 8.0])
            .row(vec![4.0, 4.0])
            .build()
    }

    #[test]
    fn cost_quality_scenario() {
        let result = SawEngine.calculate(&cost_quality_problem());

        assert_eq!(result.method, Method::Saw);
        assert_eq!(result.steps.len(), 4);
        assert_eq!(result.steps[1].matrix, vec![vec![1.0, 1.0], vec![0.5, 0.5]]);
        assert_eq!(result.steps[2].matrix, vec![vec![0.5, 0.5], vec![0.25, 0.25]]);
        assert_eq!(result.steps[3].matrix, vec![vec![1.0], vec![0.5]]);

        assert_eq!(result.ranking[0].alternative, "A");
        assert_eq!(result.ranking[0].score, 1.0);
        assert_eq!(result.ranking[1].alternative, "B");
        assert_eq!(result.ranking[1].score, 0.5);
        assert!(result.conclusion.contains("'A'"));
        assert!(result.conclusion.contains("1.0000"));
    }

    #[test]
    fn weighted_step_headers_carry_weights() {
        let result = SawEngine.calculate(&cost_quality_problem());
        assert_eq!(
            result.steps[2].column_headers,
            vec!["Cost (0.5)", "Quality (0.5)"]
        );
    }

    #[test]
    fn best_benefit_and_cost_rows_normalize_to_one() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion("Speed", 0.6, CriterionType::Benefit)
            .criterion("Price", 0.4, CriterionType::Cost)
            .row(vec![3.0, 30.0])
            .row(vec![9.0, 20.0])
            .row(vec![6.0, 10.0])
            .build();

        let normalized = &SawEngine.calculate(&problem).steps[1].matrix;
        assert_eq!(normalized[1][0], 1.0);
        assert_eq!(normalized[2][1], 1.0);
    }

    #[test]
    fn zero_benefit_column_scores_zero() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion("Quality", 1.0, CriterionType::Benefit)
            .row(vec![0.0])
            .row(vec![0.0])
            .build();

        let result = SawEngine.calculate(&problem);
        assert_eq!(result.score_of("A"), Some(0.0));
        assert_eq!(result.score_of("B"), Some(0.0));
        assert_eq!(result.ranking[0].alternative, "A");
    }
}
