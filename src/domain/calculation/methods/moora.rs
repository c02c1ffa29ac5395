//! MOORA - Multi-Objective Optimization on the basis of Ratio Analysis.

use crate::domain::calculation::engine::{
    finish, record_decision_matrix, weighted_headers, CalculationEngine,
};
use crate::domain::calculation::normalization::{apply_weights, vector};
use crate::domain::calculation::{
    CalculationResult, CalculationStep, DecisionProblem, Method, StepTrace,
};

/// Ratio system: weighted benefit terms minus weighted cost terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct MooraEngine;

impl CalculationEngine for MooraEngine {
    fn method(&self) -> Method {
        Method::Moora
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

        let sums: Vec<(f64, f64)> = weighted
            .iter()
            .map(|row| {
                row.iter().enumerate().fold((0.0, 0.0), |(benefit, cost), (j, v)| {
                    if problem.criterion_type(j).is_cost() {
                        (benefit, cost + v)
                    } else {
                        (benefit + v, cost)
                    }
                })
            })
            .collect();
        trace.record(CalculationStep::new(
            "Benefit and Cost Sums",
            "Sum of weighted values over benefit criteria and over cost criteria",
            sums.iter().map(|(b, c)| vec![*b, *c]).collect(),
            vec!["Benefit Sum".to_string(), "Cost Sum".to_string()],
            problem.alternatives.clone(),
        ));

        let scores: Vec<f64> = sums.iter().map(|(b, c)| b - c).collect();

        finish(Method::Moora, problem, trace, "Optimization Value (Yi)", &scores, None)
    }
}
