//! TOPSIS - Technique for Order Preference by Similarity to Ideal Solution.

use crate::domain::calculation::engine::{
    finish, record_decision_matrix, safe_ratio, weighted_headers, CalculationEngine,
};
use crate::domain::calculation::normalization::{apply_weights, column_extremes, vector};
use crate::domain::calculation::{
    CalculationResult, CalculationStep, CriterionType, DecisionProblem, Method, StepTrace,
};

/// Relative closeness to the ideal solution.
///
/// # Algorithm
/// 1. Vector-normalize and weight
/// 2. Ideal `A+` takes the best value per criterion, anti-ideal `A-` the worst
/// 3. `D+`/`D-` are Euclidean distances to `A+`/`A-`
/// 4. Score: `D- / (D+ + D-)`, 0 when both distances are 0
#[derive(Debug, Clone, Copy, Default)]
pub struct TopsisEngine;

fn distance(row: &[f64], target: &[f64]) -> f64 {
    row.iter()
        .zip(target)
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

impl CalculationEngine for TopsisEngine {
    fn method(&self) -> Method {
        Method::Topsis
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

        let (ideal, anti_ideal): (Vec<f64>, Vec<f64>) = (0..problem.criterion_count())
            .map(|j| {
                let (min, max) = column_extremes(&weighted, j);
                match problem.criterion_type(j) {
                    CriterionType::Benefit => (max, min),
                    CriterionType::Cost => (min, max),
                }
            })
            .unzip();
        trace.record(CalculationStep::new(
            "Ideal Solutions",
            "Positive ideal (best value per criterion) and negative ideal (worst value per criterion)",
            vec![ideal.clone(), anti_ideal.clone()],
            problem.criteria.clone(),
            vec!["A+".to_string(), "A-".to_string()],
        ));

        let distances: Vec<(f64, f64)> = weighted
            .iter()
            .map(|row| (distance(row, &ideal), distance(row, &anti_ideal)))
            .collect();
        trace.record(CalculationStep::new(
            "Separation Distances",
            "Euclidean distance of every alternative to the positive and negative ideal",
            distances.iter().map(|(p, n)| vec![*p, *n]).collect(),
            vec!["D+".to_string(), "D-".to_string()],
            problem.alternatives.clone(),
        ));

        let scores: Vec<f64> = distances
            .iter()
            .map(|(to_best, to_worst)| safe_ratio(*to_worst, to_best + to_worst))
            .collect();

        finish(Method::Topsis, problem, trace, "Closeness Coefficient", &scores, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn dominant_alternative_scores_one() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["Good", "Bad"])
            .criterion("Quality", 0.5, CriterionType::Benefit)
            .criterion("Price", 0.5, CriterionType::Cost)
            .row(vec![9.0, 1.0])
            .row(vec![3.0, 4.0])
            .build();

        let result = TopsisEngine.calculate(&problem);
        assert_close(result.score_of("Good").unwrap(), 1.0);
        assert_close(result.score_of("Bad").unwrap(), 0.0);
        assert_eq!(result.ranking[0].alternative, "Good");
    }

    #[test]
    fn ideal_solutions_respect_orientation() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion("Quality", 0.5, CriterionType::Benefit)
            .criterion("Price", 0.5, CriterionType::Cost)
            .row(vec![3.0, 3.0])
            .row(vec![4.0, 4.0])
            .build();

        let result = TopsisEngine.calculate(&problem);
        let ideal = result.step("Ideal Solutions").unwrap();
        // Weighted column values: 0.3/0.4 on both criteria
        assert_close(ideal.matrix[0][0], 0.4);
        assert_close(ideal.matrix[0][1], 0.3);
        assert_close(ideal.matrix[1][0], 0.3);
        assert_close(ideal.matrix[1][1], 0.4);
    }

    #[test]
    fn compromise_alternative_lands_between() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion("Quality", 0.5, CriterionType::Benefit)
            .criterion("Price", 0.5, CriterionType::Cost)
            .row(vec![10.0, 10.0])
            .row(vec![5.0, 5.0])
            .row(vec![8.0, 6.0])
            .build();

        let result = TopsisEngine.calculate(&problem);
        for entry in &result.final_scores {
            assert!((0.0..=1.0).contains(&entry.score));
        }
        assert_eq!(result.ranking[0].alternative, "C");
    }

    #[test]
    fn identical_alternatives_score_zero() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion("Quality", 1.0, CriterionType::Benefit)
            .row(vec![5.0])
            .row(vec![5.0])
            .build();

        let result = TopsisEngine.calculate(&problem);
        assert_eq!(result.score_of("A"), Some(0.0));
        assert_eq!(result.score_of("B"), Some(0.0));
        assert_eq!(result.ranking[0].alternative, "A");
    }
}
