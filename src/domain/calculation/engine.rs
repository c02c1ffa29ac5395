//! Engine interface and the helpers every method shares for assembling results.

use super::ranking::{build_conclusion, rank, score_entries};
use super::{CalculationResult, CalculationStep, DecisionProblem, Method, StepTrace};

/// A ranking method.
///
/// Implementations are stateless apart from their fixed parameters, so the
/// same engine may serve any number of calculations.
pub trait CalculationEngine: Send + Sync {
    /// The method this engine implements.
    fn method(&self) -> Method;

    /// Ranks the alternatives of `problem`, recording every intermediate matrix.
    fn calculate(&self, problem: &DecisionProblem) -> CalculationResult;
}

/// Records the untouched decision matrix as the first step.
pub(crate) fn record_decision_matrix(trace: &mut StepTrace, problem: &DecisionProblem) {
    trace.record(CalculationStep::new(
        "Decision Matrix",
        "Initial matrix holding the value of every alternative on every criterion",
        problem.matrix.clone(),
        problem.criteria.clone(),
        problem.alternatives.clone(),
    ));
}

/// Criterion headers annotated with their weights, e.g. `"Cost (0.5)"`.
pub(crate) fn weighted_headers(problem: &DecisionProblem) -> Vec<String> {
    problem
        .criteria
        .iter()
        .enumerate()
        .map(|(j, name)| format!("{} ({})", name, problem.weight(j)))
        .collect()
}

/// Records the final score column and assembles the result.
///
/// `note`, when present, is appended to the generated conclusion.
pub(crate) fn finish(
    method: Method,
    problem: &DecisionProblem,
    mut trace: StepTrace,
    score_label: &str,
    scores: &[f64],
    note: Option<String>,
) -> CalculationResult {
    trace.record(CalculationStep::column(
        score_label,
        format!("Final {} score for every alternative", method.code()),
        score_label,
        scores,
        problem.alternatives.clone(),
    ));

    let final_scores = score_entries(&problem.alternatives, scores);
    let ranking = rank(&final_scores, method.rank_direction());
    let mut conclusion = build_conclusion(method, &ranking);
    if let Some(note) = note {
        conclusion.push(' ');
        conclusion.push_str(&note);
    }

    tracing::debug!(
        method = %method,
        alternatives = problem.alternative_count(),
        criteria = problem.criterion_count(),
        steps = trace.len(),
        "Calculation finished"
    );

    CalculationResult {
        method,
        steps: trace.into_steps(),
        final_scores,
        ranking,
        conclusion,
    }
}

/// Returns `numerator / denominator`, or 0 when the denominator is 0.
pub(crate) fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
