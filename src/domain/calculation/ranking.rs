//! Ranking & Conclusion Builder.

use std::cmp::Ordering;

use super::{Method, RankDirection, ScoreEntry};

/// Orders entries by score in the given direction.
///
/// The sort is stable: equal scores keep their input order. A NaN score is
/// ranked last in either direction.
pub fn rank(scores: &[ScoreEntry], direction: RankDirection) -> Vec<ScoreEntry> {
    let values: Vec<f64> = scores.iter().map(|e| e.score).collect();
    rank_order(&values, direction)
        .into_iter()
        .map(|i| scores[i].clone())
        .collect()
}

/// Row indices of `scores` in ranking order, with the same tie and NaN
/// rules as [`rank`].
pub fn rank_order(scores: &[f64], direction: RankDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| compare_scores(scores[a], scores[b], direction));
    order
}

fn compare_scores(a: f64, b: f64, direction: RankDirection) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            RankDirection::Descending => b.total_cmp(&a),
            RankDirection::Ascending => a.total_cmp(&b),
        },
    }
}

/// Pairs alternatives with scores, preserving input order.
pub fn score_entries(alternatives: &[String], scores: &[f64]) -> Vec<ScoreEntry> {
    alternatives
        .iter()
        .zip(scores)
        .map(|(name, &score)| ScoreEntry::new(name.clone(), score))
        .collect()
}

/// Builds the narrative naming the method, the top alternative and its score.
pub fn build_conclusion(method: Method, ranking: &[ScoreEntry]) -> String {
    let Some(best) = ranking.first() else {
        return format!(
            "The {} calculation produced no ranked alternatives.",
            method.label()
        );
    };

    match method.rank_direction() {
        RankDirection::Descending => format!(
            "Based on the {} calculation, the best alternative is '{}' with a preference value of {:.4}.",
            method.label(),
            best.alternative,
            best.score
        ),
        RankDirection::Ascending => format!(
            "Based on the {} calculation, the best alternative is '{}' with the lowest compromise index of {:.4} (lower is better).",
            method.label(),
            best.alternative,
            best.score
        ),
    }
}
