//! Calculation Result - Scores, ranking and trace of one engine run.

use serde::{Deserialize, Serialize};

use super::{CalculationStep, Method};

/// An alternative paired with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub alternative: String,
    pub score: f64,
}

impl ScoreEntry {
    /// Creates a new score entry.
    pub fn new(alternative: impl Into<String>, score: f64) -> Self {
        Self {
            alternative: alternative.into(),
            score,
        }
    }
}

/// Output of one calculation.
///
/// `final_scores` follows the input alternative order; `ranking` holds the
/// same entries ordered by preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub method: Method,
    pub steps: Vec<CalculationStep>,
    pub final_scores: Vec<ScoreEntry>,
    pub ranking: Vec<ScoreEntry>,
    pub conclusion: String,
}

impl CalculationResult {
    /// Returns the top-ranked entry.
    pub fn top(&self) -> Option<&ScoreEntry> {
        self.ranking.first()
    }

    /// Returns the score of the first alternative with the given name.
    pub fn score_of(&self, alternative: &str) -> Option<f64> {
        self.final_scores
            .iter()
            .find(|e| e.alternative == alternative)
            .map(|e| e.score)
    }

    /// Returns the 1-based rank of the first alternative with the given name.
    pub fn position_of(&self, alternative: &str) -> Option<usize> {
        self.ranking
            .iter()
            .position(|e| e.alternative == alternative)
            .map(|p| p + 1)
    }

    /// Returns the step with the given name, if recorded.
    pub fn step(&self, name: &str) -> Option<&CalculationStep> {
        self.steps.iter().find(|s| s.name == name)
    }
}
