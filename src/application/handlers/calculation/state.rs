//! CalculationState - What the presentation layer shows for a calculation.

use crate::domain::calculation::CalculationResult;
use crate::domain::foundation::DomainError;

/// Lifecycle of one "calculate" action as seen by a caller.
///
/// `Failed` is the explicit "no result" signal and is never confused with
/// `Computing`.
#[derive(Debug, Clone, Default)]
pub enum CalculationState {
    #[default]
    Idle,
    Computing,
    Completed(CalculationResult),
    Failed { reason: String },
}

impl CalculationState {
    /// Maps a handler outcome to a terminal state.
    pub fn from_outcome(outcome: Result<CalculationResult, DomainError>) -> Self {
        match outcome {
            Ok(result) => CalculationState::Completed(result),
            Err(err) => CalculationState::Failed {
                reason: err.to_string(),
            },
        }
    }

    /// Returns true while a calculation is running.
    pub fn is_computing(&self) -> bool {
        matches!(self, CalculationState::Computing)
    }

    /// Returns true once a calculation finished, with or without a result.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CalculationState::Completed(_) | CalculationState::Failed { .. }
        )
    }

    /// Returns the result if the calculation completed.
    pub fn result(&self) -> Option<&CalculationResult> {
        match self {
            CalculationState::Completed(result) => Some(result),
            _ => None,
        }
    }
}
