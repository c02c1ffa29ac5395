//! Calculation engine errors.

use thiserror::Error;

use super::Method;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the dispatcher and method construction.
///
/// Numeric degeneracies never surface here; methods resolve them locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("No engine registered for method {0}")]
    UnsupportedMethod(Method),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Calculation for method {method} produced no result: {reason}")]
    Aborted { method: Method, reason: String },
}

impl CalculationError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CalculationError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code matching this variant.
    pub fn code(&self) -> ErrorCode {
        match self {
            CalculationError::UnsupportedMethod(_) => ErrorCode::UnsupportedMethod,
            CalculationError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            CalculationError::Aborted { .. } => ErrorCode::CalculationFailed,
        }
    }
}

impl From<CalculationError> for DomainError {
    fn from(err: CalculationError) -> Self {
        let code = err.code();
        let domain = DomainError::new(code, err.to_string());
        match err {
            CalculationError::UnsupportedMethod(method) | CalculationError::Aborted { method, .. } => {
                domain.with_detail("method", method.code())
            }
            CalculationError::InvalidParameter { name, .. } => domain.with_detail("parameter", name),
        }
    }
}
