//! CalculateHandler - Runs one calculation on a validated problem snapshot.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::calculation::{
    CalculationEngine, CalculationError, CalculationResult, DecisionProblem, EngineRegistry,
    Method,
};
use crate::domain::foundation::DomainError;

/// Command to rank the alternatives of a problem with one method.
#[derive(Debug, Clone)]
pub struct CalculateCommand {
    pub method: Method,
    pub problem: DecisionProblem,
}

/// Handler for calculations.
///
/// Every failure, including a panicking engine, comes back as a
/// [`DomainError`]; no partial result is ever returned.
pub struct CalculateHandler {
    registry: Arc<EngineRegistry>,
}

impl CalculateHandler {
    pub fn new(registry: Arc<EngineRegistry>) -> Self {
        Self { registry }
    }

    /// Validates the command and resolves its engine.
    fn prepare(&self, cmd: &CalculateCommand) -> Result<Arc<dyn CalculationEngine>, DomainError> {
        if let Err(err) = cmd.problem.validate() {
            warn!(method = %cmd.method, error = %err, "Rejected invalid decision problem");
            return Err(err.into());
        }

        self.registry.get_engine(cmd.method).map_err(|err| {
            error!(method = %cmd.method, error = %err, "No engine registered for method");
            DomainError::from(err)
        })
    }

    fn aborted(method: Method, reason: impl Into<String>) -> DomainError {
        let reason = reason.into();
        error!(method = %method, reason = %reason, "Calculation produced no result");
        CalculationError::Aborted { method, reason }.into()
    }

    fn completed(result: &CalculationResult) {
        info!(
            method = %result.method,
            steps = result.steps.len(),
            top = result.top().map(|e| e.alternative.as_str()).unwrap_or(""),
            "Calculation completed"
        );
    }

    /// Runs the calculation on the blocking thread pool.
    pub async fn handle(&self, cmd: CalculateCommand) -> Result<CalculationResult, DomainError> {
        let engine = self.prepare(&cmd)?;
        let method = cmd.method;
        let problem = cmd.problem;

        match tokio::task::spawn_blocking(move || engine.calculate(&problem)).await {
            Ok(result) => {
                Self::completed(&result);
                Ok(result)
            }
            Err(join_err) if join_err.is_panic() => {
                Err(Self::aborted(method, "engine panicked during calculation"))
            }
            Err(join_err) => Err(Self::aborted(method, join_err.to_string())),
        }
    }

    /// Runs the calculation on the current thread.
    pub fn handle_blocking(&self, cmd: CalculateCommand) -> Result<CalculationResult, DomainError> {
        let engine = self.prepare(&cmd)?;

        match panic::catch_unwind(AssertUnwindSafe(|| engine.calculate(&cmd.problem))) {
            Ok(result) => {
                Self::completed(&result);
                Ok(result)
            }
            Err(_) => Err(Self::aborted(cmd.method, "engine panicked during calculation")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculation::{CriterionType, MethodOptions};
    use crate::domain::foundation::ErrorCode;

    struct PanickingEngine;

    impl CalculationEngine for PanickingEngine {
        fn method(&self) -> Method {
            Method::Topsis
        }

        fn calculate(&self, _problem: &DecisionProblem) -> CalculationResult {
            panic!("simulated division by an uncontrolled zero")
        }
    }

    fn problem() -> DecisionProblem {
        DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion("Cost", 0.5, CriterionType::Cost)
            .criterion("Quality", 0.5, CriterionType::Benefit)
            .row(vec![2.0, 8.0])
            .row(vec![4.0, 4.0])
            .build()
    }

    fn handler() -> CalculateHandler {
        let registry = EngineRegistry::new(&MethodOptions::default()).unwrap();
        CalculateHandler::new(Arc::new(registry))
    }

    fn panicking_handler() -> CalculateHandler {
        let mut registry = EngineRegistry::empty();
        registry.register(Arc::new(PanickingEngine));
        CalculateHandler::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn handle_returns_complete_result() {
        let result = handler()
            .handle(CalculateCommand {
                method: Method::Saw,
                problem: problem(),
            })
            .await
            .unwrap();

        assert_eq!(result.method, Method::Saw);
        assert_eq!(result.ranking[0].alternative, "A");
        assert_eq!(result.steps.len(), 4);
    }

    #[tokio::test]
    async fn handle_rejects_invalid_problem() {
        let mut problem = problem();
        problem.weights = vec![0.5];

        let err = handler()
            .handle(CalculateCommand {
                method: Method::Saw,
                problem,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DimensionMismatch);
    }

    #[tokio::test]
    async fn handle_reports_unsupported_method() {
        let err = panicking_handler()
            .handle(CalculateCommand {
                method: Method::Vikor,
                problem: problem(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UnsupportedMethod);
    }

    #[tokio::test]
    async fn handle_converts_panic_into_no_result() {
        let err = panicking_handler()
            .handle(CalculateCommand {
                method: Method::Topsis,
                problem: problem(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CalculationFailed);
        assert_eq!(err.details.get("method"), Some(&"TOPSIS".to_string()));
    }

    #[test]
    fn handle_blocking_converts_panic_into_no_result() {
        let err = panicking_handler()
            .handle_blocking(CalculateCommand {
                method: Method::Topsis,
                problem: problem(),
            })
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CalculationFailed);
    }

    #[test]
    fn handle_blocking_matches_async_result() {
        let cmd = CalculateCommand {
            method: Method::Promethee,
            problem: problem(),
        };
        let blocking = handler().handle_blocking(cmd.clone()).unwrap();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let asynchronous = runtime.block_on(handler().handle(cmd)).unwrap();

        assert_eq!(blocking, asynchronous);
    }
}
