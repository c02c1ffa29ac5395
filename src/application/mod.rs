//! Application layer - Commands and Handlers.
//!
//! This layer validates input, dispatches to the domain engines and turns
//! every failure into a [`DomainError`](crate::domain::foundation::DomainError).

pub mod handlers;

pub use handlers::{CalculateCommand, CalculateHandler, CalculationState};
