//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod calculation;

pub use calculation::{CalculateCommand, CalculateHandler, CalculationState};
