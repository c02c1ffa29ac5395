//! Calculation command handler and presentation state.

mod calculate;
mod state;

pub use calculate::{CalculateCommand, CalculateHandler};
pub use state::CalculationState;
