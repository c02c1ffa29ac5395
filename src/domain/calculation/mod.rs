//! Calculation Module - Multi-criteria ranking engine.
//!
//! Ranks the alternatives of a [`DecisionProblem`] with one of eight published
//! MCDA methods and records every intermediate matrix as a [`CalculationStep`].
//!
//! # Components
//!
//! - `DecisionProblem` - Alternatives, criteria, raw matrix, weights, orientations
//! - `StepTrace` - Append-only record of named matrix snapshots
//! - `normalization` - Shared normalization strategies
//! - `methods` - SAW, WP, TOPSIS, AHP, ELECTRE, PROMETHEE, MOORA, VIKOR
//! - `ranking` - Stable ordering and conclusion text
//! - `EngineRegistry` - Method to engine lookup
//!
//! # Design Philosophy
//!
//! Engines are pure functions of their input: no I/O, no shared mutable state.
//! Numeric degeneracies (zero columns, zero weights, a single alternative)
//! produce defined scores instead of errors.

mod dispatcher;
mod engine;
mod errors;
mod method;
pub mod methods;
pub mod normalization;
mod problem;
pub mod ranking;
mod result;
mod step;

pub use dispatcher::{get_engine, EngineRegistry, MethodOptions};
pub use engine::CalculationEngine;
pub use errors::CalculationError;
pub use method::{Method, RankDirection};
pub use problem::{CriterionType, DecisionProblem, DecisionProblemBuilder, WEIGHT_SUM_TOLERANCE};
pub use ranking::{build_conclusion, rank, rank_order};
pub use result::{CalculationResult, ScoreEntry};
pub use step::{CalculationStep, StepTrace};
