//! The eight ranking methods.
//!
//! Each engine follows the same trace shape: raw matrix, normalization,
//! weighting or aggregation, and a final single-column score step. Pairwise
//! and distance methods record extra intermediate matrices in between.

mod ahp;
mod electre;
mod moora;
mod promethee;
mod saw;
mod topsis;
mod vikor;
mod wp;

pub use ahp::{principal_eigenvector, random_index, AhpEngine, Consistency, CONSISTENCY_RATIO_LIMIT};
pub use electre::{ElectreEngine, ElectreThresholds};
pub use moora::MooraEngine;
pub use promethee::{PreferenceFunction, PrometheeEngine};
pub use saw::SawEngine;
pub use topsis::TopsisEngine;
pub use vikor::{VikorEngine, DEFAULT_V};
pub use wp::{WpEngine, WpNormalization};
