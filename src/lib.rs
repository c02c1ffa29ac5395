//! MCDA Engine - Multi-criteria decision analysis
//!
//! This crate ranks alternatives against weighted benefit and cost criteria
//! with SAW, WP, TOPSIS, AHP, ELECTRE, PROMETHEE, MOORA and VIKOR, recording
//! every intermediate matrix so a result can be audited step by step.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
