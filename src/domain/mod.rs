//! Domain layer containing calculation logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared error vocabulary
//! - `calculation` - Decision problems, the eight ranking methods and their traces

pub mod calculation;
pub mod foundation;
