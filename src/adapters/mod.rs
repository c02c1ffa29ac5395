//! Adapters - Connections between the engine and the outside world.

pub mod problem_file;
