//! Problem file adapter - Reads decision problems and writes results on disk.

mod loader;

pub use loader::{load_problem, parse_problem, save_result, ProblemFileError, ProblemFormat};
