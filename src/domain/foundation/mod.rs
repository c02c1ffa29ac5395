//! Foundation module - Shared domain primitives.

mod errors;

pub use errors::{DomainError, ErrorCode, ValidationError};
