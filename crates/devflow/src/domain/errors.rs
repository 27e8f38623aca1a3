//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn unknown_variant(kind: &str, value: &str) -> Self {
        Self::Validation(format!("unknown {}: {}", kind, value))
    }
}
