//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building templating inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A placeholder matching rule is malformed.
    #[error("invalid placeholder pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The rejected pattern source.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// A data context could not be built from the given value.
    #[error("invalid data context: {0}")]
    InvalidContext(String),
}

impl DomainError {
    /// Creates an `InvalidPattern` error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
