//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured base URL is invalid or malformed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// An article carries no price history to resolve against.
    #[error("article has no price history")]
    EmptyPriceHistory,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
