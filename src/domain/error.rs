//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid archive requests.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown archive operation: {0}")]
    UnknownOperation(String),

    #[error("no binary resolved for: {0}")]
    BinaryNotResolved(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
