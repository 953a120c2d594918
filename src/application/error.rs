//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{ArchiveOperation, DomainError};
use crate::infrastructure::InfraError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("archive module unavailable: none of {} found", .binaries.join(", "))]
    ModuleUnavailable { binaries: Vec<String> },

    #[error("{operation} unavailable: {} not found", .binaries.join(" or "))]
    CapabilityUnavailable {
        operation: ArchiveOperation,
        binaries: Vec<String>,
    },

    #[error("{operation}: {source}")]
    Execution {
        operation: ArchiveOperation,
        #[source]
        source: Box<InfraError>,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Capability error listing the binaries `operation` needs.
    pub fn capability_unavailable(operation: ArchiveOperation) -> Self {
        Self::CapabilityUnavailable {
            operation,
            binaries: operation
                .required_binaries()
                .iter()
                .map(|b| b.to_string())
                .collect(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
