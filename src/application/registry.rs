//! Operation registry: which archive operations this host can run
//!
//! Every [`ArchiveOperation`] is registered under its name and alias at
//! startup, and its capability (the binaries it needs) is resolved once.
//! An operation whose binaries are all missing stays registered but is
//! reported unavailable. If no archive binary is present at all the
//! registry refuses to load.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ArchiveOperation, DomainError};
use crate::infrastructure::traits::BinaryLocator;

/// Registration entry for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredOperation {
    pub operation: ArchiveOperation,
    /// Binary satisfying the capability at load time
    pub binary: Option<PathBuf>,
}

impl RegisteredOperation {
    pub fn is_available(&self) -> bool {
        self.binary.is_some()
    }
}

/// Explicit registration table for archive operations.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    names: BTreeMap<&'static str, ArchiveOperation>,
    entries: BTreeMap<ArchiveOperation, RegisteredOperation>,
}

impl OperationRegistry {
    /// Register all operations and resolve their capabilities.
    pub fn load(locator: &dyn BinaryLocator) -> ApplicationResult<Self> {
        let mut names = BTreeMap::new();
        let mut entries = BTreeMap::new();

        for op in ArchiveOperation::ALL {
            names.insert(op.name(), op);
            names.insert(op.alias(), op);

            let binary = locator.first_available_binary(op.required_binaries());
            debug!("load: operation={}, binary={:?}", op, binary);
            entries.insert(op, RegisteredOperation { operation: op, binary });
        }

        let registry = Self { names, entries };
        if registry.available().is_empty() {
            let mut binaries: Vec<String> = Vec::new();
            for binary in ArchiveOperation::ALL.iter().flat_map(|op| op.required_binaries()) {
                if !binaries.iter().any(|b| b == binary) {
                    binaries.push(binary.to_string());
                }
            }
            return Err(ApplicationError::ModuleUnavailable { binaries });
        }

        info!(
            "archive operations available: {}",
            registry
                .available()
                .iter()
                .map(|op| op.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(registry)
    }

    /// Look up an operation by name or alias.
    pub fn resolve(&self, name: &str) -> ApplicationResult<ArchiveOperation> {
        self.names
            .get(name.trim())
            .copied()
            .ok_or_else(|| DomainError::UnknownOperation(name.to_string()).into())
    }

    pub fn is_available(&self, op: ArchiveOperation) -> bool {
        self.entries.get(&op).is_some_and(RegisteredOperation::is_available)
    }

    /// Available operations in declaration order.
    pub fn available(&self) -> Vec<ArchiveOperation> {
        self.entries
            .values()
            .filter(|e| e.is_available())
            .map(|e| e.operation)
            .collect()
    }

    /// All registered operations, available or not.
    pub fn entries(&self) -> impl Iterator<Item = &RegisteredOperation> {
        self.entries.values()
    }

    /// Fail with [`ApplicationError::CapabilityUnavailable`] unless `op` can run.
    pub fn ensure_available(&self, op: ArchiveOperation) -> ApplicationResult<()> {
        if self.is_available(op) {
            Ok(())
        } else {
            Err(ApplicationError::capability_unavailable(op))
        }
    }
}
