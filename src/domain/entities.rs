//! Domain entities: core data structures

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::DomainError;

/// A list of command arguments given either as one comma-delimited string
/// or as an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgList {
    /// `"a, b,c"` style input, split on `,` and trimmed on use
    Delimited(String),
    /// Explicit list, passed through unchanged
    List(Vec<String>),
}

impl ArgList {
    /// Normalize into a single sequence of arguments.
    ///
    /// Delimited input is split on `,` and every element is trimmed.
    /// List input is returned as-is.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            ArgList::Delimited(s) => s.split(',').map(|e| e.trim().to_string()).collect(),
            ArgList::List(v) => v.clone(),
        }
    }

    /// True for an empty list or a blank delimited string.
    pub fn is_empty(&self) -> bool {
        match self {
            ArgList::Delimited(s) => s.trim().is_empty(),
            ArgList::List(v) => v.is_empty(),
        }
    }

    /// Normalized arguments joined with a single space.
    pub fn joined(&self) -> String {
        self.normalize().join(" ")
    }

    /// Build from CLI values: a single value is treated as delimited,
    /// several values as a list.
    pub fn from_values(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            ArgList::Delimited(values.remove(0))
        } else {
            ArgList::List(values)
        }
    }
}

impl From<&str> for ArgList {
    fn from(s: &str) -> Self {
        ArgList::Delimited(s.to_string())
    }
}

impl From<String> for ArgList {
    fn from(s: String) -> Self {
        ArgList::Delimited(s)
    }
}

impl From<Vec<String>> for ArgList {
    fn from(v: Vec<String>) -> Self {
        ArgList::List(v)
    }
}

impl From<Vec<&str>> for ArgList {
    fn from(v: Vec<&str>) -> Self {
        ArgList::List(v.into_iter().map(String::from).collect())
    }
}

/// Logical archive operation, one per wrapped tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchiveOperation {
    /// Pack/unpack via `tar`
    Tar,
    /// Create a gzip file
    Gzip,
    /// Unpack a gzip file
    Gunzip,
    /// Create a zip file
    Zip,
    /// Unpack a zip file
    Unzip,
    /// Create a rar file
    Rar,
    /// Unpack a rar file (via `unrar`, falling back to `rar`)
    Unrar,
}

impl ArchiveOperation {
    pub const ALL: [ArchiveOperation; 7] = [
        ArchiveOperation::Tar,
        ArchiveOperation::Gzip,
        ArchiveOperation::Gunzip,
        ArchiveOperation::Zip,
        ArchiveOperation::Unzip,
        ArchiveOperation::Rar,
        ArchiveOperation::Unrar,
    ];

    /// Stable identifier, also the name the operation is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            ArchiveOperation::Tar => "tar",
            ArchiveOperation::Gzip => "gzip",
            ArchiveOperation::Gunzip => "gunzip",
            ArchiveOperation::Zip => "zip",
            ArchiveOperation::Unzip => "unzip",
            ArchiveOperation::Rar => "rar",
            ArchiveOperation::Unrar => "unrar",
        }
    }

    /// Logical alias accepted in addition to [`name`](Self::name).
    pub fn alias(&self) -> &'static str {
        match self {
            ArchiveOperation::Tar => "pack",
            ArchiveOperation::Gzip => "create-gzip",
            ArchiveOperation::Gunzip => "unpack-gzip",
            ArchiveOperation::Zip => "pack-zip",
            ArchiveOperation::Unzip => "unpack-zip",
            ArchiveOperation::Rar => "pack-rar",
            ArchiveOperation::Unrar => "unpack-rar",
        }
    }

    /// Binaries satisfying this operation, any-of, in preference order.
    pub fn required_binaries(&self) -> &'static [&'static str] {
        match self {
            ArchiveOperation::Tar => &["tar"],
            ArchiveOperation::Gzip => &["gzip"],
            ArchiveOperation::Gunzip => &["gunzip"],
            ArchiveOperation::Zip => &["zip"],
            ArchiveOperation::Unzip => &["unzip"],
            ArchiveOperation::Rar => &["rar"],
            ArchiveOperation::Unrar => &["unrar", "rar"],
        }
    }
}

impl fmt::Display for ArchiveOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArchiveOperation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ArchiveOperation::ALL
            .into_iter()
            .find(|op| op.name() == key || op.alias() == key)
            .ok_or_else(|| DomainError::UnknownOperation(s.to_string()))
    }
}

/// Operation-specific arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveCommand {
    Tar {
        /// Raw tar flag string without the leading dash, e.g. `cjvf`
        options: String,
        tarfile: String,
        sources: ArgList,
    },
    Gzip {
        sourcefile: String,
    },
    Gunzip {
        gzipfile: String,
    },
    Zip {
        zipfile: String,
        sources: ArgList,
    },
    Unzip {
        zipfile: String,
        dest: String,
        excludes: Option<ArgList>,
    },
    Rar {
        rarfile: String,
        sources: ArgList,
    },
    Unrar {
        rarfile: String,
        dest: String,
        excludes: Option<ArgList>,
    },
}

impl ArchiveCommand {
    pub fn operation(&self) -> ArchiveOperation {
        match self {
            ArchiveCommand::Tar { .. } => ArchiveOperation::Tar,
            ArchiveCommand::Gzip { .. } => ArchiveOperation::Gzip,
            ArchiveCommand::Gunzip { .. } => ArchiveOperation::Gunzip,
            ArchiveCommand::Zip { .. } => ArchiveOperation::Zip,
            ArchiveCommand::Unzip { .. } => ArchiveOperation::Unzip,
            ArchiveCommand::Rar { .. } => ArchiveOperation::Rar,
            ArchiveCommand::Unrar { .. } => ArchiveOperation::Unrar,
        }
    }
}

/// One archive call: what to run, where, and how to pre-render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    pub command: ArchiveCommand,
    /// Directory the command runs in (default: current directory)
    pub working_directory: Option<PathBuf>,
    /// Template engine used to render the command line before execution
    pub template: Option<String>,
}

impl ArchiveRequest {
    pub fn new(command: ArchiveCommand) -> Self {
        Self {
            command,
            working_directory: None,
            template: None,
        }
    }

    pub fn cwd(mut self, dir: Option<PathBuf>) -> Self {
        self.working_directory = dir;
        self
    }

    pub fn template(mut self, engine: Option<String>) -> Self {
        self.template = engine;
        self
    }

    pub fn operation(&self) -> ArchiveOperation {
        self.command.operation()
    }
}
