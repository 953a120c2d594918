//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::infrastructure::template::TemplateRenderer;
use crate::infrastructure::{InfraError, InfraResult};

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments, optionally inside `cwd`, with extra
    /// environment variables set on the child.
    fn run(
        &self,
        cmd: &str,
        args: &[&str],
        cwd: Option<&Path>,
        env: &[(&str, OsString)],
    ) -> io::Result<Output>;
}

/// Executes a shell command line and captures its output.
pub trait CommandExecutor: Send + Sync {
    /// Render `command` through `template` when given, unchanged otherwise.
    fn render(&self, command: &str, template: Option<&str>) -> InfraResult<String>;

    /// Run `command`, rendering it through `template` first when given,
    /// inside `working_directory` when given.
    ///
    /// Returns captured stdout split into lines.
    fn execute(
        &self,
        command: &str,
        working_directory: Option<&Path>,
        template: Option<&str>,
    ) -> InfraResult<Vec<String>>;
}

/// Search-path lookup for external binaries.
pub trait BinaryLocator: Send + Sync {
    /// Full path of `name`, if found.
    fn binary_path(&self, name: &str) -> Option<PathBuf>;

    /// Full path of the first of `names` that is found, in order.
    fn first_available_binary(&self, names: &[&str]) -> Option<PathBuf> {
        names.iter().find_map(|name| self.binary_path(name))
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(
        &self,
        cmd: &str,
        args: &[&str],
        cwd: Option<&Path>,
        env: &[(&str, OsString)],
    ) -> io::Result<Output> {
        let mut command = std::process::Command::new(cmd);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        for (key, value) in env {
            command.env(key, value);
        }
        command.output()
    }
}

/// Runs command lines through `<shell> -c`.
///
/// Directories in `search_path` are put in front of the child's `PATH`, so
/// the shell finds the same binaries a [`PathLocator`] on that path finds.
pub struct ShellExecutor {
    runner: Arc<dyn CommandRunner>,
    renderer: TemplateRenderer,
    shell: String,
    search_path: Vec<PathBuf>,
}

impl ShellExecutor {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        renderer: TemplateRenderer,
        shell: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            renderer,
            shell: shell.into(),
            search_path: vec![],
        }
    }

    pub fn with_search_path(mut self, search_path: Vec<PathBuf>) -> Self {
        self.search_path = search_path;
        self
    }

    /// `PATH` for the child: `search_path` first, then the inherited `PATH`.
    fn child_path(&self) -> InfraResult<Option<OsString>> {
        if self.search_path.is_empty() {
            return Ok(None);
        }
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = self
            .search_path
            .iter()
            .cloned()
            .chain(std::env::split_paths(&inherited));
        let joined = std::env::join_paths(dirs).map_err(|e| {
            InfraError::io(
                "build PATH from search_path",
                io::Error::new(io::ErrorKind::InvalidInput, e),
            )
        })?;
        Ok(Some(joined))
    }
}

impl CommandExecutor for ShellExecutor {
    fn render(&self, command: &str, template: Option<&str>) -> InfraResult<String> {
        match template {
            Some(engine) => self.renderer.render(engine, command),
            None => Ok(command.to_string()),
        }
    }

    #[instrument(skip(self))]
    fn execute(
        &self,
        command: &str,
        working_directory: Option<&Path>,
        template: Option<&str>,
    ) -> InfraResult<Vec<String>> {
        let command = self.render(command, template)?;
        debug!("execute: shell={}, command={}", self.shell, command);

        let env: Vec<(&str, OsString)> = self
            .child_path()?
            .map(|path| vec![("PATH", path)])
            .unwrap_or_default();

        let output = self
            .runner
            .run(&self.shell, &["-c", &command], working_directory, &env)
            .map_err(|e| InfraError::io(format!("spawn {} -c {}", self.shell, command), e))?;

        if !output.status.success() {
            return Err(InfraError::Execution {
                command,
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(String::from)
            .collect())
    }
}

/// Binary lookup on `$PATH`, or on an explicit list of directories.
#[derive(Debug, Default, Clone)]
pub struct PathLocator {
    search_path: Vec<PathBuf>,
}

impl PathLocator {
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }
}

impl BinaryLocator for PathLocator {
    fn binary_path(&self, name: &str) -> Option<PathBuf> {
        let found = if self.search_path.is_empty() {
            which::which(name)
        } else {
            let paths = std::env::join_paths(&self.search_path).ok()?;
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            which::which_in(name, Some(paths), cwd)
        };
        debug!("binary_path: name={}, found={:?}", name, found.as_ref().ok());
        found.ok()
    }
}
