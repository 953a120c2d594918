//! Archive service
//!
//! Translates archive requests into one shell command each and hands them
//! to the execution collaborator. Arguments are not validated here; the
//! wrapped tool reports malformed input through its exit status.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, OperationRegistry};
use crate::config::Settings;
use crate::domain::{build_command, ArchiveCommand, ArchiveOperation, ArchiveRequest, ArgList};
use crate::infrastructure::traits::{BinaryLocator, CommandExecutor};

/// Archive operations over external tools.
pub struct ArchiveService {
    executor: Arc<dyn CommandExecutor>,
    locator: Arc<dyn BinaryLocator>,
    registry: OperationRegistry,
    settings: Arc<Settings>,
}

impl ArchiveService {
    /// Create a new archive service.
    ///
    /// Fails with [`ApplicationError::ModuleUnavailable`] when no archive
    /// binary can be found.
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        locator: Arc<dyn BinaryLocator>,
        settings: Arc<Settings>,
    ) -> ApplicationResult<Self> {
        let registry = OperationRegistry::load(locator.as_ref())?;
        Ok(Self {
            executor,
            locator,
            registry,
            settings,
        })
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn is_available(&self, op: ArchiveOperation) -> bool {
        self.registry.is_available(op)
    }

    /// Build the command line for `request` without running it.
    ///
    /// The template directive is applied, so the result is the exact line
    /// [`ArchiveService::run`] would hand to the shell.
    pub fn preview(&self, request: &ArchiveRequest) -> ApplicationResult<String> {
        let command = self.build(request)?;
        self.executor
            .render(&command, self.template_for(request))
            .map_err(|e| ApplicationError::Execution {
                operation: request.operation(),
                source: Box::new(e),
            })
    }

    /// Build and execute `request`, returning the tool's output lines.
    #[instrument(skip(self), fields(operation = %request.operation()))]
    pub fn run(&self, request: &ArchiveRequest) -> ApplicationResult<Vec<String>> {
        let command = self.build(request)?;
        let template = self.template_for(request);
        debug!(
            "run: command={}, cwd={:?}, template={:?}",
            command, request.working_directory, template
        );

        self.executor
            .execute(&command, request.working_directory.as_deref(), template)
            .map_err(|e| ApplicationError::Execution {
                operation: request.operation(),
                source: Box::new(e),
            })
    }

    fn build(&self, request: &ArchiveRequest) -> ApplicationResult<String> {
        let op = request.operation();
        self.registry.ensure_available(op)?;

        // unrar-or-rar is resolved per call, not from the load-time registry
        let unrar = match op {
            ArchiveOperation::Unrar => Some(
                self.locator
                    .first_available_binary(op.required_binaries())
                    .ok_or_else(|| ApplicationError::capability_unavailable(op))?,
            ),
            _ => None,
        };

        Ok(build_command(&request.command, unrar.as_deref())?)
    }

    /// Request engine first, then the configured default.
    fn template_for<'a>(&'a self, request: &'a ArchiveRequest) -> Option<&'a str> {
        request
            .template
            .as_deref()
            .or(self.settings.template.default_engine.as_deref())
    }

    /// Pack or unpack with `tar -<options> <tarfile> <sources>`.
    pub fn tar(
        &self,
        options: &str,
        tarfile: &str,
        sources: impl Into<ArgList>,
        cwd: Option<&Path>,
        template: Option<&str>,
    ) -> ApplicationResult<Vec<String>> {
        let request = ArchiveRequest::new(ArchiveCommand::Tar {
            options: options.to_string(),
            tarfile: tarfile.to_string(),
            sources: sources.into(),
        })
        .cwd(cwd.map(PathBuf::from))
        .template(template.map(String::from));
        self.run(&request)
    }

    /// Compress `sourcefile` with gzip.
    pub fn gzip(&self, sourcefile: &str, template: Option<&str>) -> ApplicationResult<Vec<String>> {
        let request = ArchiveRequest::new(ArchiveCommand::Gzip {
            sourcefile: sourcefile.to_string(),
        })
        .template(template.map(String::from));
        self.run(&request)
    }

    /// Decompress `gzipfile` with gunzip.
    pub fn gunzip(&self, gzipfile: &str, template: Option<&str>) -> ApplicationResult<Vec<String>> {
        let request = ArchiveRequest::new(ArchiveCommand::Gunzip {
            gzipfile: gzipfile.to_string(),
        })
        .template(template.map(String::from));
        self.run(&request)
    }

    /// Add `sources` to `zipfile` with zip.
    pub fn zip(
        &self,
        zipfile: &str,
        sources: impl Into<ArgList>,
        template: Option<&str>,
    ) -> ApplicationResult<Vec<String>> {
        let request = ArchiveRequest::new(ArchiveCommand::Zip {
            zipfile: zipfile.to_string(),
            sources: sources.into(),
        })
        .template(template.map(String::from));
        self.run(&request)
    }

    /// Extract `zipfile` into `dest`, skipping `excludes`.
    pub fn unzip(
        &self,
        zipfile: &str,
        dest: &str,
        excludes: Option<ArgList>,
        template: Option<&str>,
    ) -> ApplicationResult<Vec<String>> {
        let request = ArchiveRequest::new(ArchiveCommand::Unzip {
            zipfile: zipfile.to_string(),
            dest: dest.to_string(),
            excludes,
        })
        .template(template.map(String::from));
        self.run(&request)
    }

    /// Add `sources` to `rarfile` with `rar a -idp`.
    pub fn rar(
        &self,
        rarfile: &str,
        sources: impl Into<ArgList>,
        template: Option<&str>,
    ) -> ApplicationResult<Vec<String>> {
        let request = ArchiveRequest::new(ArchiveCommand::Rar {
            rarfile: rarfile.to_string(),
            sources: sources.into(),
        })
        .template(template.map(String::from));
        self.run(&request)
    }

    /// Extract `rarfile` into `dest` with unrar, or rar when unrar is missing.
    pub fn unrar(
        &self,
        rarfile: &str,
        dest: &str,
        excludes: Option<ArgList>,
        template: Option<&str>,
    ) -> ApplicationResult<Vec<String>> {
        let request = ArchiveRequest::new(ArchiveCommand::Unrar {
            rarfile: rarfile.to_string(),
            dest: dest.to_string(),
            excludes,
        })
        .template(template.map(String::from));
        self.run(&request)
    }
}
