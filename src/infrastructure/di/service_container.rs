//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ArchiveService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::template::TemplateRenderer;
use crate::infrastructure::traits::{
    BinaryLocator, CommandExecutor, PathLocator, RealCommandRunner, ShellExecutor,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Command execution collaborator
    pub executor: Arc<dyn CommandExecutor>,

    /// Binary search-path collaborator
    pub locator: Arc<dyn BinaryLocator>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let renderer = TemplateRenderer::with_vars(settings.template.vars.clone());
        let executor = ShellExecutor::new(Arc::new(RealCommandRunner), renderer, &settings.shell)
            .with_search_path(settings.search_path.clone());
        let locator = PathLocator::new(settings.search_path.clone());
        Self::with_deps(settings, Arc::new(executor), Arc::new(locator))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        executor: Arc<dyn CommandExecutor>,
        locator: Arc<dyn BinaryLocator>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            executor,
            locator,
        }
    }

    /// Build the archive service; fails when no archive tool is installed.
    pub fn archive_service(&self) -> ApplicationResult<ArchiveService> {
        ArchiveService::new(
            self.executor.clone(),
            self.locator.clone(),
            self.settings.clone(),
        )
    }
}
