//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use crate::domain::{ProjectConfig, Service, WorkflowKind};
use crate::error::TachiResult;

/// Port for loading a project description.
///
/// Implemented by:
/// - `tachi_adapters::YamlConfigSource` (YAML files)
///
/// Implementations own file I/O and syntax decoding, then hand the decoded
/// document to `ProjectConfig::from_document`.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigSource: Send + Sync {
    /// Load and parse, without validating.
    fn load(&self, path: &Path) -> TachiResult<ProjectConfig>;
}

/// Port for rendering generated artifacts.
///
/// Implemented by:
/// - `tachi_adapters::TeraRenderer` (embedded Tera templates)
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactRenderer: Send + Sync {
    /// Render one GitHub Actions workflow.
    ///
    /// Implementations must pick the production trigger from
    /// `config.resolved_strategy()`, not from `kind` alone.
    fn render_workflow(&self, kind: WorkflowKind, config: &ProjectConfig) -> TachiResult<String>;

    /// Render the container app configuration for one service.
    fn render_service_config(
        &self,
        config: &ProjectConfig,
        service: &Service,
    ) -> TachiResult<String>;

    /// Render the setup guide listing required secrets.
    fn render_setup_guide(&self, config: &ProjectConfig) -> TachiResult<String>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tachi_adapters::LocalFilesystem` (production)
/// - `tachi_adapters::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TachiResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> TachiResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> TachiResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
