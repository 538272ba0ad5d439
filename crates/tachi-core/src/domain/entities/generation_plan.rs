use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::common::RelativePath, error::DomainError, value_objects::WorkflowKind,
};

pub const WORKFLOWS_DIR: &str = ".github/workflows";
pub const SERVICE_CONFIGS_DIR: &str = "container-apps/configs";
pub const SETUP_GUIDE: &str = "SETUP.md";

/// Category of a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "name", rename_all = "kebab-case")]
pub enum ArtifactKind {
    Workflow(WorkflowKind),
    ServiceConfig(String),
    SetupGuide,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workflow(kind) => write!(f, "workflow {kind}"),
            Self::ServiceConfig(service) => write!(f, "service config {service}"),
            Self::SetupGuide => f.write_str("setup guide"),
        }
    }
}

/// Rendered files ready to be written, relative to an output directory.
///
/// This is the output of rendering. It contains no business logic, only data.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    pub(crate) files: Vec<PlannedFile>,
}

#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub path: RelativePath,
    pub artifact: ArtifactKind,
    pub content: String,
}

impl PlannedFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: RelativePath, artifact: ArtifactKind, content: String) {
        self.files.push(PlannedFile {
            path,
            artifact,
            content,
        });
    }

    pub fn with_file(mut self, path: RelativePath, artifact: ArtifactKind, content: String) -> Self {
        self.add(path, artifact, content);
        self
    }

    /// A plan must be non-empty and never write the same path twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyPlan);
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter()
    }

    pub fn get(&self, path: &str) -> Option<&PlannedFile> {
        self.files
            .iter()
            .find(|f| f.path.as_path() == std::path::Path::new(path))
    }

    pub fn workflows(&self) -> impl Iterator<Item = WorkflowKind> + '_ {
        self.files.iter().filter_map(|f| match f.artifact {
            ArtifactKind::Workflow(kind) => Some(kind),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
