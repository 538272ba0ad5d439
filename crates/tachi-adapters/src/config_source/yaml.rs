//! YAML project descriptions.

use std::io;
use std::path::Path;

use tracing::{debug, instrument};

use tachi_core::{
    application::{ApplicationError, ports::ConfigSource},
    domain::ProjectConfig,
    error::TachiResult,
};

/// Reads `tachi.yaml`-style files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigSource;

impl YamlConfigSource {
    pub fn new() -> Self {
        Self
    }

    /// Decode a YAML document without touching the disk.
    ///
    /// Syntax errors, an empty document and a top level that is not a
    /// mapping all surface as `DomainError::MalformedInput`.
    pub fn parse_str(&self, text: &str) -> TachiResult<ProjectConfig> {
        let config = ProjectConfig::from_document(serde_yaml::Deserializer::from_str(text))?;
        Ok(config)
    }
}

impl ConfigSource for YamlConfigSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> TachiResult<ProjectConfig> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::ConfigNotFound {
                path: path.to_path_buf(),
            },
            _ => ApplicationError::ConfigReadFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        debug!(bytes = text.len(), "Read configuration file");
        self.parse_str(&text)
    }
}
