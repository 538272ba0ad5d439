//! Config Service - load and check project descriptions.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::ConfigSource},
    domain::{Checked, DomainValidator as validator, ProjectConfig},
    error::TachiResult,
};

/// Loads project descriptions through a [`ConfigSource`] and validates them.
pub struct ConfigService {
    source: Box<dyn ConfigSource>,
}

impl ConfigService {
    pub fn new(source: Box<dyn ConfigSource>) -> Self {
        Self { source }
    }

    /// Load without validating.
    pub fn load(&self, path: &Path) -> TachiResult<ProjectConfig> {
        self.source.load(path)
    }

    /// Load and validate. Validation problems are returned as data.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn check(&self, path: &Path) -> TachiResult<Checked<ProjectConfig>> {
        let config = self.source.load(path)?;
        debug!(
            project = %config.name,
            strategy = %config.strategy,
            services = config.services.len(),
            "Configuration parsed"
        );

        let checked = validator::check(config);

        for advisory in &checked.advisories {
            warn!(field = advisory.field, "{}", advisory.message);
        }
        info!(issues = checked.issues.len(), "Configuration checked");

        Ok(checked)
    }

    /// Load and require a valid configuration.
    pub fn load_valid(&self, path: &Path) -> TachiResult<ProjectConfig> {
        let checked = self.check(path)?;
        if checked.is_valid() {
            Ok(checked.value)
        } else {
            Err(ApplicationError::InvalidConfiguration {
                issues: checked.issues,
            }
            .into())
        }
    }
}
