use serde::{Deserialize, Serialize};

use crate::domain::defaults;

/// Azure deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureConfig {
    #[serde(default = "defaults::resource_group")]
    pub resource_group: String,
    /// Registry name without the `.azurecr.io` suffix.
    #[serde(default = "defaults::registry")]
    pub registry: String,
    #[serde(default = "defaults::location")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_analytics_workspace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_analytics_workspace_key: Option<String>,
}

impl AzureConfig {
    pub fn new(resource_group: impl Into<String>, registry: impl Into<String>) -> Self {
        Self {
            resource_group: resource_group.into(),
            registry: registry.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Fully-qualified registry login server.
    pub fn registry_server(&self) -> String {
        format!("{}.azurecr.io", self.registry)
    }

    /// Log Analytics is wired up when either identifier is present.
    pub fn monitoring_enabled(&self) -> bool {
        self.log_analytics_workspace_id.is_some() || self.log_analytics_workspace_key.is_some()
    }
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            resource_group: defaults::resource_group(),
            registry: defaults::registry(),
            location: defaults::location(),
            log_analytics_workspace_id: None,
            log_analytics_workspace_key: None,
        }
    }
}
