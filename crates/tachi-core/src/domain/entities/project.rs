//! The `ProjectConfig` aggregate root.
//!
//! A `ProjectConfig` is built once per invocation from a decoded document,
//! validated, and then only read. Parsing is deliberately forgiving: missing
//! keys take their defaults and unknown keys are ignored, so a bad config
//! still produces a model whose problems [`ProjectConfig::validate`] can list
//! in one pass.
//!
//! # Domain purity
//!
//! This module must not import `tracing` and never touches a path. Decoding
//! the document's syntax (YAML, JSON) is the caller's job; this module only
//! sees a serde `Deserializer`.

use std::collections::HashSet;
use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{MapAccess, Visitor, value::MapAccessDeserializer},
};

use crate::domain::{
    defaults,
    entities::{AzureConfig, Service},
    error::DomainError,
    strategies,
    validation::{Advisory, IssueKind, ValidationIssue},
    value_objects::{Strategy, WorkflowKind},
};

/// Aggregate root: everything needed to generate a project's pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Prefix for every generated Azure resource name.
    #[serde(default = "defaults::project_name")]
    pub name: String,
    /// Raw strategy string; see [`ProjectConfig::strategy_kind`].
    #[serde(default = "defaults::strategy")]
    pub strategy: String,
    #[serde(default)]
    pub azure: AzureConfig,
    /// Declaration order is generation order.
    #[serde(default)]
    pub services: Vec<Service>,
}

impl ProjectConfig {
    pub fn new(
        name: impl Into<String>,
        strategy: impl Into<String>,
        azure: AzureConfig,
    ) -> Self {
        Self {
            name: name.into(),
            strategy: strategy.into(),
            azure,
            services: Vec::new(),
        }
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Build a model from any structured document.
    ///
    /// Fails only when the document is not a mapping or a field holds a
    /// structurally impossible value (a list where a port is expected, say).
    /// Constraint violations are left for [`validate`](Self::validate).
    pub fn from_document<'de, D>(document: D) -> Result<Self, DomainError>
    where
        D: Deserializer<'de>,
    {
        document
            .deserialize_map(MappingOnly)
            .map_err(|e| DomainError::MalformedInput {
                reason: e.to_string(),
            })
    }

    /// The strategy, if the raw string names a known one.
    pub fn strategy_kind(&self) -> Option<Strategy> {
        self.strategy.parse().ok()
    }

    /// The strategy used for generation; unknown values fall back.
    pub fn resolved_strategy(&self) -> Strategy {
        strategies::resolve_strategy(&self.strategy)
    }

    /// Workflows to generate for this project, in order.
    pub fn workflows(&self) -> Vec<WorkflowKind> {
        strategies::workflows_for(&self.strategy)
    }

    /// `{project}-{service}`, the container app name for a service.
    pub fn resource_name(&self, service: &Service) -> String {
        format!("{}-{}", self.name, service.name)
    }

    /// Name of the ephemeral environment for a pull request.
    pub fn pr_environment_name(&self, pr_number: impl std::fmt::Display) -> String {
        format!("{}-pr-{}", self.name, pr_number)
    }

    /// Check every project constraint.
    ///
    /// Order: strategy, duplicate names, then each service's issues in
    /// declaration order. Nothing short-circuits.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.strategy_kind().is_none() {
            issues.push(ValidationIssue::project(
                IssueKind::InvalidStrategy,
                format!(
                    "Invalid strategy: {}. Must be one of: {}",
                    self.strategy,
                    strategies::valid_strategy_names()
                ),
            ));
        }

        let mut seen = HashSet::new();
        if !self.services.iter().all(|s| seen.insert(s.name.as_str())) {
            issues.push(ValidationIssue::project(
                IssueKind::DuplicateServiceNames,
                "Duplicate service names found",
            ));
        }

        for service in &self.services {
            issues.extend(service.validate());
        }

        issues
    }

    /// Plain messages of [`validate`](Self::validate), same order.
    pub fn validation_messages(&self) -> Vec<String> {
        self.validate().into_iter().map(|i| i.message).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Notices that do not make the config invalid.
    ///
    /// Empty identifiers are accepted by `validate` but render resource names
    /// and registry hosts that cannot work in Azure.
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut advisories = Vec::new();

        if self.name.trim().is_empty() {
            advisories.push(Advisory {
                field: "name",
                message: "Project name is empty; resource names will start with '-'".into(),
            });
        }
        if self.azure.resource_group.trim().is_empty() {
            advisories.push(Advisory {
                field: "azure.resource_group",
                message: "azure.resource_group is empty".into(),
            });
        }
        if self.azure.registry.trim().is_empty() {
            advisories.push(Advisory {
                field: "azure.registry",
                message: "azure.registry is empty; images would push to '.azurecr.io'".into(),
            });
        }

        advisories
    }
}

/// Accepts only a mapping at the top level.
///
/// The derived impl also takes a sequence and fills fields by position.
struct MappingOnly;

impl<'de> Visitor<'de> for MappingOnly {
    type Value = ProjectConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of project settings")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        ProjectConfig::deserialize(MapAccessDeserializer::new(map))
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: defaults::project_name(),
            strategy: defaults::strategy(),
            azure: AzureConfig::default(),
            services: Vec::new(),
        }
    }
}
