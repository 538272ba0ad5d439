use std::fmt;

use serde::Serialize;

use crate::domain::entities::{ProjectConfig, Service};

/// What rule a [`ValidationIssue`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    InvalidStrategy,
    DuplicateServiceNames,
    PortOutOfRange,
    NonPositiveCpu,
    NegativeMinReplicas,
    ReplicaBoundsInverted,
}

/// One violated constraint.
///
/// `service` is set when the issue belongs to a single service. `Display`
/// writes the human-readable message only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn project(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            service: None,
            message: message.into(),
        }
    }

    pub fn service(kind: IssueKind, service: &Service, rule: &str) -> Self {
        Self {
            kind,
            service: Some(service.name.clone()),
            message: format!("Service {}: {}", service.name, rule),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A non-blocking notice about a config that validates but is probably
/// incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of checking a project: the model plus everything wrong with it.
///
/// The model is always present; an empty `issues` list means it is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub issues: Vec<ValidationIssue>,
    pub advisories: Vec<Advisory>,
}

impl<T> Checked<T> {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }
}

/// Centralized domain validation entry points.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project(config: &ProjectConfig) -> Vec<ValidationIssue> {
        config.validate()
    }

    /// Validate and collect advisories without consuming anything but the
    /// config itself.
    pub fn check(config: ProjectConfig) -> Checked<ProjectConfig> {
        let issues = config.validate();
        let advisories = config.advisories();
        Checked {
            value: config,
            issues,
            advisories,
        }
    }
}
