//! A single deployable service.

use serde::{Deserialize, Serialize};

use crate::domain::{
    defaults,
    validation::{IssueKind, ValidationIssue},
};

pub const PORT_MIN: i64 = 1;
pub const PORT_MAX: i64 = 65535;

/// One container app: image build inputs, ingress and scaling.
///
/// Numeric fields are wide signed integers so that out-of-range input
/// survives parsing and is reported by [`Service::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default = "defaults::service_name")]
    pub name: String,
    #[serde(default = "defaults::dockerfile")]
    pub dockerfile: String,
    #[serde(default = "defaults::port")]
    pub port: i64,
    #[serde(default = "defaults::external")]
    pub external: bool,
    #[serde(default = "defaults::cpu")]
    pub cpu: f64,
    #[serde(default = "defaults::memory")]
    pub memory: String,
    #[serde(default = "defaults::min_replicas")]
    pub min_replicas: i64,
    #[serde(default = "defaults::max_replicas")]
    pub max_replicas: i64,
    #[serde(default = "defaults::context")]
    pub context: String,
}

impl Service {
    /// A service with the given name and every other field defaulted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: i64) -> Self {
        self.port = port;
        self
    }

    pub fn with_cpu(mut self, cpu: f64) -> Self {
        self.cpu = cpu;
        self
    }

    pub fn with_replicas(mut self, min: i64, max: i64) -> Self {
        self.min_replicas = min;
        self.max_replicas = max;
        self
    }

    pub fn internal(mut self) -> Self {
        self.external = false;
        self
    }

    /// Check this service's own constraints.
    ///
    /// Checks run in a fixed order (port, cpu, min_replicas, replica bounds)
    /// and every failing check contributes one issue.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !(PORT_MIN..=PORT_MAX).contains(&self.port) {
            issues.push(ValidationIssue::service(
                IssueKind::PortOutOfRange,
                self,
                &format!("port must be between {PORT_MIN} and {PORT_MAX}"),
            ));
        }

        if self.cpu <= 0.0 {
            issues.push(ValidationIssue::service(
                IssueKind::NonPositiveCpu,
                self,
                "cpu must be greater than 0",
            ));
        }

        if self.min_replicas < 0 {
            issues.push(ValidationIssue::service(
                IssueKind::NegativeMinReplicas,
                self,
                "min_replicas cannot be negative",
            ));
        }

        if self.max_replicas < self.min_replicas {
            issues.push(ValidationIssue::service(
                IssueKind::ReplicaBoundsInverted,
                self,
                "max_replicas must be >= min_replicas",
            ));
        }

        issues
    }
}

impl Default for Service {
    fn default() -> Self {
        Self {
            name: defaults::service_name(),
            dockerfile: defaults::dockerfile(),
            port: defaults::port(),
            external: defaults::external(),
            cpu: defaults::cpu(),
            memory: defaults::memory(),
            min_replicas: defaults::min_replicas(),
            max_replicas: defaults::max_replicas(),
            context: defaults::context(),
        }
    }
}
