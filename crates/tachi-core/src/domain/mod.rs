//! Core domain layer for tachi.
//!
//! Pure configuration logic: the project model, its defaults, validation and
//! the strategy resolver. All I/O, templating and rendering concerns are
//! handled via ports (traits) defined in the application layer.
//!
//! - **No I/O**: documents arrive as serde deserializers, never as paths
//! - **No tracing**: observability belongs to the application and CLI layers
//! - **Accumulating validation**: problems are returned as data, not raised
//! - **One strategy table**: validity and resolution share `STRATEGY_REGISTRY`

pub mod defaults;
pub mod entities;
pub mod error;
pub mod strategies;
pub mod validation;
pub mod value_objects;

pub use entities::{
    AzureConfig, ProjectConfig, Service,
    common::RelativePath,
    generation_plan::{
        ArtifactKind, GenerationPlan, PlannedFile, SERVICE_CONFIGS_DIR, SETUP_GUIDE,
        WORKFLOWS_DIR,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use strategies::{STRATEGY_REGISTRY, StrategyDef, resolve_strategy, workflows_for};

pub use validation::{Advisory, Checked, DomainValidator, IssueKind, ValidationIssue};

pub use value_objects::{ProdTrigger, Strategy, UnknownStrategy, WorkflowKind};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn strategy_parses_exact_names() {
        assert_eq!(Strategy::from_str("trunk-direct").unwrap(), Strategy::TrunkDirect);
        assert_eq!(Strategy::from_str("trunk-release").unwrap(), Strategy::TrunkRelease);
        assert_eq!(
            Strategy::from_str("trunk-release-stage").unwrap(),
            Strategy::TrunkReleaseStage
        );
        assert!(Strategy::from_str("Trunk-Direct").is_err());
        assert!(Strategy::from_str("basic").is_err());
    }

    #[test]
    fn strategy_display_round_trips_through_registry() {
        for strategy in Strategy::all() {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn workflow_file_names() {
        assert_eq!(WorkflowKind::PrDeploy.file_name(), "pr-deploy.yaml");
        assert_eq!(WorkflowKind::StageDeploy.file_name(), "stage-deploy.yaml");
        assert_eq!(WorkflowKind::ProdDeploy.file_name(), "prod-deploy.yaml");
        assert_eq!(WorkflowKind::PrCleanup.file_name(), "pr-cleanup.yaml");
    }

    // ========================================================================
    // Validator Tests
    // ========================================================================

    #[test]
    fn check_keeps_model_and_issues_together() {
        let config = ProjectConfig::new("t", "nonsense", AzureConfig::new("rg", "reg"))
            .with_service(Service::new("api").with_port(0));

        let checked = DomainValidator::check(config.clone());

        assert!(!checked.is_valid());
        assert_eq!(checked.value, config);
        assert_eq!(checked.messages().len(), 2);
        assert!(checked.advisories.is_empty());
    }

    #[test]
    fn issue_serializes_with_kind_and_service() {
        let issue = &Service::new("api").with_cpu(0.0).validate()[0];
        let json = serde_json::to_value(issue).unwrap();

        assert_eq!(json["kind"], "non_positive_cpu");
        assert_eq!(json["service"], "api");
        assert_eq!(json["message"], "Service api: cpu must be greater than 0");
    }

    #[test]
    fn project_issue_omits_service_field() {
        let config = ProjectConfig::new("t", "bogus", AzureConfig::new("rg", "reg"));
        let json = serde_json::to_value(&config.validate()[0]).unwrap();
        assert!(json.get("service").is_none());
    }
}
