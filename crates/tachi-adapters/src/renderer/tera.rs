//! Tera-backed [`ArtifactRenderer`] with templates compiled into the binary.
//!
//! GitHub expressions (`${{ ... }}`) are wrapped in `{% raw %}` blocks inside
//! the templates so Tera leaves them alone.

use serde::Serialize;
use tera::{Context, Tera};
use tracing::{debug, instrument};

use tachi_core::{
    application::{ApplicationError, ports::ArtifactRenderer},
    domain::{ProdTrigger, ProjectConfig, Service, WorkflowKind},
    error::{TachiError, TachiResult},
};

const PR_DEPLOY: &str = "workflows/pr-deploy.yaml";
const STAGE_DEPLOY: &str = "workflows/stage-deploy.yaml";
const PROD_DEPLOY_MAIN: &str = "workflows/prod-deploy-main.yaml";
const PROD_DEPLOY_RELEASE: &str = "workflows/prod-deploy-release.yaml";
const PR_CLEANUP: &str = "workflows/pr-cleanup.yaml";
const SERVICE_CONFIG: &str = "container-apps/app.yaml";
const SETUP_GUIDE: &str = "SETUP.md";

const TEMPLATES: &[(&str, &str)] = &[
    (PR_DEPLOY, include_str!("../../templates/workflows/pr-deploy.yaml")),
    (STAGE_DEPLOY, include_str!("../../templates/workflows/stage-deploy.yaml")),
    (PROD_DEPLOY_MAIN, include_str!("../../templates/workflows/prod-deploy-main.yaml")),
    (PROD_DEPLOY_RELEASE, include_str!("../../templates/workflows/prod-deploy-release.yaml")),
    (PR_CLEANUP, include_str!("../../templates/workflows/pr-cleanup.yaml")),
    ("partials/env.yaml", include_str!("../../templates/partials/env.yaml")),
    ("partials/setup-steps.yaml", include_str!("../../templates/partials/setup-steps.yaml")),
    ("partials/deploy-services.yaml", include_str!("../../templates/partials/deploy-services.yaml")),
    (SERVICE_CONFIG, include_str!("../../templates/container-apps/app.yaml")),
    (SETUP_GUIDE, include_str!("../../templates/SETUP.md")),
];

/// Placeholder written into service configs in place of an environment name.
const ENVIRONMENT_PLACEHOLDER: &str = "{{ environment }}";
const NOT_CONFIGURED: &str = "Not configured";

/// Renders every artifact from the embedded templates.
#[derive(Debug)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    pub fn new() -> TachiResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .map_err(|e| TachiError::Internal {
                message: format!("embedded templates failed to compile: {}", tera_error_detail(&e)),
            })?;
        Ok(Self { tera })
    }

    fn render(&self, template: &str, context: &Context, artifact: String) -> TachiResult<String> {
        let rendered = self.tera.render(template, context).map_err(|e| {
            ApplicationError::RenderingFailed {
                artifact,
                reason: tera_error_detail(&e),
            }
        })?;
        debug!(template, bytes = rendered.len(), "Template rendered");
        Ok(rendered)
    }
}

// ── Template context ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProjectView<'a> {
    name: &'a str,
    strategy: &'a str,
}

#[derive(Serialize)]
struct AzureView<'a> {
    resource_group: &'a str,
    registry: &'a str,
    location: &'a str,
    registry_server: String,
    monitoring_enabled: bool,
}

#[derive(Serialize)]
struct ServiceView<'a> {
    #[serde(flatten)]
    service: &'a Service,
    /// `{project}-{service}`
    app_name: String,
    /// Always carries a decimal point: `1.0`, not `1`.
    cpu_cores: String,
}

impl<'a> ServiceView<'a> {
    fn new(config: &ProjectConfig, service: &'a Service) -> Self {
        Self {
            service,
            app_name: config.resource_name(service),
            cpu_cores: format!("{:?}", service.cpu),
        }
    }
}

/// Where a workflow deploys to.
#[derive(Serialize)]
struct DeployTarget {
    environment: String,
    image_tag: &'static str,
    app_suffix: &'static str,
}

impl DeployTarget {
    fn for_workflow(kind: WorkflowKind, config: &ProjectConfig) -> Self {
        let project = &config.name;
        match kind {
            WorkflowKind::PrDeploy | WorkflowKind::PrCleanup => Self {
                environment: config.pr_environment_name("${PR_NUM}"),
                image_tag: "pr-${PR_NUM}",
                app_suffix: "-pr-${PR_NUM}",
            },
            WorkflowKind::StageDeploy => Self {
                environment: format!("{project}-stage"),
                image_tag: "${GITHUB_SHA}",
                app_suffix: "-stage",
            },
            WorkflowKind::ProdDeploy => Self {
                environment: format!("{project}-prod"),
                image_tag: match config.resolved_strategy().prod_trigger() {
                    ProdTrigger::MergeToMain => "${GITHUB_SHA}",
                    ProdTrigger::TagPush => "${GITHUB_REF_NAME}",
                },
                app_suffix: "",
            },
        }
    }
}

#[derive(Serialize)]
struct Monitoring<'a> {
    workspace_id: &'a str,
    workspace_key: &'a str,
}

fn base_context(config: &ProjectConfig) -> Context {
    let mut context = Context::new();
    context.insert(
        "project",
        &ProjectView {
            name: &config.name,
            strategy: &config.strategy,
        },
    );
    context.insert(
        "azure",
        &AzureView {
            resource_group: &config.azure.resource_group,
            registry: &config.azure.registry,
            location: &config.azure.location,
            registry_server: config.azure.registry_server(),
            monitoring_enabled: config.azure.monitoring_enabled(),
        },
    );
    let services: Vec<_> = config
        .services
        .iter()
        .map(|service| ServiceView::new(config, service))
        .collect();
    context.insert("services", &services);
    context
}

fn workflow_template(kind: WorkflowKind, config: &ProjectConfig) -> &'static str {
    match kind {
        WorkflowKind::PrDeploy => PR_DEPLOY,
        WorkflowKind::StageDeploy => STAGE_DEPLOY,
        WorkflowKind::ProdDeploy => match config.resolved_strategy().prod_trigger() {
            ProdTrigger::MergeToMain => PROD_DEPLOY_MAIN,
            ProdTrigger::TagPush => PROD_DEPLOY_RELEASE,
        },
        WorkflowKind::PrCleanup => PR_CLEANUP,
    }
}

impl ArtifactRenderer for TeraRenderer {
    #[instrument(skip(self, config), fields(strategy = %config.strategy))]
    fn render_workflow(&self, kind: WorkflowKind, config: &ProjectConfig) -> TachiResult<String> {
        let mut context = base_context(config);
        context.insert("target", &DeployTarget::for_workflow(kind, config));
        self.render(
            workflow_template(kind, config),
            &context,
            format!("workflow {kind}"),
        )
    }

    fn render_service_config(
        &self,
        config: &ProjectConfig,
        service: &Service,
    ) -> TachiResult<String> {
        let mut context = base_context(config);
        context.insert("service", &ServiceView::new(config, service));
        context.insert("app_name", &config.resource_name(service));
        context.insert("environment", ENVIRONMENT_PLACEHOLDER);
        self.render(
            SERVICE_CONFIG,
            &context,
            format!("service config {}", service.name),
        )
    }

    fn render_setup_guide(&self, config: &ProjectConfig) -> TachiResult<String> {
        let mut context = base_context(config);
        let azure = &config.azure;
        context.insert(
            "monitoring",
            &Monitoring {
                workspace_id: azure.log_analytics_workspace_id.as_deref().unwrap_or(NOT_CONFIGURED),
                workspace_key: azure.log_analytics_workspace_key.as_deref().unwrap_or(NOT_CONFIGURED),
            },
        );
        context.insert("strategy_description", config.resolved_strategy().description());
        let workflows: Vec<&str> = config.workflows().iter().map(|k| k.as_str()).collect();
        context.insert("workflows", &workflows);
        self.render(SETUP_GUIDE, &context, "setup guide".into())
    }
}

/// Flatten a Tera error and its sources into one line.
fn tera_error_detail(e: &tera::Error) -> String {
    use std::error::Error;

    let mut details = vec![e.to_string()];
    let mut source = e.source();
    while let Some(err) = source {
        details.push(err.to_string());
        source = err.source();
    }
    details.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tachi_core::domain::AzureConfig;

    fn renderer() -> TeraRenderer {
        TeraRenderer::new().unwrap()
    }

    fn config(strategy: &str) -> ProjectConfig {
        ProjectConfig::new("shop", strategy, AzureConfig::new("shop-rg", "shopacr"))
            .with_service(Service::new("web").with_port(3000))
            .with_service(Service::new("api").internal())
    }

    #[test]
    fn every_embedded_template_compiles() {
        let renderer = renderer();
        for (name, _) in TEMPLATES {
            assert!(renderer.tera.get_template_names().any(|n| n == *name));
        }
    }

    #[test]
    fn pr_deploy_targets_pull_requests() {
        let out = renderer()
            .render_workflow(WorkflowKind::PrDeploy, &config("trunk-direct"))
            .unwrap();

        assert!(out.contains("pull_request:"));
        assert!(out.contains("shop-pr-${PR_NUM}"));
        assert!(out.contains("${{ github.event.pull_request.number }}"));
        assert!(out.contains("${{ secrets.AZURE_CREDENTIALS }}"));
        assert!(out.contains("REGISTRY: shopacr.azurecr.io"));
        assert!(out.contains("--name \"shop-web-pr-${PR_NUM}\""));
        assert!(out.contains("--target-port 3000"));
        assert!(out.contains("--ingress internal"));
    }

    #[test]
    fn trunk_direct_prod_deploys_on_main() {
        let out = renderer()
            .render_workflow(WorkflowKind::ProdDeploy, &config("trunk-direct"))
            .unwrap();

        assert!(out.contains("name: Deploy to Production"));
        assert!(out.contains("branches:"));
        assert!(out.contains("- main"));
        assert!(!out.contains("tags:"));
    }

    #[test]
    fn release_strategies_deploy_prod_on_tags() {
        for strategy in ["trunk-release", "trunk-release-stage"] {
            let out = renderer()
                .render_workflow(WorkflowKind::ProdDeploy, &config(strategy))
                .unwrap();

            assert!(out.contains("name: Deploy to Production"));
            assert!(out.contains("tags:"));
            assert!(out.contains("'v*'"));
            assert!(out.contains("${GITHUB_REF_NAME}"));
        }
    }

    #[test]
    fn unknown_strategy_renders_like_trunk_direct() {
        let renderer = renderer();
        let fallback = renderer
            .render_workflow(WorkflowKind::ProdDeploy, &config("nonsense"))
            .unwrap();
        let direct = renderer
            .render_workflow(WorkflowKind::ProdDeploy, &config("trunk-direct"))
            .unwrap();

        assert_eq!(fallback, direct);
    }

    #[test]
    fn stage_deploy_runs_on_main() {
        let out = renderer()
            .render_workflow(WorkflowKind::StageDeploy, &config("trunk-release-stage"))
            .unwrap();

        assert!(out.contains("name: Deploy to Staging"));
        assert!(out.contains("- main"));
        assert!(out.contains("shop-stage"));
    }

    #[test]
    fn cleanup_runs_on_close() {
        let out = renderer()
            .render_workflow(WorkflowKind::PrCleanup, &config("trunk-direct"))
            .unwrap();

        assert!(out.contains("types: [closed]"));
        assert!(out.contains("shop-api-pr-${PR_NUM}"));
    }

    #[test]
    fn monitoring_secrets_only_when_configured() {
        let mut with_logs = config("trunk-direct");
        with_logs.azure.log_analytics_workspace_id = Some("ws-id".into());
        let renderer = renderer();

        let on = renderer
            .render_workflow(WorkflowKind::PrDeploy, &with_logs)
            .unwrap();
        let off = renderer
            .render_workflow(WorkflowKind::PrDeploy, &config("trunk-direct"))
            .unwrap();

        assert!(on.contains("--logs-workspace-id"));
        assert!(!off.contains("LOG_ANALYTICS_WORKSPACE_ID"));
    }

    #[test]
    fn service_config_keeps_environment_placeholder() {
        let config = config("trunk-direct");
        let out = renderer()
            .render_service_config(&config, &config.services[1])
            .unwrap();

        assert!(out.contains("name: shop-api"));
        assert!(out.contains("external: false"));
        assert!(out.contains("targetPort: 8000"));
        assert!(out.contains("{{ environment }}"));
        assert!(out.contains("image: shopacr.azurecr.io/shop-api:latest"));
    }

    #[test]
    fn whole_cpu_values_keep_decimal_point() {
        let mut config = config("trunk-direct");
        config.services[0].cpu = 1.0;
        let renderer = renderer();

        let app = renderer
            .render_service_config(&config, &config.services[0])
            .unwrap();
        let workflow = renderer
            .render_workflow(WorkflowKind::PrDeploy, &config)
            .unwrap();
        let guide = renderer.render_setup_guide(&config).unwrap();

        assert!(app.contains("cpu: 1.0"), "{app}");
        assert!(workflow.contains("--cpu 1.0 "), "{workflow}");
        assert!(workflow.contains("--cpu 0.25 "), "{workflow}");
        assert!(guide.contains("- CPU: 1.0"), "{guide}");
    }

    #[test]
    fn setup_guide_lists_secrets_and_services() {
        let out = renderer()
            .render_setup_guide(&config("trunk-release-stage"))
            .unwrap();

        assert!(out.starts_with("# Setup Instructions for shop"));
        assert!(out.contains("`REGISTRY_LOGIN_SERVER`: shopacr.azurecr.io"));
        assert!(out.contains("`AZURE_RESOURCE_GROUP`: shop-rg"));
        assert!(out.contains("`AZURE_LOCATION`: eastus"));
        assert!(out.contains("`LOG_ANALYTICS_WORKSPACE_ID`: Not configured"));
        assert!(out.contains("### web"));
        assert!(out.contains("- Port: 3000"));
        assert!(out.contains("- Max replicas: 10"));
        assert!(out.contains("**trunk-release-stage**"));
        assert!(out.contains(".github/workflows/stage-deploy.yaml"));
    }
}
