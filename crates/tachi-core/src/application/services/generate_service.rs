//! Generate Service - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Refuse configs that do not validate
//! 2. Resolve the strategy into workflow kinds
//! 3. Render every artifact into a [`GenerationPlan`]
//! 4. Write the plan, rolling back on failure

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactRenderer, Filesystem},
    },
    domain::{
        ArtifactKind, DomainValidator as validator, GenerationPlan, PlannedFile, ProjectConfig,
        RelativePath, SERVICE_CONFIGS_DIR, SETUP_GUIDE, WORKFLOWS_DIR,
    },
    error::TachiResult,
};

/// What a successful write produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub paths: Vec<PathBuf>,
    pub bytes_written: usize,
}

impl WriteSummary {
    pub fn files_written(&self) -> usize {
        self.paths.len()
    }
}

/// Main generation service.
pub struct GenerateService {
    renderer: Box<dyn ArtifactRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    pub fn new(renderer: Box<dyn ArtifactRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Render everything a config produces, without touching the filesystem.
    ///
    /// Order: workflows in strategy order, one config per service in
    /// declaration order, then `SETUP.md`.
    #[instrument(skip_all, fields(project = %config.name, strategy = %config.strategy))]
    pub fn plan(&self, config: &ProjectConfig) -> TachiResult<GenerationPlan> {
        let issues = validator::validate_project(config);
        if !issues.is_empty() {
            return Err(ApplicationError::InvalidConfiguration { issues }.into());
        }

        let mut plan = GenerationPlan::new();

        let workflows_dir = RelativePath::try_new(WORKFLOWS_DIR)?;
        for kind in config.workflows() {
            let content = self.renderer.render_workflow(kind, config)?;
            debug!(workflow = %kind, bytes = content.len(), "Workflow rendered");
            plan.add(
                workflows_dir.join(kind.file_name())?,
                ArtifactKind::Workflow(kind),
                content,
            );
        }

        let configs_dir = RelativePath::try_new(SERVICE_CONFIGS_DIR)?;
        for service in &config.services {
            let content = self.renderer.render_service_config(config, service)?;
            debug!(service = %service.name, bytes = content.len(), "Service config rendered");
            plan.add(
                configs_dir.join(format!("{}.yaml", service.name))?,
                ArtifactKind::ServiceConfig(service.name.clone()),
                content,
            );
        }

        let guide = self.renderer.render_setup_guide(config)?;
        plan.add(
            RelativePath::try_new(SETUP_GUIDE)?,
            ArtifactKind::SetupGuide,
            guide,
        );

        plan.validate()?;
        info!(files = plan.len(), "Generation planned");
        Ok(plan)
    }

    /// Plan and write in one step.
    pub fn generate(&self, config: &ProjectConfig, output_dir: &Path) -> TachiResult<WriteSummary> {
        let plan = self.plan(config)?;
        self.write(&plan, output_dir)
    }

    /// Write a plan under `output_dir`.
    pub fn write(&self, plan: &GenerationPlan, output_dir: &Path) -> TachiResult<WriteSummary> {
        self.write_observed(plan, output_dir, |_| {})
    }

    /// Write a plan, calling `on_written` after each file lands.
    ///
    /// On failure every file this call created is removed again; files that
    /// existed before are left as they are.
    #[instrument(skip_all, fields(output_dir = %output_dir.display(), files = plan.len()))]
    pub fn write_observed<F>(
        &self,
        plan: &GenerationPlan,
        output_dir: &Path,
        mut on_written: F,
    ) -> TachiResult<WriteSummary>
    where
        F: FnMut(&PlannedFile),
    {
        let mut created = Vec::new();

        match self.write_all(plan, output_dir, &mut created, &mut on_written) {
            Ok(summary) => {
                info!(files = summary.files_written(), "Successfully wrote all files");
                Ok(summary)
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(&created);
                Err(e)
            }
        }
    }

    fn write_all<F>(
        &self,
        plan: &GenerationPlan,
        output_dir: &Path,
        created: &mut Vec<PathBuf>,
        on_written: &mut F,
    ) -> TachiResult<WriteSummary>
    where
        F: FnMut(&PlannedFile),
    {
        let mut summary = WriteSummary::default();

        for file in plan.files() {
            let path = output_dir.join(file.path.as_path());

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }

            let existed = self.filesystem.exists(&path);
            self.filesystem.write_file(&path, &file.content)?;
            if !existed {
                created.push(path.clone());
            }

            summary.bytes_written += file.size();
            summary.paths.push(path);
            on_written(file);
        }

        Ok(summary)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, created: &[PathBuf]) {
        for path in created.iter().rev() {
            if let Err(e) = self.filesystem.remove_file(path) {
                warn!(error = %e, path = %path.display(), "Rollback failed");
            }
        }
        info!(removed = created.len(), "Rollback finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockArtifactRenderer, MockFilesystem};
    use crate::domain::{AzureConfig, DomainError, Service, WorkflowKind};
    use crate::error::TachiError;
    use std::sync::{Arc, Mutex};

    fn renderer() -> MockArtifactRenderer {
        let mut renderer = MockArtifactRenderer::new();
        renderer
            .expect_render_workflow()
            .returning(|kind, _| Ok(format!("workflow: {kind}\n")));
        renderer
            .expect_render_service_config()
            .returning(|_, service| Ok(format!("service: {}\n", service.name)));
        renderer
            .expect_render_setup_guide()
            .returning(|config| Ok(format!("# Setup Instructions for {}\n", config.name)));
        renderer
    }

    fn config(strategy: &str) -> ProjectConfig {
        ProjectConfig::new("shop", strategy, AzureConfig::new("rg", "acme"))
            .with_service(Service::new("web"))
            .with_service(Service::new("api"))
    }

    fn paths(plan: &GenerationPlan) -> Vec<String> {
        plan.files().map(|f| f.path.to_string()).collect()
    }

    #[test]
    fn plan_orders_workflows_services_then_guide() {
        let service = GenerateService::new(Box::new(renderer()), Box::new(MockFilesystem::new()));

        let plan = service.plan(&config("trunk-release-stage")).unwrap();

        assert_eq!(
            paths(&plan),
            vec![
                ".github/workflows/pr-deploy.yaml",
                ".github/workflows/stage-deploy.yaml",
                ".github/workflows/prod-deploy.yaml",
                ".github/workflows/pr-cleanup.yaml",
                "container-apps/configs/web.yaml",
                "container-apps/configs/api.yaml",
                "SETUP.md",
            ]
        );
    }

    #[test]
    fn plan_for_trunk_direct_has_no_staging() {
        let service = GenerateService::new(Box::new(renderer()), Box::new(MockFilesystem::new()));

        let plan = service.plan(&config("trunk-direct")).unwrap();

        assert!(!plan.workflows().any(|k| k == WorkflowKind::StageDeploy));
        assert_eq!(plan.workflows().count(), 3);
    }

    #[test]
    fn plan_refuses_invalid_config_without_rendering() {
        let service = GenerateService::new(
            Box::new(MockArtifactRenderer::new()),
            Box::new(MockFilesystem::new()),
        );
        let invalid = config("trunk-direct").with_service(Service::new("web"));

        let err = service.plan(&invalid).unwrap_err();

        assert!(matches!(
            err,
            TachiError::Application(ApplicationError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn plan_surfaces_renderer_failure() {
        let mut renderer = MockArtifactRenderer::new();
        renderer.expect_render_workflow().returning(|kind, _| {
            Err(ApplicationError::RenderingFailed {
                artifact: kind.to_string(),
                reason: "boom".into(),
            }
            .into())
        });
        let service = GenerateService::new(Box::new(renderer), Box::new(MockFilesystem::new()));

        assert!(service.plan(&config("trunk-direct")).is_err());
    }

    #[test]
    fn plan_rejects_service_name_that_leaves_output_dir() {
        let service = GenerateService::new(Box::new(renderer()), Box::new(MockFilesystem::new()));
        let escaping = ProjectConfig::new("shop", "trunk-direct", AzureConfig::new("rg", "acme"))
            .with_service(Service::new("../../../escaped"));
        assert!(escaping.is_valid());

        let err = service.plan(&escaping).unwrap_err();

        assert!(matches!(
            err,
            TachiError::Domain(DomainError::PathEscapesOutput { .. })
        ));
        assert_eq!(err.category(), crate::error::ErrorCategory::Validation);
    }

    #[test]
    fn write_creates_parents_and_reports_every_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().times(6).returning(|_, _| Ok(()));
        fs.expect_remove_file().never();

        let service = GenerateService::new(Box::new(renderer()), Box::new(fs));
        let plan = service.plan(&config("trunk-direct")).unwrap();

        let mut seen = Vec::new();
        let summary = service
            .write_observed(&plan, Path::new("out"), |f| seen.push(f.artifact.clone()))
            .unwrap();

        assert_eq!(summary.files_written(), 6);
        assert_eq!(summary.paths[0], Path::new("out/.github/workflows/pr-deploy.yaml"));
        assert_eq!(seen.last(), Some(&ArtifactKind::SetupGuide));
    }

    #[test]
    fn failed_write_rolls_back_created_files_only() {
        let removed = Arc::new(Mutex::new(Vec::<PathBuf>::new()));

        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        // The production workflow already exists and must survive rollback.
        fs.expect_exists()
            .returning(|path| path.ends_with("prod-deploy.yaml"));
        fs.expect_write_file().returning(|path, _| {
            if path.ends_with("pr-cleanup.yaml") {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        let sink = Arc::clone(&removed);
        fs.expect_remove_file().returning(move |path| {
            sink.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });

        let service = GenerateService::new(Box::new(renderer()), Box::new(fs));
        let result = service.generate(&config("trunk-direct"), Path::new("out"));

        assert!(result.is_err());
        assert_eq!(
            *removed.lock().unwrap(),
            vec![PathBuf::from("out/.github/workflows/pr-deploy.yaml")]
        );
    }
}
