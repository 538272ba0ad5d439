//! Implementation of the `tachi generate` command.
//!
//! Responsibility: obtain a valid project configuration (from a file or from
//! interactive prompts), plan the artifacts, and write them under the output
//! directory. Rendering and rollback live in the core `GenerateService`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use tachi_adapters::{LocalFilesystem, TeraRenderer, YamlConfigSource};
use tachi_core::{
    application::{ConfigService, GenerateService},
    domain::{GenerationPlan, ProjectConfig},
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Flags that shape a generation run, shared with interactive mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    pub dry_run: bool,
    pub force: bool,
    pub yes: bool,
}

impl From<&GenerateArgs> for GenerateOptions {
    fn from(args: &GenerateArgs) -> Self {
        Self {
            dry_run: args.dry_run,
            force: args.force,
            yes: args.yes,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateReport {
    dry_run: bool,
    output_dir: PathBuf,
    files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_written: Option<usize>,
}

/// Execute the `tachi generate` command.
///
/// Dispatch sequence:
/// 1. Resolve the output directory (flag, then settings)
/// 2. Load and validate the config, or fall back to interactive mode
/// 3. Plan, then either list (`--dry-run`) or write
#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.defaults.output_dir.clone());
    let options = GenerateOptions::from(&args);

    let Some(path) = args.config.as_deref() else {
        return interactive(config, output, &output_dir, options);
    };

    if !output.is_json() {
        output.info(&format!("Loading configuration from: {}", path.display()))?;
    }
    let project = ConfigService::new(Box::new(YamlConfigSource::new())).load_valid(path)?;

    debug!(
        project = %project.name,
        strategy = %project.strategy,
        services = project.services.len(),
        "Configuration loaded"
    );

    run_generation(&project, &output_dir, options, &output)
}

#[cfg(feature = "interactive")]
fn interactive(
    config: AppConfig,
    output: OutputManager,
    output_dir: &Path,
    options: GenerateOptions,
) -> CliResult<()> {
    super::interactive::execute(config, output, output_dir, options)
}

#[cfg(not(feature = "interactive"))]
fn interactive(
    _config: AppConfig,
    _output: OutputManager,
    _output_dir: &Path,
    _options: GenerateOptions,
) -> CliResult<()> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Plan and write every artifact for a validated project.
#[instrument(skip_all, fields(project = %project.name, output_dir = %output_dir.display()))]
pub fn run_generation(
    project: &ProjectConfig,
    output_dir: &Path,
    options: GenerateOptions,
    output: &OutputManager,
) -> CliResult<()> {
    let service = GenerateService::new(
        Box::new(TeraRenderer::new()?),
        Box::new(LocalFilesystem::new()),
    );
    let plan = service.plan(project)?;

    if options.dry_run {
        return show_dry_run(&plan, output_dir, output);
    }

    if !options.force && !options.yes && super::is_non_empty_dir(output_dir)? {
        if output.is_json() {
            return Err(CliError::InvalidInput {
                message: format!(
                    "Output directory is not empty: {}; pass --force to write anyway",
                    output_dir.display()
                ),
            });
        }

        output.warning(&format!(
            "Output directory is not empty: {}",
            output_dir.display()
        ))?;
        if !super::confirm("Existing files may be overwritten. Continue?")? {
            output.print("Aborted.")?;
            info!("Generation aborted by user");
            return Ok(());
        }
    }

    let bar = output.progress(plan.len() as u64, "Generating files");
    let summary = service.write_observed(&plan, output_dir, |file| {
        debug!(path = %file.path, "Wrote file");
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    info!(
        files = summary.files_written(),
        bytes = summary.bytes_written,
        "Generation finished"
    );

    if output.is_json() {
        return output.json(&GenerateReport {
            dry_run: false,
            output_dir: output_dir.to_path_buf(),
            files: file_list(&plan),
            bytes_written: Some(summary.bytes_written),
        });
    }

    output.success("Generation complete!")?;
    output.print("")?;
    output.print("Generated files:")?;
    for path in &summary.paths {
        output.print(&format!("  {}", path.display()))?;
    }
    output.print("")?;
    output.print(&format!(
        "Next: follow {} to configure Azure and GitHub secrets.",
        output_dir.join("SETUP.md").display()
    ))?;

    Ok(())
}

fn show_dry_run(plan: &GenerationPlan, output_dir: &Path, output: &OutputManager) -> CliResult<()> {
    info!(files = plan.len(), "Dry run, nothing written");

    if output.is_json() {
        return output.json(&GenerateReport {
            dry_run: true,
            output_dir: output_dir.to_path_buf(),
            files: file_list(plan),
            bytes_written: None,
        });
    }

    output.header("DRY RUN MODE")?;
    output.print(&format!("Output directory: {}", output_dir.display()))?;
    output.print("Would generate:")?;
    for file in plan.files() {
        output.print(&format!("  {} ({} bytes)", file.path, file.size()))?;
    }

    Ok(())
}

fn file_list(plan: &GenerationPlan) -> Vec<String> {
    plan.files().map(|f| f.path.to_string()).collect()
}
