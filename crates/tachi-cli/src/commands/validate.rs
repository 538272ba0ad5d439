//! Implementation of the `tachi validate` command.
//!
//! Loads a project file, prints every issue found, and summarises a valid
//! configuration. Validation failures exit with a user-error code once all
//! issues have been shown.

use serde::Serialize;
use tracing::{info, instrument};

use tachi_adapters::YamlConfigSource;
use tachi_core::{
    application::ConfigService,
    domain::{Advisory, ProjectConfig, ValidationIssue, WorkflowKind},
};

use crate::{
    cli::ValidateArgs,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ValidateReport<'a> {
    valid: bool,
    project: &'a str,
    strategy: &'a str,
    issues: &'a [ValidationIssue],
    advisories: &'a [Advisory],
    workflows: Vec<WorkflowKind>,
}

/// Execute the `tachi validate` command.
#[instrument(skip_all, fields(config = %args.config.display()))]
pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    if !output.is_json() {
        output.info(&format!(
            "Validating configuration: {}",
            args.config.display()
        ))?;
    }

    let service = ConfigService::new(Box::new(YamlConfigSource::new()));
    let checked = service.check(&args.config)?;
    let config = &checked.value;

    info!(
        valid = checked.is_valid(),
        issues = checked.issues.len(),
        "Validation finished"
    );

    if output.is_json() {
        output.json(&ValidateReport {
            valid: checked.is_valid(),
            project: &config.name,
            strategy: &config.strategy,
            issues: &checked.issues,
            advisories: &checked.advisories,
            workflows: config.workflows(),
        })?;
        return if checked.is_valid() {
            Ok(())
        } else {
            Err(CliError::ValidationFailed {
                count: checked.issues.len(),
            })
        };
    }

    if !checked.is_valid() {
        output.error("Configuration validation failed:")?;
        for issue in &checked.issues {
            output.print(&format!("  - {issue}"))?;
        }
        return Err(CliError::ValidationFailed {
            count: checked.issues.len(),
        });
    }

    output.success("Configuration is valid!")?;
    for advisory in &checked.advisories {
        output.warning(&advisory.message)?;
    }

    print_summary(config, &output)?;

    if args.verbose_config {
        let raw = std::fs::read_to_string(&args.config)
            .with_cli_context(|| format!("failed to read {}", args.config.display()))?;
        print_details(config, &raw, &output)?;
    }

    Ok(())
}

fn print_summary(config: &ProjectConfig, output: &OutputManager) -> CliResult<()> {
    let strategy = config.resolved_strategy();

    output.print("")?;
    output.header("Configuration Summary")?;
    output.print(&format!("  Project:         {}", config.name))?;
    output.print(&format!(
        "  Strategy:        {} ({})",
        config.strategy,
        strategy.description()
    ))?;
    output.print(&format!(
        "  Registry server: {}",
        config.azure.registry_server()
    ))?;
    output.print(&format!("  Resource group:  {}", config.azure.resource_group))?;
    output.print(&format!("  Location:        {}", config.azure.location))?;

    let workflows: Vec<String> = config.workflows().iter().map(|w| w.to_string()).collect();
    output.print(&format!("  Workflows:       {}", workflows.join(", ")))?;

    output.print("")?;
    output.header(&format!("Services ({})", config.services.len()))?;
    for service in &config.services {
        output.print(&format!("  {}", service.name))?;
        output.print(&format!(
            "    Port: {}  External: {}",
            service.port, service.external
        ))?;
        output.print(&format!(
            "    CPU: {}  Memory: {}",
            service.cpu, service.memory
        ))?;
        output.print(&format!(
            "    Replicas: {}-{}",
            service.min_replicas, service.max_replicas
        ))?;
    }

    Ok(())
}

fn print_details(config: &ProjectConfig, raw: &str, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.header("Raw Configuration:")?;
    output.print(raw.trim_end())?;

    output.print("")?;
    output.header("Build Settings:")?;
    for service in &config.services {
        output.print(&format!("  {}", service.name))?;
        output.print(&format!("    Dockerfile: {}", service.dockerfile))?;
        output.print(&format!("    Context: {}", service.context))?;
    }

    Ok(())
}
