//! Interactive mode for `tachi generate` without `-c`.
//!
//! Prompts for every project field, validates the answers, optionally saves
//! them as a YAML file and then hands over to the normal generation path.

use std::path::Path;

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use tracing::{info, instrument};

use tachi_core::domain::{
    AzureConfig, DomainValidator, ProjectConfig, Service, Strategy, defaults,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

use super::generate::{GenerateOptions, run_generation};

type Prompt<T> = Result<T, dialoguer::Error>;

/// Run the prompts, then save and/or generate as the user chooses.
#[instrument(skip_all)]
pub fn execute(
    config: AppConfig,
    output: OutputManager,
    output_dir: &Path,
    options: GenerateOptions,
) -> CliResult<()> {
    output.header("Welcome to tachi interactive mode!")?;
    output.print("Answer the prompts to describe your project.")?;
    output.print("")?;

    let theme = ColorfulTheme::default();
    let project = ask_project(&theme, &config).map_err(prompt_error)?;

    let checked = DomainValidator::check(project);
    if !checked.is_valid() {
        output.error("Configuration validation failed:")?;
        for issue in &checked.issues {
            output.print(&format!("  - {issue}"))?;
        }
        return Err(CliError::ValidationFailed {
            count: checked.issues.len(),
        });
    }
    for advisory in &checked.advisories {
        output.warning(&advisory.message)?;
    }
    let project = checked.value;

    let save = Confirm::with_theme(&theme)
        .with_prompt("Save configuration to a file?")
        .default(true)
        .interact()
        .map_err(prompt_error)?;
    if save {
        let path: String = Input::with_theme(&theme)
            .with_prompt("Configuration file")
            .default("tachi.yaml".to_string())
            .interact_text()
            .map_err(prompt_error)?;
        save_config(&project, Path::new(&path))?;
        output.success(&format!("Saved {path}"))?;
    }

    let generate = Confirm::with_theme(&theme)
        .with_prompt("Generate files now?")
        .default(true)
        .interact()
        .map_err(prompt_error)?;
    if !generate {
        info!("Interactive session ended without generating");
        return Ok(());
    }

    run_generation(&project, output_dir, options, &output)
}

fn ask_project(theme: &ColorfulTheme, config: &AppConfig) -> Prompt<ProjectConfig> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Project name")
        .default("my-app".to_string())
        .interact_text()?;

    let strategies: Vec<Strategy> = Strategy::all().collect();
    let labels: Vec<String> = strategies
        .iter()
        .map(|s| format!("{s} - {}", s.description()))
        .collect();
    let preferred = config.default_strategy().unwrap_or_default();
    let selected = Select::with_theme(theme)
        .with_prompt("Deployment strategy")
        .items(&labels)
        .default(strategies.iter().position(|s| *s == preferred).unwrap_or(0))
        .interact()?;

    let resource_group: String = Input::with_theme(theme)
        .with_prompt("Azure resource group")
        .default(format!("{name}-rg"))
        .interact_text()?;
    let registry: String = Input::with_theme(theme)
        .with_prompt("Azure container registry name (without .azurecr.io)")
        .interact_text()?;
    let location: String = Input::with_theme(theme)
        .with_prompt("Azure location")
        .default(config.defaults.location.clone())
        .interact_text()?;

    let mut project = ProjectConfig::new(
        name,
        strategies[selected].as_str(),
        AzureConfig::new(resource_group, registry).with_location(location),
    );

    loop {
        let service = ask_service(theme, project.services.len())?;
        project.services.push(service);

        let another = Confirm::with_theme(theme)
            .with_prompt("Add another service?")
            .default(false)
            .interact()?;
        if !another {
            break;
        }
    }

    Ok(project)
}

fn ask_service(theme: &ColorfulTheme, index: usize) -> Prompt<Service> {
    let default_name = if index == 0 {
        "api".to_string()
    } else {
        format!("service-{}", index + 1)
    };

    let name: String = Input::with_theme(theme)
        .with_prompt("Service name")
        .default(default_name)
        .interact_text()?;
    let dockerfile: String = Input::with_theme(theme)
        .with_prompt("Dockerfile path")
        .default(defaults::dockerfile())
        .interact_text()?;
    let context: String = Input::with_theme(theme)
        .with_prompt("Build context")
        .default(defaults::context())
        .interact_text()?;
    let port: u16 = Input::with_theme(theme)
        .with_prompt("Port")
        .default(8000)
        .validate_with(|port: &u16| {
            if *port == 0 {
                Err("port must be between 1 and 65535")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    let external = Confirm::with_theme(theme)
        .with_prompt("Expose externally?")
        .default(defaults::external())
        .interact()?;
    let cpu: f64 = Input::with_theme(theme)
        .with_prompt("CPU cores")
        .default(defaults::cpu())
        .validate_with(|cpu: &f64| {
            if *cpu > 0.0 {
                Ok(())
            } else {
                Err("cpu must be greater than 0")
            }
        })
        .interact_text()?;
    let memory: String = Input::with_theme(theme)
        .with_prompt("Memory")
        .default(defaults::memory())
        .interact_text()?;
    let min_replicas: u32 = Input::with_theme(theme)
        .with_prompt("Minimum replicas")
        .default(1)
        .interact_text()?;
    let max_replicas: u32 = Input::with_theme(theme)
        .with_prompt("Maximum replicas")
        .default(min_replicas.max(10))
        .validate_with(move |max: &u32| {
            if *max >= min_replicas {
                Ok(())
            } else {
                Err("max_replicas must be greater than or equal to min_replicas")
            }
        })
        .interact_text()?;

    Ok(Service {
        name,
        dockerfile,
        port: i64::from(port),
        external,
        cpu,
        memory,
        min_replicas: i64::from(min_replicas),
        max_replicas: i64::from(max_replicas),
        context,
    })
}

fn save_config(project: &ProjectConfig, path: &Path) -> CliResult<()> {
    let text = serde_yaml::to_string(project).map_err(|e| CliError::Serialization {
        what: "project configuration",
        reason: e.to_string(),
    })?;
    std::fs::write(path, text).with_cli_context(|| format!("failed to write {}", path.display()))
}

fn prompt_error(err: dialoguer::Error) -> CliError {
    CliError::IoError {
        message: "interactive prompt failed".into(),
        source: std::io::Error::other(err),
    }
}
