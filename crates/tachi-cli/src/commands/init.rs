//! Implementation of the `tachi init` command.

use tracing::{info, instrument};

use tachi_core::domain::{
    AzureConfig, ProjectConfig, Service, Strategy, strategies::valid_strategy_names,
};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `tachi init` command.
#[instrument(skip_all, fields(output = %args.output.display()))]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if args.output.exists() && !args.force {
        return Err(CliError::FileExists { path: args.output });
    }

    let strategy = match args.strategy {
        Some(arg) => Strategy::from(arg),
        None => config
            .default_strategy()
            .map_err(|e| CliError::SettingsError {
                message: e.to_string(),
                source: None,
            })?,
    };

    let text = starter_document(strategy, &config.defaults.location)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&args.output, text)
        .with_cli_context(|| format!("failed to write {}", args.output.display()))?;

    info!(strategy = %strategy, "Starter configuration written");

    output.success(&format!("Created {}", args.output.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print("  Edit the azure section and your services")?;
    output.print(&format!("  tachi validate -c {}", args.output.display()))?;

    Ok(())
}

/// A commented starter project that validates as written.
fn starter_document(strategy: Strategy, location: &str) -> CliResult<String> {
    let project = ProjectConfig::new(
        "my-app",
        strategy.as_str(),
        AzureConfig::new("my-app-rg", "myappregistry").with_location(location),
    )
    .with_service(Service::new("api"));

    let body = serde_yaml::to_string(&project).map_err(|e| CliError::Serialization {
        what: "starter configuration",
        reason: e.to_string(),
    })?;

    Ok(format!(
        "# tachi project configuration\n\
         #\n\
         # Strategies: {strategies}\n\
         # Check it with:   tachi validate -c <this file>\n\
         # Generate with:   tachi generate -c <this file>\n\
         \n\
         {body}",
        strategies = valid_strategy_names(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_document_is_a_valid_project() {
        let text = starter_document(Strategy::TrunkReleaseStage, "westeurope").unwrap();
        assert!(text.starts_with("# tachi project configuration"));

        let project: ProjectConfig = serde_yaml::from_str(&text).unwrap();
        assert!(project.is_valid());
        assert_eq!(project.strategy, "trunk-release-stage");
        assert_eq!(project.azure.location, "westeurope");
        assert_eq!(project.services[0].name, "api");
    }

    #[test]
    fn starter_header_lists_every_strategy() {
        let text = starter_document(Strategy::TrunkDirect, "eastus").unwrap();
        let header = text.lines().find(|l| l.starts_with("# Strategies:")).unwrap();
        for strategy in Strategy::all() {
            assert!(header.contains(strategy.as_str()), "{header}");
        }
    }

    #[test]
    fn starter_document_omits_unset_monitoring() {
        let text = starter_document(Strategy::TrunkDirect, "eastus").unwrap();
        assert!(!text.contains("log_analytics"));
    }
}
