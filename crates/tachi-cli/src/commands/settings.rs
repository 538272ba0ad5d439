//! `tachi settings`: inspect tool settings.

use crate::{
    cli::SettingsCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct settings subcommand.
pub fn execute(cmd: SettingsCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        SettingsCommands::Get { key } => {
            let value = get_setting(&config, &key)?;
            if output.is_json() {
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                output.print(&format!("{key} = {value}"))?;
            }
        }

        SettingsCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Settings:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::SettingsError {
                        message: format!("Failed to serialise settings: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        SettingsCommands::Path => {
            output.print(&AppConfig::settings_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_setting(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.strategy" => Ok(config.defaults.strategy.clone()),
        "defaults.location" => Ok(config.defaults.location.clone()),
        "defaults.output_dir" => Ok(config.defaults.output_dir.display().to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::SettingsError {
            message: format!("Unknown settings key: '{key}'"),
            source: None,
        }),
    }
}
