//! `stencil config` — inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.emit_line(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised = config.to_toml().map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.emit(&serialised)?;
        }

        ConfigCommands::Path => {
            output.emit_line(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!(
            "Unknown config key: '{key}' (known: {})",
            AppConfig::KEYS.join(", ")
        ),
        source: None,
    })
}
