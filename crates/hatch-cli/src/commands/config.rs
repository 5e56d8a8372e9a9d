//! `hatch config get|list|path`.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliContext, CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            output.print(&format!("{key} = {}", lookup(&config, &key)?))?;
        }
        ConfigCommands::List => {
            let effective = toml::to_string_pretty(&config)
                .cli_context(|| "cannot render the effective configuration")?;
            output.header("Effective configuration (defaults, files, HATCH_*):")?;
            output.print(effective.trim_end())?;
        }
        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }
    Ok(())
}

/// Resolve a dotted key such as `emit.strict` against the loaded config.
/// Only leaf values can be read; naming a whole section is an error.
fn lookup(config: &AppConfig, key: &str) -> CliResult<String> {
    let tree = serde_json::to_value(config).map_err(|e| CliError::Config {
        message: "cannot inspect the loaded configuration".into(),
        source: Some(Box::new(e)),
    })?;

    let found = key
        .split('.')
        .try_fold(&tree, |node, segment| node.get(segment));

    match found {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Object(_)) | None => Err(CliError::config(format!(
            "Unknown config key: '{key}'"
        ))),
        Some(leaf) => Ok(leaf.to_string()),
    }
}
