// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::cli::{ConfigCommand, OutputFormat};
use crate::config::{get_state_dir, Config};
use crate::error::{Error, Result};

use super::Context;

/// Execute a config subcommand.
pub fn run(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { output } => {
            let ctx = Context::load()?;
            println!("{}", render(&ctx.state_dir, &ctx.config, output)?);
            Ok(())
        }
        ConfigCommand::Remote { url } => {
            let state_dir = get_state_dir()?;
            let config = set_remote(&state_dir, &url)?;
            println!("Remote set to {}", config.remote.url);
            Ok(())
        }
    }
}

/// Show the effective configuration.
pub(crate) fn render(state_dir: &Path, config: &Config, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Text => {
            let body = toml::to_string_pretty(config)
                .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
            Ok(format!("# state directory: {}\n{}", state_dir.display(), body.trim_end()))
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "state_dir": state_dir.display().to_string(),
                "endpoint": config.remote.resource_url(),
                "config": config,
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

/// Store `url` as the remote in the config file.
///
/// Environment overrides are not applied, so they never end up in the file.
pub(crate) fn set_remote(state_dir: &Path, url: &str) -> Result<Config> {
    let mut config = Config::load(state_dir)?;
    config.remote.url = url.trim().to_string();
    config.validate()?;
    config.save(state_dir)?;
    tracing::info!(url = %config.remote.url, "remote updated");
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
