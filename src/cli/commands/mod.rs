//! CLI command implementations

mod index;
mod info;
mod plan;
mod score;
mod validate;

#[cfg(test)]
mod tests;

use crate::cli::LogLevel;
use crate::config::{load_config, resolve_config_path, Cli, Command, ConfigSelector, ExperimentConfig};
use std::path::PathBuf;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
        Command::Plan(args) => plan::run_plan(args, log_level),
        Command::Index(args) => index::run_index(args, log_level),
        Command::Score(args) => score::run_score(args, log_level),
    }
}

/// Locate the selected config file
fn resolve_selected(selector: &ConfigSelector) -> Result<PathBuf, String> {
    resolve_config_path(&selector.config, &selector.config_dir).map_err(|e| e.to_string())
}

/// Locate, load and validate the selected config
fn load_selected(selector: &ConfigSelector) -> Result<ExperimentConfig, String> {
    let path = resolve_selected(selector)?;
    load_config(&path).map_err(|e| format!("Config error: {e}"))
}
