//! Entry points for reading experiment documents

use super::anchors::check_anchors;
use super::keys::{check_required_keys, KeyIssue};
use super::schema::ExperimentConfig;
use super::validate::{validate_config, ValidationError};
use crate::error::{Error, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Config name used when none is given
pub const DEFAULT_CONFIG_NAME: &str = "resnet18";

/// Directory searched for named configs
pub const DEFAULT_CONFIG_DIR: &str = "configs";

const CONFIG_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Check anchors, resolve aliases and merge keys, and return the raw tree
pub fn resolve_document(text: &str) -> Result<Value> {
    check_anchors(text).map_err(|e| Error::ConfigError(e.to_string()))?;

    let mut value: Value = serde_yaml::from_str(text)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;
    value
        .apply_merge()
        .map_err(|e| Error::ConfigError(format!("Failed to apply merge keys: {e}")))?;

    Ok(value)
}

/// Parse an experiment document without semantic validation
pub fn parse_config(text: &str) -> Result<ExperimentConfig> {
    let value = resolve_document(text)?;

    if let Some(issue) = check_required_keys(&value).into_iter().next() {
        return Err(Error::ConfigError(key_issue_error(&issue).to_string()));
    }

    serde_yaml::from_value(value)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
}

/// Load, parse and validate an experiment document
///
/// # Example
///
/// ```no_run
/// use camtrap::config::load_config;
///
/// let config = load_config("configs/resnet50.yml")?;
/// assert_eq!(config.model.name, "resnet50");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ExperimentConfig> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    let config = parse_config(&yaml_content)?;

    validate_config(&config).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;

    tracing::debug!(
        path = %config_path.as_ref().display(),
        model = %config.model.name,
        "loaded experiment config"
    );

    Ok(config)
}

/// Resolve a config argument to a file
///
/// An existing path is used as given. Anything else is treated as a config
/// name and looked up as `<config_dir>/<name>.yml`, then `.yaml`.
pub fn resolve_config_path(name_or_path: &str, config_dir: &Path) -> Result<PathBuf> {
    let direct = PathBuf::from(name_or_path);
    if direct.is_file() {
        return Ok(direct);
    }

    let searched: Vec<PathBuf> = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("{name_or_path}.{ext}")))
        .collect();

    searched
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or_else(|| Error::ConfigNotFound {
            name: name_or_path.to_string(),
            searched,
        })
}

/// Convert a key issue into the validation error reported to users
pub fn key_issue_error(issue: &KeyIssue) -> ValidationError {
    match issue {
        KeyIssue::Missing(key) => ValidationError::MissingKey((*key).to_string()),
        KeyIssue::WrongType { key, expected } => ValidationError::WrongKeyType {
            key: (*key).to_string(),
            expected: expected.describe(),
        },
    }
}
