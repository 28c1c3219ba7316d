//! Experiment configuration
//!
//! Typed schema, loading, anchor checks and validation for the YAML
//! documents that drive classifier runs, plus the CLI argument types.

pub mod anchors;
mod cli;
pub mod keys;
mod loader;
pub mod schema;
pub mod validate;


pub use anchors::{check_anchors, scan_anchors, AnchorReport, AnchorSite};
pub use cli::{
    parse_args, Cli, Command, ConfigSelector, IndexArgs, InfoArgs, ModeArg, OutputFormat,
    PlanArgs, ScoreArgs, SplitArg, ValidateArgs,
};
pub use keys::{check_required_keys, KeyIssue, KeyType, REQUIRED_KEYS};
pub use loader::{
    key_issue_error, load_config, parse_config, resolve_config_path, resolve_document,
    DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_NAME,
};
pub use schema::{
    CriterionSpec, DataSpec, EvalSpec, ExperimentConfig, LabelType, LrScheduleSpec, ModelSpec,
    OptimizerSpec, TrainSpec,
};
pub use validate::{check_paths, validate_config, ValidationError};
