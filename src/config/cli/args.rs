//! CLI types - Cli, Command, and argument structs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::{ModeArg, OutputFormat, SplitArg};
use crate::config::loader::{DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_NAME};

/// camtrap: experiment tooling for camera-trap image classifiers
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "camtrap")]
#[command(version)]
#[command(about = "Validate, inspect and plan camera-trap classifier experiments")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Check a configuration for parse, anchor, key and range errors
    Validate(ValidateArgs),

    /// Display a configuration
    Info(InfoArgs),

    /// Show the run a configuration describes (epochs, checkpoint, schedule)
    Plan(PlanArgs),

    /// Index dataset metadata and report label counts
    Index(IndexArgs),

    /// Score model outputs against labels
    Score(ScoreArgs),
}

/// Which configuration to load
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ConfigSelector {
    /// Config name (looked up in --config-dir) or path to a YAML file
    #[arg(short, long, default_value = DEFAULT_CONFIG_NAME)]
    pub config: String,

    /// Directory holding named configs
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub selector: ConfigSelector,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,

    /// Also require data root and checkpoints to exist
    #[arg(long)]
    pub check_paths: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    #[command(flatten)]
    pub selector: ConfigSelector,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the plan command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PlanArgs {
    #[command(flatten)]
    pub selector: ConfigSelector,

    /// Run mode (train, eval)
    #[arg(short, long, default_value = "train")]
    pub mode: ModeArg,

    /// Tag to discern run instances
    #[arg(short, long, default_value = "")]
    pub tag: String,

    /// Checkpoint manifest to resume from
    #[arg(short, long)]
    pub resume: Option<PathBuf>,
}

/// Arguments for the index command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct IndexArgs {
    #[command(flatten)]
    pub selector: ConfigSelector,

    /// Dataset split (train, val, eval)
    #[arg(short, long, default_value = "train")]
    pub split: SplitArg,

    /// Override the data root directory
    #[arg(long)]
    pub root_dir: Option<PathBuf>,
}

/// Arguments for the score command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub selector: ConfigSelector,

    /// JSON file with `outputs` (one logit vector per sample) and `labels`
    #[arg(value_name = "OUTPUTS")]
    pub outputs: PathBuf,

    /// Write the ROC curve here (defaults to <OUTPUTS>.roc.json when eval.use_roc is set)
    #[arg(long)]
    pub roc_output: Option<PathBuf>,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
