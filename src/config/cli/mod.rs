//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! camtrap validate --config resnet50 --detailed
//! camtrap info --config configs/resnet50.yml --format json
//! camtrap plan --config resnet50 --mode train --tag baseline
//! camtrap index --config resnet50 --split val
//! camtrap score --config resnet50 outputs.json --roc-output roc.json
//! ```

mod args;
mod types;

pub use args::{
    parse_args, Cli, Command, ConfigSelector, IndexArgs, InfoArgs, PlanArgs, ScoreArgs,
    ValidateArgs,
};
pub use types::{ModeArg, OutputFormat, SplitArg};
