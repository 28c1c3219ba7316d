//! camtrap CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate a named config from ./configs
//! camtrap validate --config resnet50 --detailed
//!
//! # Show a config as JSON
//! camtrap info --config configs/resnet50.yml --format json
//!
//! # Show the training run, resuming from a checkpoint manifest
//! camtrap plan --config resnet50 --tag night --resume checkpoints/resnet50_x.json
//!
//! # Index validation metadata
//! camtrap index --config resnet50 --split val
//!
//! # Score exported model outputs and save a ROC curve
//! camtrap score --config resnet50 outputs.json --roc-output roc.json
//! ```

use camtrap::cli::{init_tracing, run_command, Cli, LogLevel};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.quiet, cli.verbose));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
