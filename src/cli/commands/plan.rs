//! Plan command implementation

use super::load_selected;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PlanArgs;
use crate::experiment::{generate_tag, CheckpointManifest, RunMode, RunPlan};

pub fn run_plan(args: PlanArgs, level: LogLevel) -> Result<(), String> {
    let config = load_selected(&args.selector)?;

    let resume = args
        .resume
        .as_ref()
        .map(CheckpointManifest::read)
        .transpose()
        .map_err(|e| format!("Resume error: {e}"))?;

    let tag = generate_tag(&args.tag);
    let plan = RunPlan::new(&config, RunMode::from(args.mode), &tag, resume.as_ref());

    log(level, LogLevel::Normal, &plan.to_string());

    if plan.mode == RunMode::Train {
        for epoch in plan.schedule.decay_epochs(plan.epochs()) {
            log(
                level,
                LogLevel::Verbose,
                &format!("  epoch {epoch}: lr={}", plan.schedule.lr_at(epoch)),
            );
        }
    }

    Ok(())
}
