//! Validate command implementation

use super::resolve_selected;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{
    check_anchors, check_paths, check_required_keys, key_issue_error, parse_config,
    resolve_document, validate_config, AnchorReport, ExperimentConfig, ValidateArgs,
};
use std::fs;

/// Format model information as a string
pub fn format_model_info(config: &ExperimentConfig) -> String {
    format!(
        "  Model: {}\n  Output units: {}",
        config.model.name, config.model.num_classes
    )
}

/// Format training configuration as a string
pub fn format_train_info(config: &ExperimentConfig) -> String {
    let train = &config.train;
    let mut lines = vec![
        format!("  Train dataset: {}", train.data),
        format!("  Epochs: {}", train.num_epochs),
    ];
    match &train.checkpoint_path {
        Some(path) => lines.push(format!("  Resume from: {}", path.display())),
        None => lines.push("  Resume from: (fresh start)".to_string()),
    }
    lines.push(format!("  Save dir: {}", train.save_dir.display()));
    if let Some(seed) = train.seed {
        lines.push(format!("  Seed: {seed}"));
    }
    lines.join("\n")
}

/// Format optimizer, schedule and criterion as a string
pub fn format_optimizer_info(config: &ExperimentConfig) -> String {
    let optimizer = &config.train.optimizer;
    let mut lines = vec![
        format!("  Optimizer: {}", optimizer.name),
        format!("  Learning rate: {}", optimizer.lr),
        format!("  Alpha: {}", optimizer.alpha),
        format!("  Eps: {:e}", optimizer.eps),
        format!("  Weight decay: {}", optimizer.weight_decay),
    ];
    for (key, value) in &optimizer.params {
        lines.push(format!("  {key}: {value}"));
    }
    lines.push(format!(
        "  LR schedule: x{} every {} epochs",
        config.train.lr_schedule.gamma, config.train.lr_schedule.step_size
    ));
    lines.push(format!("  Criterion: {}", config.train.criterion.name));
    lines.join("\n")
}

/// Format evaluation configuration as a string
pub fn format_eval_info(config: &ExperimentConfig) -> String {
    format!(
        "  Eval dataset: {}\n  Checkpoint: {}\n  ROC curve: {}",
        config.eval.data,
        config.eval.checkpoint_path.display(),
        config.eval.use_roc
    )
}

/// Format data configuration as a string
pub fn format_data_info(config: &ExperimentConfig) -> String {
    let data = &config.data;
    format!(
        "  Root dir: {}\n  Batch size: {}\n  Workers: {}\n  Labels: {}",
        data.root_dir.display(),
        data.batch_size,
        data.num_workers,
        data.label_type
    )
}

/// Format anchors defined, aliases used and anchors left unreferenced
pub fn format_anchor_info(report: &AnchorReport) -> String {
    let anchors: Vec<&str> = report.anchors.iter().map(|a| a.name.as_str()).collect();
    let unused: Vec<&str> = report.unused().iter().map(|a| a.name.as_str()).collect();
    let mut lines = vec![format!("  Anchors: {}", anchors.join(", "))];
    lines.push(format!("  Aliases resolved: {}", report.aliases.len()));
    if unused.is_empty() {
        lines.push("  Unused anchors: none".to_string());
    } else {
        lines.push(format!("  Unused anchors: {}", unused.join(", ")));
    }
    lines.join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(config: &ExperimentConfig, anchors: &AnchorReport, level: LogLevel) {
    let sections = [
        format_model_info(config),
        format_train_info(config),
        format_optimizer_info(config),
        format_eval_info(config),
        format_data_info(config),
        format_anchor_info(anchors),
    ];
    log(level, LogLevel::Normal, "");
    log(level, LogLevel::Normal, "Configuration Summary:");
    log(level, LogLevel::Normal, &sections.join("\n\n"));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    let path = resolve_selected(&args.selector)?;
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", path.display()),
    );

    let text = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

    let anchors = check_anchors(&text).map_err(|e| format!("Validation failed: {e}"))?;
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  {} anchors, {} aliases",
            anchors.anchors.len(),
            anchors.aliases.len()
        ),
    );

    let document = resolve_document(&text).map_err(|e| format!("Config error: {e}"))?;
    let issues = check_required_keys(&document);
    if !issues.is_empty() {
        let report: Vec<String> = issues
            .iter()
            .map(|issue| format!("  {}", key_issue_error(issue)))
            .collect();
        return Err(format!("Validation failed:\n{}", report.join("\n")));
    }

    let config = parse_config(&text).map_err(|e| format!("Config error: {e}"))?;
    validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;

    if args.check_paths {
        check_paths(&config).map_err(|e| format!("Validation failed: {e}"))?;
        log(level, LogLevel::Verbose, "  All referenced paths exist");
    }

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&config, &anchors, level);
    }

    Ok(())
}
