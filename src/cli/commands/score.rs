//! Score command implementation

use super::load_selected;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::ScoreArgs;
use crate::eval::{evaluate, supports_roc, Head, ScoreInput};

pub fn run_score(args: ScoreArgs, level: LogLevel) -> Result<(), String> {
    let config = load_selected(&args.selector)?;
    let input = ScoreInput::load(&args.outputs).map_err(|e| format!("Input error: {e}"))?;

    let head = Head::for_classes(config.model.num_classes);
    // An explicit --roc-output must produce a curve; eval.use_roc alone is best effort
    let with_roc = if args.roc_output.is_some() {
        true
    } else if config.eval.use_roc {
        let supported = supports_roc(head, &input.outputs, &input.labels);
        if !supported {
            tracing::warn!(
                head = %head,
                num_classes = config.model.num_classes,
                "eval.use_roc needs a binary head and labels, skipping ROC"
            );
        }
        supported
    } else {
        false
    };

    let report = evaluate(head, &input.outputs, &input.labels, with_roc)
        .map_err(|e| format!("Score error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Scored {} samples with {head}: accuracy {:.4}",
            report.num_samples, report.accuracy
        ),
    );
    log(level, LogLevel::Verbose, &report.confusion.to_string());

    if let Some(roc) = &report.roc {
        let path = args
            .roc_output
            .unwrap_or_else(|| args.outputs.with_extension("roc.json"));
        roc.save(&path).map_err(|e| format!("ROC error: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format!("ROC AUC {:.4} saved to {}", roc.auc, path.display()),
        );
    }

    Ok(())
}
