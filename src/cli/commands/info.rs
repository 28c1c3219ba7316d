//! Info command implementation

use super::load_selected;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{ExperimentConfig, InfoArgs, OutputFormat};

/// Text summary of a config, one entry per output line
pub fn format_info_text(config: &ExperimentConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Info:".to_string(),
        String::new(),
        format!(
            "Model: {} ({} outputs)",
            config.model.name, config.model.num_classes
        ),
        format!(
            "Optimizer: {} (lr={})",
            config.train.optimizer.name, config.train.optimizer.lr
        ),
        format!("Epochs: {}", config.train.num_epochs),
        format!("Batch size: {}", config.data.batch_size),
        format!(
            "Data: {} -> {} ({} labels)",
            config.train.data, config.eval.data, config.data.label_type
        ),
    ];
    if config.train.checkpoint_path.is_some() {
        lines.push("Resume: enabled".to_string());
    }
    if config.eval.use_roc {
        lines.push("ROC: enabled".to_string());
    }
    lines
}

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let config = load_selected(&args.selector)?;

    match args.format {
        OutputFormat::Text => {
            for line in format_info_text(&config) {
                log(level, LogLevel::Normal, &line);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataSpec, EvalSpec, ModelSpec, TrainSpec};

    fn config() -> ExperimentConfig {
        ExperimentConfig {
            model: ModelSpec::default(),
            train: TrainSpec::default(),
            eval: EvalSpec::default(),
            data: DataSpec::default(),
        }
    }

    #[test]
    fn test_format_info_text() {
        let lines = format_info_text(&config());
        assert_eq!(lines[0], "Configuration Info:");
        assert!(lines.contains(&"Model: resnet50 (1 outputs)".to_string()));
        assert!(lines.contains(&"Batch size: 128".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("ROC")));
    }

    #[test]
    fn test_format_info_text_flags() {
        let mut config = config();
        config.eval.use_roc = true;
        let lines = format_info_text(&config);
        assert_eq!(lines.last().map(String::as_str), Some("ROC: enabled"));
    }
}
