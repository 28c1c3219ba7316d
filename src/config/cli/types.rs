//! CLI value enums

use crate::dataset::Split;
use crate::experiment::RunMode;

/// Output format for the info command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Unknown output format: {s}. Valid formats: text, json, yaml"
            )),
        }
    }
}

/// Run mode for the plan command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ModeArg {
    #[default]
    Train,
    Eval,
}

impl std::str::FromStr for ModeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "train" => Ok(ModeArg::Train),
            "eval" => Ok(ModeArg::Eval),
            _ => Err(format!("Unknown mode: {s}. Valid modes: train, eval")),
        }
    }
}

impl From<ModeArg> for RunMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Train => RunMode::Train,
            ModeArg::Eval => RunMode::Eval,
        }
    }
}

/// Dataset split for the index command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SplitArg {
    #[default]
    Train,
    Val,
    Eval,
}

impl std::str::FromStr for SplitArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "train" => Ok(SplitArg::Train),
            "val" => Ok(SplitArg::Val),
            "eval" => Ok(SplitArg::Eval),
            _ => Err(format!("Unknown split: {s}. Valid splits: train, val, eval")),
        }
    }
}

impl From<SplitArg> for Split {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Train => Split::Train,
            SplitArg::Val => Split::Val,
            SplitArg::Eval => Split::Eval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("toml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("train".parse::<ModeArg>().unwrap(), ModeArg::Train);
        assert_eq!("Eval".parse::<ModeArg>().unwrap(), ModeArg::Eval);
        assert!("infer".parse::<ModeArg>().is_err());
        assert_eq!(RunMode::from(ModeArg::Eval), RunMode::Eval);
    }

    #[test]
    fn test_split_from_str() {
        assert_eq!("val".parse::<SplitArg>().unwrap(), SplitArg::Val);
        assert!("test".parse::<SplitArg>().is_err());
        assert_eq!(Split::from(SplitArg::Eval), Split::Eval);
        assert_eq!(SplitArg::default(), SplitArg::Train);
    }
}
