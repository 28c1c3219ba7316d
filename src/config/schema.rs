//! YAML schema for camera-trap experiment documents
//!
//! An experiment document has four sections: `model`, `train`, `eval` and
//! `data`. Every key of the reference document is required; `train.save_dir`,
//! `train.seed` and extra optimizer parameters are optional.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Deserialize a bool from a YAML boolean (`false`, `False`) or a quoted string (`"false"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

/// Deserialize a float that YAML 1.1 writers may have emitted as a string (`1e-6`).
fn deserialize_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        Num(f64),
        Str(String),
    }

    match NumOrString::deserialize(deserializer)? {
        NumOrString::Num(v) => Ok(v),
        NumOrString::Str(s) => s.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("expected a number, got '{s}'"))
        }),
    }
}

/// Empty string means "no checkpoint".
fn deserialize_optional_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

fn serialize_optional_path<S>(path: &Option<PathBuf>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match path {
        Some(p) => p.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

/// Complete experiment document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Model architecture
    pub model: ModelSpec,

    /// Training run parameters
    pub train: TrainSpec,

    /// Evaluation parameters
    pub eval: EvalSpec,

    /// Shared data-loading parameters
    pub data: DataSpec,
}

/// Model architecture and output size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Architecture name (e.g. "resnet50")
    pub name: String,

    /// Number of output units; 1 means a single sigmoid logit
    pub num_classes: usize,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            name: "resnet50".to_string(),
            num_classes: 1,
        }
    }
}

/// Training run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSpec {
    /// Dataset tag (e.g. "wildcam")
    pub data: String,

    /// Epoch at which training stops
    pub num_epochs: usize,

    /// Checkpoint to resume from; `''` in YAML
    #[serde(
        deserialize_with = "deserialize_optional_path",
        serialize_with = "serialize_optional_path"
    )]
    pub checkpoint_path: Option<PathBuf>,

    pub optimizer: OptimizerSpec,

    pub lr_schedule: LrScheduleSpec,

    pub criterion: CriterionSpec,

    /// Directory new checkpoints are written to
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,

    /// Global random seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TrainSpec {
    fn default() -> Self {
        Self {
            data: "wildcam".to_string(),
            num_epochs: 100,
            checkpoint_path: None,
            optimizer: OptimizerSpec::default(),
            lr_schedule: LrScheduleSpec::default(),
            criterion: CriterionSpec::default(),
            save_dir: default_save_dir(),
            seed: None,
        }
    }
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("checkpoints")
}

/// Optimizer specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSpec {
    /// Optimizer name: "rmsprop" | "sgd" | "adam" | "adamw"
    pub name: String,

    /// Learning rate
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub lr: f64,

    /// Smoothing constant of the squared-gradient average
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub alpha: f64,

    /// Denominator term for numerical stability
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub eps: f64,

    /// L2 penalty
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub weight_decay: f64,

    /// Optimizer-specific extras (momentum, centered, betas, ...)
    #[serde(flatten)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl Default for OptimizerSpec {
    fn default() -> Self {
        Self {
            name: "rmsprop".to_string(),
            lr: 0.001,
            alpha: 0.99,
            eps: 1e-6,
            weight_decay: 0.0,
            params: BTreeMap::new(),
        }
    }
}

/// Step learning-rate decay: multiply by `gamma` every `step_size` epochs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LrScheduleSpec {
    pub step_size: usize,

    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub gamma: f64,
}

impl Default for LrScheduleSpec {
    fn default() -> Self {
        Self {
            step_size: 3,
            gamma: 0.1,
        }
    }
}

/// Loss function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSpec {
    /// Criterion name: "cross_entropy" | "bce_with_logits" | "bce"
    pub name: String,
}

impl Default for CriterionSpec {
    fn default() -> Self {
        Self {
            name: "cross_entropy".to_string(),
        }
    }
}

/// Evaluation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSpec {
    /// Dataset tag
    pub data: String,

    /// Compute and save a ROC curve (binary heads only)
    #[serde(deserialize_with = "deserialize_bool_lenient")]
    pub use_roc: bool,

    /// Checkpoint to evaluate
    pub checkpoint_path: PathBuf,
}

impl Default for EvalSpec {
    fn default() -> Self {
        Self {
            data: "wildcam".to_string(),
            use_roc: false,
            checkpoint_path: PathBuf::from("checkpoints/resnet50_wildcam.pth"),
        }
    }
}

/// Data-loading parameters shared by train and eval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    /// Directory holding every dataset
    pub root_dir: PathBuf,

    pub batch_size: usize,

    /// Loader worker count; 0 loads on the calling thread
    pub num_workers: usize,

    pub label_type: LabelType,
}

impl Default for DataSpec {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("/mnt/nfs/work1/ds4cg/"),
            batch_size: 128,
            num_workers: 1,
            label_type: LabelType::Binary,
        }
    }
}

/// How dataset categories map onto training labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    /// Animal vs. no animal
    #[default]
    Binary,
    /// One label per dataset category
    Multi,
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelType::Binary => write!(f, "binary"),
            LabelType::Multi => write!(f, "multi"),
        }
    }
}
