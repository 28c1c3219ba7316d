//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::{ExperimentConfig, LabelType};

/// Architectures the classifier builder knows
pub const KNOWN_MODELS: &[&str] = &[
    "resnet18",
    "resnet34",
    "resnet50",
    "resnet101",
    "resnet152",
    "alexnet",
    "vgg11_bn",
    "squeezenet",
    "densenet121",
    "inception_v3",
];

pub const KNOWN_OPTIMIZERS: &[&str] = &["rmsprop", "sgd", "adam", "adamw"];

pub const KNOWN_CRITERIA: &[&str] = &["cross_entropy", "bce_with_logits", "bce"];

pub const KNOWN_DATASETS: &[&str] = &["wildcam", "nacti"];

/// Validate an experiment document
///
/// Checks:
/// - Names (model, optimizer, criterion, dataset tags) are known
/// - Numeric values are in valid ranges
/// - Binary labels are paired with a one- or two-unit head
///
/// Filesystem references are left to [`check_paths`].
pub fn validate_config(config: &ExperimentConfig) -> Result<(), ValidationError> {
    let model = &config.model;
    if !KNOWN_MODELS.contains(&model.name.as_str()) {
        return Err(ValidationError::UnknownModel(model.name.clone()));
    }
    if model.num_classes == 0 {
        return Err(ValidationError::InvalidNumClasses(model.num_classes));
    }
    if config.data.label_type == LabelType::Binary && model.num_classes > 2 {
        return Err(ValidationError::BinaryClassMismatch(model.num_classes));
    }

    let train = &config.train;
    if train.num_epochs == 0 {
        return Err(ValidationError::InvalidEpochs(train.num_epochs));
    }

    let optimizer = &train.optimizer;
    if !KNOWN_OPTIMIZERS.contains(&optimizer.name.as_str()) {
        return Err(ValidationError::InvalidOptimizer(optimizer.name.clone()));
    }
    // Negated comparisons so NaN is rejected too
    if !(optimizer.lr > 0.0 && optimizer.lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate(optimizer.lr));
    }
    if !(optimizer.alpha >= 0.0 && optimizer.alpha < 1.0) {
        return Err(ValidationError::InvalidAlpha(optimizer.alpha));
    }
    if !(optimizer.eps > 0.0) {
        return Err(ValidationError::InvalidEps(optimizer.eps));
    }
    if !(optimizer.weight_decay >= 0.0) {
        return Err(ValidationError::InvalidWeightDecay(optimizer.weight_decay));
    }

    let schedule = &train.lr_schedule;
    if schedule.step_size == 0 {
        return Err(ValidationError::InvalidStepSize(schedule.step_size));
    }
    if !(schedule.gamma > 0.0 && schedule.gamma <= 1.0) {
        return Err(ValidationError::InvalidGamma(schedule.gamma));
    }

    if !KNOWN_CRITERIA.contains(&train.criterion.name.as_str()) {
        return Err(ValidationError::InvalidCriterion(
            train.criterion.name.clone(),
        ));
    }

    check_dataset_tag("train.data", &train.data)?;
    check_dataset_tag("eval.data", &config.eval.data)?;

    if config.data.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(config.data.batch_size));
    }

    Ok(())
}

fn check_dataset_tag(section: &'static str, tag: &str) -> Result<(), ValidationError> {
    if KNOWN_DATASETS.contains(&tag) {
        Ok(())
    } else {
        Err(ValidationError::UnknownDataset {
            section,
            tag: tag.to_string(),
        })
    }
}

/// Check that every path the document refers to exists on this machine
pub fn check_paths(config: &ExperimentConfig) -> Result<(), ValidationError> {
    if !config.data.root_dir.is_dir() {
        return Err(ValidationError::DataRootNotFound(
            config.data.root_dir.display().to_string(),
        ));
    }

    if let Some(resume) = &config.train.checkpoint_path {
        if !resume.exists() {
            return Err(ValidationError::CheckpointNotFound(
                resume.display().to_string(),
            ));
        }
    }

    if !config.eval.checkpoint_path.exists() {
        return Err(ValidationError::CheckpointNotFound(
            config.eval.checkpoint_path.display().to_string(),
        ));
    }

    Ok(())
}
