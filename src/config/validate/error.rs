//! Validation error types

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown model architecture: {0}")]
    UnknownModel(String),

    #[error("Invalid num_classes: {0} (must be > 0)")]
    InvalidNumClasses(usize),

    #[error("Binary labels need num_classes of 1 or 2, got {0}")]
    BinaryClassMismatch(usize),

    #[error("Invalid num_epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid optimizer: {0} (must be one of: rmsprop, sgd, adam, adamw)")]
    InvalidOptimizer(String),

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f64),

    #[error("Invalid alpha: {0} (must be in [0.0, 1.0))")]
    InvalidAlpha(f64),

    #[error("Invalid eps: {0} (must be > 0.0)")]
    InvalidEps(f64),

    #[error("Invalid weight decay: {0} (must be >= 0.0)")]
    InvalidWeightDecay(f64),

    #[error("Invalid lr_schedule.step_size: {0} (must be > 0)")]
    InvalidStepSize(usize),

    #[error("Invalid lr_schedule.gamma: {0} (must be > 0.0 and <= 1.0)")]
    InvalidGamma(f64),

    #[error("Invalid criterion: {0} (must be one of: cross_entropy, bce_with_logits, bce)")]
    InvalidCriterion(String),

    #[error("Unknown dataset tag for {section}: {tag} (must be one of: wildcam, nacti)")]
    UnknownDataset { section: &'static str, tag: String },

    #[error("Alias *{name} on line {line} does not refer to an earlier anchor")]
    DanglingAlias { name: String, line: usize },

    #[error("Missing required key: {0}")]
    MissingKey(String),

    #[error("Key {key} must be a {expected}")]
    WrongKeyType { key: String, expected: &'static str },

    #[error("Data root directory does not exist: {0}")]
    DataRootNotFound(String),

    #[error("Checkpoint does not exist: {0}")]
    CheckpointNotFound(String),
}
