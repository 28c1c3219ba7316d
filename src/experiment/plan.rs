//! Run plans: the concrete run an experiment config describes

use super::checkpoint::CheckpointManifest;
use super::schedule::StepLr;
use super::tag::save_path;
use crate::config::{ExperimentConfig, LabelType};
use crate::eval::Head;
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

/// Epochs added when a resumed checkpoint is already past `num_epochs`
pub const RESUME_EXTRA_EPOCHS: usize = 50;

/// Whether a run trains or evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Train,
    Eval,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Train => write!(f, "train"),
            RunMode::Eval => write!(f, "eval"),
        }
    }
}

/// Everything a training framework needs to drive one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub mode: RunMode,
    pub tag: String,
    pub model_name: String,
    pub num_classes: usize,
    /// Dataset tag of the section selected by `mode`
    pub dataset: String,
    pub label_type: LabelType,
    pub batch_size: usize,
    pub num_workers: usize,
    pub start_epoch: usize,
    pub end_epoch: usize,
    /// Train: where improved weights are saved. Eval: the weights evaluated.
    pub checkpoint_path: PathBuf,
    /// Weights to initialise from before training
    pub resume_from: Option<PathBuf>,
    pub schedule: StepLr,
    pub head: Head,
    pub use_roc: bool,
}

impl RunPlan {
    /// Derive the run from a config
    ///
    /// Training resumes at the manifest's epoch when one is given. When that
    /// epoch is already past `train.num_epochs`, the run is extended by
    /// [`RESUME_EXTRA_EPOCHS`].
    pub fn new(
        config: &ExperimentConfig,
        mode: RunMode,
        tag: &str,
        resume: Option<&CheckpointManifest>,
    ) -> Self {
        let start_epoch = resume.map_or(0, |m| m.epoch);
        let mut end_epoch = config.train.num_epochs;
        if end_epoch < start_epoch {
            end_epoch = start_epoch.saturating_add(RESUME_EXTRA_EPOCHS);
            tracing::warn!(
                num_epochs = config.train.num_epochs,
                start_epoch,
                end_epoch,
                "checkpoint is past num_epochs, extending run"
            );
        }

        let (dataset, checkpoint_path) = match mode {
            RunMode::Train => (
                config.train.data.clone(),
                save_path(&config.train.save_dir, &config.model.name, tag),
            ),
            RunMode::Eval => (
                config.eval.data.clone(),
                config.eval.checkpoint_path.clone(),
            ),
        };

        let resume_from = resume
            .map(|m| m.checkpoint.clone())
            .or_else(|| config.train.checkpoint_path.clone());

        Self {
            mode,
            tag: tag.to_string(),
            model_name: config.model.name.clone(),
            num_classes: config.model.num_classes,
            dataset,
            label_type: config.data.label_type,
            batch_size: config.data.batch_size,
            num_workers: config.data.num_workers,
            start_epoch,
            end_epoch,
            checkpoint_path,
            resume_from,
            schedule: StepLr::from_train(&config.train),
            head: Head::for_classes(config.model.num_classes),
            use_roc: mode == RunMode::Eval && config.eval.use_roc,
        }
    }

    /// Epochs this run trains for
    pub fn epochs(&self) -> Range<usize> {
        match self.mode {
            RunMode::Train => self.start_epoch..self.end_epoch,
            RunMode::Eval => 0..0,
        }
    }

    pub fn is_resumed(&self) -> bool {
        self.resume_from.is_some()
    }
}

impl fmt::Display for RunPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run plan ({}):", self.mode)?;
        writeln!(f, "  Tag: {}", self.tag)?;
        writeln!(
            f,
            "  Model: {} ({} output{})",
            self.model_name,
            self.num_classes,
            if self.num_classes == 1 { "" } else { "s" }
        )?;
        writeln!(f, "  Head: {}", self.head)?;
        writeln!(f, "  Dataset: {} ({} labels)", self.dataset, self.label_type)?;
        writeln!(
            f,
            "  Batch size: {} ({} workers)",
            self.batch_size, self.num_workers
        )?;

        match self.mode {
            RunMode::Train => {
                writeln!(
                    f,
                    "  Epochs: {}..{} ({} to run)",
                    self.start_epoch,
                    self.end_epoch,
                    self.epochs().len()
                )?;
                if let Some(resume) = &self.resume_from {
                    writeln!(f, "  Resume from: {}", resume.display())?;
                }
                writeln!(
                    f,
                    "  Learning rate: {} (x{} every {} epochs)",
                    self.schedule.base_lr, self.schedule.gamma, self.schedule.step_size
                )?;
                write!(f, "  Best checkpoint: {}", self.checkpoint_path.display())
            }
            RunMode::Eval => {
                writeln!(f, "  Checkpoint: {}", self.checkpoint_path.display())?;
                write!(f, "  ROC curve: {}", if self.use_roc { "yes" } else { "no" })
            }
        }
    }
}

/// Tracks the best validation accuracy seen so far
///
/// A checkpoint is written only when accuracy strictly improves, starting
/// from a baseline of 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestTracker {
    best_accuracy: f64,
    best_epoch: Option<usize>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from the accuracy recorded in a resumed checkpoint
    pub fn from_manifest(manifest: &CheckpointManifest) -> Self {
        Self {
            best_accuracy: manifest.val_accuracy,
            best_epoch: Some(manifest.epoch),
        }
    }

    /// Record an epoch's accuracy; true when it should be checkpointed
    pub fn observe(&mut self, epoch: usize, accuracy: f64) -> bool {
        if accuracy > self.best_accuracy {
            self.best_accuracy = accuracy;
            self.best_epoch = Some(epoch);
            true
        } else {
            false
        }
    }

    pub fn best_accuracy(&self) -> f64 {
        self.best_accuracy
    }

    pub fn best_epoch(&self) -> Option<usize> {
        self.best_epoch
    }
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

    fn manifest(epoch: usize) -> CheckpointManifest {
        CheckpointManifest::new(epoch, "resnet50", "old", 0.8, "checkpoints/resnet50_old.pth")
    }

    #[test]
    fn test_fresh_training_plan() {
        let plan = RunPlan::new(&config(), RunMode::Train, "20240101-000000", None);
        assert_eq!(plan.epochs(), 0..100);
        assert_eq!(
            plan.checkpoint_path,
            PathBuf::from("checkpoints/resnet50_20240101-000000.pth")
        );
        assert!(!plan.is_resumed());
        assert_eq!(plan.head, Head::Sigmoid { threshold: 0.5 });
        assert_eq!(plan.dataset, "wildcam");
        assert!(!plan.use_roc);
    }

    #[test]
    fn test_resume_within_budget() {
        let plan = RunPlan::new(&config(), RunMode::Train, "t", Some(&manifest(40)));
        assert_eq!(plan.epochs(), 40..100);
        assert_eq!(
            plan.resume_from,
            Some(PathBuf::from("checkpoints/resnet50_old.pth"))
        );
    }

    #[test]
    fn test_resume_past_budget_extends_run() {
        let plan = RunPlan::new(&config(), RunMode::Train, "t", Some(&manifest(120)));
        assert_eq!(plan.start_epoch, 120);
        assert_eq!(plan.end_epoch, 170);
    }

    #[test]
    fn test_resume_at_max_epoch_saturates() {
        let plan = RunPlan::new(&config(), RunMode::Train, "t", Some(&manifest(usize::MAX)));
        assert_eq!(plan.start_epoch, usize::MAX);
        assert_eq!(plan.end_epoch, usize::MAX);
        assert!(plan.epochs().is_empty());
    }

    #[test]
    fn test_resume_at_budget_runs_nothing() {
        let plan = RunPlan::new(&config(), RunMode::Train, "t", Some(&manifest(100)));
        assert!(plan.epochs().is_empty());
    }

    #[test]
    fn test_config_checkpoint_used_for_resume() {
        let mut config = config();
        config.train.checkpoint_path = Some(PathBuf::from("warm/start.pth"));
        let plan = RunPlan::new(&config, RunMode::Train, "t", None);
        assert_eq!(plan.resume_from, Some(PathBuf::from("warm/start.pth")));
        assert_eq!(plan.start_epoch, 0);
    }

    #[test]
    fn test_eval_plan() {
        let mut config = config();
        config.eval.use_roc = true;
        config.eval.data = "nacti".to_string();
        let plan = RunPlan::new(&config, RunMode::Eval, "t", None);
        assert_eq!(plan.dataset, "nacti");
        assert_eq!(
            plan.checkpoint_path,
            PathBuf::from("checkpoints/resnet50_wildcam.pth")
        );
        assert!(plan.use_roc);
        assert!(plan.epochs().is_empty());
    }

    #[test]
    fn test_softmax_head_for_multiclass() {
        let mut config = config();
        config.model.num_classes = 12;
        config.data.label_type = LabelType::Multi;
        let plan = RunPlan::new(&config, RunMode::Train, "t", None);
        assert_eq!(plan.head, Head::Softmax);
    }

    #[test]
    fn test_plan_display() {
        let text = RunPlan::new(&config(), RunMode::Train, "abc", None).to_string();
        assert!(text.contains("Run plan (train):"));
        assert!(text.contains("Epochs: 0..100 (100 to run)"));
        assert!(text.contains("resnet50_abc.pth"));

        let text = RunPlan::new(&config(), RunMode::Eval, "abc", None).to_string();
        assert!(text.contains("ROC curve: no"));
    }

    #[test]
    fn test_best_tracker_strict_improvement() {
        let mut tracker = BestTracker::new();
        assert!(!tracker.observe(0, 0.0));
        assert!(tracker.observe(1, 0.7));
        assert!(!tracker.observe(2, 0.7));
        assert!(!tracker.observe(3, 0.6));
        assert!(tracker.observe(4, 0.75));
        assert_eq!(tracker.best_epoch(), Some(4));
        assert_eq!(tracker.best_accuracy(), 0.75);
    }

    #[test]
    fn test_best_tracker_from_manifest() {
        let mut tracker = BestTracker::from_manifest(&manifest(10));
        assert!(!tracker.observe(11, 0.79));
        assert!(tracker.observe(12, 0.81));
    }
}
