//! Run bookkeeping around an experiment config
//!
//! Everything here is arithmetic and naming: which epochs a run covers, where
//! its checkpoints go, what learning rate each epoch uses, and when a
//! validation result is worth a new checkpoint. No tensors are touched.

mod checkpoint;
mod plan;
mod schedule;
mod tag;

pub use checkpoint::CheckpointManifest;
pub use plan::{BestTracker, RunMode, RunPlan, RESUME_EXTRA_EPOCHS};
pub use schedule::StepLr;
pub use tag::{
    generate_tag, generate_tag_at, manifest_path, save_path, CHECKPOINT_EXTENSION, TAG_TIME_FORMAT,
};
