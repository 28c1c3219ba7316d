//! Run tags and checkpoint file names

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Timestamp prefix of every run tag
pub const TAG_TIME_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Extension of model checkpoints
pub const CHECKPOINT_EXTENSION: &str = "pth";

/// Build a run tag from the current time and an optional user tag
pub fn generate_tag(user_tag: &str) -> String {
    generate_tag_at(user_tag, Utc::now())
}

/// Build a run tag: `YYYYmmdd-HHMMSS`, then `-<user_tag>` when one is given.
///
/// Characters outside `[A-Za-z0-9._-]` in the user tag become `_` so the tag
/// is always safe inside a file name.
pub fn generate_tag_at(user_tag: &str, now: DateTime<Utc>) -> String {
    let stamp = now.format(TAG_TIME_FORMAT).to_string();
    let user_tag = user_tag.trim();
    if user_tag.is_empty() {
        return stamp;
    }

    let cleaned: String = user_tag
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stamp}-{cleaned}")
}

/// Checkpoint path for a model and run tag: `<save_dir>/<model_name>_<tag>.pth`
pub fn save_path(save_dir: &Path, model_name: &str, tag: &str) -> PathBuf {
    save_dir.join(format!("{model_name}_{tag}.{CHECKPOINT_EXTENSION}"))
}

/// Sidecar manifest next to a checkpoint
pub fn manifest_path(checkpoint: &Path) -> PathBuf {
    checkpoint.with_extension("json")
}
