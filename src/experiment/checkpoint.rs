//! Checkpoint manifests
//!
//! Weights are written by the training framework. The manifest next to them
//! records which epoch they came from so a later run can resume.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata stored beside a checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointManifest {
    /// Epoch whose weights the checkpoint holds
    pub epoch: usize,
    pub model_name: String,
    pub tag: String,
    /// Validation accuracy that triggered the save
    pub val_accuracy: f64,
    /// Weights file this manifest describes
    pub checkpoint: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl CheckpointManifest {
    pub fn new(
        epoch: usize,
        model_name: impl Into<String>,
        tag: impl Into<String>,
        val_accuracy: f64,
        checkpoint: impl Into<PathBuf>,
    ) -> Self {
        Self {
            epoch,
            model_name: model_name.into(),
            tag: tag.into(),
            val_accuracy,
            checkpoint: checkpoint.into(),
            created_at: Utc::now(),
        }
    }

    /// Write the manifest as pretty JSON
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("creating {}", parent.display()), e))?;
        }
        fs::write(path, json).map_err(|e| Error::io(format!("writing {}", path.display()), e))
    }

    /// Read a manifest written by [`CheckpointManifest::write`]
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        serde_json::from_str(&json).map_err(|e| {
            Error::Serialization(format!(
                "Invalid checkpoint manifest {}: {e}",
                path.display()
            ))
        })
    }
}
