//! COCO-style metadata files

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Image identifier; datasets use either numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageId {
    Num(u64),
    Str(String),
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageId::Num(n) => write!(f, "{n}"),
            ImageId::Str(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,
    /// Path relative to the metadata file's directory
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub image_id: ImageId,
    pub category_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// Contents of a metadata file; unknown top-level keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub images: Vec<ImageRecord>,
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Metadata {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading metadata {}", path.display()), e))?;
        serde_json::from_str(&json).map_err(|e| {
            Error::Dataset(format!("Invalid metadata {}: {e}", path.display()))
        })
    }

    /// Category ids in ascending order: the declared categories, or the
    /// annotated ones when none are declared
    pub fn category_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = if self.categories.is_empty() {
            self.annotations.iter().map(|a| a.category_id).collect()
        } else {
            self.categories.iter().map(|c| c.id).collect()
        };
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
