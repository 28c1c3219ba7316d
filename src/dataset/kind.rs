//! Known datasets and where their metadata lives

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Dataset named by a config's `data` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// iWildCam: category 0 is an empty frame
    Wildcam,
    /// North American Camera Trap Images
    Nacti,
}

/// Partition of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Val,
    /// Held-out evaluation; reads the validation annotations
    Eval,
}

impl FromStr for DatasetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "wildcam" => Ok(DatasetKind::Wildcam),
            "nacti" => Ok(DatasetKind::Nacti),
            _ => Err(Error::Dataset(format!(
                "Unknown dataset: {s}. Valid datasets: wildcam, nacti"
            ))),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Wildcam => write!(f, "wildcam"),
            DatasetKind::Nacti => write!(f, "nacti"),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Train => write!(f, "train"),
            Split::Val => write!(f, "val"),
            Split::Eval => write!(f, "eval"),
        }
    }
}

impl DatasetKind {
    /// Directory of this dataset under the data root
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        root.join(self.to_string())
    }

    /// Metadata file for a split
    ///
    /// - wildcam: `<root>/wildcam/<train|val>_annotations.json`
    /// - nacti: `<root>/nacti/nacti_metadata_tmp.json` for every split
    pub fn metadata_path(&self, root: &Path, split: Split) -> PathBuf {
        let dir = self.data_dir(root);
        match self {
            DatasetKind::Wildcam => {
                let split = match split {
                    Split::Train => "train",
                    Split::Val | Split::Eval => "val",
                };
                dir.join(format!("{split}_annotations.json"))
            }
            DatasetKind::Nacti => dir.join("nacti_metadata_tmp.json"),
        }
    }
}
