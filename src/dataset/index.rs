//! Annotation index: image path and label per sample

use super::kind::{DatasetKind, Split};
use super::labels::LabelMap;
use super::metadata::{ImageId, ImageRecord, Metadata};
use crate::config::LabelType;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// One annotated image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub image_id: ImageId,
    pub image_path: PathBuf,
    pub category_id: u32,
    pub label: usize,
}

/// All samples of one dataset split, in annotation order
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataIndex {
    pub kind: DatasetKind,
    pub split: Split,
    pub samples: Vec<Sample>,
    pub num_classes: usize,
}

impl MetadataIndex {
    /// Load a split's metadata from under `root` and index it
    pub fn build(
        root: &Path,
        kind: DatasetKind,
        split: Split,
        label_type: LabelType,
    ) -> Result<Self> {
        let metadata_path = kind.metadata_path(root, split);
        let metadata = Metadata::load(&metadata_path)?;
        let base_dir = metadata_path
            .parent()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
        let labels = LabelMap::for_dataset(kind, label_type, &metadata);

        let index = Self::from_metadata(kind, split, &metadata, &base_dir, &labels)?;
        tracing::info!(
            dataset = %kind,
            %split,
            samples = index.len(),
            classes = index.num_classes,
            "indexed dataset metadata"
        );
        Ok(index)
    }

    /// Index already-loaded metadata; image paths are joined onto `base_dir`
    pub fn from_metadata(
        kind: DatasetKind,
        split: Split,
        metadata: &Metadata,
        base_dir: &Path,
        labels: &LabelMap,
    ) -> Result<Self> {
        let images: HashMap<&ImageId, &ImageRecord> =
            metadata.images.iter().map(|img| (&img.id, img)).collect();

        let samples = metadata
            .annotations
            .iter()
            .map(|ann| -> Result<Sample> {
                let image = images.get(&ann.image_id).ok_or_else(|| {
                    Error::Dataset(format!(
                        "annotation refers to unknown image {}",
                        ann.image_id
                    ))
                })?;
                let label = labels.get(ann.category_id).ok_or_else(|| {
                    Error::Dataset(format!(
                        "category {} of image {} has no {kind} label",
                        ann.category_id, ann.image_id
                    ))
                })?;
                Ok(Sample {
                    image_id: ann.image_id.clone(),
                    image_path: base_dir.join(&image.file_name),
                    category_id: ann.category_id,
                    label,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind,
            split,
            samples,
            num_classes: labels.num_classes(),
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Batches per epoch; the last batch may be short
    pub fn num_batches(&self, batch_size: usize) -> usize {
        if batch_size == 0 {
            return 0;
        }
        self.samples.len().div_ceil(batch_size)
    }

    /// Samples per label
    pub fn label_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for sample in &self.samples {
            *counts.entry(sample.label).or_insert(0) += 1;
        }
        counts
    }
}
