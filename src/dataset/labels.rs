//! Category-to-label mapping

use super::kind::DatasetKind;
use super::metadata::Metadata;
use crate::config::LabelType;
use std::collections::BTreeMap;

/// NACTI categories that are not animals (empty frames, vehicles)
pub const NACTI_NOT_ANIMAL: &[u32] = &[16, 68];

/// NACTI categories with a binary label
const NACTI_BINARY_IDS: &[u32] = &[
    1, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 21, 22, 23, 24, 26, 27, 28, 29,
    30, 31, 32, 33, 34, 35, 36, 37, 38, 40, 41, 42, 43, 44, 46, 47, 50, 53, 54, 55, 56, 57, 58, 59,
    60, 62, 63, 64, 65, 66, 67, 68, 69, 70,
];

/// Wildcam category for a frame with nothing in it
const WILDCAM_EMPTY: u32 = 0;

/// Maps dataset category ids to training labels `0..num_classes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: BTreeMap<u32, usize>,
    num_classes: usize,
}

impl LabelMap {
    /// Binary: 1 = animal, 0 = not animal. Multi: one dense label per category.
    pub fn for_dataset(kind: DatasetKind, label_type: LabelType, metadata: &Metadata) -> Self {
        match (label_type, kind) {
            (LabelType::Binary, DatasetKind::Nacti) => Self::binary(
                NACTI_BINARY_IDS.iter().copied(),
                |id| !NACTI_NOT_ANIMAL.contains(&id),
            ),
            (LabelType::Binary, DatasetKind::Wildcam) => {
                Self::binary(metadata.category_ids(), |id| id != WILDCAM_EMPTY)
            }
            (LabelType::Multi, _) => Self::dense(metadata.category_ids()),
        }
    }

    fn binary(ids: impl IntoIterator<Item = u32>, is_animal: impl Fn(u32) -> bool) -> Self {
        Self {
            labels: ids
                .into_iter()
                .map(|id| (id, usize::from(is_animal(id))))
                .collect(),
            num_classes: 2,
        }
    }

    fn dense(ids: Vec<u32>) -> Self {
        let num_classes = ids.len();
        Self {
            labels: ids.into_iter().enumerate().map(|(i, id)| (id, i)).collect(),
            num_classes,
        }
    }

    /// Label for a category, if the category is mapped
    pub fn get(&self, category_id: u32) -> Option<usize> {
        self.labels.get(&category_id).copied()
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
