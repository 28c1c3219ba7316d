//! Dataset metadata indexing
//!
//! Camera-trap datasets ship COCO-style JSON metadata: a list of images and a
//! list of annotations naming each image's category. The index pairs every
//! annotation with its image file and the training label its category maps
//! to. Images themselves are never opened here.

mod index;
mod kind;
mod labels;
mod metadata;


pub use index::{MetadataIndex, Sample};
pub use kind::{DatasetKind, Split};
pub use labels::{LabelMap, NACTI_NOT_ANIMAL};
pub use metadata::{Annotation, Category, ImageId, ImageRecord, Metadata};
