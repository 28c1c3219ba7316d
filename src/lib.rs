//! camtrap: experiment configuration toolkit for camera-trap image classifiers
//!
//! Loads the YAML experiment documents that drive classifier runs (model,
//! train, eval and data sections), resolves their anchors and merge keys,
//! validates every hyperparameter, and provides the framework-independent
//! pieces of a run around them:
//!
//! - [`config`]: typed schema, loader, anchor checks, validation, CLI arguments
//! - [`experiment`]: run tags, checkpoint naming, resume arithmetic, StepLR
//! - [`dataset`]: COCO-style metadata indexing and label mapping
//! - [`eval`]: prediction heads, confusion matrix, ROC curves
//!
//! # Example
//!
//! ```no_run
//! use camtrap::config::load_config;
//! use camtrap::experiment::{RunMode, RunPlan};
//!
//! let config = load_config("configs/resnet50.yml")?;
//! let plan = RunPlan::new(&config, RunMode::Train, "20240101-120000", None);
//! println!("{plan}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod experiment;

pub use error::{Error, Result};
