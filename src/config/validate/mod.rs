//! Configuration validation
//!
//! Validates experiment documents for correctness before a run starts.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::{
    check_paths, validate_config, KNOWN_CRITERIA, KNOWN_DATASETS, KNOWN_MODELS, KNOWN_OPTIMIZERS,
};
