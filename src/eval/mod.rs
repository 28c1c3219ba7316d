//! Evaluation metrics for classifier outputs
//!
//! Model outputs are produced elsewhere; this module turns them into
//! predictions, accuracy, a confusion matrix and, for binary heads, a ROC
//! curve.

mod confusion;
mod head;
mod roc;

pub use confusion::ConfusionMatrix;
pub use head::{sigmoid, softmax, Head};
pub use roc::{roc_curve, RocCurve, RocPoint};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Model outputs and labels, as exported by a framework
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreInput {
    /// One entry per sample: a single logit or a vector of logits
    pub outputs: Vec<OutputRow>,
    pub labels: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OutputRow {
    Logit(f64),
    Logits(Vec<f64>),
}

impl OutputRow {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            OutputRow::Logit(x) => std::slice::from_ref(x),
            OutputRow::Logits(xs) => xs,
        }
    }
}

impl ScoreInput {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        serde_json::from_str(&json).map_err(|e| {
            Error::Serialization(format!("Invalid score input {}: {e}", path.display()))
        })
    }
}

/// Result of scoring one evaluation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    pub num_samples: usize,
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roc: Option<RocCurve>,
}

/// Whether a ROC curve can be drawn: binary labels and a positive-class
/// score for every row
pub fn supports_roc(head: Head, outputs: &[OutputRow], labels: &[usize]) -> bool {
    labels.iter().all(|&l| l <= 1)
        && outputs
            .iter()
            .all(|row| head.positive_score(row.as_slice()).is_ok())
}

/// Score model outputs against labels
///
/// With `with_roc`, labels must be 0/1 and the head must yield a
/// positive-class score.
pub fn evaluate(
    head: Head,
    outputs: &[OutputRow],
    labels: &[usize],
    with_roc: bool,
) -> Result<EvalReport> {
    if outputs.len() != labels.len() {
        return Err(Error::Eval(format!(
            "{} outputs for {} labels",
            outputs.len(),
            labels.len()
        )));
    }

    let predictions = outputs
        .iter()
        .map(|row| head.predict(row.as_slice()))
        .collect::<Result<Vec<_>>>()?;

    let min_classes = match head {
        Head::Sigmoid { .. } => 2,
        Head::Softmax => outputs.first().map_or(0, |row| row.as_slice().len()),
    };
    let confusion = ConfusionMatrix::from_predictions(&predictions, labels, min_classes)?;

    let roc = if with_roc {
        if let Some(bad) = labels.iter().find(|&&l| l > 1) {
            return Err(Error::Eval(format!(
                "ROC needs binary labels, found label {bad}"
            )));
        }
        let scores = outputs
            .iter()
            .map(|row| head.positive_score(row.as_slice()))
            .collect::<Result<Vec<_>>>()?;
        let positives: Vec<bool> = labels.iter().map(|&l| l == 1).collect();
        Some(roc_curve(&scores, &positives)?)
    } else {
        None
    };

    Ok(EvalReport {
        num_samples: labels.len(),
        accuracy: confusion.accuracy(),
        confusion,
        roc,
    })
}
