//! Prediction heads: turning raw model outputs into class predictions

use crate::error::{Error, Result};
use std::fmt;

/// Rule applied to a sample's output vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Head {
    /// One logit; positive when `sigmoid(logit) > threshold`
    Sigmoid { threshold: f64 },
    /// One logit per class; the largest wins
    Softmax,
}

impl Head {
    /// Sigmoid head for a single output unit, softmax otherwise
    pub fn for_classes(num_classes: usize) -> Self {
        if num_classes > 1 {
            Head::Softmax
        } else {
            Head::Sigmoid { threshold: 0.5 }
        }
    }

    /// Predicted class index
    pub fn predict(&self, logits: &[f64]) -> Result<usize> {
        match self {
            Head::Sigmoid { threshold } => {
                let logit = single_logit(logits)?;
                Ok(usize::from(sigmoid(logit) > *threshold))
            }
            Head::Softmax => argmax(logits)
                .ok_or_else(|| Error::Eval("cannot take argmax of empty output".to_string())),
        }
    }

    /// Probability of the positive class, used as the ROC score
    ///
    /// Softmax heads only have a positive class when they have two outputs.
    pub fn positive_score(&self, logits: &[f64]) -> Result<f64> {
        match self {
            Head::Sigmoid { .. } => single_logit(logits).map(sigmoid),
            Head::Softmax => match logits {
                [neg, pos] => Ok(softmax(&[*neg, *pos])[1]),
                _ => Err(Error::Eval(format!(
                    "positive-class score needs 2 outputs, got {}",
                    logits.len()
                ))),
            },
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Head::Sigmoid { threshold } => write!(f, "sigmoid (threshold {threshold})"),
            Head::Softmax => write!(f, "softmax (argmax)"),
        }
    }
}

fn single_logit(logits: &[f64]) -> Result<f64> {
    match logits {
        [logit] => Ok(*logit),
        _ => Err(Error::Eval(format!(
            "sigmoid head expects 1 output, got {}",
            logits.len()
        ))),
    }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Numerically stable softmax
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest value; the first one wins ties
fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_head_for_classes() {
        assert_eq!(Head::for_classes(1), Head::Sigmoid { threshold: 0.5 });
        assert_eq!(Head::for_classes(2), Head::Softmax);
        assert_eq!(Head::for_classes(30), Head::Softmax);
    }

    #[test]
    fn test_sigmoid_predict() {
        let head = Head::for_classes(1);
        assert_eq!(head.predict(&[2.0]).unwrap(), 1);
        assert_eq!(head.predict(&[-0.1]).unwrap(), 0);
        // sigmoid(0) == 0.5 is not strictly greater than the threshold
        assert_eq!(head.predict(&[0.0]).unwrap(), 0);
        assert!(head.predict(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_softmax_predict() {
        let head = Head::Softmax;
        assert_eq!(head.predict(&[0.1, 3.0, -1.0]).unwrap(), 1);
        assert_eq!(head.predict(&[1.0, 1.0]).unwrap(), 0);
        assert!(head.predict(&[]).is_err());
    }

    #[test]
    fn test_positive_score() {
        assert_relative_eq!(Head::for_classes(1).positive_score(&[0.0]).unwrap(), 0.5);
        let score = Head::Softmax.positive_score(&[0.0, 0.0]).unwrap();
        assert_relative_eq!(score, 0.5);
        assert!(Head::Softmax.positive_score(&[0.0, 1.0, 2.0]).is_err());
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1000.0, 1001.0, 999.0]);
        assert_relative_eq!(probs.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(probs[1] > probs[0] && probs[0] > probs[2]);
    }
}
