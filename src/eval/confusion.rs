//! Confusion matrix for classification results

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Element [i][j] counts samples with true label i predicted as j
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
    n_classes: usize,
}

impl ConfusionMatrix {
    pub fn new(n_classes: usize) -> Self {
        Self {
            matrix: vec![vec![0; n_classes]; n_classes],
            n_classes,
        }
    }

    /// Build from predictions and ground truth
    ///
    /// The matrix is sized to hold the largest label seen, and at least
    /// `min_classes`.
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize], min_classes: usize) -> Result<Self> {
        if y_pred.len() != y_true.len() {
            return Err(Error::Eval(format!(
                "{} predictions for {} labels",
                y_pred.len(),
                y_true.len()
            )));
        }

        let n_classes = y_pred
            .iter()
            .chain(y_true)
            .max()
            .map_or(0, |&m| m + 1)
            .max(min_classes);

        let mut cm = Self::new(n_classes);
        for (&pred, &truth) in y_pred.iter().zip(y_true) {
            cm.matrix[truth][pred] += 1;
        }
        Ok(cm)
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Count at [true_label][predicted_label]; `None` outside the matrix
    pub fn get(&self, true_label: usize, predicted_label: usize) -> Option<usize> {
        self.matrix.get(true_label)?.get(predicted_label).copied()
    }

    // Per-class counts below are zero for a class outside the matrix

    pub fn true_positives(&self, class: usize) -> usize {
        self.get(class, class).unwrap_or(0)
    }

    pub fn false_positives(&self, class: usize) -> usize {
        if class >= self.n_classes {
            return 0;
        }
        (0..self.n_classes)
            .filter(|&i| i != class)
            .map(|i| self.matrix[i][class])
            .sum()
    }

    pub fn false_negatives(&self, class: usize) -> usize {
        self.matrix.get(class).map_or(0, |row| {
            row.iter()
                .enumerate()
                .filter(|&(j, _)| j != class)
                .map(|(_, count)| count)
                .sum()
        })
    }

    /// Samples whose true label is `class`
    pub fn support(&self, class: usize) -> usize {
        self.matrix.get(class).map_or(0, |row| row.iter().sum())
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..self.n_classes).map(|i| self.matrix[i][i]).sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }

    /// TP / (TP + FN); 0.0 for a class with no support
    pub fn recall(&self, class: usize) -> f64 {
        let support = self.support(class);
        if support == 0 {
            return 0.0;
        }
        self.true_positives(class) as f64 / support as f64
    }

    /// TP / (TP + FP); 0.0 when the class is never predicted
    pub fn precision(&self, class: usize) -> f64 {
        let predicted = self.true_positives(class) + self.false_positives(class);
        if predicted == 0 {
            return 0.0;
        }
        self.true_positives(class) as f64 / predicted as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "")?;
        for j in 0..self.n_classes {
            write!(f, "{:>8}", format!("pred {j}"))?;
        }
        for (i, row) in self.matrix.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:>8}", format!("true {i}"))?;
            for count in row {
                write!(f, "{count:>8}")?;
            }
        }
        Ok(())
    }
}
