//! Step learning-rate decay

use crate::config::TrainSpec;
use std::ops::Range;

/// Learning rate multiplied by `gamma` every `step_size` epochs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLr {
    pub base_lr: f64,
    pub step_size: usize,
    pub gamma: f64,
}

impl StepLr {
    pub fn new(base_lr: f64, step_size: usize, gamma: f64) -> Self {
        Self {
            base_lr,
            step_size,
            gamma,
        }
    }

    /// Schedule described by a train section
    pub fn from_train(train: &TrainSpec) -> Self {
        Self::new(
            train.optimizer.lr,
            train.lr_schedule.step_size,
            train.lr_schedule.gamma,
        )
    }

    /// Learning rate in effect during `epoch` (0-based)
    pub fn lr_at(&self, epoch: usize) -> f64 {
        if self.step_size == 0 {
            return self.base_lr;
        }
        let decays = i32::try_from(epoch / self.step_size).unwrap_or(i32::MAX);
        self.base_lr * self.gamma.powi(decays)
    }

    /// Epochs in `epochs` at which the rate changes
    pub fn decay_epochs(&self, epochs: Range<usize>) -> Vec<usize> {
        if self.step_size == 0 {
            return Vec::new();
        }
        let first = epochs
            .start
            .max(1)
            .div_ceil(self.step_size)
            .saturating_mul(self.step_size);
        (first..epochs.end).step_by(self.step_size).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_reference_schedule() {
        let schedule = StepLr::from_train(&TrainSpec::default());
        assert_eq!(schedule.lr_at(0), 0.001);
        assert_eq!(schedule.lr_at(2), 0.001);
        assert_relative_eq!(schedule.lr_at(3), 0.0001, max_relative = 1e-12);
        assert_relative_eq!(schedule.lr_at(5), 0.0001, max_relative = 1e-12);
        assert_relative_eq!(schedule.lr_at(6), 0.00001, max_relative = 1e-12);
    }

    #[test]
    fn test_decay_epochs() {
        let schedule = StepLr::new(0.1, 3, 0.5);
        assert_eq!(schedule.decay_epochs(0..10), vec![3, 6, 9]);
        assert!(schedule.decay_epochs(0..3).is_empty());
        assert_eq!(schedule.decay_epochs(4..13), vec![6, 9, 12]);
        assert_eq!(schedule.decay_epochs(6..7), vec![6]);
    }

    #[test]
    fn test_zero_step_size_never_decays() {
        let schedule = StepLr::new(0.1, 0, 0.5);
        assert_eq!(schedule.lr_at(100), 0.1);
        assert!(schedule.decay_epochs(0..100).is_empty());
    }

    #[test]
    fn test_huge_epoch_decays_to_zero() {
        let schedule = StepLr::new(0.1, 1, 0.5);
        assert_eq!(schedule.lr_at(usize::MAX), 0.0);
        assert_eq!(schedule.decay_epochs(usize::MAX - 2..usize::MAX).len(), 2);
    }

    proptest! {
        #[test]
        fn prop_lr_never_increases(
            base in 1e-6f64..1.0,
            step in 1usize..20,
            gamma in 0.01f64..=1.0,
            epoch in 0usize..200,
        ) {
            let schedule = StepLr::new(base, step, gamma);
            prop_assert!(schedule.lr_at(epoch + 1) <= schedule.lr_at(epoch));
            prop_assert!(schedule.lr_at(epoch) <= base);
        }

        #[test]
        fn prop_lr_constant_within_step(
            base in 1e-6f64..1.0,
            step in 1usize..20,
            gamma in 0.01f64..1.0,
            block in 0usize..10,
        ) {
            let schedule = StepLr::new(base, step, gamma);
            let first = schedule.lr_at(block * step);
            let last = schedule.lr_at(block * step + step - 1);
            prop_assert_eq!(first, last);
        }
    }
}
