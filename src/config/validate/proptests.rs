//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_config() -> impl Strategy<Value = ExperimentConfig> {
    (
        1usize..=2,        // num_classes
        1usize..500,       // num_epochs
        1e-6f64..1.0,      // lr
        0.0f64..0.999,     // alpha
        1e-10f64..1e-3,    // eps
        1usize..30,        // step_size
        0.01f64..1.0,      // gamma
        1usize..1024,      // batch_size
    )
        .prop_map(
            |(num_classes, num_epochs, lr, alpha, eps, step_size, gamma, batch_size)| {
                ExperimentConfig {
                    model: ModelSpec {
                        num_classes,
                        ..Default::default()
                    },
                    train: TrainSpec {
                        num_epochs,
                        optimizer: OptimizerSpec {
                            lr,
                            alpha,
                            eps,
                            ..Default::default()
                        },
                        lr_schedule: LrScheduleSpec { step_size, gamma },
                        ..Default::default()
                    },
                    eval: EvalSpec::default(),
                    data: DataSpec {
                        batch_size,
                        ..Default::default()
                    },
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(config in arb_valid_config()) {
        let mut config = config;
        config.data.batch_size = 0;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_lr_above_one_fails(config in arb_valid_config(), excess in 1e-6f64..10.0) {
        let mut config = config;
        config.train.optimizer.lr = 1.0 + excess;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidLearningRate(_))
        ));
    }

    #[test]
    fn prop_negative_weight_decay_fails(config in arb_valid_config(), wd in -10.0f64..-1e-9) {
        let mut config = config;
        config.train.optimizer.weight_decay = wd;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidWeightDecay(_))
        ));
    }

    #[test]
    fn prop_wide_binary_head_fails(config in arb_valid_config(), classes in 3usize..1000) {
        let mut config = config;
        config.model.num_classes = classes;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::BinaryClassMismatch(_))
        ));
    }
}
