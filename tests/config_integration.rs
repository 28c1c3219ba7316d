//! Config integration tests
//!
//! Every document under `configs/` must load through the same path the
//! binary uses and satisfy the required-key schema.

use camtrap::config::{
    check_anchors, check_required_keys, load_config, resolve_config_path, resolve_document,
    LabelType,
};
use std::fs;
use std::path::{Path, PathBuf};

fn configs_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("configs")
}

/// Helper to validate that a shipped config loads cleanly
fn validate_config_file(name: &str) {
    let path = resolve_config_path(name, &configs_dir())
        .unwrap_or_else(|e| panic!("Failed to resolve {name}: {e}"));
    let text = fs::read_to_string(&path).unwrap();

    let report = check_anchors(&text).unwrap_or_else(|e| panic!("{name}: {e}"));
    assert!(report.dangling().is_empty(), "{name}: dangling aliases");

    let document = resolve_document(&text).unwrap();
    let issues = check_required_keys(&document);
    assert!(issues.is_empty(), "{name}: key issues {issues:?}");

    let config = load_config(&path).unwrap_or_else(|e| panic!("Failed to load {name}: {e}"));
    assert!(config.data.batch_size > 0, "{name}: batch_size must be > 0");
    assert!(config.train.num_epochs > 0, "{name}: num_epochs must be > 0");
}

#[test]
fn test_reference_resnet50() {
    validate_config_file("resnet50");

    let config = load_config(configs_dir().join("resnet50.yml")).unwrap();
    assert_eq!(config.model.name, "resnet50");
    assert_eq!(config.model.num_classes, 1);
    assert_eq!(config.train.data, "wildcam");
    assert_eq!(config.train.num_epochs, 100);
    assert!(config.train.checkpoint_path.is_none());
    assert_eq!(config.train.optimizer.name, "rmsprop");
    assert_eq!(config.train.optimizer.lr, 0.001);
    assert_eq!(config.train.optimizer.alpha, 0.99);
    assert_eq!(config.train.optimizer.eps, 1e-6);
    assert_eq!(config.train.optimizer.weight_decay, 0.0);
    assert_eq!(config.train.lr_schedule.step_size, 3);
    assert_eq!(config.train.lr_schedule.gamma, 0.1);
    assert_eq!(config.train.criterion.name, "cross_entropy");
    assert_eq!(config.eval.data, "wildcam");
    assert!(!config.eval.use_roc);
    assert_eq!(config.data.root_dir, PathBuf::from("/mnt/nfs/work1/ds4cg/"));
    assert_eq!(config.data.batch_size, 128);
    assert_eq!(config.data.num_workers, 1);
    assert_eq!(config.data.label_type, LabelType::Binary);
}

#[test]
fn test_default_resnet18() {
    validate_config_file("resnet18");

    let config = load_config(configs_dir().join("resnet18.yml")).unwrap();
    assert!(config.eval.use_roc);
    assert_eq!(
        config.train.optimizer.params["momentum"],
        serde_json::json!(0.9)
    );
}

#[test]
fn test_nacti_with_merge_keys() {
    validate_config_file("resnet50_nacti");

    let config = load_config(configs_dir().join("resnet50_nacti.yml")).unwrap();
    assert_eq!(config.train.optimizer.lr, 0.0005);
    assert_eq!(config.train.optimizer.alpha, 0.99);
    assert_eq!(config.train.save_dir, PathBuf::from("checkpoints/nacti"));
    assert_eq!(config.train.seed, Some(42));
    assert_eq!(config.data.batch_size, 128);
}
