//! End-to-end tests for CLI commands

use super::run_command;
use crate::config::parse_args;
use crate::experiment::CheckpointManifest;
use std::fs;
use std::path::{Path, PathBuf};

const REFERENCE: &str = include_str!("../../../configs/resnet50.yml");

fn write_config(dir: &Path, name: &str, yaml: &str) -> PathBuf {
    let path = dir.join(format!("{name}.yml"));
    fs::write(&path, yaml).unwrap();
    path
}

fn run(args: &[&str]) -> Result<(), String> {
    let mut argv = vec!["camtrap", "--quiet"];
    argv.extend_from_slice(args);
    run_command(parse_args(argv).map_err(|e| e.to_string())?)
}

#[test]
fn test_validate_by_name() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "resnet50", REFERENCE);
    let config_dir = dir.path().to_str().unwrap();

    run(&["validate", "-c", "resnet50", "--config-dir", config_dir, "--detailed"]).unwrap();
}

#[test]
fn test_validate_unknown_name() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().to_str().unwrap();
    let err = run(&["validate", "--config-dir", config_dir]).unwrap_err();
    assert!(err.contains("resnet18"));
}

#[test]
fn test_validate_reports_every_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = REFERENCE
        .replace("  num_workers: 1\n", "")
        .replace("  use_roc: False\n", "");
    let path = write_config(dir.path(), "broken", &yaml);

    let err = run(&["validate", "-c", path.to_str().unwrap()]).unwrap_err();
    assert!(err.contains("Missing required key: eval.use_roc"));
    assert!(err.contains("Missing required key: data.num_workers"));
}

#[test]
fn test_validate_dangling_alias() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = format!("{REFERENCE}sweep: *optimiser\n");
    let path = write_config(dir.path(), "dangling", &yaml);

    let err = run(&["validate", "-c", path.to_str().unwrap()]).unwrap_err();
    assert!(err.contains("*optimiser"));
}

#[test]
fn test_validate_out_of_range_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "bad", &REFERENCE.replace("gamma: 0.1", "gamma: 2.0"));

    let err = run(&["validate", "-c", path.to_str().unwrap()]).unwrap_err();
    assert!(err.contains("gamma"));
}

#[test]
fn test_validate_check_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "resnet50", REFERENCE);
    let path = path.to_str().unwrap();

    let err = run(&["validate", "-c", path, "--check-paths"]).unwrap_err();
    assert!(err.contains("does not exist"));
}

#[test]
fn test_info_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "resnet50", REFERENCE);
    let path = path.to_str().unwrap();

    for format in ["text", "json", "yaml"] {
        run(&["info", "-c", path, "--format", format]).unwrap();
    }
}

#[test]
fn test_plan_train_and_eval() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "resnet50", REFERENCE);
    let path = path.to_str().unwrap();

    run(&["plan", "-c", path, "--tag", "baseline"]).unwrap();
    run(&["plan", "-c", path, "--mode", "eval"]).unwrap();
}

#[test]
fn test_plan_with_resume_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "resnet50", REFERENCE);
    let manifest_path = dir.path().join("resnet50_old.json");
    CheckpointManifest::new(12, "resnet50", "old", 0.9, dir.path().join("resnet50_old.pth"))
        .write(&manifest_path)
        .unwrap();

    run(&[
        "plan",
        "-c",
        path.to_str().unwrap(),
        "--resume",
        manifest_path.to_str().unwrap(),
    ])
    .unwrap();

    let err = run(&["plan", "-c", path.to_str().unwrap(), "--resume", "/missing.json"])
        .unwrap_err();
    assert!(err.starts_with("Resume error"));
}

#[test]
fn test_index_wildcam_val() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("data");
    fs::create_dir_all(root.join("wildcam")).unwrap();
    fs::write(
        root.join("wildcam/val_annotations.json"),
        r#"{"images": [{"id": "a", "file_name": "a.jpg"}, {"id": "b", "file_name": "b.jpg"}],
            "annotations": [{"image_id": "a", "category_id": 0}, {"image_id": "b", "category_id": 7}],
            "categories": [{"id": 0, "name": "empty"}, {"id": 7, "name": "deer"}]}"#,
    )
    .unwrap();

    let yaml = REFERENCE.replace(
        "root_dir: /mnt/nfs/work1/ds4cg/",
        &format!("root_dir: {}", root.display()),
    );
    let path = write_config(dir.path(), "resnet50", &yaml);

    run(&["index", "-c", path.to_str().unwrap(), "--split", "val"]).unwrap();
    // train split metadata does not exist
    assert!(run(&["index", "-c", path.to_str().unwrap()]).is_err());
}

#[test]
fn test_score_writes_roc() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "resnet50", REFERENCE);
    let outputs = dir.path().join("outputs.json");
    fs::write(
        &outputs,
        r#"{"outputs": [2.0, -1.0, 0.3, -2.5], "labels": [1, 0, 1, 0]}"#,
    )
    .unwrap();
    let roc_path = dir.path().join("roc.json");

    run(&[
        "score",
        "-c",
        path.to_str().unwrap(),
        outputs.to_str().unwrap(),
        "--roc-output",
        roc_path.to_str().unwrap(),
    ])
    .unwrap();
    assert!(roc_path.exists());
}

#[test]
fn test_score_uses_config_roc_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "resnet50",
        &REFERENCE.replace("use_roc: False", "use_roc: True"),
    );
    let outputs = dir.path().join("outputs.json");
    fs::write(&outputs, r#"{"outputs": [1.0, -1.0], "labels": [1, 0]}"#).unwrap();

    run(&["score", "-c", path.to_str().unwrap(), outputs.to_str().unwrap()]).unwrap();
    assert!(dir.path().join("outputs.roc.json").exists());
}

#[test]
fn test_score_without_roc_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "resnet50", REFERENCE);
    let outputs = dir.path().join("outputs.json");
    fs::write(&outputs, r#"{"outputs": [1.0, -1.0], "labels": [1, 1]}"#).unwrap();

    run(&["score", "-c", path.to_str().unwrap(), outputs.to_str().unwrap()]).unwrap();
    assert!(!dir.path().join("outputs.roc.json").exists());
}

fn multiclass_roc_config(dir: &Path) -> PathBuf {
    let yaml = REFERENCE
        .replace("num_classes: 1", "num_classes: 3")
        .replace("label_type: binary", "label_type: multi")
        .replace("use_roc: False", "use_roc: True");
    write_config(dir, "resnet50", &yaml)
}

#[test]
fn test_score_skips_config_roc_for_softmax_head() {
    let dir = tempfile::tempdir().unwrap();
    let path = multiclass_roc_config(dir.path());
    let outputs = dir.path().join("outputs.json");
    fs::write(
        &outputs,
        r#"{"outputs": [[0.1, 0.9, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]], "labels": [1, 0, 2]}"#,
    )
    .unwrap();

    run(&["score", "-c", path.to_str().unwrap(), outputs.to_str().unwrap()]).unwrap();
    assert!(!dir.path().join("outputs.roc.json").exists());
}

#[test]
fn test_score_explicit_roc_output_requires_binary_head() {
    let dir = tempfile::tempdir().unwrap();
    let path = multiclass_roc_config(dir.path());
    let outputs = dir.path().join("outputs.json");
    fs::write(
        &outputs,
        r#"{"outputs": [[0.1, 0.9, 0.0], [2.0, 0.0, 0.0]], "labels": [1, 0]}"#,
    )
    .unwrap();
    let roc_path = dir.path().join("roc.json");

    let err = run(&[
        "score",
        "-c",
        path.to_str().unwrap(),
        outputs.to_str().unwrap(),
        "--roc-output",
        roc_path.to_str().unwrap(),
    ])
    .unwrap_err();
    assert!(err.contains("Score error"));
    assert!(!roc_path.exists());
}
