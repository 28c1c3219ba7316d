//! Required-key checks on the raw document
//!
//! Typed deserialization stops at the first missing field. These checks walk
//! the resolved YAML tree and report every missing or mistyped key at once.

use serde_yaml::Value;

/// Expected YAML type of a required key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    String,
    /// String that may be empty
    Path,
    Integer,
    /// Number, or a string holding one (`1e-6` from YAML 1.1 writers)
    Float,
    Bool,
}

impl KeyType {
    pub fn describe(self) -> &'static str {
        match self {
            KeyType::String => "string",
            KeyType::Path => "path string",
            KeyType::Integer => "non-negative integer",
            KeyType::Float => "number",
            KeyType::Bool => "boolean",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            KeyType::String => value.as_str().is_some_and(|s| !s.is_empty()),
            KeyType::Path => value.is_string(),
            KeyType::Integer => value.as_u64().is_some(),
            KeyType::Float => {
                value.is_number() || value.as_str().is_some_and(|s| s.trim().parse::<f64>().is_ok())
            }
            KeyType::Bool => {
                value.is_bool()
                    || value
                        .as_str()
                        .is_some_and(|s| matches!(s.to_lowercase().as_str(), "true" | "false"))
            }
        }
    }
}

/// Every key an experiment document must define
pub const REQUIRED_KEYS: &[(&str, KeyType)] = &[
    ("model.name", KeyType::String),
    ("model.num_classes", KeyType::Integer),
    ("train.data", KeyType::String),
    ("train.num_epochs", KeyType::Integer),
    ("train.checkpoint_path", KeyType::Path),
    ("train.optimizer.name", KeyType::String),
    ("train.optimizer.lr", KeyType::Float),
    ("train.optimizer.alpha", KeyType::Float),
    ("train.optimizer.eps", KeyType::Float),
    ("train.optimizer.weight_decay", KeyType::Float),
    ("train.lr_schedule.step_size", KeyType::Integer),
    ("train.lr_schedule.gamma", KeyType::Float),
    ("train.criterion.name", KeyType::String),
    ("eval.data", KeyType::String),
    ("eval.use_roc", KeyType::Bool),
    ("eval.checkpoint_path", KeyType::Path),
    ("data.root_dir", KeyType::Path),
    ("data.batch_size", KeyType::Integer),
    ("data.num_workers", KeyType::Integer),
    ("data.label_type", KeyType::String),
];

/// A required key that is absent or has the wrong type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIssue {
    Missing(&'static str),
    WrongType {
        key: &'static str,
        expected: KeyType,
    },
}

impl KeyIssue {
    pub fn key(&self) -> &'static str {
        match self {
            KeyIssue::Missing(key) | KeyIssue::WrongType { key, .. } => key,
        }
    }
}

/// Look up a dotted key such as `train.optimizer.lr`
pub fn lookup<'a>(root: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(root, |node, part| node.as_mapping()?.get(part))
}

/// Check every required key, in declaration order
pub fn check_required_keys(root: &Value) -> Vec<KeyIssue> {
    REQUIRED_KEYS
        .iter()
        .filter_map(|&(key, expected)| match lookup(root, key) {
            None | Some(Value::Null) => Some(KeyIssue::Missing(key)),
            Some(value) if !expected.accepts(value) => Some(KeyIssue::WrongType { key, expected }),
            Some(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        let mut value: Value = serde_yaml::from_str(yaml).unwrap();
        value.apply_merge().unwrap();
        value
    }

    #[test]
    fn test_lookup_nested() {
        let root = parse("train:\n  optimizer:\n    lr: 0.001\n");
        assert_eq!(lookup(&root, "train.optimizer.lr").and_then(Value::as_f64), Some(0.001));
        assert!(lookup(&root, "train.optimizer.eps").is_none());
        assert!(lookup(&root, "train.optimizer.lr.deeper").is_none());
    }

    #[test]
    fn test_empty_document_misses_everything() {
        let issues = check_required_keys(&Value::Null);
        assert_eq!(issues.len(), REQUIRED_KEYS.len());
        assert!(issues.iter().all(|i| matches!(i, KeyIssue::Missing(_))));
    }

    #[test]
    fn test_wrong_types_reported() {
        let root = parse("model:\n  name: resnet50\n  num_classes: one\ndata:\n  batch_size: -4\n");
        let issues = check_required_keys(&root);
        assert!(issues.contains(&KeyIssue::WrongType {
            key: "model.num_classes",
            expected: KeyType::Integer
        }));
        assert!(issues.contains(&KeyIssue::WrongType {
            key: "data.batch_size",
            expected: KeyType::Integer
        }));
        assert!(!issues.iter().any(|i| i.key() == "model.name"));
    }

    #[test]
    fn test_empty_checkpoint_path_is_accepted() {
        let root = parse("train:\n  checkpoint_path: ''\n");
        let issues = check_required_keys(&root);
        assert!(!issues.iter().any(|i| i.key() == "train.checkpoint_path"));
    }

    #[test]
    fn test_python_style_booleans_and_floats() {
        let root = parse("eval:\n  use_roc: \"False\"\ntrain:\n  optimizer:\n    eps: \"1e-6\"\n");
        let issues = check_required_keys(&root);
        assert!(!issues.iter().any(|i| i.key() == "eval.use_roc"));
        assert!(!issues.iter().any(|i| i.key() == "train.optimizer.eps"));
    }

    #[test]
    fn test_merged_keys_count_as_present() {
        let root = parse(
            "defaults: &opt\n  name: rmsprop\n  lr: 0.001\ntrain:\n  optimizer:\n    <<: *opt\n    alpha: 0.99\n",
        );
        let issues = check_required_keys(&root);
        assert!(!issues.iter().any(|i| i.key() == "train.optimizer.name"));
        assert!(!issues.iter().any(|i| i.key() == "train.optimizer.lr"));
        assert!(issues.contains(&KeyIssue::Missing("train.optimizer.eps")));
    }
}
