//! Index command implementation

use super::load_selected;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::IndexArgs;
use crate::dataset::{DatasetKind, MetadataIndex, Split};

pub fn run_index(args: IndexArgs, level: LogLevel) -> Result<(), String> {
    let config = load_selected(&args.selector)?;
    let split = Split::from(args.split);

    let tag = match split {
        Split::Train => &config.train.data,
        Split::Val | Split::Eval => &config.eval.data,
    };
    let kind: DatasetKind = tag.parse().map_err(|e| format!("{e}"))?;
    let root = args.root_dir.unwrap_or_else(|| config.data.root_dir.clone());

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Indexing {kind} ({split}) from {}",
            kind.metadata_path(&root, split).display()
        ),
    );

    let index = MetadataIndex::build(&root, kind, split, config.data.label_type)
        .map_err(|e| format!("Index error: {e}"))?;

    log(level, LogLevel::Normal, &format!("  Samples: {}", index.len()));
    log(
        level,
        LogLevel::Normal,
        &format!(
            "  Batches of {}: {}",
            config.data.batch_size,
            index.num_batches(config.data.batch_size)
        ),
    );
    for (label, count) in index.label_counts() {
        log(
            level,
            LogLevel::Normal,
            &format!("  Label {label}: {count}"),
        );
    }

    // A single sigmoid unit covers two labels
    let head_classes = config.model.num_classes.max(2);
    if index.num_classes != head_classes {
        tracing::warn!(
            labels = index.num_classes,
            model_outputs = config.model.num_classes,
            "label count does not match model.num_classes"
        );
    }

    if let Some(first) = index.samples.first() {
        log(
            level,
            LogLevel::Verbose,
            &format!("  First image: {}", first.image_path.display()),
        );
    }

    Ok(())
}
