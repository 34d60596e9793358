// qualitas/src/commands/mod.rs

pub mod assess;
pub mod columns;
pub mod rules;

use anyhow::Context;
use std::path::Path;

use qualitas_core::domain::quality::QualityConfig;
use qualitas_core::infrastructure::config::{discover_quality_config, load_quality_config};

/// Explicit `--config` file, or `qualitas.yaml` discovered in the working directory.
pub(crate) fn resolve_config(config: Option<&Path>) -> anyhow::Result<QualityConfig> {
    match config {
        Some(path) => load_quality_config(path)
            .with_context(|| format!("Failed to load quality rules from {:?}", path)),
        None => discover_quality_config(Path::new("."))
            .context("Failed to load quality rules from the current directory"),
    }
}
