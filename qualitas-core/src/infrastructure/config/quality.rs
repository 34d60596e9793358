// qualitas-core/src/infrastructure/config/quality.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::quality::QualityConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["qualitas.yaml", "qualitas.yml"];

/// Replaces the sentinel value of the loaded configuration.
pub const SENTINEL_ENV: &str = "QUALITAS_SENTINEL";

/// Loads an explicit configuration file. The file must exist.
#[instrument]
pub fn load_quality_config(path: &Path) -> Result<QualityConfig, InfrastructureError> {
    if !path.is_file() {
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }
    info!(path = ?path, "Loading quality rules");

    let content = fs::read_to_string(path)?;
    let mut config = parse_quality_config(&content)?;
    apply_overrides(&mut config, std::env::var(SENTINEL_ENV).ok());
    warn_ignored_settings(&config);
    Ok(config)
}

/// Looks for `qualitas.yaml` / `qualitas.yml` in `dir`. Falls back to the
/// default rules when neither exists.
#[instrument]
pub fn discover_quality_config(dir: &Path) -> Result<QualityConfig, InfrastructureError> {
    match find_config(dir) {
        Some(path) => load_quality_config(&path),
        None => {
            info!(dir = ?dir, "No quality configuration found, using default rules");
            let mut config = QualityConfig::default();
            apply_overrides(&mut config, std::env::var(SENTINEL_ENV).ok());
            Ok(config)
        }
    }
}

pub fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// An empty file is a valid, default configuration.
fn parse_quality_config(content: &str) -> Result<QualityConfig, InfrastructureError> {
    if content.trim().is_empty() {
        return Ok(QualityConfig::default());
    }
    serde_yaml::from_str(content).map_err(InfrastructureError::from)
}

fn warn_ignored_settings(config: &QualityConfig) {
    let ignored = config.ignored_settings();
    if !ignored.is_empty() {
        warn!(
            settings = %ignored.join(", "),
            "Explicit rules are configured, these settings only apply to the default rules and are ignored"
        );
    }
}

fn apply_overrides(config: &mut QualityConfig, sentinel: Option<String>) {
    if let Some(val) = sentinel.filter(|v| !v.trim().is_empty()) {
        info!(old = %config.sentinel, new = %val, "Overriding sentinel via ENV");
        config.sentinel = val;
    }
}
