//! CLI command implementations for `vocalis`.
//!
//! Each subcommand is implemented in its own module:
//!
//! - [`serve`] -- HTTP prediction server.
//! - [`check`] -- Artifact diagnostics.
//! - [`predict`] -- One-shot offline prediction.
//! - [`features`] -- Expected feature order.

pub mod check;
pub mod features;
pub mod predict;
pub mod serve;

use std::path::{Path, PathBuf};

use clap::Args;
use vocalis_types::config::{ArtifactsConfig, Config};

/// Artifact location flags shared by `serve`, `check` and `predict`.
#[derive(Args, Debug, Default)]
pub struct ArtifactArgs {
    /// Config file path.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Classifier artifact path (overrides config).
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Scaler artifact path (overrides config).
    #[arg(long)]
    pub scaler: Option<PathBuf>,
}

impl ArtifactArgs {
    /// Load the config file (if any) and apply the artifact overrides.
    pub fn resolve(&self) -> anyhow::Result<Config> {
        let mut config = load_config(self.config.as_deref())?;
        apply_artifact_overrides(&mut config.artifacts, self);
        Ok(config)
    }
}

/// Load configuration from the given path, or defaults when none is given.
///
/// An explicit path that does not exist is an error.
pub fn load_config(config_override: Option<&str>) -> anyhow::Result<Config> {
    let Some(path_str) = config_override else {
        return Ok(Config::default());
    };

    let path = Path::new(path_str);
    if !path.exists() {
        anyhow::bail!("config file not found: {path_str}");
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config: {e}"))?;
    let config: Config = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;
    Ok(config)
}

fn apply_artifact_overrides(artifacts: &mut ArtifactsConfig, args: &ArtifactArgs) {
    if let Some(model) = &args.model {
        artifacts.model = model.clone();
    }
    if let Some(scaler) = &args.scaler {
        artifacts.scaler = scaler.clone();
    }
}
