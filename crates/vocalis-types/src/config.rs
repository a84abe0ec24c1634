//! Configuration schema types.
//!
//! All structs accept both `snake_case` and `camelCase` field names in JSON
//! via `#[serde(alias)]`. Unknown fields are ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration for the vocalis service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Locations of the serialized model artifacts.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

// ── Server ───────────────────────────────────────────────────────────────

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty means any origin.
    #[serde(default, alias = "corsOrigins")]
    pub cors_origins: Vec<String>,

    /// Refuse to start when the model artifacts fail to load.
    #[serde(default, alias = "failFast")]
    pub fail_fast: bool,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            fail_fast: false,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── Artifacts ────────────────────────────────────────────────────────────

/// Paths to the classifier and scaler artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Classifier artifact (JSON).
    #[serde(default = "default_model_path")]
    pub model: PathBuf,

    /// Scaler artifact (JSON).
    #[serde(default = "default_scaler_path")]
    pub scaler: PathBuf,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("parkinsons_model.json")
}
fn default_scaler_path() -> PathBuf {
    PathBuf::from("parkinsons_scaler.json")
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model: default_model_path(),
            scaler: default_scaler_path(),
        }
    }
}
