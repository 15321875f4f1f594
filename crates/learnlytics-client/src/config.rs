//! Client configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use learnlytics_core::model::ValidationPolicy;
use learnlytics_core::request::SchemaVersion;

/// Settings for one client session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the prediction service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Which request shape to emit.
    #[serde(default)]
    pub schema: SchemaVersion,
    /// How strictly to gate the general metrics.
    #[serde(default)]
    pub policy: ValidationPolicy,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            schema: SchemaVersion::default(),
            policy: ValidationPolicy::default(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `learnlytics.toml` in the current directory
/// 2. `~/.config/learnlytics/config.toml`
///
/// `LEARNLYTICS_API_URL` overrides the configured URL.
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("learnlytics.toml");
        if local.exists() {
            Some(local)
        } else {
            config_home().map(|dir| dir.join("config.toml")).filter(|p| p.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ClientConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    if let Ok(url) = std::env::var("LEARNLYTICS_API_URL") {
        if !url.is_empty() {
            config.api_url = url;
        }
    }

    Ok(config)
}

fn config_home() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("learnlytics"))
}
