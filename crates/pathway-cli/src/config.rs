//! CLI configuration: where the backend lives and how to authenticate.
//!
//! Loaded from a YAML file (`--config`, default `~/.pathway/config.yaml`),
//! with `PATHWAY_API_URL` / `PATHWAY_TOKEN` environment overrides winning
//! over the file.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_URL_ENV: &str = "PATHWAY_API_URL";
pub const TOKEN_ENV: &str = "PATHWAY_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            api_url: default_api_url(),
            token: String::new(),
            debounce_ms: default_debounce_ms(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl CliConfig {
    /// Loads the config file if present, else defaults, then applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<CliConfig> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let mut config = match path {
            Some(ref p) if p.exists() => {
                let data = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config: {}", p.display()))?;
                serde_yaml::from_str(&data)
                    .with_context(|| format!("failed to parse config: {}", p.display()))?
            }
            _ => CliConfig::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                config.api_url = url;
            }
        }
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                config.token = token;
            }
        }
        Ok(config)
    }

    /// A usable config must carry a credential; the CLI never prompts for
    /// one.
    pub fn require_token(&self) -> anyhow::Result<()> {
        if self.token.trim().is_empty() {
            bail!(
                "no API token configured: set `token` in the config file or the {} environment variable",
                TOKEN_ENV
            );
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".pathway").join("config.yaml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
