use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::level::CefrLevel;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_level")]
    pub default_level: String,
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_level() -> String {
    "B1".to_string()
}
fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_context_chars() -> usize {
    200
}
fn default_theme() -> String {
    "reader-dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
            context_chars: default_context_chars(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordahead")
            .join("config.toml")
    }

    /// The configured starting level, falling back to B1 on a stale or
    /// hand-mangled value.
    pub fn level(&self) -> CefrLevel {
        CefrLevel::parse(&self.default_level).unwrap_or(CefrLevel::B1)
    }
}
