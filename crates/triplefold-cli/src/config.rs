//! Configuration management for the Triplefold CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use triplefold::prelude::ViewOptions;

/// Triplefold project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reduce: ReduceConfig,
    #[serde(default)]
    pub view: ViewOptions,
    #[serde(default)]
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReduceConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Collapse whole stranded components instead of dependents.
    #[serde(default)]
    pub agnostic: bool,
    /// Display value of the preferred root node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

/// File paths applied when the matching flags are not given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<String>,
}

// Default value functions
fn default_capacity() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reduce: ReduceConfig::default(),
            view: ViewOptions::default(),
            filters: FilterConfig::default(),
        }
    }
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            agnostic: false,
            root: None,
        }
    }
}

impl Config {
    /// Load config from triplefold.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        if let Some(path) = find_config_file() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find triplefold.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join("triplefold.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
