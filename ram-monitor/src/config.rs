//! Configuration loading

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{MonitorError, Result};
use crate::monitor::DEFAULT_THRESHOLD;

/// Config file name searched for in the working tree and the global config dir
pub const CONFIG_FILE_NAME: &str = ".ram-monitor.toml";

/// Find a config file by walking up from `start`, then checking `global_dir`.
///
/// Search order:
/// 1. `start` and its parent directories (walking up to root), when known
/// 2. `global_dir`, normally ~/.config/ram-monitor/
///
/// The global lookup runs even when there is no starting directory.
fn find_config_file(
    start: Option<&Path>,
    global_dir: Option<&Path>,
    filename: &str,
) -> Option<PathBuf> {
    let mut current = start;

    while let Some(dir) = current {
        let candidate = dir.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        current = dir.parent();
    }

    // Fallback: Check global config
    let global_path = global_dir?.join(filename);
    global_path.exists().then_some(global_path)
}

fn global_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ram-monitor"))
}

/// Top-level configuration (from .ram-monitor.toml)
#[derive(Debug, Default, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub monitor: MonitorSectionConfig,
}

/// Monitor configuration section
#[derive(Debug, Deserialize)]
pub struct MonitorSectionConfig {
    /// Fraction of total memory below which available memory is considered low
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for MonitorSectionConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl MonitorConfig {
    /// Load config from .ram-monitor.toml
    ///
    /// Search order:
    /// 1. Walk up directory tree from cwd looking for .ram-monitor.toml
    /// 2. Check ~/.config/ram-monitor/.ram-monitor.toml (global fallback)
    /// 3. Fall back to defaults
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().ok();
        let global_dir = global_config_dir();
        let found = find_config_file(cwd.as_deref(), global_dir.as_deref(), CONFIG_FILE_NAME);

        if let Some(config_path) = found {
            tracing::debug!("Loading config from: {}", config_path.display());
            return Self::load_from_path(&config_path);
        }

        tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_error = |message: String| MonitorError::Config {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| config_error(e.to_string()))
    }

    /// Threshold to use: an explicit override wins over the file value.
    ///
    /// Range checking happens when the monitor is built.
    pub fn resolve_threshold(&self, override_threshold: Option<f64>) -> f64 {
        override_threshold.unwrap_or(self.monitor.threshold)
    }
}
