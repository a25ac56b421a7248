//! Error types for memory monitoring

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Errors surfaced by the monitor and its collaborators
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The OS did not return a usable memory reading
    #[error("memory statistics unavailable: {0}")]
    StatsUnavailable(String),

    /// Threshold outside of (0, 1]
    #[error("invalid threshold {0}: must be greater than 0 and at most 1")]
    InvalidThreshold(f64),

    #[error("failed to load config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl MonitorError {
    pub fn stats_unavailable(message: impl Into<String>) -> Self {
        Self::StatsUnavailable(message.into())
    }
}
