//! Memory snapshot and status types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytes in one megabyte (1024 * 1024)
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// A single point-in-time reading of physical memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Total physical memory in bytes
    pub total_bytes: u64,
    /// Available physical memory in bytes
    pub available_bytes: u64,
    /// Used physical memory in bytes
    pub used_bytes: u64,
}

impl MemorySnapshot {
    pub fn new(total_bytes: u64, available_bytes: u64, used_bytes: u64) -> Self {
        Self {
            total_bytes,
            available_bytes,
            used_bytes,
        }
    }

    /// Available memory as a fraction of total memory
    pub fn available_fraction(&self) -> f64 {
        self.available_bytes as f64 / self.total_bytes as f64
    }

    pub fn total_mb(&self) -> f64 {
        self.total_bytes as f64 / BYTES_PER_MB
    }

    pub fn available_mb(&self) -> f64 {
        self.available_bytes as f64 / BYTES_PER_MB
    }

    /// Total minus used, in megabytes.
    ///
    /// Each side is converted to megabytes before subtracting, so the result can
    /// differ in the last bits from converting the byte difference.
    pub fn remaining_mb(&self) -> f64 {
        self.total_bytes as f64 / BYTES_PER_MB - self.used_bytes as f64 / BYTES_PER_MB
    }
}

/// Memory status derived from one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStatus {
    pub total_mb: f64,
    pub available_mb: f64,
    pub remaining_mb: f64,
    /// Available memory as a fraction of total (0-1)
    pub available_fraction: f64,
    /// Threshold in effect when the snapshot was taken (0-1)
    pub threshold: f64,
    pub below_threshold: bool,
    pub checked_at: DateTime<Local>,
}

impl MemoryStatus {
    pub fn from_snapshot(snapshot: &MemorySnapshot, threshold: f64) -> Self {
        let available_fraction = snapshot.available_fraction();
        Self {
            total_mb: snapshot.total_mb(),
            available_mb: snapshot.available_mb(),
            remaining_mb: snapshot.remaining_mb(),
            available_fraction,
            threshold,
            below_threshold: available_fraction < threshold,
            checked_at: Local::now(),
        }
    }
}

impl fmt::Display for MemoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total RAM: {:.2} MB", self.total_mb)?;
        writeln!(f, "Available RAM: {:.2} MB", self.available_mb)?;
        write!(f, "Threshold: {:.2}%", self.threshold * 100.0)
    }
}
