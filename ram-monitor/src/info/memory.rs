//! Memory information collection

use std::sync::Mutex;

use sysinfo::System;

use crate::error::{MonitorError, Result};
use crate::types::MemorySnapshot;

/// Source of physical memory readings
pub trait MemoryStatsProvider {
    /// Take a fresh reading. Implementations must not return cached values.
    fn snapshot(&self) -> Result<MemorySnapshot>;
}

impl<P: MemoryStatsProvider + ?Sized> MemoryStatsProvider for Box<P> {
    fn snapshot(&self) -> Result<MemorySnapshot> {
        (**self).snapshot()
    }
}

/// Reads memory through the `sysinfo` crate
#[derive(Debug)]
pub struct SysinfoProvider {
    system: Mutex<System>,
}

impl SysinfoProvider {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStatsProvider for SysinfoProvider {
    fn snapshot(&self) -> Result<MemorySnapshot> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MonitorError::stats_unavailable(format!(
                "platform '{}' is not supported",
                std::env::consts::OS
            )));
        }

        let mut sys = self
            .system
            .lock()
            .map_err(|_| MonitorError::stats_unavailable("system handle lock poisoned"))?;
        sys.refresh_memory();

        let snapshot = MemorySnapshot::new(
            sys.total_memory(),
            sys.available_memory(),
            sys.used_memory(),
        );

        // sysinfo reports zeros when it cannot read the platform counters
        if snapshot.total_bytes == 0 {
            return Err(MonitorError::stats_unavailable(
                "total memory reported as zero",
            ));
        }

        tracing::trace!(
            total_bytes = snapshot.total_bytes,
            available_bytes = snapshot.available_bytes,
            used_bytes = snapshot.used_bytes,
            "Read memory snapshot"
        );
        Ok(snapshot)
    }
}
