//! Threshold evaluation against live memory readings

use std::fmt;

use crate::error::{MonitorError, Result};
use crate::info::{MemoryStatsProvider, SysinfoProvider};
use crate::types::{MemorySnapshot, MemoryStatus};

/// Threshold used when none is configured (20% of total memory)
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// Reports whether available memory has dropped below a fraction of total memory.
///
/// Every query takes a fresh snapshot from the provider. The threshold is the
/// only state; changing it needs `&mut self`, so a monitor shared across threads
/// has to be wrapped in a lock by the caller.
pub struct MemoryMonitor<P = SysinfoProvider> {
    threshold: f64,
    provider: P,
}

impl MemoryMonitor<SysinfoProvider> {
    /// Create a monitor that reads host memory through `sysinfo`.
    ///
    /// Fails with [`MonitorError::InvalidThreshold`] unless `0 < threshold <= 1`.
    pub fn new(threshold: f64) -> Result<Self> {
        Self::with_provider(threshold, SysinfoProvider::new())
    }
}

impl Default for MemoryMonitor<SysinfoProvider> {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            provider: SysinfoProvider::new(),
        }
    }
}

impl<P: MemoryStatsProvider> MemoryMonitor<P> {
    pub fn with_provider(threshold: f64, provider: P) -> Result<Self> {
        let threshold = validate_threshold(threshold)?;
        tracing::info!("MemoryMonitor initialized with threshold: {:.2}%", threshold * 100.0);
        Ok(Self {
            threshold,
            provider,
        })
    }

    /// Returns `true` when available memory is strictly below the threshold
    /// fraction of total memory.
    pub fn check_available_ram(&self) -> Result<bool> {
        let snapshot = self.snapshot()?;
        let available = snapshot.available_fraction();
        tracing::info!("Available RAM: {:.2}%", available * 100.0);

        if available < self.threshold {
            tracing::warn!(
                threshold = self.threshold,
                "Available RAM is below the threshold"
            );
            Ok(true)
        } else {
            tracing::info!("Available RAM is above the threshold");
            Ok(false)
        }
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        self.threshold = validate_threshold(threshold)?;
        tracing::info!("Threshold updated to: {:.2}%", self.threshold * 100.0);
        Ok(())
    }

    pub fn get_threshold(&self) -> f64 {
        self.threshold
    }

    /// Available memory in megabytes
    pub fn get_available_ram(&self) -> Result<f64> {
        let available_mb = self.snapshot()?.available_mb();
        tracing::info!("Available RAM: {:.2} MB", available_mb);
        Ok(available_mb)
    }

    /// Total minus used memory in megabytes
    pub fn get_remaining_ram(&self) -> Result<f64> {
        let remaining_mb = self.snapshot()?.remaining_mb();
        tracing::info!("Remaining RAM: {:.2} MB", remaining_mb);
        Ok(remaining_mb)
    }

    /// Take a fresh reading from the provider.
    ///
    /// A reading with zero total memory is treated as unavailable.
    pub fn snapshot(&self) -> Result<MemorySnapshot> {
        let snapshot = self.provider.snapshot()?;
        if snapshot.total_bytes == 0 {
            return Err(MonitorError::stats_unavailable(
                "total memory reported as zero",
            ));
        }
        Ok(snapshot)
    }

    /// Everything a status display needs, derived from a single snapshot
    pub fn status(&self) -> Result<MemoryStatus> {
        let snapshot = self.snapshot()?;
        Ok(MemoryStatus::from_snapshot(&snapshot, self.threshold))
    }
}

fn validate_threshold(threshold: f64) -> Result<f64> {
    // NaN fails both comparisons
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(threshold)
    } else {
        Err(MonitorError::InvalidThreshold(threshold))
    }
}

impl<P> fmt::Display for MemoryMonitor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryMonitor(threshold={:.2}%)", self.threshold * 100.0)
    }
}

impl<P> fmt::Debug for MemoryMonitor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: u64 = 1024 * 1024 * 1024;

    struct FixedProvider(MemorySnapshot);

    impl MemoryStatsProvider for FixedProvider {
        fn snapshot(&self) -> Result<MemorySnapshot> {
            Ok(self.0)
        }
    }

    struct FailingProvider;

    impl MemoryStatsProvider for FailingProvider {
        fn snapshot(&self) -> Result<MemorySnapshot> {
            Err(MonitorError::stats_unavailable("permission denied"))
        }
    }

    fn monitor(total: u64, available: u64, used: u64) -> MemoryMonitor<FixedProvider> {
        MemoryMonitor::with_provider(
            DEFAULT_THRESHOLD,
            FixedProvider(MemorySnapshot::new(total, available, used)),
        )
        .unwrap()
    }

    #[test]
    fn test_check_available_ram_below_threshold() {
        let monitor = monitor(10 * GIB, GIB, 9 * GIB);
        assert!(monitor.check_available_ram().unwrap());
    }

    #[test]
    fn test_check_available_ram_above_threshold() {
        let monitor = monitor(10 * GIB, 3 * GIB, 7 * GIB);
        assert!(!monitor.check_available_ram().unwrap());
    }

    #[test]
    fn test_check_available_ram_at_threshold_is_not_below() {
        let monitor = monitor(10 * GIB, 2 * GIB, 8 * GIB);
        assert!(!monitor.check_available_ram().unwrap());
    }

    #[test]
    fn test_set_and_get_threshold() {
        let mut monitor = monitor(10 * GIB, GIB, 9 * GIB);
        monitor.set_threshold(0.3).unwrap();
        assert_eq!(monitor.get_threshold(), 0.3);
    }

    #[test]
    fn test_set_threshold_changes_verdict() {
        let mut monitor = monitor(10 * GIB, 3 * GIB, 7 * GIB);
        assert!(!monitor.check_available_ram().unwrap());
        monitor.set_threshold(0.5).unwrap();
        assert!(monitor.check_available_ram().unwrap());
    }

    #[test]
    fn test_get_available_ram() {
        let monitor = monitor(10 * GIB, 2 * GIB, 8 * GIB);
        assert_eq!(monitor.get_available_ram().unwrap(), 2048.0);
    }

    #[test]
    fn test_get_remaining_ram() {
        let monitor = monitor(10 * GIB, GIB, 8 * GIB);
        assert_eq!(monitor.get_remaining_ram().unwrap(), 2048.0);
    }

    #[test]
    fn test_default_threshold() {
        let monitor: MemoryMonitor = MemoryMonitor::default();
        assert_eq!(monitor.get_threshold(), DEFAULT_THRESHOLD);
        assert_eq!(monitor.to_string(), "MemoryMonitor(threshold=20.00%)");
    }

    #[test]
    fn test_display_and_debug() {
        let mut monitor = monitor(10 * GIB, GIB, 9 * GIB);
        monitor.set_threshold(0.1).unwrap();
        assert_eq!(monitor.to_string(), "MemoryMonitor(threshold=10.00%)");
        assert_eq!(format!("{:?}", monitor), "MemoryMonitor(threshold=10.00%)");
    }

    #[test]
    fn test_rejects_out_of_range_thresholds() {
        for bad in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let result = MemoryMonitor::with_provider(
                bad,
                FixedProvider(MemorySnapshot::new(GIB, GIB, 0)),
            );
            assert!(
                matches!(result, Err(MonitorError::InvalidThreshold(_))),
                "threshold {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejected_set_threshold_keeps_previous_value() {
        let mut monitor = monitor(10 * GIB, GIB, 9 * GIB);
        assert!(monitor.set_threshold(2.0).is_err());
        assert_eq!(monitor.get_threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_threshold_of_one_is_accepted() {
        let monitor =
            MemoryMonitor::with_provider(1.0, FixedProvider(MemorySnapshot::new(GIB, GIB, 0)))
                .unwrap();
        // Fully available memory is not below 100%
        assert!(!monitor.check_available_ram().unwrap());
    }

    #[test]
    fn test_provider_failure_propagates() {
        let monitor = MemoryMonitor::with_provider(0.2, FailingProvider).unwrap();
        assert!(matches!(
            monitor.check_available_ram(),
            Err(MonitorError::StatsUnavailable(_))
        ));
        assert!(matches!(
            monitor.get_available_ram(),
            Err(MonitorError::StatsUnavailable(_))
        ));
        assert!(matches!(
            monitor.get_remaining_ram(),
            Err(MonitorError::StatsUnavailable(_))
        ));
        assert!(matches!(
            monitor.status(),
            Err(MonitorError::StatsUnavailable(_))
        ));
    }

    #[test]
    fn test_zero_total_is_unavailable() {
        let monitor = monitor(0, 0, 0);
        assert!(matches!(
            monitor.check_available_ram(),
            Err(MonitorError::StatsUnavailable(_))
        ));
    }

    #[test]
    fn test_status_uses_current_threshold() {
        let mut monitor = monitor(10 * GIB, 3 * GIB, 7 * GIB);
        monitor.set_threshold(0.4).unwrap();
        let status = monitor.status().unwrap();
        assert_eq!(status.threshold, 0.4);
        assert!(status.below_threshold);
        assert_eq!(status.available_mb, 3072.0);
        assert_eq!(status.remaining_mb, 3072.0);
    }
}
