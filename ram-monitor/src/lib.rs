//! RAM Monitor Library
//!
//! Checks available host memory against a configurable fraction of total memory.
//! Each query is a single synchronous snapshot read; nothing is cached between calls.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use ram_monitor::MemoryMonitor;
//!
//! let monitor = MemoryMonitor::new(0.2)?;
//! if monitor.check_available_ram()? {
//!     eprintln!("only {:.2} MB available", monitor.get_available_ram()?);
//! }
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `ram-monitor check` or `ram-monitor status --json`

pub mod config;
pub mod error;
pub mod info;
pub mod init;
pub mod monitor;
pub mod types;

pub use config::MonitorConfig;
pub use error::{MonitorError, Result};
pub use info::{MemoryStatsProvider, SysinfoProvider};
pub use init::init_tracing;
pub use monitor::{MemoryMonitor, DEFAULT_THRESHOLD};
pub use types::{MemorySnapshot, MemoryStatus};
