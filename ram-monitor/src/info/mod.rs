//! Memory statistics collection

pub mod memory;

pub use memory::{MemoryStatsProvider, SysinfoProvider};
