//! Memory reading and report types

mod memory;

pub use memory::*;
