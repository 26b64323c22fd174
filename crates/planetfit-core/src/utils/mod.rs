//! Utility functions and helper types.

pub mod parallel_thresholds;

// Re-export utilities
pub use parallel_thresholds::*;
