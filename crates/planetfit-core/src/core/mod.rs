//! Core types shared by the estimators.

pub mod error;
pub mod measurement;
pub mod types;

// Re-export core types
pub use error::*;
pub use measurement::*;
pub use types::*;
