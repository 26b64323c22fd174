//! Grid search state and observers.

pub mod callback;
pub mod candidate;

pub use callback::*;
pub use candidate::*;
