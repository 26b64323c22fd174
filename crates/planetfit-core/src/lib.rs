//! Core types for estimating planetary parameters from probe measurements.
//!
//! This crate provides what the estimators share: the failure taxonomy,
//! the physical constants, validated measurement series, the grid search
//! selection rule, sweep observers, and the telemetry collector that turns
//! a stream of probe samples into paired measurement series.
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and `Result` alias
//! - [`measurement`]: Validated, index-aligned measurement series
//! - [`types`]: Physical constants and small numeric helpers
//! - [`search`]: Grid search candidates and sweep observers
//! - [`telemetry`]: Grouping timestamped samples into records
//! - [`utils`]: Parallel sweep thresholds

pub mod core;
pub mod search;
pub mod telemetry;
pub mod utils;

pub use crate::core::{error, measurement, types};

// Re-export commonly used items at the crate root
pub use error::{EstimationError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use planetfit_core::prelude::*;
///
/// assert!(GRAVITATIONAL_CONSTANT > 0.0);
/// ```
pub mod prelude {
    pub use crate::error::{EstimationError, Result};
    pub use crate::measurement::{GravityMeasurements, PressureMeasurements};
    pub use crate::search::{
        BestCandidate, Candidate, NoOpObserver, PrintProgressObserver, RecordingObserver,
        SweepInfo, SweepObserver,
    };
    pub use crate::telemetry::{ground_pressure, Quantity, TelemetryCollector, TelemetryRecord};
    pub use crate::types::constants::{GAS_CONSTANT, GRAVITATIONAL_CONSTANT};
    pub use crate::utils::{
        get_parallel_config, set_parallel_config, ParallelThresholdsBuilder,
        ParallelThresholdsConfig, SweepStrategy,
    };
}
