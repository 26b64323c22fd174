//! Estimators for planetary body parameters.
//!
//! This crate provides the two estimators of the toolkit:
//!
//! - **Radius and mass**: exhaustive radius sweep against Newton's law of
//!   gravitation, see [`RadiusMassEstimator`]
//! - **Molar mass**: barometric log-ratio estimator for the mean molar mass
//!   of an atmosphere, see [`MolarMassEstimator`]
//!
//! Both are pure and re-entrant: they read validated measurements and
//! return a report or a typed [`EstimationError`].
//!
//! # Examples
//!
//! ```rust
//! use planetfit_estimators::{RadiusMassConfig, RadiusMassEstimator};
//!
//! let estimator = RadiusMassEstimator::new(
//!     RadiusMassConfig::new()
//!         .with_step(100.0)
//!         .with_max_radius(1_000_000.0),
//! );
//! let fit = estimator.fit(&[0.0, 1000.0], &[9.8, 9.7]).unwrap();
//! assert!(fit.radius >= 100.0 && fit.radius < 1_000_000.0);
//! ```

pub mod molar_mass;
pub mod radius_mass;

pub use molar_mass::{GroundReference, MolarMassEstimate, MolarMassEstimator};
pub use radius_mass::{
    evaluate_candidate, RadiusMassConfig, RadiusMassEstimator, RadiusMassFit, RadiusSweep,
};

// Re-export commonly used items from core
pub use planetfit_core::{
    error::{EstimationError, Result},
    measurement::{GravityMeasurements, PressureMeasurements},
    utils::SweepStrategy,
};
