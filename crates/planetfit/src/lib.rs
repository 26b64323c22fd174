//! Planetary parameter estimation from probe measurements.
//!
//! `planetfit` estimates the radius and mass of a celestial body from
//! altitude / gravitational-acceleration readings, and the mean molar mass
//! of its atmosphere from altitude / pressure readings.
//!
//! The two entry points are [`radius_mass`] and [`molar_mass`]. They accept
//! any numeric element type, validate everything up front, and either return
//! a definite result or a typed [`EstimationError`]:
//!
//! | Operation | Failure |
//! |---|---|
//! | [`radius_mass`] | `ShapeMismatch`, `InvalidInput`, `NumericalError` |
//! | [`molar_mass`] | `ShapeMismatch`, `InvalidInput`, `DivisionByZero`, `NumericalError` |
//!
//! For the full reports (residual, candidate count, timing) use the
//! estimators re-exported in [`prelude`].
//!
//! # Example
//!
//! ```rust
//! use planetfit::{molar_mass, radius_mass};
//!
//! let (radius, mass) = radius_mass(&[0.0, 1000.0], &[9.8, 9.7], 100.0, 1e6)?;
//! assert!(radius >= 100.0 && mass > 0.0);
//!
//! let m = molar_mass(288.15, 9.80665, &[0.0, 1000.0], &[101_325.0, 89_874.0])?;
//! assert!((m - 0.029).abs() < 1e-3);
//! # Ok::<(), planetfit::EstimationError>(())
//! ```

pub use planetfit_estimators as estimators;

pub use planetfit_core::error::{EstimationError, Result};

use num_traits::ToPrimitive;
use planetfit_estimators::{MolarMassEstimator, RadiusMassEstimator};

/// Best-fit `(radius, mass)` for paired altitude / acceleration readings.
///
/// Sweeps candidate radii from `step` to `max_radius` (exclusive) in
/// increments of `step` and returns the candidate with the smallest sum of
/// squared acceleration residuals. An empty sweep range is an error.
pub fn radius_mass<A, B>(
    altitudes: &[A],
    accelerations: &[B],
    step: f64,
    max_radius: f64,
) -> Result<(f64, f64)>
where
    A: ToPrimitive,
    B: ToPrimitive,
{
    RadiusMassEstimator::with_range(step, max_radius)
        .fit(altitudes, accelerations)
        .map(|fit| fit.pair())
}

/// Mean molar mass (kg/mol) of an atmosphere from paired altitude / pressure
/// readings, without a ground-pressure reference.
///
/// Needs at least two readings with strictly positive pressures, a non-zero
/// `acceleration`, and altitudes that are not all equal.
pub fn molar_mass<A, B>(
    temperature: f64,
    acceleration: f64,
    altitudes: &[A],
    pressures: &[B],
) -> Result<f64>
where
    A: ToPrimitive,
    B: ToPrimitive,
{
    MolarMassEstimator::new()
        .fit(temperature, acceleration, altitudes, pressures)
        .map(|estimate| estimate.molar_mass)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{molar_mass, radius_mass};
    pub use planetfit_core::prelude::*;
    pub use planetfit_estimators::{
        GroundReference, MolarMassEstimate, MolarMassEstimator, RadiusMassConfig,
        RadiusMassEstimator, RadiusMassFit,
    };
}
