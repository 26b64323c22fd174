//! Validated measurement series.
//!
//! Callers hand the estimators sequences of arbitrary numeric-like values.
//! Every element goes through a single fallible conversion to `f64` here,
//! before any estimator loop runs, so that a bad element is reported as
//! [`EstimationError::InvalidInput`] without partial computation.
//!
//! # Example
//!
//! ```
//! use planetfit_core::measurement::GravityMeasurements;
//!
//! let m = GravityMeasurements::new(&[0_i32, 1000], &[9.8_f32, 9.7]).unwrap();
//! assert_eq!(m.len(), 2);
//! assert_eq!(m.altitudes(), &[0.0, 1000.0]);
//! ```

use crate::error::{EstimationError, Result};
use num_traits::ToPrimitive;

/// Converts every element of `values` to a finite `f64`.
///
/// Fails with `InvalidInput` naming the first offending index when an
/// element has no `f64` representation or converts to NaN or infinity.
pub fn convert_series<A: ToPrimitive>(name: &str, values: &[A]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let converted = value.to_f64().ok_or_else(|| {
                EstimationError::invalid_input(
                    name,
                    format!("element {i} is not convertible to a floating-point value"),
                )
            })?;
            if converted.is_finite() {
                Ok(converted)
            } else {
                Err(EstimationError::invalid_input(
                    name,
                    format!("element {i} is not finite ({converted})"),
                ))
            }
        })
        .collect()
}

/// Converts a scalar parameter to a finite `f64`.
pub fn convert_scalar<A: ToPrimitive>(name: &str, value: A) -> Result<f64> {
    match value.to_f64() {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(EstimationError::invalid_input(
            name,
            format!("value is not finite ({v})"),
        )),
        None => Err(EstimationError::invalid_input(
            name,
            "value is not convertible to a floating-point value",
        )),
    }
}

/// Checks that two paired sequences have identical length.
pub fn ensure_same_length(left: &str, left_len: usize, right: &str, right_len: usize) -> Result<()> {
    if left_len == right_len {
        Ok(())
    } else {
        Err(EstimationError::shape_mismatch(
            left, left_len, right, right_len,
        ))
    }
}

/// Paired altitude / gravitational-acceleration measurements.
///
/// Index `i` of [`altitudes`](Self::altitudes) corresponds to index `i` of
/// [`accelerations`](Self::accelerations). At least one pair is present.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GravityMeasurements {
    altitudes: Vec<f64>,
    accelerations: Vec<f64>,
}

impl GravityMeasurements {
    /// Validates and converts two paired sequences.
    pub fn new<A, B>(altitudes: &[A], accelerations: &[B]) -> Result<Self>
    where
        A: ToPrimitive,
        B: ToPrimitive,
    {
        ensure_same_length("altitudes", altitudes.len(), "accelerations", accelerations.len())?;
        if altitudes.is_empty() {
            return Err(EstimationError::invalid_input(
                "altitudes",
                "at least one measurement is required",
            ));
        }

        Ok(Self {
            altitudes: convert_series("altitudes", altitudes)?,
            accelerations: convert_series("accelerations", accelerations)?,
        })
    }

    /// Number of measurement pairs.
    pub fn len(&self) -> usize {
        self.altitudes.len()
    }

    /// Always `false`; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.altitudes.is_empty()
    }

    /// Altitudes in metres.
    pub fn altitudes(&self) -> &[f64] {
        &self.altitudes
    }

    /// Accelerations in m/s².
    pub fn accelerations(&self) -> &[f64] {
        &self.accelerations
    }

    /// Iterates over `(altitude, acceleration)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.altitudes
            .iter()
            .copied()
            .zip(self.accelerations.iter().copied())
    }
}

/// Paired altitude / pressure measurements with strictly positive pressures.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureMeasurements {
    altitudes: Vec<f64>,
    pressures: Vec<f64>,
}

impl PressureMeasurements {
    /// Validates and converts two paired sequences.
    ///
    /// Pressures feed a logarithm, so any value `<= 0` is rejected.
    pub fn new<A, B>(altitudes: &[A], pressures: &[B]) -> Result<Self>
    where
        A: ToPrimitive,
        B: ToPrimitive,
    {
        ensure_same_length("altitudes", altitudes.len(), "pressures", pressures.len())?;

        let altitudes = convert_series("altitudes", altitudes)?;
        let pressures = convert_series("pressures", pressures)?;
        if let Some((i, p)) = pressures.iter().enumerate().find(|(_, p)| **p <= 0.0) {
            return Err(EstimationError::invalid_input(
                "pressures",
                format!("element {i} is not strictly positive ({p})"),
            ));
        }

        Ok(Self {
            altitudes,
            pressures,
        })
    }

    /// Number of measurement pairs.
    pub fn len(&self) -> usize {
        self.altitudes.len()
    }

    /// Whether no measurement is present.
    pub fn is_empty(&self) -> bool {
        self.altitudes.is_empty()
    }

    /// Altitudes in metres.
    pub fn altitudes(&self) -> &[f64] {
        &self.altitudes
    }

    /// Pressures, in any consistent positive unit.
    pub fn pressures(&self) -> &[f64] {
        &self.pressures
    }

    /// Iterates over `(altitude, pressure)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.altitudes.iter().copied().zip(self.pressures.iter().copied())
    }
}
