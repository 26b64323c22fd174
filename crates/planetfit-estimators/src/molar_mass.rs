//! Atmospheric molar mass from altitude / pressure measurements.
//!
//! The barometric formula `p(h) = p₀·exp(−M·g·(h − h₀)/(R·T))` gives, for
//! any two readings `i` and `j`,
//!
//! ```text
//! M = −(R·T/g) · ln(p_j/p_i) / (h_j − h_i)
//! ```
//!
//! Without a ground reference every unordered pair of readings is compared
//! and the log ratios and altitude differences are summed separately before
//! dividing. With a ground reference `(h₀, p₀)` each reading is compared
//! against it instead.

use planetfit_core::{
    error::{EstimationError, Result},
    measurement::{convert_scalar, PressureMeasurements},
    types::constants::GAS_CONSTANT,
};
use num_traits::ToPrimitive;

/// Known ground-level reference for the barometric formula.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundReference {
    /// Altitude of the reference reading, in metres
    pub altitude: f64,
    /// Pressure at the reference altitude, in the unit of the measurements
    pub pressure: f64,
}

impl GroundReference {
    /// Creates a validated reference; the pressure must be strictly positive.
    pub fn new(altitude: f64, pressure: f64) -> Result<Self> {
        if !altitude.is_finite() {
            return Err(EstimationError::invalid_input(
                "ground_altitude",
                format!("must be finite, got {altitude}"),
            ));
        }
        if !(pressure.is_finite() && pressure > 0.0) {
            return Err(EstimationError::invalid_input(
                "ground_pressure",
                format!("must be finite and strictly positive, got {pressure}"),
            ));
        }
        Ok(Self { altitude, pressure })
    }
}

/// Result of a molar-mass estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MolarMassEstimate {
    /// Mean molar mass, kg/mol
    pub molar_mass: f64,

    /// Number of comparisons accumulated
    pub pairs: usize,

    /// Accumulated negated log pressure ratios
    pub numerator: f64,

    /// Accumulated altitude differences, in metres
    pub denominator: f64,
}

/// Barometric estimator for atmospheric molar mass.
#[derive(Debug, Clone, Copy, Default)]
pub struct MolarMassEstimator;

impl MolarMassEstimator {
    /// Creates the estimator.
    pub fn new() -> Self {
        Self
    }

    /// Validates raw sequences and estimates from all pairs of readings.
    pub fn fit<A, B>(
        &self,
        temperature: f64,
        acceleration: f64,
        altitudes: &[A],
        pressures: &[B],
    ) -> Result<MolarMassEstimate>
    where
        A: ToPrimitive,
        B: ToPrimitive,
    {
        let measurements = PressureMeasurements::new(altitudes, pressures)?;
        self.estimate(temperature, acceleration, &measurements)
    }

    /// Estimates molar mass by comparing every unordered pair of readings.
    ///
    /// Requires at least two readings; the altitude differences must not
    /// sum to zero.
    pub fn estimate(
        &self,
        temperature: f64,
        acceleration: f64,
        measurements: &PressureMeasurements,
    ) -> Result<MolarMassEstimate> {
        let scale = Self::scale(temperature, acceleration)?;
        if measurements.len() < 2 {
            return Err(EstimationError::invalid_input(
                "altitudes",
                format!(
                    "at least two measurements are required, got {}",
                    measurements.len()
                ),
            ));
        }

        let altitudes = measurements.altitudes();
        let pressures = measurements.pressures();
        let n = measurements.len();

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                numerator -= (pressures[j] / pressures[i]).ln();
                denominator += altitudes[j] - altitudes[i];
            }
        }

        Self::finish(scale, numerator, denominator, n * (n - 1) / 2)
    }

    /// Estimates molar mass against a known ground reference.
    ///
    /// Requires at least one reading; the altitude offsets from the
    /// reference must not sum to zero.
    pub fn estimate_with_reference(
        &self,
        temperature: f64,
        acceleration: f64,
        reference: GroundReference,
        measurements: &PressureMeasurements,
    ) -> Result<MolarMassEstimate> {
        let scale = Self::scale(temperature, acceleration)?;
        if measurements.is_empty() {
            return Err(EstimationError::invalid_input(
                "altitudes",
                "at least one measurement is required",
            ));
        }

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (altitude, pressure) in measurements.iter() {
            numerator -= (pressure / reference.pressure).ln();
            denominator += altitude - reference.altitude;
        }

        Self::finish(scale, numerator, denominator, measurements.len())
    }

    /// The constant factor `R·T/g`.
    fn scale(temperature: f64, acceleration: f64) -> Result<f64> {
        let temperature = convert_scalar("temperature", temperature)?;
        let acceleration = convert_scalar("acceleration", acceleration)?;
        if acceleration == 0.0 {
            return Err(EstimationError::division_by_zero(
                "gravitational acceleration is zero",
            ));
        }
        Ok(GAS_CONSTANT * temperature / acceleration)
    }

    fn finish(
        scale: f64,
        numerator: f64,
        denominator: f64,
        pairs: usize,
    ) -> Result<MolarMassEstimate> {
        if denominator == 0.0 {
            return Err(EstimationError::division_by_zero(
                "accumulated altitude differences are zero",
            ));
        }

        let molar_mass = scale * numerator / denominator;
        if !molar_mass.is_finite() {
            return Err(EstimationError::numerical_error(format!(
                "molar mass estimate is not finite ({molar_mass})"
            )));
        }

        Ok(MolarMassEstimate {
            molar_mass,
            pairs,
            numerator,
            denominator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const AIR_MOLAR_MASS: f64 = 0.028_964_4;
    const TEMPERATURE: f64 = 288.15;
    const GRAVITY: f64 = 9.806_65;
    const SEA_LEVEL: f64 = 101_325.0;

    fn isothermal_pressure(altitude: f64) -> f64 {
        SEA_LEVEL * (-AIR_MOLAR_MASS * GRAVITY * altitude / (GAS_CONSTANT * TEMPERATURE)).exp()
    }

    fn isothermal_column(altitudes: &[f64]) -> PressureMeasurements {
        let pressures: Vec<f64> = altitudes.iter().map(|&h| isothermal_pressure(h)).collect();
        PressureMeasurements::new(altitudes, &pressures).unwrap()
    }

    #[test]
    fn test_recovers_air_molar_mass() {
        let measurements = isothermal_column(&[0.0, 250.0, 1000.0, 1800.0, 3000.0]);
        let estimate = MolarMassEstimator::new()
            .estimate(TEMPERATURE, GRAVITY, &measurements)
            .unwrap();

        assert_relative_eq!(estimate.molar_mass, AIR_MOLAR_MASS, max_relative = 1e-9);
        assert_eq!(estimate.pairs, 10);
    }

    #[test]
    fn test_unordered_altitudes() {
        let measurements = isothermal_column(&[1800.0, 0.0, 3000.0, 250.0]);
        let estimate = MolarMassEstimator::new()
            .estimate(TEMPERATURE, GRAVITY, &measurements)
            .unwrap();
        assert_relative_eq!(estimate.molar_mass, AIR_MOLAR_MASS, max_relative = 1e-9);
    }

    #[test]
    fn test_two_readings_by_hand() {
        let estimate = MolarMassEstimator::new()
            .fit(300.0, 10.0, &[0.0, 100.0], &[1000.0, 900.0])
            .unwrap();
        let expected = GAS_CONSTANT * 300.0 / 10.0 * -(0.9_f64.ln()) / 100.0;
        assert_relative_eq!(estimate.molar_mass, expected, max_relative = 1e-12);
        assert_relative_eq!(estimate.denominator, 100.0);
    }

    #[test]
    fn test_invariant_under_pressure_scaling() {
        let altitudes = [0.0, 400.0, 900.0];
        let pressures: Vec<f64> = altitudes.iter().map(|&h| isothermal_pressure(h)).collect();
        let scaled: Vec<f64> = pressures.iter().map(|p| p / 1000.0).collect();

        let estimator = MolarMassEstimator::new();
        let a = estimator.fit(TEMPERATURE, GRAVITY, &altitudes, &pressures).unwrap();
        let b = estimator.fit(TEMPERATURE, GRAVITY, &altitudes, &scaled).unwrap();
        assert_relative_eq!(a.molar_mass, b.molar_mass, max_relative = 1e-9);
    }

    #[test]
    fn test_single_reading_is_invalid() {
        let err = MolarMassEstimator::new()
            .fit(TEMPERATURE, GRAVITY, &[0.0], &[SEA_LEVEL])
            .unwrap_err();
        assert!(matches!(err, EstimationError::InvalidInput { .. }));
    }

    #[test]
    fn test_equal_altitudes_divide_by_zero() {
        let err = MolarMassEstimator::new()
            .fit(TEMPERATURE, GRAVITY, &[10.0, 10.0, 10.0], &[1000.0, 999.0, 998.0])
            .unwrap_err();
        assert!(matches!(err, EstimationError::DivisionByZero { .. }));
    }

    #[test]
    fn test_zero_acceleration() {
        let err = MolarMassEstimator::new()
            .fit(TEMPERATURE, 0.0, &[0.0, 10.0], &[1000.0, 999.0])
            .unwrap_err();
        assert!(matches!(err, EstimationError::DivisionByZero { .. }));
    }

    #[test]
    fn test_non_positive_pressure_and_shape() {
        let estimator = MolarMassEstimator::new();
        let err = estimator
            .fit(TEMPERATURE, GRAVITY, &[0.0, 10.0], &[1000.0, -5.0])
            .unwrap_err();
        assert!(matches!(err, EstimationError::InvalidInput { .. }));

        let err = estimator
            .fit(TEMPERATURE, GRAVITY, &[0.0, 10.0], &[1000.0])
            .unwrap_err();
        assert!(matches!(err, EstimationError::ShapeMismatch { .. }));

        let err = estimator
            .fit(f64::NAN, GRAVITY, &[0.0, 10.0], &[1000.0, 990.0])
            .unwrap_err();
        assert!(matches!(err, EstimationError::InvalidInput { .. }));
    }

    #[test]
    fn test_with_ground_reference() {
        let measurements = isothermal_column(&[500.0, 1200.0, 2500.0]);
        let reference = GroundReference::new(0.0, SEA_LEVEL).unwrap();
        let estimate = MolarMassEstimator::new()
            .estimate_with_reference(TEMPERATURE, GRAVITY, reference, &measurements)
            .unwrap();

        assert_relative_eq!(estimate.molar_mass, AIR_MOLAR_MASS, max_relative = 1e-9);
        assert_eq!(estimate.pairs, 3);

        // A single reading is enough against a reference
        let single = isothermal_column(&[800.0]);
        let estimate = MolarMassEstimator::new()
            .estimate_with_reference(TEMPERATURE, GRAVITY, reference, &single)
            .unwrap();
        assert_relative_eq!(estimate.molar_mass, AIR_MOLAR_MASS, max_relative = 1e-9);
    }

    #[test]
    fn test_ground_reference_validation() {
        assert!(GroundReference::new(0.0, 0.0).is_err());
        assert!(GroundReference::new(f64::NAN, 1000.0).is_err());

        let reference = GroundReference::new(100.0, 1000.0).unwrap();
        let at_reference = PressureMeasurements::new(&[100.0], &[1000.0]).unwrap();
        let err = MolarMassEstimator::new()
            .estimate_with_reference(TEMPERATURE, GRAVITY, reference, &at_reference)
            .unwrap_err();
        assert!(matches!(err, EstimationError::DivisionByZero { .. }));
    }
}
