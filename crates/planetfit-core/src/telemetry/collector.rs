//! Collection of timestamped telemetry samples.
//!
//! Probes report one scalar at a time, tagged with the timestamp of the
//! reading it belongs to. The collector groups consecutive samples with the
//! same timestamp into a [`TelemetryRecord`]; a sample with a new timestamp
//! closes the current record. Only closed records are visible to readers,
//! since the open record may still be receiving fields.

use crate::error::{EstimationError, Result};
use crate::measurement::{GravityMeasurements, PressureMeasurements};
use crate::types::constants::GROUND_PRESSURE_WINDOW;
use std::fmt;
use std::str::FromStr;

/// A physical quantity reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantity {
    /// Gravitational acceleration, m/s²
    Acceleration,
    /// Altitude above the reference surface, m
    Altitude,
    /// Air temperature, K
    Temperature,
    /// Air pressure
    Pressure,
}

impl Quantity {
    /// Key used on the wire for this quantity.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Acceleration => "acceleration",
            Self::Altitude => "altitude",
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Quantity {
    type Err = EstimationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "acceleration" => Ok(Self::Acceleration),
            "altitude" => Ok(Self::Altitude),
            "temperature" => Ok(Self::Temperature),
            "pressure" => Ok(Self::Pressure),
            _ => Err(EstimationError::invalid_input(
                "quantity",
                format!(
                    "unknown quantity: {s}. Valid options: acceleration, altitude, temperature, pressure"
                ),
            )),
        }
    }
}

/// All samples that share one timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryRecord {
    /// Timestamp shared by every field of the record
    pub timestamp: u64,
    /// Gravitational acceleration
    pub acceleration: Option<f64>,
    /// Altitude
    pub altitude: Option<f64>,
    /// Temperature
    pub temperature: Option<f64>,
    /// Pressure
    pub pressure: Option<f64>,
}

impl TelemetryRecord {
    /// Creates an empty record for `timestamp`.
    pub fn new(timestamp: u64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// Reads one field.
    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Acceleration => self.acceleration,
            Quantity::Altitude => self.altitude,
            Quantity::Temperature => self.temperature,
            Quantity::Pressure => self.pressure,
        }
    }

    /// Writes one field, replacing any earlier value.
    pub fn set(&mut self, quantity: Quantity, value: f64) {
        let slot = match quantity {
            Quantity::Acceleration => &mut self.acceleration,
            Quantity::Altitude => &mut self.altitude,
            Quantity::Temperature => &mut self.temperature,
            Quantity::Pressure => &mut self.pressure,
        };
        *slot = Some(value);
    }
}

/// Groups timestamped samples into records.
#[derive(Debug, Clone, Default)]
pub struct TelemetryCollector {
    records: Vec<TelemetryRecord>,
    current: Option<TelemetryRecord>,
}

impl TelemetryCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sample.
    ///
    /// A timestamp different from the open record's closes that record.
    pub fn add_value(&mut self, timestamp: u64, quantity: Quantity, value: f64) {
        match self.current.as_mut() {
            Some(record) if record.timestamp == timestamp => record.set(quantity, value),
            _ => {
                if let Some(done) = self.current.take() {
                    self.records.push(done);
                }
                let mut record = TelemetryRecord::new(timestamp);
                record.set(quantity, value);
                self.current = Some(record);
            }
        }
    }

    /// Closes the open record, making it visible to readers.
    pub fn flush(&mut self) {
        if let Some(done) = self.current.take() {
            self.records.push(done);
        }
    }

    /// Closed records in arrival order.
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// Every closed value of one quantity, in arrival order.
    pub fn series(&self, quantity: Quantity) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.get(quantity)).collect()
    }

    /// Two columns taken from the records that carry both quantities.
    ///
    /// Records missing either field are skipped, so the columns always have
    /// the same length and stay index-aligned.
    pub fn paired(&self, first: Quantity, second: Quantity) -> (Vec<f64>, Vec<f64>) {
        self.records
            .iter()
            .filter_map(|r| Some((r.get(first)?, r.get(second)?)))
            .unzip()
    }

    /// Altitude / acceleration pairs ready for the radius-mass estimator.
    pub fn gravity_measurements(&self) -> Result<GravityMeasurements> {
        let (altitudes, accelerations) = self.paired(Quantity::Altitude, Quantity::Acceleration);
        GravityMeasurements::new(&altitudes, &accelerations)
    }

    /// Altitude / pressure pairs ready for the molar-mass estimator.
    pub fn pressure_measurements(&self) -> Result<PressureMeasurements> {
        let (altitudes, pressures) = self.paired(Quantity::Altitude, Quantity::Pressure);
        PressureMeasurements::new(&altitudes, &pressures)
    }

    /// Ground pressure from the most recent pressure readings.
    ///
    /// See [`ground_pressure`].
    pub fn ground_pressure(&self) -> Result<f64> {
        ground_pressure(&self.series(Quantity::Pressure))
    }
}

/// Median of the last [`GROUND_PRESSURE_WINDOW`] pressure readings.
///
/// A landed probe keeps reporting the same pressure, so the tail of the
/// series is the ground reference. Fewer readings than the window use all
/// of them; an even count averages the two middle values.
pub fn ground_pressure(pressures: &[f64]) -> Result<f64> {
    if pressures.is_empty() {
        return Err(EstimationError::invalid_input(
            "pressures",
            "at least one reading is required for a ground reference",
        ));
    }
    if let Some(p) = pressures.iter().find(|p| !p.is_finite()) {
        return Err(EstimationError::invalid_input(
            "pressures",
            format!("reading is not finite ({p})"),
        ));
    }

    let start = pressures.len().saturating_sub(GROUND_PRESSURE_WINDOW);
    let mut tail = pressures[start..].to_vec();
    tail.sort_by(f64::total_cmp);

    let mid = tail.len() / 2;
    if tail.len() % 2 == 0 {
        Ok((tail[mid - 1] + tail[mid]) / 2.0)
    } else {
        Ok(tail[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quantity_parsing() {
        assert_eq!("Pressure".parse::<Quantity>().unwrap(), Quantity::Pressure);
        assert_eq!(Quantity::Altitude.to_string(), "altitude");
        assert!("humidity".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_samples_grouped_by_timestamp() {
        let mut collector = TelemetryCollector::new();
        collector.add_value(1, Quantity::Altitude, 100.0);
        collector.add_value(1, Quantity::Acceleration, 9.7);
        collector.add_value(2, Quantity::Altitude, 50.0);

        // Record 2 is still open
        assert_eq!(collector.records().len(), 1);
        assert_eq!(collector.records()[0].altitude, Some(100.0));
        assert_eq!(collector.records()[0].acceleration, Some(9.7));

        collector.flush();
        assert_eq!(collector.records().len(), 2);
        assert_eq!(collector.records()[1].acceleration, None);
    }

    #[test]
    fn test_paired_skips_incomplete_records() {
        let mut collector = TelemetryCollector::new();
        collector.add_value(1, Quantity::Altitude, 0.0);
        collector.add_value(1, Quantity::Pressure, 1000.0);
        collector.add_value(2, Quantity::Altitude, 10.0);
        collector.add_value(3, Quantity::Altitude, 20.0);
        collector.add_value(3, Quantity::Pressure, 990.0);
        collector.flush();

        let (altitudes, pressures) = collector.paired(Quantity::Altitude, Quantity::Pressure);
        assert_eq!(altitudes, vec![0.0, 20.0]);
        assert_eq!(pressures, vec![1000.0, 990.0]);

        let measurements = collector.pressure_measurements().unwrap();
        assert_eq!(measurements.len(), 2);
        assert!(collector.gravity_measurements().is_err());
    }

    #[test]
    fn test_ground_pressure_median_of_tail() {
        // Only the last six readings count
        let readings = [500.0, 600.0, 1010.0, 1012.0, 1011.0, 1013.0, 1009.0, 1014.0];
        assert_relative_eq!(ground_pressure(&readings).unwrap(), 1011.5);

        assert_relative_eq!(ground_pressure(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert!(ground_pressure(&[]).is_err());
    }

    #[test]
    fn test_collector_ground_pressure() {
        let mut collector = TelemetryCollector::new();
        for (t, p) in [(1, 900.0), (2, 950.0), (3, 1000.0)] {
            collector.add_value(t, Quantity::Pressure, p);
        }
        collector.flush();
        assert_relative_eq!(collector.ground_pressure().unwrap(), 950.0);
    }
}
