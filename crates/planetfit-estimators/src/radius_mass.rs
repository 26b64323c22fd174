//! Radius and mass estimation by exhaustive radius sweep.
//!
//! Given altitude / gravitational-acceleration pairs measured above a body,
//! this module finds the body radius and mass that best explain them under
//! Newton's law `g = G·M/(r + h)²`.
//!
//! # Algorithm Overview
//!
//! Candidate radii are swept from `step` up to `max_radius` (exclusive) by
//! repeated addition of `step`. For each candidate radius `r`:
//! 1. The implied mass is averaged over all measurements,
//!    `M = Σ g_i·(r + h_i)²/G / N`
//! 2. The residual is `Σ (g_i − G·M/(r + h_i)²)²`
//! 3. The candidate becomes the best fit if its residual is strictly smaller
//!
//! Radii accumulate floating-point drift from the repeated addition; the
//! drift is part of the sweep and is not corrected.
//!
//! With the `parallel` feature, large sweeps are sharded across the rayon
//! pool. Shards are merged by residual and then by sweep index, so the
//! result is bit-for-bit identical to the sequential sweep.

use planetfit_core::{
    error::{EstimationError, Result},
    measurement::GravityMeasurements,
    search::{BestCandidate, Candidate, NoOpObserver, SweepInfo, SweepObserver},
    types::{
        constants::{DEFAULT_MAX_RADIUS, DEFAULT_RADIUS_STEP, GRAVITATIONAL_CONSTANT},
        square, surface_gravity,
    },
    utils::SweepStrategy,
};
use num_traits::ToPrimitive;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use planetfit_core::utils::get_parallel_config;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Configuration for the radius sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiusMassConfig {
    /// Distance between two consecutive candidate radii, in metres
    pub step: f64,

    /// Exclusive upper bound of the sweep, in metres
    pub max_radius: f64,

    /// How candidates are distributed over threads
    pub strategy: SweepStrategy,
}

impl Default for RadiusMassConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_RADIUS_STEP,
            max_radius: DEFAULT_MAX_RADIUS,
            strategy: SweepStrategy::Auto,
        }
    }
}

impl RadiusMassConfig {
    /// Creates a new configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sweep step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the exclusive upper bound of the sweep.
    pub fn with_max_radius(mut self, max_radius: f64) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Sets the sweep strategy.
    pub fn with_strategy(mut self, strategy: SweepStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Forces the sequential sweep.
    pub fn sequential(self) -> Self {
        self.with_strategy(SweepStrategy::Sequential)
    }

    /// Checks that the sweep range is non-empty and can be traversed.
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(EstimationError::invalid_input(
                "step",
                format!("must be finite and positive, got {}", self.step),
            ));
        }
        if !self.max_radius.is_finite() {
            return Err(EstimationError::invalid_input(
                "max_radius",
                format!("must be finite, got {}", self.max_radius),
            ));
        }
        if self.max_radius <= self.step {
            return Err(EstimationError::invalid_input(
                "max_radius",
                format!(
                    "sweep range is empty: max_radius ({}) must exceed step ({})",
                    self.max_radius, self.step
                ),
            ));
        }

        // Rounding is monotone, so if the step still advances the largest
        // radius below the bound it advances every smaller one.
        let last = self.max_radius.next_down();
        if last + self.step <= last {
            return Err(EstimationError::invalid_input(
                "step",
                format!(
                    "step ({}) is too small to advance radii near {}",
                    self.step, self.max_radius
                ),
            ));
        }
        Ok(())
    }

    /// The candidate radii, in sweep order.
    ///
    /// Fails like [`validate`](Self::validate), so the returned sweep is
    /// always finite.
    pub fn radii(&self) -> Result<RadiusSweep> {
        self.validate()?;
        Ok(RadiusSweep {
            next: self.step,
            step: self.step,
            max_radius: self.max_radius,
        })
    }
}

/// Iterator over candidate radii, produced by repeated addition of the step.
#[derive(Debug, Clone)]
pub struct RadiusSweep {
    next: f64,
    step: f64,
    max_radius: f64,
}

impl Iterator for RadiusSweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next < self.max_radius {
            let radius = self.next;
            self.next += self.step;
            Some(radius)
        } else {
            None
        }
    }
}

/// Result of a radius sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiusMassFit {
    /// Best-fit radius in metres
    pub radius: f64,

    /// Mass implied at the best-fit radius, in kilograms
    pub mass: f64,

    /// Sum of squared acceleration residuals at the best fit
    pub residual: f64,

    /// Number of candidate radii evaluated
    pub candidates_evaluated: usize,

    /// Strategy the sweep actually ran with
    pub strategy: SweepStrategy,

    /// Wall-clock time spent sweeping
    pub duration: Duration,
}

impl RadiusMassFit {
    /// The `(radius, mass)` pair.
    pub fn pair(&self) -> (f64, f64) {
        (self.radius, self.mass)
    }

    /// Surface gravity of the fitted body, `G·M/r²`.
    pub fn surface_gravity(&self) -> f64 {
        surface_gravity(self.radius, self.mass, 0.0)
    }
}

/// Evaluates one candidate radius against every measurement.
pub fn evaluate_candidate(
    measurements: &GravityMeasurements,
    index: usize,
    radius: f64,
) -> Candidate {
    let n = measurements.len() as f64;
    let mass = measurements
        .iter()
        .map(|(altitude, acceleration)| {
            acceleration * square(radius + altitude) / GRAVITATIONAL_CONSTANT
        })
        .sum::<f64>()
        / n;

    let residual = measurements
        .iter()
        .map(|(altitude, acceleration)| {
            square(acceleration - surface_gravity(radius, mass, altitude))
        })
        .sum::<f64>();

    Candidate {
        index,
        radius,
        mass,
        residual,
    }
}

/// Grid-search estimator for body radius and mass.
#[derive(Debug, Clone, Default)]
pub struct RadiusMassEstimator {
    config: RadiusMassConfig,
}

impl RadiusMassEstimator {
    /// Creates an estimator with the given sweep configuration.
    pub fn new(config: RadiusMassConfig) -> Self {
        Self { config }
    }

    /// Creates an estimator sweeping `[step, max_radius)`.
    pub fn with_range(step: f64, max_radius: f64) -> Self {
        Self::new(RadiusMassConfig::new().with_step(step).with_max_radius(max_radius))
    }

    /// The sweep configuration.
    pub fn config(&self) -> &RadiusMassConfig {
        &self.config
    }

    /// Validates raw sequences and runs the sweep.
    pub fn fit<A, B>(&self, altitudes: &[A], accelerations: &[B]) -> Result<RadiusMassFit>
    where
        A: ToPrimitive,
        B: ToPrimitive,
    {
        let measurements = GravityMeasurements::new(altitudes, accelerations)?;
        self.estimate(&measurements)
    }

    /// Runs the sweep over validated measurements.
    pub fn estimate(&self, measurements: &GravityMeasurements) -> Result<RadiusMassFit> {
        self.estimate_with_observer(measurements, &mut NoOpObserver)
    }

    /// Runs the sweep, reporting progress to `observer`.
    pub fn estimate_with_observer(
        &self,
        measurements: &GravityMeasurements,
        observer: &mut dyn SweepObserver,
    ) -> Result<RadiusMassFit> {
        let radii = self.config.radii()?;
        let candidates = radii.clone().count();
        let strategy = if cfg!(feature = "parallel") {
            self.config.strategy.resolve(candidates, measurements.len())
        } else {
            SweepStrategy::Sequential
        };
        observer.on_sweep_start(&SweepInfo {
            candidates,
            measurements: measurements.len(),
            strategy,
        });

        let start = Instant::now();
        let best = match strategy {
            #[cfg(feature = "parallel")]
            SweepStrategy::Parallel => sweep_parallel(radii, measurements, candidates),
            _ => sweep_sequential(radii, measurements, observer),
        };
        let duration = start.elapsed();
        observer.on_sweep_end(best.as_ref(), duration);

        let best = best.ok_or_else(|| {
            EstimationError::numerical_error(format!(
                "none of the {candidates} candidate radii produced a finite residual"
            ))
        })?;

        Ok(RadiusMassFit {
            radius: best.radius,
            mass: best.mass,
            residual: best.residual,
            candidates_evaluated: candidates,
            strategy,
            duration,
        })
    }
}

fn sweep_sequential(
    radii: RadiusSweep,
    measurements: &GravityMeasurements,
    observer: &mut dyn SweepObserver,
) -> Option<Candidate> {
    let mut best = BestCandidate::new();
    for (index, radius) in radii.enumerate() {
        let candidate = evaluate_candidate(measurements, index, radius);
        if best.offer(candidate) {
            observer.on_improvement(&candidate);
        }
    }
    best.into_inner()
}

/// Evaluates the sweep in bounded batches, each batch sharded over the pool.
///
/// Radii are still generated sequentially so every candidate carries the
/// exact radius the sequential sweep would have produced.
#[cfg(feature = "parallel")]
fn sweep_parallel(
    radii: RadiusSweep,
    measurements: &GravityMeasurements,
    candidates: usize,
) -> Option<Candidate> {
    let config = get_parallel_config();
    let chunk = config.optimal_chunk_size(candidates);
    let batch_len = config.batch_len(candidates);

    let mut radii = radii.enumerate();
    let mut batch: Vec<(usize, f64)> = Vec::with_capacity(batch_len.min(candidates));
    let mut best = None;
    loop {
        batch.clear();
        batch.extend(radii.by_ref().take(batch_len));
        if batch.is_empty() {
            break;
        }

        let local = batch
            .par_iter()
            .with_min_len(chunk)
            .map(|&(index, radius)| Some(evaluate_candidate(measurements, index, radius)))
            .reduce(|| None, Candidate::preferred);
        best = Candidate::preferred(best, local);
    }
    best
}
