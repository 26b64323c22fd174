//! Observer support for radius sweeps.
//!
//! Observers monitor a sweep without influencing it. A sweep always runs
//! to completion, so no hook can stop it early.

use crate::search::candidate::Candidate;
use crate::utils::parallel_thresholds::SweepStrategy;
use std::time::Duration;

/// Information passed to observers when a sweep starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepInfo {
    /// Number of candidate radii that will be evaluated
    pub candidates: usize,

    /// Number of measurement pairs per candidate
    pub measurements: usize,

    /// Strategy chosen for this sweep
    pub strategy: SweepStrategy,
}

/// Trait for sweep observers.
///
/// Improvements are reported in sweep order by the sequential path only;
/// a sharded sweep reports its start and end.
pub trait SweepObserver: Send {
    /// Called once before the first candidate is evaluated.
    fn on_sweep_start(&mut self, info: &SweepInfo) {
        let _ = info;
    }

    /// Called whenever a candidate becomes the new best.
    fn on_improvement(&mut self, candidate: &Candidate) {
        let _ = candidate;
    }

    /// Called once after the last candidate, with the final best.
    fn on_sweep_end(&mut self, best: Option<&Candidate>, elapsed: Duration) {
        let _ = (best, elapsed);
    }
}

/// A no-op observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl SweepObserver for NoOpObserver {}

/// An observer that prints progress to stdout.
#[derive(Debug, Clone)]
pub struct PrintProgressObserver {
    print_every: usize,
    improvements: usize,
}

impl PrintProgressObserver {
    /// Create a new observer printing every `print_every`-th improvement.
    pub fn new(print_every: usize) -> Self {
        Self {
            print_every: print_every.max(1),
            improvements: 0,
        }
    }
}

impl SweepObserver for PrintProgressObserver {
    fn on_sweep_start(&mut self, info: &SweepInfo) {
        self.improvements = 0;
        println!(
            "Sweeping {} candidate radii over {} measurements ({:?})...",
            info.candidates, info.measurements, info.strategy
        );
    }

    fn on_improvement(&mut self, candidate: &Candidate) {
        self.improvements += 1;
        if self.improvements % self.print_every == 0 {
            println!(
                "Candidate {}: radius = {}, mass = {:e}, residual = {:e}",
                candidate.index, candidate.radius, candidate.mass, candidate.residual
            );
        }
    }

    fn on_sweep_end(&mut self, best: Option<&Candidate>, elapsed: Duration) {
        match best {
            Some(c) => println!(
                "Sweep complete in {elapsed:?}. Best radius: {}, mass: {:e}",
                c.radius, c.mass
            ),
            None => println!("Sweep complete in {elapsed:?}. No finite residual found"),
        }
    }
}

/// An observer that records every improvement in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// Sweep start information, if a sweep has started
    pub info: Option<SweepInfo>,
    /// Successive best candidates
    pub improvements: Vec<Candidate>,
    /// Final best candidate reported at the end of the sweep
    pub best: Option<Candidate>,
    /// Whether `on_sweep_end` was called
    pub finished: bool,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SweepObserver for RecordingObserver {
    fn on_sweep_start(&mut self, info: &SweepInfo) {
        self.info = Some(*info);
        self.improvements.clear();
        self.best = None;
        self.finished = false;
    }

    fn on_improvement(&mut self, candidate: &Candidate) {
        self.improvements.push(*candidate);
    }

    fn on_sweep_end(&mut self, best: Option<&Candidate>, _elapsed: Duration) {
        self.best = best.copied();
        self.finished = true;
    }
}
