//! Probe telemetry grouping.

pub mod collector;

pub use collector::*;
