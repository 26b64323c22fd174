//! Thresholds for sharding a radius sweep across worker threads.
//!
//! A sweep evaluates `candidates × measurements` residual terms. Below a
//! threshold the rayon fork/join overhead dominates, so small sweeps stay
//! on the calling thread. Thresholds scale with the number of available
//! threads.

use std::sync::OnceLock;

/// Global configuration for parallel thresholds
static GLOBAL_CONFIG: OnceLock<ParallelThresholdsConfig> = OnceLock::new();

/// How a sweep distributes its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepStrategy {
    /// Decide from the global [`ParallelThresholdsConfig`].
    #[default]
    Auto,
    /// Evaluate every candidate on the calling thread, in sweep order.
    Sequential,
    /// Shard candidates across the rayon thread pool.
    Parallel,
}

/// Configuration for parallel execution thresholds
#[derive(Debug, Clone)]
pub struct ParallelThresholdsConfig {
    /// Minimum `candidates × measurements` work before a sweep is sharded
    pub sweep_threshold: usize,

    /// Number of available threads (cached)
    pub num_threads: usize,

    /// Minimum number of candidates handed to one worker
    pub min_chunk_size: usize,

    /// Maximum number of candidates handed to one worker per batch
    pub max_chunk_size: usize,
}

impl Default for ParallelThresholdsConfig {
    fn default() -> Self {
        let num_threads = rayon::current_num_threads();

        // Single-threaded baseline, roughly one millisecond of residual terms
        let base_sweep = 200_000;

        // More threads = higher overhead = need larger problems
        let thread_scaling = (num_threads as f64).sqrt();

        Self {
            sweep_threshold: (base_sweep as f64 * thread_scaling) as usize,
            num_threads,
            min_chunk_size: 256,
            max_chunk_size: 16_384,
        }
    }
}

/// Builder for customizing parallel thresholds
#[derive(Debug, Clone, Default)]
pub struct ParallelThresholdsBuilder {
    config: ParallelThresholdsConfig,
}

impl ParallelThresholdsBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep work threshold
    pub fn sweep_threshold(mut self, threshold: usize) -> Self {
        self.config.sweep_threshold = threshold;
        self
    }

    /// Set the minimum chunk size
    pub fn min_chunk_size(mut self, size: usize) -> Self {
        self.config.min_chunk_size = size.max(1);
        self.config.max_chunk_size = self.config.max_chunk_size.max(self.config.min_chunk_size);
        self
    }

    /// Set the maximum chunk size
    pub fn max_chunk_size(mut self, size: usize) -> Self {
        self.config.max_chunk_size = size.max(self.config.min_chunk_size);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ParallelThresholdsConfig {
        self.config
    }
}

/// Get the global parallel thresholds configuration
pub fn get_parallel_config() -> &'static ParallelThresholdsConfig {
    GLOBAL_CONFIG.get_or_init(ParallelThresholdsConfig::default)
}

/// Set custom parallel thresholds configuration.
///
/// Only the first call wins; later calls hand the rejected config back.
pub fn set_parallel_config(config: ParallelThresholdsConfig) -> Result<(), ParallelThresholdsConfig> {
    GLOBAL_CONFIG.set(config)
}

impl ParallelThresholdsConfig {
    /// Check if a sweep of the given size should be sharded
    pub fn should_parallelize_sweep(&self, candidates: usize, measurements: usize) -> bool {
        candidates.saturating_mul(measurements) >= self.sweep_threshold && self.num_threads > 1
    }

    /// Calculate the chunk size for sharding `candidates`
    pub fn optimal_chunk_size(&self, candidates: usize) -> usize {
        // Some oversubscription for load balancing
        let ideal_chunks = self.num_threads.max(1) * 4;
        candidates
            .div_ceil(ideal_chunks)
            .clamp(self.min_chunk_size, self.max_chunk_size.max(self.min_chunk_size))
    }

    /// Number of candidates buffered per sharded batch.
    ///
    /// Bounded by `max_chunk_size × num_threads` whatever the sweep size.
    pub fn batch_len(&self, candidates: usize) -> usize {
        self.optimal_chunk_size(candidates)
            .saturating_mul(self.num_threads.max(1))
    }
}

impl SweepStrategy {
    /// Resolves `Auto` against the global thresholds.
    pub fn resolve(self, candidates: usize, measurements: usize) -> Self {
        match self {
            Self::Auto => {
                if get_parallel_config().should_parallelize_sweep(candidates, measurements) {
                    Self::Parallel
                } else {
                    Self::Sequential
                }
            }
            forced => forced,
        }
    }
}
