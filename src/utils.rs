use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Base seed for the current iteration; main stores the iteration index here
pub static RAND_SEED: AtomicU64 = AtomicU64::new(0);

/// Number of trials completed since the counter was last reset
pub static TOTAL_TRIALS: AtomicU64 = AtomicU64::new(0);

/// When set, every round of every trial is written to a per-variant CSV log
pub static VERBOSE_ROUNDS: AtomicBool = AtomicBool::new(false);

/// Derive a seed for one random stream from the current base seed
/// Different offsets give independent streams for the same iteration
pub fn get_seed(offset: u64) -> u64 {
    RAND_SEED.load(Ordering::Relaxed).wrapping_mul(1_000_003).wrapping_add(offset)
}

/// Mean and population standard deviation of a slice, (0, 0) when empty
pub fn mean_and_stddev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
