//! Summary statistics over extracted samples
//!
//! The extraction engine feeds this module a flattened, order-preserving
//! iterator over one band's windowed values; nothing here requires the
//! caller to build an intermediate list. Statistics apply to scalar bands
//! only — palette extractions have no meaningful numeric summary.

/// Configuration for a statistics run
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsOptions {
    /// Also build the value histogram
    pub calc_histogram: bool,
}

/// Summary statistics of a sample sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Sum of all samples
    pub sum: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Midpoint of the sorted sequence
    pub median: f64,
    /// Midpoint of `modes`
    pub mode: f64,
    /// All values of maximal frequency, ascending
    pub modes: Vec<f64>,
    /// Value counts ascending by value, when requested
    pub histogram: Option<Vec<(f64, u64)>>,
}

/// Compute summary statistics over a sample sequence
///
/// Non-finite samples are skipped. Returns `None` when no finite sample
/// remains — notably for empty windows.
pub fn compute_stats<I>(values: I, options: &StatsOptions) -> Option<Stats>
where
    I: Iterator<Item = f64>,
{
    let mut samples: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    if samples.is_empty() {
        return None;
    }

    samples.sort_by(f64::total_cmp);

    let count = samples.len();
    let min = samples[0];
    let max = samples[count - 1];
    let sum: f64 = samples.iter().sum();
    let mean = sum / count as f64;
    let median = if count % 2 == 1 {
        samples[count / 2]
    } else {
        (samples[count / 2 - 1] + samples[count / 2]) / 2.0
    };

    // One pass over the sorted samples finds the frequency runs; the
    // histogram is the run list itself.
    let mut histogram: Vec<(f64, u64)> = Vec::new();
    let mut best_count = 0u64;
    let mut run_value = samples[0];
    let mut run_count = 0u64;

    for &value in &samples {
        if value == run_value {
            run_count += 1;
        } else {
            histogram.push((run_value, run_count));
            best_count = best_count.max(run_count);
            run_value = value;
            run_count = 1;
        }
    }
    histogram.push((run_value, run_count));
    best_count = best_count.max(run_count);

    let modes: Vec<f64> = histogram
        .iter()
        .filter(|&&(_, n)| n == best_count)
        .map(|&(v, _)| v)
        .collect();
    let mode = (modes[0] + modes[modes.len() - 1]) / 2.0;

    Some(Stats {
        min,
        max,
        sum,
        mean,
        median,
        mode,
        modes,
        histogram: options.calc_histogram.then_some(histogram),
    })
}
