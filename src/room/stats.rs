//! Reveal statistics: median, mean and Tukey outliers.

use serde::{Deserialize, Serialize};

/// Multiplier applied to the interquartile range for outlier fences.
pub const TUKEY_K: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub median: f64,
    pub average: f64,
    /// Values strictly outside the fences, in ascending order.
    pub outliers: Vec<f64>,
}

/// Compute statistics over `sample`. Returns `None` for an empty sample.
///
/// Quartiles are picked by index on the sorted sample: Q1 at `floor(n/4)`,
/// Q3 at `ceil(3n/4) - 1`. This is not an interpolating percentile, and
/// clients depend on these exact positions.
pub fn compute(sample: &[f64]) -> Option<Stats> {
    if sample.is_empty() {
        return None;
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let average = sorted.iter().sum::<f64>() / n as f64;

    let q1 = sorted[n / 4];
    let q3 = sorted[(3 * n).div_ceil(4) - 1];
    let iqr = q3 - q1;
    let lower = q1 - TUKEY_K * iqr;
    let upper = q3 + TUKEY_K * iqr;
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lower || *v > upper)
        .collect();

    Some(Stats { median, average, outliers })
}
