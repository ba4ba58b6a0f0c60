//! Percentile-based outlier trimming
//!
//! A simple robust trim, not a model-based anomaly detector. It can
//! remove genuine extreme-but-valid readings, and the percentile estimate
//! is insensitive to the shape of the distribution below roughly a
//! thousand samples. Cloud contamination and instrument glitches are the
//! artifacts it targets.

use tracing::debug;

use crate::series::{AirSample, AirSeries};

/// Series at or below this length pass through untrimmed; quantile
/// estimation on fewer points is meaningless
pub const OUTLIER_MIN_SAMPLES: usize = 10;

/// Lower trim bound, as a quantile
pub const LOWER_QUANTILE: f64 = 0.01;
/// Upper trim bound, as a quantile
pub const UPPER_QUANTILE: f64 = 0.99;

/// Remove samples outside the open (1st, 99th) percentile band
///
/// Applies only when the series has more than [`OUTLIER_MIN_SAMPLES`]
/// samples; smaller series are returned unchanged. Retention is strict on
/// both ends, so the extreme order statistics themselves never survive a
/// trim pass.
pub fn trim_outliers(series: &AirSeries) -> AirSeries {
    if series.len() <= OUTLIER_MIN_SAMPLES {
        return series.clone();
    }

    let mut values = series.values();
    values.sort_by(|a, b| a.total_cmp(b));

    let q_low = quantile(&values, LOWER_QUANTILE);
    let q_hi = quantile(&values, UPPER_QUANTILE);

    let kept: Vec<AirSample> = series
        .iter()
        .filter(|s| s.value > q_low && s.value < q_hi)
        .copied()
        .collect();

    debug!(
        before = series.len(),
        after = kept.len(),
        q_low,
        q_hi,
        "trimmed outliers"
    );
    AirSeries::from_samples(kept)
}

/// Quantile with linear interpolation between order statistics
///
/// `sorted` must be ascending and non-empty; `tau` in [0, 1].
fn quantile(sorted: &[f64], tau: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = tau * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}
