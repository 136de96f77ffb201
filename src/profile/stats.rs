//! Size percentile thresholds.
//!
//! The formulas are tiered by sample count so that short reference documents
//! still produce usable thresholds:
//!
//! - `p90`: nearest-rank 90th percentile with at least 100 samples, otherwise
//!   the largest size.
//! - `p75`: upper quartile cut point (exclusive method) with at least 4
//!   samples, otherwise the second-largest size (the only size for n = 1).
//! - `p50`: median, rounded.
//! - `p25`: the element at index `n / 4` of the ascending list.
//!
//! The tiers change classification non-uniformly across documents of
//! different lengths. Existing profiles depend on them, so they stay as is.

use crate::model::SizePercentiles;

/// Minimum sample count for a true 90th percentile.
const P90_MIN_SAMPLES: usize = 100;

/// Minimum sample count for a quartile split.
const P75_MIN_SAMPLES: usize = 4;

/// Compute percentile thresholds over rounded sizes.
///
/// Returns `None` when there are no sizes.
pub fn size_percentiles(sizes: &[u32]) -> Option<SizePercentiles> {
    if sizes.is_empty() {
        return None;
    }

    let mut sorted = sizes.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    let max = sorted[n - 1];
    let min = sorted[0];

    let p90 = if n >= P90_MIN_SAMPLES {
        nearest_rank(&sorted, 90)
    } else {
        max
    };

    let p75 = if n >= P75_MIN_SAMPLES {
        round_to_size(exclusive_quantile(&sorted, 3, 4))
    } else {
        sorted[n.saturating_sub(2)]
    };

    let p50 = round_to_size(median(&sorted));
    let p25 = sorted[n / 4];

    Some(SizePercentiles {
        p90,
        p75,
        p50,
        p25,
        min,
        max,
    })
}

/// Nearest-rank percentile: the smallest value with at least `pct`% of the
/// samples at or below it.
fn nearest_rank(sorted: &[u32], pct: usize) -> u32 {
    let n = sorted.len();
    let rank = (pct * n).div_ceil(100).max(1);
    sorted[rank.min(n) - 1]
}

/// The `i`-th of `parts - 1` cut points dividing `sorted` into `parts`
/// groups, interpolated at position `i * (n + 1) / parts`.
fn exclusive_quantile(sorted: &[u32], i: usize, parts: usize) -> f64 {
    let n = sorted.len();
    let m = n + 1;
    let j = (i * m / parts).clamp(1, n - 1);
    let delta = (i * m) as f64 - (j * parts) as f64;
    let lower = sorted[j - 1] as f64;
    let upper = sorted[j] as f64;
    (lower * (parts as f64 - delta) + upper * delta) / parts as f64
}

fn median(sorted: &[u32]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    }
}

/// Round half to even, matching how sizes themselves are rounded.
fn round_to_size(value: f64) -> u32 {
    value.round_ties_even().max(0.0) as u32
}
