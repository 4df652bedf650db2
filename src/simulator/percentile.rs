//! Linear-interpolated percentiles.

/// Percentile `p` (0–100) of an unordered sample. Sorts `sample` in place.
///
/// Returns 0 for an empty sample.
pub fn percentile(sample: &mut [f64], p: f64) -> f64 {
    sample.sort_unstable_by(|a, b| a.total_cmp(b));
    percentile_sorted(sample, p)
}

/// Same as [`percentile`] for a slice already sorted ascending.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    let idx = (p / 100.0) * (n - 1) as f64;
    let i = idx.floor() as usize;
    let frac = idx - i as f64;
    if i + 1 < n {
        // a*(1-f) + b*f, written so equal neighbours come back unchanged
        sorted[i] + (sorted[i + 1] - sorted[i]) * frac
    } else {
        sorted[n - 1]
    }
}
