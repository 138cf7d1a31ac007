// src/processing/stats.rs
use rayon::slice::ParallelSliceMut;

/// Value range used to stretch a grid before coloring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueRange {
    pub fn is_degenerate(&self) -> bool {
        self.vmax <= self.vmin || self.vmin.is_nan() || self.vmax.is_nan()
    }

    /// Clamp `value` into the range and rescale it linearly to `[0, 1]`.
    /// A degenerate range maps everything to 0.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (value.clamp(self.vmin, self.vmax) - self.vmin) / (self.vmax - self.vmin)
    }
}

/// Percentile of already sorted values, `q` in `[0, 100]`, interpolating
/// linearly between the two closest ranks.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// `(low, high)` percentiles of `values`, or `None` when there are none.
pub fn percentile_range(mut values: Vec<f64>, low: f64, high: f64) -> Option<ValueRange> {
    values.par_sort_unstable_by(f64::total_cmp);
    Some(ValueRange {
        vmin: percentile_sorted(&values, low)?,
        vmax: percentile_sorted(&values, high)?,
    })
}
