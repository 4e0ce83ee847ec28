// crates/sigil-score/src/scale.rs
//
// Quantile-based normalization for heavy-tailed raw metrics.
//
// Raw counts (followers, tx count) are heavy-tailed: a linear map either
// lets a handful of outliers dominate or makes high values
// indistinguishable. The piecewise-then-saturating curve differentiates
// most of the population while capping the marginal benefit of extreme
// outliers.

use serde::{Deserialize, Serialize};

/// Empirical distribution breakpoints for one metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quantiles {
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl Quantiles {
    /// Breakpoints are usable only when strictly increasing and positive.
    fn is_valid(&self) -> bool {
        self.p50 > 0.0 && self.p75 > self.p50 && self.p90 > self.p75
    }
}

/// Clamp a value to [0,1], mapping non-finite values to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Linear ratio with full credit at `full`, clamped to [0,1].
pub fn linear_ratio(value: f64, full: f64) -> f64 {
    if full <= 0.0 {
        return 0.0;
    }
    clamp01(value / full)
}

/// Map a raw metric to [0,1] using empirical quantile breakpoints.
///
/// Returns `None` when the quantiles are missing or degenerate; the caller
/// falls back to a fixed-threshold linear scale.
///
/// Piecewise mapping, continuous at the breakpoints:
/// - `value <= 0`          -> 0
/// - `(0, p50]`            -> linear 0 .. 0.4
/// - `(p50, p75]`          -> linear 0.4 .. 0.7
/// - `(p75, p90]`          -> linear 0.7 .. 0.9
/// - `> p90`               -> 0.9 + 0.1 * (1 - e^(-(value - p90) / p90)),
///   asymptotically approaching but never reaching 1.0.
pub fn scale_by_quantiles(value: f64, quantiles: Option<&Quantiles>) -> Option<f64> {
    let q = quantiles?;
    if !q.is_valid() {
        return None;
    }

    let scaled = if value <= 0.0 {
        0.0
    } else if value <= q.p50 {
        0.4 * value / q.p50
    } else if value <= q.p75 {
        0.4 + 0.3 * (value - q.p50) / (q.p75 - q.p50)
    } else if value <= q.p90 {
        0.7 + 0.2 * (value - q.p75) / (q.p90 - q.p75)
    } else {
        0.9 + 0.1 * (1.0 - (-(value - q.p90) / q.p90).exp())
    };

    Some(clamp01(scaled))
}
