//! Equal-width binning for the particle-size distribution.

use serde::Serialize;

/// Number of bins used by the dashboard histogram.
pub const DEFAULT_BINS: usize = 10;

/// Half-width used when every value is identical.
const DEGENERATE_HALF_SPAN: f64 = 0.05;

/// One histogram bin covering `[start, end)`.
///
/// The last bin also includes its `end`, so the maximum value is counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

impl Bin {
    /// Midpoint label such as "0.45".
    pub fn label(&self) -> String {
        format!("{:.2}", (self.start + self.end) / 2.0)
    }
}

/// Split `values` into `bins` equal-width bins spanning their min..max.
///
/// Returns an empty vector when there are no values or `bins` is zero.
/// Non-finite values are ignored.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo <= f64::EPSILON {
        lo -= DEGENERATE_HALF_SPAN;
        hi += DEGENERATE_HALF_SPAN;
    }
    let width = (hi - lo) / bins as f64;

    let mut result: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in finite {
        let index = (((v - lo) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }

    result
}
