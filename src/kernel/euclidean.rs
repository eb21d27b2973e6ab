//! Colour-distance tolerant comparison.
//!
//! The score of an anchor is the sum over all needle pixels of the Euclidean
//! RGB distance to the haystack pixel beneath it. Every term is non-negative,
//! so the partial sum never decreases and the scan can stop as soon as it
//! passes the tolerance.

use crate::image::PixelGrid;
use crate::kernel::MatchKernel;

/// Cumulative distance accepted by default.
pub const DEFAULT_TOLERANCE: f64 = 1000.0;

/// Accepts an anchor when the summed per-pixel distance is at most
/// `tolerance`.
#[derive(Clone, Copy, Debug)]
pub struct EuclideanKernel {
    tolerance: f64,
}

impl Default for EuclideanKernel {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl EuclideanKernel {
    /// Kernel accepting anchors whose summed distance is `<= tolerance`.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Inclusive cumulative distance bound.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Full distance sum at `(x, y)` with no early exit.
    pub fn total_distance(large: &PixelGrid, small: &PixelGrid, x: usize, y: usize) -> f64 {
        let tpl_width = small.width();
        let mut total = 0.0f64;
        for ty in 0..small.height() {
            let img_row = large.span(x, y + ty, tpl_width);
            let tpl_row = small.span(0, ty, tpl_width);
            for (a, b) in img_row.iter().zip(tpl_row) {
                total += a.distance(*b);
            }
        }
        total
    }
}

impl MatchKernel for EuclideanKernel {
    #[inline]
    fn matches_at(&self, large: &PixelGrid, small: &PixelGrid, x: usize, y: usize) -> bool {
        distance_under_tolerance(large, small, x, y, self.tolerance)
    }
}

/// Accumulates distances in row-major order and rejects as soon as the
/// running sum exceeds `tolerance`.
pub(crate) fn distance_under_tolerance(
    large: &PixelGrid,
    small: &PixelGrid,
    x: usize,
    y: usize,
    tolerance: f64,
) -> bool {
    let tpl_width = small.width();
    let mut total = 0.0f64;
    for ty in 0..small.height() {
        let img_row = large.span(x, y + ty, tpl_width);
        let tpl_row = small.span(0, ty, tpl_width);
        for (a, b) in img_row.iter().zip(tpl_row) {
            total += a.distance(*b);
            if total > tolerance {
                return false;
            }
        }
    }
    total <= tolerance
}
