//! Match predicates evaluated at a single anchor.

use crate::image::PixelGrid;

/// Decides whether the needle aligns with the haystack at one anchor.
///
/// Implementations must short-circuit: they return as soon as the verdict is
/// known. Kernels are shared by reference across worker threads, so they
/// carry no mutable state.
pub trait MatchKernel: Sync {
    /// Tests the needle `small` with its top-left pixel at `(x, y)` in `large`.
    ///
    /// Callers guarantee `x + small.width() <= large.width()` and
    /// `y + small.height() <= large.height()`.
    fn matches_at(&self, large: &PixelGrid, small: &PixelGrid, x: usize, y: usize) -> bool;
}

pub mod euclidean;
pub mod exact;

pub use euclidean::{EuclideanKernel, DEFAULT_TOLERANCE};
pub use exact::ExactKernel;
