//! Pixel-exact comparison.

use crate::image::PixelGrid;
use crate::kernel::MatchKernel;

/// Accepts an anchor only when every needle pixel equals the haystack pixel
/// under it on all three channels.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactKernel;

impl MatchKernel for ExactKernel {
    #[inline]
    fn matches_at(&self, large: &PixelGrid, small: &PixelGrid, x: usize, y: usize) -> bool {
        rows_match(large, small, x, y)
    }
}

/// Compares the needle row by row, stopping at the first differing pixel.
pub(crate) fn rows_match(large: &PixelGrid, small: &PixelGrid, x: usize, y: usize) -> bool {
    let tpl_width = small.width();
    (0..small.height()).all(|ty| large.span(x, y + ty, tpl_width) == small.span(0, ty, tpl_width))
}
