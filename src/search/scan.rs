//! Dense scan of one row band.

use crate::image::PixelGrid;
use crate::kernel::MatchKernel;
use crate::search::partition::RowBand;
use crate::search::Match;
use crate::trace::{trace_event, trace_span};

/// Tests every anchor of `band` in row-then-column order and returns the
/// accepted ones in that order.
///
/// Anchors outside `0..=large.height() - small.height()` are never visited;
/// a needle wider or taller than the haystack yields nothing.
pub fn scan_band<K: MatchKernel + ?Sized>(
    large: &PixelGrid,
    small: &PixelGrid,
    band: RowBand,
    kernel: &K,
) -> Vec<Match> {
    let img_width = large.width();
    let img_height = large.height();
    let tpl_width = small.width();
    let tpl_height = small.height();
    if img_width < tpl_width || img_height < tpl_height {
        return Vec::new();
    }

    let _span = trace_span!("scan_band", start = band.start, end = band.end).entered();

    let max_x = img_width - tpl_width;
    let rows = band.anchor_rows(tpl_height);
    let rows = rows.start..rows.end.min(img_height - tpl_height + 1);
    if rows.is_empty() {
        trace_event!("band_without_anchors");
        return Vec::new();
    }

    let mut local = Vec::new();
    for y in rows {
        for x in 0..=max_x {
            if kernel.matches_at(large, small, x, y) {
                local.push(Match { row: y, col: x });
            }
        }
    }

    trace_event!("band_matches", start = band.start, count = local.len());
    local
}
