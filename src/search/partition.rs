//! Splitting the haystack into overlapping row bands, one per worker.

use std::ops::Range;

/// Contiguous run of haystack rows `start..end` handed to one worker.
///
/// A band extends `small_height - 1` rows past its own slice so that every
/// needle window starting in the slice lies entirely inside the band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBand {
    pub start: usize,
    pub end: usize,
}

impl RowBand {
    /// Number of haystack rows covered by the band.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Anchor rows whose needle window fits inside the band.
    ///
    /// Empty when the band is shorter than the needle.
    pub fn anchor_rows(&self, small_height: usize) -> Range<usize> {
        match (self.end + 1).checked_sub(small_height) {
            Some(stop) if stop > self.start => self.start..stop,
            _ => self.start..self.start,
        }
    }
}

/// Divides `large_height` rows into `n_threads` bands.
///
/// Band `i` starts at `i * part` with `part = large_height / n_threads`; all
/// bands but the last extend `small_height - 1` rows into their successor,
/// and the last absorbs the division remainder. When `n_threads` exceeds
/// `large_height`, `part` is zero and every band except the last yields no
/// anchors. Returns an empty plan for `n_threads == 0`.
pub fn partition_rows(large_height: usize, small_height: usize, n_threads: usize) -> Vec<RowBand> {
    if n_threads == 0 {
        return Vec::new();
    }
    let part = large_height / n_threads;
    let overlap = small_height.saturating_sub(1);

    (0..n_threads)
        .map(|i| {
            let start = i * part;
            let end = if i == n_threads - 1 {
                large_height
            } else {
                ((i + 1) * part + overlap).min(large_height)
            };
            RowBand { start, end }
        })
        .collect()
}
