//! Running band scans in parallel.
//!
//! Both executors hand exactly one band to each worker and return the local
//! match lists in band order once every worker has finished.

use crate::image::PixelGrid;
use crate::kernel::MatchKernel;
use crate::search::partition::RowBand;
use crate::search::scan::scan_band;
use crate::search::Match;
use crate::util::{ImageSearchError, ImageSearchResult};
use std::thread;

/// One named scoped OS thread per band, joined before returning.
///
/// If the OS refuses a thread, spawning stops, the threads already started
/// are joined by the scope, and `ThreadPool` is returned. A panicking worker
/// is re-raised on the calling thread.
pub(crate) fn run_threads<K: MatchKernel + ?Sized>(
    large: &PixelGrid,
    small: &PixelGrid,
    bands: &[RowBand],
    kernel: &K,
) -> ImageSearchResult<Vec<Vec<Match>>> {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(bands.len());
        for (idx, &band) in bands.iter().enumerate() {
            let handle = thread::Builder::new()
                .name(format!("imgsearch-band-{idx}"))
                .spawn_scoped(scope, move || scan_band(large, small, band, kernel))
                .map_err(|err| ImageSearchError::ThreadPool {
                    reason: err.to_string(),
                })?;
            handles.push(handle);
        }

        let mut locals = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.join() {
                Ok(local) => locals.push(local),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        Ok(locals)
    })
}

/// A dedicated rayon pool sized to the band count, one task per band.
#[cfg(feature = "rayon")]
pub(crate) fn run_rayon<K: MatchKernel + ?Sized>(
    large: &PixelGrid,
    small: &PixelGrid,
    bands: &[RowBand],
    kernel: &K,
) -> ImageSearchResult<Vec<Vec<Match>>> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(bands.len())
        .thread_name(|idx| format!("imgsearch-band-{idx}"))
        .build()
        .map_err(|err| ImageSearchError::ThreadPool {
            reason: err.to_string(),
        })?;

    Ok(pool.install(|| {
        bands
            .par_iter()
            .with_max_len(1)
            .map(|&band| scan_band(large, small, band, kernel))
            .collect()
    }))
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn run_rayon<K: MatchKernel + ?Sized>(
    large: &PixelGrid,
    small: &PixelGrid,
    bands: &[RowBand],
    kernel: &K,
) -> ImageSearchResult<Vec<Vec<Match>>> {
    run_threads(large, small, bands, kernel)
}
