//! Parallel search for every occurrence of a needle grid in a haystack grid.
//!
//! A search runs in four steps: the haystack rows are partitioned into
//! overlapping bands, one worker per band scans its anchors with the selected
//! kernel, the caller waits for all workers, and the per-worker lists are
//! concatenated into a [`ResultSet`].

use crate::image::PixelGrid;
use crate::kernel::{EuclideanKernel, ExactKernel, MatchKernel, DEFAULT_TOLERANCE};
use crate::trace::{trace_event, trace_span};
use crate::util::{ImageSearchError, ImageSearchResult};
use std::fmt;
use std::str::FromStr;

pub(crate) mod dispatch;
pub mod merge;
pub mod partition;
pub mod scan;

pub use merge::ResultSet;
pub use partition::{partition_rows, RowBand};
pub use scan::scan_band;

/// Top-left anchor in the haystack where the needle aligns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    /// Vertical coordinate (haystack row).
    pub row: usize,
    /// Horizontal coordinate (haystack column).
    pub col: usize,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Match predicate applied at each anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// Every pixel equal on all channels.
    #[default]
    Exact,
    /// Summed Euclidean colour distance within the tolerance.
    Euclidean,
}

impl Algorithm {
    /// Canonical command-line tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Exact => "exact",
            Algorithm::Euclidean => "euclidian",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ImageSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Algorithm::Exact),
            "euclidian" | "euclidean" => Ok(Algorithm::Euclidean),
            other => Err(ImageSearchError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// How band workers are run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Executor {
    /// One scoped OS thread per band.
    #[default]
    Threads,
    /// A dedicated rayon pool with one worker per band. Without the `rayon`
    /// feature this behaves like `Threads`.
    Rayon,
}

/// Search configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Number of row bands and workers; must be at least 1.
    pub threads: usize,
    /// Cumulative distance bound for [`Algorithm::Euclidean`].
    pub tolerance: f64,
    pub executor: Executor,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Exact,
            threads: 1,
            tolerance: DEFAULT_TOLERANCE,
            executor: Executor::Threads,
        }
    }
}

/// Reusable search entry point carrying a [`SearchConfig`].
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    cfg: SearchConfig,
}

impl Searcher {
    /// Creates a searcher with [`SearchConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: SearchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Finds every anchor where `small` occurs in `large`.
    pub fn find_all(&self, large: &PixelGrid, small: &PixelGrid) -> ImageSearchResult<ResultSet> {
        search(large, small, &self.cfg)
    }
}

/// Finds every anchor where `small` occurs in `large` under `cfg`.
///
/// A needle wider or taller than the haystack is not an error and produces
/// an empty result.
pub fn search(
    large: &PixelGrid,
    small: &PixelGrid,
    cfg: &SearchConfig,
) -> ImageSearchResult<ResultSet> {
    if cfg.threads == 0 {
        return Err(ImageSearchError::InvalidThreadCount(cfg.threads));
    }
    if cfg.tolerance.is_nan() || cfg.tolerance < 0.0 {
        return Err(ImageSearchError::InvalidInput(
            "tolerance must be a non-negative number",
        ));
    }

    let _span = trace_span!(
        "search",
        algorithm = cfg.algorithm.as_str(),
        threads = cfg.threads,
        large_width = large.width(),
        large_height = large.height(),
        small_width = small.width(),
        small_height = small.height()
    )
    .entered();

    if small.width() > large.width() || small.height() > large.height() {
        trace_event!("search_done", count = 0usize);
        return Ok(ResultSet::default());
    }

    let bands = partition_rows(large.height(), small.height(), cfg.threads);
    trace_event!("bands_planned", count = bands.len());

    let locals = match cfg.algorithm {
        Algorithm::Exact => run_bands(large, small, &bands, &ExactKernel, cfg.executor)?,
        Algorithm::Euclidean => {
            let kernel = EuclideanKernel::new(cfg.tolerance);
            trace_event!("euclidean_kernel", tolerance = kernel.tolerance());
            run_bands(large, small, &bands, &kernel, cfg.executor)?
        }
    };

    let merged = ResultSet::merge(locals);
    trace_event!("search_done", count = merged.len());
    Ok(merged)
}

fn run_bands<K: MatchKernel>(
    large: &PixelGrid,
    small: &PixelGrid,
    bands: &[RowBand],
    kernel: &K,
    executor: Executor,
) -> ImageSearchResult<Vec<Vec<Match>>> {
    match executor {
        Executor::Threads => dispatch::run_threads(large, small, bands, kernel),
        Executor::Rayon => dispatch::run_rayon(large, small, bands, kernel),
    }
}

#[cfg(test)]
mod tests {
    use super::{search, Algorithm, Match, SearchConfig, Searcher};
    use crate::image::{PixelGrid, Rgb};
    use crate::util::ImageSearchError;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn algorithm_tags_round_trip() {
        assert_eq!("exact".parse::<Algorithm>().unwrap(), Algorithm::Exact);
        assert_eq!("euclidian".parse::<Algorithm>().unwrap(), Algorithm::Euclidean);
        assert_eq!("euclidean".parse::<Algorithm>().unwrap(), Algorithm::Euclidean);
        assert_eq!(Algorithm::Euclidean.to_string(), "euclidian");
        assert_eq!(
            "fuzzy".parse::<Algorithm>().err(),
            Some(ImageSearchError::UnknownAlgorithm("fuzzy".to_string()))
        );
    }

    #[test]
    fn match_displays_row_then_col() {
        assert_eq!(Match { row: 3, col: 7 }.to_string(), "3,7");
    }

    #[test]
    fn uniform_image_matches_every_anchor() {
        let large = PixelGrid::filled(4, 4, RED).unwrap();
        let small = PixelGrid::filled(2, 2, RED).unwrap();
        let cfg = SearchConfig {
            threads: 2,
            ..SearchConfig::default()
        };
        let found = search(&large, &small, &cfg).unwrap().into_vec();
        let mut expected = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                expected.push(Match { row, col });
            }
        }
        assert_eq!(found, expected);
    }

    #[test]
    fn rejects_zero_threads_and_bad_tolerance() {
        let grid = PixelGrid::filled(2, 2, RED).unwrap();
        let cfg = SearchConfig {
            threads: 0,
            ..SearchConfig::default()
        };
        assert_eq!(
            search(&grid, &grid, &cfg).err(),
            Some(ImageSearchError::InvalidThreadCount(0))
        );

        let cfg = SearchConfig {
            algorithm: Algorithm::Euclidean,
            tolerance: -1.0,
            ..SearchConfig::default()
        };
        assert!(matches!(
            search(&grid, &grid, &cfg),
            Err(ImageSearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn searcher_uses_its_config() {
        let mut large = PixelGrid::filled(3, 3, Rgb::BLACK).unwrap();
        large.set(2, 0, Rgb::new(5, 5, 5));
        let small = PixelGrid::filled(1, 1, Rgb::new(6, 6, 6)).unwrap();

        let exact = Searcher::new().with_config(SearchConfig {
            threads: 3,
            ..SearchConfig::default()
        });
        assert!(exact.find_all(&large, &small).unwrap().is_empty());

        let tolerant = Searcher::new().with_config(SearchConfig {
            algorithm: Algorithm::Euclidean,
            threads: 3,
            tolerance: 2.0,
            ..SearchConfig::default()
        });
        assert_eq!(tolerant.config().threads, 3);
        let found = tolerant.find_all(&large, &small).unwrap();
        assert_eq!(found.into_vec(), vec![Match { row: 0, col: 2 }]);
    }
}
