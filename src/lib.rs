//! imgsearch locates every occurrence of a small RGB image inside a larger one.
//!
//! The haystack is split into overlapping row bands that are scanned in
//! parallel, one worker per band, with either a pixel-exact or a
//! colour-distance tolerant kernel. Image decoding is available behind the
//! `image-io` feature, a rayon-backed executor behind `rayon`, and structured
//! spans behind `tracing`.

pub mod image;
pub mod kernel;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{PixelGrid, Rgb};
pub use kernel::{EuclideanKernel, ExactKernel, MatchKernel, DEFAULT_TOLERANCE};
pub use search::{
    partition_rows, scan_band, search, Algorithm, Executor, Match, ResultSet, RowBand,
    SearchConfig, Searcher,
};
pub use util::{ImageSearchError, ImageSearchResult};
