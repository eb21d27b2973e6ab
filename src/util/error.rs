//! Error types for imgsearch.

use thiserror::Error;

/// Result alias for imgsearch operations.
pub type ImageSearchResult<T> = std::result::Result<T, ImageSearchError>;

/// Errors that can occur while building grids or running a search.
///
/// A needle larger than the haystack is not an error; the search simply
/// reports no matches.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImageSearchError {
    /// Grid dimensions are zero or overflow the address space.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The pixel buffer is shorter than the dimensions require.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A crop region does not lie inside the grid.
    #[error(
        "region {width}x{height} at ({x}, {y}) is outside a {img_width}x{img_height} grid"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The worker count must be at least one.
    #[error("thread count must be at least 1, got {0}")]
    InvalidThreadCount(usize),
    /// The algorithm tag is not one of the supported names.
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image decoding failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
    /// The worker pool could not be created.
    #[error("failed to build thread pool: {reason}")]
    ThreadPool { reason: String },
}
