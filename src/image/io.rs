//! Loading pixel grids through the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Every decoded format is
//! converted to 8-bit RGB; alpha is discarded.

use crate::image::PixelGrid;
use crate::util::{ImageSearchError, ImageSearchResult};
use std::path::Path;

/// Creates an owned grid from an RGB8 image buffer.
pub fn grid_from_rgb_image(img: &image::RgbImage) -> ImageSearchResult<PixelGrid> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelGrid::from_raw_rgb(img.as_raw(), width, height)
}

/// Creates an owned grid from any decoded image.
pub fn grid_from_dynamic_image(img: &image::DynamicImage) -> ImageSearchResult<PixelGrid> {
    grid_from_rgb_image(&img.to_rgb8())
}

/// Decodes the image at `path` into an RGB grid.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> ImageSearchResult<PixelGrid> {
    let img = image::open(path).map_err(|err| ImageSearchError::ImageIo {
        reason: err.to_string(),
    })?;
    grid_from_dynamic_image(&img)
}
