//! RGB pixel grids.
//!
//! `PixelGrid` is an owned, row-major array of `Rgb` triples. Rows are stored
//! back to back without padding, so row `y` occupies
//! `data[y * width..(y + 1) * width]`. Both the haystack and the needle of a
//! search are plain grids; the search only ever borrows them immutably.

use crate::util::{ImageSearchError, ImageSearchResult};

#[cfg(feature = "image-io")]
pub mod io;

/// An 8-bit RGB colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance between two colours in RGB space.
    #[inline]
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Owned rectangular grid of RGB pixels in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Wraps a row-major pixel buffer of exactly `width * height` entries.
    pub fn new(data: Vec<Rgb>, width: usize, height: usize) -> ImageSearchResult<Self> {
        let needed = pixel_count(width, height)?;
        if data.len() < needed {
            return Err(ImageSearchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ImageSearchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a grid where every pixel has the same colour.
    pub fn filled(width: usize, height: usize, color: Rgb) -> ImageSearchResult<Self> {
        let needed = pixel_count(width, height)?;
        Self::new(vec![color; needed], width, height)
    }

    /// Creates a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> ImageSearchResult<Self>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let needed = pixel_count(width, height)?;
        let mut data = Vec::with_capacity(needed);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(data, width, height)
    }

    /// Builds a grid from packed RGB8 bytes (`[r, g, b, r, g, b, ...]`).
    pub fn from_raw_rgb(bytes: &[u8], width: usize, height: usize) -> ImageSearchResult<Self> {
        let needed = pixel_count(width, height)?
            .checked_mul(3)
            .ok_or(ImageSearchError::InvalidDimensions { width, height })?;
        if bytes.len() < needed {
            return Err(ImageSearchError::BufferTooSmall {
                needed,
                got: bytes.len(),
            });
        }
        if bytes.len() > needed {
            return Err(ImageSearchError::InvalidDimensions { width, height });
        }
        let data = bytes
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();
        Self::new(data, width, height)
    }

    /// Returns the grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the full row-major pixel buffer.
    pub fn as_slice(&self) -> &[Rgb] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn at(&self, x: usize, y: usize) -> Rgb {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        self.data[y * self.width + x]
    }

    /// Overwrites the pixel at `(x, y)`; returns `false` when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y * self.width + x] = color;
        true
    }

    /// Returns row `y` as a slice of length `width`.
    pub fn row(&self, y: usize) -> Option<&[Rgb]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Returns `len` pixels of row `y` starting at column `x`.
    ///
    /// Callers guarantee the span lies inside the grid.
    #[inline]
    pub(crate) fn span(&self, x: usize, y: usize, len: usize) -> &[Rgb] {
        let start = y * self.width + x;
        &self.data[start..start + len]
    }

    /// Copies the `width x height` block whose top-left corner is `(x, y)`.
    pub fn crop(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> ImageSearchResult<PixelGrid> {
        if width == 0 || height == 0 {
            return Err(ImageSearchError::InvalidDimensions { width, height });
        }
        let out_of_bounds = ImageSearchError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let mut data = Vec::with_capacity(width * height);
        for row in y..end_y {
            data.extend_from_slice(self.span(x, row, width));
        }
        PixelGrid::new(data, width, height)
    }
}

fn pixel_count(width: usize, height: usize) -> ImageSearchResult<usize> {
    if width == 0 || height == 0 {
        return Err(ImageSearchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ImageSearchError::InvalidDimensions { width, height })
}
