//! Cell grid receiving rasterized pixels.
//!
//! A [`Framebuffer`] counts how many times each cell was emitted, so repeated
//! emissions of the same cell stay visible to the output encoders. Cells
//! outside the grid are dropped on the floor; the framebuffer is a sink, not a
//! clipper.

use crate::error::{Error, Result};
use crate::geometry::Pixel;
use crate::trace::PixelSink;

/// Fixed-size grid of per-cell hit counts in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Width in cells.
    width: u32,
    /// Height in cells.
    height: u32,
    /// Hit counts, one per cell.
    cells: Vec<u16>,
    /// Emissions that fell outside the grid.
    dropped: usize,
}

impl Framebuffer {
    /// Create a new framebuffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use line_raster::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(16, 9).unwrap();
    /// assert_eq!(fb.width(), 16);
    /// assert_eq!(fb.height(), 9);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Self { width, height, cells: vec![0; size], dropped: 0 })
    }

    /// Get the width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Number of emissions that landed outside the grid.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.dropped = 0;
    }

    /// Hit count of a cell.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn hits(&self, x: i32, y: i32) -> Option<u16> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether a cell was emitted at least once.
    #[must_use]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.hits(x, y).is_some_and(|n| n > 0)
    }

    /// Record one emission of `pixel`.
    ///
    /// Does nothing (besides counting the drop) if the pixel is out of bounds.
    pub fn plot(&mut self, pixel: Pixel) {
        match self.index(pixel.x, pixel.y) {
            Some(idx) => self.cells[idx] = self.cells[idx].saturating_add(1),
            None => self.dropped += 1,
        }
    }

    /// Number of cells emitted at least once.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&n| n > 0).count()
    }

    /// Emitted cells with their hit counts, row by row.
    pub fn iter_filled(&self) -> impl Iterator<Item = (Pixel, u16)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter(|&(_, &n)| n > 0).map(move |(idx, &n)| {
            (Pixel::new((idx % width) as i32, (idx / width) as i32), n)
        })
    }

    /// Get a row of hit counts as a slice.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u16]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize);
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Calculate the cell index for a coordinate.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some((y as usize) * (self.width as usize) + x as usize)
    }
}

impl PixelSink for Framebuffer {
    fn emit_pixel(&mut self, pixel: Pixel) {
        self.plot(pixel);
    }
}
