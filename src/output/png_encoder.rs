//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate. Each framebuffer cell is
//! blown up to a `cell_size` square; cells of at least three pixels get a
//! one-pixel grid border on their right and bottom edges.

use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
#[derive(Debug, Clone)]
pub struct PngEncoder {
    cell_size: u32,
    palette: Palette,
}

impl Default for PngEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PngEncoder {
    /// Smallest cell size that leaves room for a grid border.
    const MIN_GRID_CELL: u32 = 3;

    /// Create an encoder with 16-pixel cells and the default palette.
    #[must_use]
    pub fn new() -> Self {
        Self { cell_size: 16, palette: Palette::default() }
    }

    /// Set the edge length of one cell in image pixels (at least 1).
    #[must_use]
    pub fn cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    /// Set the color palette.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.encode(fb, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaled image is too large or PNG encoding fails.
    pub fn to_bytes(&self, fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    /// Image dimensions in pixels for `fb`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either side overflows `u32`.
    pub fn image_size(&self, fb: &Framebuffer) -> Result<(u32, u32)> {
        let width = fb.width().checked_mul(self.cell_size);
        let height = fb.height().checked_mul(self.cell_size);
        match (width, height) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(Error::InvalidDimensions { width: fb.width(), height: fb.height() }),
        }
    }

    fn encode<W: Write>(&self, fb: &Framebuffer, out: W) -> Result<()> {
        let (width, height) = self.image_size(fb)?;

        let mut encoder = png::Encoder::new(out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels(fb, width, height))?;
        writer.finish()?;
        Ok(())
    }

    /// RGBA bytes of the scaled image, row-major without padding.
    fn pixels(&self, fb: &Framebuffer, width: u32, height: u32) -> Vec<u8> {
        let size = self.cell_size;
        let grid = size >= Self::MIN_GRID_CELL;
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);

        for py in 0..height {
            let (cy, oy) = (py / size, py % size);
            for px in 0..width {
                let (cx, ox) = (px / size, px % size);
                let color = if grid && (ox == size - 1 || oy == size - 1) {
                    self.palette.grid
                } else {
                    let hits = fb.hits(cx as i32, cy as i32).unwrap_or(0);
                    self.palette.cell(hits)
                };
                data.extend_from_slice(&color.to_array());
            }
        }
        data
    }

    /// Color of the image pixel at `(px, py)`, for inspection.
    #[must_use]
    pub fn pixel_at(&self, fb: &Framebuffer, px: u32, py: u32) -> Option<Rgba> {
        let (width, height) = self.image_size(fb).ok()?;
        if px >= width || py >= height {
            return None;
        }
        let idx = (py as usize * width as usize + px as usize) * 4;
        let data = self.pixels(fb, width, height);
        let rgba: [u8; 4] = data.get(idx..idx + 4)?.try_into().ok()?;
        Some(Rgba::new(rgba[0], rgba[1], rgba[2], rgba[3]))
    }
}
