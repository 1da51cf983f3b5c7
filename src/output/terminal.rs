//! Terminal output encoder.
//!
//! Renders a framebuffer as one text line per row: a filled glyph for cells
//! emitted once, a digit for cells emitted more than once (capped at `9`),
//! and an empty glyph otherwise.

use crate::framebuffer::Framebuffer;
use std::io::Write;

/// Terminal encoder configuration.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    filled: char,
    empty: char,
    show_counts: bool,
    flip_y: bool,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { filled: '#', empty: '.', show_counts: true, flip_y: false }
    }

    /// Glyph for emitted cells.
    #[must_use]
    pub fn filled(mut self, glyph: char) -> Self {
        self.filled = glyph;
        self
    }

    /// Glyph for cells never emitted.
    #[must_use]
    pub fn empty(mut self, glyph: char) -> Self {
        self.empty = glyph;
        self
    }

    /// Print hit counts above one as digits instead of the filled glyph.
    #[must_use]
    pub fn show_counts(mut self, show: bool) -> Self {
        self.show_counts = show;
        self
    }

    /// Print the highest row first, putting the y axis up.
    #[must_use]
    pub fn flip_y(mut self, flip: bool) -> Self {
        self.flip_y = flip;
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        let mut output = String::with_capacity((fb.width() as usize + 1) * fb.height() as usize);

        let rows: Box<dyn Iterator<Item = u32>> =
            if self.flip_y { Box::new((0..fb.height()).rev()) } else { Box::new(0..fb.height()) };

        for y in rows {
            if let Some(row) = fb.row(y) {
                output.extend(row.iter().map(|&hits| self.glyph(hits)));
            }
            output.push('\n');
        }

        output
    }

    fn glyph(&self, hits: u16) -> char {
        match hits {
            0 => self.empty,
            1 => self.filled,
            n if self.show_counts => char::from_digit(u32::from(n.min(9)), 10).unwrap_or(self.filled),
            _ => self.filled,
        }
    }

    /// Write the rendering to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, fb: &Framebuffer, mut out: W) -> crate::Result<()> {
        out.write_all(self.render(fb).as_bytes())?;
        Ok(())
    }

    /// Write output directly to stdout.
    pub fn print(&self, fb: &Framebuffer) {
        print!("{}", self.render(fb));
    }
}
