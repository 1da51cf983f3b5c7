//! SVG trace visualization.
//!
//! Draws one rasterizer run the way it is usually explained on paper: the
//! cell grid, the emitted cells, the continuous segment, the sample points
//! the cells were derived from and the error-term helper segments. All
//! geometry is given in cell units and scaled by `cell_size`; y grows
//! downwards.

use crate::color::{Palette, Rgba};
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Pixel, Point, Segment};
use crate::raster::Anomaly;
use crate::trace::Trace;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for a captured [`Trace`].
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    cell_size: f32,
    show_grid: bool,
    show_samples: bool,
    show_helpers: bool,
    show_segment: bool,
    palette: Palette,
    segment: Option<Segment>,
    trace: Trace,
    /// Pre-rendered cell layer replacing the per-cell rectangles.
    raster: Option<String>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect { x: f32, y: f32, width: f32, height: f32, fill: Rgba },
    /// Circle
    Circle { cx: f32, cy: f32, r: f32, fill: Rgba },
    /// Line
    Line { x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32 },
    /// Embedded raster image (base64 PNG)
    Image { x: f32, y: f32, width: f32, height: f32, data: String },
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(16, 16)
    }
}

impl SvgEncoder {
    /// Create an encoder for a `width` x `height` cell grid (each at least 1).
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            cell_size: 24.0,
            show_grid: true,
            show_samples: true,
            show_helpers: true,
            show_segment: true,
            palette: Palette::default(),
            segment: None,
            trace: Trace::new(),
            raster: None,
        }
    }

    /// Create an encoder whose grid covers the segment and every emitted cell
    /// with non-negative coordinates.
    #[must_use]
    pub fn for_trace(segment: Segment, trace: Trace) -> Self {
        let mut width = segment.start.x.max(segment.end.x).floor().max(0.0) as u32 + 1;
        let mut height = segment.start.y.max(segment.end.y).floor().max(0.0) as u32 + 1;
        for pixel in &trace.pixels {
            width = width.max(u32::try_from(pixel.x).map_or(0, |x| x.saturating_add(1)));
            height = height.max(u32::try_from(pixel.y).map_or(0, |y| y.saturating_add(1)));
        }
        Self::new(width, height).segment(segment).trace(trace)
    }

    /// Set the edge length of one cell in SVG user units.
    #[must_use]
    pub fn cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size.max(1.0);
        self
    }

    /// Draw the cell grid.
    #[must_use]
    pub fn show_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Draw the recorded samples as dots.
    #[must_use]
    pub fn show_samples(mut self, show: bool) -> Self {
        self.show_samples = show;
        self
    }

    /// Draw the helper segments.
    #[must_use]
    pub fn show_helpers(mut self, show: bool) -> Self {
        self.show_helpers = show;
        self
    }

    /// Draw the continuous segment.
    #[must_use]
    pub fn show_segment(mut self, show: bool) -> Self {
        self.show_segment = show;
        self
    }

    /// Set the color palette.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the continuous segment that was rasterized.
    #[must_use]
    pub fn segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Set the trace to draw.
    #[must_use]
    pub fn trace(mut self, trace: Trace) -> Self {
        self.trace = trace;
        self
    }

    /// Draw the cell layer from `fb` as an embedded PNG instead of one
    /// rectangle per cell.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn embed_cells(mut self, fb: &Framebuffer) -> Result<Self> {
        let png_bytes = super::PngEncoder::new().cell_size(1).palette(self.palette).to_bytes(fb)?;
        self.raster = Some(format!("data:image/png;base64,{}", STANDARD.encode(&png_bytes)));
        Ok(self)
    }

    /// Canvas size in SVG user units.
    #[must_use]
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.width as f32 * self.cell_size, self.height as f32 * self.cell_size)
    }

    fn scale(&self, p: Point) -> (f32, f32) {
        (p.x as f32 * self.cell_size, p.y as f32 * self.cell_size)
    }

    fn in_grid(&self, pixel: Pixel) -> bool {
        u32::try_from(pixel.x).is_ok_and(|x| x < self.width)
            && u32::try_from(pixel.y).is_ok_and(|y| y < self.height)
    }

    /// Build the element list, back to front.
    #[must_use]
    pub fn elements(&self) -> Vec<SvgElement> {
        let (canvas_w, canvas_h) = self.canvas_size();
        let cs = self.cell_size;
        let mut elements = Vec::new();

        match &self.raster {
            Some(data) => elements.push(SvgElement::Image {
                x: 0.0,
                y: 0.0,
                width: canvas_w,
                height: canvas_h,
                data: data.clone(),
            }),
            None => {
                let mut hits: BTreeMap<Pixel, u16> = BTreeMap::new();
                for &pixel in self.trace.pixels.iter().filter(|p| self.in_grid(**p)) {
                    let n = hits.entry(pixel).or_insert(0);
                    *n = n.saturating_add(1);
                }
                for (pixel, n) in hits {
                    elements.push(SvgElement::Rect {
                        x: pixel.x as f32 * cs,
                        y: pixel.y as f32 * cs,
                        width: cs,
                        height: cs,
                        fill: self.palette.cell(n),
                    });
                }
            }
        }

        if self.show_grid {
            let stroke = self.palette.grid;
            for x in 0..=self.width {
                let x = x as f32 * cs;
                elements.push(SvgElement::Line { x1: x, y1: 0.0, x2: x, y2: canvas_h, stroke, stroke_width: 1.0 });
            }
            for y in 0..=self.height {
                let y = y as f32 * cs;
                elements.push(SvgElement::Line { x1: 0.0, y1: y, x2: canvas_w, y2: y, stroke, stroke_width: 1.0 });
            }
        }

        if self.show_segment {
            if let Some(segment) = self.segment {
                let (x1, y1) = self.scale(segment.start);
                let (x2, y2) = self.scale(segment.end);
                elements.push(SvgElement::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke: self.palette.segment,
                    stroke_width: (cs / 12.0).max(1.0),
                });
            }
        }

        if self.show_helpers {
            for helper in &self.trace.helper_lines {
                let (x1, y1) = self.scale(helper.from);
                let (x2, y2) = self.scale(helper.to);
                elements.push(SvgElement::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke: self.palette.helper,
                    stroke_width: (cs / 8.0).max(1.0),
                });
            }
        }

        if self.show_samples {
            let r = (cs / 8.0).max(1.0);
            for &sample in &self.trace.samples {
                let (cx, cy) = self.scale(sample);
                let fill = if self.is_anomalous(sample) { self.palette.anomaly } else { self.palette.sample };
                elements.push(SvgElement::Circle { cx, cy, r, fill });
            }
        }

        elements
    }

    fn is_anomalous(&self, p: Point) -> bool {
        self.trace
            .anomalies
            .iter()
            .any(|anomaly| matches!(anomaly, Anomaly::SampleOutsideSegment { sample, .. } if *sample == p))
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let (width, height) = self.canvas_size();
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            self.palette.background.to_css()
        );

        for element in self.elements() {
            let _ = writeln!(svg, "  {}", element_to_svg(&element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill } => {
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
                fill.to_css()
            )
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#, fill.to_css())
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            )
        }
        SvgElement::Image { x, y, width, height, data } => {
            format!(
                r#"<image x="{x}" y="{y}" width="{width}" height="{height}" image-rendering="pixelated" xlink:href="{data}"/>"#
            )
        }
    }
}
