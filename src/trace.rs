//! Collaborator seams and the caller-owned trace accumulator.
//!
//! Rasterizers never write anywhere themselves. A caller drains the lazy
//! [`Rasterizer`](crate::raster::Rasterizer) and forwards each step to a
//! [`PixelSink`] (where cells go) and a [`TraceRecorder`] (where the
//! visualization trace goes), or collects everything into a [`Trace`].

use crate::geometry::{HelperLine, Pixel, Point, Segment};
use crate::raster::{Algorithm, Anomaly, RasterStep};

/// Receives emitted cells in order. Consecutive duplicates are legal.
pub trait PixelSink {
    /// Accept one cell.
    fn emit_pixel(&mut self, pixel: Pixel);
}

/// Receives the continuous construction behind the emitted cells.
pub trait TraceRecorder {
    /// Accept the sample that produced the next emitted cell.
    fn record_sample(&mut self, sample: Point);

    /// Accept an error-term helper segment.
    fn record_helper_segment(&mut self, _line: HelperLine) {}
}

impl PixelSink for Vec<Pixel> {
    fn emit_pixel(&mut self, pixel: Pixel) {
        self.push(pixel);
    }
}

impl TraceRecorder for Vec<Point> {
    fn record_sample(&mut self, sample: Point) {
        self.push(sample);
    }
}

/// Discards everything it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl PixelSink for Discard {
    fn emit_pixel(&mut self, _pixel: Pixel) {}
}

impl TraceRecorder for Discard {
    fn record_sample(&mut self, _sample: Point) {}
}

/// Forward every step to the collaborators, returning the number of cells
/// emitted.
///
/// Per step the sample is recorded first, then the helper segment, then the
/// cell is emitted.
pub fn drive<I, S, R>(steps: I, sink: &mut S, recorder: &mut R) -> usize
where
    I: IntoIterator<Item = RasterStep>,
    S: PixelSink + ?Sized,
    R: TraceRecorder + ?Sized,
{
    let mut emitted = 0;
    for step in steps {
        if let Some(sample) = step.sample {
            recorder.record_sample(sample);
        }
        if let Some(helper) = step.helper {
            recorder.record_helper_segment(helper);
        }
        sink.emit_pixel(step.pixel);
        emitted += 1;
    }
    emitted
}

/// Everything one rasterizer invocation produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    /// Emitted cells in order.
    pub pixels: Vec<Pixel>,
    /// Recorded samples in order.
    pub samples: Vec<Point>,
    /// Recorded helper segments in order.
    pub helper_lines: Vec<HelperLine>,
    /// Flagged anomalies in order.
    pub anomalies: Vec<Anomaly>,
}

impl Trace {
    /// Create an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `algorithm` over `segment` into a fresh trace.
    #[must_use]
    pub fn capture(algorithm: Algorithm, segment: Segment) -> Self {
        let mut trace = Self::new();
        trace.extend(algorithm.rasterize(segment));
        log::trace!(
            "{algorithm}: {} cells, {} samples, {} helper lines",
            trace.pixels.len(),
            trace.samples.len(),
            trace.helper_lines.len()
        );
        trace
    }

    /// Drop all recorded data.
    pub fn clear(&mut self) {
        self.pixels.clear();
        self.samples.clear();
        self.helper_lines.clear();
        self.anomalies.clear();
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty() && self.samples.is_empty() && self.helper_lines.is_empty()
    }

    /// First emitted cell.
    #[must_use]
    pub fn first_pixel(&self) -> Option<Pixel> {
        self.pixels.first().copied()
    }

    /// Last emitted cell.
    #[must_use]
    pub fn last_pixel(&self) -> Option<Pixel> {
        self.pixels.last().copied()
    }
}

impl PixelSink for Trace {
    fn emit_pixel(&mut self, pixel: Pixel) {
        self.pixels.push(pixel);
    }
}

impl TraceRecorder for Trace {
    fn record_sample(&mut self, sample: Point) {
        self.samples.push(sample);
    }

    fn record_helper_segment(&mut self, line: HelperLine) {
        self.helper_lines.push(line);
    }
}

impl Extend<RasterStep> for Trace {
    fn extend<T: IntoIterator<Item = RasterStep>>(&mut self, iter: T) {
        for step in iter {
            if let Some(sample) = step.sample {
                self.record_sample(sample);
            }
            if let Some(helper) = step.helper {
                self.record_helper_segment(helper);
            }
            if let Some(anomaly) = step.anomaly {
                self.anomalies.push(anomaly);
            }
            self.emit_pixel(step.pixel);
        }
    }
}

impl FromIterator<RasterStep> for Trace {
    fn from_iter<T: IntoIterator<Item = RasterStep>>(iter: T) -> Self {
        let mut trace = Self::new();
        trace.extend(iter);
        trace
    }
}
