//! Digital Differential Analyzer rasterizers.

use std::iter::FusedIterator;

use crate::geometry::{Point, Segment};
use crate::raster::RasterStep;

/// DDA on floored endpoints.
///
/// Steps `max(|dx|, |dy|)` times by `(dx, dy) / max(|dx|, |dy|)`, starting at
/// the center of the start cell. Sampling from the center lets plain flooring
/// act as rounding, which yields the diamond exit rule for integer endpoints.
/// Emits exactly `max(|dx|, |dy|) + 1` cells, first and last being the
/// floored endpoints.
#[derive(Debug, Clone)]
pub struct Dda {
    cursor: Point,
    step_x: f64,
    step_y: f64,
    remaining: u64,
    traced: bool,
}

impl Dda {
    /// Prepare a DDA walk over `segment`.
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        let (start, end) = segment.floored();
        let dx = i64::from(end.x) - i64::from(start.x);
        let dy = i64::from(end.y) - i64::from(start.y);

        if dx == 0 && dy == 0 {
            log::debug!("dda: degenerate segment at {start:?}");
            return Self {
                cursor: Point::new(f64::from(start.x), f64::from(start.y)),
                step_x: 0.0,
                step_y: 0.0,
                remaining: 1,
                traced: false,
            };
        }

        let num_steps = dx.abs().max(dy.abs());
        Self {
            cursor: start.center(),
            step_x: dx as f64 / num_steps as f64,
            step_y: dy as f64 / num_steps as f64,
            remaining: num_steps as u64 + 1,
            traced: true,
        }
    }
}

impl Iterator for Dda {
    type Item = RasterStep;

    fn next(&mut self) -> Option<RasterStep> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let sample = self.cursor;
        self.cursor.x += self.step_x;
        self.cursor.y += self.step_y;

        Some(if self.traced {
            RasterStep::sampled(sample)
        } else {
            RasterStep::untraced(sample.pixel())
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl FusedIterator for Dda {}

/// Sub-pixel DDA sampling the raw segment uniformly.
///
/// The sample count is the larger of the floored cell spans on each axis;
/// samples are a lerp from the exact start point to the exact end point.
/// Cells are emitted as sampled and never deduplicated.
#[derive(Debug, Clone)]
pub struct SubpixelDda {
    segment: Segment,
    index: u64,
    count: u64,
    traced: bool,
}

impl SubpixelDda {
    /// Prepare a uniform sub-pixel walk over `segment`.
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        let (start, end) = segment.floored();
        let span_x = u64::from(start.x.abs_diff(end.x)) + 1;
        let span_y = u64::from(start.y.abs_diff(end.y)) + 1;
        let count = span_x.max(span_y);

        if count == 1 {
            log::debug!("subpixel-dda: segment inside cell {start:?}");
        }

        Self { segment, index: 0, count, traced: count > 1 }
    }
}

impl Iterator for SubpixelDda {
    type Item = RasterStep;

    fn next(&mut self) -> Option<RasterStep> {
        if self.index >= self.count {
            return None;
        }
        let i = self.index;
        self.index += 1;

        if !self.traced {
            return Some(RasterStep::untraced(self.segment.start.pixel()));
        }

        let t = i as f64 / (self.count - 1) as f64;
        Some(RasterStep::sampled(self.segment.start.lerp(self.segment.end, t)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.count - self.index).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl FusedIterator for SubpixelDda {}
