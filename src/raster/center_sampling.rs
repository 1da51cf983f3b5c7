//! Sub-pixel DDA sampling at major-axis pixel centers.
//!
//! Instead of spreading samples uniformly between the endpoints, the walk
//! samples the segment where it crosses the center line of each cell along
//! the major axis, which tracks sub-pixel Bresenham closely.

use std::iter::FusedIterator;

use crate::geometry::{Axis, Point, Segment};
use crate::raster::{Anomaly, RasterStep};

/// What to do with the cell containing the end point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointMode {
    /// Stop one step short; the end cell is only emitted if the walk reaches
    /// it on its own (diamond exit rule).
    #[default]
    Omit,
    /// Always finish on the floored end point, preceded by the last computed
    /// cell when that differs from it.
    Include,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Walk,
    Closing,
    End,
    Done,
}

/// Center-sampled sub-pixel DDA.
///
/// The start cell is always emitted first without a sample. With
/// [`EndpointMode::Include`] the closing sample is not clipped to the
/// segment; when it lies beyond the end point it is still emitted and the
/// step carries [`Anomaly::SampleOutsideSegment`].
#[derive(Debug, Clone)]
pub struct CenterSampling {
    segment: Segment,
    mode: EndpointMode,
    major: Axis,
    cursor: Point,
    step_x: f64,
    step_y: f64,
    remaining: u64,
    single: bool,
    phase: Phase,
}

impl CenterSampling {
    /// Prepare a center-sampled walk over `segment`.
    #[must_use]
    pub fn new(segment: Segment, mode: EndpointMode) -> Self {
        let (dx, dy) = segment.delta();
        let (start, end) = segment.floored();
        let major = if dx.abs() > dy.abs() { Axis::X } else { Axis::Y };
        let num_pixels = match major {
            Axis::X => u64::from(start.x.abs_diff(end.x)) + 1,
            Axis::Y => u64::from(start.y.abs_diff(end.y)) + 1,
        };

        let mut walk = Self {
            segment,
            mode,
            major,
            cursor: segment.start,
            step_x: 0.0,
            step_y: 0.0,
            remaining: 0,
            single: num_pixels <= 1,
            phase: Phase::Start,
        };

        if walk.single {
            log::debug!("subpixel-dda-center: single major-axis cell {start:?}");
            return walk;
        }

        let p1 = segment.start;
        match major {
            Axis::X => {
                walk.step_x = if p1.x < segment.end.x { 1.0 } else { -1.0 };
                walk.step_y = dy / dx.abs();
                let x = p1.x.floor() + 0.5 + walk.step_x;
                walk.cursor = Point::new(x, p1.y + (x - p1.x).abs() * walk.step_y);
            }
            Axis::Y => {
                walk.step_y = if p1.y < segment.end.y { 1.0 } else { -1.0 };
                walk.step_x = dx / dy.abs();
                let y = p1.y.floor() + 0.5 + walk.step_y;
                walk.cursor = Point::new(p1.x + (y - p1.y).abs() * walk.step_x, y);
            }
        }

        walk.remaining = match mode {
            EndpointMode::Omit => num_pixels - 1,
            EndpointMode::Include => num_pixels - 2,
        };
        walk
    }

    fn advance(&mut self) -> Point {
        let sample = self.cursor;
        self.cursor.x += self.step_x;
        self.cursor.y += self.step_y;
        sample
    }

    /// Closing step of [`EndpointMode::Include`]: the last computed cell,
    /// flagged when its sample overshoots the segment.
    fn closing_step(&self) -> Option<RasterStep> {
        let sample = self.cursor;
        if sample.pixel() == self.segment.end.pixel() {
            return None;
        }

        let step = RasterStep::sampled(sample);
        match self.segment.parameter_along(sample, self.major) {
            Some(parameter) if !(0.0..=1.0).contains(&parameter) => {
                log::warn!(
                    "subpixel-dda-center-endpoint: closing sample {sample:?} lies outside \
                     {:?} (t = {parameter})",
                    self.segment
                );
                Some(step.with_anomaly(Anomaly::SampleOutsideSegment { sample, parameter }))
            }
            _ => Some(step),
        }
    }
}

impl Iterator for CenterSampling {
    type Item = RasterStep;

    fn next(&mut self) -> Option<RasterStep> {
        loop {
            match self.phase {
                Phase::Start => {
                    self.phase = if self.single { Phase::Done } else { Phase::Walk };
                    return Some(RasterStep::untraced(self.segment.start.pixel()));
                }
                Phase::Walk => {
                    if self.remaining == 0 {
                        self.phase = match self.mode {
                            EndpointMode::Omit => Phase::Done,
                            EndpointMode::Include => Phase::Closing,
                        };
                        continue;
                    }
                    self.remaining -= 1;
                    return Some(RasterStep::sampled(self.advance()));
                }
                Phase::Closing => {
                    self.phase = Phase::End;
                    if let Some(step) = self.closing_step() {
                        return Some(step);
                    }
                }
                Phase::End => {
                    self.phase = Phase::Done;
                    return Some(RasterStep::untraced(self.segment.end.pixel()));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl FusedIterator for CenterSampling {}
