//! Bresenham walk seeded from fractional endpoints.
//!
//! The walk steps over integer cells like the classic algorithm, but its
//! initial error combines two distances measured on the raw endpoints: from
//! the start point to the next cell center on the major axis, and from the
//! start point to its cell's edge on the minor axis (measured from the far
//! edge when the line travels towards negative minor coordinates). Errors are
//! kept in units of the absolute major delta, so a step triggers when
//! `error >= major_delta`.
//!
//! Each step also yields a helper segment along the minor axis whose length
//! is `error / major_delta`, anchored on the cell edge the line moves away
//! from.
//!
//! The walk covers every major-axis column before the end column. It then
//! emits the cell it stopped on when that cell undershoots the end row, and
//! finishes on the floored end point.

use std::iter::FusedIterator;

use crate::geometry::{Axis, HelperLine, Pixel, Point, Segment};
use crate::raster::RasterStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Single,
    Walk,
    Correction,
    End,
    Done,
}

/// Sub-pixel Bresenham rasterizer.
///
/// Coordinates are tracked as `(u, v)` = (major, minor) and mapped back to
/// `(x, y)` on emission.
#[derive(Debug, Clone)]
pub struct SubpixelBresenham {
    major: Axis,
    u: i64,
    v: i64,
    step_u: i64,
    step_v: i64,
    delta_major: f64,
    delta_minor: f64,
    error: f64,
    reversed: bool,
    end: Pixel,
    remaining: u64,
    phase: Phase,
}

impl SubpixelBresenham {
    /// Prepare a sub-pixel walk over `segment`.
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        let (p1, p2) = (segment.start, segment.end);
        let (start, end) = segment.floored();
        let (dx, dy) = segment.delta();
        let major = if dx.abs() > dy.abs() { Axis::X } else { Axis::Y };
        let minor = major.other();

        let (u1, u2) = (p1.along(major), p2.along(major));
        let (v1, v2) = (p1.along(minor), p2.along(minor));
        let step_u: i64 = if u1 < u2 { 1 } else { -1 };
        let step_v: i64 = if v1 < v2 { 1 } else { -1 };
        let delta_major = (u2 - u1).abs();
        let delta_minor = (v2 - v1).abs();

        let dist_next_center = (u1.floor() + 0.5 + step_u as f64 - u1).abs();
        let mut dist_edge = v1 - v1.floor();
        if v1 > v2 {
            dist_edge = 1.0 - dist_edge;
        }

        let u = u1.floor() as i64;
        let cells = (u2.floor() as i64 - u).unsigned_abs();

        let mut walk = Self {
            major,
            u,
            v: v1.floor() as i64,
            step_u,
            step_v,
            delta_major,
            delta_minor,
            error: dist_edge * delta_major + dist_next_center * delta_minor,
            reversed: v2 < v1,
            end,
            remaining: cells,
            phase: Phase::Walk,
        };

        if start == end {
            log::debug!("subpixel-bresenham: segment inside cell {start:?}");
            walk.phase = Phase::Single;
        }
        walk
    }

    fn to_xy(&self, u: f64, v: f64) -> Point {
        match self.major {
            Axis::X => Point::new(u, v),
            Axis::Y => Point::new(v, u),
        }
    }

    fn current(&self) -> Pixel {
        match self.major {
            Axis::X => Pixel::new(self.u as i32, self.v as i32),
            Axis::Y => Pixel::new(self.v as i32, self.u as i32),
        }
    }

    fn helper(&self) -> HelperLine {
        let (u, v) = (self.u as f64 + 0.5, self.v as f64);
        let anchor = if self.reversed { v + 1.0 } else { v };
        let length = self.error / self.delta_major;
        let tip = if self.reversed { anchor - length } else { anchor + length };
        let from = self.to_xy(u, anchor);
        let to = self.to_xy(u, tip);
        HelperLine { from, to }
    }

    /// Emit the cell the walk stopped on unless it is already the end cell
    /// or has moved one row past it on the minor axis.
    fn correction(&self) -> Option<RasterStep> {
        let pixel = self.current();
        let end_minor = match self.major {
            Axis::X => i64::from(self.end.y),
            Axis::Y => i64::from(self.end.x),
        };
        if pixel == self.end || self.v == end_minor + self.step_v {
            return None;
        }
        log::debug!("subpixel-bresenham: walk undershot {:?}, emitting {pixel:?}", self.end);
        Some(RasterStep::untraced(pixel))
    }
}

impl Iterator for SubpixelBresenham {
    type Item = RasterStep;

    fn next(&mut self) -> Option<RasterStep> {
        loop {
            match self.phase {
                Phase::Walk => {
                    if self.remaining == 0 {
                        self.phase = Phase::Correction;
                        continue;
                    }
                    self.remaining -= 1;

                    let pixel = self.current();
                    let step = RasterStep::traced(pixel, pixel.center()).with_helper(self.helper());

                    if self.error >= self.delta_major {
                        self.error -= self.delta_major;
                        self.v += self.step_v;
                    }
                    self.u += self.step_u;
                    self.error += self.delta_minor;
                    return Some(step);
                }
                Phase::Correction => {
                    self.phase = Phase::End;
                    if let Some(step) = self.correction() {
                        return Some(step);
                    }
                }
                Phase::End => {
                    self.phase = Phase::Done;
                    return Some(RasterStep::untraced(self.end));
                }
                Phase::Single => {
                    self.phase = Phase::Done;
                    return Some(RasterStep::untraced(self.current()));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl FusedIterator for SubpixelBresenham {}
