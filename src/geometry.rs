//! Geometric primitives for rasterization.
//!
//! Continuous points and segments live in a planar space measured in cell
//! units: cell `(ix, iy)` covers `[ix, ix + 1) x [iy, iy + 1)`. A [`Pixel`]
//! is obtained from a [`Point`] by flooring each coordinate independently.

use crate::error::{Error, Result};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point, rejecting NaN and infinite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteCoordinate`] if either coordinate is not finite.
    pub fn try_new(x: f64, y: f64) -> Result<Self> {
        if x.is_finite() && y.is_finite() {
            Ok(Self::new(x, y))
        } else {
            Err(Error::NonFiniteCoordinate { x, y })
        }
    }

    /// The cell containing this point.
    #[must_use]
    pub fn pixel(self) -> Pixel {
        Pixel::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points.
    ///
    /// Evaluated as `a * (1 - t) + b * t`, so `t == 0.0` and `t == 1.0`
    /// return the endpoints exactly.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let inv_t = 1.0 - t;
        Self::new(
            self.x * inv_t + other.x * t,
            self.y * inv_t + other.y * t,
        )
    }

    /// Coordinate along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// A grid cell with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Pixel {
    /// Create a new pixel.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of the cell in continuous coordinates.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(f64::from(self.x) + 0.5, f64::from(self.y) + 0.5)
    }

    /// Chebyshev distance to another pixel.
    #[must_use]
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// An ordered line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Segment {
    /// Create a new segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a segment from coordinates.
    #[must_use]
    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Create a segment, rejecting NaN and infinite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteCoordinate`] for the first offending endpoint.
    pub fn try_new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        Ok(Self::new(Point::try_new(x1, y1)?, Point::try_new(x2, y2)?))
    }

    /// The same segment traversed in the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Both endpoints floored onto the grid.
    #[must_use]
    pub fn floored(self) -> (Pixel, Pixel) {
        (self.start.pixel(), self.end.pixel())
    }

    /// True when both endpoints fall into the same cell.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        let (a, b) = self.floored();
        a == b
    }

    /// Signed extent along each axis.
    #[must_use]
    pub fn delta(self) -> (f64, f64) {
        (self.end.x - self.start.x, self.end.y - self.start.y)
    }

    /// Get the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Parameter of `p` projected onto the segment along `axis`.
    ///
    /// `0.0` at `start`, `1.0` at `end`. Returns `None` when the segment has
    /// no extent on that axis.
    #[must_use]
    pub fn parameter_along(&self, p: Point, axis: Axis) -> Option<f64> {
        let span = self.end.along(axis) - self.start.along(axis);
        if span == 0.0 {
            return None;
        }
        Some((p.along(axis) - self.start.along(axis)) / span)
    }
}

/// A short segment visualizing the error term at one step.
///
/// Emitted by the sub-pixel Bresenham variant only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HelperLine {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
}

impl HelperLine {
    /// Create a helper line from coordinates.
    #[must_use]
    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }

    /// Length of the helper line (the visualized error magnitude).
    #[must_use]
    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_pixel_floors() {
        assert_eq!(Point::new(3.7, 2.2).pixel(), Pixel::new(3, 2));
        assert_eq!(Point::new(-0.3, -1.0).pixel(), Pixel::new(-1, -1));
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_relative_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn test_point_lerp_hits_endpoints_exactly() {
        let p1 = Point::new(1.2, 1.2);
        let p2 = Point::new(8.7, 1.2);
        assert_eq!(p1.lerp(p2, 0.0), p1);
        assert_eq!(p1.lerp(p2, 1.0), p2);
        let mid = p1.lerp(p2, 0.5);
        assert_relative_eq!(mid.x, 4.95, epsilon = 1e-12);
    }

    #[test]
    fn test_try_new_rejects_non_finite() {
        assert!(Point::try_new(f64::NAN, 0.0).is_err());
        assert!(Segment::try_new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
        assert!(Segment::try_new(0.0, 0.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_segment_degenerate() {
        assert!(Segment::from_coords(3.2, 3.9, 3.8, 3.1).is_degenerate());
        assert!(!Segment::from_coords(3.2, 3.9, 4.0, 3.1).is_degenerate());
    }

    #[test]
    fn test_segment_reversed() {
        let seg = Segment::from_coords(1.0, 2.0, 7.0, -1.0);
        let rev = seg.reversed();
        assert_eq!(rev.start, seg.end);
        assert_eq!(rev.delta(), (-6.0, 3.0));
        assert_relative_eq!(rev.length(), seg.length());
    }

    #[test]
    fn test_parameter_along() {
        let seg = Segment::from_coords(2.0, 0.0, 6.0, 1.0);
        assert_eq!(seg.parameter_along(Point::new(4.0, 0.5), Axis::X), Some(0.5));
        assert_eq!(seg.parameter_along(Point::new(7.0, 0.5), Axis::X), Some(1.25));
        let flat = Segment::from_coords(2.0, 1.0, 6.0, 1.0);
        assert_eq!(flat.parameter_along(Point::ORIGIN, Axis::Y), None);
    }

    #[test]
    fn test_pixel_center_and_chebyshev() {
        let p = Pixel::new(2, -3);
        assert_eq!(p.center(), Point::new(2.5, -2.5));
        assert_eq!(p.chebyshev(Pixel::new(5, -1)), 3);
    }

    #[test]
    fn test_helper_line_length() {
        let h = HelperLine::from_coords(1.5, 2.0, 1.5, 2.75);
        assert_relative_eq!(h.length(), 0.75);
    }
}
