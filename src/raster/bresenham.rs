//! Bresenham's algorithm as a derivation chain.
//!
//! The walk itself is shared: step once per cell along the major axis and
//! step the minor axis whenever the error term says the true line has drifted
//! past the midpoint between two rows. What changes from one snapshot of the
//! derivation to the next is only how that error term is represented:
//!
//! | Snapshot | Start | Test | Per step | On minor step |
//! |---|---|---|---|---|
//! | [`BiasedSlope`] | `m` | `e > 0.5` | `+ m` | `- 1` |
//! | [`CenteredSlope`] | `m - 0.5` | `e > 0` | `+ m` | `- 1` |
//! | [`HalfDelta`] | `dm - 0.5 dM` | `e > 0` | `+ dm` | `- dM` |
//! | [`DoubledDelta`] | `2 dm - dM` | `e > 0` | `+ 2 dm` | `- 2 dM` |
//!
//! with `dM`/`dm` the absolute major/minor deltas and `m = dm / dM`. All four
//! emit the same cells for the same input.
//!
//! The first three snapshots pick x as the major axis on a diagonal
//! (`|dx| >= |dy|`), the production form only when `|dx| > |dy|`. On a
//! diagonal every step moves both axes, so the cells are the same either way.
//!
//! The walk always finishes on the floored end point, so the first snapshot
//! needs no end-cell fix-up after the loop.

use std::iter::FusedIterator;

use crate::geometry::{Axis, Pixel, Segment};
use crate::raster::RasterStep;

/// Representation of the Bresenham error term.
pub trait ErrorTerm {
    /// Whether a diagonal (`|dx| == |dy|`) walks along x.
    const X_MAJOR_ON_TIE: bool;

    /// Initial error for absolute deltas `major >= minor`, `major > 0`.
    fn new(major: i64, minor: i64) -> Self;

    /// Whether the minor axis steps before the next major step.
    fn should_step(&self) -> bool;

    /// Account for one major step, `stepped` telling whether the minor axis
    /// stepped with it.
    fn advance(&mut self, stepped: bool);
}

/// Floating slope, compared against `0.5`.
///
/// The running error is re-derived from integers each step; summing `slope`
/// drifts off exact ties.
#[derive(Debug, Clone)]
pub struct BiasedSlope {
    major: i64,
    minor: i64,
    run: i64,
    taken: i64,
    error: f64,
}

impl ErrorTerm for BiasedSlope {
    const X_MAJOR_ON_TIE: bool = true;

    fn new(major: i64, minor: i64) -> Self {
        let slope = minor as f64 / major as f64;
        Self { major, minor, run: 1, taken: 0, error: slope }
    }

    fn should_step(&self) -> bool {
        self.error > 0.5
    }

    fn advance(&mut self, stepped: bool) {
        if stepped {
            self.taken += 1;
        }
        self.run += 1;
        self.error = (self.run * self.minor) as f64 / self.major as f64 - self.taken as f64;
    }
}

/// Floating slope biased by `-0.5`, compared against zero.
#[derive(Debug, Clone)]
pub struct CenteredSlope {
    major: i64,
    minor: i64,
    run: i64,
    taken: i64,
    error: f64,
}

impl ErrorTerm for CenteredSlope {
    const X_MAJOR_ON_TIE: bool = true;

    fn new(major: i64, minor: i64) -> Self {
        let slope = minor as f64 / major as f64;
        Self { major, minor, run: 1, taken: 0, error: slope - 0.5 }
    }

    fn should_step(&self) -> bool {
        self.error > 0.0
    }

    fn advance(&mut self, stepped: bool) {
        if stepped {
            self.taken += 1;
        }
        self.run += 1;
        self.error =
            (self.run * self.minor) as f64 / self.major as f64 - 0.5 - self.taken as f64;
    }
}

/// Error scaled by the major delta; no division left.
#[derive(Debug, Clone)]
pub struct HalfDelta {
    major: f64,
    minor: f64,
    error: f64,
}

impl ErrorTerm for HalfDelta {
    const X_MAJOR_ON_TIE: bool = true;

    fn new(major: i64, minor: i64) -> Self {
        let (major, minor) = (major as f64, minor as f64);
        Self { major, minor, error: minor - 0.5 * major }
    }

    fn should_step(&self) -> bool {
        self.error > 0.0
    }

    fn advance(&mut self, stepped: bool) {
        if stepped {
            self.error -= self.major;
        }
        self.error += self.minor;
    }
}

/// Doubled error, integer only.
#[derive(Debug, Clone)]
pub struct DoubledDelta {
    major: i64,
    minor: i64,
    error: i64,
}

impl ErrorTerm for DoubledDelta {
    const X_MAJOR_ON_TIE: bool = false;

    fn new(major: i64, minor: i64) -> Self {
        Self { major, minor, error: 2 * minor - major }
    }

    fn should_step(&self) -> bool {
        self.error > 0
    }

    fn advance(&mut self, stepped: bool) {
        if stepped {
            self.error -= 2 * self.major;
        }
        self.error += 2 * self.minor;
    }
}

/// First snapshot: floating slope against `0.5`.
pub type Bresenham1 = BresenhamWalk<BiasedSlope>;
/// Second snapshot: `0.5` folded into the initial error.
pub type Bresenham2 = BresenhamWalk<CenteredSlope>;
/// Third snapshot: division removed.
pub type Bresenham3 = BresenhamWalk<HalfDelta>;
/// Production form: integer arithmetic only.
pub type Bresenham = BresenhamWalk<DoubledDelta>;

/// Bresenham walk over floored endpoints, parameterized by the error
/// representation.
///
/// Emits `max(|dx|, |dy|) + 1` cells from the floored start to the floored
/// end, each sampled at its center.
#[derive(Debug, Clone)]
pub struct BresenhamWalk<E> {
    x: i64,
    y: i64,
    step_x: i64,
    step_y: i64,
    major: Axis,
    end: Pixel,
    remaining: u64,
    degenerate: bool,
    term: Option<E>,
}

impl<E: ErrorTerm> BresenhamWalk<E> {
    /// Prepare a walk over `segment`.
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        let (start, end) = segment.floored();
        let (x1, y1) = (i64::from(start.x), i64::from(start.y));
        let (x2, y2) = (i64::from(end.x), i64::from(end.y));
        let delta_x = (x2 - x1).abs();
        let delta_y = (y2 - y1).abs();

        let mut walk = Self {
            x: x1,
            y: y1,
            step_x: if x1 < x2 { 1 } else { -1 },
            step_y: if y1 < y2 { 1 } else { -1 },
            major: Axis::X,
            end,
            remaining: 1,
            degenerate: delta_x == 0 && delta_y == 0,
            term: None,
        };

        if walk.degenerate {
            log::debug!("bresenham: degenerate segment at {start:?}");
            return walk;
        }

        let x_major = if E::X_MAJOR_ON_TIE { delta_x >= delta_y } else { delta_x > delta_y };
        let (major, minor) = if x_major { (delta_x, delta_y) } else { (delta_y, delta_x) };
        walk.major = if x_major { Axis::X } else { Axis::Y };
        walk.remaining = major as u64 + 1;
        walk.term = Some(E::new(major, minor));
        walk
    }

    fn current(&self) -> Pixel {
        Pixel::new(self.x as i32, self.y as i32)
    }
}

impl<E: ErrorTerm> Iterator for BresenhamWalk<E> {
    type Item = RasterStep;

    fn next(&mut self) -> Option<RasterStep> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let pixel = self.current();
        let Some(term) = self.term.as_mut() else {
            return Some(RasterStep::untraced(pixel));
        };

        let stepped = term.should_step();
        match self.major {
            Axis::X => {
                if stepped {
                    self.y += self.step_y;
                }
                self.x += self.step_x;
            }
            Axis::Y => {
                if stepped {
                    self.x += self.step_x;
                }
                self.y += self.step_y;
            }
        }
        term.advance(stepped);

        if self.remaining == 0 {
            debug_assert_eq!(pixel, self.end);
        }
        Some(RasterStep::traced(pixel, pixel.center()))
    }
}

impl<E: ErrorTerm> FusedIterator for BresenhamWalk<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells<E: ErrorTerm>(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<(i32, i32)> {
        BresenhamWalk::<E>::new(Segment::from_coords(x1, y1, x2, y2))
            .map(|s| (s.pixel.x, s.pixel.y))
            .collect()
    }

    #[test]
    fn test_shallow_line_standard_tie_break() {
        let got = cells::<DoubledDelta>(0.0, 0.0, 5.0, 2.0);
        assert_eq!(got, vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_exact_tie_does_not_step() {
        // error hits exactly zero at the second cell; `> 0` keeps the row.
        let got = cells::<DoubledDelta>(0.0, 0.0, 4.0, 1.0);
        assert_eq!(got, vec![(0, 0), (1, 0), (2, 0), (3, 1), (4, 1)]);
    }

    #[test]
    fn test_chain_agrees_on_exact_ties() {
        for (x2, y2) in [(4.0, 1.0), (2.0, 36.0), (6.0, 1.0), (10.0, 3.0), (-18.0, 9.0)] {
            let reference = cells::<DoubledDelta>(0.0, 0.0, x2, y2);
            assert_eq!(cells::<BiasedSlope>(0.0, 0.0, x2, y2), reference, "({x2}, {y2})");
            assert_eq!(cells::<CenteredSlope>(0.0, 0.0, x2, y2), reference, "({x2}, {y2})");
            assert_eq!(cells::<HalfDelta>(0.0, 0.0, x2, y2), reference, "({x2}, {y2})");
        }
    }

    #[test]
    fn test_steep_negative_octant() {
        let got = cells::<DoubledDelta>(3.0, 5.0, 1.0, 0.0);
        assert_eq!(got, vec![(3, 5), (3, 4), (2, 3), (2, 2), (1, 1), (1, 0)]);
    }

    #[test]
    fn test_diagonal_same_cells_despite_tie_rule() {
        let a = cells::<HalfDelta>(0.0, 0.0, -4.0, 4.0);
        let b = cells::<DoubledDelta>(0.0, 0.0, -4.0, 4.0);
        assert_eq!(a, b);
        assert_eq!(a, vec![(0, 0), (-1, 1), (-2, 2), (-3, 3), (-4, 4)]);
    }

    #[test]
    fn test_first_snapshot_stops_on_end_cell() {
        // The last step moves the minor axis; the walk still stops on (3, 2).
        for (x2, y2) in [(3.0, 2.0), (5.0, 4.0), (-3.0, -2.0), (2.0, 7.0)] {
            let got = cells::<BiasedSlope>(0.0, 0.0, x2, y2);
            assert_eq!(got, cells::<DoubledDelta>(0.0, 0.0, x2, y2), "({x2}, {y2})");
            assert_eq!(got.last(), Some(&(x2 as i32, y2 as i32)));
        }
        assert_eq!(cells::<BiasedSlope>(0.0, 0.0, 3.0, 2.0), vec![(0, 0), (1, 1), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_x_major_on_tie_per_snapshot() {
        let ties = [
            BiasedSlope::X_MAJOR_ON_TIE,
            CenteredSlope::X_MAJOR_ON_TIE,
            HalfDelta::X_MAJOR_ON_TIE,
            DoubledDelta::X_MAJOR_ON_TIE,
        ];
        assert_eq!(ties, [true, true, true, false]);
    }

    #[test]
    fn test_samples_are_cell_centers() {
        let steps: Vec<_> = Bresenham::new(Segment::from_coords(0.0, 0.0, 2.0, 1.0)).collect();
        for step in &steps {
            assert_eq!(step.sample, Some(step.pixel.center()));
        }
    }

    #[test_log::test]
    fn test_degenerate_single_untraced_cell() {
        let steps: Vec<_> = Bresenham2::new(Segment::from_coords(3.0, 3.0, 3.5, 3.5)).collect();
        assert_eq!(steps, vec![RasterStep::untraced(Pixel::new(3, 3))]);
    }
}
