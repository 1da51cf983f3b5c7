//! Line rasterization algorithms.
//!
//! Every strategy turns a [`Segment`] into a lazy sequence of [`RasterStep`]s:
//! the emitted cell, the continuous sample that produced it (if any), and for
//! the sub-pixel Bresenham variant a helper segment visualizing its error term.
//!
//! # Algorithms
//!
//! - **DDA**: incremental floating-point stepping on floored endpoints
//! - **Sub-pixel DDA**: uniform lerp and pixel-center sampling on raw endpoints
//! - **Bresenham derivation chain**: four algebraically equivalent snapshots,
//!   from a biased floating slope to the integer-only production form
//! - **Sub-pixel Bresenham**: integer-stepping walk seeded from fractional endpoints
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//!   *IBM Systems Journal*, 4(1), 25-30.

mod bresenham;
mod center_sampling;
mod dda;
mod subpixel_bresenham;

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

pub use bresenham::{
    BiasedSlope, Bresenham, Bresenham1, Bresenham2, Bresenham3, BresenhamWalk, CenteredSlope,
    DoubledDelta, ErrorTerm, HalfDelta,
};
pub use center_sampling::{CenterSampling, EndpointMode};
pub use dda::{Dda, SubpixelDda};
pub use subpixel_bresenham::SubpixelBresenham;

use crate::error::{Error, Result};
use crate::geometry::{HelperLine, Pixel, Point, Segment};

/// A condition the algorithm reproduces but flags instead of correcting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anomaly {
    /// The closing sample of the endpoint-including center-sampled DDA lies
    /// beyond the segment. `parameter` is its position along the major axis
    /// (`0.0` at the start, `1.0` at the end).
    SampleOutsideSegment {
        /// The offending sample.
        sample: Point,
        /// Major-axis parameter of the sample.
        parameter: f64,
    },
}

/// One emission of a rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterStep {
    /// The emitted cell.
    pub pixel: Pixel,
    /// Continuous point the cell was derived from; `None` for directly
    /// emitted cells (degenerate segments, forced endpoints, corrections).
    pub sample: Option<Point>,
    /// Error-term visualization (sub-pixel Bresenham only).
    pub helper: Option<HelperLine>,
    /// Flagged irregularity attached to this emission.
    pub anomaly: Option<Anomaly>,
}

impl RasterStep {
    /// A cell emitted without a recorded sample.
    #[must_use]
    pub const fn untraced(pixel: Pixel) -> Self {
        Self { pixel, sample: None, helper: None, anomaly: None }
    }

    /// A cell derived by flooring `sample`.
    #[must_use]
    pub fn sampled(sample: Point) -> Self {
        Self::traced(sample.pixel(), sample)
    }

    /// A cell with an explicitly supplied sample.
    #[must_use]
    pub const fn traced(pixel: Pixel, sample: Point) -> Self {
        Self { pixel, sample: Some(sample), helper: None, anomaly: None }
    }

    #[must_use]
    pub(crate) fn with_helper(mut self, helper: HelperLine) -> Self {
        self.helper = Some(helper);
        self
    }

    #[must_use]
    pub(crate) fn with_anomaly(mut self, anomaly: Anomaly) -> Self {
        self.anomaly = Some(anomaly);
        self
    }
}

/// Rasterization strategy.
///
/// A closed set of variants sharing one interface; select one explicitly or
/// by name via [`FromStr`].
///
/// Swapping the endpoints of a segment reverses the output of the integer
/// strategies whenever the major span is odd. The sub-pixel strategies are
/// direction dependent: their samples are anchored on the start point, so
/// the reversed segment can pick other cells and even a different count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    /// Integer-endpoint DDA sampling from pixel centers.
    Dda,
    /// Sub-pixel DDA, uniform lerp between the raw endpoints.
    SubpixelDda,
    /// Sub-pixel DDA sampling major-axis pixel centers; the end cell may be omitted.
    #[cfg_attr(feature = "serde", serde(rename = "subpixel-dda-center"))]
    SubpixelDdaCenterSampling,
    /// Sub-pixel DDA sampling major-axis pixel centers; the end cell is forced.
    #[cfg_attr(feature = "serde", serde(rename = "subpixel-dda-center-endpoint"))]
    SubpixelDdaCenterSamplingIncludeEndpoint,
    /// Bresenham, floating slope compared against `0.5`.
    #[cfg_attr(feature = "serde", serde(rename = "bresenham-1"))]
    Bresenham1,
    /// Bresenham, floating slope biased by `-0.5` and compared against zero.
    #[cfg_attr(feature = "serde", serde(rename = "bresenham-2"))]
    Bresenham2,
    /// Bresenham, error kept in axis-delta units (no division).
    #[cfg_attr(feature = "serde", serde(rename = "bresenham-3"))]
    Bresenham3,
    /// Bresenham, doubled integer error (production form).
    Bresenham,
    /// Bresenham seeded from fractional endpoints, with helper segments.
    SubpixelBresenham,
}

impl Algorithm {
    /// All strategies in derivation order.
    pub const ALL: [Self; 9] = [
        Self::Dda,
        Self::SubpixelDda,
        Self::SubpixelDdaCenterSampling,
        Self::SubpixelDdaCenterSamplingIncludeEndpoint,
        Self::Bresenham1,
        Self::Bresenham2,
        Self::Bresenham3,
        Self::Bresenham,
        Self::SubpixelBresenham,
    ];

    /// The Bresenham derivation chain, first snapshot to last.
    pub const BRESENHAM_CHAIN: [Self; 4] =
        [Self::Bresenham1, Self::Bresenham2, Self::Bresenham3, Self::Bresenham];

    /// Stable kebab-case identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dda => "dda",
            Self::SubpixelDda => "subpixel-dda",
            Self::SubpixelDdaCenterSampling => "subpixel-dda-center",
            Self::SubpixelDdaCenterSamplingIncludeEndpoint => "subpixel-dda-center-endpoint",
            Self::Bresenham1 => "bresenham-1",
            Self::Bresenham2 => "bresenham-2",
            Self::Bresenham3 => "bresenham-3",
            Self::Bresenham => "bresenham",
            Self::SubpixelBresenham => "subpixel-bresenham",
        }
    }

    /// Whether the strategy works on unfloored endpoints.
    #[must_use]
    pub const fn is_subpixel(self) -> bool {
        matches!(
            self,
            Self::SubpixelDda
                | Self::SubpixelDdaCenterSampling
                | Self::SubpixelDdaCenterSamplingIncludeEndpoint
                | Self::SubpixelBresenham
        )
    }

    /// Start rasterizing `segment`.
    #[must_use]
    pub fn rasterize(self, segment: Segment) -> Rasterizer {
        log::trace!("{self}: rasterizing {segment:?}");
        let inner = match self {
            Self::Dda => Inner::Dda(Dda::new(segment)),
            Self::SubpixelDda => Inner::SubpixelDda(SubpixelDda::new(segment)),
            Self::SubpixelDdaCenterSampling => {
                Inner::CenterSampling(CenterSampling::new(segment, EndpointMode::Omit))
            }
            Self::SubpixelDdaCenterSamplingIncludeEndpoint => {
                Inner::CenterSampling(CenterSampling::new(segment, EndpointMode::Include))
            }
            Self::Bresenham1 => Inner::Bresenham1(Bresenham1::new(segment)),
            Self::Bresenham2 => Inner::Bresenham2(Bresenham2::new(segment)),
            Self::Bresenham3 => Inner::Bresenham3(Bresenham3::new(segment)),
            Self::Bresenham => Inner::Bresenham(Bresenham::new(segment)),
            Self::SubpixelBresenham => {
                Inner::SubpixelBresenham(SubpixelBresenham::new(segment))
            }
        };
        Rasterizer { algorithm: self, inner }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == wanted)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// Rasterize the segment `(x1, y1) -> (x2, y2)` with `algorithm`.
#[must_use]
pub fn rasterize(algorithm: Algorithm, x1: f64, y1: f64, x2: f64, y2: f64) -> Rasterizer {
    algorithm.rasterize(Segment::from_coords(x1, y1, x2, y2))
}

#[derive(Debug, Clone)]
enum Inner {
    Dda(Dda),
    SubpixelDda(SubpixelDda),
    CenterSampling(CenterSampling),
    Bresenham1(Bresenham1),
    Bresenham2(Bresenham2),
    Bresenham3(Bresenham3),
    Bresenham(Bresenham),
    SubpixelBresenham(SubpixelBresenham),
}

/// Lazy, finite sequence of [`RasterStep`]s for one segment.
///
/// All state is owned by the iterator; it cannot be restarted.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    algorithm: Algorithm,
    inner: Inner,
}

impl Rasterizer {
    /// The strategy driving this sequence.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Drain the remaining steps, keeping only the cells.
    #[must_use]
    pub fn pixels(self) -> Vec<Pixel> {
        self.map(|step| step.pixel).collect()
    }
}

impl Iterator for Rasterizer {
    type Item = RasterStep;

    fn next(&mut self) -> Option<RasterStep> {
        match &mut self.inner {
            Inner::Dda(it) => it.next(),
            Inner::SubpixelDda(it) => it.next(),
            Inner::CenterSampling(it) => it.next(),
            Inner::Bresenham1(it) => it.next(),
            Inner::Bresenham2(it) => it.next(),
            Inner::Bresenham3(it) => it.next(),
            Inner::Bresenham(it) => it.next(),
            Inner::SubpixelBresenham(it) => it.next(),
        }
    }
}

impl FusedIterator for Rasterizer {}
