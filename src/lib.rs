//! # line-raster
//!
//! Line rasterization algorithms that show their work.
//!
//! Every algorithm turns a continuous segment into a sequence of grid cells
//! and, alongside each cell, reports the continuous sample it was derived
//! from. The sub-pixel Bresenham variant also reports helper segments that
//! visualize its error term. The output encoders draw those traces.
//!
//! ## Algorithms
//!
//! - **DDA**: floating-point stepping between floored endpoints
//! - **Sub-pixel DDA**: uniform lerp, and sampling at major-axis pixel
//!   centers with or without a forced end cell
//! - **Bresenham derivation chain**: four snapshots from a biased floating
//!   slope to the integer-only production form, all emitting the same cells
//! - **Sub-pixel Bresenham**: integer stepping seeded from fractional endpoints
//!
//! ## Quick Start
//!
//! ```
//! use line_raster::prelude::*;
//!
//! let cells = rasterize(Algorithm::Bresenham, 0.0, 0.0, 5.0, 2.0).pixels();
//! assert_eq!(cells.len(), 6);
//! assert_eq!(cells[5], Pixel::new(5, 2));
//!
//! let segment = Segment::from_coords(0.5, 0.5, 4.5, 2.5);
//! let trace = Trace::capture(Algorithm::SubpixelBresenham, segment);
//! assert_eq!(trace.samples.len(), trace.helper_lines.len());
//!
//! let svg = SvgEncoder::for_trace(segment, trace).render();
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for geometry, strategies and steps
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.
//! Flagged anomalies are reported at `warn`, fast paths and end corrections
//! at `debug`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Points, cells, segments and helper lines.
pub mod geometry;

/// Rasterization strategies.
pub mod raster;

/// Collaborator traits and the caller-owned trace accumulator.
pub mod trace;

/// Hit-counting cell grid.
pub mod framebuffer;

// ============================================================================
// Output Modules
// ============================================================================

/// Color types and palettes.
pub mod color;

/// Output encoders (SVG, PNG, terminal).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for line-raster operations.
pub mod error;

pub use error::{Error, Result};
pub use raster::{rasterize, Algorithm, RasterStep, Rasterizer};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use line_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Palette, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Axis, HelperLine, Pixel, Point, Segment};
    pub use crate::output::{PngEncoder, SvgEncoder, TerminalEncoder};
    pub use crate::raster::{rasterize, Algorithm, Anomaly, RasterStep, Rasterizer};
    pub use crate::trace::{drive, Discard, PixelSink, Trace, TraceRecorder};
}
