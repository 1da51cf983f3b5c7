//! Error types for line-raster operations.
//!
//! The rasterizers themselves are infallible; errors come from checked
//! construction, strategy lookup by name and the output encoders.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in line-raster operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer or encoder.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A coordinate was NaN or infinite.
    #[error("Non-finite coordinate: ({x}, {y})")]
    NonFiniteCoordinate {
        /// X value.
        x: f64,
        /// Y value.
        y: f64,
    },

    /// No rasterization strategy with this name.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}
