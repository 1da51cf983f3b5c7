//! Output encoders (SVG, PNG, terminal).

mod png_encoder;
mod svg;
mod terminal;

pub use png_encoder::PngEncoder;
pub use svg::{SvgElement, SvgEncoder};
pub use terminal::TerminalEncoder;
