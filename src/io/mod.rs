//! Text interop for transforms.
//!
//! Renders and parses the SVG `matrix(a,c,b,d,tx,ty)` transform function.

mod svg;

pub use svg::{parse_svg_matrix, to_svg_matrix};
