//! affine2d - 2D affine transformation algebra
//!
//! A transform maps points between coordinate frames using translation,
//! scaling, rotation, skew, shear and reflection. Transforms compose by
//! right-multiplication, can be inverted, decomposed into scale, rotation and
//! translation, interpolated, and written as SVG `matrix(...)` strings.
//!
//! ```
//! use affine2d::{AffineTransform, Point2};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut t: AffineTransform<f64> = AffineTransform::new();
//! t.rotate_around_point(FRAC_PI_2, 1.0, 1.0);
//!
//! let p = t.apply_to_point(Point2::new(2.0, 1.0));
//! assert!((p.x - 1.0).abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);
//!
//! let inv = t.invert().unwrap();
//! assert!((t * inv).is_nearly_equal(&AffineTransform::identity(), 1e-12));
//! ```

pub mod error;
pub mod io;
pub mod primitives;
pub mod tolerance;

pub use error::TransformError;
pub use primitives::{multiply_matrices, multiply_transforms, AffineTransform, Matrix3, Point2};
pub use tolerance::{ORTHOGONALITY_EPSILON, SINGULARITY_EPSILON};
