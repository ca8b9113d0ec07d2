//! Floating-point geometric primitives and operations.

mod affine2;
mod point2;

pub use affine2::{multiply_matrices, multiply_transforms, AffineTransform, Matrix3};
pub use point2::Point2;
