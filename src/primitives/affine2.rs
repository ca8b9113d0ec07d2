//! 2D affine transformation type.

use super::Point2;
use crate::error::TransformError;
use crate::tolerance::{approx_eq, threshold, ORTHOGONALITY_EPSILON, SINGULARITY_EPSILON};
use num_traits::Float;
use std::fmt;
use std::ops::{Mul, MulAssign};

/// A general 3x3 matrix in row-major order.
pub type Matrix3<F> = [[F; 3]; 3];

/// A 2D affine transformation matrix.
///
/// Conceptually a 3x3 homogeneous matrix in row-major order:
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// | 0  0  1  |
/// ```
///
/// Only the six free entries are stored, so the bottom row is always
/// `[0, 0, 1]`. A point maps as `(a*x + b*y + tx, c*x + d*y + ty)`.
///
/// Every mutating operation right-multiplies: `self = self * op`. When the
/// result is applied to a point, the most recently appended operation acts
/// first.
///
/// # Example
///
/// ```
/// use affine2d::AffineTransform;
///
/// let mut t: AffineTransform<f64> = AffineTransform::new();
/// t.translate(10.0, 20.0);
/// t.scale(2.0, 2.0);
///
/// // Scaled first, then translated.
/// assert_eq!(t.apply(1.0, 1.0), (12.0, 22.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform<F> {
    /// Row 0, column 0.
    pub a: F,
    /// Row 0, column 1.
    pub b: F,
    /// Row 1, column 0.
    pub c: F,
    /// Row 1, column 1.
    pub d: F,
    /// Translation x component.
    pub tx: F,
    /// Translation y component.
    pub ty: F,
}

/// Multiplies two general 3x3 matrices (`a * b`).
///
/// Unlike [`multiply_transforms`], the bottom rows take part in the product,
/// so this also works for matrices that are not affine.
pub fn multiply_matrices<F: Float>(a: &Matrix3<F>, b: &Matrix3<F>) -> Matrix3<F> {
    let mut out = [[F::zero(); 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

/// Returns the product `a * b` of two affine transforms.
///
/// The result applies `b` to a point first, then `a`.
#[inline]
pub fn multiply_transforms<F: Float>(a: &AffineTransform<F>, b: &AffineTransform<F>) -> AffineTransform<F> {
    AffineTransform {
        a: a.a * b.a + a.b * b.c,
        b: a.a * b.b + a.b * b.d,
        c: a.c * b.a + a.d * b.c,
        d: a.c * b.b + a.d * b.d,
        tx: a.a * b.tx + a.b * b.ty + a.tx,
        ty: a.c * b.tx + a.d * b.ty + a.ty,
    }
}

impl<F: Float> AffineTransform<F> {
    /// Creates the identity transform.
    #[inline]
    pub fn new() -> Self {
        Self::identity()
    }

    /// Creates the identity transform (no change).
    #[inline]
    pub fn identity() -> Self {
        Self::from_parts(F::one(), F::zero(), F::zero(), F::one(), F::zero(), F::zero())
    }

    /// Creates a transform from its six free entries.
    #[inline]
    pub fn from_parts(a: F, b: F, c: F, d: F, tx: F, ty: F) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Creates a translation transform.
    #[inline]
    pub fn translation(x: F, y: F) -> Self {
        Self {
            tx: x,
            ty: y,
            ..Self::identity()
        }
    }

    /// Creates a non-uniform scaling transform around the origin.
    #[inline]
    pub fn scaling(sx: F, sy: F) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Creates a rotation transform around the origin.
    ///
    /// Angle is in radians, positive is counter-clockwise.
    #[inline]
    pub fn rotation(angle: F) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self {
            a: cos_a,
            b: -sin_a,
            c: sin_a,
            d: cos_a,
            ..Self::identity()
        }
    }

    /// Creates a rotation around `(cx, cy)` as a single matrix.
    ///
    /// Equal to `translation(cx, cy) * rotation(angle) * translation(-cx, -cy)`.
    pub fn rotation_around(angle: F, cx: F, cy: F) -> Self {
        let to_origin = Self::translation(-cx, -cy);
        let back = Self::translation(cx, cy);
        multiply_transforms(&back, &multiply_transforms(&Self::rotation(angle), &to_origin))
    }

    /// Creates a scaling around `(cx, cy)` as a single matrix.
    ///
    /// The center maps to itself.
    pub fn scaling_around(sx: F, sy: F, cx: F, cy: F) -> Self {
        let to_origin = Self::translation(-cx, -cy);
        let back = Self::translation(cx, cy);
        multiply_transforms(&back, &multiply_transforms(&Self::scaling(sx, sy), &to_origin))
    }

    /// Creates a horizontal skew by `angle` radians (`b = tan(angle)`).
    #[inline]
    pub fn skewing_x(angle: F) -> Self {
        Self {
            b: angle.tan(),
            ..Self::identity()
        }
    }

    /// Creates a vertical skew by `angle` radians (`c = tan(angle)`).
    #[inline]
    pub fn skewing_y(angle: F) -> Self {
        Self {
            c: angle.tan(),
            ..Self::identity()
        }
    }

    /// Creates a general shear.
    ///
    /// Points are shifted horizontally by `shx * y` and vertically by `shy * x`.
    #[inline]
    pub fn shearing(shx: F, shy: F) -> Self {
        Self {
            b: shx,
            c: shy,
            ..Self::identity()
        }
    }

    /// Creates a reflection across the x-axis (y = 0).
    #[inline]
    pub fn reflection_x() -> Self {
        Self::scaling(F::one(), -F::one())
    }

    /// Creates a reflection across the y-axis (x = 0).
    #[inline]
    pub fn reflection_y() -> Self {
        Self::scaling(-F::one(), F::one())
    }

    /// Creates a reflection through the origin.
    #[inline]
    pub fn reflection_origin() -> Self {
        Self::scaling(-F::one(), -F::one())
    }

    /// Creates a transform from a row-major 3x3 matrix.
    ///
    /// The bottom row is ignored.
    pub fn from_matrix(m: &Matrix3<F>) -> Self {
        Self {
            a: m[0][0],
            b: m[0][1],
            tx: m[0][2],
            c: m[1][0],
            d: m[1][1],
            ty: m[1][2],
        }
    }

    /// Converts to a row-major 3x3 matrix with bottom row `[0, 0, 1]`.
    pub fn to_matrix(&self) -> Matrix3<F> {
        [
            [self.a, self.b, self.tx],
            [self.c, self.d, self.ty],
            [F::zero(), F::zero(), F::one()],
        ]
    }

    /// Right-multiplies in place: `self = self * other`.
    #[inline]
    pub fn multiply_with(&mut self, other: &Self) {
        *self = multiply_transforms(self, other);
    }

    /// Appends a translation.
    pub fn translate(&mut self, x: F, y: F) {
        self.multiply_with(&Self::translation(x, y));
    }

    /// Appends a non-uniform scale about the origin.
    ///
    /// Zero and negative factors are allowed.
    pub fn scale(&mut self, sx: F, sy: F) {
        self.multiply_with(&Self::scaling(sx, sy));
    }

    /// Appends a counter-clockwise rotation about the origin.
    pub fn rotate_origin(&mut self, angle: F) {
        self.multiply_with(&Self::rotation(angle));
    }

    /// Appends a rotation about `(cx, cy)` as three sequential steps:
    /// translate to `(cx, cy)`, rotate, translate back.
    pub fn rotate_point(&mut self, angle: F, cx: F, cy: F) {
        self.translate(cx, cy);
        self.rotate_origin(angle);
        self.translate(-cx, -cy);
    }

    /// Appends a rotation about `(cx, cy)` built as one composite matrix.
    pub fn rotate_around_point(&mut self, angle: F, cx: F, cy: F) {
        self.multiply_with(&Self::rotation_around(angle, cx, cy));
    }

    /// Appends a scale about `(cx, cy)` built as one composite matrix.
    pub fn scale_around_point(&mut self, sx: F, sy: F, cx: F, cy: F) {
        self.multiply_with(&Self::scaling_around(sx, sy, cx, cy));
    }

    /// Appends a horizontal skew.
    pub fn skew_x(&mut self, angle: F) {
        self.multiply_with(&Self::skewing_x(angle));
    }

    /// Appends a vertical skew.
    pub fn skew_y(&mut self, angle: F) {
        self.multiply_with(&Self::skewing_y(angle));
    }

    /// Appends a general shear.
    pub fn shear(&mut self, shx: F, shy: F) {
        self.multiply_with(&Self::shearing(shx, shy));
    }

    /// Appends a reflection across the x-axis.
    pub fn reflect_x(&mut self) {
        self.multiply_with(&Self::reflection_x());
    }

    /// Appends a reflection across the y-axis.
    pub fn reflect_y(&mut self) {
        self.multiply_with(&Self::reflection_y());
    }

    /// Appends a reflection through the origin.
    pub fn reflect_origin(&mut self) {
        self.multiply_with(&Self::reflection_origin());
    }

    /// Consuming form of [`translate`](Self::translate).
    #[must_use]
    pub fn translated(mut self, x: F, y: F) -> Self {
        self.translate(x, y);
        self
    }

    /// Consuming form of [`scale`](Self::scale).
    #[must_use]
    pub fn scaled(mut self, sx: F, sy: F) -> Self {
        self.scale(sx, sy);
        self
    }

    /// Consuming form of [`rotate_origin`](Self::rotate_origin).
    #[must_use]
    pub fn rotated(mut self, angle: F) -> Self {
        self.rotate_origin(angle);
        self
    }

    /// Resets to the identity in place.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    /// Maps `(x, y)` through the transform.
    #[inline]
    pub fn apply(&self, x: F, y: F) -> (F, F) {
        (
            self.a * x + self.b * y + self.tx,
            self.c * x + self.d * y + self.ty,
        )
    }

    /// Applies this transform to a point.
    #[inline]
    pub fn apply_to_point(&self, p: Point2<F>) -> Point2<F> {
        let (x, y) = self.apply(p.x, p.y);
        Point2::new(x, y)
    }

    /// Applies this transform to multiple points, preserving order.
    pub fn apply_to_points(&self, points: &[Point2<F>]) -> Vec<Point2<F>> {
        points.iter().map(|p| self.apply_to_point(*p)).collect()
    }

    /// Applies this transform to every point in the slice in place.
    pub fn apply_to_points_mut(&self, points: &mut [Point2<F>]) {
        for p in points.iter_mut() {
            *p = self.apply_to_point(*p);
        }
    }

    /// Returns the determinant of the linear part.
    ///
    /// - Positive: preserves orientation
    /// - Negative: flips orientation (reflection)
    /// - Zero: singular (collapses to line or point)
    #[inline]
    pub fn determinant(&self) -> F {
        self.a * self.d - self.b * self.c
    }

    /// Returns true if `|det|` exceeds [`SINGULARITY_EPSILON`].
    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > threshold(SINGULARITY_EPSILON)
    }

    /// Returns the inverse transform.
    ///
    /// Fails with [`TransformError::NotInvertible`] when `|det|` is at or
    /// below [`SINGULARITY_EPSILON`].
    pub fn invert(&self) -> Result<Self, TransformError> {
        self.invert_with_tolerance(threshold(SINGULARITY_EPSILON))
    }

    /// Like [`invert`](Self::invert), with a caller-supplied singularity threshold.
    pub fn invert_with_tolerance(&self, eps: F) -> Result<Self, TransformError> {
        let det = self.determinant();
        let invertible = det.abs() > eps;
        if !invertible {
            let determinant = det.to_f64().unwrap_or(f64::NAN);
            log::trace!("refusing to invert singular transform (det = {determinant})");
            return Err(TransformError::NotInvertible { determinant });
        }

        let inv_det = F::one() / det;
        Ok(Self {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            tx: (self.b * self.ty - self.d * self.tx) * inv_det,
            ty: (self.c * self.tx - self.a * self.ty) * inv_det,
        })
    }

    /// Returns the translation component `(tx, ty)`.
    #[inline]
    pub fn translation_component(&self) -> (F, F) {
        (self.tx, self.ty)
    }

    /// Extracts the scale factors `(sx, sy)`.
    ///
    /// `sx` is the length of the first column and `sy` of the second; `sy`
    /// is negated when the determinant is negative to signal a reflection.
    /// Only meaningful when the linear part has no shear.
    pub fn scale_factors(&self) -> (F, F) {
        let sx = (self.a * self.a + self.c * self.c).sqrt();
        let sy = (self.b * self.b + self.d * self.d).sqrt();
        if self.determinant() < F::zero() {
            (sx, -sy)
        } else {
            (sx, sy)
        }
    }

    /// Extracts the rotation angle in radians (assuming no shear).
    #[inline]
    pub fn rotation_angle(&self) -> F {
        self.c.atan2(self.a)
    }

    /// Returns true if every entry equals the other's exactly.
    ///
    /// Same as `==`: `-0.0` equals `0.0` and NaN equals nothing.
    #[inline]
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns true if this is exactly the identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Returns true if `|det|` is within [`ORTHOGONALITY_EPSILON`] of 1.
    ///
    /// Holds for pure rotations and reflections.
    pub fn is_orthogonal(&self) -> bool {
        (self.determinant().abs() - F::one()).abs() < threshold(ORTHOGONALITY_EPSILON)
    }

    /// Returns true if all nine matrix cells differ by at most `epsilon`.
    pub fn is_nearly_equal(&self, other: &Self, epsilon: F) -> bool {
        let lhs = self.to_matrix();
        let rhs = other.to_matrix();
        lhs.iter()
            .flatten()
            .zip(rhs.iter().flatten())
            .all(|(&x, &y)| approx_eq(x, y, epsilon))
    }

    /// Linearly interpolates the six free entries.
    ///
    /// `factor` is unconstrained; values outside `[0, 1]` extrapolate. The
    /// bottom row stays `[0, 0, 1]`. Rotation is not interpolated smoothly.
    pub fn lerp(&self, other: &Self, factor: F) -> Self {
        let keep = F::one() - factor;
        Self {
            a: self.a * keep + other.a * factor,
            b: self.b * keep + other.b * factor,
            c: self.c * keep + other.c * factor,
            d: self.d * keep + other.d * factor,
            tx: self.tx * keep + other.tx * factor,
            ty: self.ty * keep + other.ty * factor,
        }
    }
}

impl<F: Float + fmt::Display + fmt::LowerExp> AffineTransform<F> {
    /// Renders as an SVG `matrix(a,c,b,d,tx,ty)` transform.
    ///
    /// See [`crate::io::to_svg_matrix`].
    pub fn to_svg_matrix(&self) -> String {
        crate::io::to_svg_matrix(self)
    }
}

impl<F: Float> Default for AffineTransform<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float + fmt::Display> fmt::Display for AffineTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.to_matrix();
        write!(
            f,
            "Transform[{:.3} {:.3} {:.3}; {:.3} {:.3} {:.3}; {:.3} {:.3} {:.3}]",
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2]
        )
    }
}

impl<F: Float> Mul for AffineTransform<F> {
    type Output = Self;

    /// Multiplies two transforms (self * rhs).
    ///
    /// The result applies `rhs` first, then `self`.
    fn mul(self, rhs: Self) -> Self {
        multiply_transforms(&self, &rhs)
    }
}

impl<F: Float> MulAssign for AffineTransform<F> {
    fn mul_assign(&mut self, rhs: Self) {
        self.multiply_with(&rhs);
    }
}

impl<F: Float> Mul<Point2<F>> for AffineTransform<F> {
    type Output = Point2<F>;

    fn mul(self, rhs: Point2<F>) -> Point2<F> {
        self.apply_to_point(rhs)
    }
}
