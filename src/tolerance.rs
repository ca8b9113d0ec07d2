//! Numeric thresholds used by the transform analysis routines.
//!
//! Every threshold is a named constant so it can be audited and tested on its
//! own. Operations that compare against a threshold say which one they use.

use num_traits::Float;

/// Determinants with absolute value at or below this are treated as singular.
pub const SINGULARITY_EPSILON: f64 = 1e-10;

/// Maximum deviation of `|det|` from 1 for a transform to count as orthogonal.
pub const ORTHOGONALITY_EPSILON: f64 = 1e-10;

/// Converts an `f64` threshold into the working float type.
///
/// Falls back to `F::epsilon()` if the value is not representable, which
/// cannot happen for `f32` or `f64`.
#[inline]
pub fn threshold<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::epsilon)
}

/// Returns true if `a` and `b` differ by at most `eps`.
#[inline]
pub fn approx_eq<F: Float>(a: F, b: F, eps: F) -> bool {
    (a - b).abs() <= eps
}
