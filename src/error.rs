//! Error types for affine transform operations.

use thiserror::Error;

/// Errors that can occur when inverting or parsing a transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The linear part is singular, so the transform has no inverse.
    #[error("matrix is not invertible (determinant {determinant})")]
    NotInvertible {
        /// Determinant of the 2x2 linear part.
        determinant: f64,
    },

    /// The input is not a well-formed `matrix(...)` string.
    #[error("malformed svg matrix at position {position}: {message}")]
    SvgSyntax {
        /// Byte offset of the offending character.
        position: usize,
        /// What the parser expected.
        message: &'static str,
    },

    /// A numeric field could not be parsed.
    #[error("invalid number '{value}' at position {position}")]
    InvalidNumber {
        /// The text that failed to parse.
        value: String,
        /// Byte offset where the number starts.
        position: usize,
    },
}
