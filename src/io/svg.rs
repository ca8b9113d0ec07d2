//! SVG `matrix(...)` transform rendering and parsing.
//!
//! SVG lists the six free entries column by column, so a transform with rows
//! `[a b tx; c d ty]` is written as `matrix(a,c,b,d,tx,ty)`.
//!
//! Only the single `matrix` function is handled. Transform lists and the
//! other SVG transform functions (`translate`, `rotate`, ...) are not parsed.
//!
//! # Example
//!
//! ```
//! use affine2d::io::{parse_svg_matrix, to_svg_matrix};
//! use affine2d::AffineTransform;
//!
//! let mut t: AffineTransform<f64> = AffineTransform::new();
//! t.translate(5.0, 7.0);
//! t.scale(2.0, 3.0);
//!
//! let svg = to_svg_matrix(&t);
//! assert_eq!(svg, "matrix(2,0,0,3,5,7)");
//! assert_eq!(parse_svg_matrix::<f64>(&svg).unwrap(), t);
//! ```

use crate::error::TransformError;
use crate::primitives::AffineTransform;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// Renders a transform as `matrix(a,c,b,d,tx,ty)`.
///
/// Numbers are separated by bare commas and formatted like C's `%g` with
/// shortest round-trip digits: `2`, `0.5`, `1e+06`, `6.123233995736766e-17`.
pub fn to_svg_matrix<F: Float + fmt::Display + fmt::LowerExp>(t: &AffineTransform<F>) -> String {
    format!(
        "matrix({},{},{},{},{},{})",
        format_number(t.a),
        format_number(t.c),
        format_number(t.b),
        format_number(t.d),
        format_number(t.tx),
        format_number(t.ty)
    )
}

/// Formats one number in `%g` style.
///
/// Plain decimal when the decimal exponent is in `-4..6`, otherwise
/// scientific with a signed exponent of at least two digits.
fn format_number<F: Float + fmt::Display + fmt::LowerExp>(v: F) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > F::zero() { "+Inf" } else { "-Inf" }.to_string();
    }

    let sci = format!("{v:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return v.to_string();
    };
    let exp: i32 = match exp.parse() {
        Ok(exp) => exp,
        Err(_) => return v.to_string(),
    };

    if (-4..6).contains(&exp) {
        v.to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}

/// Parses a `matrix(a,c,b,d,tx,ty)` string.
///
/// Numbers may be separated by commas, whitespace or both. Leading and
/// trailing whitespace is ignored.
pub fn parse_svg_matrix<F: Float + FromStr>(s: &str) -> Result<AffineTransform<F>, TransformError> {
    let mut parser = MatrixParser::new(s);
    parser.parse().map_err(|err| {
        log::trace!("rejecting svg matrix {s:?}: {err}");
        err
    })
}

impl FromStr for AffineTransform<f64> {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_svg_matrix(s)
    }
}

impl FromStr for AffineTransform<f32> {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_svg_matrix(s)
    }
}

struct MatrixParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> MatrixParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse<F: Float + FromStr>(&mut self) -> Result<AffineTransform<F>, TransformError> {
        self.skip_whitespace();
        self.expect_keyword("matrix")?;
        self.skip_whitespace();
        self.expect_char(b'(', "expected '('")?;

        let mut values = [F::zero(); 6];
        for (i, slot) in values.iter_mut().enumerate() {
            if i > 0 {
                self.skip_separator();
            } else {
                self.skip_whitespace();
            }
            *slot = self.parse_number()?;
        }

        self.skip_whitespace();
        self.expect_char(b')', "expected ')'")?;
        self.skip_whitespace();
        if self.pos != self.input.len() {
            return Err(self.syntax("unexpected trailing characters"));
        }

        let [a, c, b, d, tx, ty] = values;
        Ok(AffineTransform::from_parts(a, b, c, d, tx, ty))
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn syntax(&self, message: &'static str) -> TransformError {
        TransformError::SvgSyntax {
            position: self.pos,
            message,
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips whitespace with at most one comma in it.
    fn skip_separator(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_whitespace();
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), TransformError> {
        if self.input[self.pos..].starts_with(keyword) {
            self.pos += keyword.len();
            Ok(())
        } else {
            Err(self.syntax("expected 'matrix'"))
        }
    }

    fn expect_char(&mut self, expected: u8, message: &'static str) -> Result<(), TransformError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.syntax(message))
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn parse_number<F: Float + FromStr>(&mut self) -> Result<F, TransformError> {
        let start = self.pos;

        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }

        let mut digits = self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.eat_digits();
        }

        if digits == 0 {
            self.pos = start;
            return Err(self.syntax("expected number"));
        }

        // Exponent, only consumed when digits follow.
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'-' | b'+')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                self.pos = mark;
            }
        }

        let text = &self.input[start..self.pos];
        text.parse().map_err(|_| TransformError::InvalidNumber {
            value: text.to_string(),
            position: start,
        })
    }
}
