//! The numeric kernel: exact-enough complex arithmetic over `(real, imag)` pairs of `f64`.
//!
//! Arbitrary precision is explicitly out of scope; `f64` is the same representation the original
//! Python host falls back to once its real/imag components stop being plain `int`s.

use crate::error::{ComputorError, MathError};
use core::cmp::Ordering;
use core::fmt;
use core::ops;

/// Acceptable error for the bisection search and for snapping near-integer reals to an integer.
const EPSILON: f64 = 1e-9;

/// Hard cap on bisection iterations before giving up with [`MathError::NoConvergence`].
const MAX_BISECTION_ITERATIONS: u32 = 100;

/// Hard cap on the magnitude of an integer exponent passed to [`Complex::powi`].
///
/// A Python host relying on this kernel would otherwise hit `RecursionError` once `pow`'s
/// recursion got too deep; we bound the exponent explicitly instead.
pub const MAX_POWER_EXPONENT: i64 = 1_000_000;

/// A complex number `real + imag*i`.
///
/// Equality is componentwise; ordering compares `real` only, per the data model invariant that
/// `imag` does not participate in ordering.
#[derive(Clone, Copy, Debug)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    /// Builds a real number.
    pub fn real(real: f64) -> Self {
        Complex { real, imag: 0.0 }
    }

    /// Builds a pure imaginary number.
    pub fn imaginary(imag: f64) -> Self {
        Complex { real: 0.0, imag }
    }

    /// Builds `real + imag*i`.
    pub fn new(real: f64, imag: f64) -> Self {
        Complex { real, imag }
    }

    /// Parses a lexed number lexeme (e.g. `"3.5"`, `"2i"`, `"i"`) into a `Complex`.
    ///
    /// A lexeme containing `i` parses as a pure imaginary; otherwise it parses as real. This
    /// mirrors `Number.clear` in `mathematics/numbers.py`.
    pub fn parse(lexeme: &str) -> Result<Self, ComputorError> {
        if let Some(digits) = lexeme.strip_suffix('i') {
            let imag = if digits.is_empty() {
                1.0
            } else {
                digits
                    .parse()
                    .map_err(|_| ComputorError::Syntax(format!("wrong number: {}", lexeme)))?
            };
            Ok(Complex::imaginary(imag))
        } else {
            let real = lexeme
                .parse()
                .map_err(|_| ComputorError::Syntax(format!("wrong number: {}", lexeme)))?;
            Ok(Complex::real(real))
        }
    }

    /// `true` when the value is real, i.e. `imag == 0` per the data model invariant.
    pub fn is_real(self) -> bool {
        self.imag == 0.0
    }

    /// `|a+bi|`: the value unchanged if `imag != 0`, else `|real|`.
    pub fn abs(self) -> Complex {
        if self.imag != 0.0 {
            self
        } else {
            Complex::real(self.real.abs())
        }
    }

    /// Snaps a near-integer real value to the nearest integer within [`EPSILON`].
    ///
    /// Applied only at formatting time and right after division/negative powers, never on
    /// algebraic intermediates.
    pub fn rounded(self) -> Complex {
        Complex {
            real: round_near_integer(self.real),
            imag: round_near_integer(self.imag),
        }
    }

    /// Integer power by iterative squaring; `z^0 = 1`, `z^n` for `n < 0` is `1 / z^n`.
    pub fn powi(self, n: i64) -> Result<Complex, ComputorError> {
        if n.unsigned_abs() > MAX_POWER_EXPONENT as u64 {
            return Err(MathError::TooBigPower.into());
        }
        if n < 0 {
            if self.real == 0.0 && self.imag == 0.0 {
                return Err(ComputorError::DivisionByZero);
            }
            let positive = self.powi(-n)?;
            return Ok((Complex::real(1.0) / positive)?.rounded());
        }

        let mut base = self;
        let mut exponent = n as u64;
        let mut acc = Complex::real(1.0);
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            exponent >>= 1;
        }
        Ok(acc)
    }

    /// `z^0.5`, defined only for real operands: `sqrt(n)` via bisection for `n >= 0`, else
    /// `sqrt(|n|) * i`.
    pub fn sqrt_real(self) -> Result<Complex, ComputorError> {
        if !self.is_real() {
            return Err(ComputorError::UnsupportedOperation);
        }
        let n = self.real;
        let magnitude = n.abs();
        let root = bisection(|x| x * x - magnitude, 0.0, magnitude.max(1.0))?.rounded_scalar();
        if n >= 0.0 {
            Ok(Complex::real(root))
        } else {
            Ok(Complex::imaginary(root))
        }
    }

    /// `a % b` for real operands (floating-point remainder, sign of `a`); fails with
    /// `DivisionByZero` when `b == 0`, and with `UnsupportedOperation` on any complex operand —
    /// modulo is not meaningfully defined over `(real, imag)` pairs.
    pub fn rem(self, rhs: Complex) -> Result<Complex, ComputorError> {
        if !self.is_real() || !rhs.is_real() {
            return Err(ComputorError::UnsupportedOperation);
        }
        if rhs.real == 0.0 {
            return Err(ComputorError::DivisionByZero);
        }
        Ok(Complex::real(self.real % rhs.real))
    }

    /// `z^p` for a real power `p`; only integer and `0.5` powers are supported.
    pub fn pow(self, p: Complex) -> Result<Complex, ComputorError> {
        if !p.is_real() {
            return Err(ComputorError::UnsupportedOperation);
        }
        if is_integer(p.real) {
            self.powi(p.real as i64)
        } else if (p.real - 0.5).abs() < EPSILON {
            self.sqrt_real()
        } else {
            Err(ComputorError::UnsupportedOperation)
        }
    }
}

/// `true` when `x` is within [`EPSILON`] of an integer.
pub fn is_integer(x: f64) -> bool {
    (x - x.round()).abs() < EPSILON
}

fn round_near_integer(x: f64) -> f64 {
    if is_integer(x) {
        x.round()
    } else {
        x
    }
}

/// Bisection (binary search / dichotomy) root finder.
///
/// Finds `x` in `[a, b]` such that `f(x) == 0`, assuming `f(a)` and `f(b)` have opposite signs
/// (or `f(mid) == 0` is hit directly). Converges when `(b - a) / 2 < EPSILON` or caps out after
/// [`MAX_BISECTION_ITERATIONS`] with [`MathError::NoConvergence`].
pub fn bisection(f: impl Fn(f64) -> f64, mut a: f64, mut b: f64) -> Result<Complex, ComputorError> {
    for _ in 0..MAX_BISECTION_ITERATIONS {
        let mid = (a + b) / 2.0;
        let f_mid = f(mid);
        if f_mid == 0.0 || (b - a) / 2.0 < EPSILON {
            return Ok(Complex::real(mid));
        } else if f_mid > 0.0 {
            b = mid;
        } else {
            a = mid;
        }
    }
    Err(MathError::NoConvergence.into())
}

impl Complex {
    fn rounded_scalar(self) -> f64 {
        round_near_integer(self.real)
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.real == other.real && self.imag == other.imag
    }
}

impl PartialOrd for Complex {
    /// Ordering compares `real` only; `imag` is ignored by design (data model invariant).
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.real.partial_cmp(&other.real)
    }
}

impl ops::Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex::new(-self.real, -self.imag)
    }
}

impl ops::Add for Complex {
    type Output = Complex;
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.real + rhs.real, self.imag + rhs.imag)
    }
}

impl ops::Sub for Complex {
    type Output = Complex;
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.real - rhs.real, self.imag - rhs.imag)
    }
}

impl ops::Mul for Complex {
    type Output = Complex;
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.real * rhs.real - self.imag * rhs.imag,
            self.real * rhs.imag + self.imag * rhs.real,
        )
    }
}

impl ops::Div for Complex {
    type Output = Result<Complex, ComputorError>;
    fn div(self, rhs: Complex) -> Self::Output {
        let denom = rhs.real * rhs.real + rhs.imag * rhs.imag;
        if denom == 0.0 {
            return Err(ComputorError::DivisionByZero);
        }
        Ok(Complex::new(
            (self.real * rhs.real + self.imag * rhs.imag) / denom,
            (self.imag * rhs.real - self.real * rhs.imag) / denom,
        ))
    }
}

impl fmt::Display for Complex {
    /// Real part in general (`g`-style) form; pure imaginary `bi` with `b` omitted when `|b|==1`;
    /// mixed `a + bi`/`a - bi` with a space-padded sign; `0` suppressed when the other part
    /// carries the value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let real = self.real;
        let imag = self.imag;
        if imag == 0.0 {
            return write!(f, "{}", format_g(real));
        }
        let imag_part = |v: f64| -> String {
            if v.abs() == 1.0 {
                "i".to_string()
            } else {
                format!("{}i", format_g(v.abs()))
            }
        };
        if real == 0.0 {
            if imag < 0.0 {
                write!(f, "-{}", imag_part(imag))
            } else {
                write!(f, "{}", imag_part(imag))
            }
        } else {
            let sign = if imag > 0.0 { " + " } else { " - " };
            write!(f, "{}{}{}", format_g(real), sign, imag_part(imag))
        }
    }
}

/// Minimal-digits ("general" / `%g`-like) formatting for an `f64`.
pub fn format_g(x: f64) -> String {
    if is_integer(x) {
        format!("{}", x.round() as i64)
    } else {
        let s = format!("{}", x);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_mul() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        assert_eq!(a * b, Complex::new(5.0, 5.0));
    }

    #[test]
    fn div_by_zero_fails() {
        let a = Complex::real(1.0);
        let z = Complex::real(0.0);
        assert_eq!((a / z).unwrap_err(), ComputorError::DivisionByZero);
    }

    #[test]
    fn div_matches_formula() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, 4.0);
        let got = (a / b).unwrap();
        assert!((got.real - 0.44).abs() < 1e-9);
        assert!((got.imag - 0.08).abs() < 1e-9);
    }

    #[test]
    fn powi_zero_is_one() {
        let a = Complex::new(3.0, -2.0);
        assert_eq!(a.powi(0).unwrap(), Complex::real(1.0));
    }

    #[test]
    fn powi_negative_zero_fails() {
        let z = Complex::real(0.0);
        assert_eq!(z.powi(-1).unwrap_err(), ComputorError::DivisionByZero);
    }

    #[test]
    fn sqrt_real_negative_is_imaginary() {
        let n = Complex::real(-4.0);
        let root = n.pow(Complex::real(0.5)).unwrap();
        assert!((root.imag - 2.0).abs() < 1e-6);
        assert_eq!(root.real, 0.0);
    }

    #[test]
    fn sqrt_real_positive() {
        let n = Complex::real(9.0);
        let root = n.pow(Complex::real(0.5)).unwrap();
        assert!((root.real - 3.0).abs() < 1e-6);
    }

    #[test]
    fn non_integer_non_half_power_unsupported() {
        let n = Complex::real(2.0);
        assert_eq!(
            n.pow(Complex::real(0.3)).unwrap_err(),
            ComputorError::UnsupportedOperation
        );
    }

    #[test]
    fn bisection_converges_on_sqrt_two() {
        let root = bisection(|x| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((root.real - std::f64::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn display_real_only() {
        assert_eq!(Complex::real(5.0).to_string(), "5");
        assert_eq!(Complex::real(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn display_imaginary_unit_coefficient() {
        assert_eq!(Complex::imaginary(1.0).to_string(), "i");
        assert_eq!(Complex::imaginary(-1.0).to_string(), "-i");
    }

    #[test]
    fn display_mixed() {
        assert_eq!(Complex::new(-0.5, 1.040832).to_string(), "-0.5 + 1.040832i");
    }

    #[test]
    fn rem_matches_float_remainder() {
        let a = Complex::real(7.0);
        let b = Complex::real(3.0);
        assert_eq!(a.rem(b).unwrap(), Complex::real(1.0));
    }

    #[test]
    fn rem_by_zero_fails() {
        let a = Complex::real(7.0);
        assert_eq!(
            a.rem(Complex::real(0.0)).unwrap_err(),
            ComputorError::DivisionByZero
        );
    }
}
