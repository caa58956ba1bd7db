//! The coercion lattice `Number ≤ Polynomial`, `Variable ≤ Polynomial` that lets the parser's
//! handlers apply one set of operators across the whole algebraic value model.
//!
//! Operators are defined on [`Polynomial`] only; a mixed-type operation coerces both operands at
//! the boundary. `Number` arithmetic between two numbers stays a `Number` rather than being
//! promoted, so that `1 + 1` prints as the number `2` and not as a degenerate polynomial.

use crate::error::ComputorError;
use crate::number::{is_integer, Complex};
use crate::polynomial::{Polynomial, Variable};
use core::fmt;

/// A value produced while evaluating an expression: a bare number, a bound variable, or an
/// already-combined polynomial.
#[derive(Clone, Debug)]
pub enum Value {
    Number(Complex),
    Variable(Variable),
    Polynomial(Polynomial),
}

impl Value {
    pub fn to_polynomial(self) -> Polynomial {
        match self {
            Value::Number(n) => Polynomial::from_number(n),
            Value::Variable(v) => Polynomial::from_variable(v),
            Value::Polynomial(p) => p,
        }
    }

    pub fn add(self, rhs: Value) -> Result<Value, ComputorError> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (a, b) => Ok(Value::Polynomial(a.to_polynomial().add(b.to_polynomial()))),
        }
    }

    pub fn sub(self, rhs: Value) -> Result<Value, ComputorError> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
            (a, b) => Ok(Value::Polynomial(a.to_polynomial().sub(b.to_polynomial()))),
        }
    }

    pub fn mul(self, rhs: Value) -> Result<Value, ComputorError> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
            (a, b) => Ok(Value::Polynomial(a.to_polynomial().mul(b.to_polynomial()))),
        }
    }

    pub fn div(self, rhs: Value) -> Result<Value, ComputorError> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number((a / b)?)),
            // Number ÷ Polynomial has no defined semantics: Polynomial offers no operation to
            // divide *into*, only operations to divide *by*. Number ÷ Variable still
            // works, since a lone variable is a single-term polynomial divisor.
            (Value::Number(_), Value::Polynomial(_)) => Err(ComputorError::UnsupportedOperation),
            (a, Value::Number(b)) => Ok(Value::Polynomial(a.to_polynomial().div_number(b)?)),
            (a, b) => Ok(Value::Polynomial(a.to_polynomial().div(b.to_polynomial())?)),
        }
    }

    /// `%` follows the same dispatch shape as `/` but is defined only between two `Number`s —
    /// there is no remainder operation on a `Polynomial`.
    pub fn rem(self, rhs: Value) -> Result<Value, ComputorError> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.rem(b)?)),
            _ => Err(ComputorError::UnsupportedOperation),
        }
    }

    /// Integer powers repeat multiplication (on a `Polynomial`) or scale a `Variable`'s degree;
    /// the half power `^0.5` is defined only on a real `Number`; anything else is unsupported.
    pub fn pow(self, rhs: Value) -> Result<Value, ComputorError> {
        let exponent = match rhs {
            Value::Number(n) if n.is_real() => n,
            _ => return Err(ComputorError::UnsupportedOperation),
        };
        match self {
            Value::Number(base) => Ok(Value::Number(base.pow(exponent)?)),
            Value::Variable(v) => Ok(Value::Variable(Variable::new(
                v.name,
                v.degree * exponent.real,
            ))),
            Value::Polynomial(p) => {
                if is_integer(exponent.real) {
                    Ok(Value::Polynomial(p.powi(exponent.real as i64)?))
                } else {
                    Err(ComputorError::UnsupportedOperation)
                }
            }
        }
    }

    pub fn neg(self) -> Value {
        match self {
            Value::Number(n) => Value::Number(-n),
            other => Value::Polynomial(
                other
                    .to_polynomial()
                    .mul(Polynomial::from_number(Complex::real(-1.0))),
            ),
        }
    }

    /// `Equals`'s infix handler: canonicalises `left = right` into `left - right` as a
    /// polynomial, the equation-solving core of this language.
    pub fn equation(self, rhs: Value) -> Value {
        Value::Polynomial(self.to_polynomial().sub(rhs.to_polynomial()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Variable(v) => write!(f, "{}", v),
            Value::Polynomial(p) => write!(f, "{}", p),
        }
    }
}
