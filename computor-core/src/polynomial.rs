//! Term/Variable/Polynomial model and the four arithmetic operators.
//!
//! A [`Polynomial`] owns its [`Term`]s; a [`Term`] owns its [`Variable`]s. Reduction
//! (`terms_reduced`) is computed on demand rather than kept as an invariant of construction, which
//! keeps `+`/`-`/`*` cheap term-list concatenations, mirroring how `libslide::math::poly::Poly`
//! keeps its coefficient vector and lets callers normalize when they need to.

use crate::error::ComputorError;
use crate::number::{is_integer, Complex};
use core::fmt;

/// A named variable raised to an integer-or-rational degree.
///
/// Lookup is case-insensitive (see [`Variable::key`]) but the original casing is preserved for
/// display.
#[derive(Clone, Debug)]
pub struct Variable {
    pub name: String,
    pub degree: f64,
}

impl Variable {
    pub fn new(name: impl Into<String>, degree: f64) -> Self {
        Variable {
            name: name.into(),
            degree,
        }
    }

    /// Case-insensitive grouping key.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.degree == 0.0 {
            write!(f, "1")
        } else if self.degree == 1.0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}^{}", self.name, crate::number::format_g(self.degree))
        }
    }
}

/// A coefficient paired with an unordered multiset of variables.
#[derive(Clone, Debug)]
pub struct Term {
    pub coeff: Complex,
    pub variables: Vec<Variable>,
}

impl Term {
    pub fn new(coeff: Complex, variables: Vec<Variable>) -> Self {
        Term { coeff, variables }
    }

    pub fn constant(coeff: Complex) -> Self {
        Term::new(coeff, Vec::new())
    }

    /// Fuses same-named variables by summing degrees and drops degree-0 variables.
    pub fn variables_reduced(&self) -> Vec<Variable> {
        let mut by_name: Vec<(String, Variable)> = Vec::new();
        for v in &self.variables {
            if let Some(existing) = by_name.iter_mut().find(|(k, _)| *k == v.key()) {
                existing.1.degree += v.degree;
            } else {
                by_name.push((v.key(), Variable::new(v.name.clone(), v.degree)));
            }
        }
        by_name.retain(|(_, v)| v.degree != 0.0);
        by_name.sort_by(|a, b| a.0.cmp(&b.0));
        by_name.into_iter().map(|(_, v)| v).collect()
    }

    /// Maximum variable degree, or `0` when the coefficient is `0`.
    pub fn degree(&self) -> f64 {
        if self.coeff == Complex::real(0.0) {
            return 0.0;
        }
        self.variables
            .iter()
            .map(|v| v.degree)
            .fold(0.0, f64::max)
    }

    /// `true` when any reduced variable has a non-integer or negative degree.
    pub fn has_unsupported_degree(&self) -> bool {
        self.variables_reduced()
            .iter()
            .any(|v| !is_integer(v.degree) || v.degree < 0.0)
    }

    /// Key used to group terms in reduction: the reduced variable list, compared structurally.
    fn reduction_key(&self) -> Vec<(String, String)> {
        self.variables_reduced()
            .iter()
            .map(|v| (v.key(), crate::number::format_g(v.degree)))
            .collect()
    }
}

impl core::ops::Mul for Term {
    type Output = Term;
    fn mul(self, rhs: Term) -> Term {
        let mut variables = self.variables;
        variables.extend(rhs.variables);
        Term::new(self.coeff * rhs.coeff, variables)
    }
}

impl Term {
    /// Term division negates the divisor's variable degrees before concatenation, which is what
    /// lets `x/x` collapse to `1` once the result is reduced.
    pub fn div(self, rhs: Term) -> Result<Term, ComputorError> {
        let mut variables = self.variables;
        variables.extend(
            rhs.variables
                .into_iter()
                .map(|v| Variable::new(v.name, -v.degree)),
        );
        Ok(Term::new((self.coeff / rhs.coeff)?, variables))
    }
}

/// A sum of [`Term`]s.
#[derive(Clone, Debug)]
pub struct Polynomial {
    pub terms: Vec<Term>,
}

impl Polynomial {
    pub fn new(terms: Vec<Term>) -> Self {
        Polynomial { terms }
    }

    pub fn from_number(n: Complex) -> Self {
        Polynomial::new(vec![Term::constant(n)])
    }

    pub fn from_variable(v: Variable) -> Self {
        Polynomial::new(vec![Term::new(Complex::real(1.0), vec![v])])
    }

    /// Drops zero-coefficient terms, fuses terms with identical reduced-variable keys, and sorts
    /// the result by that key (constant term first) for deterministic output order.
    pub fn terms_reduced(&self) -> Vec<Term> {
        let mut groups: Vec<(Vec<(String, String)>, Term)> = Vec::new();
        for term in self.terms.iter().filter(|t| t.coeff != Complex::real(0.0)) {
            let key = term.reduction_key();
            if let Some((_, acc)) = groups.iter_mut().find(|(k, _)| *k == key) {
                acc.coeff = acc.coeff + term.coeff;
            } else {
                groups.push((
                    key,
                    Term::new(term.coeff, term.variables_reduced()),
                ));
            }
        }
        groups.retain(|(_, t)| t.coeff != Complex::real(0.0));
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        groups.into_iter().map(|(_, t)| t).collect()
    }

    /// The reduced term whose single variable (if any) carries `degree`, or the zero term.
    pub fn get_term(&self, degree: f64) -> Term {
        self.terms_reduced()
            .into_iter()
            .find(|t| {
                if degree == 0.0 {
                    t.variables.is_empty() || t.variables[0].degree == 0.0
                } else {
                    t.variables.first().map(|v| v.degree) == Some(degree)
                }
            })
            .unwrap_or_else(|| Term::constant(Complex::real(0.0)))
    }

    /// Max reduced term degree, or `0` when there are no terms.
    pub fn degree(&self) -> f64 {
        self.terms_reduced()
            .iter()
            .map(|t| t.degree())
            .fold(0.0, f64::max)
    }

    /// Distinct variable names appearing with non-zero degree in reduced form.
    pub fn variables(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .terms_reduced()
            .iter()
            .flat_map(|t| t.variables.iter().map(|v| v.name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Names that occur anywhere (not just in reduced form) with a negative degree — these
    /// cannot be zero in a solution, since the original term divided by that variable.
    pub fn variables_non_zero(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .terms
            .iter()
            .flat_map(|t| {
                t.variables
                    .iter()
                    .filter(|v| v.degree < 0.0)
                    .map(|v| v.name.clone())
            })
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn add(self, rhs: Polynomial) -> Polynomial {
        let mut terms = self.terms;
        terms.extend(rhs.terms);
        Polynomial::new(terms)
    }

    pub fn sub(self, rhs: Polynomial) -> Polynomial {
        self.add(rhs.negate())
    }

    fn negate(self) -> Polynomial {
        Polynomial::new(
            self.terms
                .into_iter()
                .map(|t| Term::new(-t.coeff, t.variables))
                .collect(),
        )
    }

    pub fn mul(self, rhs: Polynomial) -> Polynomial {
        let mut terms = Vec::with_capacity(self.terms.len() * rhs.terms.len());
        for a in &self.terms {
            for b in &rhs.terms {
                terms.push(a.clone() * b.clone());
            }
        }
        Polynomial::new(terms)
    }

    /// Division by a number scales each coefficient; by a single-term polynomial, divides
    /// term-by-term; by a multi-term polynomial or the zero polynomial, fails.
    pub fn div(self, rhs: Polynomial) -> Result<Polynomial, ComputorError> {
        let rhs_reduced = rhs.terms_reduced();
        if rhs_reduced.is_empty() {
            return Err(ComputorError::DivisionByZero);
        }
        if rhs_reduced.len() > 1 {
            return Err(ComputorError::UnsupportedOperation);
        }
        let divisor = rhs_reduced.into_iter().next().unwrap();
        let terms = self
            .terms
            .into_iter()
            .map(|t| t.div(divisor.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polynomial::new(terms))
    }

    pub fn div_number(self, n: Complex) -> Result<Polynomial, ComputorError> {
        let terms = self
            .terms
            .into_iter()
            .map(|t| Ok(Term::new((t.coeff / n)?, t.variables)))
            .collect::<Result<Vec<_>, ComputorError>>()?;
        Ok(Polynomial::new(terms))
    }

    /// Integer power by repeated multiplication; non-integer powers are unsupported.
    ///
    /// Bounded by [`crate::number::MAX_POWER_EXPONENT`], same as [`Complex::powi`]: each
    /// multiplication is an un-reduced Cartesian product of term lists, so an uncapped exponent
    /// would build an exponential number of raw terms before reduction ever runs.
    pub fn powi(self, n: i64) -> Result<Polynomial, ComputorError> {
        if n < 0 {
            return Err(ComputorError::UnsupportedOperation);
        }
        if n.unsigned_abs() > crate::number::MAX_POWER_EXPONENT as u64 {
            return Err(crate::error::MathError::TooBigPower.into());
        }
        if n == 0 {
            return Ok(Polynomial::from_number(Complex::real(1.0)));
        }
        let mut result = self.clone();
        for _ in 1..n {
            result = result.mul(self.clone());
        }
        Ok(result)
    }
}

impl fmt::Display for Polynomial {
    /// Terms in reduced order separated by ` + `/` - `; leading term omits its `+`; coefficient
    /// `1` is omitted when a non-degree-0 variable is present; complex coefficients are
    /// parenthesised.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.terms_reduced();
        if terms.is_empty() {
            return write!(f, "0");
        }
        let mut chunks = Vec::with_capacity(terms.len());
        for (index, term) in terms.iter().enumerate() {
            let reduced_vars = term.variables_reduced();
            let has_vars = !reduced_vars.is_empty();
            let (is_neg, coeff_str) = if !term.coeff.is_real() {
                (false, Some(format!("({})", term.coeff)))
            } else {
                let is_neg = term.coeff.real < 0.0;
                let magnitude = term.coeff.real.abs();
                let coeff_str = if magnitude == 1.0 && has_vars {
                    None
                } else {
                    Some(crate::number::format_g(magnitude))
                };
                (is_neg, coeff_str)
            };

            let mut parts: Vec<String> = Vec::new();
            if let Some(c) = coeff_str {
                parts.push(c);
            }
            parts.extend(reduced_vars.iter().map(|v| v.to_string()));
            let body = parts.join(" * ");

            if index == 0 {
                chunks.push(if is_neg {
                    format!("-{}", body)
                } else {
                    body
                });
            } else {
                let sign = if is_neg { "-" } else { "+" };
                chunks.push(format!("{} {}", sign, body));
            }
        }
        write!(f, "{}", chunks.join(" "))
    }
}
