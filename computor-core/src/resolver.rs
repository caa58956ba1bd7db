//! Degree classification, discriminant, and closed-form roots for degree ≤ 2.

use crate::error::ComputorError;
use crate::number::Complex;
use crate::polynomial::Polynomial;

/// The outcome of resolving a reduced polynomial.
pub enum Solution {
    /// Degree 0, constant term 0: every real number solves the equation.
    AnyRealNumber,
    /// Degree 0, non-zero constant term: no real number solves the equation.
    NoSolution,
    /// Degree 1: the single root `-c/b`.
    Linear(Complex),
    /// Degree 2: both roots of `ax^2 + bx + c = 0`, plus the discriminant that produced them.
    Quadratic {
        discriminant: Complex,
        roots: (Complex, Complex),
    },
}

/// Resolves a reduced polynomial to its [`Solution`], or fails if one of the solving
/// preconditions (single variable, natural degrees, degree ≤ 2) is not met.
pub fn resolve(poly: &Polynomial) -> Result<Solution, ComputorError> {
    let variables = poly.variables();
    if variables.len() > 1 {
        return Err(ComputorError::Resolve(
            "Cannot solve polynomials with multiple variables".to_string(),
        ));
    }

    if poly
        .terms_reduced()
        .iter()
        .any(|t| t.has_unsupported_degree())
    {
        return Err(ComputorError::Resolve(
            "Cannot solve polynomials with non-natural degrees".to_string(),
        ));
    }

    let degree = poly.degree();
    if degree > 2.0 {
        return Err(ComputorError::Resolve(
            "The polynomial degree is strictly greater than 2, I can't solve.".to_string(),
        ));
    }

    let a = poly.get_term(2.0).coeff;
    let b = poly.get_term(1.0).coeff;
    let c = poly.get_term(0.0).coeff;

    if degree == 0.0 {
        return Ok(if c == Complex::real(0.0) {
            Solution::AnyRealNumber
        } else {
            Solution::NoSolution
        });
    }

    if degree == 1.0 {
        let root = ((-c) / b)?.rounded();
        return Ok(Solution::Linear(root));
    }

    // degree == 2.0
    let discriminant = (b.powi(2)? - Complex::real(4.0) * a * c).rounded();
    let sqrt_d = discriminant.pow(Complex::real(0.5))?;
    let two_a = Complex::real(2.0) * a;
    let root1 = (((-b) + sqrt_d) / two_a)?.rounded();
    let root2 = (((-b) - sqrt_d) / two_a)?.rounded();
    Ok(Solution::Quadratic {
        discriminant,
        roots: (root1, root2),
    })
}

/// Formats the three-line `solution_text` block: reduced form, degree, and the solving prose.
pub fn solution_text(poly: &Polynomial) -> String {
    let reduced = poly.to_string();
    let degree = poly.degree();
    let degree_display = if degree.fract() == 0.0 {
        format!("{}", degree as i64)
    } else {
        crate::number::format_g(degree)
    };

    let body = match resolve(poly) {
        Ok(Solution::AnyRealNumber) => {
            let non_zero = poly.variables_non_zero();
            if non_zero.is_empty() {
                "All real numbers are solutions".to_string()
            } else {
                format!(
                    "All real numbers are solutions, except {}",
                    non_zero
                        .iter()
                        .map(|name| format!("{}=0", name))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
        Ok(Solution::NoSolution) => "This equation has no solutions in our world.".to_string(),
        Ok(Solution::Linear(root)) => format!("The solution is:\n{}", root),
        Ok(Solution::Quadratic {
            discriminant,
            roots: (x1, x2),
        }) => {
            if discriminant.real > 0.0 {
                format!(
                    "Discriminant is strictly positive, the two solutions are:\n{}\n{}",
                    x1, x2
                )
            } else if discriminant.real == 0.0 {
                format!("Discriminant is zero, the solution is:\n{}", x1)
            } else {
                format!(
                    "Discriminant is strictly negative, the two solutions are:\n{}\n{}",
                    x1, x2
                )
            }
        }
        Err(e) => e.to_string(),
    };

    format!(
        "Reduced form: {} = 0\nPolynomial degree: {}\n{}",
        reduced, degree_display, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::{Term, Variable};

    fn x(degree: f64) -> Variable {
        Variable::new("x", degree)
    }

    #[test]
    fn degree_zero_all_numbers() {
        let p = Polynomial::new(vec![Term::constant(Complex::real(0.0))]);
        assert!(matches!(resolve(&p).unwrap(), Solution::AnyRealNumber));
    }

    #[test]
    fn degree_zero_unsat() {
        let p = Polynomial::new(vec![Term::constant(Complex::real(-4.0))]);
        assert!(matches!(resolve(&p).unwrap(), Solution::NoSolution));
    }

    #[test]
    fn degree_one_root() {
        // 1 + 4x = 0  =>  x = -0.25
        let p = Polynomial::new(vec![
            Term::constant(Complex::real(1.0)),
            Term::new(Complex::real(4.0), vec![x(1.0)]),
        ]);
        match resolve(&p).unwrap() {
            Solution::Linear(root) => assert!((root.real - (-0.25)).abs() < 1e-9),
            _ => panic!("expected linear solution"),
        }
    }

    #[test]
    fn degree_two_zero_discriminant() {
        // 5 + 10x + 5x^2 = 0 => discriminant 0, root -1
        let p = Polynomial::new(vec![
            Term::constant(Complex::real(5.0)),
            Term::new(Complex::real(10.0), vec![x(1.0)]),
            Term::new(Complex::real(5.0), vec![x(2.0)]),
        ]);
        match resolve(&p).unwrap() {
            Solution::Quadratic {
                discriminant,
                roots,
            } => {
                assert_eq!(discriminant, Complex::real(0.0));
                assert!((roots.0.real - (-1.0)).abs() < 1e-6);
            }
            _ => panic!("expected quadratic solution"),
        }
    }

    #[test]
    fn degree_two_negative_discriminant_gives_conjugates() {
        // 4 + 3x + 3x^2 = 0
        let p = Polynomial::new(vec![
            Term::constant(Complex::real(4.0)),
            Term::new(Complex::real(3.0), vec![x(1.0)]),
            Term::new(Complex::real(3.0), vec![x(2.0)]),
        ]);
        match resolve(&p).unwrap() {
            Solution::Quadratic {
                discriminant,
                roots,
            } => {
                assert!(discriminant.real < 0.0);
                assert!((roots.0.real - (-0.5)).abs() < 1e-6);
                assert!(roots.0.imag > 0.0);
                assert!(roots.1.imag < 0.0);
            }
            _ => panic!("expected quadratic solution"),
        }
    }

    #[test]
    fn multiple_variables_rejected() {
        let p = Polynomial::new(vec![
            Term::new(Complex::real(1.0), vec![x(1.0)]),
            Term::new(Complex::real(1.0), vec![Variable::new("y", 1.0)]),
        ]);
        assert_eq!(
            resolve(&p).unwrap_err(),
            ComputorError::Resolve("Cannot solve polynomials with multiple variables".to_string())
        );
    }

    #[test]
    fn degree_above_two_rejected() {
        let p = Polynomial::new(vec![Term::new(Complex::real(1.0), vec![x(3.0)])]);
        assert_eq!(
            resolve(&p).unwrap_err(),
            ComputorError::Resolve(
                "The polynomial degree is strictly greater than 2, I can't solve.".to_string()
            )
        );
    }

    #[test]
    fn non_natural_degree_rejected() {
        let p = Polynomial::new(vec![Term::new(Complex::real(1.0), vec![x(-1.0)])]);
        assert_eq!(
            resolve(&p).unwrap_err(),
            ComputorError::Resolve("Cannot solve polynomials with non-natural degrees".to_string())
        );
    }
}
