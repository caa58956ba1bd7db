//! End-to-end scenarios exercising the full scan → parse → evaluate → resolve pipeline, mirroring
//! the nine scenarios enumerated for the REPL's output.

use computor_core::value::Value;
use computor_core::{parse, resolver};

fn run(line: &str) -> String {
    match parse(line) {
        Ok(Value::Polynomial(poly)) => resolver::solution_text(&poly),
        Ok(value) => value.to_string(),
        Err(err) => err.to_string(),
    }
}

#[test]
fn reduces_and_solves_a_positive_discriminant_quadratic() {
    let out = run("5 * X^0 + 4 * X^1 - 9.3 * X^2 = 1 * X^0");
    assert!(out.contains("Reduced form: 4 + 4 * X - 9.3 * X^2 = 0"));
    assert!(out.contains("Polynomial degree: 2"));
    assert!(out.contains("Discriminant is strictly positive"));
    assert!(out.contains("0.90523"));
    assert!(out.contains("-0.47513"));
}

#[test]
fn negative_discriminant_gives_complex_conjugate_roots() {
    let out = run("5 * X^0 + 3 * X^1 + 3 * X^2 = 1 * X^0 + 0 * X^1");
    assert!(out.contains("Polynomial degree: 2"));
    assert!(out.contains("Discriminant is strictly negative"));
    assert!(out.contains("-0.5 + 1.04083i"));
    assert!(out.contains("-0.5 - 1.04083i"));
}

#[test]
fn zero_discriminant_gives_one_repeated_root() {
    let out = run("6 * X^0 + 11 * X^1 + 5 * X^2 = 1 * X^0 + 1 * X^1");
    assert!(out.contains("Discriminant is zero"));
    assert!(out.contains("-1"));
}

#[test]
fn degree_above_two_is_reported_but_still_reduced() {
    let out = run("8 * X^0 - 6 * X^1 + 0 * X^2 - 5.6 * X^3 = 3 * X^0");
    assert!(out.contains("Polynomial degree: 3"));
    assert!(out.contains("degree is strictly greater than 2"));
}

#[test]
fn identical_sides_are_solved_by_every_real_number() {
    let out = run("5 * X^0 = 5 * X^0");
    assert!(out.contains("Reduced form: 0 = 0"));
    assert!(out.contains("All real numbers are solutions"));
}

#[test]
fn self_division_excludes_the_zero_of_the_cancelled_variable() {
    let out = run("x/x=1");
    assert!(out.contains("Reduced form: 0 = 0"));
    assert!(out.contains("All real numbers are solutions, except x=0"));
}

#[test]
fn expanding_squares_collapses_the_linear_terms() {
    let out = run("(x + 5)^2 + (x - 5)^2 = 0");
    assert!(out.contains("Reduced form: 50 + 2 * x^2 = 0"));
    assert!(out.contains("5i"));
    assert!(out.contains("-5i"));
}

#[test]
fn a_negative_variable_power_is_an_unsolvable_degree() {
    let out = run("x ^ -1 = 25 + x ^ 2");
    assert!(out.contains("Cannot solve polynomials with non-natural degrees"));
}

#[test]
fn garbage_input_is_a_syntax_error_not_a_crash() {
    let out = run("45 gbd gb");
    assert!(out.contains("error in your syntax"));
}

#[test]
fn one_shot_numeric_expression_needs_no_resolver() {
    assert_eq!(run("1 + 2 * 3"), "7");
}
