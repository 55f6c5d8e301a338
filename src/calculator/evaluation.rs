//! Expression evaluation using fasteval.
//!
//! Wraps fasteval behind [`EvaluationBackend`], classifies the outcome of an
//! evaluation and formats results for display.

use super::rewrite::normalize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{E, PI};
use thiserror::Error;

/// The result string shown for every failed evaluation.
pub const ERROR_TEXT: &str = "Error";

/// Why an evaluation produced no number.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    /// Nothing to evaluate.
    #[error("expression is empty")]
    Empty,
    /// The backend could not parse or evaluate the expression.
    #[error("backend rejected expression: {0}")]
    Backend(String),
    /// Evaluation succeeded but produced infinity or NaN.
    #[error("result is not finite: {0}")]
    NonFinite(f64),
}

/// Something that turns a normalized expression into a number.
pub trait EvaluationBackend {
    /// Evaluate `expression`, which is already in evaluator syntax.
    fn evaluate(&mut self, expression: &str) -> Result<f64, EvalError>;
}

/// The default backend: fasteval plus the functions it does not ship.
pub struct FastevalBackend {
    rng: StdRng,
}

impl FastevalBackend {
    /// Create a backend. A seed makes `random()` reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Default for FastevalBackend {
    fn default() -> Self {
        Self::new(None)
    }
}

impl EvaluationBackend for FastevalBackend {
    fn evaluate(&mut self, expression: &str) -> Result<f64, EvalError> {
        let rng = &mut self.rng;

        // Trig and hyperbolic functions are fasteval builtins.
        let mut namespace = |name: &str, args: Vec<f64>| -> Option<f64> {
            match (name, args.as_slice()) {
                ("pi", []) => Some(PI),
                ("e", []) => Some(E),
                ("random", []) => Some(rng.gen_range(0.0..1.0)),
                ("sqrt", [x]) => Some(x.sqrt()),
                ("cbrt", [x]) => Some(x.cbrt()),
                ("nthRoot", [x]) => Some(x.sqrt()),
                ("nthRoot", [n, x]) => nth_root(*n, *x),
                ("exp", [x]) => Some(x.exp()),
                ("ln", [x]) => Some(x.ln()),
                ("log10", [x]) => Some(x.log10()),
                ("factorial", [n]) => factorial(*n),
                _ => None,
            }
        };

        fasteval::ez_eval(expression, &mut namespace)
            .map_err(|e| EvalError::Backend(format!("{:?}", e)))
    }
}

/// The `index`-th root of `radicand`.
///
/// Odd integer roots of negative numbers are real and negative.
fn nth_root(index: f64, radicand: f64) -> Option<f64> {
    if index == 0.0 {
        return None;
    }

    let odd_integer = index.fract() == 0.0 && index % 2.0 != 0.0;
    if radicand < 0.0 && odd_integer {
        Some(-(-radicand).powf(1.0 / index))
    } else {
        Some(radicand.powf(1.0 / index))
    }
}

/// Factorial of a non-negative integer; undefined for anything else.
fn factorial(n: f64) -> Option<f64> {
    if n < 0.0 || n.fract() != 0.0 {
        return None;
    }
    if n > 170.0 {
        return Some(f64::INFINITY);
    }

    Some((1..=n as u32).map(f64::from).product())
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The expression as it was in the buffer.
        expression: String,
        /// The numeric value.
        value: f64,
    },
    /// Evaluation failed; the display shows [`ERROR_TEXT`].
    Error {
        /// The expression as it was in the buffer.
        expression: String,
        /// What went wrong.
        error: EvalError,
    },
}

impl CalcResult {
    /// Whether the buffer evaluated to a finite number.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The value, if evaluation succeeded.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }

    /// The failure cause, if evaluation failed.
    pub fn error(&self) -> Option<&EvalError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }

    /// Get the display string: the formatted number or [`ERROR_TEXT`].
    pub fn display(&self, format: NumberFormat) -> String {
        match self {
            Self::Success { value, .. } => format.format(*value),
            Self::Error { .. } => ERROR_TEXT.to_string(),
        }
    }
}

/// Evaluate the raw buffer contents.
///
/// Rewrites negation wrappers and implied products, hands the result to
/// `backend` and classifies the outcome. Never panics on bad input; every
/// failure ends up in [`CalcResult::Error`].
pub fn evaluate_expression(backend: &mut impl EvaluationBackend, input: &str) -> CalcResult {
    let expression = input.to_string();

    if input.trim().is_empty() {
        return CalcResult::Error {
            expression,
            error: EvalError::Empty,
        };
    }

    let normalized = normalize(input);
    let outcome = backend.evaluate(&normalized).and_then(|value| {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite(value))
        }
    });

    match outcome {
        Ok(value) => {
            tracing::debug!(%normalized, value, "evaluated expression");
            CalcResult::Success { expression, value }
        }
        Err(error) => {
            tracing::debug!(%normalized, %error, "evaluation failed");
            CalcResult::Error { expression, error }
        }
    }
}

/// How results are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumberFormat {
    /// Insert `,` between groups of three integer digits.
    pub group_thousands: bool,
}

impl NumberFormat {
    /// Format a finite value for display.
    pub fn format(&self, value: f64) -> String {
        let canonical = format_canonical(value);
        if self.group_thousands && !canonical.contains('e') {
            format_with_separators(&canonical)
        } else {
            canonical
        }
    }
}

/// Shortest decimal string that reads back as `value`.
///
/// Integral values carry no fractional part, `-0` prints as `0`, and very
/// large or very small magnitudes switch to exponent form (`1e+21`, `1.5e-7`).
pub fn format_canonical(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        }
    } else {
        format!("{}", value)
    }
}

/// Add thousand separators to the integer part of a plain decimal string.
fn format_with_separators(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, dec_part) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let int_grouped: String = grouped.chars().rev().collect();
    format!("{}{}{}", sign, int_grouped, dec_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> CalcResult {
        evaluate_expression(&mut FastevalBackend::new(Some(7)), input)
    }

    #[test]
    fn test_basic_evaluation() {
        let result = eval("12+3");
        assert!(result.is_success());
        assert_eq!(result.value(), Some(15.0));
        assert_eq!(result.display(NumberFormat::default()), "15");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2+3*4").value(), Some(14.0));
        assert_eq!(eval("(2+3)*4").value(), Some(20.0));
        assert_eq!(eval("2^10").value(), Some(1024.0));
    }

    #[test]
    fn test_division_by_zero() {
        let result = eval("5/0");
        assert!(!result.is_success());
        assert!(matches!(result.error(), Some(EvalError::NonFinite(v)) if v.is_infinite()));
        assert_eq!(result.display(NumberFormat::default()), ERROR_TEXT);
    }

    #[test]
    fn test_domain_errors_are_non_finite() {
        assert!(matches!(eval("sqrt(-1)").error(), Some(EvalError::NonFinite(_))));
        assert!(matches!(eval("ln(0)").error(), Some(EvalError::NonFinite(_))));
        assert!(matches!(eval("0/0").error(), Some(EvalError::NonFinite(v)) if v.is_nan()));
    }

    #[test]
    fn test_malformed_expressions() {
        for input in ["3+", "sqrt(4", "(1+2))", "foo(1)", "mc"] {
            let result = eval(input);
            assert!(
                matches!(result.error(), Some(EvalError::Backend(_))),
                "{input}: {result:?}"
            );
        }
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(eval("").error(), Some(&EvalError::Empty));
        assert_eq!(eval("   ").error(), Some(&EvalError::Empty));
    }

    #[test]
    fn test_constants() {
        assert_eq!(eval("pi").display(NumberFormat::default()), "3.141592653589793");
        assert_eq!(eval("e").display(NumberFormat::default()), "2.718281828459045");
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("sqrt(16)").value(), Some(4.0));
        assert_eq!(eval("cbrt(27)").value(), Some(3.0));
        assert_eq!(eval("exp(0)").value(), Some(1.0));
        assert_eq!(eval("ln(1)").value(), Some(0.0));
        assert_eq!(eval("log10(1000)").value(), Some(3.0));
        assert_eq!(eval("factorial(5)").value(), Some(120.0));
        assert_eq!(eval("factorial(0)").value(), Some(1.0));
        assert_eq!(eval("sin(0)").value(), Some(0.0));
        assert_eq!(eval("cos(0)").value(), Some(1.0));
        assert_eq!(eval("tanh(0)").value(), Some(0.0));
    }

    #[test]
    fn test_nth_root() {
        assert_eq!(eval("nthRoot(2, 9)").value(), Some(3.0));
        let cube = eval("nthRoot(3, -8)").value().unwrap();
        assert!((cube + 2.0).abs() < 1e-12);
        assert_eq!(eval("nthRoot(16)").value(), Some(4.0));
        assert!(!eval("nthRoot(0, 8)").is_success());
        assert!(!eval("nthRoot(2, -4)").is_success());
    }

    #[test]
    fn test_factorial_domain() {
        assert!(!eval("factorial(2.5)").is_success());
        assert!(!eval("factorial(0-3)").is_success());
        assert!(matches!(eval("factorial(171)").error(), Some(EvalError::NonFinite(_))));
    }

    #[test]
    fn test_random_in_unit_interval() {
        let mut backend = FastevalBackend::new(Some(1));
        for _ in 0..100 {
            let value = evaluate_expression(&mut backend, "random()").value().unwrap();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = evaluate_expression(&mut FastevalBackend::new(Some(99)), "random()");
        let b = evaluate_expression(&mut FastevalBackend::new(Some(99)), "random()");
        assert_eq!(a, b);
    }

    #[test]
    fn test_negation_is_rewritten() {
        assert_eq!(eval("negate(5").value(), Some(-5.0));
        assert_eq!(eval("negate(5+3").value(), Some(-2.0));
        assert_eq!(eval("negate(5+3)").value(), Some(-8.0));
    }

    #[test]
    fn test_implied_products() {
        assert_eq!(eval("2pi").display(NumberFormat::default()), "6.283185307179586");
        assert_eq!(eval("(2)(3)").value(), Some(6.0));
        assert_eq!(eval("2negate(5").value(), Some(-10.0));
    }

    #[test]
    fn test_percent() {
        assert_eq!(eval("50/100").value(), Some(0.5));
        assert!(!eval("/100").is_success());
    }

    #[test]
    fn test_canonical_format() {
        assert_eq!(format_canonical(15.0), "15");
        assert_eq!(format_canonical(-5.0), "-5");
        assert_eq!(format_canonical(-0.0), "0");
        assert_eq!(format_canonical(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_canonical(1e21), "1e+21");
        assert_eq!(format_canonical(1.5e-7), "1.5e-7");
        assert_eq!(format_canonical(123456.5), "123456.5");
    }

    #[test]
    fn test_thousand_separators() {
        let grouped = NumberFormat {
            group_thousands: true,
        };
        assert_eq!(grouped.format(1_000_000.0), "1,000,000");
        assert_eq!(grouped.format(-1234.5), "-1,234.5");
        assert_eq!(grouped.format(999.0), "999");
        assert_eq!(grouped.format(1e21), "1e+21");
    }
}
