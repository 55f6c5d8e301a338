//! Calculator core: button tokens, the expression buffer and evaluation.
//!
//! This module provides functionality to:
//! - Translate button labels into evaluator syntax
//! - Assemble the expression buffer press by press
//! - Evaluate expressions using fasteval and classify the outcome

mod builder;
mod evaluation;
mod rewrite;
mod token;

pub use builder::{Calculator, INITIAL_RESULT};
pub use evaluation::{
    CalcResult, ERROR_TEXT, EvalError, EvaluationBackend, FastevalBackend, NumberFormat,
    evaluate_expression, format_canonical,
};
pub use rewrite::{insert_implicit_products, normalize, rewrite_negations};
pub use token::{BINARY_OPERATORS, Token, is_binary_operator};
