//! The pair of strings handed to the screen after every press.

use crate::calculator::ERROR_TEXT;
use serde::Serialize;

/// What the screen shows: the expression line and the result line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// The expression buffer, in evaluator syntax.
    pub expression: String,
    /// The last result: a formatted number or `"Error"`.
    pub result: String,
    /// Whether the result line is the error marker.
    pub is_error: bool,
}

impl Readout {
    /// Create a readout from the expression and result strings.
    pub fn new(expression: &str, result: &str) -> Self {
        Self {
            expression: expression.to_string(),
            result: result.to_string(),
            is_error: result == ERROR_TEXT,
        }
    }

    /// The `(expression, result)` pair.
    pub fn pair(&self) -> (&str, &str) {
        (&self.expression, &self.result)
    }
}
