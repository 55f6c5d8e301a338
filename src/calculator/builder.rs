//! The expression buffer and the rules applied on each button press.

use super::evaluation::{
    CalcResult, EvaluationBackend, FastevalBackend, NumberFormat, evaluate_expression,
};
use super::token::{Token, is_binary_operator};
use crate::config::Config;
use crate::display::Readout;

/// Result shown before anything has been evaluated.
pub const INITIAL_RESULT: &str = "0";

/// One calculator session: the expression being typed and the last result.
///
/// Presses must be serialized; wrap the calculator in a mutex if button
/// events can arrive from more than one thread.
pub struct Calculator<B = FastevalBackend> {
    expression: String,
    result: String,
    last_evaluation: Option<CalcResult>,
    backend: B,
    format: NumberFormat,
}

impl Calculator<FastevalBackend> {
    /// Create a calculator backed by fasteval with default settings.
    pub fn new() -> Self {
        Self::with_backend(FastevalBackend::default(), NumberFormat::default())
    }

    /// Create a calculator using the evaluation and display settings from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_backend(
            FastevalBackend::new(config.evaluation.random_seed),
            config.display.number_format(),
        )
    }
}

impl Default for Calculator<FastevalBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: EvaluationBackend> Calculator<B> {
    /// Create a calculator that evaluates with `backend`.
    pub fn with_backend(backend: B, format: NumberFormat) -> Self {
        Self {
            expression: String::new(),
            result: INITIAL_RESULT.to_string(),
            last_evaluation: None,
            backend,
            format,
        }
    }

    /// The expression buffer, in evaluator syntax.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The result string: a number or `"Error"`.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// The full outcome of the most recent evaluation since the last clear.
    pub fn last_evaluation(&self) -> Option<&CalcResult> {
        self.last_evaluation.as_ref()
    }

    /// The current display pair.
    pub fn readout(&self) -> Readout {
        Readout::new(&self.expression, &self.result)
    }

    /// Parse a button label and press it.
    pub fn press_label(&mut self, label: &str) -> Readout {
        self.press(&Token::from_label(label))
    }

    /// Apply one button press and return the updated display pair.
    ///
    /// `AC` empties the buffer and resets the result. `=` evaluates the
    /// buffer without changing it. Anything else appends its fragment, except
    /// that a binary operator typed right after another replaces it.
    pub fn press(&mut self, token: &Token) -> Readout {
        match token {
            Token::Clear => self.clear(),
            Token::Evaluate => self.evaluate(),
            _ => self.append(&token.fragment()),
        }

        tracing::debug!(
            token = %token.label(),
            expression = %self.expression,
            result = %self.result,
            "pressed"
        );
        self.readout()
    }

    fn clear(&mut self) {
        self.expression.clear();
        self.result = INITIAL_RESULT.to_string();
        self.last_evaluation = None;
    }

    fn evaluate(&mut self) {
        let outcome = evaluate_expression(&mut self.backend, &self.expression);
        self.result = outcome.display(self.format);
        self.last_evaluation = Some(outcome);
    }

    fn append(&mut self, fragment: &str) {
        let collides = is_binary_operator(fragment)
            && self
                .expression
                .chars()
                .next_back()
                .is_some_and(|last| is_binary_operator(last.encode_utf8(&mut [0; 4])));

        if collides {
            self.expression.pop();
        }
        self.expression.push_str(fragment);
    }
}
