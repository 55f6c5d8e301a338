//! Expression engine for a button-grid scientific calculator.
//!
//! A host feeds button labels to [`Calculator::press_label`] and shows the
//! returned [`Readout`]. Evaluation is delegated to fasteval.

pub mod calculator;
pub mod config;
pub mod display;
pub mod keypad;

pub use calculator::{CalcResult, Calculator, EvalError, Token};
pub use config::Config;
pub use display::Readout;
pub use keypad::{ButtonKind, Orientation};
