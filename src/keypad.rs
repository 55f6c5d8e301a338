//! Button grids for the two screen orientations.
//!
//! Pure data: which labels sit where, how wide they are and how they are
//! styled. Rendering is up to the host.

use crate::calculator::Token;
use serde::Deserialize;

/// Screen orientation, which picks the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Basic four-column keypad.
    #[default]
    Portrait,
    /// Scientific ten-column keypad.
    Landscape,
}

impl Orientation {
    /// Landscape when the screen is wider than it is tall.
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// The button grid for this orientation.
    pub fn layout(self) -> &'static [&'static [Option<Key>]] {
        match self {
            Self::Portrait => PORTRAIT,
            Self::Landscape => LANDSCAPE,
        }
    }
}

/// One button in a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    pub label: &'static str,
    /// Number of columns the button covers.
    pub span: u8,
}

impl Key {
    /// The token this button sends.
    pub fn token(&self) -> Token {
        Token::from_label(self.label)
    }

    /// How this button is styled.
    pub fn kind(&self) -> ButtonKind {
        ButtonKind::classify(self.label)
    }
}

const fn key(label: &'static str) -> Option<Key> {
    Some(Key { label, span: 1 })
}

const fn wide(label: &'static str, span: u8) -> Option<Key> {
    Some(Key { label, span })
}

const PORTRAIT: &[&[Option<Key>]] = &[
    &[key("AC"), key("+/−"), key("%"), key("÷")],
    &[key("7"), key("8"), key("9"), key("×")],
    &[key("4"), key("5"), key("6"), key("−")],
    &[key("1"), key("2"), key("3"), key("+")],
    &[wide("0", 2), key(","), key("=")],
];

// Memory, `2nd`, `10ˣ`, `x¹` and `Rad` have no fragment of their own and
// reach the buffer as typed.
const LANDSCAPE: &[&[Option<Key>]] = &[
    &[
        key("("),
        key(")"),
        key("mc"),
        key("m+"),
        key("m-"),
        key("mr"),
        key("AC"),
        key("+/−"),
        key("%"),
        key("÷"),
    ],
    &[
        key("2nd"),
        key("x²"),
        key("x³"),
        key("xʸ"),
        key("eˣ"),
        key("10ˣ"),
        key("7"),
        key("8"),
        key("9"),
        key("×"),
    ],
    &[
        key("x¹"),
        key("√x"),
        key("∛x"),
        key("ʸ√x"),
        key("ln"),
        key("log₁₀"),
        key("4"),
        key("5"),
        key("6"),
        key("−"),
    ],
    &[
        key("x!"),
        key("sin"),
        key("cos"),
        key("tan"),
        key("e"),
        key("EE"),
        key("1"),
        key("2"),
        key("3"),
        key("+"),
    ],
    &[
        key("Rad"),
        key("sinh"),
        key("cosh"),
        key("tanh"),
        key("π"),
        key("Rand"),
        key("0"),
        key(","),
        key("="),
        None,
    ],
];

/// Visual category of a button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    /// `÷ × − + =`
    Operator,
    /// `AC +/− %`
    Special,
    /// Scientific functions and constants.
    Function,
    /// Digits and the remaining punctuation.
    Default,
}

impl ButtonKind {
    /// Classify a button label.
    pub fn classify(label: &str) -> Self {
        match label {
            "÷" | "×" | "−" | "+" | "=" => Self::Operator,
            "AC" | "+/−" | "%" => Self::Special,
            "(" | ")" | "Rand" | "EE" | "," => Self::Default,
            _ if label.parse::<f64>().is_ok() => Self::Default,
            _ => Self::Function,
        }
    }
}
