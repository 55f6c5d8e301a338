//! Button tokens and their expression fragments.
//!
//! Every button on the keypad parses into a [`Token`]. The token knows the
//! fragment of evaluator syntax it contributes to the expression buffer;
//! the buffer never holds button glyphs.

use std::borrow::Cow;

/// Binary operator symbols as they appear in the expression buffer.
pub const BINARY_OPERATORS: [char; 5] = ['/', '*', '-', '+', '^'];

/// Fragment opening the negation wrapper.
pub const NEGATE_OPEN: &str = "negate(";

/// One button press.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// A decimal digit, 0 through 9.
    Digit(u8),
    Decimal,
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `xʸ`
    Power,
    /// `x²`
    Square,
    /// `x³`
    Cube,
    /// `eˣ`
    Exp,
    Sqrt,
    Cbrt,
    /// `ʸ√x`
    NthRoot,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Factorial,
    /// `+/−`, wraps whatever follows.
    Negate,
    Percent,
    Pi,
    /// The `e` button.
    Euler,
    /// The `EE` button. Contributes the same fragment as [`Token::Euler`].
    Exponent,
    Random,
    OpenParen,
    CloseParen,
    /// `AC`
    Clear,
    /// `=`
    Evaluate,
    /// Any label the keypad knows nothing about; passes through verbatim.
    Other(String),
}

impl Token {
    /// Parse a button label.
    ///
    /// Accepts the keypad glyphs plus plain ASCII spellings of the operators.
    /// Never fails: unknown labels become [`Token::Other`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "÷" | "/" => Self::Divide,
            "×" | "*" => Self::Multiply,
            "−" | "-" => Self::Subtract,
            "+" => Self::Add,
            "," | "." => Self::Decimal,
            "π" | "pi" => Self::Pi,
            "eˣ" => Self::Exp,
            "x²" => Self::Square,
            "x³" => Self::Cube,
            "xʸ" | "^" => Self::Power,
            "√x" => Self::Sqrt,
            "∛x" => Self::Cbrt,
            "ʸ√x" => Self::NthRoot,
            "ln" => Self::Ln,
            "log₁₀" => Self::Log10,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "x!" => Self::Factorial,
            "+/−" | "+/-" => Self::Negate,
            "%" => Self::Percent,
            "e" => Self::Euler,
            "EE" => Self::Exponent,
            "Rand" => Self::Random,
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "AC" | "C" => Self::Clear,
            "=" => Self::Evaluate,
            _ => match label.as_bytes() {
                [d @ b'0'..=b'9'] => Self::Digit(d - b'0'),
                _ => Self::Other(label.to_string()),
            },
        }
    }

    /// The evaluator-syntax fragment this token appends to the buffer.
    ///
    /// Tokens without a mapping (digits, parentheses, the control tokens and
    /// unknown labels) contribute their label unchanged.
    pub fn fragment(&self) -> Cow<'_, str> {
        let fragment = match self {
            Self::Divide => "/",
            Self::Multiply => "*",
            Self::Subtract => "-",
            Self::Add => "+",
            Self::Decimal => ".",
            Self::Pi => "pi",
            Self::Exp => "exp(",
            Self::Square => "^2",
            Self::Cube => "^3",
            Self::Power => "^",
            Self::Sqrt => "sqrt(",
            Self::Cbrt => "cbrt(",
            Self::NthRoot => "nthRoot(",
            Self::Ln => "ln(",
            Self::Log10 => "log10(",
            Self::Sin => "sin(",
            Self::Cos => "cos(",
            Self::Tan => "tan(",
            Self::Sinh => "sinh(",
            Self::Cosh => "cosh(",
            Self::Tanh => "tanh(",
            Self::Factorial => "factorial(",
            Self::Negate => NEGATE_OPEN,
            Self::Percent => "/100",
            Self::Euler | Self::Exponent => "e",
            Self::Random => "random()",
            Self::Digit(_)
            | Self::OpenParen
            | Self::CloseParen
            | Self::Clear
            | Self::Evaluate
            | Self::Other(_) => return self.label(),
        };
        Cow::Borrowed(fragment)
    }

    /// The glyph shown on the button.
    pub fn label(&self) -> Cow<'_, str> {
        let label = match self {
            Self::Digit(d) => return Cow::Owned(d.to_string()),
            Self::Other(label) => return Cow::Borrowed(label.as_str()),
            Self::Decimal => ",",
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "xʸ",
            Self::Square => "x²",
            Self::Cube => "x³",
            Self::Exp => "eˣ",
            Self::Sqrt => "√x",
            Self::Cbrt => "∛x",
            Self::NthRoot => "ʸ√x",
            Self::Ln => "ln",
            Self::Log10 => "log₁₀",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Factorial => "x!",
            Self::Negate => "+/−",
            Self::Percent => "%",
            Self::Pi => "π",
            Self::Euler => "e",
            Self::Exponent => "EE",
            Self::Random => "Rand",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Clear => "AC",
            Self::Evaluate => "=",
        };
        Cow::Borrowed(label)
    }

    /// Check if this token is one of the binary operators.
    pub fn is_binary_operator(&self) -> bool {
        is_binary_operator(&self.fragment())
    }
}

impl From<&str> for Token {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

/// Check if a fragment is exactly one binary operator symbol.
pub fn is_binary_operator(fragment: &str) -> bool {
    let mut chars = fragment.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if BINARY_OPERATORS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_glyphs() {
        assert_eq!(Token::from_label("÷").fragment(), "/");
        assert_eq!(Token::from_label("×").fragment(), "*");
        assert_eq!(Token::from_label("−").fragment(), "-");
        assert_eq!(Token::from_label("+").fragment(), "+");
        assert_eq!(Token::from_label("xʸ").fragment(), "^");
        assert_eq!(Token::from_label(",").fragment(), ".");
    }

    #[test]
    fn test_function_openers() {
        for (label, fragment) in [
            ("eˣ", "exp("),
            ("√x", "sqrt("),
            ("∛x", "cbrt("),
            ("ʸ√x", "nthRoot("),
            ("ln", "ln("),
            ("log₁₀", "log10("),
            ("sin", "sin("),
            ("cosh", "cosh("),
            ("x!", "factorial("),
            ("+/−", "negate("),
        ] {
            assert_eq!(Token::from_label(label).fragment(), fragment, "{label}");
        }
    }

    #[test]
    fn test_postfix_and_constants() {
        assert_eq!(Token::from_label("x²").fragment(), "^2");
        assert_eq!(Token::from_label("x³").fragment(), "^3");
        assert_eq!(Token::from_label("%").fragment(), "/100");
        assert_eq!(Token::from_label("π").fragment(), "pi");
        assert_eq!(Token::from_label("Rand").fragment(), "random()");
    }

    #[test]
    fn test_e_and_ee_share_fragment() {
        assert_eq!(Token::from_label("e").fragment(), "e");
        assert_eq!(Token::from_label("EE").fragment(), "e");
        assert_ne!(Token::from_label("e"), Token::from_label("EE"));
    }

    #[test]
    fn test_unmapped_labels_pass_through() {
        assert_eq!(Token::from_label("7"), Token::Digit(7));
        assert_eq!(Token::from_label("7").fragment(), "7");
        assert_eq!(Token::from_label("(").fragment(), "(");
        assert_eq!(Token::from_label(")").fragment(), ")");
        assert_eq!(Token::from_label("AC").fragment(), "AC");
        assert_eq!(Token::from_label("=").fragment(), "=");
        assert_eq!(Token::from_label("mc"), Token::Other("mc".to_string()));
        assert_eq!(Token::from_label("mc").fragment(), "mc");
        assert_eq!(Token::from_label("42").fragment(), "42");
    }

    #[test]
    fn test_labels_round_trip_through_parse() {
        for label in ["÷", "×", "−", "+", ",", "x²", "ʸ√x", "log₁₀", "+/−", "EE", "Rand", "AC"] {
            assert_eq!(Token::from_label(label).label(), label);
        }
    }

    #[test]
    fn test_binary_operator_detection() {
        assert!(Token::Power.is_binary_operator());
        assert!(Token::Subtract.is_binary_operator());
        assert!(!Token::Square.is_binary_operator());
        assert!(!Token::Percent.is_binary_operator());
        assert!(!is_binary_operator(""));
        assert!(!is_binary_operator("+-"));
    }
}
