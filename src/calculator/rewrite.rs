//! Rewrites applied to the buffer right before evaluation.
//!
//! The `+/−` button leaves `negate(` in the buffer. Before evaluation each
//! wrapper becomes `((-1)*(…))`. A wrapper closed by its own `)` negates the
//! whole group; an unclosed wrapper binds only to the operand right after it,
//! so `negate(5+3` reads as `(-5)+3`.
//!
//! fasteval has no implied products, so `2pi`, `2sqrt(9)` and `(2)(3)` get
//! an explicit `*`.

use super::token::NEGATE_OPEN;

const NEGATED_OPEN: &str = "((-1)*(";
const NEGATED_CLOSE: &str = "))";

/// Turn the buffer into something fasteval can parse.
pub fn normalize(expr: &str) -> String {
    insert_implicit_products(&rewrite_negations(expr))
}

/// Rewrite every negation wrapper in `expr` into multiply-by-minus-one form.
///
/// Only the wrappers are touched; any other unbalanced parenthesis is left
/// as typed for the backend to reject.
pub fn rewrite_negations(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 8);
    let mut rest = expr;

    while let Some(pos) = rest.find(NEGATE_OPEN) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + NEGATE_OPEN.len()..];

        let (operand, remainder) = match matching_close(after) {
            Some(close) => (&after[..close], &after[close + 1..]),
            None => after.split_at(operand_len(after)),
        };

        tracing::trace!(operand, "rewriting negation");
        out.push_str(NEGATED_OPEN);
        out.push_str(&rewrite_negations(operand));
        out.push_str(NEGATED_CLOSE);
        rest = remainder;
    }

    out.push_str(rest);
    out
}

/// Insert `*` where a number or `)` is directly followed by `(` or a name.
///
/// A name followed by `(` is a call and is left alone. Exponent literals
/// such as `1e3` stay whole.
pub fn insert_implicit_products(expr: &str) -> String {
    let bytes = expr.as_bytes();
    let mut out = String::with_capacity(expr.len() + 4);
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let (len, operand_end) = if b.is_ascii_digit() || b == b'.' {
            (number_len(&bytes[i..]), true)
        } else if b.is_ascii_alphabetic() {
            (ident_len(&bytes[i..]), false)
        } else if b == b')' {
            (1, true)
        } else {
            (expr[i..].chars().next().map_or(1, char::len_utf8), false)
        };

        out.push_str(&expr[i..i + len]);
        i += len;

        if operand_end && bytes.get(i).is_some_and(|b| *b == b'(' || b.is_ascii_alphabetic()) {
            out.push('*');
        }
    }

    out
}

/// Byte index of the `)` closing a group whose `(` was just consumed.
fn matching_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' if depth == 0 => return Some(i),
            b')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Length of the operand at the start of `s`.
///
/// An operand is a signed number, a bare identifier, a parenthesised group
/// or a function call. Unclosed groups run to the end of the input.
fn operand_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.first() {
        None => 0,
        Some(b'-' | b'+') => 1 + operand_len(&s[1..]),
        Some(b'(') => group_end(s, 0),
        Some(b) if b.is_ascii_digit() || *b == b'.' => number_len(bytes),
        Some(b) if b.is_ascii_alphabetic() => {
            let ident = ident_len(bytes);
            if bytes.get(ident) == Some(&b'(') {
                group_end(s, ident)
            } else {
                ident
            }
        }
        Some(_) => 0,
    }
}

/// Length of a name such as `pi` or `log10`.
fn ident_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count()
}

/// Index just past the `)` matching the `(` at `open`.
fn group_end(s: &str, open: usize) -> usize {
    matching_close(&s[open + 1..])
        .map(|close| open + 1 + close + 1)
        .unwrap_or(s.len())
}

/// Length of a decimal literal, including an `e` exponent when digits follow.
fn number_len(bytes: &[u8]) -> usize {
    let mantissa = bytes
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'.')
        .count();

    if !matches!(bytes.get(mantissa), Some(b'e' | b'E')) {
        return mantissa;
    }

    let mut exp = mantissa + 1;
    if matches!(bytes.get(exp), Some(b'-' | b'+')) {
        exp += 1;
    }
    let digits = bytes[exp.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits == 0 { mantissa } else { exp + digits }
}
