//! Expression detection for the calculator keyboard.
//!
//! Decides whether buffer text is a well-formed flat arithmetic expression
//! before any evaluation is attempted.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anchored grammar for a flat expression: signed decimals joined by
    /// `+ - * /`, whitespace allowed around operators and at both ends.
    static ref EXPRESSION: Regex = Regex::new(
        r"^\s*(-?[0-9]+(\.[0-9]+)?\s*[-+*/]\s*)*-?[0-9]+(\.[0-9]+)?\s*$"
    ).unwrap();

    /// Matches a `/` whose right operand is a zero literal (`0`, `-0`, `0.00`).
    static ref ZERO_DIVISOR: Regex = Regex::new(
        r"/\s*-?0+(\.0+)?\s*([-+*/]|$)"
    ).unwrap();
}

/// Replace the keyboard's display glyphs with their ASCII operators.
pub fn normalize(input: &str) -> String {
    input.replace('×', "*").replace('÷', "/").replace('−', "-")
}

/// Check if already-normalized input matches the expression grammar.
pub(crate) fn matches_grammar(normalized: &str) -> bool {
    EXPRESSION.is_match(normalized)
}

/// Check if grammar-checked input divides by a zero literal.
pub(crate) fn has_zero_divisor(normalized: &str) -> bool {
    ZERO_DIVISOR.is_match(normalized)
}

/// Check if input is a complete expression the evaluator will accept.
///
/// Display glyphs (`×`, `÷`) are accepted. Division by zero is still
/// possible for input that passes this check.
pub fn is_valid_expression(input: &str) -> bool {
    matches_grammar(&normalize(input))
}

/// Check if input contains at least one binary operator.
///
/// A leading sign is not an operator, so `-5` is a plain number while
/// `5 - 3` and `-5 × 2` are expressions.
pub fn looks_like_expression(input: &str) -> bool {
    let normalized = normalize(input);
    let chars: Vec<char> = normalized.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !matches!(c, '+' | '-' | '*' | '/') {
            continue;
        }

        // Binary only when an operand precedes it
        let prev_non_space = chars[..i]
            .iter()
            .rev()
            .find(|ch| !ch.is_whitespace())
            .copied();

        if let Some(prev) = prev_non_space
            && prev.is_ascii_digit()
        {
            return true;
        }
    }

    false
}
