//! Expression evaluation for the calculator keyboard.
//!
//! Validates buffer text against the flat expression grammar, hands it to
//! fasteval and formats results for the text field.

use std::collections::BTreeMap;

use thiserror::Error;

use super::detection::{has_zero_divisor, matches_grammar, normalize};

/// Why an expression could not be evaluated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// Input does not match the expression grammar.
    #[error("Invalid expression: {0:?}")]
    Syntax(String),

    #[error("Division by zero")]
    DivisionByZero,

    /// An operand or intermediate value left the finite `f64` range.
    #[error("Result out of range")]
    Overflow,
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum EvaluationOutcome {
    /// The expression evaluated to a finite number.
    Valid(f64),
    /// The expression was rejected; no value is available.
    Invalid(EvalError),
}

impl EvaluationOutcome {
    /// Check if this is a successful result.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Get the numeric value (only for successful results).
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Valid(value) => Some(*value),
            Self::Invalid(_) => None,
        }
    }

    /// Get the failure reason (only for rejected expressions).
    pub fn error(&self) -> Option<&EvalError> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<Result<f64, EvalError>> for EvaluationOutcome {
    fn from(result: Result<f64, EvalError>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(err) => Self::Invalid(err),
        }
    }
}

/// Upper bound for [`FormatOptions::max_fraction_digits`]; `f64` carries
/// no meaningful digits past this.
pub const MAX_FRACTION_DIGITS: usize = 17;

/// Options controlling how results are written back into the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum digits after the decimal point for non-integral results.
    /// Values above [`MAX_FRACTION_DIGITS`] are treated as that maximum.
    pub max_fraction_digits: usize,
}

impl FormatOptions {
    /// Create options, clamping `max_fraction_digits` to
    /// [`MAX_FRACTION_DIGITS`].
    pub fn new(max_fraction_digits: usize) -> Self {
        Self {
            max_fraction_digits: max_fraction_digits.min(MAX_FRACTION_DIGITS),
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_fraction_digits: 10,
        }
    }
}

/// Evaluate an expression, returning a tagged outcome.
///
/// Never panics: grammar mismatches, division by zero and overflow all
/// come back as `EvaluationOutcome::Invalid`.
pub fn evaluate(input: &str) -> EvaluationOutcome {
    evaluate_expression(input).into()
}

/// Evaluate an expression using fasteval.
///
/// Input must pass the flat expression grammar first, so fasteval only
/// ever sees signed decimals and `+ - * /`.
pub fn evaluate_expression(input: &str) -> Result<f64, EvalError> {
    let normalized = normalize(input);
    if !matches_grammar(&normalized) {
        return Err(EvalError::Syntax(input.trim().to_string()));
    }
    // fasteval yields inf/NaN here instead of failing
    if has_zero_divisor(&normalized) {
        return Err(EvalError::DivisionByZero);
    }

    // Use an empty namespace (no custom variables)
    let mut namespace = BTreeMap::<String, f64>::new();

    match fasteval::ez_eval(&normalized, &mut namespace) {
        Ok(value) => finite(value),
        Err(_) => Err(EvalError::Syntax(input.trim().to_string())),
    }
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Overflow)
    }
}

/// Format a result for the text field (raw number, no separators).
///
/// Integral values render without a fractional part; everything else is
/// rounded to `max_fraction_digits` with trailing zeros removed.
pub fn format_result(value: f64, options: &FormatOptions) -> String {
    if value.fract() == 0.0 {
        if value == 0.0 {
            // Also folds -0
            return "0".to_string();
        }
        if value.abs() < 1e15 {
            return format!("{}", value as i64);
        }
        return format!("{}", value);
    }

    let digits = options.max_fraction_digits.min(MAX_FRACTION_DIGITS);
    let formatted = format!("{:.*}", digits, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
