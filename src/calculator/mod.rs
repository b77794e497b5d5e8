//! Arithmetic behind the keyboard's `=` key.
//!
//! Buffer text is checked against a flat grammar of signed decimals and
//! `+ - × ÷`, evaluated by fasteval, then written back as a plain number.

mod detection;
mod evaluation;

pub use detection::{is_valid_expression, looks_like_expression, normalize};
pub use evaluation::{
    EvalError, EvaluationOutcome, FormatOptions, MAX_FRACTION_DIGITS, evaluate,
    evaluate_expression, format_result,
};
