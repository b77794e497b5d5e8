//! Dispatch of key presses onto an [`EditBuffer`].

use serde::Serialize;
use tracing::debug;

use super::buffer::EditBuffer;
use super::key::Key;
use crate::calculator::{EvalError, EvaluationOutcome, FormatOptions, evaluate, format_result};

/// What a single key press did to the buffer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum KeyOutcome {
    /// Text or cursor changed.
    Edited,
    /// The key had no effect.
    Unchanged,
    /// `=` replaced the buffer with the formatted result.
    Evaluated { result: String },
    /// `=` was rejected; the buffer is untouched.
    EvaluationFailed {
        #[serde(serialize_with = "serialize_error")]
        error: EvalError,
    },
}

impl KeyOutcome {
    /// Check if this press was a rejected evaluation.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::EvaluationFailed { .. })
    }
}

fn serialize_error<S: serde::Serializer>(
    error: &EvalError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Routes keys to buffer edits and evaluation.
#[derive(Clone, Debug, Default)]
pub struct KeyRouter {
    format: FormatOptions,
}

impl KeyRouter {
    pub fn new(format: FormatOptions) -> Self {
        Self { format }
    }

    pub fn format_options(&self) -> &FormatOptions {
        &self.format
    }

    /// Apply `key` to `buffer`.
    pub fn press(&self, buffer: &mut EditBuffer, key: Key) -> KeyOutcome {
        debug!(key = %key, text = buffer.text(), cursor = buffer.cursor(), "Routing key");

        let before = buffer.clone();
        match key {
            Key::Placeholder => return KeyOutcome::Unchanged,
            Key::Clear => buffer.clear(),
            Key::Back => buffer.delete_backward(),
            Key::Equals => return self.evaluate_buffer(buffer),
            Key::Digit(_) | Key::TripleZero | Key::Operator(_) => {
                if let Some(text) = key.insert_text() {
                    buffer.insert(&text);
                }
            }
        }

        if *buffer == before {
            KeyOutcome::Unchanged
        } else {
            KeyOutcome::Edited
        }
    }

    fn evaluate_buffer(&self, buffer: &mut EditBuffer) -> KeyOutcome {
        match evaluate(buffer.text()) {
            EvaluationOutcome::Valid(value) => {
                let result = format_result(value, &self.format);
                buffer.select_all();
                buffer.replace_selection(&result);
                KeyOutcome::Evaluated { result }
            }
            EvaluationOutcome::Invalid(error) => {
                debug!(text = buffer.text(), %error, "Expression not evaluated");
                KeyOutcome::EvaluationFailed { error }
            }
        }
    }
}
