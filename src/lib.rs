//! Editing core for numeric calculator keyboards.
//!
//! Platform renderers draw the [`KeyboardLayout`] and forward presses to a
//! [`Keyboard`] together with the [`CalculatorField`] that has focus. The
//! field's [`EditBuffer`] is edited in place and the host is told about the
//! new text through [`TextChange`] notifications.

pub mod calculator;
pub mod config;
pub mod editing;
pub mod keyboard;

pub use calculator::{EvalError, EvaluationOutcome, evaluate};
pub use config::Config;
pub use editing::{CursorRange, EditBuffer, Key, KeyOutcome, KeyRouter, Operator};
pub use keyboard::{CalculatorField, Keyboard, KeyboardLayout, TextChange};
