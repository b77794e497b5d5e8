//! Expression-aware text editing.
//!
//! A [`KeyRouter`] turns key presses into [`EditBuffer`] edits, padding
//! operators with spaces and evaluating the buffer on `=`.

mod buffer;
mod key;
mod router;

pub use buffer::{CursorRange, EditBuffer};
pub use key::{Key, KeyError, Operator};
pub use router::{KeyOutcome, KeyRouter};
