//! A calculator text field and its change notifications.

use std::sync::Arc;

use serde::Serialize;

use crate::editing::{CursorRange, EditBuffer, Key, KeyOutcome, KeyRouter};

/// Notification sent to the host after a key press changed the text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextChange {
    /// Identifier of the field that changed.
    pub field_id: String,
    /// The full new text.
    pub text: String,
    /// Insertion offset after the edit, in chars.
    pub cursor: usize,
    /// Label of the key that caused the change (`"clear"` for `AC`).
    pub key: String,
    /// Increments with every change emitted by this field.
    pub event_count: u64,
}

type ChangeListener = Arc<dyn Fn(&TextChange) + Send + Sync>;

/// One text field driven by the calculator keyboard.
///
/// Owns its [`EditBuffer`] exclusively; the host keeps the field and
/// passes it to the keyboard for every press.
pub struct CalculatorField {
    id: String,
    buffer: EditBuffer,
    event_count: u64,
    on_change: Option<ChangeListener>,
}

impl CalculatorField {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            buffer: EditBuffer::new(),
            event_count: 0,
            on_change: None,
        }
    }

    /// Set the callback invoked after every key press that changes the text.
    pub fn set_on_change(&mut self, callback: impl Fn(&TextChange) + Send + Sync + 'static) {
        self.on_change = Some(Arc::new(callback));
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn selection(&self) -> CursorRange {
        self.buffer.selection()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Number of change notifications emitted so far.
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Move the cursor or selection, e.g. after a tap in the text field.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.buffer.set_selection(start, end);
    }

    /// Accept a value pushed by the host.
    ///
    /// The cursor keeps its position, clamped into the new text. Host
    /// updates do not trigger change notifications.
    pub fn set_value(&mut self, value: &str) {
        if self.buffer.text() != value {
            self.buffer.set_text(value);
        }
    }

    /// Route `key` through `router` and notify the listener if the text
    /// changed.
    pub fn apply(&mut self, router: &KeyRouter, key: Key) -> KeyOutcome {
        let previous = self.buffer.text().to_string();
        let outcome = router.press(&mut self.buffer, key);

        if self.buffer.text() != previous {
            self.notify(key);
        }

        outcome
    }

    fn notify(&mut self, key: Key) {
        self.event_count += 1;

        let Some(listener) = &self.on_change else {
            return;
        };

        let change = TextChange {
            field_id: self.id.clone(),
            text: self.buffer.text().to_string(),
            cursor: self.buffer.cursor(),
            key: event_label(key),
            event_count: self.event_count,
        };
        listener(&change);
    }
}

fn event_label(key: Key) -> String {
    match key {
        Key::Clear => "clear".to_string(),
        other => other.glyph(),
    }
}
