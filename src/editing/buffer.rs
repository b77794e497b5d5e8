//! Cursor-aware text buffer behind a calculator text field.
//!
//! All offsets are counted in `char`s, so display glyphs such as `×` and
//! `÷` are always edited whole.

use serde::Serialize;

use super::key::Operator;

/// Cursor or selection within an [`EditBuffer`].
///
/// `start == end` is an insertion point; `start < end` is a selection
/// that the next edit replaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CursorRange {
    pub start: usize,
    pub end: usize,
}

impl CursorRange {
    /// Create a range, ordering the endpoints.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Create an insertion point.
    pub fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both endpoints to `len`.
    fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Text content plus cursor for one calculator field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    selection: CursorRange,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the cursor at its end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            selection: CursorRange::collapsed(end),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> CursorRange {
        self.selection
    }

    /// Insertion offset (the selection start).
    pub fn cursor(&self) -> usize {
        self.selection.start
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Move the cursor or selection; out-of-range offsets are clamped.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = CursorRange::new(start, end).clamped(self.len());
    }

    pub fn select_all(&mut self) {
        self.selection = CursorRange::new(0, self.len());
    }

    /// Replace the whole content, keeping the insertion point where it was
    /// as far as the new text allows.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = CursorRange::collapsed(self.selection.start.min(self.len()));
    }

    /// Insert `text` at the cursor, replacing any selection first.
    ///
    /// Empty input is ignored and leaves the selection intact.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.replace_selection(text);
    }

    /// Replace the current selection (possibly empty) with `text`.
    pub fn replace_selection(&mut self, text: &str) {
        let CursorRange { start, end } = self.selection;
        self.splice(start, end, text);
        self.selection = CursorRange::collapsed(start + text.chars().count());
    }

    /// Delete the selection, or the unit before the cursor.
    ///
    /// A space-padded operator (`" + "`, or a `" +"`/`"+ "` fragment) is
    /// removed as one unit so no dangling space or lone operator is left.
    pub fn delete_backward(&mut self) {
        let CursorRange { start, end } = self.selection;

        if start < end {
            self.splice(start, end, "");
            self.selection = CursorRange::collapsed(start);
            return;
        }
        if start == 0 {
            return;
        }

        let chars: Vec<char> = self.text.chars().collect();
        let (from, to) = operator_span(&chars, start - 1).unwrap_or((start - 1, start));

        self.splice(from, to, "");
        self.selection = CursorRange::collapsed(from);
    }

    /// Empty the buffer and reset the cursor to `(0, 0)`.
    pub fn clear(&mut self) {
        self.text.clear();
        self.selection = CursorRange::default();
    }

    fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        let from = self.byte_offset(start);
        let to = self.byte_offset(end);
        self.text.replace_range(from..to, replacement);
    }

    fn byte_offset(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }
}

/// Char span of the operator token that owns `chars[index]`, if any.
///
/// The token is the operator plus an adjacent space on either side. A bare
/// operator (such as the sign of `-2.5`) is not a token.
fn operator_span(chars: &[char], index: usize) -> Option<(usize, usize)> {
    let is_operator = |i: usize| chars.get(i).copied().is_some_and(Operator::is_operator_char);

    let op = if is_operator(index) {
        index
    } else if chars[index] != ' ' {
        return None;
    } else if index > 0 && is_operator(index - 1) {
        index - 1
    } else if is_operator(index + 1) {
        index + 1
    } else {
        return None;
    };

    let from = if op > 0 && chars[op - 1] == ' ' { op - 1 } else { op };
    let to = if chars.get(op + 1) == Some(&' ') { op + 2 } else { op + 1 };

    (to - from > 1).then_some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str, start: usize, end: usize) -> EditBuffer {
        let mut buffer = EditBuffer::with_text(text);
        buffer.set_selection(start, end);
        buffer
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut buf = buffer("13", 1, 1);
        buf.insert("2");
        assert_eq!(buf.text(), "123");
        assert_eq!(buf.selection(), CursorRange::collapsed(2));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buf = buffer("123", 1, 2);
        buf.insert("9");
        assert_eq!(buf.text(), "193");
        assert_eq!(buf.selection(), CursorRange::new(2, 2));
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut buf = buffer("123", 1, 2);
        buf.insert("");
        assert_eq!(buf.text(), "123");
        assert_eq!(buf.selection(), CursorRange::new(1, 2));
    }

    #[test]
    fn test_replace_selection_after_select_all() {
        let mut buf = buffer("2 + 3", 2, 2);
        buf.select_all();
        buf.replace_selection("5");
        assert_eq!(buf.text(), "5");
        assert_eq!(buf.selection(), CursorRange::collapsed(1));
    }

    #[test]
    fn test_replace_collapsed_selection_inserts() {
        let mut buf = buffer("12", 2, 2);
        buf.replace_selection("000");
        assert_eq!(buf.text(), "12000");
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_insert_then_delete_round_trip() {
        let states = [("", 0), ("12", 0), ("12", 1), ("12", 2), ("1 + 2", 5), ("1 × 2", 3)];
        for (text, cursor) in states {
            for digit in ["0", "5", "9"] {
                let mut buf = buffer(text, cursor, cursor);
                let before = buf.clone();
                buf.insert(digit);
                buf.delete_backward();
                assert_eq!(buf, before, "round trip of {digit:?} in {text:?}@{cursor}");
            }
        }
    }

    #[test]
    fn test_operator_deleted_atomically() {
        let mut buf = EditBuffer::new();
        buf.insert(" + ");
        assert_eq!(buf.text(), " + ");
        assert_eq!(buf.cursor(), 3);

        buf.delete_backward();
        assert_eq!(buf.text(), "");
        assert_eq!(buf.selection(), CursorRange::collapsed(0));
    }

    #[test]
    fn test_operator_deleted_after_operand() {
        let mut buf = EditBuffer::with_text("12 ÷ ");
        buf.delete_backward();
        assert_eq!(buf.text(), "12");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_operand_deleted_before_operator() {
        let mut buf = EditBuffer::with_text("1 + 2");
        buf.delete_backward();
        assert_eq!(buf.text(), "1 + ");
        buf.delete_backward();
        assert_eq!(buf.text(), "1");
        buf.delete_backward();
        assert_eq!(buf.text(), "");
        buf.delete_backward();
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_cursor_inside_operator_token() {
        // "1 +| 2": cursor between operator and trailing space
        let mut buf = buffer("1 + 2", 3, 3);
        buf.delete_backward();
        assert_eq!(buf.text(), "12");
        assert_eq!(buf.cursor(), 1);

        // "1 |+ 2": cursor between leading space and operator
        let mut buf = buffer("1 + 2", 2, 2);
        buf.delete_backward();
        assert_eq!(buf.text(), "12");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_operator_fragment_deleted_as_unit() {
        let mut buf = EditBuffer::with_text("7 -");
        buf.delete_backward();
        assert_eq!(buf.text(), "7");

        let mut buf = buffer("× 5", 1, 1);
        buf.delete_backward();
        assert_eq!(buf.text(), "5");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_bare_sign_deleted_as_char() {
        let mut buf = buffer("-2.5", 1, 1);
        buf.delete_backward();
        assert_eq!(buf.text(), "2.5");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_plain_space_deleted_as_char() {
        let mut buf = EditBuffer::with_text("1 ");
        buf.delete_backward();
        assert_eq!(buf.text(), "1");
    }

    #[test]
    fn test_delete_selection() {
        let mut buf = buffer("1 + 23", 1, 6);
        buf.delete_backward();
        assert_eq!(buf.text(), "1");
        assert_eq!(buf.selection(), CursorRange::collapsed(1));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut buf = buffer("1 + 2", 1, 3);
        buf.clear();
        assert_eq!(buf.text(), "");
        assert_eq!(buf.selection(), CursorRange::default());
        buf.clear();
        assert_eq!(buf, EditBuffer::new());
    }

    #[test]
    fn test_selection_clamped() {
        let mut buf = EditBuffer::with_text("123");
        buf.set_selection(10, 2);
        assert_eq!(buf.selection(), CursorRange::new(2, 3));
        buf.set_selection(7, 9);
        assert_eq!(buf.selection(), CursorRange::collapsed(3));
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut buf = EditBuffer::with_text("12345");
        buf.set_selection(4, 4);
        buf.set_text("12");
        assert_eq!(buf.text(), "12");
        assert_eq!(buf.selection(), CursorRange::collapsed(2));

        buf.set_selection(1, 1);
        buf.set_text("999");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_multibyte_glyph_offsets() {
        let mut buf = EditBuffer::new();
        buf.insert("6");
        buf.insert(" × ");
        buf.insert("7");
        assert_eq!(buf.text(), "6 × 7");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.cursor(), 5);

        buf.set_selection(4, 5);
        buf.insert("8");
        assert_eq!(buf.text(), "6 × 8");
    }
}
