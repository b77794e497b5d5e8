//! Key grid drawn by the platform keyboards.

use thiserror::Error;

use crate::editing::{Key, KeyError, Operator};

/// Layout validation error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Keyboard layout has no rows")]
    Empty,

    #[error("Keyboard layout row {0} has no keys")]
    EmptyRow(usize),

    #[error("Invalid key at row {row}, column {column}")]
    UnknownKey {
        row: usize,
        column: usize,
        source: KeyError,
    },
}

/// Rows of keys, top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardLayout {
    rows: Vec<Vec<Key>>,
}

impl Default for KeyboardLayout {
    /// The standard five-row calculator pad.
    fn default() -> Self {
        let op = Key::Operator;
        let digit = Key::Digit;

        Self {
            rows: vec![
                vec![
                    Key::Clear,
                    op(Operator::Divide),
                    op(Operator::Multiply),
                    Key::Back,
                ],
                vec![digit(7), digit(8), digit(9), op(Operator::Subtract)],
                vec![digit(4), digit(5), digit(6), op(Operator::Add)],
                vec![digit(1), digit(2), digit(3), Key::Equals],
                vec![Key::TripleZero, Key::Placeholder, digit(0)],
            ],
        }
    }
}

impl KeyboardLayout {
    /// Build a layout from key labels, e.g. as read from configuration.
    pub fn from_glyph_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, LayoutError> {
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let rows = rows
            .iter()
            .enumerate()
            .map(|(row, labels)| {
                if labels.is_empty() {
                    return Err(LayoutError::EmptyRow(row));
                }
                labels
                    .iter()
                    .enumerate()
                    .map(|(column, label)| {
                        label
                            .as_ref()
                            .parse()
                            .map_err(|source| LayoutError::UnknownKey {
                                row,
                                column,
                                source,
                            })
                    })
                    .collect()
            })
            .collect::<Result<Vec<Vec<Key>>, _>>()?;

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<Key>] {
        &self.rows
    }

    pub fn key_at(&self, row: usize, column: usize) -> Option<Key> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// All keys in reading order, placeholders included.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.rows.iter().flatten().copied()
    }

    pub fn contains(&self, key: Key) -> bool {
        self.keys().any(|k| k == key)
    }
}
