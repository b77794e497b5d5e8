//! Key vocabulary of the calculator keyboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key parsing error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Unknown key glyph: {0:?}")]
    UnknownGlyph(String),
}

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Glyph shown on the key and stored in the buffer.
    pub fn glyph(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.glyph() == c)
    }

    /// Check if `c` is an operator glyph as stored in the buffer.
    pub fn is_operator_char(c: char) -> bool {
        Self::from_glyph(c).is_some()
    }

    /// Buffer text for this operator: the glyph padded with single spaces.
    pub fn spaced(self) -> String {
        format!(" {} ", self.glyph())
    }
}

/// A single logical key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// `0` to `9`.
    Digit(u8),
    /// The wide `000` key.
    TripleZero,
    Operator(Operator),
    /// `AC`
    Clear,
    /// `back`
    Back,
    /// `=`
    Equals,
    /// Empty layout cell; never edits the buffer.
    Placeholder,
}

impl Key {
    /// Create a digit key, or `None` if `digit > 9`.
    pub fn digit(digit: u8) -> Option<Self> {
        (digit <= 9).then_some(Self::Digit(digit))
    }

    /// Label as drawn on the keyboard.
    pub fn glyph(&self) -> String {
        self.to_string()
    }

    /// Text this key inserts, if it is a plain text key.
    pub fn insert_text(&self) -> Option<String> {
        match self {
            Self::Digit(d) => Some(d.to_string()),
            Self::TripleZero => Some("000".to_string()),
            Self::Operator(op) => Some(op.spaced()),
            _ => None,
        }
    }

    /// Check if this key is drawn with the accent style
    /// (operators and control keys).
    pub fn is_function_key(&self) -> bool {
        matches!(
            self,
            Self::Operator(_) | Self::Clear | Self::Back | Self::Equals
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::TripleZero => f.write_str("000"),
            Self::Operator(op) => write!(f, "{}", op.glyph()),
            Self::Clear => f.write_str("AC"),
            Self::Back => f.write_str("back"),
            Self::Equals => f.write_str("="),
            Self::Placeholder => Ok(()),
        }
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Placeholder),
            "000" => Ok(Self::TripleZero),
            "AC" => Ok(Self::Clear),
            "back" => Ok(Self::Back),
            "=" => Ok(Self::Equals),
            // ASCII spellings for hosts without the display glyphs
            "*" => Ok(Self::Operator(Operator::Multiply)),
            "/" => Ok(Self::Operator(Operator::Divide)),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Ok(Self::Digit(c as u8 - b'0')),
                    (Some(c), None) => Operator::from_glyph(c)
                        .map(Self::Operator)
                        .ok_or_else(|| KeyError::UnknownGlyph(s.to_string())),
                    _ => Err(KeyError::UnknownGlyph(s.to_string())),
                }
            }
        }
    }
}
