//! Decoded cell values.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// One decoded worksheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// No value.
    Empty,
    /// Text as typed.
    Text(String),
    /// Numeric value.
    Number(Decimal),
    /// Native date/time cell.
    DateTime(NaiveDateTime),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Builds a text cell.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for empty cells and whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Renders the cell as trimmed text. Blank cells yield `None`.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(value) => Some(value.normalize().to_string()),
            Self::DateTime(value) => Some(value.format("%Y-%m-%d %H:%M:%S").to_string()),
            Self::Bool(value) => Some(value.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}
