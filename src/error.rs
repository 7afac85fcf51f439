use thiserror::Error;

/// Errors raised by the selector and its configuration helpers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error("item list (elements) cannot be empty")]
    EmptyElements,

    #[error("element {index} is empty; each element needs at least a title")]
    EmptyRow { index: usize },

    #[error("default position {default} must be lower than the number of values ({len})")]
    DefaultOutOfRange { default: usize, len: usize },

    #[error("item index {index} must be lower than the number of elements ({len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no value \"{0}\" found in selector")]
    NotFound(String),

    #[error("invalid color {0}")]
    InvalidColor(String),

    #[error("{field} must be equal or greater than zero, got {value}")]
    NegativeValue { field: &'static str, value: i32 },
}

impl SelectorError {
    /// True for the recoverable lookup failure of `set_value` with a label
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, SelectorError::NotFound(_))
    }
}
