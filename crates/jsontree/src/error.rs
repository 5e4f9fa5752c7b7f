//! Error types for tree access, assignment and parsing.

use crate::value::ValueType;
use thiserror::Error;

/// Errors that can occur while building, reading or parsing a [`Value`](crate::Value) tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// The operation needs a specific alternative (or `null`) and found another.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: ValueType,
    },

    /// Keyed lookup without creation found no member with this name.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// Indexed lookup without creation went past the end of the array.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A numeric value does not fit the requested Rust type.
    #[error("number {value} does not fit in {target}")]
    NumberOutOfRange { value: String, target: &'static str },

    /// A JSON Pointer string is not well formed.
    #[error("invalid JSON pointer {0:?}")]
    InvalidPointer(String),

    /// The input text was not valid JSON.
    /// Line and column are 1-based; the column counts characters.
    #[error("JSON parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl JsonError {
    pub(crate) fn type_mismatch(expected: &'static str, found: ValueType) -> Self {
        JsonError::TypeMismatch { expected, found }
    }
}

/// Convenience alias used throughout jsontree.
pub type Result<T> = std::result::Result<T, JsonError>;
