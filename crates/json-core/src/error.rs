//! Error types for parsing, accessing and converting JSON values.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::Kind;

/// Errors raised by the parser, the accessors and the conversion traits.
///
/// Every variant describes malformed input or misuse of the API; none of
/// them is transient, so callers should never retry on them.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The input is not valid JSON. `offset` is the byte offset where the
    /// problem was detected.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// Arrays/objects are nested deeper than the configured limit.
    #[error("exceeded maximum nesting depth of {limit} at offset {offset}")]
    DepthExceeded { offset: usize, limit: usize },

    /// A complete value was parsed but non-whitespace input follows it.
    #[error("unexpected trailing data at offset {offset}")]
    TrailingData { offset: usize },

    /// Strict lookup of a key that the object does not contain.
    #[error("key not found: '{key}'")]
    KeyNotFound { key: String },

    /// The stored variant is not the one the destination expects.
    #[error("expected {expected} but got {found}{}", describe_key(.key))]
    TypeMismatch {
        key: Option<String>,
        expected: Kind,
        found: Kind,
    },

    /// Strict read of an array element past the end.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An object key could not be turned back into a mapping key type.
    #[error("cannot decode key '{key}' as {target}")]
    InvalidKey { key: String, target: &'static str },

    /// A serde-based conversion (see [`crate::interop`]) failed.
    #[error("serde conversion error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Reading or writing a document file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JsonError {
    #[cold]
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        JsonError::Syntax {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn mismatch(key: Option<&str>, expected: Kind, found: Kind) -> Self {
        JsonError::TypeMismatch {
            key: key.map(str::to_string),
            expected,
            found,
        }
    }

    /// Attach a key to a `TypeMismatch` raised while converting a field.
    pub(crate) fn with_key(self, key: &str) -> Self {
        match self {
            JsonError::TypeMismatch {
                key: None,
                expected,
                found,
            } => JsonError::TypeMismatch {
                key: Some(key.to_string()),
                expected,
                found,
            },
            other => other,
        }
    }
}

fn describe_key(key: &Option<String>) -> String {
    match key {
        Some(key) => format!(" for key '{key}'"),
        None => String::new(),
    }
}

/// Convenience alias used throughout json-core.
pub type Result<T> = std::result::Result<T, JsonError>;
