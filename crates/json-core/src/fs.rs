//! Whole-file helpers around [`parse`] and the serializer.

use std::path::Path;

use crate::error::{JsonError, Result};
use crate::parser::parse;
use crate::serializer::{to_string_with, FormatOptions};
use crate::value::Value;

fn read(path: &Path) -> Result<String> {
    tracing::trace!(path = %path.display(), "reading JSON document");
    std::fs::read_to_string(path).map_err(|source| JsonError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file and parse its full contents.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
    parse(&read(path.as_ref())?)
}

/// Non-failing [`parse_file`]; `dest` is left untouched on failure.
pub fn try_parse_file(path: impl AsRef<Path>, dest: &mut Value) -> bool {
    let mut message = String::new();
    try_parse_file_with_message(path, dest, &mut message)
}

/// Like [`try_parse_file`], additionally storing the error text in `message`.
pub fn try_parse_file_with_message(
    path: impl AsRef<Path>,
    dest: &mut Value,
    message: &mut String,
) -> bool {
    match parse_file(path) {
        Ok(value) => {
            *dest = value;
            true
        }
        Err(err) => {
            tracing::debug!(error = %err, "try_parse_file rejected input");
            *message = err.to_string();
            false
        }
    }
}

/// Serialize `value` and write it to `path`, replacing any existing file.
pub fn write_file(path: impl AsRef<Path>, value: &Value, options: &FormatOptions) -> Result<()> {
    let path = path.as_ref();
    tracing::trace!(path = %path.display(), "writing JSON document");
    std::fs::write(path, to_string_with(value, options)).map_err(|source| JsonError::Io {
        path: path.to_path_buf(),
        source,
    })
}
