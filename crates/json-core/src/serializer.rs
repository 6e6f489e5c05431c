//! Deterministic JSON serializer.
//!
//! Output is controlled by two independent strings in [`FormatOptions`]: the
//! indent unit repeated once per nesting level, and the line break written
//! before each element and before a closing bracket. Both default to empty,
//! which gives single-line output:
//!
//! ```
//! use json_core::{parse, to_string_with, FormatOptions};
//!
//! let v = parse(r#"{"a":[1,2],"b":{}}"#).unwrap();
//! assert_eq!(v.to_string(), r#"{"a": [1, 2], "b": {}}"#);
//! assert_eq!(
//!     to_string_with(&v, &FormatOptions::new("  ", "\n")),
//!     "{\n  \"a\": [\n    1, \n    2\n  ], \n  \"b\": {}\n}"
//! );
//! ```
//!
//! Elements are always separated by `", "`; with a non-empty newline the
//! separator ends the line.

use std::fmt::{self, Write};

use crate::map::Map;
use crate::value::Value;

/// Layout settings for [`Serializer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Indentation unit written once per nesting level.
    pub indent: String,
    /// Line break written before every element and closing bracket.
    pub newline: String,
}

impl FormatOptions {
    pub fn new(indent: impl Into<String>, newline: impl Into<String>) -> Self {
        FormatOptions {
            indent: indent.into(),
            newline: newline.into(),
        }
    }

    /// Single-line output.
    pub fn compact() -> Self {
        FormatOptions::default()
    }

    /// Four-space indentation, one element per line.
    pub fn pretty() -> Self {
        FormatOptions::new("    ", "\n")
    }
}

/// Indentation strings per depth, built on first use and reused afterwards.
#[derive(Debug)]
struct IndentCache {
    unit: String,
    levels: Vec<String>,
}

impl IndentCache {
    fn new(unit: String) -> Self {
        IndentCache {
            unit,
            levels: vec![String::new()],
        }
    }

    fn get(&mut self, depth: usize) -> &str {
        if self.unit.is_empty() {
            return "";
        }
        while self.levels.len() <= depth {
            let next = format!("{}{}", self.levels[self.levels.len() - 1], self.unit);
            self.levels.push(next);
        }
        &self.levels[depth]
    }
}

/// Writes [`Value`]s as JSON text.
///
/// A serializer owns its indentation cache, so reusing one instance for many
/// documents avoids rebuilding indent strings.
#[derive(Debug)]
pub struct Serializer {
    newline: String,
    indents: IndentCache,
}

impl Serializer {
    pub fn new(options: FormatOptions) -> Self {
        Serializer {
            newline: options.newline,
            indents: IndentCache::new(options.indent),
        }
    }

    pub fn write<W: Write>(&mut self, value: &Value, out: &mut W) -> fmt::Result {
        self.write_value(value, 0, out)
    }

    pub fn to_string(&mut self, value: &Value) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(value, &mut out);
        out
    }

    fn write_value<W: Write>(&mut self, value: &Value, depth: usize, out: &mut W) -> fmt::Result {
        match value {
            Value::Null => out.write_str("null"),
            Value::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write_number(*n, out),
            Value::String(s) => write_string(s, out),
            Value::Array(items) => self.write_array(items, depth, out),
            Value::Object(map) => self.write_object(map, depth, out),
        }
    }

    fn write_array<W: Write>(&mut self, items: &[Value], depth: usize, out: &mut W) -> fmt::Result {
        if items.is_empty() {
            return out.write_str("[]");
        }
        out.write_char('[')?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            self.write_break(depth + 1, out)?;
            self.write_value(item, depth + 1, out)?;
        }
        self.write_break(depth, out)?;
        out.write_char(']')
    }

    fn write_object<W: Write>(&mut self, map: &Map, depth: usize, out: &mut W) -> fmt::Result {
        if map.is_empty() {
            return out.write_str("{}");
        }
        out.write_char('{')?;
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            self.write_break(depth + 1, out)?;
            write_string(key, out)?;
            out.write_str(": ")?;
            self.write_value(value, depth + 1, out)?;
        }
        self.write_break(depth, out)?;
        out.write_char('}')
    }

    fn write_break<W: Write>(&mut self, depth: usize, out: &mut W) -> fmt::Result {
        out.write_str(&self.newline)?;
        out.write_str(self.indents.get(depth))
    }
}

/// Shortest decimal that reads back as the same `f64`. JSON has no spelling
/// for NaN or infinity, so those become `null`.
fn write_number<W: Write>(n: f64, out: &mut W) -> fmt::Result {
    if n.is_finite() {
        write!(out, "{n}")
    } else {
        out.write_str("null")
    }
}

fn write_string<W: Write>(s: &str, out: &mut W) -> fmt::Result {
    out.write_char('"')?;
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        let escape = match b {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x0c => "\\f",
            0x00..=0x1f => "",
            _ => continue,
        };
        out.write_str(&s[start..i])?;
        if escape.is_empty() {
            write!(out, "\\u{:04x}", b)?;
        } else {
            out.write_str(escape)?;
        }
        start = i + 1;
    }
    out.write_str(&s[start..])?;
    out.write_char('"')
}

/// Compact single-line rendering.
pub fn to_string(value: &Value) -> String {
    Serializer::new(FormatOptions::compact()).to_string(value)
}

/// Render with explicit layout settings.
pub fn to_string_with(value: &Value, options: &FormatOptions) -> String {
    Serializer::new(options.clone()).to_string(value)
}

impl Value {
    /// Render with the given indent unit and newline string.
    pub fn to_string_with(&self, indent: &str, newline: &str) -> String {
        to_string_with(self, &FormatOptions::new(indent, newline))
    }
}

/// `{}` is compact, `{:#}` uses [`FormatOptions::pretty`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = if f.alternate() {
            FormatOptions::pretty()
        } else {
            FormatOptions::compact()
        };
        Serializer::new(options).write(self, f)
    }
}
