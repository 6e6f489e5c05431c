//! Strict JSON parser.
//!
//! The grammar is RFC 8259 with two tightenings: arrays/objects may nest at
//! most [`MAX_DEPTH`] levels (configurable through [`ParseOptions`]), and a
//! number literal that overflows an `f64` is rejected instead of becoming
//! infinity.
//!
//! String escapes are decoded here, so a parsed `"a\tb"` holds a real tab.
//! The serializer re-encodes on output.
//!
//! # Example
//! ```
//! use json_core::{parse, Kind};
//!
//! let v = parse(r#"{"a": [1, 2.5, "x"], "b": null}"#).unwrap();
//! assert_eq!(v.kind(), Kind::Object);
//! assert_eq!(v["a"][1], 2.5);
//! ```

use crate::error::{JsonError, Result};
use crate::map::Map;
use crate::value::Value;

/// Default limit on array/object nesting.
pub const MAX_DEPTH: usize = 1024;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed array/object nesting; the outermost container is
    /// level 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: MAX_DEPTH,
        }
    }
}

/// Parse a complete JSON document.
///
/// Leading and trailing whitespace is allowed; anything else after the value
/// is a [`JsonError::TrailingData`] error.
pub fn parse(text: &str) -> Result<Value> {
    parse_with_options(text, ParseOptions::default())
}

/// [`parse`] with explicit options.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Value> {
    let mut parser = Parser::new(text).with_options(options);
    let value = parser.parse_value()?;
    parser.finish()?;
    Ok(value)
}

/// Parse one value starting at byte `offset`, returning it together with the
/// offset just past the value and any whitespace that follows it. Input after
/// that point is left alone.
pub fn parse_value_at(text: &str, offset: usize) -> Result<(Value, usize)> {
    if offset > text.len() {
        return Err(JsonError::syntax(offset, "offset is past the end of the input"));
    }
    let mut parser = Parser::new(text);
    parser.pos = offset;
    let value = parser.parse_value()?;
    Ok((value, parser.offset()))
}

/// Non-failing [`parse`]. On success `dest` is replaced and `true` returned;
/// on failure `dest` is left untouched.
pub fn try_parse(text: &str, dest: &mut Value) -> bool {
    let mut message = String::new();
    try_parse_with_message(text, dest, &mut message)
}

/// Like [`try_parse`], additionally storing the error text in `message` on
/// failure.
pub fn try_parse_with_message(text: &str, dest: &mut Value, message: &mut String) -> bool {
    match parse(text) {
        Ok(value) => {
            *dest = value;
            true
        }
        Err(err) => {
            tracing::debug!(error = %err, "try_parse rejected input");
            *message = err.to_string();
            false
        }
    }
}

impl std::str::FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Value> {
        parse(s)
    }
}

/// Cursor over the input bytes.
///
/// Most callers want [`parse`]; the parser itself is useful for reading a
/// sequence of values out of one buffer.
pub struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Parse a single value and the whitespace around it.
    ///
    /// Containers are tracked on an explicit stack rather than by recursion,
    /// so the nesting limit is the only bound on depth and a failed call
    /// leaves nothing behind for the next one.
    pub fn parse_value(&mut self) -> Result<Value> {
        let mut open: Vec<Container> = Vec::new();
        'value: loop {
            self.skip_whitespace();
            let mut value = match self.peek() {
                Some(b'[') => {
                    self.check_depth(open.len())?;
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() == Some(b']') {
                        self.pos += 1;
                        Value::array()
                    } else {
                        open.push(Container::Array(Vec::new()));
                        continue 'value;
                    }
                }
                Some(b'{') => {
                    self.check_depth(open.len())?;
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() == Some(b'}') {
                        self.pos += 1;
                        Value::object()
                    } else {
                        let key = self.parse_key()?;
                        open.push(Container::Object(Map::new(), key));
                        continue 'value;
                    }
                }
                Some(_) => self.parse_scalar()?,
                None => return Err(self.unexpected("a value")),
            };
            // Hand the finished value to its parent, closing every container
            // whose last element it was.
            loop {
                self.skip_whitespace();
                let Some(mut parent) = open.pop() else {
                    return Ok(value);
                };
                if self.attach(&mut parent, value)? {
                    value = parent.into_value();
                } else {
                    open.push(parent);
                    continue 'value;
                }
            }
        }
    }

    /// Require that the whole input has been consumed.
    pub fn finish(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(JsonError::TrailingData { offset: self.pos });
        }
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.pos += 1;
        }
    }

    /// Syntax error describing the character at the cursor.
    #[cold]
    fn unexpected(&self, expected: &str) -> JsonError {
        match self.input.get(self.pos..).and_then(|rest| rest.chars().next()) {
            Some(c) => JsonError::syntax(
                self.pos,
                format!("unexpected character '{}', expected {expected}", c.escape_debug()),
            ),
            None if self.pos < self.bytes.len() => {
                JsonError::syntax(self.pos, format!("unexpected byte, expected {expected}"))
            }
            None => JsonError::syntax(self.pos, format!("unexpected end of input, expected {expected}")),
        }
    }

    /// Opening one more container on top of `open` must stay within the
    /// limit.
    fn check_depth(&self, open: usize) -> Result<()> {
        if open >= self.options.max_depth {
            return Err(JsonError::DepthExceeded {
                offset: self.pos,
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    fn parse_scalar(&mut self) -> Result<Value> {
        match self.peek() {
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'"') => Ok(Value::String(self.parse_string()?)),
            _ => self.parse_number(),
        }
    }

    fn parse_literal(&mut self, literal: &'static str, value: Value) -> Result<Value> {
        let end = self.pos + literal.len();
        if self.bytes.get(self.pos..end) == Some(literal.as_bytes()) {
            self.pos = end;
            Ok(value)
        } else {
            Err(JsonError::syntax(
                self.pos,
                format!("invalid literal, expected '{literal}'"),
            ))
        }
    }

    /// Scan `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`.
    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(JsonError::syntax(
                        self.pos,
                        "leading zero must not be followed by a digit",
                    ));
                }
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            _ if self.pos > start => return Err(self.unexpected("a digit after '-'")),
            _ => return Err(self.unexpected("a value")),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.expect_digits("a digit after the decimal point")?;
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            self.expect_digits("a digit in the exponent")?;
        }

        let literal = &self.input[start..self.pos];
        let n: f64 = literal
            .parse()
            .map_err(|_| JsonError::syntax(start, format!("invalid number '{literal}'")))?;
        if !n.is_finite() {
            return Err(JsonError::syntax(
                start,
                format!("number '{literal}' is out of range"),
            ));
        }
        Ok(Value::Number(n))
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }

    fn expect_digits(&mut self, expected: &str) -> Result<()> {
        match self.peek() {
            Some(b'0'..=b'9') => {
                self.skip_digits();
                Ok(())
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Parse a string literal with the cursor on its opening quote and return
    /// the decoded text.
    fn parse_string(&mut self) -> Result<String> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut run_start = self.pos;
        loop {
            let Some(b) = self.peek() else {
                return Err(JsonError::syntax(open, "unterminated string"));
            };
            match b {
                b'"' => {
                    out.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                b'\\' => {
                    out.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    self.parse_escape(&mut out)?;
                    run_start = self.pos;
                }
                0x00..=0x1f => {
                    return Err(JsonError::syntax(
                        self.pos,
                        format!("unescaped control character {:#04x} in string", b),
                    ));
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Decode the escape following a backslash (the cursor is just past it).
    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let escape_at = self.pos - 1;
        let decoded = match self.peek() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{08}',
            Some(b'f') => '\u{0c}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.pos += 1;
                return self.parse_unicode_escape(escape_at, out);
            }
            Some(_) => return Err(self.unexpected("a valid escape character")),
            None => return Err(JsonError::syntax(escape_at, "unterminated escape sequence")),
        };
        self.pos += 1;
        out.push(decoded);
        Ok(())
    }

    /// `\uXXXX`, combining UTF-16 surrogate pairs. The cursor is just past
    /// the `u`.
    fn parse_unicode_escape(&mut self, escape_at: usize, out: &mut String) -> Result<()> {
        let first = self.parse_hex4()?;
        let code = match first {
            0xD800..=0xDBFF => {
                if self.bytes.get(self.pos..self.pos + 2) != Some(b"\\u".as_slice()) {
                    return Err(JsonError::syntax(escape_at, "unpaired surrogate in unicode escape"));
                }
                self.pos += 2;
                let second = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(JsonError::syntax(escape_at, "unpaired surrogate in unicode escape"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(JsonError::syntax(escape_at, "unpaired surrogate in unicode escape"));
            }
            _ => first,
        };
        let ch = char::from_u32(code)
            .ok_or_else(|| JsonError::syntax(escape_at, "invalid unicode escape"))?;
        out.push(ch);
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = match self.peek().and_then(|b| char::from(b).to_digit(16)) {
                Some(digit) => digit,
                None => return Err(self.unexpected("a hex digit")),
            };
            code = code * 16 + digit;
            self.pos += 1;
        }
        Ok(code)
    }

    /// An object key and its `:`, leaving the cursor on the value.
    fn parse_key(&mut self) -> Result<String> {
        if self.peek() != Some(b'"') {
            return Err(self.unexpected("a string key"));
        }
        let key = self.parse_string()?;
        self.skip_whitespace();
        if self.peek() != Some(b':') {
            return Err(self.unexpected("':' after object key"));
        }
        self.pos += 1;
        Ok(key)
    }

    /// Store `value` in `parent` and consume the following `,` or closing
    /// bracket. Returns `true` when the container was closed.
    fn attach(&mut self, parent: &mut Container, value: Value) -> Result<bool> {
        match parent {
            Container::Array(items) => {
                items.push(value);
                match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                        self.skip_whitespace();
                        if self.peek() == Some(b']') {
                            return Err(JsonError::syntax(self.pos, "trailing comma before ']'"));
                        }
                        Ok(false)
                    }
                    Some(b']') => {
                        self.pos += 1;
                        Ok(true)
                    }
                    _ => Err(self.unexpected("',' or ']'")),
                }
            }
            Container::Object(map, key) => {
                // Later duplicates win.
                map.insert(std::mem::take(key), value);
                match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                        self.skip_whitespace();
                        if self.peek() == Some(b'}') {
                            return Err(JsonError::syntax(self.pos, "trailing comma before '}'"));
                        }
                        *key = self.parse_key()?;
                        Ok(false)
                    }
                    Some(b'}') => {
                        self.pos += 1;
                        Ok(true)
                    }
                    _ => Err(self.unexpected("',' or '}'")),
                }
            }
        }
    }
}

/// A container whose closing bracket has not been reached yet. Objects carry
/// the key of the value being parsed.
enum Container {
    Array(Vec<Value>),
    Object(Map, String),
}

impl Container {
    fn into_value(self) -> Value {
        match self {
            Container::Array(items) => Value::Array(items),
            Container::Object(map, _) => Value::Object(map),
        }
    }
}
