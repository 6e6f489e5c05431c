//! The JSON value tree.
//!
//! A [`Value`] owns all of its descendants. Cloning deep-copies nested arrays
//! and objects; [`Value::take`] moves the payload out and leaves `null`
//! behind. There is no shared ownership, so a value can never contain itself.

use std::fmt;

use crate::error::{JsonError, Result};
use crate::map::Map;

/// The active variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "Null",
            Kind::Bool => "Bool",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Object => "Object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON document node.
///
/// Strings hold decoded text: escape sequences are resolved by the parser and
/// re-applied by the serializer, so `Value::from("a\tb")` is written out as
/// `"a\tb"` with a two-character escape.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// An empty object.
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Number of elements of an array or entries of an object; 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the payload out, leaving `null` in its place.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    // Narrowing reads. These never change the value.

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number truncated toward zero, if this is a finite number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    // Auto-initializing mutable handles. A value holding a different variant
    // is replaced by the empty form of the requested one.

    pub fn bool_mut(&mut self) -> &mut bool {
        if !self.is_bool() {
            *self = Value::Bool(false);
        }
        match self {
            Value::Bool(b) => b,
            _ => unreachable!("value was just set to a bool"),
        }
    }

    pub fn number_mut(&mut self) -> &mut f64 {
        if !self.is_number() {
            *self = Value::Number(0.0);
        }
        match self {
            Value::Number(n) => n,
            _ => unreachable!("value was just set to a number"),
        }
    }

    pub fn string_mut(&mut self) -> &mut String {
        if !self.is_string() {
            *self = Value::String(String::new());
        }
        match self {
            Value::String(s) => s,
            _ => unreachable!("value was just set to a string"),
        }
    }

    pub fn array_mut(&mut self) -> &mut Vec<Value> {
        if !self.is_array() {
            *self = Value::array();
        }
        match self {
            Value::Array(items) => items,
            _ => unreachable!("value was just set to an array"),
        }
    }

    pub fn object_mut(&mut self) -> &mut Map {
        if !self.is_object() {
            *self = Value::object();
        }
        match self {
            Value::Object(map) => map,
            _ => unreachable!("value was just set to an object"),
        }
    }

    // Array accessors.

    /// Strict element read.
    pub fn at_index(&self, index: usize) -> Result<&Value> {
        let items = self
            .as_array()
            .ok_or_else(|| JsonError::mismatch(None, Kind::Array, self.kind()))?;
        items.get(index).ok_or(JsonError::IndexOutOfRange {
            index,
            len: items.len(),
        })
    }

    /// Mutable element handle; grows the array with `null`s so that `index`
    /// exists.
    pub fn index_or_grow(&mut self, index: usize) -> &mut Value {
        let items = self.array_mut();
        if items.len() <= index {
            items.resize(index + 1, Value::Null);
        }
        &mut items[index]
    }

    /// Append an element, turning a non-array into an empty array first.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.array_mut().push(value.into());
    }

    /// Resize to `len` elements, filling with `null`.
    pub fn resize(&mut self, len: usize) {
        self.array_mut().resize(len, Value::Null);
    }

    pub fn back(&self) -> Option<&Value> {
        self.as_array().and_then(|items| items.last())
    }

    pub fn back_mut(&mut self) -> Option<&mut Value> {
        self.as_array_mut().and_then(|items| items.last_mut())
    }

    // Object accessors.

    /// Strict key read.
    pub fn at(&self, key: &str) -> Result<&Value> {
        let map = self
            .as_object()
            .ok_or_else(|| JsonError::mismatch(Some(key), Kind::Object, self.kind()))?;
        map.get(key).ok_or_else(|| JsonError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Mutable entry handle; inserts `null` under `key` when missing.
    pub fn key_or_insert(&mut self, key: &str) -> &mut Value {
        self.object_mut().entry_or_null(key)
    }
}

macro_rules! from_integer {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_integer!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}
