//! Conversion between [`Value`] and native Rust types.
//!
//! [`ToJson`] and [`FromJson`] are the extension point: implement them for a
//! record type and it works with [`encode`]/[`decode`], the accessors in
//! [`crate::access`], and every container impl below (`Vec<Record>`,
//! `BTreeMap<String, Record>`, `Option<Record>`, ...).
//!
//! ```
//! use json_core::{decode, encode, FromJson, Result, ToJson, Value};
//!
//! struct Point {
//!     x: f64,
//!     y: f64,
//!     label: Option<String>,
//! }
//!
//! impl ToJson for Point {
//!     fn to_json(&self) -> Value {
//!         let mut v = Value::object();
//!         v.set("x", self.x);
//!         v.set("y", self.y);
//!         v.set_opt("label", &self.label);
//!         v
//!     }
//! }
//!
//! impl FromJson for Point {
//!     fn from_json(v: &Value) -> Result<Self> {
//!         Ok(Point {
//!             x: v.get("x")?,
//!             y: v.get("y")?,
//!             label: v.get_opt("label")?,
//!         })
//!     }
//! }
//!
//! let v = encode(&Point { x: 1.0, y: -2.5, label: None });
//! assert_eq!(v.to_string(), r#"{"x": 1, "y": -2.5}"#);
//! let back: Point = decode(&v).unwrap();
//! assert_eq!(back.y, -2.5);
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

use crate::error::{JsonError, Result};
use crate::map::Map;
use crate::value::{Kind, Value};

/// Types that can be written as a JSON value.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

/// Types that can be read back from a JSON value.
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Result<Self>;

    /// Variant the strict accessors require before calling
    /// [`FromJson::from_json`]. `None` accepts any variant.
    fn expected_kind() -> Option<Kind> {
        None
    }
}

/// Types usable as keys of a mapping: they round-trip through an object key
/// string.
pub trait MapKey: Sized {
    fn to_key(&self) -> String;
    fn from_key(key: &str) -> Result<Self>;
}

/// Convert a native value into a [`Value`].
pub fn encode<T: ToJson + ?Sized>(value: &T) -> Value {
    value.to_json()
}

/// Convert a [`Value`] into a native value.
pub fn decode<T: FromJson>(value: &Value) -> Result<T> {
    T::from_json(value)
}

impl Value {
    pub fn decode<T: FromJson>(&self) -> Result<T> {
        T::from_json(self)
    }
}

fn expect(value: &Value, kind: Kind) -> Result<()> {
    if value.kind() == kind {
        Ok(())
    } else {
        Err(JsonError::mismatch(None, kind, value.kind()))
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl FromJson for Value {
    fn from_json(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl ToJson for Map {
    fn to_json(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl FromJson for Map {
    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| JsonError::mismatch(None, Kind::Object, value.kind()))
    }

    fn expected_kind() -> Option<Kind> {
        Some(Kind::Object)
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromJson for bool {
    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| JsonError::mismatch(None, Kind::Bool, value.kind()))
    }

    fn expected_kind() -> Option<Kind> {
        Some(Kind::Bool)
    }
}

// Numbers are stored as f64. Decoding into an integer truncates toward zero
// and saturates at the target's bounds, the semantics of an `as` cast.
macro_rules! number_conversions {
    ($($ty:ty)*) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    Value::Number(*self as f64)
                }
            }

            impl FromJson for $ty {
                fn from_json(value: &Value) -> Result<Self> {
                    value
                        .as_f64()
                        .map(|n| n as $ty)
                        .ok_or_else(|| JsonError::mismatch(None, Kind::Number, value.kind()))
                }

                fn expected_kind() -> Option<Kind> {
                    Some(Kind::Number)
                }
            }
        )*
    };
}

number_conversions!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize f32 f64);

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromJson for String {
    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| JsonError::mismatch(None, Kind::String, value.kind()))
    }

    fn expected_kind() -> Option<Kind> {
        Some(Kind::String)
    }
}

impl ToJson for char {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

/// `None` is written as `null`. Record encoders that want the key left out
/// entirely use [`Value::set_opt`] instead.
impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: ToJson, const N: usize> ToJson for [T; N] {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value) -> Result<Self> {
        expect(value, Kind::Array)?;
        value
            .as_array()
            .into_iter()
            .flatten()
            .map(T::from_json)
            .collect()
    }

    fn expected_kind() -> Option<Kind> {
        Some(Kind::Array)
    }
}

impl<T: ToJson> ToJson for VecDeque<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: FromJson> FromJson for VecDeque<T> {
    fn from_json(value: &Value) -> Result<Self> {
        Vec::<T>::from_json(value).map(VecDeque::from)
    }

    fn expected_kind() -> Option<Kind> {
        Some(Kind::Array)
    }
}

/// Decode every entry of an object, tagging value errors with their key.
fn decode_entries<K, V, C>(value: &Value) -> Result<C>
where
    K: MapKey,
    V: FromJson,
    C: FromIterator<(K, V)>,
{
    let map = value
        .as_object()
        .ok_or_else(|| JsonError::mismatch(None, Kind::Object, value.kind()))?;
    map.iter()
        .map(|(key, item)| -> Result<(K, V)> {
            let item = V::from_json(item).map_err(|err| err.with_key(key))?;
            Ok((K::from_key(key)?, item))
        })
        .collect()
}

impl<K: MapKey, V: ToJson> ToJson for BTreeMap<K, V> {
    fn to_json(&self) -> Value {
        self.iter()
            .map(|(key, value)| (key.to_key(), value.to_json()))
            .collect()
    }
}

impl<K: MapKey + Ord, V: FromJson> FromJson for BTreeMap<K, V> {
    fn from_json(value: &Value) -> Result<Self> {
        decode_entries(value)
    }

    fn expected_kind() -> Option<Kind> {
        Some(Kind::Object)
    }
}

impl<K: MapKey, V: ToJson, S> ToJson for HashMap<K, V, S> {
    fn to_json(&self) -> Value {
        self.iter()
            .map(|(key, value)| (key.to_key(), value.to_json()))
            .collect()
    }
}

impl<K, V, S> FromJson for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: FromJson,
    S: BuildHasher + Default,
{
    fn from_json(value: &Value) -> Result<Self> {
        decode_entries(value)
    }

    fn expected_kind() -> Option<Kind> {
        Some(Kind::Object)
    }
}

impl<K: MapKey, V: ToJson, S> ToJson for IndexMap<K, V, S> {
    fn to_json(&self) -> Value {
        self.iter()
            .map(|(key, value)| (key.to_key(), value.to_json()))
            .collect()
    }
}

impl<K, V, S> FromJson for IndexMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: FromJson,
    S: BuildHasher + Default,
{
    fn from_json(value: &Value) -> Result<Self> {
        decode_entries(value)
    }

    fn expected_kind() -> Option<Kind> {
        Some(Kind::Object)
    }
}

impl MapKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }

    fn from_key(key: &str) -> Result<Self> {
        Ok(key.to_string())
    }
}

macro_rules! parsed_map_key {
    ($($ty:ty)*) => {
        $(
            impl MapKey for $ty {
                fn to_key(&self) -> String {
                    self.to_string()
                }

                fn from_key(key: &str) -> Result<Self> {
                    key.parse().map_err(|_| JsonError::InvalidKey {
                        key: key.to_string(),
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

parsed_map_key!(i32 i64 u32 u64 usize f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_decoding_truncates_and_saturates() {
        assert_eq!(decode::<i32>(&Value::Number(-2.9)).unwrap(), -2);
        assert_eq!(decode::<u8>(&Value::Number(300.0)).unwrap(), 255);
        assert_eq!(decode::<u32>(&Value::Number(-1.0)).unwrap(), 0);
    }

    #[test]
    fn nested_map_error_names_the_offending_key() {
        let mut v = Value::object();
        v["good"] = Value::from(1);
        v["bad"] = Value::from("x");
        let err = decode::<BTreeMap<String, i64>>(&v).unwrap_err();
        assert_eq!(err.to_string(), "expected Number but got String for key 'bad'");
    }
}
