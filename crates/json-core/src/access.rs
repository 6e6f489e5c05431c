//! Field accessors for object values.
//!
//! Two flavours, both going through the [`FromJson`] conversion:
//!
//! - **strict**: [`Value::get`] / [`Value::get_into`] fail with
//!   [`JsonError::KeyNotFound`] when the key is missing;
//! - **permissive**: [`Value::try_get`] / [`Value::get_opt`] treat a missing
//!   key as "nothing to do" and leave the destination alone.
//!
//! Both check the stored variant against [`FromJson::expected_kind`] before
//! converting and fail with [`JsonError::TypeMismatch`] naming the key and
//! the two variants.
//!
//! The `get_fields!`, `try_get_fields!` and `set_fields!` macros chain
//! several key/destination pairs in one call.

use crate::convert::{FromJson, ToJson};
use crate::error::{JsonError, Result};
use crate::value::Value;

fn check_kind<T: FromJson>(key: &str, child: &Value) -> Result<()> {
    match T::expected_kind() {
        Some(expected) if expected != child.kind() => {
            Err(JsonError::mismatch(Some(key), expected, child.kind()))
        }
        _ => Ok(()),
    }
}

fn convert<T: FromJson>(key: &str, child: &Value) -> Result<T> {
    check_kind::<T>(key, child)?;
    T::from_json(child).map_err(|err| err.with_key(key))
}

impl Value {
    /// Whether this is an object containing `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.as_object().is_some_and(|map| map.contains_key(key))
    }

    /// Read and convert a required field.
    pub fn get<T: FromJson>(&self, key: &str) -> Result<T> {
        convert(key, self.at(key)?)
    }

    /// [`Value::get`] into an existing destination. On error `dest` is left
    /// unchanged.
    pub fn get_into<T: FromJson>(&self, key: &str, dest: &mut T) -> Result<()> {
        *dest = self.get(key)?;
        Ok(())
    }

    /// Read and convert an optional field. A missing key, or a receiver that
    /// is not an object, gives `Ok(None)`.
    pub fn get_opt<T: FromJson>(&self, key: &str) -> Result<Option<T>> {
        match self.as_object().and_then(|map| map.get(key)) {
            Some(child) => convert(key, child).map(Some),
            None => Ok(None),
        }
    }

    /// Convert `key` into `dest` if present. Returns whether the key was
    /// found; `dest` is only written on success.
    pub fn try_get<T: FromJson>(&self, key: &str, dest: &mut T) -> Result<bool> {
        match self.get_opt(key)? {
            Some(value) => {
                *dest = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Store `value` under `key`, turning the receiver into an object if it
    /// is not one. An existing entry keeps its position.
    pub fn set<T: ToJson>(&mut self, key: &str, value: T) {
        self.object_mut().insert(key, value.to_json());
    }

    /// Like [`Value::set`], but does nothing for `None`.
    pub fn set_opt<T: ToJson>(&mut self, key: &str, value: &Option<T>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }
}

/// Strict read of several fields, stopping at the first error.
///
/// ```
/// use json_core::{get_fields, parse};
///
/// let v = parse(r#"{"name": "Ada", "age": 36}"#).unwrap();
/// let (mut name, mut age) = (String::new(), 0u32);
/// get_fields!(v, "name" => name, "age" => age).unwrap();
/// assert_eq!((name.as_str(), age), ("Ada", 36));
/// ```
#[macro_export]
macro_rules! get_fields {
    ($value:expr, $($key:expr => $dest:expr),+ $(,)?) => {{
        let value: &$crate::Value = &$value;
        (|| -> $crate::Result<()> {
            $( value.get_into($key, &mut $dest)?; )+
            Ok(())
        })()
    }};
}

/// Permissive read of several fields. Every key is attempted; the result is
/// `Ok(true)` only if all of them were present.
#[macro_export]
macro_rules! try_get_fields {
    ($value:expr, $($key:expr => $dest:expr),+ $(,)?) => {{
        let value: &$crate::Value = &$value;
        (|| -> $crate::Result<bool> {
            let mut all_found = true;
            $( all_found &= value.try_get($key, &mut $dest)?; )+
            Ok(all_found)
        })()
    }};
}

/// Store several fields.
#[macro_export]
macro_rules! set_fields {
    ($value:expr, $($key:expr => $src:expr),+ $(,)?) => {{
        let value: &mut $crate::Value = &mut $value;
        $( value.set($key, $src); )+
    }};
}
