//! `value[i]` and `value["key"]`.
//!
//! Reads are strict and panic with the same message the fallible accessors
//! ([`Value::at_index`], [`Value::at`]) return as an error. Writes
//! auto-vivify: indexing a non-array by position turns it into an array and
//! grows it, indexing a non-object by key turns it into an object and inserts
//! `null`. That makes chained construction work on a fresh value:
//!
//! ```
//! use json_core::Value;
//!
//! let mut v = Value::Null;
//! v["servers"][1]["port"] = 8080.into();
//! assert_eq!(v.to_string(), r#"{"servers": [null, {"port": 8080}]}"#);
//! ```

use std::ops::{Index, IndexMut};

use crate::value::Value;

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self.at_index(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.index_or_grow(index)
    }
}

impl<'a> Index<&'a str> for Value {
    type Output = Value;

    fn index(&self, key: &'a str) -> &Value {
        match self.at(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a> IndexMut<&'a str> for Value {
    fn index_mut(&mut self, key: &'a str) -> &mut Value {
        self.key_or_insert(key)
    }
}
