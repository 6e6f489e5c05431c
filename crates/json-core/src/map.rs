//! Object storage.
//!
//! By default entries keep insertion order (an `IndexMap`, so lookups are
//! hashed and never need a positional cache). Enabling the `sort-keys`
//! feature switches the storage to a `BTreeMap`, which keeps keys sorted and
//! makes serialized output independent of construction order.

use std::fmt;

use crate::value::Value;

#[cfg(not(feature = "sort-keys"))]
mod storage {
    pub use indexmap::map::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
    pub type Inner = indexmap::IndexMap<String, crate::value::Value>;
}

#[cfg(feature = "sort-keys")]
mod storage {
    pub use std::collections::btree_map::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
    pub type Inner = std::collections::BTreeMap<String, crate::value::Value>;
}

pub type Iter<'a> = storage::Iter<'a, String, Value>;
pub type IterMut<'a> = storage::IterMut<'a, String, Value>;
pub type IntoIter = storage::IntoIter<String, Value>;
pub type Keys<'a> = storage::Keys<'a, String, Value>;
pub type Values<'a> = storage::Values<'a, String, Value>;
pub type ValuesMut<'a> = storage::ValuesMut<'a, String, Value>;

/// String-keyed mapping held by [`Value::Object`]. Keys are unique.
#[derive(Clone, Default, PartialEq)]
pub struct Map {
    inner: storage::Inner,
}

impl Map {
    pub fn new() -> Self {
        Map {
            inner: storage::Inner::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.inner.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Insert or overwrite an entry. Overwriting keeps the entry's original
    /// position; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.insert(key.into(), value)
    }

    /// Remove an entry, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        #[cfg(not(feature = "sort-keys"))]
        {
            self.inner.shift_remove(key)
        }
        #[cfg(feature = "sort-keys")]
        {
            self.inner.remove(key)
        }
    }

    /// Mutable handle to the entry for `key`, inserting `null` first if the
    /// key is missing.
    pub fn entry_or_null(&mut self, key: &str) -> &mut Value {
        self.inner.entry(key.to_string()).or_insert(Value::Null)
    }

    pub fn iter(&self) -> Iter<'_> {
        self.inner.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        self.inner.iter_mut()
    }

    pub fn keys(&self) -> Keys<'_> {
        self.inner.keys()
    }

    pub fn values(&self) -> Values<'_> {
        self.inner.values()
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_> {
        self.inner.values_mut()
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>> Extend<(K, Value)> for Map {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.inner.insert(key.into(), value);
        }
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a mut Map {
    type Item = (&'a String, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> IterMut<'a> {
        self.inner.iter_mut()
    }
}
