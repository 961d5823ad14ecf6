//! The map type with dual key/attribute access.
//!
//! [`DotMap`] is an insertion-ordered mapping from string keys to [`Value`]s.
//! Keys are stored exactly as inserted; values convert recursively on the
//! way in (see [`Value`]). Two access styles coexist:
//!
//! - **Key style** ([`DotMap::get`] / [`DotMap::try_get`]): exact keys only;
//!   the `try_` form reports an absent key as [`MapError::KeyNotFound`].
//! - **Attribute style** ([`DotMap::attr`]): exact match first, then a fuzzy
//!   scan where each `_` in the name stands for a `.` or `-` in the key;
//!   a name with no match resolves to `None`, never an error.
//!
//! Deletion is always exact-key in both styles.
//!
//! Every `DotMap` is a handle onto shared storage: `Clone` shares identity
//! (use [`DotMap::copy`] for a shallow copy with fresh identity), and a map
//! may contain itself through a nested value. The O(1) operations never
//! traverse into stored values, so they tolerate self-reference; only the
//! plain-structure walk needs (and has) cycle detection.

use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;
use tracing::trace;

use crate::{
    MapError,
    find::Find,
    path::Segment,
    value::{Value, Walk},
};

/// Whether an attribute name matches a stored key under the fuzzy rule.
///
/// Anchored whole-string match: every non-underscore character of `name`
/// must equal the key character at the same position, and every `_` in
/// `name` accepts a literal `.` or `-` there — nothing else, not even a
/// literal `_`. A key containing underscores is reachable through the exact
/// lookup that runs before this.
///
/// # Examples
///
/// ```
/// # use dotmap::map::fuzzy_matches;
/// assert!(fuzzy_matches("test_key", "test-key"));
/// assert!(fuzzy_matches("test_key", "test.key"));
/// assert!(!fuzzy_matches("test_key", "test_key")); // `_` is not in the class
/// assert!(!fuzzy_matches("test_key", "test/key"));
/// assert!(!fuzzy_matches("test_key", "test-key-2")); // not a prefix match
/// ```
pub fn fuzzy_matches(name: &str, key: &str) -> bool {
    let mut key_chars = key.chars();
    for n in name.chars() {
        match key_chars.next() {
            Some(k) if n == '_' => {
                if !matches!(k, '.' | '-') {
                    return false;
                }
            }
            Some(k) => {
                if n != k {
                    return false;
                }
            }
            None => return false,
        }
    }
    key_chars.next().is_none()
}

/// Insertion-ordered map with dual key/attribute access.
///
/// # Handle Semantics
///
/// `DotMap` is a cheap clone-able handle: `Clone` shares the underlying
/// storage and all mutating operations take `&self`. This is what allows a
/// map to contain itself — the nested occurrence is another handle onto the
/// same node. [`DotMap::ptr_eq`] tests identity; `==` tests structure (with
/// an identity short-circuit so self-referential comparisons terminate).
///
/// The handles are reference-counted and single-threaded; callers needing
/// cross-thread sharing must wrap externally.
///
/// Formatting (`Display` and the derived `Debug`) walks the whole
/// structure without a cycle guard; do not format a self-referential map.
/// [`DotMap::to_plain`] is the guarded way to render one.
///
/// # Examples
///
/// ```
/// use dotmap::DotMap;
/// use serde_json::json;
///
/// let map = DotMap::try_from(json!({"a": {"x": 1}, "b": [{"w": 1}, 2]}))?;
///
/// // Nested plain structures were converted on the way in
/// let a = map.attr("a").unwrap().into_map().unwrap();
/// assert_eq!(a.attr("x").unwrap(), 1);
///
/// let b = map.attr("b").unwrap().into_list().unwrap();
/// assert_eq!(b.get(0).unwrap().into_map().unwrap().attr("w").unwrap(), 1);
/// assert_eq!(b.get(1).unwrap(), 2);
/// # Ok::<(), dotmap::MapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DotMap {
    entries: Rc<RefCell<IndexMap<String, Value>>>,
}

impl DotMap {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(IndexMap::new())),
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns true if both handles share the same storage
    pub fn ptr_eq(&self, other: &DotMap) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    /// Returns true if the map contains the exact key
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.entries.borrow().contains_key(key.as_ref())
    }

    /// Gets a value by exact key
    pub fn get(&self, key: impl AsRef<str>) -> Option<Value> {
        self.entries.borrow().get(key.as_ref()).cloned()
    }

    /// Gets a value by exact key, reporting an absent key as an error.
    ///
    /// This is the key-style read: unlike [`DotMap::attr`] it never falls
    /// back to fuzzy matching and an absent key is a failure, not `None`.
    pub fn try_get(&self, key: impl AsRef<str>) -> crate::Result<Value> {
        let key = key.as_ref();
        self.get(key).ok_or_else(|| MapError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Gets a value by attribute name.
    ///
    /// Resolution order:
    /// 1. an exact key match always wins;
    /// 2. otherwise keys are scanned in insertion order and the first whose
    ///    whole string satisfies [`fuzzy_matches`] is returned;
    /// 3. otherwise `None` — the absent-value sentinel. Attribute reads
    ///    never produce an error.
    pub fn attr(&self, name: impl AsRef<str>) -> Option<Value> {
        let name = name.as_ref();
        let entries = self.entries.borrow();
        if let Some(value) = entries.get(name) {
            return Some(value.clone());
        }
        if !name.contains('_') {
            return None;
        }
        entries
            .iter()
            .find(|(key, _)| fuzzy_matches(name, key))
            .map(|(_, value)| value.clone())
    }

    /// Sets a value, returning the previous value if the key was present.
    ///
    /// Both access styles converge here; the value converts through
    /// `Into<Value>` on the way in. An existing key keeps its position; a
    /// new key appends at the end.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        trace!(key = %key, "map set");
        self.entries.borrow_mut().insert(key, value.into())
    }

    /// Removes a key, returning its value if it was present.
    ///
    /// Exact key only — deletion never uses the fuzzy rule. Later entries
    /// shift down, so a removed-and-reinserted key moves to the end.
    pub fn remove(&self, key: impl AsRef<str>) -> Option<Value> {
        let key = key.as_ref();
        trace!(key = %key, "map remove");
        self.entries.borrow_mut().shift_remove(key)
    }

    /// Removes a key, reporting an absent key as an error
    pub fn try_remove(&self, key: impl AsRef<str>) -> crate::Result<Value> {
        let key = key.as_ref();
        self.remove(key).ok_or_else(|| MapError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Removes all entries
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Returns the keys in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Returns clones of the values in insertion order
    pub fn values(&self) -> Vec<Value> {
        self.entries.borrow().values().cloned().collect()
    }

    /// Returns an iterator over (key, value) clones in insertion order.
    ///
    /// The map is snapshotted when the iterator is created; mutations made
    /// while iterating are not observed.
    pub fn iter(&self) -> impl Iterator<Item = (String, Value)> {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Returns a shallow copy with fresh identity.
    ///
    /// Top-level entries are cloned; nested maps and lists stay shared by
    /// handle with the original, matching ordinary shallow-copy semantics.
    /// Contrast with `Clone`, which shares the top-level storage too.
    pub fn copy(&self) -> DotMap {
        DotMap {
            entries: Rc::new(RefCell::new(self.entries.borrow().clone())),
        }
    }

    /// Gets a value by exact key with automatic type conversion.
    ///
    /// Returns `None` if the key is absent or the value has the wrong type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dotmap::DotMap;
    /// let map = DotMap::new();
    /// map.set("name", "Alice");
    /// map.set("age", 30);
    ///
    /// assert_eq!(map.get_as::<String>("name"), Some("Alice".to_string()));
    /// assert_eq!(map.get_as::<i64>("age"), Some(30));
    /// assert_eq!(map.get_as::<i64>("name"), None);
    /// assert_eq!(map.get_as::<i64>("missing"), None);
    /// ```
    pub fn get_as<T>(&self, key: impl AsRef<str>) -> Option<T>
    where
        T: for<'v> TryFrom<&'v Value, Error = MapError>,
    {
        let value = self.get(key)?;
        T::try_from(&value).ok()
    }

    /// Builder method to set a value and return self
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Starts a recursive query over this map.
    ///
    /// See [`Find`] for predicates, depth limiting, and traversal order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dotmap::DotMap;
    /// # use serde_json::json;
    /// let map = DotMap::try_from(json!({
    ///     "foo": 1,
    ///     "bar": {"fee": 2},
    /// }))?;
    ///
    /// let hits: Vec<String> = map.find().value(2).into_iter()
    ///     .map(|p| p.to_string())
    ///     .collect();
    /// assert_eq!(hits, vec![".bar.fee"]);
    /// # Ok::<(), dotmap::MapError>(())
    /// ```
    pub fn find(&self) -> Find {
        Find::new(self.clone())
    }

    /// Converts this map into a plain `serde_json::Value` tree.
    ///
    /// Every nested map becomes a plain object (same key order) and every
    /// list a plain array, recursively; scalars carry over unchanged. The
    /// result shares nothing with the original. A self-referential
    /// structure fails with [`MapError::CyclicStructure`] naming the path
    /// where the cycle closed.
    pub fn to_plain(&self) -> crate::Result<serde_json::Value> {
        self.plain(&mut Walk::default())
    }

    pub(crate) fn plain(&self, walk: &mut Walk) -> crate::Result<serde_json::Value> {
        walk.enter(self.node_id())?;
        let entries = self.entries.borrow();
        let mut out = serde_json::Map::with_capacity(entries.len());
        for (key, value) in entries.iter() {
            walk.descend(Segment::Key(key.clone()));
            let plain = value.plain(walk);
            walk.ascend();
            out.insert(key.clone(), plain?);
        }
        drop(entries);
        walk.leave(self.node_id());
        Ok(serde_json::Value::Object(out))
    }

    /// Stable identity of the underlying storage, for cycle detection
    pub(crate) fn node_id(&self) -> usize {
        Rc::as_ptr(&self.entries) as usize
    }
}

impl Default for DotMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality (order-insensitive), with a handle-identity
/// short-circuit so comparisons across a self-reference terminate when both
/// sides reach the same node.
impl PartialEq for DotMap {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let a = self.entries.borrow();
        let b = other.entries.borrow();
        a.len() == b.len()
            && a.iter()
                .all(|(key, value)| b.get(key).is_some_and(|w| value == w))
    }
}

/// Structural comparison against a plain JSON object, key set and values
/// alike. The JSON side is a finite tree, so this terminates even when the
/// map is self-referential.
impl PartialEq<serde_json::Value> for DotMap {
    fn eq(&self, other: &serde_json::Value) -> bool {
        match other {
            serde_json::Value::Object(object) => {
                self.len() == object.len()
                    && object
                        .iter()
                        .all(|(key, v)| self.get(key).is_some_and(|value| value == *v))
            }
            _ => false,
        }
    }
}

impl PartialEq<DotMap> for serde_json::Value {
    fn eq(&self, other: &DotMap) -> bool {
        other == self
    }
}

impl fmt::Display for DotMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl<K, V> FromIterator<(K, V)> for DotMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let map = DotMap::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<K, V> Extend<(K, V)> for DotMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for DotMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for DotMap {
    fn from(object: serde_json::Map<String, serde_json::Value>) -> Self {
        object
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    }
}

/// Conversion from a plain JSON tree; fails unless the root is an object.
/// Nested objects and arrays convert recursively per [`Value`]'s rule.
impl TryFrom<serde_json::Value> for DotMap {
    type Error = MapError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(object) => Ok(DotMap::from(object)),
            other => Err(MapError::TypeMismatch {
                expected: "object".to_string(),
                actual: match other {
                    serde_json::Value::Null => "null",
                    serde_json::Value::Bool(_) => "bool",
                    serde_json::Value::Number(_) => "number",
                    serde_json::Value::String(_) => "string",
                    serde_json::Value::Array(_) => "array",
                    serde_json::Value::Object(_) => unreachable!(),
                }
                .to_string(),
            }),
        }
    }
}

// Serde support: serialization goes through the guarded plain-structure
// walk (a cyclic map surfaces as a serializer error); deserialization
// repopulates a fresh map entry by entry, so nested conversion reapplies.
impl serde::Serialize for DotMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error;
        self.to_plain()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for DotMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = DotMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of string keys to values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<DotMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let map = DotMap::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    map.set(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
