//! Ordered sequence type for dotmap structures.
//!
//! [`List`] is the sequence counterpart of [`DotMap`](crate::DotMap): an
//! ordered collection of [`Value`]s behind a shared handle. Cloning a `List`
//! clones the handle, not the storage, so a list fetched out of a map stays
//! connected to it and a list may legally contain an ancestor map.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    MapError,
    path::Segment,
    value::{Value, Walk},
};

/// Ordered sequence of values behind a shared handle.
///
/// All mutating operations take `&self`; the storage lives in a
/// reference-counted cell and every handle sees every mutation. Use
/// [`List::ptr_eq`] to test whether two handles share storage.
///
/// As with [`DotMap`](crate::DotMap), formatting (`Display`/`Debug`) walks
/// the structure without a cycle guard; do not format a list containing an
/// ancestor.
///
/// # Examples
///
/// ```
/// use dotmap::List;
///
/// let list = List::new();
/// list.push("first");
/// list.push(2);
///
/// let alias = list.clone();
/// alias.push(false);
/// assert_eq!(list.len(), 3);
/// assert!(list.ptr_eq(&alias));
/// ```
#[derive(Debug, Clone)]
pub struct List {
    items: Rc<RefCell<Vec<Value>>>,
}

impl List {
    /// Creates a new empty list
    pub fn new() -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns the number of items in the list
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Returns true if the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Returns true if both handles share the same storage
    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }

    /// Pushes a value to the end of the list.
    /// Returns the index of the newly added element.
    pub fn push(&self, value: impl Into<Value>) -> usize {
        let mut items = self.items.borrow_mut();
        items.push(value.into());
        items.len() - 1
    }

    /// Inserts a value at a specific index
    pub fn insert(&self, index: usize, value: impl Into<Value>) -> crate::Result<()> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        if index > len {
            return Err(MapError::IndexOutOfBounds { index, len });
        }
        items.insert(index, value.into());
        Ok(())
    }

    /// Gets a value by index (0-based)
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    /// Returns the first value, if any
    pub fn first(&self) -> Option<Value> {
        self.items.borrow().first().cloned()
    }

    /// Returns the last value, if any
    pub fn last(&self) -> Option<Value> {
        self.items.borrow().last().cloned()
    }

    /// Sets a value at a specific index, returns the old value if present
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let mut items = self.items.borrow_mut();
        let slot = items.get_mut(index)?;
        Some(std::mem::replace(slot, value.into()))
    }

    /// Removes and returns the value at a specific index, shifting later
    /// elements down
    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut items = self.items.borrow_mut();
        if index < items.len() {
            Some(items.remove(index))
        } else {
            None
        }
    }

    /// Clears all items from the list
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }

    /// Returns an iterator over clones of the values in order.
    ///
    /// The list is snapshotted when the iterator is created; mutations made
    /// while iterating are not observed.
    pub fn iter(&self) -> impl Iterator<Item = Value> {
        self.to_vec().into_iter()
    }

    /// Copies the values into a plain `Vec`
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    /// Appends every item of an iterator
    pub fn extend<T: Into<Value>>(&self, iter: impl IntoIterator<Item = T>) {
        let mut items = self.items.borrow_mut();
        items.extend(iter.into_iter().map(Into::into));
    }

    /// Converts this list into a plain `serde_json::Value` array.
    ///
    /// See [`Value::to_plain`] for the cycle-detection contract.
    pub fn to_plain(&self) -> crate::Result<serde_json::Value> {
        self.plain(&mut Walk::default())
    }

    pub(crate) fn plain(&self, walk: &mut Walk) -> crate::Result<serde_json::Value> {
        walk.enter(self.node_id())?;
        let items = self.items.borrow();
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            walk.descend(Segment::Index(index));
            let plain = item.plain(walk);
            walk.ascend();
            out.push(plain?);
        }
        drop(items);
        walk.leave(self.node_id());
        Ok(serde_json::Value::Array(out))
    }

    /// Stable identity of the underlying storage, for cycle detection
    pub(crate) fn node_id(&self) -> usize {
        Rc::as_ptr(&self.items) as usize
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality with a handle-identity short-circuit, so comparing a
/// list against itself through another handle terminates even when the list
/// contains an ancestor.
impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        *self.items.borrow() == *other.items.borrow()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.to_vec().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

impl<T: Into<Value>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let list = List::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}

impl<T: Into<Value>> From<Vec<T>> for List {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

// Custom serde implementation: serialization goes through the guarded
// plain-structure walk; deserialization repopulates a fresh list so nested
// conversion reapplies.
impl serde::Serialize for List {
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

impl<'de> serde::Deserialize<'de> for List {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{SeqAccess, Visitor};

        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = List;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of values")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<List, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let list = List::new();
                while let Some(item) = seq.next_element::<Value>()? {
                    list.push(item);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(ListVisitor)
    }
}
