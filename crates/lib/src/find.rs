//! Recursive path queries over dotmap structures.
//!
//! [`Find`] is a small builder started by [`DotMap::find`]: it carries a key
//! predicate, a value predicate, and an optional depth limit, and iterates
//! lazily over the paths of every (key, value) pair both predicates accept.
//!
//! # Traversal order
//!
//! Depth-first, pre-order. For a map, each key is tested and then its value
//! is recursed into before the next key. For a list, each element is tested
//! with the nearest ancestor *key* as the key-predicate argument (the key
//! that owns the list), then recursed into.
//!
//! # Depth limiting
//!
//! With `max_depth(n)`, a pair is yielded — and recursion continues — only
//! while the path stays within `n` steps; `max_depth(0)` yields nothing.
//! The limit is also the way to run a query over a self-referential
//! structure, which an unbounded traversal would descend forever.
//!
//! # Examples
//!
//! ```
//! use dotmap::DotMap;
//! use serde_json::json;
//!
//! let map = DotMap::try_from(json!({
//!     "foo": 1,
//!     "bar": {"fee": 2},
//!     "baz": [{"foo": 1, "bar": 2}],
//! }))?;
//!
//! let paths: Vec<String> = map.find().key("foo").into_iter()
//!     .map(|p| p.to_string())
//!     .collect();
//! assert_eq!(paths, vec![".foo", ".baz[0].foo"]);
//! # Ok::<(), dotmap::MapError>(())
//! ```

use crate::{map::DotMap, path::Path, value::Value};

/// Predicate over candidate keys.
///
/// The tagged form keeps the common cases (`Any`, literal equality) free of
/// allocation and keeps custom logic explicit.
pub enum KeyFilter {
    /// Accept every key
    Any,
    /// Accept keys equal to the literal
    Equals(String),
    /// Custom predicate over the key and the candidate's full path
    Where(Box<dyn Fn(&str, &Path) -> bool>),
}

impl KeyFilter {
    fn accepts(&self, key: &str, path: &Path) -> bool {
        match self {
            KeyFilter::Any => true,
            KeyFilter::Equals(literal) => key == literal,
            KeyFilter::Where(predicate) => predicate(key, path),
        }
    }
}

/// Predicate over candidate values.
pub enum ValueFilter {
    /// Accept every value
    Any,
    /// Accept values equal to the literal
    Equals(Value),
    /// Custom predicate over the value and the candidate's full path
    Where(Box<dyn Fn(&Value, &Path) -> bool>),
}

impl ValueFilter {
    fn accepts(&self, value: &Value, path: &Path) -> bool {
        match self {
            ValueFilter::Any => true,
            ValueFilter::Equals(literal) => value == literal,
            ValueFilter::Where(predicate) => predicate(value, path),
        }
    }
}

/// A recursive query over a map, built with [`DotMap::find`].
///
/// Both predicates default to match-anything, so an unconstrained `find()`
/// enumerates every reachable (key, value) pair in traversal order. A pair
/// is yielded only when *both* predicates accept it.
pub struct Find {
    root: DotMap,
    key: KeyFilter,
    value: ValueFilter,
    max_depth: Option<usize>,
}

impl Find {
    pub(crate) fn new(root: DotMap) -> Self {
        Self {
            root,
            key: KeyFilter::Any,
            value: ValueFilter::Any,
            max_depth: None,
        }
    }

    /// Accept only keys equal to the literal
    pub fn key(mut self, literal: impl Into<String>) -> Self {
        self.key = KeyFilter::Equals(literal.into());
        self
    }

    /// Accept keys by custom predicate; receives the key and the
    /// candidate's full path (ending in the candidate's own segment)
    pub fn key_where(mut self, predicate: impl Fn(&str, &Path) -> bool + 'static) -> Self {
        self.key = KeyFilter::Where(Box::new(predicate));
        self
    }

    /// Accept only values equal to the literal
    pub fn value(mut self, literal: impl Into<Value>) -> Self {
        self.value = ValueFilter::Equals(literal.into());
        self
    }

    /// Accept values by custom predicate; receives the value and the
    /// candidate's full path
    pub fn value_where(mut self, predicate: impl Fn(&Value, &Path) -> bool + 'static) -> Self {
        self.value = ValueFilter::Where(Box::new(predicate));
        self
    }

    /// Limit the traversal to paths of at most `depth` steps.
    ///
    /// `max_depth(0)` yields nothing; `max_depth(1)` restricts to top-level
    /// pairs.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Runs the query, returning the lazy path iterator.
    ///
    /// Equivalent to `into_iter()`; named for call-chain readability.
    pub fn paths(self) -> FindIter {
        self.into_iter()
    }
}

impl IntoIterator for Find {
    type Item = Path;
    type IntoIter = FindIter;

    fn into_iter(self) -> Self::IntoIter {
        let mut stack = Vec::new();
        if self.max_depth != Some(0) {
            seed_map_children(&mut stack, &self.root, &Path::new());
        }
        FindIter {
            key: self.key,
            value: self.value,
            max_depth: self.max_depth,
            stack,
        }
    }
}

/// One pending candidate: the pair to test plus everything needed to expand
/// its children.
struct Visit {
    /// Full path of the candidate, ending in its own segment
    path: Path,
    /// Key-predicate argument: the candidate's own key, or for list
    /// elements the nearest ancestor key (the key that owns the list)
    key: String,
    value: Value,
}

/// Lazy depth-first iterator over matching paths.
///
/// Candidates are expanded on demand, so on large structures a query that
/// stops early does not pay for the rest of the tree.
pub struct FindIter {
    key: KeyFilter,
    value: ValueFilter,
    max_depth: Option<usize>,
    stack: Vec<Visit>,
}

impl Iterator for FindIter {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        while let Some(visit) = self.stack.pop() {
            // Expand children before testing, keeping pre-order: children
            // land above this candidate's remaining siblings on the stack.
            let within_depth = self.max_depth.is_none_or(|max| visit.path.len() < max);
            if within_depth {
                match &visit.value {
                    Value::Map(map) => seed_map_children(&mut self.stack, map, &visit.path),
                    Value::List(list) => {
                        let items: Vec<Value> = list.to_vec();
                        for (index, item) in items.into_iter().enumerate().rev() {
                            self.stack.push(Visit {
                                path: visit.path.child(index),
                                key: visit.key.clone(),
                                value: item,
                            });
                        }
                    }
                    _ => {}
                }
            }

            if self.key.accepts(&visit.key, &visit.path)
                && self.value.accepts(&visit.value, &visit.path)
            {
                return Some(visit.path);
            }
        }
        None
    }
}

/// Pushes a map's entries in reverse so the first key is popped first.
fn seed_map_children(stack: &mut Vec<Visit>, map: &DotMap, path: &Path) {
    let entries: Vec<(String, Value)> = map.iter().collect();
    for (key, value) in entries.into_iter().rev() {
        stack.push(Visit {
            path: path.child(key.as_str()),
            key,
            value,
        });
    }
}
