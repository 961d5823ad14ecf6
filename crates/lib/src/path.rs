//! Path types for locating nested values.
//!
//! A [`Path`] is the ordered sequence of keys and indices traversed to reach
//! a value from the root of a [`DotMap`](crate::DotMap). Paths are produced
//! by [`find`](crate::DotMap::find) queries and rendered in the familiar
//! dot/bracket notation: dot access for identifier-like keys, bracketed
//! quoted literals for everything else, and bracketed integers for list
//! indices.

use std::fmt;

/// One step of a [`Path`]: either a map key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A key into a map
    Key(String),
    /// An index into a list
    Index(usize),
}

impl Segment {
    /// Returns the key if this segment is a map key
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Index(_) => None,
        }
    }

    /// Returns the index if this segment is a list index
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(index) => Some(*index),
            Segment::Key(_) => None,
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) if is_identifier_like(key) => write!(f, ".{key}"),
            Segment::Key(key) => {
                let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[\"{escaped}\"]")
            }
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Whether a key can be rendered with plain dot notation.
///
/// Matches the identifier shape: a leading ASCII letter or underscore
/// followed by letters, digits, or underscores. Anything else (including the
/// empty string) renders bracketed.
pub fn is_identifier_like(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// An ordered sequence of [`Segment`]s from a map root to a nested value.
///
/// `Display` renders the dot/bracket form; [`Path::segments`] exposes the
/// raw steps for programmatic use.
///
/// # Examples
///
/// ```
/// use dotmap::{Path, Segment};
///
/// let path = Path::from(vec![
///     Segment::from("baz"),
///     Segment::from(0),
///     Segment::from("foo"),
/// ]);
/// assert_eq!(path.to_string(), ".baz[0].foo");
/// assert_eq!(path.segments().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a new empty path (the map root).
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns the raw segments of this path.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of steps in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path refers to the map root.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the final segment, if any.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Returns an iterator over the segments.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Path {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
