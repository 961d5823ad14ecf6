//! Error types for map operations.
//!
//! This module defines the structured error type shared by all fallible
//! operations in the crate: key-style access, typed extraction, and
//! conversion of self-referential structures to plain form.

use thiserror::Error;

/// Structured error type for map operations.
///
/// Attribute-style reads never produce these errors; they resolve absent
/// names to `None` instead. Key-style access and plain-structure conversion
/// report failures through this enum.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// Key-style get or delete on a key that is not present
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// Plain-structure conversion reached a node that is its own ancestor
    #[error("cyclic structure detected at {path}")]
    CyclicStructure { path: String },

    /// Typed extraction against the wrong value variant
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// List index outside the current bounds
    #[error("list index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl MapError {
    /// Check if this error indicates a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::KeyNotFound { .. })
    }

    /// Check if this error indicates a self-referential structure.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, MapError::CyclicStructure { .. })
    }

    /// Check if this error indicates a type mismatch.
    pub fn is_type_error(&self) -> bool {
        matches!(self, MapError::TypeMismatch { .. })
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            MapError::KeyNotFound { key } => Some(key),
            _ => None,
        }
    }

    /// Get the rendered path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            MapError::CyclicStructure { path } => Some(path),
            _ => None,
        }
    }
}
