//!
//! Dotmap: an insertion-ordered nested map with attribute-style access.
//!
//! This library provides a single data structure, [`DotMap`], together with the
//! value and query types that surround it.
//!
//! ## Core Concepts
//!
//! * **Maps (`map::DotMap`)**: An insertion-ordered mapping from string keys to
//!   values. Every map is a cheap clone-able handle onto shared storage, so a
//!   map may legally contain itself (directly or through a nested list).
//! * **Values (`value::Value`)**: The variant type stored in maps and lists.
//!   Scalars are stored unchanged; nested plain structures convert recursively
//!   into `DotMap`/`List` on insertion.
//! * **Lists (`list::List`)**: Ordered sequences of values, sharing the same
//!   handle semantics as maps.
//! * **Attribute lookup**: [`DotMap::attr`] resolves identifier-style names
//!   against stored keys, falling back to a fuzzy match where each `_` in the
//!   name stands for a `.` or `-` in the key. A name with no match resolves
//!   to `None` rather than an error.
//! * **Paths (`path::Path`)**: A sequence of keys/indices locating a nested
//!   value, rendered in dot/bracket notation.
//! * **Queries (`find::Find`)**: A lazy depth-first search over the whole
//!   structure, yielding the path of every (key, value) pair accepted by a
//!   pair of predicates.
//!
//! ## Example
//!
//! ```
//! use dotmap::DotMap;
//! use serde_json::json;
//!
//! let map = DotMap::try_from(json!({
//!     "server": {"host-name": "localhost", "port": 8080},
//! }))?;
//!
//! let server = map.attr("server").unwrap().into_map().unwrap();
//! assert_eq!(server.attr("host_name").unwrap(), "localhost"); // fuzzy match
//! assert_eq!(server.attr("port").unwrap(), 8080);
//! assert!(server.attr("missing").is_none());
//! # Ok::<(), dotmap::MapError>(())
//! ```

pub mod errors;
pub mod find;
pub mod list;
pub mod map;
pub mod path;
pub mod value;

pub use errors::MapError;
pub use find::Find;
pub use list::List;
pub use map::DotMap;
pub use path::{Path, Segment};
pub use value::Value;

/// Result type used throughout the dotmap library.
pub type Result<T> = std::result::Result<T, MapError>;
