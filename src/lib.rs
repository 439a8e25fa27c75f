//! # coffer
//!
//! Growable containers with fail-fast cursors, plus a JSON document model
//! built on top of them.
//!
//! ## What is coffer?
//!
//! coffer provides a small family of collection types whose mutation rules
//! are explicit and observable: every structural change bumps an internal
//! modification counter, and detached cursors notice stale counters instead
//! of silently walking freed or shifted elements. On top of the containers
//! sits a strict JSON layer: an insertion-ordered [`JsonObject`], a
//! [`JsonArray`], an RFC 8259 parser with byte-offset error reporting, and a
//! compact serializer.
//!
//! ## Key Features
//!
//! - **Fail-fast iteration**: cursors detect structural modification of the
//!   underlying container and report it as an error rather than undefined
//!   traversal order
//! - **Strict JSON accessors**: every typed getter distinguishes "absent
//!   key", "explicit null", and "wrong type" as separate errors
//! - **Deterministic output**: object keys serialize in insertion order, so
//!   equal documents produce byte-identical text
//! - **Serde Compatible**: [`JsonValue`] implements `Serialize` and
//!   `Deserialize` for interop with the wider serde ecosystem
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! coffer = "0.1"
//! ```
//!
//! ### Parsing and Reading a Document
//!
//! ```rust
//! use coffer::JsonObject;
//!
//! let obj = JsonObject::parse(r#"{"name":"Alice","age":30,"tags":["a","b"]}"#).unwrap();
//!
//! assert_eq!(obj.get_string("name").unwrap(), "Alice");
//! assert_eq!(obj.get_int("age").unwrap(), 30);
//! assert_eq!(obj.get_array("tags").unwrap().len(), 2);
//!
//! // Absent keys and wrong types are distinct errors:
//! assert!(obj.get_string("missing").is_err());
//! assert!(obj.get_boolean("age").is_err());
//! ```
//!
//! ### Building a Document
//!
//! ```rust
//! use coffer::{JsonArray, JsonObject};
//!
//! let mut tags = JsonArray::new();
//! tags.push("rust").unwrap();
//! tags.push("json").unwrap();
//!
//! let mut obj = JsonObject::new();
//! obj.put("name", "Alice").unwrap();
//! obj.put("age", 30).unwrap();
//! obj.put("tags", tags).unwrap();
//!
//! assert_eq!(obj.description(), r#"{"name":"Alice","age":30,"tags":["rust","json"]}"#);
//! ```
//!
//! ### Fail-Fast Cursors
//!
//! ```rust
//! use coffer::{DynamicArray, Error};
//!
//! let mut array: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
//! let mut cursor = array.cursor();
//!
//! assert_eq!(cursor.next(&array).unwrap(), &1);
//! array.add(4); // structural modification
//! assert!(matches!(cursor.next(&array), Err(Error::ConcurrentModification)));
//! ```
//!
//! ## Performance Characteristics
//!
//! - **DynamicArray**: O(1) amortized append, O(n) insert/remove at an
//!   arbitrary index
//! - **HashTable**: O(1) average lookup/insert/remove with separate chaining
//!   and a 3/4 load factor
//! - **Parsing**: single pass over the input bytes
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All array indexing is bounds-checked
//! - Proper error propagation with `Result` types
//! - No panics in the public API (except for logic errors that indicate bugs)

pub mod array;
pub mod error;
pub mod macros;
pub mod options;
pub mod ordered;
pub mod parse;
pub mod ser;
pub mod set;
pub mod sort;
pub mod sync;
pub mod table;
pub mod time;
pub mod value;

pub use array::{ArrayCursor, DynamicArray, SubList};
pub use error::{Error, Result};
pub use options::ParseOptions;
pub use ordered::OrderedTable;
pub use parse::{parse_document, parse_document_with_options};
pub use ser::to_compact_string;
pub use set::{DerivedSet, SetCursor};
pub use sort::{sort, sorted, Comparator};
pub use sync::{Executor, Monitor, ThreadExecutor};
pub use table::{HashTable, TableCursor};
pub use time::DateTime;
pub use value::{JsonArray, JsonObject, JsonValue};

use std::hash::{Hash, Hasher};

/// Hashes a value with a fixed, unkeyed hasher.
///
/// The containers cache keyed `ahash` hashes internally for bucket
/// placement, but `hash_code` results must agree between two containers
/// holding equal elements, so they go through this helper instead.
pub(crate) fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
