//! Error types shared by the container framework and the JSON document model.
//!
//! Every failure in this crate is synchronous and surfaces at the call that
//! detects it; nothing is retried or swallowed internally.
//!
//! ## Error Categories
//!
//! - **Container access**: [`Error::IndexOutOfRange`], [`Error::KeyNotFound`]
//! - **JSON typing**: [`Error::TypeMismatch`] (strict accessors, no implicit
//!   narrowing between number variants)
//! - **Parsing**: [`Error::JsonParse`] with the byte offset of the failure
//! - **Iteration**: [`Error::ConcurrentModification`] (fail-fast cursors),
//!   [`Error::NoSuchElement`] (cursor advanced past its end)
//!
//! ## Examples
//!
//! ```rust
//! use coffer::{JsonObject, Error};
//!
//! let result = JsonObject::parse("{\"a\":");
//! assert!(matches!(result, Err(Error::JsonParse { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all failures the containers and the JSON model can report.
///
/// Each variant carries enough context to pinpoint the offending call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Index outside the valid range of a list or JSON array.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A strict object accessor was invoked with an absent key.
    #[error("missing key \"{key}\"")]
    KeyNotFound { key: String },

    /// A stored value's variant does not match the requested type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// Malformed JSON text; `offset` is the byte position of the failure.
    #[error("malformed JSON at byte {offset}: {msg}")]
    JsonParse { offset: usize, msg: String },

    /// The backing container was structurally modified while a cursor over
    /// it was active.
    #[error("container structurally modified during iteration")]
    ConcurrentModification,

    /// A cursor was advanced past its last element.
    #[error("no more elements")]
    NoSuchElement,
}

impl Error {
    /// Creates an index-out-of-range error for a container of length `len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coffer::Error;
    ///
    /// let err = Error::index_out_of_range(5, 3);
    /// assert!(err.to_string().contains("index 5"));
    /// ```
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    /// Creates a missing-key error for a strict object accessor.
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound {
            key: key.to_string(),
        }
    }

    /// Creates a type-mismatch error from the expected type name and a
    /// description of what was actually stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coffer::Error;
    ///
    /// let err = Error::type_mismatch("int", "string");
    /// assert!(err.to_string().contains("expected int"));
    /// ```
    pub fn type_mismatch(expected: &'static str, found: impl fmt::Display) -> Self {
        Error::TypeMismatch {
            expected,
            found: found.to_string(),
        }
    }

    /// Creates a parse error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coffer::Error;
    ///
    /// let err = Error::parse(12, "unexpected character 'x'");
    /// assert!(err.to_string().contains("byte 12"));
    /// ```
    pub fn parse(offset: usize, msg: impl fmt::Display) -> Self {
        Error::JsonParse {
            offset,
            msg: msg.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
