//! Configuration for JSON parsing.
//!
//! [`ParseOptions`] bounds the resources a hostile or malformed document can
//! consume before the parser gives up.
//!
//! ## Examples
//!
//! ```rust
//! use coffer::{JsonArray, ParseOptions};
//!
//! let options = ParseOptions::new().with_max_depth(4);
//! assert!(JsonArray::parse_with_options("[[[[[1]]]]]", options).is_err());
//! ```

/// Limits applied while parsing a JSON document.
///
/// # Examples
///
/// ```rust
/// use coffer::ParseOptions;
///
/// let options = ParseOptions::default();
/// assert_eq!(options.max_depth(), 128);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
}

impl ParseOptions {
    /// Creates options with the default limits.
    #[must_use]
    pub fn new() -> Self {
        ParseOptions { max_depth: 128 }
    }

    /// Sets the maximum object/array nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the maximum nesting depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
