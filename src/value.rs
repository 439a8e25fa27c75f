//! JSON document tree built on the container framework.
//!
//! [`JsonValue`] is a tagged variant over the eight JSON kinds this crate
//! distinguishes: null, boolean, int (i32), long (i64), double (f64),
//! string, object, and array. A [`JsonObject`] owns an insertion-ordered
//! table of keys (see [`OrderedTable`](crate::OrderedTable)); a [`JsonArray`]
//! owns a [`DynamicArray`](crate::DynamicArray) of elements.
//!
//! Accessors are strict: an absent key fails with `KeyNotFound`, an absent
//! index with `IndexOutOfRange`, and a variant mismatch with `TypeMismatch`.
//! The only implicit numeric coercion is widening — an int is a legal long
//! or double, a long is a legal double, and a double is never legal as an
//! int or long. A stored JSON null is distinct from an absent key and fails
//! every typed accessor; check [`JsonObject::is_null`] first.
//!
//! Nested objects and arrays are owned exclusively by their parent; `put`
//! and `push` take them by value, so inserting an existing tree moves it.
//!
//! ## Examples
//!
//! ```rust
//! use coffer::JsonObject;
//!
//! let obj = JsonObject::parse("{\"a\":1,\"b\":[true,null,2.5]}").unwrap();
//! assert_eq!(obj.get_int("a"), Ok(1));
//!
//! let b = obj.get_array("b").unwrap();
//! assert_eq!(b.get_boolean(0), Ok(true));
//! assert_eq!(b.is_null(1), Ok(true));
//! assert_eq!(b.get_double(2), Ok(2.5));
//! ```

use crate::array::DynamicArray;
use crate::error::{Error, Result};
use crate::options::ParseOptions;
use crate::ordered::OrderedTable;
use crate::{parse, ser};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed JSON value.
///
/// # Examples
///
/// ```rust
/// use coffer::JsonValue;
///
/// let v = JsonValue::from(42);
/// assert!(matches!(v, JsonValue::Int(42)));
/// assert_eq!(v.type_name(), "int");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    Object(JsonObject),
    Array(JsonArray),
}

impl JsonValue {
    /// Returns the name of this value's variant, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Int(_) => "int",
            JsonValue::Long(_) => "long",
            JsonValue::Double(_) => "double",
            JsonValue::String(_) => "string",
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
        }
    }

    /// Returns `true` if the value is the JSON null variant.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Serializes this value to compact JSON text.
    #[must_use]
    pub fn description(&self) -> String {
        ser::to_compact_string(self)
    }
}

// Strict typed extraction shared by JsonObject and JsonArray. Widening only:
// Int -> long/double, Long -> double. Null never matches a typed accessor.
fn expect_bool(value: &JsonValue) -> Result<bool> {
    match value {
        JsonValue::Bool(b) => Ok(*b),
        other => Err(Error::type_mismatch("boolean", other.type_name())),
    }
}

fn expect_int(value: &JsonValue) -> Result<i32> {
    match value {
        JsonValue::Int(i) => Ok(*i),
        other => Err(Error::type_mismatch("int", other.type_name())),
    }
}

fn expect_long(value: &JsonValue) -> Result<i64> {
    match value {
        JsonValue::Int(i) => Ok(i64::from(*i)),
        JsonValue::Long(l) => Ok(*l),
        other => Err(Error::type_mismatch("long", other.type_name())),
    }
}

fn expect_double(value: &JsonValue) -> Result<f64> {
    match value {
        JsonValue::Int(i) => Ok(f64::from(*i)),
        JsonValue::Long(l) => Ok(*l as f64),
        JsonValue::Double(d) => Ok(*d),
        other => Err(Error::type_mismatch("double", other.type_name())),
    }
}

fn expect_str(value: &JsonValue) -> Result<&str> {
    match value {
        JsonValue::String(s) => Ok(s),
        other => Err(Error::type_mismatch("string", other.type_name())),
    }
}

fn expect_object(value: &JsonValue) -> Result<&JsonObject> {
    match value {
        JsonValue::Object(obj) => Ok(obj),
        other => Err(Error::type_mismatch("object", other.type_name())),
    }
}

fn expect_array(value: &JsonValue) -> Result<&JsonArray> {
    match value {
        JsonValue::Array(arr) => Ok(arr),
        other => Err(Error::type_mismatch("array", other.type_name())),
    }
}

fn check_finite(value: &JsonValue) -> Result<()> {
    if let JsonValue::Double(d) = value {
        if !d.is_finite() {
            return Err(Error::type_mismatch("finite double", d));
        }
    }
    Ok(())
}

/// A JSON object: string keys mapped to [`JsonValue`]s, key insertion order
/// preserved for serialization.
///
/// # Examples
///
/// ```rust
/// use coffer::JsonObject;
///
/// let mut obj = JsonObject::new();
/// obj.put("name", "Alice").unwrap();
/// obj.put("age", 30).unwrap();
/// assert_eq!(obj.description(), "{\"name\":\"Alice\",\"age\":30}");
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct JsonObject {
    entries: OrderedTable<String, JsonValue>,
}

impl JsonObject {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        JsonObject {
            entries: OrderedTable::new(),
        }
    }

    /// Parses JSON text whose top-level value must be an object.
    ///
    /// # Errors
    ///
    /// [`Error::JsonParse`] on malformed input or a non-object top level.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_options(text, ParseOptions::default())
    }

    /// Parses with explicit [`ParseOptions`].
    pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Self> {
        match parse::parse_document_with_options(text, options)? {
            JsonValue::Object(obj) => Ok(obj),
            other => Err(Error::parse(
                0,
                format!("expected a JSON object, found {}", other.type_name()),
            )),
        }
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the object holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is present (regardless of the stored
    /// variant).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a reference to the raw value under `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    /// Returns a borrowing iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns a borrowing iterator over `(key, value)` pairs in insertion
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.entries.iter()
    }

    /// Reports whether the value stored under `key` is the JSON null
    /// variant. Distinct from key absence.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn is_null(&self, key: &str) -> Result<bool> {
        match self.entries.get(key) {
            Some(value) => Ok(value.is_null()),
            None => Err(Error::key_not_found(key)),
        }
    }

    fn strict(&self, key: &str) -> Result<&JsonValue> {
        self.entries
            .get(key)
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Returns the boolean stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if absent, [`Error::TypeMismatch`] if the
    /// stored variant is not a boolean.
    pub fn get_boolean(&self, key: &str) -> Result<bool> {
        expect_bool(self.strict(key)?)
    }

    /// Returns the int stored under `key`. Longs and doubles are never
    /// narrowed.
    pub fn get_int(&self, key: &str) -> Result<i32> {
        expect_int(self.strict(key)?)
    }

    /// Returns the long stored under `key`. An int widens to a long.
    pub fn get_long(&self, key: &str) -> Result<i64> {
        expect_long(self.strict(key)?)
    }

    /// Returns the double stored under `key`. Ints and longs widen to a
    /// double.
    pub fn get_double(&self, key: &str) -> Result<f64> {
        expect_double(self.strict(key)?)
    }

    /// Returns the string stored under `key`.
    pub fn get_string(&self, key: &str) -> Result<&str> {
        expect_str(self.strict(key)?)
    }

    /// Returns the object stored under `key`.
    pub fn get_object(&self, key: &str) -> Result<&JsonObject> {
        expect_object(self.strict(key)?)
    }

    /// Returns the array stored under `key`.
    pub fn get_array(&self, key: &str) -> Result<&JsonArray> {
        expect_array(self.strict(key)?)
    }

    /// Inserts or overwrites `key`. A new key is appended to the insertion
    /// order; an overwritten key keeps its position. Inserting an existing
    /// object or array moves it into this object.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if `value` is a non-finite double.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Result<&mut Self> {
        let value = value.into();
        check_finite(&value)?;
        self.entries.insert(key.into(), value);
        Ok(self)
    }

    /// Stores the JSON null variant under `key`, distinct from omitting the
    /// key.
    pub fn put_null(&mut self, key: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), JsonValue::Null);
        self
    }

    pub(crate) fn insert_raw(&mut self, key: String, value: JsonValue) {
        self.entries.insert(key, value);
    }

    /// Serializes this object to compact JSON text, keys in insertion
    /// order.
    #[must_use]
    pub fn description(&self) -> String {
        let mut out = String::new();
        ser::write_object(&mut out, self);
        out
    }
}

impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// A JSON array: an append-only sequence of [`JsonValue`]s.
///
/// # Examples
///
/// ```rust
/// use coffer::JsonArray;
///
/// let arr = JsonArray::parse("[1,2,3]").unwrap();
/// assert_eq!(arr.len(), 3);
/// assert_eq!(arr.get_int(1), Ok(2));
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct JsonArray {
    items: DynamicArray<JsonValue>,
}

impl JsonArray {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        JsonArray {
            items: DynamicArray::new(),
        }
    }

    /// Parses JSON text whose top-level value must be an array.
    ///
    /// # Errors
    ///
    /// [`Error::JsonParse`] on malformed input or a non-array top level.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_options(text, ParseOptions::default())
    }

    /// Parses with explicit [`ParseOptions`].
    pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Self> {
        match parse::parse_document_with_options(text, options)? {
            JsonValue::Array(arr) => Ok(arr),
            other => Err(Error::parse(
                0,
                format!("expected a JSON array, found {}", other.type_name()),
            )),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a reference to the raw value at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.items.get(index).ok()
    }

    /// Returns a borrowing iterator over the elements in index order.
    pub fn iter(&self) -> impl Iterator<Item = &JsonValue> {
        self.items.iter()
    }

    /// Reports whether the value at `index` is the JSON null variant.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn is_null(&self, index: usize) -> Result<bool> {
        Ok(self.items.get(index)?.is_null())
    }

    /// Returns the boolean at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if out of range, [`Error::TypeMismatch`]
    /// if the stored variant is not a boolean.
    pub fn get_boolean(&self, index: usize) -> Result<bool> {
        expect_bool(self.items.get(index)?)
    }

    /// Returns the int at `index`. Longs and doubles are never narrowed.
    pub fn get_int(&self, index: usize) -> Result<i32> {
        expect_int(self.items.get(index)?)
    }

    /// Returns the long at `index`. An int widens to a long.
    pub fn get_long(&self, index: usize) -> Result<i64> {
        expect_long(self.items.get(index)?)
    }

    /// Returns the double at `index`. Ints and longs widen to a double.
    pub fn get_double(&self, index: usize) -> Result<f64> {
        expect_double(self.items.get(index)?)
    }

    /// Returns the string at `index`.
    pub fn get_string(&self, index: usize) -> Result<&str> {
        expect_str(self.items.get(index)?)
    }

    /// Returns the object at `index`.
    pub fn get_object(&self, index: usize) -> Result<&JsonObject> {
        expect_object(self.items.get(index)?)
    }

    /// Returns the array at `index`.
    pub fn get_array(&self, index: usize) -> Result<&JsonArray> {
        expect_array(self.items.get(index)?)
    }

    /// Appends a value. Inserting an existing object or array moves it into
    /// this array.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if `value` is a non-finite double.
    pub fn push(&mut self, value: impl Into<JsonValue>) -> Result<&mut Self> {
        let value = value.into();
        check_finite(&value)?;
        self.items.add(value);
        Ok(self)
    }

    /// Appends the JSON null variant.
    pub fn push_null(&mut self) -> &mut Self {
        self.items.add(JsonValue::Null);
        self
    }

    pub(crate) fn push_raw(&mut self, value: JsonValue) {
        self.items.add(value);
    }

    /// Serializes this array to compact JSON text, elements in index order.
    #[must_use]
    pub fn description(&self) -> String {
        let mut out = String::new();
        ser::write_array(&mut out, self);
        out
    }
}

impl fmt::Debug for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<i8> for JsonValue {
    fn from(value: i8) -> Self {
        JsonValue::Int(i32::from(value))
    }
}

impl From<i16> for JsonValue {
    fn from(value: i16) -> Self {
        JsonValue::Int(i32::from(value))
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Int(value)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Long(value)
    }
}

impl From<u8> for JsonValue {
    fn from(value: u8) -> Self {
        JsonValue::Int(i32::from(value))
    }
}

impl From<u16> for JsonValue {
    fn from(value: u16) -> Self {
        JsonValue::Int(i32::from(value))
    }
}

impl From<u32> for JsonValue {
    fn from(value: u32) -> Self {
        JsonValue::Long(i64::from(value))
    }
}

impl From<f32> for JsonValue {
    fn from(value: f32) -> Self {
        JsonValue::Double(f64::from(value))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Double(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(value: JsonObject) -> Self {
        JsonValue::Object(value)
    }
}

impl From<JsonArray> for JsonValue {
    fn from(value: JsonArray) -> Self {
        JsonValue::Array(value)
    }
}

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Int(i) => serializer.serialize_i32(*i),
            JsonValue::Long(l) => serializer.serialize_i64(*l),
            JsonValue::Double(d) => serializer.serialize_f64(*d),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            JsonValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (key, value) in obj.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct JsonValueVisitor;

        impl<'de> Visitor<'de> for JsonValueVisitor {
            type Value = JsonValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(match i32::try_from(value) {
                    Ok(i) => JsonValue::Int(i),
                    Err(_) => JsonValue::Long(value),
                })
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(l) => match i32::try_from(l) {
                        Ok(i) => JsonValue::Int(i),
                        Err(_) => JsonValue::Long(l),
                    },
                    Err(_) => JsonValue::Double(value as f64),
                })
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Double(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut arr = JsonArray::new();
                while let Some(element) = seq.next_element::<JsonValue>()? {
                    arr.items.add(element);
                }
                Ok(JsonValue::Array(arr))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut obj = JsonObject::new();
                while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
                    obj.entries.insert(key, value);
                }
                Ok(JsonValue::Object(obj))
            }
        }

        deserializer.deserialize_any(JsonValueVisitor)
    }
}
