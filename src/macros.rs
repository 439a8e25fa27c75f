//! The [`json!`](crate::json) macro for building [`JsonValue`](crate::JsonValue) trees inline.

/// Builds a [`JsonValue`](crate::JsonValue) from JSON-like syntax.
///
/// Keys must be string literals; values may be literals, nested
/// objects/arrays, or any expression convertible into a `JsonValue`.
/// Non-finite doubles are dropped from objects and arrays, matching the
/// checked mutators.
///
/// # Examples
///
/// ```rust
/// use coffer::json;
///
/// let doc = json!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "json"]
/// });
///
/// assert_eq!(doc.description(), r#"{"name":"Alice","age":30,"tags":["rust","json"]}"#);
/// ```
#[macro_export]
macro_rules! json {
    // Handle null
    (null) => {
        $crate::JsonValue::Null
    };

    // Handle true
    (true) => {
        $crate::JsonValue::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::JsonValue::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::JsonValue::Array($crate::JsonArray::new())
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {{
        let mut array = $crate::JsonArray::new();
        $(
            let _ = array.push($crate::json!($elem));
        )*
        $crate::JsonValue::Array(array)
    }};

    // Handle empty object
    ({}) => {
        $crate::JsonValue::Object($crate::JsonObject::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::JsonObject::new();
        $(
            let _ = object.put($key, $crate::json!($value));
        )*
        $crate::JsonValue::Object(object)
    }};

    // Fallback for any expression convertible into a JsonValue
    ($other:expr) => {
        $crate::JsonValue::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::JsonValue;

    #[test]
    fn test_json_macro_primitives() {
        assert_eq!(json!(null), JsonValue::Null);
        assert_eq!(json!(true), JsonValue::Bool(true));
        assert_eq!(json!(false), JsonValue::Bool(false));
        assert_eq!(json!(42), JsonValue::Int(42));
        assert_eq!(json!(3.5), JsonValue::Double(3.5));
        assert_eq!(json!("hello"), JsonValue::String("hello".to_string()));
    }

    #[test]
    fn test_json_macro_arrays() {
        assert_eq!(json!([]).description(), "[]");

        let arr = json!([1, 2, 3]);
        match arr {
            JsonValue::Array(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items.get_int(0).unwrap(), 1);
                assert_eq!(items.get_int(2).unwrap(), 3);
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_json_macro_objects() {
        assert_eq!(json!({}).description(), "{}");

        let doc = json!({
            "name": "Alice",
            "age": 30
        });

        match doc {
            JsonValue::Object(obj) => {
                assert_eq!(obj.len(), 2);
                assert_eq!(obj.get_string("name").unwrap(), "Alice");
                assert_eq!(obj.get_int("age").unwrap(), 30);
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_json_macro_nesting() {
        let doc = json!({
            "a": [true, null, 2.5],
            "b": { "c": "d" }
        });
        assert_eq!(doc.description(), r#"{"a":[true,null,2.5],"b":{"c":"d"}}"#);
    }
}
