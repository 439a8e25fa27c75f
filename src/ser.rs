//! Compact JSON serialization.
//!
//! Reproduces a [`JsonValue`] tree as JSON text with no extraneous
//! whitespace: object keys quoted, escaped, and rendered in insertion order;
//! array elements in index order; integers without a decimal point; doubles
//! in shortest round-trip form with a forced `.0` when the digits alone
//! would read as an integer.
//!
//! The escape table matches the parser's: `\" \\ \b \f \n \r \t`, with
//! `\u00XX` for any other control character. `/` is accepted escaped on
//! input but never escaped on output.
//!
//! ## Examples
//!
//! ```rust
//! use coffer::JsonObject;
//!
//! let mut obj = JsonObject::new();
//! obj.put("msg", "line1\nline2").unwrap();
//! obj.put("n", 2.0).unwrap();
//! assert_eq!(obj.description(), "{\"msg\":\"line1\\nline2\",\"n\":2.0}");
//! ```

use crate::value::{JsonArray, JsonObject, JsonValue};
use std::fmt::Write;

/// Serializes a value tree to compact JSON text.
#[must_use]
pub fn to_compact_string(value: &JsonValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

pub(crate) fn write_value(out: &mut String, value: &JsonValue) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Int(i) => {
            let _ = write!(out, "{}", i);
        }
        JsonValue::Long(l) => {
            let _ = write!(out, "{}", l);
        }
        JsonValue::Double(d) => write_double(out, *d),
        JsonValue::String(s) => write_string(out, s),
        JsonValue::Object(obj) => write_object(out, obj),
        JsonValue::Array(arr) => write_array(out, arr),
    }
}

pub(crate) fn write_object(out: &mut String, object: &JsonObject) {
    out.push('{');
    for (i, (key, value)) in object.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(out, key);
        out.push(':');
        write_value(out, value);
    }
    out.push('}');
}

pub(crate) fn write_array(out: &mut String, array: &JsonArray) {
    out.push('[');
    for (i, value) in array.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_value(out, value);
    }
    out.push(']');
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < '\u{0020}' => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

// Rust's f64 Display already produces the shortest representation that
// round-trips; it only needs a marker so the text re-parses as a double.
fn write_double(out: &mut String, value: f64) {
    if !value.is_finite() {
        // unreachable through checked mutators and the parser
        out.push_str("null");
        return;
    }
    let start = out.len();
    let _ = write!(out, "{}", value);
    if !out[start..].contains(['.', 'e', 'E']) {
        out.push_str(".0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;

    fn render(text: &str) -> String {
        parse_document(text).unwrap().description()
    }

    #[test]
    fn compact_output_no_whitespace() {
        assert_eq!(render(" { \"a\" : 1 , \"b\" : [ true , null ] } "),
            "{\"a\":1,\"b\":[true,null]}");
    }

    #[test]
    fn keys_render_in_insertion_order() {
        let mut obj = JsonObject::new();
        obj.put("z", 1).unwrap();
        obj.put("a", 2).unwrap();
        assert_eq!(obj.description(), "{\"z\":1,\"a\":2}");
    }

    #[test]
    fn integers_have_no_decimal_point() {
        assert_eq!(render("[1,2147483648,-7]"), "[1,2147483648,-7]");
    }

    #[test]
    fn doubles_keep_a_decimal_marker() {
        assert_eq!(render("[2.5,2.0,1e3]"), "[2.5,2.0,1000.0]");
        assert_eq!(render("[-0.015]"), "[-0.015]");
    }

    #[test]
    fn strings_escape_canonically() {
        assert_eq!(
            render(r#"["a\"b\\c\/d\b\f\n\r\t"]"#),
            "[\"a\\\"b\\\\c/d\\b\\f\\n\\r\\t\"]"
        );
        // stray control characters fall back to \u00XX
        assert_eq!(render(r#"["\u0001"]"#), "[\"\\u0001\"]");
        // non-ASCII text passes through unescaped
        assert_eq!(render("[\"héllo\"]"), "[\"héllo\"]");
    }

    #[test]
    fn output_matches_serde_json_for_plain_trees() {
        let text = "{\"a\":1,\"b\":[true,null,\"s\"],\"c\":{\"d\":-7}}";
        let ours = render(text);
        let theirs: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(ours, serde_json::to_string(&theirs).unwrap());
    }

    #[test]
    fn empty_containers() {
        assert_eq!(render("{}"), "{}");
        assert_eq!(render("[]"), "[]");
        assert_eq!(render("[{},[]]"), "[{},[]]");
    }
}
