//! Recursive-descent JSON parser.
//!
//! Parses RFC 8259 text from an in-memory string into a [`JsonValue`] tree.
//! Single pass, no backtracking; every failure carries the byte offset at
//! which it was detected.
//!
//! Numbers are classed by shape and range: an integral literal that fits a
//! 32-bit signed range becomes [`JsonValue::Int`], one that fits a 64-bit
//! signed range becomes [`JsonValue::Long`], and anything else (fractional
//! part, exponent, or out of long range) becomes [`JsonValue::Double`].
//!
//! ## Usage
//!
//! Most callers go through [`JsonObject::parse`](crate::JsonObject::parse)
//! or [`JsonArray::parse`](crate::JsonArray::parse); [`parse_document`]
//! accepts any top-level value.
//!
//! ```rust
//! use coffer::{parse_document, JsonValue};
//!
//! assert_eq!(parse_document("true").unwrap(), JsonValue::Bool(true));
//! ```

use crate::error::{Error, Result};
use crate::options::ParseOptions;
use crate::value::{JsonArray, JsonObject, JsonValue};

/// Parses a complete JSON document holding any top-level value.
///
/// # Errors
///
/// [`Error::JsonParse`] with the byte offset of the failure.
pub fn parse_document(text: &str) -> Result<JsonValue> {
    parse_document_with_options(text, ParseOptions::default())
}

/// Parses a complete JSON document with explicit limits.
pub fn parse_document_with_options(text: &str, options: ParseOptions) -> Result<JsonValue> {
    let mut parser = Parser::new(text, options);
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.fail("trailing content after top-level value"));
    }
    Ok(value)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: ParseOptions) -> Self {
        Parser {
            text,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn fail(&self, msg: impl std::fmt::Display) -> Error {
        Error::parse(self.pos, msg)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.fail(format!("expected '{}'", byte as char)))
        }
    }

    fn parse_value(&mut self) -> Result<JsonValue> {
        match self.peek() {
            Some(b'{') => self.parse_object().map(JsonValue::Object),
            Some(b'[') => self.parse_array().map(JsonValue::Array),
            Some(b'"') => self.parse_string().map(JsonValue::String),
            Some(b't') => self.parse_literal("true", JsonValue::Bool(true)),
            Some(b'f') => self.parse_literal("false", JsonValue::Bool(false)),
            Some(b'n') => self.parse_literal("null", JsonValue::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(other) => Err(self.fail(format!("unexpected character '{}'", other as char))),
            None => Err(self.fail("unexpected end of input")),
        }
    }

    fn parse_literal(&mut self, literal: &str, value: JsonValue) -> Result<JsonValue> {
        if self.text[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(self.fail(format!("expected '{}'", literal)))
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.fail(format!("nesting deeper than {} levels", self.max_depth)));
        }
        Ok(())
    }

    fn parse_object(&mut self) -> Result<JsonObject> {
        self.enter()?;
        self.expect(b'{')?;
        let mut object = JsonObject::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(object);
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.fail("expected string key"));
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();
            let value = self.parse_value()?;
            object.insert_raw(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.fail("expected ',' or '}'")),
            }
        }
        self.depth -= 1;
        Ok(object)
    }

    fn parse_array(&mut self) -> Result<JsonArray> {
        self.enter()?;
        self.expect(b'[')?;
        let mut array = JsonArray::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(array);
        }
        loop {
            self.skip_whitespace();
            let value = self.parse_value()?;
            array.push_raw(value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.fail("expected ',' or ']'")),
            }
        }
        self.depth -= 1;
        Ok(array)
    }

    fn parse_string(&mut self) -> Result<String> {
        self.expect(b'"')?;
        let mut out = String::new();
        let mut segment_start = self.pos;
        loop {
            match self.peek() {
                Some(b'"') => {
                    out.push_str(&self.text[segment_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[segment_start..self.pos]);
                    self.pos += 1;
                    self.parse_escape(&mut out)?;
                    segment_start = self.pos;
                }
                Some(byte) if byte < 0x20 => {
                    return Err(self.fail("unescaped control character in string"));
                }
                // bytes >= 0x80 are continuation/lead bytes of valid UTF-8
                Some(_) => self.pos += 1,
                None => return Err(self.fail("unterminated string")),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let escaped = match self.peek() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{0008}',
            Some(b'f') => '\u{000C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.pos += 1;
                return self.parse_unicode_escape(out);
            }
            Some(other) => {
                return Err(self.fail(format!("invalid escape '\\{}'", other as char)));
            }
            None => return Err(self.fail("unterminated string")),
        };
        self.pos += 1;
        out.push(escaped);
        Ok(())
    }

    fn parse_unicode_escape(&mut self, out: &mut String) -> Result<()> {
        let unit = self.read_hex4()?;
        let code_point = match unit {
            0xD800..=0xDBFF => {
                // high surrogate: a \uXXXX low surrogate must follow
                if self.peek() != Some(b'\\') {
                    return Err(self.fail("unpaired surrogate in \\u escape"));
                }
                self.pos += 1;
                if self.peek() != Some(b'u') {
                    return Err(self.fail("unpaired surrogate in \\u escape"));
                }
                self.pos += 1;
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.fail("invalid low surrogate in \\u escape"));
                }
                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.fail("unpaired surrogate in \\u escape"));
            }
            _ => unit,
        };
        match char::from_u32(code_point) {
            Some(ch) => {
                out.push(ch);
                Ok(())
            }
            None => Err(self.fail("invalid \\u escape")),
        }
    }

    fn read_hex4(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(byte @ b'0'..=b'9') => u32::from(byte - b'0'),
                Some(byte @ b'a'..=b'f') => u32::from(byte - b'a') + 10,
                Some(byte @ b'A'..=b'F') => u32::from(byte - b'A') + 10,
                _ => return Err(self.fail("expected 4 hex digits in \\u escape")),
            };
            value = value * 16 + digit;
            self.pos += 1;
        }
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<JsonValue> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.digits()?;
        let mut integral = true;
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            self.digits()?;
        }
        if let Some(b'e' | b'E') = self.peek() {
            integral = false;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            self.digits()?;
        }
        let literal = &self.text[start..self.pos];
        if integral {
            if let Ok(long) = literal.parse::<i64>() {
                return Ok(match i32::try_from(long) {
                    Ok(int) => JsonValue::Int(int),
                    Err(_) => JsonValue::Long(long),
                });
            }
        }
        match literal.parse::<f64>() {
            Ok(double) if double.is_finite() => Ok(JsonValue::Double(double)),
            _ => Err(Error::parse(start, format!("number '{}' out of range", literal))),
        }
    }

    fn digits(&mut self) -> Result<()> {
        match self.peek() {
            Some(b'0'..=b'9') => {
                while let Some(b'0'..=b'9') = self.peek() {
                    self.pos += 1;
                }
                Ok(())
            }
            _ => Err(self.fail("expected digit")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert_eq!(parse_document("null").unwrap(), JsonValue::Null);
        assert_eq!(parse_document("true").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse_document("false").unwrap(), JsonValue::Bool(false));
        assert_eq!(parse_document("42").unwrap(), JsonValue::Int(42));
        assert_eq!(
            parse_document("\"hi\"").unwrap(),
            JsonValue::String("hi".to_string())
        );
    }

    #[test]
    fn number_classing() {
        assert_eq!(parse_document("0").unwrap(), JsonValue::Int(0));
        assert_eq!(parse_document("-17").unwrap(), JsonValue::Int(-17));
        assert_eq!(
            parse_document("2147483647").unwrap(),
            JsonValue::Int(i32::MAX)
        );
        assert_eq!(
            parse_document("2147483648").unwrap(),
            JsonValue::Long(2_147_483_648)
        );
        assert_eq!(
            parse_document("-2147483649").unwrap(),
            JsonValue::Long(-2_147_483_649)
        );
        assert_eq!(
            parse_document("9223372036854775807").unwrap(),
            JsonValue::Long(i64::MAX)
        );
        // past long range falls back to double
        assert_eq!(
            parse_document("9223372036854775808").unwrap(),
            JsonValue::Double(9.223372036854776e18)
        );
        assert_eq!(parse_document("2.5").unwrap(), JsonValue::Double(2.5));
        assert_eq!(parse_document("1e3").unwrap(), JsonValue::Double(1000.0));
        assert_eq!(parse_document("-1.5e-2").unwrap(), JsonValue::Double(-0.015));
    }

    #[test]
    fn string_escapes() {
        let text = r#""a\"b\\c\/d\b\f\n\r\t""#;
        assert_eq!(
            parse_document(text).unwrap(),
            JsonValue::String("a\"b\\c/d\u{8}\u{c}\n\r\t".to_string())
        );
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(
            parse_document(r#""\u0041""#).unwrap(),
            JsonValue::String("A".to_string())
        );
        // surrogate pair for U+1D11E (musical G clef)
        assert_eq!(
            parse_document(r#""\uD834\uDD1E""#).unwrap(),
            JsonValue::String("\u{1D11E}".to_string())
        );
        assert!(parse_document(r#""\uD834""#).is_err());
        assert!(parse_document(r#""\uDD1E""#).is_err());
    }

    #[test]
    fn raw_multibyte_text_passes_through() {
        assert_eq!(
            parse_document("\"héllo … 🎼\"").unwrap(),
            JsonValue::String("héllo … 🎼".to_string())
        );
    }

    #[test]
    fn whitespace_between_tokens_is_insignificant() {
        let value = parse_document(" {\n\t\"a\" : [ 1 ,\r 2 ] } ").unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get_array("a").unwrap().len(), 2);
    }

    #[test]
    fn errors_carry_byte_offsets() {
        match parse_document("{\"a\":x}") {
            Err(Error::JsonParse { offset, .. }) => assert_eq!(offset, 5),
            other => panic!("expected parse error, got {:?}", other),
        }
        match parse_document("[1,2") {
            Err(Error::JsonParse { offset, .. }) => assert_eq!(offset, 4),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_documents() {
        for text in [
            "",
            "{",
            "}",
            "[1,]",
            "{\"a\"}",
            "{\"a\":1,}",
            "{a:1}",
            "\"unterminated",
            "tru",
            "01x",
            "1.",
            "1e",
            "--1",
            "[1] trailing",
            "\"bad\\escape\"",
        ] {
            assert!(
                parse_document(text).is_err(),
                "expected failure for {:?}",
                text
            );
        }
    }

    #[test]
    fn depth_limit_is_enforced() {
        let deep = "[".repeat(200) + &"]".repeat(200);
        assert!(parse_document(&deep).is_err());
        let ok = "[".repeat(100) + &"]".repeat(100);
        assert!(parse_document(&ok).is_ok());

        let shallow = ParseOptions::new().with_max_depth(2);
        assert!(parse_document_with_options("[[1]]", shallow).is_ok());
        assert!(parse_document_with_options("[[[1]]]", shallow).is_err());
    }

    #[test]
    fn huge_exponent_is_out_of_range() {
        assert!(parse_document("1e999").is_err());
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let value = parse_document("{\"k\":1,\"k\":2}").unwrap();
        assert_eq!(value.as_object().unwrap().get_int("k"), Ok(2));
    }
}
