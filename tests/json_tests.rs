use coffer::{json, Error, JsonArray, JsonObject, JsonValue, ParseOptions};

#[test]
fn test_parse_document_with_mixed_values() {
    let obj = JsonObject::parse(r#"{"a":1,"b":[true,null,2.5]}"#).unwrap();

    let keys: Vec<_> = obj.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(obj.get_int("a").unwrap(), 1);

    let b = obj.get_array("b").unwrap();
    assert_eq!(b.len(), 3);
    assert!(b.get_boolean(0).unwrap());
    assert!(b.is_null(1).unwrap());
    assert_eq!(b.get_double(2).unwrap(), 2.5);
}

#[test]
fn test_parse_top_level_array() {
    let arr = JsonArray::parse("[1,2,3]").unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.get_int(0).unwrap(), 1);
    assert_eq!(arr.get_int(2).unwrap(), 3);
    assert!(matches!(
        arr.get_int(3),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn test_absent_key_vs_wrong_type() {
    let obj = JsonObject::parse(r#"{"n":1,"s":"text"}"#).unwrap();

    assert!(matches!(
        obj.get_string("missing"),
        Err(Error::KeyNotFound { .. })
    ));
    assert!(matches!(
        obj.get_boolean("n"),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        obj.get_int("s"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_explicit_null_is_not_absent() {
    let obj = JsonObject::parse(r#"{"x":null}"#).unwrap();

    assert!(obj.has("x"));
    assert!(obj.is_null("x").unwrap());
    // typed access to an explicit null is a type error, not a missing key
    assert!(matches!(
        obj.get_int("x"),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        obj.is_null("absent"),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_numeric_widening() {
    let obj = JsonObject::parse(r#"{"i":7,"l":3000000000,"d":2.5}"#).unwrap();

    // int widens to long and double
    assert_eq!(obj.get_int("i").unwrap(), 7);
    assert_eq!(obj.get_long("i").unwrap(), 7);
    assert_eq!(obj.get_double("i").unwrap(), 7.0);

    // long widens to double but not down to int
    assert_eq!(obj.get_long("l").unwrap(), 3_000_000_000);
    assert_eq!(obj.get_double("l").unwrap(), 3e9);
    assert!(obj.get_int("l").is_err());

    // double never narrows
    assert_eq!(obj.get_double("d").unwrap(), 2.5);
    assert!(obj.get_int("d").is_err());
    assert!(obj.get_long("d").is_err());
}

#[test]
fn test_build_and_serialize_in_insertion_order() {
    let mut inner = JsonArray::new();
    inner.push(true).unwrap().push(2.5).unwrap();
    inner.push_null();

    let mut obj = JsonObject::new();
    obj.put("b", inner).unwrap();
    obj.put("a", 1).unwrap();

    assert_eq!(obj.description(), r#"{"b":[true,2.5,null],"a":1}"#);
}

#[test]
fn test_serialize_parse_fixed_point() {
    let text = r#"{"a":1,"b":[true,null,2.5],"c":{"d":"e\nf"},"g":9223372036854775807}"#;
    let parsed = JsonObject::parse(text).unwrap();
    let rendered = parsed.description();
    assert_eq!(JsonObject::parse(&rendered).unwrap(), parsed);
    assert_eq!(JsonObject::parse(&rendered).unwrap().description(), rendered);
}

#[test]
fn test_parse_errors_carry_byte_offsets() {
    match JsonObject::parse(r#"{"a":x}"#) {
        Err(Error::JsonParse { offset, .. }) => assert_eq!(offset, 5),
        other => panic!("expected parse error, got {:?}", other),
    }
    match JsonObject::parse(r#"{"a":1"#) {
        Err(Error::JsonParse { offset, .. }) => assert_eq!(offset, 6),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_top_level_type_is_enforced() {
    assert!(JsonObject::parse("[1,2]").is_err());
    assert!(JsonArray::parse(r#"{"a":1}"#).is_err());
    assert!(JsonObject::parse("42").is_err());
}

#[test]
fn test_depth_limit_is_configurable() {
    let options = ParseOptions::new().with_max_depth(3);
    assert!(JsonArray::parse_with_options("[[[1]]]", options).is_ok());
    assert!(JsonArray::parse_with_options("[[[[1]]]]", options).is_err());
}

#[test]
fn test_duplicate_keys_last_wins() {
    let obj = JsonObject::parse(r#"{"k":1,"k":2}"#).unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(obj.get_int("k").unwrap(), 2);
}

#[test]
fn test_non_finite_doubles_are_rejected() {
    let mut obj = JsonObject::new();
    assert!(matches!(
        obj.put("bad", f64::NAN),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(!obj.has("bad"));

    let mut arr = JsonArray::new();
    assert!(arr.push(f64::INFINITY).is_err());
    assert!(arr.is_empty());
}

#[test]
fn test_unicode_strings_round_trip() {
    let obj = JsonObject::parse(r#"{"s":"café 𝄞"}"#).unwrap();
    assert_eq!(obj.get_string("s").unwrap(), "café \u{1D11E}");

    let rendered = obj.description();
    assert_eq!(JsonObject::parse(&rendered).unwrap(), obj);
}

#[test]
fn test_json_macro_builds_equivalent_tree() {
    let built = json!({
        "a": 1,
        "b": [true, null, 2.5]
    });
    let parsed: JsonValue = JsonObject::parse(r#"{"a":1,"b":[true,null,2.5]}"#)
        .unwrap()
        .into();
    assert_eq!(built, parsed);
}

#[test]
fn test_nested_trees_move_into_parents() {
    let mut child = JsonObject::new();
    child.put("x", 1).unwrap();

    let mut parent = JsonObject::new();
    parent.put("child", child).unwrap();

    assert_eq!(parent.get_object("child").unwrap().get_int("x").unwrap(), 1);
    assert_eq!(parent.description(), r#"{"child":{"x":1}}"#);
}

#[test]
fn test_serde_interop() {
    let doc = json!({"a": 1, "b": [true, null]});
    let through: serde_json::Value = serde_json::to_value(&doc).unwrap();
    assert_eq!(through["a"], serde_json::json!(1));

    let back: JsonValue = serde_json::from_value(through).unwrap();
    assert_eq!(back, doc);
}
