/// Serializer contract tests: compact output, insertion order, escape table,
/// and number formatting that re-parses into the same alternative.
use jsontree::Value;

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn dump_null() {
    assert_eq!(Value::Null.dump(), "null");
    assert_eq!(Value::default().dump(), "null");
}

#[test]
fn dump_integers() {
    assert_eq!(Value::from(0).dump(), "0");
    assert_eq!(Value::from(-7).dump(), "-7");
    assert_eq!(Value::from(u32::MAX).dump(), "4294967295");
    assert_eq!(Value::from(i64::MAX).dump(), "9223372036854775807");
}

#[test]
fn dump_floats_reparse_as_floats() {
    for f in [0.5, -1.25, 1.0, 100.0, 1e-7, 6.02214076e23, f64::MAX, f64::MIN_POSITIVE] {
        let text = Value::from(f).dump();
        let back = Value::parse(&text).unwrap();
        assert_eq!(back, Value::Float(f), "{f} dumped as {text}");
    }
}

#[test]
fn dump_float_shortest_form() {
    assert_eq!(Value::from(0.1).dump(), "0.1");
    assert_eq!(Value::from(1.5f32).dump(), "1.5");
    assert_eq!(Value::from(100.0).dump(), "100.0");
}

// ============================================================================
// Strings and escaping
// ============================================================================

#[test]
fn dump_newline_and_quote_as_two_character_escapes() {
    let text = Value::from("say \"hi\"\nbye").dump();
    assert_eq!(text, r#""say \"hi\"\nbye""#);
    assert!(!text.contains('\n'));
}

#[test]
fn dump_other_control_characters_as_unicode_escapes() {
    assert_eq!(Value::from("\u{8}\u{c}\u{1b}").dump(), r#""\u0008\u000c\u001b""#);
}

#[test]
fn dump_passes_non_ascii_through() {
    assert_eq!(
        Value::from("caf\u{e9} \u{4f60}\u{597d}").dump(),
        "\"caf\u{e9} \u{4f60}\u{597d}\""
    );
}

#[test]
fn dump_does_not_escape_slash() {
    assert_eq!(Value::from("a/b").dump(), r#""a/b""#);
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn dump_is_compact() {
    let v = Value::parse("{ \"a\" : [ 1 , 2 ] ,\n \"b\" : { } }").unwrap();
    assert_eq!(v.dump(), r#"{"a":[1,2],"b":{}}"#);
}

#[test]
fn dump_keeps_insertion_order() {
    let mut v = Value::default();
    v["zeta"].assign(1).unwrap();
    v["alpha"].assign(2).unwrap();
    v["mid"].assign(3).unwrap();
    v["zeta"].assign(4).unwrap();
    assert_eq!(v.dump(), r#"{"zeta":4,"alpha":2,"mid":3}"#);
}

#[test]
fn dump_gap_entries_as_null() {
    let mut v = Value::default();
    v[3].assign("last").unwrap();
    assert_eq!(v.dump(), r#"[null,null,null,"last"]"#);
}

#[test]
fn dump_nested_mixed_tree() {
    let mut v = Value::default();
    v["list"].push(1).unwrap();
    v["list"].push(2.5).unwrap();
    v["list"].push_back().unwrap()["k"].assign(false).unwrap();
    v["empty"] = Value::array();
    assert_eq!(v.dump(), r#"{"list":[1,2.5,{"k":false}],"empty":[]}"#);
}
