/// Property-Based Roundtrip Tests
///
/// Uses the `proptest` crate to generate random trees and verify that
/// `parse(dump(v)) == v` and `dump(parse(dump(v))) == dump(v)` hold for all
/// generated inputs, and that serde_json reads our output the same way.
///
/// Strategies generate:
/// - Arbitrary strings (control characters, quotes, backslashes, non-ASCII)
/// - Arbitrary `i64` values and finite `f64` values (NaN/Infinity have no JSON form)
/// - Booleans and null
/// - Objects with unique member names and arrays, up to 3 levels deep
use jsontree::Value;
use proptest::prelude::*;

// ============================================================================
// Strategies for generating trees
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,12}").unwrap(),
        any::<String>(),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}",
        any::<String>(),
        Just(String::new()),
        Just("line1\nline2".to_string()),
        Just("say \"hi\"".to_string()),
        Just("path\\to\\file".to_string()),
        Just("\u{0}\u{1}\u{1f}\u{7f}".to_string()),
        Just("caf\u{00e9} \u{4f60}\u{597d} \u{1F600}".to_string()),
    ]
}

fn arb_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>().prop_filter("JSON has no NaN or infinity", |f| f.is_finite()),
        (-1_000_000i64..1_000_000i64, 0u32..5u32)
            .prop_map(|(mantissa, decimals)| mantissa as f64 / 10f64.powi(decimals as i32)),
        Just(0.0),
        Just(-0.0),
        Just(1e300),
        Just(5e-324),
    ]
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        arb_float().prop_map(Value::Float),
        arb_string().prop_map(Value::String),
    ]
}

fn arb_value_inner(depth: u32) -> BoxedStrategy<Value> {
    if depth == 0 {
        arb_scalar().boxed()
    } else {
        prop_oneof![
            4 => arb_scalar(),
            2 => prop::collection::vec(arb_value_inner(depth - 1), 0..5).prop_map(Value::Array),
            2 => prop::collection::vec((arb_name(), arb_value_inner(depth - 1)), 0..5)
                // Collecting pairs keeps names unique.
                .prop_map(|pairs| pairs.into_iter().collect::<Value>()),
        ]
        .boxed()
    }
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_value_inner(3)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Core roundtrip property: parse(dump(v)) == v in type and content.
    #[test]
    fn roundtrip_preserves_tree(value in arb_value()) {
        let text = value.dump();
        let parsed = Value::parse(&text).unwrap();
        prop_assert_eq!(&parsed, &value, "text: {}", text);
    }

    /// dump(parse(dump(v))) == dump(v)
    #[test]
    fn dump_is_idempotent(value in arb_value()) {
        let once = value.dump();
        let twice = Value::parse(&once).unwrap().dump();
        prop_assert_eq!(once, twice);
    }

    /// Our output is valid JSON for an independent parser, with the same content.
    #[test]
    fn serde_json_reads_dump(value in arb_value()) {
        let text = value.dump();
        let theirs: serde_json::Value = serde_json::from_str(&text).unwrap();
        let back = Value::from(theirs);
        prop_assert_eq!(back.dump(), text);
    }

    /// Serialized strings never contain raw control characters.
    #[test]
    fn no_raw_control_characters(s in any::<String>()) {
        let text = Value::from(s.as_str()).dump();
        prop_assert!(!text.chars().any(|c| c < '\u{20}'), "{:?}", text);
        prop_assert_eq!(Value::parse(&text).unwrap(), Value::from(s));
    }

    /// Creating the same member twice never adds a second member.
    #[test]
    fn key_creation_is_idempotent(name in arb_name(), a in any::<i64>(), b in any::<i64>()) {
        let mut v = Value::default();
        v.at_or_create(name.as_str()).unwrap().assign(a).unwrap();
        v.at_or_create(name.as_str()).unwrap().assign(b).unwrap();
        prop_assert_eq!(v.size(), 1);
        prop_assert_eq!(v.at(name.as_str()).unwrap().get::<i64>().unwrap(), b);
    }

    /// Creating index i on an array of size n < i grows it to i + 1 with null gaps.
    #[test]
    fn index_creation_grows_with_nulls(n in 0usize..10, extra in 0usize..10) {
        let mut v: Value = (0..n).map(|i| Value::from(i)).collect();
        let i = n + extra;
        v.at_or_create(i).unwrap().assign(true).unwrap();
        prop_assert_eq!(v.size(), i + 1);
        for gap in n..i {
            prop_assert!(v[gap].is_null());
        }
        prop_assert_eq!(&v[i], &Value::Bool(true));
    }
}
