use json_core::{
    parse, parse_value_at, parse_with_options, try_parse, try_parse_with_message, JsonError, Kind,
    ParseOptions, Parser, Value, MAX_DEPTH,
};

fn assert_syntax_error(input: &str) {
    match parse(input) {
        Err(JsonError::Syntax { .. }) => {}
        other => panic!("expected syntax error for {input:?}, got {other:?}"),
    }
}

/// Arrays nested `depth` levels deep around a single `0`.
fn nested_arrays(depth: usize) -> String {
    format!("{}0{}", "[".repeat(depth), "]".repeat(depth))
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn parse_null() {
    assert_eq!(parse("null").unwrap(), Value::Null);
}

#[test]
fn parse_booleans() {
    assert_eq!(parse("true").unwrap(), Value::Bool(true));
    assert_eq!(parse("false").unwrap(), Value::Bool(false));
}

#[test]
fn parse_integer() {
    assert_eq!(parse("42").unwrap(), Value::Number(42.0));
}

#[test]
fn parse_negative_and_zero() {
    assert_eq!(parse("-7").unwrap(), Value::Number(-7.0));
    assert_eq!(parse("0").unwrap(), Value::Number(0.0));
    assert_eq!(parse("-0").unwrap(), Value::Number(0.0));
}

#[test]
fn parse_fraction() {
    assert_eq!(parse("3.14").unwrap(), Value::Number(3.14));
    assert_eq!(parse("0.5").unwrap(), Value::Number(0.5));
}

#[test]
fn parse_exponents() {
    assert_eq!(parse("1e2").unwrap(), Value::Number(100.0));
    assert_eq!(parse("1e-3").unwrap(), Value::Number(0.001));
    assert_eq!(parse("2.5E+3").unwrap(), Value::Number(2500.0));
    assert_eq!(parse("0e0").unwrap(), Value::Number(0.0));
}

#[test]
fn parse_string() {
    assert_eq!(parse(r#""hello world""#).unwrap(), "hello world");
    assert_eq!(parse(r#""""#).unwrap(), "");
}

#[test]
fn parse_string_decodes_escapes() {
    let v = parse(r#""a\"b\\c\/d\b\f\n\r\t""#).unwrap();
    assert_eq!(v, "a\"b\\c/d\u{08}\u{0c}\n\r\t");
}

#[test]
fn parse_string_decodes_unicode_escapes() {
    assert_eq!(parse(r#""caf\u00e9""#).unwrap(), "caf\u{e9}");
    assert_eq!(parse(r#""\u4F60\u597d""#).unwrap(), "\u{4f60}\u{597d}");
    // Surrogate pair for U+1F600.
    assert_eq!(parse(r#""\ud83d\ude00""#).unwrap(), "\u{1F600}");
}

#[test]
fn parse_string_keeps_raw_utf8() {
    assert_eq!(parse("\"naïve ☃\"").unwrap(), "naïve ☃");
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(parse(" \t\r\n 42 \n").unwrap(), Value::Number(42.0));
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn parse_empty_containers() {
    assert_eq!(parse("[]").unwrap(), Value::array());
    assert_eq!(parse("{}").unwrap(), Value::object());
    assert_eq!(parse("[ \n ]").unwrap(), Value::array());
    assert_eq!(parse("{ \t }").unwrap(), Value::object());
}

#[test]
fn parse_array_of_mixed_values() {
    let v = parse(r#"[1, "two", true, null, [3], {"four": 4}]"#).unwrap();
    assert_eq!(v.kind(), Kind::Array);
    assert_eq!(v.len(), 6);
    assert_eq!(v[0], 1.0);
    assert_eq!(v[1], "two");
    assert_eq!(v[2], true);
    assert!(v[3].is_null());
    assert_eq!(v[4][0], 3.0);
    assert_eq!(v[5]["four"], 4.0);
}

#[test]
fn parse_object_preserves_insertion_order() {
    let v = parse(r#"{"a":1,"b":2}"#).unwrap();
    assert_eq!(v.kind(), Kind::Object);
    assert_eq!(v.len(), 2);
    let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b"]);
}

#[cfg(not(feature = "sort-keys"))]
#[test]
fn parse_object_keeps_unsorted_order() {
    let v = parse(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();
    let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[cfg(feature = "sort-keys")]
#[test]
fn parse_object_sorts_keys() {
    let v = parse(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();
    let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["alpha", "mid", "zeta"]);
}

#[test]
fn duplicate_keys_overwrite_earlier_entry() {
    let v = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    assert_eq!(v.len(), 2);
    assert_eq!(v["a"], 3.0);
    let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b"]);
}

#[test]
fn whitespace_around_structural_tokens() {
    let v = parse("{ \"a\" :\n[ 1 ,\t2 ] ,\r\n\"b\" : { } }").unwrap();
    assert_eq!(v["a"].len(), 2);
    assert!(v["b"].is_object());
}

#[test]
fn escaped_object_keys_are_decoded() {
    let v = parse(r#"{"line\nbreak": 1}"#).unwrap();
    assert!(v.has_key("line\nbreak"));
}

// ============================================================================
// Syntax errors
// ============================================================================

#[test]
fn trailing_comma_in_array_is_rejected() {
    assert_syntax_error("[1,2,]");
    assert_syntax_error("[1, 2, \n ]");
}

#[test]
fn trailing_comma_in_object_is_rejected() {
    assert_syntax_error(r#"{"a":1,}"#);
}

#[test]
fn bad_literals_are_rejected() {
    assert_syntax_error("nul");
    assert_syntax_error("tru");
    assert_syntax_error("fals");
    assert_syntax_error("True");
    assert_syntax_error("nil");
}

#[test]
fn leading_zero_followed_by_digit_is_rejected() {
    assert_syntax_error("01");
    assert_syntax_error("-012");
    assert_syntax_error("[00]");
}

#[test]
fn malformed_numbers_are_rejected() {
    assert_syntax_error("-");
    assert_syntax_error("+1");
    assert_syntax_error(".5");
    assert_syntax_error("1.");
    assert_syntax_error("1e");
    assert_syntax_error("1e+");
    assert_syntax_error("1e400");
}

#[test]
fn raw_control_characters_in_strings_are_rejected() {
    assert_syntax_error("\"a\nb\"");
    assert_syntax_error("\"a\tb\"");
    assert_syntax_error("\"a\rb\"");
    assert_syntax_error("\"a\u{01}b\"");
}

#[test]
fn invalid_escapes_are_rejected() {
    assert_syntax_error(r#""\x""#);
    assert_syntax_error(r#""\u12""#);
    assert_syntax_error(r#""\u12G4""#);
    assert_syntax_error(r#""\ud83d""#);
    assert_syntax_error(r#""\ude00""#);
    assert_syntax_error(r#""\ud83dA""#);
}

#[test]
fn unterminated_input_is_rejected() {
    assert_syntax_error("");
    assert_syntax_error("   ");
    assert_syntax_error("\"abc");
    assert_syntax_error("[1, 2");
    assert_syntax_error(r#"{"a": 1"#);
    assert_syntax_error(r#"{"a""#);
    assert_syntax_error(r#""ab\"#);
}

#[test]
fn structural_mistakes_are_rejected() {
    assert_syntax_error("[1 2]");
    assert_syntax_error(r#"{"a" 1}"#);
    assert_syntax_error(r#"{a: 1}"#);
    assert_syntax_error(r#"{"a": 1 "b": 2}"#);
    assert_syntax_error("[,1]");
    assert_syntax_error("}");
}

#[test]
fn syntax_error_reports_offset() {
    match parse("[1, 2, x]") {
        Err(JsonError::Syntax { offset, message }) => {
            assert_eq!(offset, 7);
            assert!(message.contains('x'), "message should name the character: {message}");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

// ============================================================================
// Trailing data
// ============================================================================

#[test]
fn trailing_data_is_rejected() {
    match parse("42 extra") {
        Err(JsonError::TrailingData { offset }) => assert_eq!(offset, 3),
        other => panic!("expected trailing data error, got {other:?}"),
    }
}

#[test]
fn second_document_is_trailing_data() {
    assert!(matches!(parse("{} {}"), Err(JsonError::TrailingData { .. })));
    assert!(matches!(parse("nullx"), Err(JsonError::TrailingData { offset: 4 })));
}

// ============================================================================
// Depth guard
// ============================================================================

// These run on the default test thread stack: parsing depth must not depend
// on the call stack.

#[test]
fn nesting_at_the_limit_is_accepted() {
    let v = parse(&nested_arrays(MAX_DEPTH)).unwrap();
    let mut levels = 0;
    let mut cursor = &v;
    while let Value::Array(items) = cursor {
        levels += 1;
        cursor = &items[0];
    }
    assert_eq!(levels, MAX_DEPTH);
    assert_eq!(*cursor, 0.0);
}

#[test]
fn nesting_beyond_the_limit_is_rejected() {
    match parse(&nested_arrays(MAX_DEPTH + 1)) {
        Err(JsonError::DepthExceeded { limit, offset }) => {
            assert_eq!(limit, 1024);
            assert_eq!(offset, MAX_DEPTH);
        }
        other => panic!("expected depth error, got {other:?}"),
    }
}

#[test]
fn deep_objects_are_rejected_too() {
    let text = format!("{}1{}", r#"{"k":"#.repeat(MAX_DEPTH + 1), "}".repeat(MAX_DEPTH + 1));
    assert!(matches!(parse(&text), Err(JsonError::DepthExceeded { .. })));
}

#[test]
fn far_too_deep_input_fails_cleanly() {
    let mut v = Value::from("untouched");
    let mut message = String::new();
    assert!(!try_parse_with_message(&nested_arrays(100_000), &mut v, &mut message));
    assert!(message.contains("nesting depth"), "unexpected message: {message}");
    assert_eq!(v, "untouched");
}

#[test]
fn deep_nesting_within_a_raised_limit_parses() {
    let options = ParseOptions { max_depth: 10_000 };
    let v = parse_with_options(&nested_arrays(5_000), options).unwrap();
    assert!(v.is_array());
    // Dropping the result recurses; unwind it iteratively here.
    let mut v = v;
    while let Value::Array(mut items) = v {
        v = items.pop().unwrap_or_default();
    }
}

#[test]
fn depth_limit_is_configurable() {
    let options = ParseOptions { max_depth: 3 };
    assert!(parse_with_options(&nested_arrays(3), options).is_ok());
    assert!(matches!(
        parse_with_options(&nested_arrays(4), options),
        Err(JsonError::DepthExceeded { limit: 3, .. })
    ));
}

// ============================================================================
// Non-failing entry points
// ============================================================================

#[test]
fn try_parse_success_replaces_destination() {
    let mut v = Value::from("old");
    assert!(try_parse("[1]", &mut v));
    assert_eq!(v.len(), 1);
}

#[test]
fn try_parse_failure_keeps_destination_and_reports_message() {
    let mut v = Value::from("old");
    let mut message = String::new();
    assert!(!try_parse_with_message("42 extra", &mut v, &mut message));
    assert_eq!(v, "old");
    assert!(!message.is_empty());
    assert!(message.contains("trailing"), "unexpected message: {message}");
}

#[test]
fn try_parse_never_panics_on_garbage() {
    let mut v = Value::Null;
    for input in ["", "[", "{\"", "\\", "\u{0}", "[1,]", "01"] {
        assert!(!try_parse(input, &mut v), "{input:?} should be rejected");
    }
    assert!(v.is_null());
}

#[test]
fn from_str_delegates_to_parse() {
    let v: Value = "[true]".parse().unwrap();
    assert_eq!(v[0], true);
    assert!("[true".parse::<Value>().is_err());
}

// ============================================================================
// Offset-based parsing
// ============================================================================

#[test]
fn parse_value_at_returns_next_offset() {
    let text = r#"{"a":1} [2] "three""#;
    let (first, next) = parse_value_at(text, 0).unwrap();
    assert!(first.is_object());
    assert_eq!(next, 8);
    let (second, next) = parse_value_at(text, next).unwrap();
    assert_eq!(second[0], 2.0);
    let (third, next) = parse_value_at(text, next).unwrap();
    assert_eq!(third, "three");
    assert_eq!(next, text.len());
}

#[test]
fn parse_value_at_rejects_offset_past_end() {
    assert!(matches!(parse_value_at("1", 5), Err(JsonError::Syntax { .. })));
}

#[test]
fn parser_reads_consecutive_values() {
    let mut parser = Parser::new("1 2 3");
    let mut total = 0.0;
    for _ in 0..3 {
        total += parser.parse_value().unwrap().as_f64().unwrap();
    }
    assert!(parser.finish().is_ok());
    assert_eq!(total, 6.0);
}
