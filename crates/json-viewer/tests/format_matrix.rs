use json_viewer::{format_json, FormatError, FormatOptions, JsonFormatter};

fn compact() -> FormatOptions {
    FormatOptions::new().with_indent_size(0)
}

#[test]
fn sorted_two_space_matrix() {
    let out = format_json("{b:1,a:2}", &FormatOptions::new().with_indent_size(2)).unwrap();
    assert_eq!(out, "{\n  \"a\": 2,\n  \"b\": 1\n}");

    let out = format_json(r#"{"b":1,"a":2}"#, &FormatOptions::new().with_indent_size(2)).unwrap();
    assert_eq!(out, "{\n  \"a\": 2,\n  \"b\": 1\n}");

    let out = format_json(r#"{"b":1,"a":2}"#, &compact().with_sort_keys(false)).unwrap();
    assert_eq!(out, r#"{"b":1,"a":2}"#);
}

#[test]
fn default_options_matrix() {
    let out = format_json("{\n  // note\n  a: [1, 2,],\n}", &FormatOptions::default()).unwrap();
    assert_eq!(out, "{\n   \"a\": [\n      1,\n      2\n   ]\n}");

    assert_eq!(format_json("  42 ", &FormatOptions::default()).unwrap(), "42");
    assert_eq!(format_json("'x'", &FormatOptions::default()).unwrap(), "\"x\"");
}

#[test]
fn locale_key_order_matrix() {
    let raw = r#"{"b":0,"A":0,"a":0,"_x":0,"10":0,"9":0}"#;
    let out = format_json(raw, &compact()).unwrap();
    assert_eq!(out, r#"{"_x":0,"10":0,"9":0,"a":0,"A":0,"b":0}"#);
}

#[test]
fn unescape_matrix() {
    let raw = r#"{"a":"caf\u00e9"}"#;
    let out = format_json(raw, &compact().with_unescape_unicode(true)).unwrap();
    assert_eq!(out, "{\"a\":\"caf\u{e9}\"}");

    // Decoding is textual, so an escaped quote breaks the document.
    let raw = r#"{"a":"\u0022"}"#;
    let err = format_json(raw, &compact().with_unescape_unicode(true)).unwrap_err();
    assert!(matches!(err, FormatError::Parse(_)));

    // Without the option the parser decodes the escape itself.
    assert_eq!(format_json(raw, &compact()).unwrap(), r#"{"a":"\""}"#);
}

#[test]
fn filter_matrix() {
    let doc = r#"{"items":[{"n":"x","p":1},{"n":"y","p":2}],"total":2}"#;

    let out = format_json(doc, &compact().with_json_path("$.items[*].n")).unwrap();
    assert_eq!(out, r#"["x","y"]"#);

    let out = format_json(doc, &compact().with_json_path("$.total")).unwrap();
    assert_eq!(out, "2");

    let out = format_json(doc, &compact().with_json_path("$.items[?(@.p > 1)]")).unwrap();
    assert_eq!(out, r#"{"n":"y","p":2}"#);

    // No match without a fallback formats the whole document.
    let out = format_json(doc, &compact().with_json_path("$.missing")).unwrap();
    assert_eq!(out, r#"{"items":[{"n":"x","p":1},{"n":"y","p":2}],"total":2}"#);
}

#[test]
fn filter_needs_strict_json_matrix() {
    let out = format_json("{b: 1, a: 2}", &compact().with_json_path("$.a")).unwrap();
    assert_eq!(out, r#"{"a":2,"b":1}"#);
}

#[test]
fn fallback_path_matrix() {
    let doc = r#"{"a":{"x":1},"b":2}"#;
    let mut formatter = JsonFormatter::new();

    let out = formatter.format(doc, &compact().with_json_path("$.a")).unwrap();
    assert_eq!(out, r#"{"x":1}"#);
    assert_eq!(formatter.last_valid_path(), Some("$.a"));

    // An incomplete edit keeps showing the last good result.
    let out = formatter.format(doc, &compact().with_json_path("$.a[")).unwrap();
    assert_eq!(out, r#"{"x":1}"#);

    let out = formatter.format(doc, &compact().with_json_path("$.b")).unwrap();
    assert_eq!(out, "2");
    assert_eq!(formatter.last_valid_path(), Some("$.b"));

    // The fallback itself may not match a new document.
    let out = formatter.format(r#"{"c":3}"#, &compact().with_json_path("$.nope")).unwrap();
    assert_eq!(out, r#"{"c":3}"#);
}

#[test]
fn parse_error_matrix() {
    for raw in ["{invalid", "", "[1,,2]", "{\"a\":1} x", "01"] {
        let err = format_json(raw, &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::Parse(_)), "{raw:?}");
    }
}

#[test]
fn number_output_matrix() {
    let out = format_json("[1.0, 0x1F, .5, +3, 1e21, -0, NaN, Infinity]", &compact()).unwrap();
    assert_eq!(out, "[1,31,0.5,3,1e+21,0,null,null]");
}

#[test]
fn session_types_are_send_and_sync() {
    fn check<T: Send + Sync>() {}
    check::<JsonFormatter>();
    check::<FormatOptions>();
    check::<FormatError>();
}
