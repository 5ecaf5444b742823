use json_viewer_json5::{parse, ErrorKind};
use serde_json::{json, Value};

fn ok(src: &str) -> Value {
    parse(src).unwrap_or_else(|e| panic!("parse failed for {src:?}: {e}"))
}

#[test]
fn plain_json_matrix() {
    assert_eq!(ok("null"), json!(null));
    assert_eq!(ok(" true "), json!(true));
    assert_eq!(ok("false"), json!(false));
    assert_eq!(ok("\"hi\""), json!("hi"));
    assert_eq!(ok("[1, 2.5, -3]"), json!([1, 2.5, -3]));
    assert_eq!(
        ok(r#"{"a": {"b": [true, null]}, "c": "é\n"}"#),
        json!({"a": {"b": [true, null]}, "c": "é\n"})
    );
    assert_eq!(ok("{}"), json!({}));
    assert_eq!(ok("[]"), json!([]));
}

#[test]
fn comments_and_trailing_commas_matrix() {
    let src = r#"
        // leading comment
        {
            /* block
               comment */
            "a": 1, // trailing line comment
            "b": [1, 2, 3,],
        }
    "#;
    assert_eq!(ok(src), json!({"a": 1, "b": [1, 2, 3]}));
    assert_eq!(ok("1 /* after */"), json!(1));
}

#[test]
fn keys_and_strings_matrix() {
    assert_eq!(ok("{b:1,a:2}"), json!({"b": 1, "a": 2}));
    assert_eq!(ok("{'single': 'quoted \"inner\"'}"), json!({"single": "quoted \"inner\""}));
    assert_eq!(ok(r#"'it\'s'"#), json!("it's"));
    assert_eq!(ok(r#""\x41\v\0""#), json!("A\u{b}\0"));
    assert_eq!(ok("'line \\\ncontinued'"), json!("line continued"));
    assert_eq!(ok(r#""\q""#), json!("q"));
}

#[test]
fn key_order_and_duplicates() {
    let value = ok("{z: 1, a: 2, z: 3}");
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["z", "a"]);
    assert_eq!(value["z"], json!(3));
}

#[test]
fn numbers_matrix() {
    assert_eq!(ok("0x1F"), json!(31));
    assert_eq!(ok("-0xff"), json!(-255));
    assert_eq!(ok(".5"), json!(0.5));
    assert_eq!(ok("5."), json!(5));
    assert_eq!(ok("+7"), json!(7));
    assert_eq!(ok("1e3"), json!(1000));
    assert_eq!(ok("2.0"), json!(2));
    assert_eq!(ok("-0"), json!(0));
    assert_eq!(ok("Infinity"), json!(null));
    assert_eq!(ok("-Infinity"), json!(null));
    assert_eq!(ok("NaN"), json!(null));
    assert!(ok("1e300").is_f64());
}

#[test]
fn error_matrix() {
    let err = parse("{invalid").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
    assert_eq!((err.line, err.column), (1, 9));

    let err = parse("[1 2]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidChar('2'));
    assert_eq!((err.line, err.column), (1, 4));

    let err = parse("{\n  a: 01\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidChar('1'));
    assert_eq!(err.line, 2);

    assert!(parse("").is_err());
    assert!(parse("not json").is_err());
    assert!(parse("[1,,2]").is_err());
    assert!(parse("{a 1}").is_err());
    assert!(parse("\"unterminated").is_err());
    assert!(parse("\"line\nbreak\"").is_err());
    assert!(parse("/* open").is_err());
    assert!(parse("1 2").is_err());
    assert!(parse(r#""\1""#).is_err());
}
