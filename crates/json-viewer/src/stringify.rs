//! JSON text output matching `JSON.stringify(value, null, indent)`.

use serde_json::{Map, Number, Value};

/// Indentation is capped at ten spaces per level.
pub const MAX_INDENT: usize = 10;

/// Serialize `value`, indenting each nesting level by `indent` spaces.
///
/// An indent of zero produces compact output without any whitespace.
/// Numbers are printed the way JavaScript prints them (`1e+21`, `1e-7`,
/// `0.000001`).
pub fn stringify(value: &Value, indent: usize) -> String {
    let mut encoder = JsonTextEncoder::new(indent);
    encoder.write_any(value, 0);
    encoder.out
}

struct JsonTextEncoder {
    out: String,
    gap: String,
}

impl JsonTextEncoder {
    fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            gap: " ".repeat(indent.min(MAX_INDENT)),
        }
    }

    fn write_any(&mut self, value: &Value, level: usize) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => self.write_number(n),
            Value::String(s) => self.write_str(s),
            Value::Array(arr) => self.write_arr(arr, level),
            Value::Object(obj) => self.write_obj(obj, level),
        }
    }

    fn write_arr(&mut self, arr: &[Value], level: usize) {
        if arr.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.write_newline(level + 1);
            self.write_any(item, level + 1);
        }
        self.write_newline(level);
        self.out.push(']');
    }

    fn write_obj(&mut self, obj: &Map<String, Value>, level: usize) {
        if obj.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        for (i, (key, val)) in obj.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.write_newline(level + 1);
            self.write_str(key);
            self.out.push(':');
            if !self.gap.is_empty() {
                self.out.push(' ');
            }
            self.write_any(val, level + 1);
        }
        self.write_newline(level);
        self.out.push('}');
    }

    fn write_newline(&mut self, level: usize) {
        if self.gap.is_empty() {
            return;
        }
        self.out.push('\n');
        for _ in 0..level {
            self.out.push_str(&self.gap);
        }
    }

    fn write_number(&mut self, n: &Number) {
        if let Some(i) = n.as_i64() {
            self.out.push_str(&i.to_string());
        } else if let Some(u) = n.as_u64() {
            self.out.push_str(&u.to_string());
        } else if let Some(f) = n.as_f64() {
            self.out.push_str(&format_js_number(f));
        } else {
            self.out.push_str("null");
        }
    }

    fn write_str(&mut self, s: &str) {
        self.out.reserve(s.len() + 2);
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    self.out.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

/// `Number.prototype.toString()` for finite values.
fn format_js_number(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }

    // Shortest round-trip digits, e.g. "-1.2345e-7".
    let sci = format!("{:e}", f);
    let (mantissa, exp) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exp: i32 = match exp.parse() {
        Ok(exp) => exp,
        Err(_) => return sci,
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the digits.
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{e_sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{e_sign}{}", e.abs())
        }
    };

    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_output_has_no_whitespace() {
        let value = json!({"a": [1, {"b": null}], "c": "x"});
        assert_eq!(stringify(&value, 0), r#"{"a":[1,{"b":null}],"c":"x"}"#);
    }

    #[test]
    fn indented_output() {
        let value = json!({"a": 2, "b": [1, []], "c": {}});
        assert_eq!(
            stringify(&value, 2),
            "{\n  \"a\": 2,\n  \"b\": [\n    1,\n    []\n  ],\n  \"c\": {}\n}"
        );
    }

    #[test]
    fn indent_is_capped() {
        let value = json!([1]);
        assert_eq!(stringify(&value, 40), format!("[\n{}1\n]", " ".repeat(MAX_INDENT)));
    }

    #[test]
    fn scalars_at_top_level() {
        assert_eq!(stringify(&json!("s"), 3), "\"s\"");
        assert_eq!(stringify(&json!(null), 3), "null");
        assert_eq!(stringify(&json!(true), 0), "true");
    }

    #[test]
    fn escapes_like_javascript() {
        let value = json!("q\"b\\n\n\u{1}\u{1f}é/");
        assert_eq!(stringify(&value, 0), "\"q\\\"b\\\\n\\n\\u0001\\u001fé/\"");
    }

    #[test]
    fn numbers_like_javascript() {
        assert_eq!(format_js_number(8.95), "8.95");
        assert_eq!(format_js_number(-0.5), "-0.5");
        assert_eq!(format_js_number(1e20), "100000000000000000000");
        assert_eq!(format_js_number(1e21), "1e+21");
        assert_eq!(format_js_number(1.5e300), "1.5e+300");
        assert_eq!(format_js_number(0.000001), "0.000001");
        assert_eq!(format_js_number(1e-7), "1e-7");
        assert_eq!(format_js_number(-1.25e-8), "-1.25e-8");
        assert_eq!(format_js_number(123.0), "123");
    }
}
