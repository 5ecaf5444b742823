//! Permissive JSON (JSON5) parsing into `serde_json::Value`.
//!
//! On top of plain JSON this accepts `//` and `/* */` comments, trailing
//! commas, unquoted identifier keys, single-quoted strings, extra string
//! escapes and line continuations, hexadecimal numbers, leading or trailing
//! decimal points, explicit `+` signs, `Infinity` and `NaN`.
//!
//! ```
//! use serde_json::json;
//!
//! let value = json_viewer_json5::parse("{a: 'x', /* note */ b: [1, 2,],}").unwrap();
//! assert_eq!(value, json!({"a": "x", "b": [1, 2]}));
//! ```

mod decoder;
mod error;

pub use decoder::{Json5Decoder, MAX_DEPTH};
pub use error::{ErrorKind, Json5Error};

use serde_json::Value;

/// Parse `text` as a single JSON5 document.
pub fn parse(text: &str) -> Result<Value, Json5Error> {
    Json5Decoder::new(text).decode()
}
