//! JSONPath query language used by the json-viewer filter box.
//!
//! The dialect is the familiar Goessner one: dot and bracket members,
//! wildcards, recursive descent, unions, Python-style slices, `?()` filter
//! expressions and `(@.length - n)` script indices.
//!
//! # Example
//!
//! ```
//! use json_viewer_path::{JsonPathParser, JsonPathEval};
//! use serde_json::json;
//!
//! let path = JsonPathParser::parse("$.store.books[*].author").unwrap();
//!
//! let doc = json!({
//!     "store": {
//!         "books": [
//!             {"author": "Nigel Rees", "title": "Sayings of the Century"},
//!             {"author": "Evelyn Waugh", "title": "Sword of Honour"}
//!         ]
//!     }
//! });
//!
//! let results = JsonPathEval::eval(&path, &doc);
//! assert_eq!(results.len(), 2);
//! ```

mod types;
pub use types::*;

mod parser;
pub use parser::{JsonPathParser, ParseError, MAX_FILTER_DEPTH};

mod eval;
pub use eval::JsonPathEval;

use serde_json::Value;

/// Parse `path` and evaluate it against `doc` in one go.
pub fn query<'a>(path: &str, doc: &'a Value) -> Result<Vec<&'a Value>, ParseError> {
    let path = JsonPathParser::parse(path)?;
    Ok(JsonPathEval::eval(&path, doc))
}
