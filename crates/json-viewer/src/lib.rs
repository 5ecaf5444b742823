//! Core of a JSON viewer/prettifier.
//!
//! A raw document goes through four steps:
//!
//! 1. an optional JSONPath filter ([`filter_json`]), falling back to the last
//!    path that worked when the current one is incomplete;
//! 2. optional decoding of `\uXXXX` escapes ([`unescape_unicode`]);
//! 3. permissive JSON5 parsing;
//! 4. optional recursive key sorting ([`sort_object_keys`]) and
//!    re-serialization with the requested indentation ([`stringify`]).
//!
//! ```
//! use json_viewer::{format_json, FormatOptions};
//!
//! let out = format_json("{b: 1, a: 2,}", &FormatOptions::new().with_indent_size(2)).unwrap();
//! assert_eq!(out, "{\n  \"a\": 2,\n  \"b\": 1\n}");
//! ```

mod collate;
mod error;
mod filter;
mod formatter;
mod options;
mod sort;
mod stringify;
mod unescape;

pub use collate::locale_cmp;
pub use error::{FilterError, FormatError};
pub use filter::{filter_json, try_filter_json};
pub use formatter::{format_json, JsonFormatter};
pub use options::FormatOptions;
pub use sort::{sort_object_keys, sort_object_keys_in_place};
pub use stringify::{stringify, MAX_INDENT};
pub use unescape::unescape_unicode;

pub use json_viewer_json5::Json5Error;
