use serde::{Deserialize, Serialize};

/// Settings for one formatting pass.
///
/// Deserializes from the camelCase settings object the viewer UI stores,
/// with every field optional:
///
/// ```
/// use json_viewer::FormatOptions;
///
/// let options: FormatOptions = serde_json::from_str(r#"{"indentSize": 2}"#).unwrap();
/// assert_eq!(options.indent_size, 2);
/// assert!(options.sort_keys);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Sort object keys recursively.
    pub sort_keys: bool,
    /// Spaces per nesting level; `0` means compact output. Capped at 10.
    pub indent_size: usize,
    /// Decode `\uXXXX` escapes before parsing.
    pub unescape_unicode: bool,
    /// JSONPath filter; empty means no filtering.
    pub json_path: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            sort_keys: true,
            indent_size: 3,
            unescape_unicode: false,
            json_path: String::new(),
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    pub fn with_unescape_unicode(mut self, unescape_unicode: bool) -> Self {
        self.unescape_unicode = unescape_unicode;
        self
    }

    pub fn with_json_path(mut self, json_path: impl Into<String>) -> Self {
        self.json_path = json_path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = FormatOptions::default();
        assert!(options.sort_keys);
        assert_eq!(options.indent_size, 3);
        assert!(!options.unescape_unicode);
        assert!(options.json_path.is_empty());
    }

    #[test]
    fn round_trips_through_settings_json() {
        let options = FormatOptions::new()
            .with_sort_keys(false)
            .with_json_path("$.a");
        let text = serde_json::to_string(&options).unwrap();
        assert_eq!(
            text,
            r#"{"sortKeys":false,"indentSize":3,"unescapeUnicode":false,"jsonPath":"$.a"}"#
        );
        let back: FormatOptions = serde_json::from_str(&text).unwrap();
        assert_eq!(back, options);
    }
}
