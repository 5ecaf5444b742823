//! The formatting session used by an editor view.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::error::FormatError;
use crate::filter::try_filter_json;
use crate::options::FormatOptions;
use crate::sort::sort_object_keys_in_place;
use crate::stringify::stringify;
use crate::unescape::unescape_unicode;

/// Formats documents for one editor view.
///
/// The formatter remembers the last JSONPath that matched something. While
/// the user is part-way through editing the path (say `$.items[`), the
/// current path fails and the remembered one is applied instead, so the
/// view keeps showing a stale but meaningful result rather than flashing
/// the unfiltered document.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    last_valid_path: Option<String>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last path that produced at least one match, if any.
    pub fn last_valid_path(&self) -> Option<&str> {
        self.last_valid_path.as_deref()
    }

    /// Filter, parse, sort and re-serialize `raw_json`.
    ///
    /// Filtering problems never surface: a bad or non-matching path falls
    /// back to the last valid path and then to the unfiltered text. A
    /// document that is not valid JSON5 is reported as
    /// [`FormatError::Parse`].
    pub fn format(&mut self, raw_json: &str, options: &FormatOptions) -> Result<String, FormatError> {
        let filtered = self.apply_path(raw_json, &options.json_path);
        let working = filtered.as_deref().unwrap_or(raw_json);

        let text = if options.unescape_unicode {
            unescape_unicode(working)
        } else {
            Cow::Borrowed(working)
        };

        let mut value = json_viewer_json5::parse(&text)?;
        if options.sort_keys {
            sort_object_keys_in_place(&mut value);
        }

        let out = stringify(&value, options.indent_size);
        trace!(input_len = raw_json.len(), output_len = out.len(), "formatted document");
        Ok(out)
    }

    fn apply_path(&mut self, raw: &str, path: &str) -> Option<String> {
        if path.is_empty() {
            return None;
        }

        if let Some(text) = attempt_filter(raw, path) {
            if self.last_valid_path.as_deref() != Some(path) {
                debug!(path, "remembering json path");
                self.last_valid_path = Some(path.to_owned());
            }
            return Some(text);
        }

        let fallback = self.last_valid_path.as_deref()?;
        let text = attempt_filter(raw, fallback)?;
        debug!(path, fallback, "using last valid json path");
        Some(text)
    }
}

fn attempt_filter(raw: &str, path: &str) -> Option<String> {
    match try_filter_json(raw, path) {
        Ok(Some(text)) => Some(text),
        Ok(None) => {
            debug!(path, "json path matched nothing");
            None
        }
        Err(err) => {
            debug!(path, error = %err, "json path filter not applied");
            None
        }
    }
}

/// Format with a throw-away [`JsonFormatter`], so no fallback path carries
/// over between calls.
pub fn format_json(raw_json: &str, options: &FormatOptions) -> Result<String, FormatError> {
    JsonFormatter::new().format(raw_json, options)
}
