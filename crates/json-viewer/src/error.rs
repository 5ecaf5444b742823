use json_viewer_json5::Json5Error;
use thiserror::Error;

/// Why a JSONPath filter could not be applied.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("document is not strict JSON: {0}")]
    Document(#[from] serde_json::Error),
    #[error("invalid JSONPath expression: {0}")]
    Path(#[from] json_viewer_path::ParseError),
}

/// Errors surfaced by [`JsonFormatter::format`](crate::JsonFormatter::format).
#[derive(Debug, Error)]
pub enum FormatError {
    /// The (possibly filtered) document is not valid JSON5.
    #[error(transparent)]
    Parse(#[from] Json5Error),
}
