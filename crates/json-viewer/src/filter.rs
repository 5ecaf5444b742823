//! JSONPath filtering of a raw document.

use serde_json::Value;

use crate::error::FilterError;
use crate::stringify::stringify;

/// Apply `path` to the strict-JSON document `raw`.
///
/// Returns `Ok(None)` when the path matches nothing, the compact JSON text
/// of the single match when there is exactly one, and the compact JSON text
/// of an array of all matches otherwise.
pub fn try_filter_json(raw: &str, path: &str) -> Result<Option<String>, FilterError> {
    let doc: Value = serde_json::from_str(raw)?;
    let matches = json_viewer_path::query(path, &doc)?;

    Ok(match matches.as_slice() {
        [] => None,
        [single] => Some(stringify(single, 0)),
        many => {
            let all = Value::Array(many.iter().map(|v| (*v).clone()).collect());
            Some(stringify(&all, 0))
        }
    })
}

/// Like [`try_filter_json`], with every failure folded into `None`.
pub fn filter_json(raw: &str, path: &str) -> Option<String> {
    try_filter_json(raw, path).ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_match_is_unwrapped() {
        assert_eq!(filter_json(r#"{"a":1,"b":2}"#, "$.a").as_deref(), Some("1"));
        assert_eq!(
            filter_json(r#"{"a":{"x":[1,2]}}"#, "$.a").as_deref(),
            Some(r#"{"x":[1,2]}"#)
        );
    }

    #[test]
    fn multiple_matches_are_wrapped_in_an_array() {
        assert_eq!(filter_json(r#"{"a":[1,2,3]}"#, "$.a[*]").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn failures_collapse_to_none() {
        assert_eq!(filter_json("not json", "$.a"), None);
        assert_eq!(filter_json(r#"{"a":1}"#, "$.b"), None);
        assert_eq!(filter_json(r#"{"a":1}"#, "$.a["), None);
        // Strict grammar: JSON5 syntax is not accepted here.
        assert_eq!(filter_json("{a: 1}", "$.a"), None);
    }

    #[test]
    fn failure_kinds_are_distinguishable() {
        assert!(matches!(try_filter_json(r#"{"a":1}"#, "$.b"), Ok(None)));
        assert!(matches!(try_filter_json("{", "$.a"), Err(FilterError::Document(_))));
        assert!(matches!(try_filter_json("{}", "a"), Err(FilterError::Path(_))));
    }

    #[test]
    fn extreme_paths_fold_into_none() {
        let doc = r#"{"a":[1,2,3]}"#;
        assert_eq!(filter_json(doc, "$.a[1::9223372036854775807]").as_deref(), Some("2"));
        assert_eq!(filter_json(doc, "$.a[(@.length+9223372036854775807)]"), None);
        assert_eq!(filter_json("[1]", &format!("$[?({}@)]", "!".repeat(200_000))), None);
    }
}
