//! Recursive object key ordering.

use serde_json::{Map, Value};

use crate::collate::locale_cmp;

/// Return `value` with the keys of every object, at any depth, in
/// ascending [`locale_cmp`] order. Array element order is preserved;
/// scalars are returned unchanged.
pub fn sort_object_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| locale_cmp(a, b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, child)| (key, sort_object_keys(child)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_object_keys).collect()),
        other => other,
    }
}

/// In-place variant of [`sort_object_keys`].
pub fn sort_object_keys_in_place(value: &mut Value) {
    let taken = std::mem::take(value);
    *value = sort_object_keys(taken);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn sorts_nested_objects_and_keeps_array_order() {
        let input = json!({
            "z": {"y": 2, "x": [{"b": 2, "a": 1}, {"d": 4, "c": 3}]},
            "a": 1
        });
        let sorted = sort_object_keys(input.clone());

        assert_eq!(sorted, input);
        assert_eq!(keys(&sorted), vec!["a", "z"]);
        assert_eq!(keys(&sorted["z"]), vec!["x", "y"]);
        assert_eq!(keys(&sorted["z"]["x"][0]), vec!["a", "b"]);
        assert_eq!(keys(&sorted["z"]["x"][1]), vec!["c", "d"]);
    }

    #[test]
    fn scalars_pass_through() {
        for scalar in [json!(null), json!(1), json!("s"), json!(true)] {
            assert_eq!(sort_object_keys(scalar.clone()), scalar);
        }
    }

    #[test]
    fn in_place_matches_owned() {
        let mut value = json!([{"b": 1, "A": 2, "a": 3}]);
        let expected = sort_object_keys(value.clone());
        sort_object_keys_in_place(&mut value);
        assert_eq!(keys(&value[0]), keys(&expected[0]));
        assert_eq!(keys(&value[0]), vec!["a", "A", "b"]);
    }
}
