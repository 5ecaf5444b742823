//! JSONPath evaluator.

use std::cmp::Ordering;

use crate::types::*;
use serde_json::Value;

/// JSONPath evaluator.
pub struct JsonPathEval;

impl JsonPathEval {
    /// Evaluate a JSONPath against a JSON document.
    ///
    /// Returns references to the matching values in evaluation order: for each
    /// segment, every input node is visited in turn and each selector of the
    /// segment is applied to it in the order written.
    pub fn eval<'a>(path: &JSONPath, doc: &'a Value) -> Vec<&'a Value> {
        Self::eval_segments(&path.segments, doc, doc)
    }

    fn eval_segments<'a>(
        segments: &[PathSegment],
        start: &'a Value,
        root: &'a Value,
    ) -> Vec<&'a Value> {
        let mut nodes = vec![start];

        for segment in segments {
            let mut next = Vec::new();
            for node in nodes {
                if segment.recursive {
                    let mut descendants = Vec::new();
                    Self::collect_descendants(node, &mut descendants);
                    for descendant in descendants {
                        Self::apply_selectors(descendant, &segment.selectors, root, &mut next);
                    }
                } else {
                    Self::apply_selectors(node, &segment.selectors, root, &mut next);
                }
            }
            nodes = next;
        }

        nodes
    }

    /// Node itself followed by all of its descendants, in document order.
    fn collect_descendants<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
        out.push(value);
        match value {
            Value::Object(map) => map.values().for_each(|child| Self::collect_descendants(child, out)),
            Value::Array(arr) => arr.iter().for_each(|child| Self::collect_descendants(child, out)),
            _ => {}
        }
    }

    fn apply_selectors<'a>(
        value: &'a Value,
        selectors: &[Selector],
        root: &'a Value,
        results: &mut Vec<&'a Value>,
    ) {
        for selector in selectors {
            Self::eval_selector(value, selector, root, results);
        }
    }

    fn eval_selector<'a>(
        value: &'a Value,
        selector: &Selector,
        root: &'a Value,
        results: &mut Vec<&'a Value>,
    ) {
        match selector {
            Selector::Name(name) => match value {
                Value::Object(map) => results.extend(map.get(name)),
                Value::Array(arr) => {
                    if let Some(idx) = array_index_name(name) {
                        results.extend(arr.get(idx));
                    }
                }
                _ => {}
            },
            Selector::Index(index) => {
                if let Value::Array(arr) = value {
                    let len = arr.len() as isize;
                    let idx = if *index < 0 { len + index } else { *index };
                    if (0..len).contains(&idx) {
                        results.push(&arr[idx as usize]);
                    }
                }
            }
            Selector::Wildcard => match value {
                Value::Object(map) => results.extend(map.values()),
                Value::Array(arr) => results.extend(arr.iter()),
                _ => {}
            },
            Selector::Slice { start, end, step } => {
                if let Value::Array(arr) = value {
                    for idx in slice_indices(arr.len(), *start, *end, *step) {
                        results.push(&arr[idx]);
                    }
                }
            }
            Selector::Filter(expr) => match value {
                Value::Object(map) => {
                    results.extend(map.values().filter(|child| Self::test(expr, child, root)))
                }
                Value::Array(arr) => {
                    results.extend(arr.iter().filter(|child| Self::test(expr, child, root)))
                }
                _ => {}
            },
            Selector::Script(script) => {
                if let Value::Array(arr) = value {
                    let idx = (arr.len() as isize).checked_add(script.offset);
                    if let Some(idx) = idx.filter(|idx| *idx >= 0) {
                        results.extend(arr.get(idx as usize));
                    }
                }
            }
        }
    }

    fn test(expr: &FilterExpression, current: &Value, root: &Value) -> bool {
        match expr {
            FilterExpression::Comparison { operator, left, right } => {
                let left_val = Self::resolve(left, current, root);
                let right_val = Self::resolve(right, current, root);
                Self::compare(*operator, left_val.as_ref(), right_val.as_ref())
            }
            FilterExpression::Logical { operator, left, right } => match operator {
                LogicalOperator::And => {
                    Self::test(left, current, root) && Self::test(right, current, root)
                }
                LogicalOperator::Or => {
                    Self::test(left, current, root) || Self::test(right, current, root)
                }
            },
            FilterExpression::Truthy(operand) => Self::resolve(operand, current, root)
                .as_ref()
                .is_some_and(is_truthy),
            FilterExpression::Paren(expr) => Self::test(expr, current, root),
            FilterExpression::Negation(expr) => !Self::test(expr, current, root),
        }
    }

    /// Resolve a filter operand to the first value it selects.
    fn resolve(expr: &ValueExpression, current: &Value, root: &Value) -> Option<Value> {
        match expr {
            ValueExpression::Literal(v) => Some(v.clone()),
            ValueExpression::Path { origin, path } => {
                let start = match origin {
                    PathOrigin::Current => current,
                    PathOrigin::Root => root,
                };
                Self::resolve_path(path, start, root)
            }
        }
    }

    fn resolve_path(path: &JSONPath, start: &Value, root: &Value) -> Option<Value> {
        // `.length` of an array or string is computed, not looked up.
        if let Some((last, prefix)) = path.segments.split_last() {
            let is_length = !last.recursive
                && matches!(last.selectors.as_slice(), [Selector::Name(name)] if name == "length");
            if is_length {
                match Self::eval_segments(prefix, start, root).first() {
                    Some(Value::Array(arr)) => return Some(Value::from(arr.len())),
                    Some(Value::String(s)) => return Some(Value::from(s.encode_utf16().count())),
                    _ => {}
                }
            }
        }

        Self::eval_segments(&path.segments, start, root)
            .first()
            .map(|v| (*v).clone())
    }

    fn compare(operator: ComparisonOperator, left: Option<&Value>, right: Option<&Value>) -> bool {
        let (l, r) = match (left, right) {
            (Some(l), Some(r)) => (l, r),
            (None, None) => return operator == ComparisonOperator::Equal,
            _ => return operator == ComparisonOperator::NotEqual,
        };

        let ord = Self::compare_values(l, r);
        match operator {
            // Numbers compare by value so that 1 and 1.0 are equal.
            ComparisonOperator::Equal => match (l, r) {
                (Value::Number(_), Value::Number(_)) => ord == Some(Ordering::Equal),
                _ => l == r,
            },
            ComparisonOperator::NotEqual => match (l, r) {
                (Value::Number(_), Value::Number(_)) => ord != Some(Ordering::Equal),
                _ => l != r,
            },
            ComparisonOperator::Less => ord == Some(Ordering::Less),
            ComparisonOperator::LessEqual => {
                matches!(ord, Some(Ordering::Less | Ordering::Equal))
            }
            ComparisonOperator::Greater => ord == Some(Ordering::Greater),
            ComparisonOperator::GreaterEqual => {
                matches!(ord, Some(Ordering::Greater | Ordering::Equal))
            }
        }
    }

    fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
        match (a, b) {
            (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Member names that address an array element (`"0"`, `"12"`, not `"01"`).
fn array_index_name(name: &str) -> Option<usize> {
    let idx = name.parse::<usize>().ok()?;
    (idx.to_string() == name).then_some(idx)
}

fn slice_indices(
    len: usize,
    start: Option<isize>,
    end: Option<isize>,
    step: Option<isize>,
) -> Vec<usize> {
    let step = step.unwrap_or(1);
    if step == 0 || len == 0 {
        return Vec::new();
    }

    let len = len as isize;
    let normalize = |i: isize| if i < 0 { len + i } else { i };
    let mut indices = Vec::new();

    if step > 0 {
        let lower = start.map_or(0, normalize).clamp(0, len);
        let upper = end.map_or(len, normalize).clamp(0, len);
        let mut i = lower;
        while i < upper {
            indices.push(i as usize);
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    } else {
        let upper = start.map_or(len - 1, normalize).clamp(-1, len - 1);
        let lower = end.map_or(-1, normalize).clamp(-1, len - 1);
        let mut i = upper;
        while lower < i {
            indices.push(i as usize);
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    }

    indices
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
