//! Envelope detection for webhook responses.
//!
//! The recommendation service wraps its list in one of several shapes
//! depending on how the workflow behind it is wired:
//!
//! ```text
//! [{ "output": { "recommendations": [...] } }]
//! [{ "recommendations": [...] }]
//! { "output": { "recommendations": [...] } }
//! { "recommendations": [...] }
//! [ ... ]
//! ```
//!
//! [`extract_candidates`] walks [`ENVELOPE_RULES`] in order and stops at the
//! first rule whose shape matches.

use serde_json::Value;

/// One envelope shape: returns the wrapped value when the shape matches.
pub struct EnvelopeRule {
    pub name: &'static str,
    select: fn(&Value) -> Option<&Value>,
}

impl EnvelopeRule {
    pub fn select<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        (self.select)(body)
    }
}

pub const ENVELOPE_RULES: &[EnvelopeRule] = &[
    EnvelopeRule { name: "array[0].output.recommendations", select: first_item_output },
    EnvelopeRule { name: "array[0].recommendations", select: first_item_direct },
    EnvelopeRule { name: "object.output.recommendations", select: object_output },
    EnvelopeRule { name: "object.recommendations", select: object_direct },
    EnvelopeRule { name: "bare array", select: bare_array },
];

/// Truthiness as the service's web clients test it: null,
/// false, zero and the empty string count as absent.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Follow `path` through nested objects, requiring a truthy value at each step.
fn field_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| {
        current.get(*key).filter(|next| truthy(next))
    })
}

fn first_non_empty(body: &Value) -> Option<&Value> {
    body.as_array().and_then(|items| items.first())
}

fn first_item_output(body: &Value) -> Option<&Value> {
    first_non_empty(body).and_then(|first| field_path(first, &["output", "recommendations"]))
}

fn first_item_direct(body: &Value) -> Option<&Value> {
    first_non_empty(body).and_then(|first| field_path(first, &["recommendations"]))
}

fn object_output(body: &Value) -> Option<&Value> {
    body.as_object()?;
    field_path(body, &["output", "recommendations"])
}

fn object_direct(body: &Value) -> Option<&Value> {
    body.as_object()?;
    field_path(body, &["recommendations"])
}

fn bare_array(body: &Value) -> Option<&Value> {
    body.is_array().then_some(body)
}

/// Find the first matching envelope rule for a response body.
pub fn matching_rule(body: &Value) -> Option<(&'static EnvelopeRule, &Value)> {
    ENVELOPE_RULES
        .iter()
        .find_map(|rule| rule.select(body).map(|inner| (rule, inner)))
}

/// Extract the candidate records from a webhook response body.
///
/// Returns `None` when no envelope shape matches, or when the matched value
/// is not a list. The list itself may be empty.
pub fn extract_candidates(body: &Value) -> Option<Vec<Value>> {
    let (rule, inner) = match matching_rule(body) {
        Some(found) => found,
        None => {
            log::debug!("No recommendation envelope matched the response");
            return None;
        }
    };

    match inner.as_array() {
        Some(items) => {
            log::debug!("Envelope '{}' matched with {} candidate(s)", rule.name, items.len());
            Some(items.clone())
        }
        None => {
            log::debug!("Envelope '{}' matched but does not hold a list", rule.name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn songs() -> Value {
        json!([{ "title": "A" }, { "title": "B" }])
    }

    #[test]
    fn test_array_with_output_envelope() {
        let body = json!([{ "output": { "recommendations": songs() } }]);
        assert_eq!(extract_candidates(&body), Some(songs().as_array().unwrap().clone()));
        assert_eq!(matching_rule(&body).unwrap().0.name, "array[0].output.recommendations");
    }

    #[test]
    fn test_array_with_direct_envelope() {
        let body = json!([{ "recommendations": songs() }]);
        assert_eq!(extract_candidates(&body).unwrap().len(), 2);
        assert_eq!(matching_rule(&body).unwrap().0.name, "array[0].recommendations");
    }

    #[test]
    fn test_object_with_output_envelope() {
        let body = json!({ "output": { "recommendations": songs() } });
        assert_eq!(extract_candidates(&body).unwrap().len(), 2);
        assert_eq!(matching_rule(&body).unwrap().0.name, "object.output.recommendations");
    }

    #[test]
    fn test_object_with_direct_envelope() {
        let body = json!({ "recommendations": songs() });
        assert_eq!(extract_candidates(&body).unwrap().len(), 2);
        assert_eq!(matching_rule(&body).unwrap().0.name, "object.recommendations");
    }

    #[test]
    fn test_bare_array_is_the_list() {
        let body = songs();
        assert_eq!(extract_candidates(&body).unwrap().len(), 2);
        assert_eq!(matching_rule(&body).unwrap().0.name, "bare array");
    }

    #[test]
    fn test_output_wins_over_direct() {
        let body = json!({
            "output": { "recommendations": [{ "title": "nested" }] },
            "recommendations": [{ "title": "direct" }, { "title": "other" }]
        });
        let candidates = extract_candidates(&body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0]["title"], "nested");
    }

    #[test]
    fn test_first_item_output_wins_over_first_item_direct() {
        let body = json!([{
            "output": { "recommendations": [{ "title": "nested" }] },
            "recommendations": [{ "title": "direct" }, { "title": "other" }]
        }]);
        let candidates = extract_candidates(&body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0]["title"], "nested");
        assert_eq!(matching_rule(&body).unwrap().0.name, "array[0].output.recommendations");
    }

    #[test]
    fn test_array_of_non_objects_is_the_list() {
        let body = json!([null]);
        assert_eq!(matching_rule(&body).unwrap().0.name, "bare array");
        assert_eq!(extract_candidates(&body), Some(vec![Value::Null]));
    }

    #[test]
    fn test_first_element_rules_only_look_at_first() {
        let body = json!([{ "title": "plain" }, { "recommendations": [{ "title": "x" }] }]);
        let candidates = extract_candidates(&body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0]["title"], "plain");
    }

    #[test]
    fn test_unrecognized_shapes_yield_nothing() {
        assert_eq!(extract_candidates(&json!({})), None);
        assert_eq!(extract_candidates(&json!({ "output": {} })), None);
        assert_eq!(extract_candidates(&json!({ "data": [1, 2] })), None);
        assert_eq!(extract_candidates(&json!("recommendations")), None);
        assert_eq!(extract_candidates(&json!(42)), None);
        assert_eq!(extract_candidates(&Value::Null), None);
    }

    #[test]
    fn test_matched_non_list_yields_nothing() {
        assert_eq!(extract_candidates(&json!({ "recommendations": "none today" })), None);
        assert_eq!(extract_candidates(&json!([{ "output": { "recommendations": { "a": 1 } } }])), None);
    }

    #[test]
    fn test_falsy_field_falls_through() {
        let body = json!({ "output": { "recommendations": null }, "recommendations": [{ "title": "x" }] });
        assert_eq!(extract_candidates(&body).unwrap().len(), 1);
        assert_eq!(matching_rule(&body).unwrap().0.name, "object.recommendations");
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(extract_candidates(&json!([])), Some(vec![]));
        assert_eq!(extract_candidates(&json!({ "recommendations": [] })), Some(vec![]));
    }
}
