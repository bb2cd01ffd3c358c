//! INTERSECTION combinator

use crate::foundation::{Message, Outcome, ParseContext, Validate};
use crate::keys::is_dangerous_key;
use crate::schema::Schema;
use crate::value::{Object, Value};

/// Both schemas must accept the same input; their outputs are merged.
///
/// The outputs are combined by category:
///
/// - object and object: deep merge, the right output wins on a shared key
/// - object and anything else: always an `invalid_intersection_types` issue
/// - arrays of equal length: merged element by element
/// - anything else: the two outputs must be the same value
#[derive(Debug, Clone)]
pub struct IntersectionSchema {
    left: Schema,
    right: Schema,
}

impl IntersectionSchema {
    pub fn new(left: Schema, right: Schema) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &Schema {
        &self.left
    }

    pub fn right(&self) -> &Schema {
        &self.right
    }
}

impl Validate for IntersectionSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let left = self.left.validate(input, ctx);
        if left.is_err() && ctx.fail_fast() {
            return left;
        }
        let right = self.right.validate(input, ctx);

        match (left, right) {
            (Ok(left), Ok(right)) => merge_values(&left, &right)
                .ok_or_else(|| vec![ctx.issue(&Message::InvalidIntersectionTypes)]),
            (left, right) => {
                let mut issues = left.err().unwrap_or_default();
                issues.extend(right.err().unwrap_or_default());
                Err(issues)
            }
        }
    }
}

/// Merges two validated outputs; `None` when they cannot be combined.
pub(crate) fn merge_values(left: &Value, right: &Value) -> Option<Value> {
    match (left, right) {
        (Value::Object(left), Value::Object(right)) => Some(Value::Object(merge_objects(left, right)?)),
        (Value::Object(_), _) | (_, Value::Object(_)) => None,
        (Value::Array(left), Value::Array(right)) if left.len() == right.len() => left
            .iter()
            .zip(right)
            .map(|(left, right)| merge_values(left, right))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        _ if left.same_value(right) => Some(left.clone()),
        _ => None,
    }
}

fn merge_objects(left: &Object, right: &Object) -> Option<Object> {
    let mut merged: Object = left
        .iter()
        .filter(|(key, _)| !is_dangerous_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (key, value) in right {
        if is_dangerous_key(key) {
            continue;
        }
        let value = match (merged.get(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                Value::Object(merge_objects(existing, incoming)?)
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, ValidateExt};
    use crate::{intersection, number, object, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_objects_merge() {
        let named = object([("name", string().into_schema())]);
        let aged = object([("age", number().into_schema())]);
        let schema = intersection(named, aged);

        let parsed = schema.parse(json!({"name": "a", "age": 1, "extra": true})).unwrap();
        assert_eq!(parsed.to_json(), json!({"name": "a", "age": 1.0}));
    }

    #[test]
    fn test_string_and_object_never_intersect() {
        let schema = string().and(object([("a", string().into_schema())]));
        for input in [json!("text"), json!({"a": "x"}), json!(1), json!(null)] {
            assert!(!schema.safe_parse(input).is_success());
        }
    }

    #[test]
    fn test_mixed_categories_fail_on_merge() {
        let schema = crate::any().and(crate::any().transform(|_| Value::Object(Object::new())));
        let error = schema.parse(1).unwrap_err();
        assert_eq!(error.first().code, IssueCode::InvalidIntersectionTypes);
        assert_eq!(error.first().message, "Intersection results could not be merged");
    }

    #[test]
    fn test_primitives_must_agree() {
        assert!(string().and(string().min(2)).is_valid("ab"));
        let diverging = string().and(string().trim());
        assert_eq!(
            diverging.parse(" a ").unwrap_err().first().code,
            IssueCode::InvalidIntersectionTypes
        );
    }

    #[test]
    fn test_collects_issues_from_both_sides() {
        let schema = string().min(3).and(string().email());
        assert_eq!(schema.parse("a").unwrap_err().len(), 1);
        assert_eq!(schema.safe_parse("a").error().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_merge_rules() {
        let left = Value::from(json!({"a": {"x": 1}, "b": 1}));
        let right = Value::from(json!({"a": {"y": 2}, "b": 2}));
        assert_eq!(
            merge_values(&left, &right).unwrap().to_json(),
            json!({"a": {"x": 1.0, "y": 2.0}, "b": 2.0})
        );

        let short = Value::from(vec![1]);
        let long = Value::from(vec![1, 2]);
        assert!(merge_values(&short, &long).is_none());
        assert_eq!(merge_values(&long, &long), Some(long.clone()));
        assert!(merge_values(&Value::from(1), &left).is_none());
    }
}
