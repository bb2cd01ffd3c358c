//! Array schema

use crate::collections::{SizeCheck, check_size, validate_child};
use crate::foundation::{Origin, Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::validators::{Checks, invalid_type};
use crate::value::Value;

/// Validates every element against one schema, then the length bounds.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let pair = array(number()).min(2);
///
/// assert!(pair.parse(vec![1, 2]).is_ok());
/// assert_eq!(
///     pair.parse(vec![1]).unwrap_err().to_string(),
///     "Array must contain at least 2 element(s)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ArraySchema {
    element: Schema,
    checks: Checks<SizeCheck>,
}

impl ArraySchema {
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            element: element.into(),
            checks: Checks::new(),
        }
    }

    pub fn element(&self) -> &Schema {
        &self.element
    }

    fn check(&self, check: SizeCheck) -> Self {
        Self {
            element: self.element.clone(),
            checks: self.checks.with(check),
        }
    }

    pub fn min(&self, n: usize) -> Self {
        self.check(SizeCheck::Min(n))
    }

    pub fn max(&self, n: usize) -> Self {
        self.check(SizeCheck::Max(n))
    }

    pub fn length(&self, n: usize) -> Self {
        self.check(SizeCheck::Exact(n))
    }

    pub fn nonempty(&self) -> Self {
        self.min(1)
    }

    /// Replaces the message of the most recently declared length check.
    pub fn message(&self, message: &str) -> Self {
        Self {
            element: self.element.clone(),
            checks: self.checks.with_message(message),
        }
    }
}

impl Validate for ArraySchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let Value::Array(items) = input else {
            return invalid_type(ctx, "array", input, self.checks.type_message());
        };

        let mut output = Vec::with_capacity(items.len());
        let mut issues = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match validate_child(&self.element, item, index, ctx) {
                Ok(value) => output.push(value),
                Err(child) => {
                    issues.extend(child);
                    if ctx.fail_fast() {
                        return Err(issues);
                    }
                }
            }
        }

        if let Some(issue) = check_size(&self.checks, items.len(), Origin::Array, ctx) {
            issues.push(issue);
        }

        if issues.is_empty() {
            Ok(Value::Array(output))
        } else {
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, PathSegment, ValidateExt};
    use crate::{array, number, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_min_scenario() {
        let schema = array(number()).min(2);
        let error = schema.safe_parse(json!([1])).error().cloned().unwrap();
        assert_eq!(error.first().code, IssueCode::TooSmall);
        assert_eq!(schema.parse(json!([1, 2])).unwrap(), Value::from(vec![1, 2]));
    }

    #[test]
    fn test_reports_failing_indices() {
        let schema = array(string());
        let input = json!(["a", 1, "b", 2]);

        let first = schema.parse(input.clone()).unwrap_err();
        assert_eq!(first.len(), 1);
        assert_eq!(first.first().path.as_slice(), &[PathSegment::Index(1)]);

        let all = schema.safe_parse(input).error().cloned().unwrap();
        let paths: Vec<_> = all.issues().iter().map(|i| i.path_string()).collect();
        assert_eq!(paths, vec!["[1]", "[3]"]);
    }

    #[test]
    fn test_length_checks_follow_elements() {
        let schema = array(string()).max(1);
        let error = schema.safe_parse(json!([1, 2])).error().cloned().unwrap();
        let codes: Vec<_> = error.issues().iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![IssueCode::InvalidType, IssueCode::InvalidType, IssueCode::TooBig]
        );
    }

    #[test]
    fn test_exact_and_nonempty() {
        assert!(array(number()).length(2).is_valid(json!([1, 2])));
        assert!(!array(number()).length(2).is_valid(json!([1])));
        assert!(!array(number()).nonempty().is_valid(json!([])));
        assert!(number().array().is_valid(json!([])));
    }

    #[test]
    fn test_elements_are_normalized() {
        let schema = array(string().trim());
        assert_eq!(
            schema.parse(json!([" a "])).unwrap(),
            Value::from(vec!["a"])
        );
    }
}
