//! Tuple schema

use crate::collections::validate_child;
use crate::foundation::{Message, Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::validators::invalid_type;
use crate::value::Value;

/// A fixed-length array with one schema per position.
///
/// A length mismatch is reported on its own, before any element is checked.
#[derive(Debug, Clone)]
pub struct TupleSchema {
    items: Vec<Schema>,
}

impl TupleSchema {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn items(&self) -> &[Schema] {
        &self.items
    }
}

impl Validate for TupleSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let Value::Array(values) = input else {
            return invalid_type(ctx, "array", input, None);
        };
        if values.len() != self.items.len() {
            return ctx.fail(&Message::TupleLength {
                expected: self.items.len(),
                received: values.len(),
            });
        }

        let mut output = Vec::with_capacity(values.len());
        let mut issues = Vec::new();
        for (index, (schema, value)) in self.items.iter().zip(values).enumerate() {
            match validate_child(schema, value, index, ctx) {
                Ok(value) => output.push(value),
                Err(child) => {
                    issues.extend(child);
                    if ctx.fail_fast() {
                        return Err(issues);
                    }
                }
            }
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
    use crate::foundation::{IssueCode, ValidateExt};
    use crate::{boolean, number, string, tuple};
    use serde_json::json;

    fn point() -> TupleSchema {
        tuple([string().into_schema(), number().into_schema(), boolean().into_schema()])
    }

    #[test]
    fn test_positions() {
        assert!(point().is_valid(json!(["a", 1, true])));
        let error = point().parse(json!(["a", "1", true])).unwrap_err();
        assert_eq!(error.first().path_string(), "[1]");
    }

    #[test]
    fn test_length_mismatch_comes_first() {
        let error = point().safe_parse(json!([1, 2])).error().cloned().unwrap();
        assert_eq!(error.len(), 1);
        assert_eq!(error.first().code, IssueCode::TupleLength);
        assert_eq!(error.first().message, "Expected 3 items, received 2");
    }
}
