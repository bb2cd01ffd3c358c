//! Map schema

use crate::foundation::{Issue, Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::validators::invalid_type;
use crate::value::Value;

/// Validates the keys and values of a [`Value::Map`].
///
/// Issues are reported at `[entry index, "key" | "value"]`. The output is a
/// new map built from the validated entries.
#[derive(Debug, Clone)]
pub struct MapSchema {
    key: Schema,
    value: Schema,
}

impl MapSchema {
    pub fn new(key: impl Into<Schema>, value: impl Into<Schema>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key_schema(&self) -> &Schema {
        &self.key
    }

    pub fn value_schema(&self) -> &Schema {
        &self.value
    }
}

impl Validate for MapSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let Value::Map(entries) = input else {
            return invalid_type(ctx, "map", input, None);
        };

        let mut output = Vec::with_capacity(entries.len());
        let mut issues = Vec::new();
        for (index, (key, value)) in entries.iter().enumerate() {
            let key = validate_entry_part(&self.key, key, index, "key", ctx);
            if key.is_err() && ctx.fail_fast() {
                issues.extend(key.err().unwrap_or_default());
                return Err(issues);
            }
            let value = validate_entry_part(&self.value, value, index, "value", ctx);
            match (key, value) {
                (Ok(key), Ok(value)) => output.push((key, value)),
                (key, value) => {
                    issues.extend(key.err().into_iter().flatten());
                    issues.extend(value.err().into_iter().flatten());
                    if ctx.fail_fast() {
                        return Err(issues);
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(Value::map(output))
        } else {
            Err(issues)
        }
    }
}

fn validate_entry_part(
    schema: &Schema,
    input: &Value,
    index: usize,
    name: &str,
    ctx: &ParseContext<'_>,
) -> Result<Value, Vec<Issue>> {
    schema
        .validate(input, ctx)
        .map_err(|issues| issues.into_iter().map(|issue| issue.at(name).at(index)).collect())
}
