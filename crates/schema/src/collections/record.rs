//! Record schema: an object with arbitrary keys and uniform values.

use crate::collections::validate_child;
use crate::foundation::{Issue, Message, Outcome, ParseContext, Validate};
use crate::keys::is_dangerous_key;
use crate::schema::Schema;
use crate::validators::invalid_type;
use crate::value::{Object, Value};

/// Validates every value of an object, and optionally every key.
///
/// Keys that could reach a prototype chain are rejected with an
/// `invalid_key` issue. A key schema sees each key as a string; if it
/// normalizes the key, the output uses the normalized form.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    key: Option<Schema>,
    value: Schema,
}

impl RecordSchema {
    pub fn new(value: impl Into<Schema>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    pub fn with_key(key: impl Into<Schema>, value: impl Into<Schema>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }

    pub fn key_schema(&self) -> Option<&Schema> {
        self.key.as_ref()
    }

    pub fn value_schema(&self) -> &Schema {
        &self.value
    }

    fn validate_key(&self, key: &str, ctx: &ParseContext<'_>) -> Result<String, Vec<Issue>> {
        let rejected = |nested: Vec<Issue>| {
            vec![
                ctx.issue(&Message::InvalidKey { key })
                    .with_nested(nested)
                    .at(key),
            ]
        };
        if is_dangerous_key(key) {
            return Err(rejected(Vec::new()));
        }
        let Some(schema) = &self.key else {
            return Ok(key.to_owned());
        };
        match schema.validate(&Value::from(key), ctx) {
            Ok(Value::String(normalized)) if !is_dangerous_key(&normalized) => Ok(normalized),
            Ok(Value::String(_)) => Err(rejected(Vec::new())),
            Ok(_) => Ok(key.to_owned()),
            Err(nested) => Err(rejected(nested)),
        }
    }
}

impl Validate for RecordSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let Value::Object(map) = input else {
            return invalid_type(ctx, "object", input, None);
        };

        let mut output = Object::with_capacity(map.len());
        let mut issues = Vec::new();
        for (key, value) in map {
            let entry = self.validate_key(key, ctx).and_then(|output_key| {
                validate_child(&self.value, value, key.as_str(), ctx).map(|value| (output_key, value))
            });
            match entry {
                Ok((key, value)) => {
                    output.insert(key, value);
                }
                Err(child) => {
                    issues.extend(child);
                    if ctx.fail_fast() {
                        return Err(issues);
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(issues)
        }
    }
}
