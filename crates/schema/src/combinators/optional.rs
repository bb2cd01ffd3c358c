//! OPTIONAL and NULLABLE combinators

use crate::foundation::{Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::value::Value;

/// Passes [`Value::Undefined`] through; anything else goes to the inner schema.
#[derive(Debug, Clone)]
pub struct OptionalSchema {
    inner: Schema,
}

impl OptionalSchema {
    pub fn new(inner: Schema) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl Validate for OptionalSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        match input {
            Value::Undefined => Ok(Value::Undefined),
            _ => self.inner.validate(input, ctx),
        }
    }
}

/// Passes [`Value::Null`] through; anything else goes to the inner schema.
#[derive(Debug, Clone)]
pub struct NullableSchema {
    inner: Schema,
}

impl NullableSchema {
    pub fn new(inner: Schema) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl Validate for NullableSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        match input {
            Value::Null => Ok(Value::Null),
            _ => self.inner.validate(input, ctx),
        }
    }
}
