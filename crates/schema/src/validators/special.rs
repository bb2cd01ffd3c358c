//! Schemas for the special values and the catch-all kinds.

use crate::foundation::{Outcome, ParseContext, Validate};
use crate::validators::invalid_type;
use crate::value::Value;

/// Accepts every value, including [`Value::Undefined`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

/// Accepts every value; the same check as [`AnySchema`] under another name.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownSchema;

/// Rejects every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverSchema;

/// Accepts only [`Value::Null`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSchema;

/// Accepts only [`Value::Undefined`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedSchema;

/// Accepts any [`Value::Symbol`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolSchema;

impl Validate for AnySchema {
    fn validate(&self, input: &Value, _ctx: &ParseContext<'_>) -> Outcome {
        Ok(input.clone())
    }
}

impl Validate for UnknownSchema {
    fn validate(&self, input: &Value, _ctx: &ParseContext<'_>) -> Outcome {
        Ok(input.clone())
    }
}

impl Validate for NeverSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        invalid_type(ctx, "never", input, None)
    }
}

impl Validate for NullSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        match input {
            Value::Null => Ok(Value::Null),
            other => invalid_type(ctx, "null", other, None),
        }
    }
}

impl Validate for UndefinedSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        match input {
            Value::Undefined => Ok(Value::Undefined),
            other => invalid_type(ctx, "undefined", other, None),
        }
    }
}

impl Validate for SymbolSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        match input {
            Value::Symbol(_) => Ok(input.clone()),
            other => invalid_type(ctx, "symbol", other, None),
        }
    }
}
