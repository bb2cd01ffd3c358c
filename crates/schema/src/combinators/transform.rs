//! TRANSFORM and PIPE combinators

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::foundation::{Message, Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::value::Value;

type MapFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

// ============================================================================
// TRANSFORM
// ============================================================================

/// Maps the inner schema's output through a user closure.
///
/// A closure that returns `Err` or panics yields a `transform_failed` issue;
/// the failure never escapes `safe_parse`.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let length = string().transform(|value| value.as_str().map_or(0, str::len) as f64);
/// assert_eq!(length.parse("four").unwrap(), Value::from(4));
///
/// let port = string().try_transform(|value| value.as_str().unwrap_or("").parse::<u16>());
/// assert!(port.parse("8080").is_ok());
/// assert_eq!(
///     port.parse("http").unwrap_err().first().code,
///     IssueCode::TransformFailed
/// );
/// ```
#[derive(Clone)]
pub struct TransformSchema {
    inner: Schema,
    map: MapFn,
}

impl TransformSchema {
    pub fn new<F>(inner: Schema, map: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            inner,
            map: Arc::new(map),
        }
    }

    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl Validate for TransformSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let value = self.inner.validate(input, ctx)?;
        let reason = match catch_unwind(AssertUnwindSafe(|| (self.map)(value))) {
            Ok(Ok(mapped)) => return Ok(mapped),
            Ok(Err(reason)) => reason,
            Err(payload) => panic_reason(payload.as_ref()),
        };
        ctx.fail(&Message::TransformFailed { reason: &reason })
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_owned()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "transform panicked".to_owned()
    }
}

impl fmt::Debug for TransformSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformSchema")
            .field("inner", &self.inner)
            .finish()
    }
}

// ============================================================================
// PIPE
// ============================================================================

/// Validates with `first`, then validates its output with `second`.
#[derive(Debug, Clone)]
pub struct PipeSchema {
    first: Schema,
    second: Schema,
}

impl PipeSchema {
    pub fn new(first: Schema, second: Schema) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &Schema {
        &self.first
    }

    pub fn second(&self) -> &Schema {
        &self.second
    }
}

impl Validate for PipeSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let intermediate = self.first.validate(input, ctx)?;
        self.second.validate(&intermediate, ctx)
    }
}
