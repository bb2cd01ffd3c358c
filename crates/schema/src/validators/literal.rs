//! Literal schema

use std::sync::Arc;

use crate::foundation::{Message, Outcome, ParseContext, Validate};
use crate::value::Value;

/// Accepts exactly one value, compared with [`Value::same_value`].
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    value: Value,
    message: Option<Arc<str>>,
}

impl LiteralSchema {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            message: None,
        }
    }

    /// The accepted value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn message(&self, message: &str) -> Self {
        Self {
            message: Some(Arc::from(message)),
            ..self.clone()
        }
    }
}

impl Validate for LiteralSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        if input.same_value(&self.value) {
            Ok(input.clone())
        } else {
            Err(vec![ctx.issue_with(
                &Message::InvalidLiteral {
                    expected: &self.value,
                },
                self.message.as_deref(),
            )])
        }
    }
}
