//! Boolean schema

use std::sync::Arc;

use crate::coerce;
use crate::foundation::{Outcome, ParseContext, Validate};
use crate::validators::{coercion_failed, invalid_type};
use crate::value::Value;

/// Accepts `true` and `false`.
#[derive(Debug, Clone)]
pub struct BooleanSchema {
    coerce: bool,
    message: Option<Arc<str>>,
}

#[allow(clippy::new_without_default)]
impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            coerce: false,
            message: None,
        }
    }

    pub(crate) fn coerced(&self) -> Self {
        Self {
            coerce: true,
            ..self.clone()
        }
    }

    pub(crate) fn is_coerced(&self) -> bool {
        self.coerce
    }

    /// Replaces the wrong-kind message.
    pub fn message(&self, message: &str) -> Self {
        Self {
            message: Some(Arc::from(message)),
            ..self.clone()
        }
    }
}

impl Validate for BooleanSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        match input {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            other if self.coerce => match coerce::to_boolean(other) {
                Some(b) => Ok(Value::Bool(b)),
                None => coercion_failed(ctx, "boolean", other, self.message.as_deref()),
            },
            other => invalid_type(ctx, "boolean", other, self.message.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolean;

    #[test]
    fn test_boolean() {
        assert_eq!(boolean().parse(true).unwrap(), Value::Bool(true));
        assert!(boolean().parse("true").is_err());
        assert_eq!(
            boolean().message("yes or no").parse(1).unwrap_err().first().message,
            "yes or no"
        );
    }
}
