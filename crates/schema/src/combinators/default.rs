//! DEFAULT and CATCH combinators

use std::fmt;
use std::sync::Arc;

use crate::foundation::{Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::value::Value;

type Factory = Arc<dyn Fn() -> Value + Send + Sync>;

/// Where a substitute value comes from.
#[derive(Clone)]
enum Fallback {
    Value(Value),
    Factory(Factory),
}

impl Fallback {
    fn get(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

// ============================================================================
// DEFAULT
// ============================================================================

/// Substitutes a value for [`Value::Undefined`].
///
/// The substitute is returned as is; the inner schema only sees inputs that
/// are present. A present but invalid input still fails.
#[derive(Debug, Clone)]
pub struct DefaultSchema {
    inner: Schema,
    fallback: Fallback,
}

impl DefaultSchema {
    pub fn new(inner: Schema, value: Value) -> Self {
        Self {
            inner,
            fallback: Fallback::Value(value),
        }
    }

    /// Calls `factory` for every absent input.
    pub fn with_factory<F>(inner: Schema, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            inner,
            fallback: Fallback::Factory(Arc::new(factory)),
        }
    }

    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl Validate for DefaultSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        if input.is_undefined() {
            return Ok(self.fallback.get());
        }
        self.inner.validate(input, ctx)
    }
}

// ============================================================================
// CATCH
// ============================================================================

/// Substitutes a value whenever the inner schema fails.
#[derive(Debug, Clone)]
pub struct CatchSchema {
    inner: Schema,
    fallback: Fallback,
}

impl CatchSchema {
    pub fn new(inner: Schema, value: Value) -> Self {
        Self {
            inner,
            fallback: Fallback::Value(value),
        }
    }

    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl Validate for CatchSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        self.inner
            .validate(input, ctx)
            .or_else(|_| Ok(self.fallback.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, ValidateExt};
    use crate::{array, number, string};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_default_covers_absence_only() {
        let schema = number().min(10.0).default(3);
        assert_eq!(schema.parse(Value::Undefined).unwrap(), Value::from(3));
        assert_eq!(schema.parse(12).unwrap(), Value::from(12));
        assert_eq!(
            schema.parse("12").unwrap_err().first().code,
            IssueCode::InvalidType
        );
        assert!(!schema.is_valid(Value::Null));
    }

    #[test]
    fn test_default_factory_runs_per_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = array(string()).default_with(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::Array(Vec::new())
        });

        assert_eq!(schema.parse(Value::Undefined).unwrap(), Value::Array(Vec::new()));
        assert_eq!(schema.parse(Value::Undefined).unwrap(), Value::Array(Vec::new()));
        assert!(schema.is_valid(vec!["a"]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_catch_recovers_from_any_failure() {
        let schema = number().int().catch(0);
        assert_eq!(schema.parse(1.5).unwrap(), Value::from(0));
        assert_eq!(schema.parse("x").unwrap(), Value::from(0));
        assert_eq!(schema.parse(Value::Undefined).unwrap(), Value::from(0));
        assert_eq!(schema.parse(7).unwrap(), Value::from(7));
    }

    #[test]
    fn test_debug_elides_factory() {
        let schema = string().default_with(|| Value::from("x"));
        assert!(format!("{schema:?}").contains("Factory(..)"));
    }
}
