//! REFINE combinator - user predicates over validated values

use std::fmt;
use std::sync::Arc;

use crate::foundation::{Message, Outcome, ParseContext, Path, PathSegment, Validate};
use crate::schema::Schema;
use crate::value::Value;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Runs a predicate on the inner schema's output.
///
/// A rejected value produces one `custom` issue carrying the given message,
/// at the configured path (empty by default). The predicate never runs when
/// the inner schema fails.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
/// use serde_json::json;
///
/// let signup = object!{
///     "password" => string().min(8),
///     "confirm" => string(),
/// }
/// .refine_at(
///     |value| value.get("password") == value.get("confirm"),
///     "Passwords do not match",
///     ["confirm"],
/// );
///
/// let error = signup
///     .parse(json!({"password": "hunter2!", "confirm": "hunter3!"}))
///     .unwrap_err();
/// assert_eq!(error.first().path_string(), "confirm");
/// assert_eq!(error.first().message, "Passwords do not match");
/// ```
#[derive(Clone)]
pub struct RefineSchema {
    inner: Schema,
    predicate: Predicate,
    message: String,
    path: Path,
}

impl RefineSchema {
    pub fn new<F>(inner: Schema, predicate: F, message: String) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            inner,
            predicate: Arc::new(predicate),
            message,
            path: Path::new(),
        }
    }

    /// Reports the issue at `path` instead of at the refined value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl IntoIterator<Item = PathSegment>) -> Self {
        self.path = path.into_iter().collect();
        self
    }

    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl Validate for RefineSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let value = self.inner.validate(input, ctx)?;
        if (self.predicate)(&value) {
            Ok(value)
        } else {
            let issue = ctx
                .issue_with(&Message::Custom, Some(&self.message))
                .with_path(self.path.iter().cloned());
            Err(vec![issue])
        }
    }
}

impl fmt::Debug for RefineSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefineSchema")
            .field("inner", &self.inner)
            .field("message", &self.message)
            .field("path", &self.path)
            .finish()
    }
}
