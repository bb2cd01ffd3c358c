//! Core validator traits
//!
//! [`Validate`] is the single contract every schema implements: take a
//! [`Value`] and a [`ParseContext`], return the output value or the issues
//! found. The user-facing entry points (`parse`, `safe_parse`, `is_valid`)
//! are provided methods built on top of it.
//!
//! [`ValidateExt`] adds the universal modifiers (`optional`, `default`,
//! `refine`, `transform`, ...) to every schema through a blanket impl. Each
//! modifier clones the receiver into a new wrapper; the receiver is never
//! touched.

use std::fmt::Display;

use crate::collections::ArraySchema;
use crate::combinators::{
    CatchSchema, DefaultSchema, IntersectionSchema, NullableSchema, OptionalSchema, PipeSchema,
    RefineSchema, TransformSchema, UnionSchema,
};
use crate::foundation::context::{IssueMode, Outcome, ParseContext, ParseOptions, ParseResult};
use crate::foundation::error::{PathSegment, ValidationError};
use crate::schema::Schema;
use crate::value::Value;

// ============================================================================
// VALIDATE
// ============================================================================

/// A schema that can validate a [`Value`].
///
/// Implementors only provide [`Validate::validate`]. Implementations must be
/// pure with respect to `self`: validation never mutates the schema, so one
/// instance can serve any number of concurrent callers.
pub trait Validate: Send + Sync {
    /// Validates `input`, returning the (possibly normalized) output.
    ///
    /// Composite schemas consult `ctx` to decide whether to keep going after
    /// the first issue.
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome;

    /// Validates and returns the output, or the first issue found.
    fn parse(&self, input: impl Into<Value>) -> Result<Value, ValidationError>
    where
        Self: Sized,
    {
        self.parse_with(input, ParseOptions::shared())
    }

    fn parse_with(
        &self,
        input: impl Into<Value>,
        options: &ParseOptions,
    ) -> Result<Value, ValidationError>
    where
        Self: Sized,
    {
        let ctx = ParseContext::new(options, IssueMode::FailFast);
        run(self, &input.into(), &ctx).into_result()
    }

    /// Validates without failing; every issue found is reported.
    fn safe_parse(&self, input: impl Into<Value>) -> ParseResult
    where
        Self: Sized,
    {
        self.safe_parse_with(input, ParseOptions::shared())
    }

    fn safe_parse_with(&self, input: impl Into<Value>, options: &ParseOptions) -> ParseResult
    where
        Self: Sized,
    {
        let mode = if options.is_abort_early() {
            IssueMode::FailFast
        } else {
            IssueMode::Collect
        };
        let ctx = ParseContext::new(options, mode);
        run(self, &input.into(), &ctx)
    }

    /// `true` when `input` passes; issue detail is discarded.
    fn is_valid(&self, input: impl Into<Value>) -> bool
    where
        Self: Sized,
    {
        let ctx = ParseContext::new(ParseOptions::shared(), IssueMode::FailFast);
        self.validate(&input.into(), &ctx).is_ok()
    }
}

/// Runs a top-level validation and records failures.
pub(crate) fn run(schema: &dyn Validate, input: &Value, ctx: &ParseContext<'_>) -> ParseResult {
    let outcome = schema.validate(input, ctx);
    if let Err(issues) = &outcome
        && let Some(first) = issues.first()
    {
        tracing::trace!(
            issues = issues.len(),
            code = %first.code,
            path = %first.path_string(),
            "validation failed"
        );
    }
    ParseResult::from(outcome)
}

// ============================================================================
// EXTENSION TRAIT
// ============================================================================

/// Universal modifiers, available on every schema.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let port = number().int().min(1.0).max(65535.0).default(8080);
///
/// assert_eq!(port.parse(Value::Undefined).unwrap(), Value::from(8080));
/// assert!(port.parse("80").is_err());
/// ```
pub trait ValidateExt: Validate + Clone + Into<Schema> {
    /// Erases the concrete type.
    fn into_schema(&self) -> Schema {
        self.clone().into()
    }

    /// Accepts [`Value::Undefined`] unchanged.
    fn optional(&self) -> OptionalSchema {
        OptionalSchema::new(self.into_schema())
    }

    /// Accepts [`Value::Null`] unchanged.
    fn nullable(&self) -> NullableSchema {
        NullableSchema::new(self.into_schema())
    }

    /// Accepts both [`Value::Undefined`] and [`Value::Null`].
    fn nullish(&self) -> OptionalSchema {
        OptionalSchema::new(self.nullable().into())
    }

    /// Substitutes `value` when the input is absent.
    fn default(&self, value: impl Into<Value>) -> DefaultSchema {
        DefaultSchema::new(self.into_schema(), value.into())
    }

    /// Like [`ValidateExt::default`], calling `factory` for each absent input.
    fn default_with<F>(&self, factory: F) -> DefaultSchema
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        DefaultSchema::with_factory(self.into_schema(), factory)
    }

    /// Substitutes `value` whenever validation fails.
    fn catch(&self, value: impl Into<Value>) -> CatchSchema {
        CatchSchema::new(self.into_schema(), value.into())
    }

    /// Adds a predicate run on the validated value.
    fn refine<F>(&self, predicate: F, message: impl Into<String>) -> RefineSchema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        RefineSchema::new(self.into_schema(), predicate, message.into())
    }

    /// Like [`ValidateExt::refine`], reporting the issue at `path`.
    fn refine_at<F, P>(&self, predicate: F, message: impl Into<String>, path: P) -> RefineSchema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
        P: IntoIterator,
        P::Item: Into<PathSegment>,
    {
        RefineSchema::new(self.into_schema(), predicate, message.into())
            .with_path(path.into_iter().map(Into::into))
    }

    /// Maps the validated value.
    fn transform<F, T>(&self, map: F) -> TransformSchema
    where
        F: Fn(Value) -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        TransformSchema::new(self.into_schema(), move |value| Ok(map(value).into()))
    }

    /// Maps the validated value with a conversion that may fail.
    fn try_transform<F, T, E>(&self, map: F) -> TransformSchema
    where
        F: Fn(Value) -> Result<T, E> + Send + Sync + 'static,
        T: Into<Value>,
        E: Display,
    {
        TransformSchema::new(self.into_schema(), move |value| {
            map(value).map(Into::into).map_err(|error| error.to_string())
        })
    }

    /// Feeds the output into `next`.
    fn pipe(&self, next: impl Into<Schema>) -> PipeSchema {
        PipeSchema::new(self.into_schema(), next.into())
    }

    fn or(&self, other: impl Into<Schema>) -> UnionSchema {
        UnionSchema::new([self.into_schema(), other.into()])
    }

    fn and(&self, other: impl Into<Schema>) -> IntersectionSchema {
        IntersectionSchema::new(self.into_schema(), other.into())
    }

    /// An array of this schema.
    fn array(&self) -> ArraySchema {
        ArraySchema::new(self.into_schema())
    }
}

impl<T> ValidateExt for T where T: Validate + Clone + Into<Schema> {}
