//! # vellum-schema
//!
//! Composable, immutable runtime validation for dynamic values.
//!
//! A schema is built once from small constructors and chained modifiers,
//! then used to check untrusted input: `parse` returns the normalized
//! output or the first issue, `safe_parse` reports every issue, `is_valid`
//! only answers yes or no.
//!
//! ## Quick Start
//!
//! ```
//! use vellum_schema::prelude::*;
//! use serde_json::json;
//!
//! let user = object!{
//!     "id" => string().uuid(),
//!     "age" => number().int().positive(),
//!     "tags" => array(string().trim().min(1)).max(5).default(Value::Array(vec![])),
//! };
//!
//! let result = user.safe_parse(json!({"id": "not-a-uuid", "age": -1}));
//! let error = result.error().unwrap();
//! assert_eq!(error.len(), 2);
//! assert_eq!(error.issues()[0].path_string(), "id");
//! assert_eq!(error.issues()[1].path_string(), "age");
//! ```
//!
//! ## Building blocks
//!
//! - **Leaves**: [`string`], [`number`], [`boolean`], [`bigint`], [`date`],
//!   [`symbol`], [`literal`], [`enumeration`], [`any`], [`unknown`],
//!   [`never`], [`null`], [`undefined`]
//! - **Coercion**: [`coerce::string`], [`coerce::number`],
//!   [`coerce::boolean`], [`coerce::bigint`], [`coerce::date`]
//! - **Structures**: [`object`], [`array`], [`tuple`], [`record`], [`set`],
//!   [`map`]
//! - **Composition**: [`union`], [`discriminated_union`], [`intersection`],
//!   [`lazy`], and the modifiers on [`ValidateExt`]
//! - **Codecs**: [`codec`], [`codec_async`]
//!
//! Every builder method returns a new schema; nothing is ever mutated in
//! place, so schemas can be shared freely between threads.

// Issue vectors are the error type of every node; boxing them would add an
// allocation to each failing check.
#![allow(clippy::result_large_err)]

pub mod codec;
pub mod coerce;
pub mod collections;
pub mod combinators;
pub mod foundation;
pub mod keys;
mod macros;
pub mod prelude;
pub mod schema;
pub mod validators;
pub mod value;

pub use codec::{Codec, codec, codec_async};
pub use collections::{
    ArraySchema, MapSchema, ObjectSchema, RecordSchema, SetSchema, TupleSchema, UnknownKeys,
};
pub use combinators::{
    CatchSchema, DefaultSchema, DiscriminatedUnionSchema, IntersectionSchema, LazySchema,
    NullableSchema, OptionalSchema, PipeSchema, RefineSchema, TransformSchema, UnionSchema,
};
pub use foundation::{
    CodecError, EnglishCatalog, FlattenedErrors, Issue, IssueCode, IssueMode, Message,
    MessageCatalog, ParseContext, ParseOptions, ParseResult, Path, PathSegment, SchemaError,
    Validate, ValidateExt, ValidationError,
};
pub use schema::{Schema, SchemaKind};
pub use validators::{
    AnySchema, BigIntSchema, BooleanSchema, DateSchema, EnumSchema, LiteralSchema, NeverSchema,
    NullSchema, NumberSchema, StringSchema, SymbolSchema, UndefinedSchema, UnknownSchema,
};
pub use value::{Object, Symbol, Value, ValueKind};

// ============================================================================
// LEAF CONSTRUCTORS
// ============================================================================

pub fn string() -> StringSchema {
    StringSchema::new()
}

pub fn number() -> NumberSchema {
    NumberSchema::new()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

/// Arbitrary-precision integers, limited to the `i128` range.
pub fn bigint() -> BigIntSchema {
    BigIntSchema::new()
}

/// Dates, or text and epoch milliseconds that parse as one.
pub fn date() -> DateSchema {
    DateSchema::new()
}

pub fn symbol() -> SymbolSchema {
    SymbolSchema
}

pub fn any() -> AnySchema {
    AnySchema
}

pub fn unknown() -> UnknownSchema {
    UnknownSchema
}

/// Rejects every input.
pub fn never() -> NeverSchema {
    NeverSchema
}

pub fn null() -> NullSchema {
    NullSchema
}

pub fn undefined() -> UndefinedSchema {
    UndefinedSchema
}

/// Accepts exactly `value`.
pub fn literal(value: impl Into<Value>) -> LiteralSchema {
    LiteralSchema::new(value)
}

/// Accepts one of a fixed set of strings.
pub fn enumeration<I, S>(options: I) -> EnumSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumSchema::new(options)
}

// ============================================================================
// STRUCTURE CONSTRUCTORS
// ============================================================================

/// See also the [`object!`] macro.
pub fn object<I, K, S>(fields: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<Schema>,
{
    ObjectSchema::new(fields)
}

pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema::new(element)
}

pub fn tuple<I, S>(items: I) -> TupleSchema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    TupleSchema::new(items)
}

/// Objects with arbitrary keys whose values all match `value`.
pub fn record(value: impl Into<Schema>) -> RecordSchema {
    RecordSchema::new(value)
}

/// Like [`record`], also validating every key with `key`.
pub fn record_with_key(key: impl Into<Schema>, value: impl Into<Schema>) -> RecordSchema {
    RecordSchema::with_key(key, value)
}

pub fn set(element: impl Into<Schema>) -> SetSchema {
    SetSchema::new(element)
}

pub fn map(key: impl Into<Schema>, value: impl Into<Schema>) -> MapSchema {
    MapSchema::new(key, value)
}

// ============================================================================
// COMPOSITION CONSTRUCTORS
// ============================================================================

/// The first alternative (in order) that accepts the input wins.
pub fn union<I, S>(options: I) -> UnionSchema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    UnionSchema::new(options)
}

/// A union of object schemas selected by the literal value of `discriminator`.
///
/// # Errors
///
/// Fails when an option does not declare `discriminator` as a literal or
/// enumeration, or when two options claim the same value.
pub fn discriminated_union<I>(
    discriminator: impl Into<String>,
    options: I,
) -> Result<DiscriminatedUnionSchema, SchemaError>
where
    I: IntoIterator<Item = ObjectSchema>,
{
    DiscriminatedUnionSchema::new(discriminator, options)
}

pub fn intersection(left: impl Into<Schema>, right: impl Into<Schema>) -> IntersectionSchema {
    IntersectionSchema::new(left.into(), right.into())
}

/// Defers building a schema until it is first used, for recursive shapes.
pub fn lazy<F>(init: F) -> LazySchema
where
    F: Fn() -> Schema + Send + Sync + 'static,
{
    LazySchema::new(init)
}
