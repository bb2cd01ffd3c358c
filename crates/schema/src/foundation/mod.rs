//! Core validation types and traits
//!
//! - **Traits**: [`Validate`], [`ValidateExt`]
//! - **Errors**: [`Issue`], [`ValidationError`], [`SchemaError`], [`CodecError`]
//! - **Configuration**: [`ParseOptions`], [`ParseContext`]
//! - **Messages**: [`Message`], [`MessageCatalog`], [`EnglishCatalog`]
//!
//! Every schema implements [`Validate::validate`], which receives the input
//! and a context and returns either the output value or a list of issues.
//! Composite schemas prepend their path segment to child issues and, in
//! [`IssueMode::Collect`], keep validating after the first failure.

pub mod context;
pub mod error;
pub mod messages;
pub mod traits;

pub use context::{IssueMode, Outcome, ParseContext, ParseOptions, ParseResult};
pub use error::{
    CodecError, FlattenedErrors, Issue, IssueCode, Path, PathSegment, SchemaError,
    ValidationError, format_path,
};
pub use messages::{Bound, EnglishCatalog, Format, Message, MessageCatalog, Origin};
pub use traits::{Validate, ValidateExt};
