//! Prelude module for convenient imports.
//!
//! ```
//! use vellum_schema::prelude::*;
//!
//! let port = number().int().min(1.0).max(65535.0);
//! let host = string().trim().min(1);
//! let server = object!{ "host" => host, "port" => port.default(8080) };
//! assert!(server.is_valid(serde_json::json!({"host": "localhost"})));
//! ```

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{
    CodecError, Issue, IssueCode, ParseOptions, ParseResult, PathSegment, SchemaError, Validate,
    ValidateExt, ValidationError,
};
pub use crate::schema::Schema;
pub use crate::value::{Value, ValueKind};

// ============================================================================
// CONSTRUCTORS
// ============================================================================

pub use crate::coerce;
pub use crate::{
    any, array, bigint, boolean, codec, codec_async, date, discriminated_union, enumeration,
    intersection, lazy, literal, map, never, null, number, object, record, record_with_key, set,
    string, symbol, tuple, undefined, union, unknown,
};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{all_of, any_of};
