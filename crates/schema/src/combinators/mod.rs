//! Schema combinators
//!
//! Wrappers that change how another schema is applied:
//!
//! - **Presence**: [`OptionalSchema`], [`NullableSchema`], [`DefaultSchema`]
//! - **Recovery**: [`CatchSchema`]
//! - **Post-processing**: [`RefineSchema`], [`TransformSchema`], [`PipeSchema`]
//! - **Alternatives**: [`UnionSchema`], [`DiscriminatedUnionSchema`]
//! - **Conjunction**: [`IntersectionSchema`]
//! - **Recursion**: [`LazySchema`]
//!
//! Every combinator owns its children as [`Schema`](crate::Schema) handles,
//! so wrapping never copies or mutates the wrapped schema.

pub mod default;
pub mod intersection;
pub mod lazy;
pub mod optional;
pub mod refine;
pub mod transform;
pub mod union;

pub use default::{CatchSchema, DefaultSchema};
pub use intersection::IntersectionSchema;
pub use lazy::LazySchema;
pub use optional::{NullableSchema, OptionalSchema};
pub use refine::RefineSchema;
pub use transform::{PipeSchema, TransformSchema};
pub use union::{DiscriminatedUnionSchema, UnionSchema};
