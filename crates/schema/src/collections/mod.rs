//! Structural schemas
//!
//! [`ObjectSchema`], [`ArraySchema`], [`TupleSchema`], [`RecordSchema`],
//! [`SetSchema`] and [`MapSchema`] validate every child and rebuild a fresh
//! output value; the input is never modified. Child issues are re-rooted by
//! prepending the child's key or index to their path.
//!
//! Under [`IssueMode::FailFast`](crate::IssueMode::FailFast) a collection
//! returns at the first failing child; under
//! [`IssueMode::Collect`](crate::IssueMode::Collect) it reports all of them.

pub mod array;
pub mod map;
pub mod object;
pub mod record;
pub mod set;
pub mod tuple;

pub use array::ArraySchema;
pub use map::MapSchema;
pub use object::{ObjectSchema, UnknownKeys};
pub use record::RecordSchema;
pub use set::SetSchema;
pub use tuple::TupleSchema;

use crate::foundation::error::prefix_all;
use crate::foundation::{Bound, Issue, Message, Origin, ParseContext, PathSegment, Validate};
use crate::schema::Schema;
use crate::validators::Checks;
use crate::value::Value;

/// Element-count bound shared by arrays and sets.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SizeCheck {
    Min(usize),
    Max(usize),
    Exact(usize),
}

fn size_failure(check: SizeCheck, len: usize, origin: Origin) -> Option<Message<'static>> {
    let small = |n, exact| Message::TooSmall {
        origin,
        minimum: Bound::Count(n),
        inclusive: true,
        exact,
    };
    let big = |n, exact| Message::TooBig {
        origin,
        maximum: Bound::Count(n),
        inclusive: true,
        exact,
    };
    match check {
        SizeCheck::Min(n) => (len < n).then(|| small(n, false)),
        SizeCheck::Max(n) => (len > n).then(|| big(n, false)),
        SizeCheck::Exact(n) if len < n => Some(small(n, true)),
        SizeCheck::Exact(n) if len > n => Some(big(n, true)),
        SizeCheck::Exact(_) => None,
    }
}

/// First failing size check, as an issue.
pub(crate) fn check_size(
    checks: &Checks<SizeCheck>,
    len: usize,
    origin: Origin,
    ctx: &ParseContext<'_>,
) -> Option<Issue> {
    checks.iter().find_map(|check| {
        size_failure(check.kind, len, origin)
            .map(|message| ctx.issue_with(&message, check.message.as_deref()))
    })
}

/// Validates `input` against `schema`, re-rooting issues under `segment`.
pub(crate) fn validate_child(
    schema: &Schema,
    input: &Value,
    segment: impl Into<PathSegment>,
    ctx: &ParseContext<'_>,
) -> Result<Value, Vec<Issue>> {
    schema
        .validate(input, ctx)
        .map_err(|issues| prefix_all(issues, &segment.into()))
}
