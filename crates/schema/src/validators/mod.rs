//! Leaf schemas
//!
//! - **Text**: [`StringSchema`] with length, format and pattern checks
//! - **Numeric**: [`NumberSchema`], [`BigIntSchema`]
//! - **Time**: [`DateSchema`]
//! - **Exact values**: [`LiteralSchema`], [`EnumSchema`]
//! - **Special**: [`AnySchema`], [`UnknownSchema`], [`NeverSchema`],
//!   [`NullSchema`], [`UndefinedSchema`], [`SymbolSchema`], [`BooleanSchema`]
//!
//! Each leaf holds an ordered list of checks. Builder methods return a new
//! schema with one more check appended; the first failing check decides the
//! issue.

use std::sync::Arc;

use crate::foundation::{Message, Outcome, ParseContext};
use crate::value::Value;

pub mod bigint;
pub mod boolean;
pub mod date;
pub mod enumeration;
pub mod literal;
pub mod number;
pub mod special;
pub mod string;

pub use bigint::BigIntSchema;
pub use boolean::BooleanSchema;
pub use date::DateSchema;
pub use enumeration::EnumSchema;
pub use literal::LiteralSchema;
pub use number::NumberSchema;
pub use special::{AnySchema, NeverSchema, NullSchema, SymbolSchema, UndefinedSchema, UnknownSchema};
pub use string::StringSchema;

// ============================================================================
// CHECK LIST
// ============================================================================

/// One declared check and its optional custom message.
#[derive(Debug, Clone)]
pub(crate) struct Check<K> {
    pub(crate) kind: K,
    pub(crate) message: Option<Arc<str>>,
}

/// Ordered checks of a leaf schema, plus the message for a wrong-kind input.
#[derive(Debug, Clone)]
pub(crate) struct Checks<K> {
    items: Vec<Check<K>>,
    type_message: Option<Arc<str>>,
}

impl<K: Clone> Checks<K> {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            type_message: None,
        }
    }

    /// A copy with `kind` appended.
    pub(crate) fn with(&self, kind: K) -> Self {
        let mut next = self.clone();
        next.items.push(Check {
            kind,
            message: None,
        });
        next
    }

    /// A copy whose last check reports `message`; with no checks declared
    /// the message applies to the wrong-kind issue.
    pub(crate) fn with_message(&self, message: &str) -> Self {
        let mut next = self.clone();
        let message: Arc<str> = Arc::from(message);
        match next.items.last_mut() {
            Some(check) => check.message = Some(message),
            None => next.type_message = Some(message),
        }
        next
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Check<K>> {
        self.items.iter()
    }

    pub(crate) fn type_message(&self) -> Option<&str> {
        self.type_message.as_deref()
    }
}

/// Wrong-kind failure for `input`.
pub(crate) fn invalid_type(
    ctx: &ParseContext<'_>,
    expected: &str,
    input: &Value,
    custom: Option<&str>,
) -> Outcome {
    Err(vec![ctx.issue_with(
        &Message::InvalidType {
            expected,
            received: input.type_name(),
        },
        custom,
    )])
}

/// Coercion failure for `input`.
pub(crate) fn coercion_failed(
    ctx: &ParseContext<'_>,
    target: &str,
    input: &Value,
    custom: Option<&str>,
) -> Outcome {
    Err(vec![ctx.issue_with(
        &Message::CoercionFailed {
            target,
            received: input.type_name(),
        },
        custom,
    )])
}
