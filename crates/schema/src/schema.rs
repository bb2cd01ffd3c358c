//! Type-erased schema handle
//!
//! [`Schema`] is a cheap, cloneable, thread-safe handle over a closed set of
//! schema nodes. Composite schemas store their children as `Schema`s, and
//! consumers that care about a child's structure (union fast paths,
//! discriminated unions, `partial`/`required`) switch on the node tag instead
//! of probing concrete types.

use std::fmt;
use std::sync::Arc;

use crate::collections::{ArraySchema, MapSchema, ObjectSchema, RecordSchema, SetSchema, TupleSchema};
use crate::combinators::{
    CatchSchema, DefaultSchema, DiscriminatedUnionSchema, IntersectionSchema, LazySchema,
    NullableSchema, OptionalSchema, PipeSchema, RefineSchema, TransformSchema, UnionSchema,
};
use crate::foundation::{Outcome, ParseContext, Validate};
use crate::validators::{
    AnySchema, BigIntSchema, BooleanSchema, DateSchema, EnumSchema, LiteralSchema, NeverSchema,
    NullSchema, NumberSchema, StringSchema, SymbolSchema, UndefinedSchema, UnknownSchema,
};
use crate::value::{KindSet, Value, ValueKind};

macro_rules! schema_nodes {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        #[derive(Debug)]
        pub(crate) enum SchemaNode {
            $($variant($ty),)+
        }

        /// Tag naming the node behind a [`Schema`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SchemaKind {
            $($variant,)+
        }

        impl SchemaNode {
            fn kind(&self) -> SchemaKind {
                match self {
                    $(Self::$variant(_) => SchemaKind::$variant,)+
                }
            }

            fn as_validate(&self) -> &dyn Validate {
                match self {
                    $(Self::$variant(schema) => schema,)+
                }
            }
        }

        $(
            impl From<$ty> for Schema {
                fn from(schema: $ty) -> Self {
                    Self(Arc::new(SchemaNode::$variant(schema)))
                }
            }
        )+
    };
}

schema_nodes! {
    String(StringSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    BigInt(BigIntSchema),
    Date(DateSchema),
    Symbol(SymbolSchema),
    Literal(LiteralSchema),
    Enum(EnumSchema),
    Any(AnySchema),
    Unknown(UnknownSchema),
    Never(NeverSchema),
    Null(NullSchema),
    Undefined(UndefinedSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
    Tuple(TupleSchema),
    Record(RecordSchema),
    Set(SetSchema),
    Map(MapSchema),
    Union(UnionSchema),
    DiscriminatedUnion(DiscriminatedUnionSchema),
    Intersection(IntersectionSchema),
    Optional(OptionalSchema),
    Nullable(NullableSchema),
    Default(DefaultSchema),
    Catch(CatchSchema),
    Refine(RefineSchema),
    Transform(TransformSchema),
    Pipe(PipeSchema),
    Lazy(LazySchema),
}

/// Any schema, behind a shared pointer.
///
/// Cloning is a reference-count increment; the node itself is immutable.
#[derive(Clone)]
pub struct Schema(Arc<SchemaNode>);

impl Schema {
    /// The node tag.
    #[must_use]
    pub fn kind(&self) -> SchemaKind {
        self.0.kind()
    }

    /// The object schema behind this handle, if it is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self.0.as_ref() {
            SchemaNode::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Strips one `optional` wrapper, if present.
    #[must_use]
    pub fn unwrap_optional(&self) -> Schema {
        match self.0.as_ref() {
            SchemaNode::Optional(optional) => optional.inner().clone(),
            _ => self.clone(),
        }
    }

    /// Exact values this schema accepts, when it is a literal or an
    /// enumeration.
    pub(crate) fn literal_values(&self) -> Option<Vec<Value>> {
        match self.0.as_ref() {
            SchemaNode::Literal(literal) => Some(vec![literal.value().clone()]),
            SchemaNode::Enum(options) => Some(
                options
                    .options()
                    .iter()
                    .map(|option| Value::from(option.as_str()))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Value kinds this schema could possibly accept; `None` when unknown.
    ///
    /// The set is a superset of what the schema accepts. Unions use it to
    /// skip alternatives that would certainly fail.
    pub(crate) fn input_kinds(&self) -> Option<KindSet> {
        let only = |kinds: &[ValueKind]| Some(KindSet::of(kinds));
        match self.0.as_ref() {
            SchemaNode::String(schema) if !schema.is_coerced() => only(&[ValueKind::String]),
            SchemaNode::Number(schema) if !schema.is_coerced() => only(&[ValueKind::Number]),
            SchemaNode::Boolean(schema) if !schema.is_coerced() => only(&[ValueKind::Boolean]),
            SchemaNode::BigInt(schema) if !schema.is_coerced() => only(&[ValueKind::BigInt]),
            SchemaNode::String(_)
            | SchemaNode::Number(_)
            | SchemaNode::Boolean(_)
            | SchemaNode::BigInt(_) => None,
            SchemaNode::Date(_) => only(&[ValueKind::Date, ValueKind::String, ValueKind::Number]),
            SchemaNode::Symbol(_) => only(&[ValueKind::Symbol]),
            SchemaNode::Literal(literal) => only(&[literal.value().kind()]),
            SchemaNode::Enum(_) => only(&[ValueKind::String]),
            SchemaNode::Never(_) => Some(KindSet::EMPTY),
            SchemaNode::Null(_) => only(&[ValueKind::Null]),
            SchemaNode::Undefined(_) => only(&[ValueKind::Undefined]),
            SchemaNode::Object(_) | SchemaNode::Record(_) | SchemaNode::DiscriminatedUnion(_) => {
                only(&[ValueKind::Object])
            }
            SchemaNode::Array(_) | SchemaNode::Tuple(_) => only(&[ValueKind::Array]),
            SchemaNode::Set(_) => only(&[ValueKind::Set]),
            SchemaNode::Map(_) => only(&[ValueKind::Map]),
            SchemaNode::Union(union) => union
                .options()
                .iter()
                .try_fold(KindSet::EMPTY, |acc, option| {
                    option.input_kinds().map(|kinds| acc.union(kinds))
                }),
            SchemaNode::Intersection(intersection) => {
                match (intersection.left().input_kinds(), intersection.right().input_kinds()) {
                    (Some(left), Some(right)) => Some(left.intersection(right)),
                    (Some(one), None) | (None, Some(one)) => Some(one),
                    (None, None) => None,
                }
            }
            SchemaNode::Optional(optional) => optional
                .inner()
                .input_kinds()
                .map(|kinds| kinds.with(ValueKind::Undefined)),
            SchemaNode::Nullable(nullable) => nullable
                .inner()
                .input_kinds()
                .map(|kinds| kinds.with(ValueKind::Null)),
            SchemaNode::Default(default) => default
                .inner()
                .input_kinds()
                .map(|kinds| kinds.with(ValueKind::Undefined)),
            SchemaNode::Refine(refine) => refine.inner().input_kinds(),
            SchemaNode::Transform(transform) => transform.inner().input_kinds(),
            SchemaNode::Pipe(pipe) => pipe.first().input_kinds(),
            SchemaNode::Any(_) | SchemaNode::Unknown(_) | SchemaNode::Catch(_) | SchemaNode::Lazy(_) => {
                None
            }
        }
    }
}

impl Validate for Schema {
    #[inline]
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        self.0.as_validate().validate(input, ctx)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidateExt;
    use crate::{date, literal, never, number, string, union};

    #[test]
    fn test_kind_tags_survive_erasure() {
        assert_eq!(string().into_schema().kind(), SchemaKind::String);
        assert_eq!(string().optional().into_schema().kind(), SchemaKind::Optional);
        assert_eq!(
            string().optional().into_schema().unwrap_optional().kind(),
            SchemaKind::String
        );
    }

    #[test]
    fn test_input_kinds_of_wrappers() {
        let hints = string().optional().nullable().into_schema().input_kinds().unwrap();
        assert!(hints.contains(ValueKind::String));
        assert!(hints.contains(ValueKind::Undefined));
        assert!(hints.contains(ValueKind::Null));
        assert!(!hints.contains(ValueKind::Number));

        assert!(crate::coerce::number().into_schema().input_kinds().is_none());
        assert_eq!(never().into_schema().input_kinds(), Some(KindSet::EMPTY));
        assert!(date().into_schema().input_kinds().unwrap().contains(ValueKind::String));
    }

    #[test]
    fn test_union_hints_combine() {
        let hints = union([string().into_schema(), literal(1).into_schema()])
            .into_schema()
            .input_kinds()
            .unwrap();
        assert!(hints.contains(ValueKind::String));
        assert!(hints.contains(ValueKind::Number));

        let mixed = union([number().into_schema(), crate::any().into_schema()]).into_schema();
        assert!(mixed.input_kinds().is_none());
    }
}
