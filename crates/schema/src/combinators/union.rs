//! UNION combinators
//!
//! [`UnionSchema`] tries its alternatives in declaration order and returns
//! the first success. [`DiscriminatedUnionSchema`] picks exactly one object
//! alternative by the value of a tag field.

use std::sync::Arc;

use crate::collections::ObjectSchema;
use crate::foundation::{Issue, Message, Outcome, ParseContext, SchemaError, Validate};
use crate::schema::Schema;
use crate::validators::invalid_type;
use crate::value::{KindSet, UNDEFINED, Value};

// ============================================================================
// UNION
// ============================================================================

/// Accepts a value if any alternative does; the earliest alternative wins.
///
/// Alternatives whose accepted value kinds cannot include the input's kind
/// are skipped on the first pass. They are only run, for their messages,
/// once every other alternative has failed, so skipping never changes which
/// alternative wins.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let id = string().uuid().or(number().int().positive());
///
/// assert!(id.is_valid(42));
/// assert!(id.is_valid("123e4567-e89b-12d3-a456-426614174000"));
/// assert_eq!(
///     id.parse(true).unwrap_err().first().code,
///     IssueCode::InvalidUnion
/// );
/// ```
#[derive(Debug, Clone)]
pub struct UnionSchema {
    options: Arc<[Schema]>,
    hints: Arc<[Option<KindSet>]>,
}

impl UnionSchema {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        let options: Arc<[Schema]> = options.into_iter().map(Into::into).collect();
        let hints = options.iter().map(Schema::input_kinds).collect();
        Self { options, hints }
    }

    pub fn options(&self) -> &[Schema] {
        &self.options
    }

    /// A new union with `option` appended as the lowest-precedence alternative.
    pub fn or(&self, option: impl Into<Schema>) -> Self {
        Self::new(self.options.iter().cloned().chain([option.into()]))
    }

    fn no_match(&self, ctx: &ParseContext<'_>, failures: Vec<(usize, Vec<Issue>)>) -> Issue {
        let alternatives: Vec<String> = failures
            .iter()
            .filter_map(|(_, issues)| issues.first().map(ToString::to_string))
            .collect();
        let nested = failures.into_iter().flat_map(|(_, issues)| issues).collect();
        ctx.issue(&Message::InvalidUnion {
            alternatives: &alternatives,
        })
        .with_nested(nested)
    }
}

impl Validate for UnionSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let kind = input.kind();
        let mut failures = Vec::with_capacity(self.options.len());
        let mut skipped = Vec::new();

        for (index, (option, hint)) in self.options.iter().zip(self.hints.iter()).enumerate() {
            if hint.is_some_and(|kinds| !kinds.contains(kind)) {
                skipped.push(index);
                continue;
            }
            match option.validate(input, ctx) {
                Ok(value) => return Ok(value),
                Err(issues) => failures.push((index, issues)),
            }
        }

        if !skipped.is_empty() {
            tracing::debug!(
                skipped = skipped.len(),
                kind = %kind,
                "union had no match; running kind-rejected alternatives for messages"
            );
            for index in skipped {
                match self.options[index].validate(input, ctx) {
                    Ok(value) => return Ok(value),
                    Err(issues) => failures.push((index, issues)),
                }
            }
            failures.sort_by_key(|(index, _)| *index);
        }

        Err(vec![self.no_match(ctx, failures)])
    }
}

// ============================================================================
// DISCRIMINATED UNION
// ============================================================================

/// Dispatches object inputs on a tag field.
///
/// Every option must declare the tag as a literal or an enumeration; the
/// mapping from tag value to option is built once, at construction.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
/// use serde_json::json;
///
/// let shape = discriminated_union("type", [
///     object!{ "type" => literal("circle"), "radius" => number() },
///     object!{ "type" => literal("square"), "side" => number() },
/// ])
/// .unwrap();
///
/// assert!(shape.is_valid(json!({"type": "square", "side": 2})));
/// let error = shape.parse(json!({"type": "hexagon"})).unwrap_err();
/// assert_eq!(error.first().path_string(), "type");
/// ```
#[derive(Debug, Clone)]
pub struct DiscriminatedUnionSchema {
    discriminator: String,
    options: Arc<[ObjectSchema]>,
    lookup: Arc<[(Value, usize)]>,
}

impl DiscriminatedUnionSchema {
    pub fn new<I>(discriminator: impl Into<String>, options: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = ObjectSchema>,
    {
        let discriminator = discriminator.into();
        let options: Vec<ObjectSchema> = options.into_iter().collect();
        let mut lookup: Vec<(Value, usize)> = Vec::new();

        for (index, option) in options.iter().enumerate() {
            let values = option
                .get(&discriminator)
                .and_then(Schema::literal_values)
                .ok_or_else(|| SchemaError::MissingDiscriminator {
                    discriminator: discriminator.clone(),
                    index,
                })?;
            for value in values {
                if lookup.iter().any(|(known, _)| known.same_value(&value)) {
                    return Err(SchemaError::DuplicateDiscriminator {
                        value: value.to_string(),
                    });
                }
                lookup.push((value, index));
            }
        }

        Ok(Self {
            discriminator,
            options: options.into(),
            lookup: lookup.into(),
        })
    }

    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    pub fn options(&self) -> &[ObjectSchema] {
        &self.options
    }
}

fn tag_label(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_owned)
}

impl Validate for DiscriminatedUnionSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let Value::Object(map) = input else {
            return invalid_type(ctx, "object", input, None);
        };
        let tag = map.get(&self.discriminator).unwrap_or(&UNDEFINED);

        match self.lookup.iter().find(|(value, _)| value.same_value(tag)) {
            Some((_, index)) => self.options[*index].validate(input, ctx),
            None => {
                let options: Vec<String> = self.lookup.iter().map(|(value, _)| tag_label(value)).collect();
                let issue = ctx
                    .issue(&Message::InvalidUnionDiscriminator {
                        discriminator: &self.discriminator,
                        options: &options,
                    })
                    .at(self.discriminator.as_str());
                Err(vec![issue])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, ValidateExt};
    use crate::{
        boolean, discriminated_union, enumeration, literal, number, object, string, union,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_first_matching_alternative_wins() {
        let schema = union([
            string().transform(|_| "first").into_schema(),
            string().transform(|_| "second").into_schema(),
        ]);
        assert_eq!(schema.parse("x").unwrap(), Value::from("first"));
    }

    #[test]
    fn test_failure_lists_every_alternative() {
        let schema = union([string().into_schema(), number().into_schema()]);
        let error = schema.parse(true).unwrap_err();
        let issue = error.first();
        assert_eq!(issue.code, IssueCode::InvalidUnion);
        assert_eq!(
            issue.message,
            "Invalid input: Expected string, received boolean; or Expected number, received boolean"
        );
        assert_eq!(issue.nested.len(), 2);
    }

    #[test]
    fn test_skipped_alternatives_keep_declaration_order() {
        let schema = union([
            string().into_schema(),
            crate::coerce::number().min(10.0).into_schema(),
        ]);
        let error = schema.parse(3).unwrap_err();
        let codes: Vec<_> = error.first().nested.iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![IssueCode::InvalidType, IssueCode::TooSmall]);
    }

    #[test]
    fn test_coercing_alternatives_are_never_skipped() {
        let schema = boolean().or(crate::coerce::number());
        assert_eq!(schema.parse("7").unwrap(), Value::from(7));
    }

    #[test]
    fn test_empty_union_rejects_everything() {
        let schema = union(Vec::<Schema>::new());
        assert_eq!(schema.parse(1).unwrap_err().first().message, "Invalid input");
    }

    fn event() -> DiscriminatedUnionSchema {
        discriminated_union(
            "kind",
            [
                object([
                    ("kind", literal("click").into_schema()),
                    ("x", number().into_schema()),
                ]),
                object([
                    ("kind", enumeration(["key_up", "key_down"]).into_schema()),
                    ("key", string().into_schema()),
                ]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dispatches_on_tag() {
        assert!(event().is_valid(json!({"kind": "click", "x": 1})));
        assert!(event().is_valid(json!({"kind": "key_up", "key": "a"})));

        let error = event().parse(json!({"kind": "click", "key": "a"})).unwrap_err();
        assert_eq!(error.first().path_string(), "x");
    }

    #[test]
    fn test_unknown_tag() {
        let error = event().parse(json!({"kind": "scroll"})).unwrap_err();
        assert_eq!(error.first().code, IssueCode::InvalidUnionDiscriminator);
        assert_eq!(
            error.first().message,
            "Invalid discriminator value. Expected 'click' | 'key_up' | 'key_down'"
        );
        assert_eq!(event().parse(1).unwrap_err().first().code, IssueCode::InvalidType);
    }

    #[test]
    fn test_construction_errors() {
        let missing = discriminated_union("kind", [object([("x", number().into_schema())])]);
        assert!(matches!(missing, Err(SchemaError::MissingDiscriminator { index: 0, .. })));

        let duplicate = discriminated_union(
            "kind",
            [
                object([("kind", literal("a").into_schema())]),
                object([("kind", literal("a").into_schema())]),
            ],
        );
        assert!(matches!(duplicate, Err(SchemaError::DuplicateDiscriminator { .. })));
    }
}
