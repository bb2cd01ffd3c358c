//! Object schema
//!
//! Fields are validated in shape order; the output lists shape fields first,
//! in declaration order, followed by whatever extra keys the unknown-key
//! policy keeps. A field missing from the input is validated as
//! [`Value::Undefined`] and left out of the output when its schema passes it
//! through unchanged.

use indexmap::IndexMap;

use crate::collections::validate_child;
use crate::foundation::{Message, Outcome, ParseContext, Validate, ValidateExt};
use crate::keys::is_dangerous_key;
use crate::schema::{Schema, SchemaKind};
use crate::validators::{EnumSchema, invalid_type};
use crate::value::{Object, UNDEFINED, Value};

/// What happens to input keys that are not part of the shape.
#[derive(Debug, Clone, Default)]
pub enum UnknownKeys {
    /// Dropped from the output.
    #[default]
    Strip,
    /// Reported as one `unrecognized_keys` issue.
    Strict,
    /// Copied to the output unvalidated.
    Passthrough,
    /// Validated against the given schema and copied to the output.
    Catchall(Schema),
}

/// Validates records with a known set of fields.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
/// use serde_json::json;
///
/// let user = object!{
///     "name" => string().min(1),
///     "email" => string().email().optional(),
/// };
///
/// let parsed = user.parse(json!({"name": "Ada", "role": "admin"})).unwrap();
/// assert_eq!(parsed.to_json(), json!({"name": "Ada"}));
///
/// assert!(user.strict().parse(json!({"name": "Ada", "role": "admin"})).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    shape: IndexMap<String, Schema>,
    unknown_keys: UnknownKeys,
}

impl ObjectSchema {
    pub fn new<I, K, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        Self {
            shape: fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema.into()))
                .collect(),
            unknown_keys: UnknownKeys::Strip,
        }
    }

    fn with_shape(&self, shape: IndexMap<String, Schema>) -> Self {
        Self {
            shape,
            unknown_keys: self.unknown_keys.clone(),
        }
    }

    fn with_unknown_keys(&self, unknown_keys: UnknownKeys) -> Self {
        Self {
            shape: self.shape.clone(),
            unknown_keys,
        }
    }

    /// Fields in declaration order.
    pub fn shape(&self) -> &IndexMap<String, Schema> {
        &self.shape
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.shape.get(name)
    }

    pub fn unknown_keys(&self) -> &UnknownKeys {
        &self.unknown_keys
    }

    /// Adds a field, or replaces the schema of an existing one in place.
    pub fn field(&self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let mut shape = self.shape.clone();
        shape.insert(name.into(), schema.into());
        self.with_shape(shape)
    }

    /// Adds or replaces several fields.
    pub fn extend<I, K, S>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        let mut shape = self.shape.clone();
        shape.extend(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema.into())),
        );
        self.with_shape(shape)
    }

    /// Combines two objects; `other` wins on shared fields and its
    /// unknown-key policy applies.
    pub fn merge(&self, other: &ObjectSchema) -> Self {
        let mut shape = self.shape.clone();
        shape.extend(other.shape.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            shape,
            unknown_keys: other.unknown_keys.clone(),
        }
    }

    /// Keeps only the named fields; unknown names are ignored.
    pub fn pick<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        self.with_shape(
            self.shape
                .iter()
                .filter(|(name, _)| names.iter().any(|n| n.as_ref() == name.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Drops the named fields.
    pub fn omit<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        self.with_shape(
            self.shape
                .iter()
                .filter(|(name, _)| !names.iter().any(|n| n.as_ref() == name.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Makes every field optional.
    pub fn partial(&self) -> Self {
        self.map_fields(|_| true, make_optional)
    }

    /// Makes the named fields optional.
    pub fn partial_keys<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        self.map_fields(
            |name| names.iter().any(|n| n.as_ref() == name),
            make_optional,
        )
    }

    /// Removes the `optional` wrapper from every field.
    pub fn required(&self) -> Self {
        self.map_fields(|_| true, Schema::unwrap_optional)
    }

    fn map_fields(&self, selected: impl Fn(&str) -> bool, map: impl Fn(&Schema) -> Schema) -> Self {
        self.with_shape(
            self.shape
                .iter()
                .map(|(name, schema)| {
                    let schema = if selected(name) { map(schema) } else { schema.clone() };
                    (name.clone(), schema)
                })
                .collect(),
        )
    }

    /// Rejects unknown keys.
    pub fn strict(&self) -> Self {
        self.with_unknown_keys(UnknownKeys::Strict)
    }

    /// Keeps unknown keys.
    pub fn passthrough(&self) -> Self {
        self.with_unknown_keys(UnknownKeys::Passthrough)
    }

    /// Drops unknown keys (the default).
    pub fn strip(&self) -> Self {
        self.with_unknown_keys(UnknownKeys::Strip)
    }

    /// Validates unknown keys against `schema`.
    pub fn catchall(&self, schema: impl Into<Schema>) -> Self {
        self.with_unknown_keys(UnknownKeys::Catchall(schema.into()))
    }

    /// An enumeration of the field names.
    pub fn keyof(&self) -> EnumSchema {
        EnumSchema::new(self.shape.keys().cloned())
    }
}

fn make_optional(schema: &Schema) -> Schema {
    if schema.kind() == SchemaKind::Optional {
        schema.clone()
    } else {
        schema.optional().into_schema()
    }
}

impl Validate for ObjectSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let Value::Object(map) = input else {
            return invalid_type(ctx, "object", input, None);
        };

        let mut output = Object::with_capacity(self.shape.len());
        let mut issues = Vec::new();

        for (name, schema) in &self.shape {
            let present = map.get(name);
            match validate_child(schema, present.unwrap_or(&UNDEFINED), name.as_str(), ctx) {
                Ok(value) => {
                    if present.is_some() || !value.is_undefined() {
                        output.insert(name.clone(), value);
                    }
                }
                Err(child) => {
                    issues.extend(child);
                    if ctx.fail_fast() {
                        return Err(issues);
                    }
                }
            }
        }

        let extras = map
            .iter()
            .filter(|(key, _)| !self.shape.contains_key(key.as_str()));

        match &self.unknown_keys {
            UnknownKeys::Strip => {}
            UnknownKeys::Strict => {
                let keys: Vec<String> = extras.map(|(key, _)| key.clone()).collect();
                if !keys.is_empty() {
                    issues.push(ctx.issue(&Message::UnrecognizedKeys { keys: &keys }));
                }
            }
            UnknownKeys::Passthrough => {
                for (key, value) in extras {
                    if is_dangerous_key(key) {
                        tracing::debug!(key = %key, "dropped prototype key from passthrough");
                        continue;
                    }
                    output.insert(key.clone(), value.clone());
                }
            }
            UnknownKeys::Catchall(schema) => {
                for (key, value) in extras {
                    if is_dangerous_key(key) {
                        tracing::debug!(key = %key, "dropped prototype key from catchall");
                        continue;
                    }
                    match validate_child(schema, value, key.as_str(), ctx) {
                        Ok(value) => {
                            output.insert(key.clone(), value);
                        }
                        Err(child) => {
                            issues.extend(child);
                            if ctx.fail_fast() {
                                return Err(issues);
                            }
                        }
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, PathSegment};
    use crate::{number, object, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn person() -> ObjectSchema {
        object([
            ("name", string().into_schema()),
            ("age", number().int().into_schema()),
        ])
    }

    #[test]
    fn test_output_follows_shape_order() {
        let parsed = person().parse(json!({"age": 3, "name": "a"})).unwrap();
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name".to_owned(), "age".to_owned()]);
    }

    #[test]
    fn test_missing_field_is_required() {
        let error = person().parse(json!({"name": "a"})).unwrap_err();
        assert_eq!(error.first().path.as_slice(), &[PathSegment::from("age")]);
        assert_eq!(error.first().message, "Required");
    }

    #[test]
    fn test_missing_optional_field_is_omitted() {
        let schema = person().partial();
        let parsed = schema.parse(json!({})).unwrap();
        assert_eq!(parsed.as_object().map(IndexMap::len), Some(0));
    }

    #[test]
    fn test_fail_fast_and_collect() {
        let input = json!({"name": 1, "age": "x"});
        assert_eq!(person().parse(input.clone()).unwrap_err().len(), 1);
        assert_eq!(person().safe_parse(input).error().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_unknown_key_policies() {
        let input = json!({"name": "a", "age": 1, "extra": true, "__proto__": {"admin": true}});

        let stripped = person().parse(input.clone()).unwrap();
        assert!(stripped.get("extra").is_none());

        let strict = person().strict().parse(input.clone()).unwrap_err();
        assert_eq!(strict.first().code, IssueCode::UnrecognizedKeys);
        assert_eq!(strict.first().param("keys"), Some("__proto__, extra"));

        let passed = person().passthrough().parse(input.clone()).unwrap();
        assert_eq!(passed.get("extra"), Some(&Value::Bool(true)));
        assert!(passed.get("__proto__").is_none());

        let caught = person().catchall(number()).safe_parse(input).error().cloned().unwrap();
        assert_eq!(caught.len(), 1);
        assert_eq!(caught.first().path.as_slice(), &[PathSegment::from("extra")]);
    }

    #[test]
    fn test_derived_shapes_leave_source_alone() {
        let base = person();
        let picked = base.pick(["name"]);
        let omitted = base.omit(["name"]);
        let extended = base.extend([("email", string().email())]);
        let required = base.partial().required();

        assert_eq!(base.shape().len(), 2);
        assert_eq!(picked.shape().keys().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(omitted.shape().keys().collect::<Vec<_>>(), vec!["age"]);
        assert_eq!(extended.shape().len(), 3);
        assert!(!required.is_valid(json!({})));
        assert!(!base.is_valid(json!({"name": "a"})));
    }

    #[test]
    fn test_partial_keys_and_merge() {
        let schema = person().partial_keys(["age"]);
        assert!(schema.is_valid(json!({"name": "a"})));
        assert!(!schema.is_valid(json!({})));

        let merged = person().merge(&object([("age", string())]).strict());
        assert!(merged.is_valid(json!({"name": "a", "age": "old"})));
        assert!(!merged.is_valid(json!({"name": "a", "age": "old", "x": 1})));
    }

    #[test]
    fn test_keyof() {
        let keys = person().keyof();
        assert_eq!(keys.options(), ["name", "age"]);
    }

    #[test]
    fn test_wrong_kind() {
        let error = person().parse(json!([1])).unwrap_err();
        assert_eq!(error.first().message, "Expected object, received array");
    }
}
