//! Declarative shorthands.
//!
//! - [`object!`]: an [`ObjectSchema`](crate::ObjectSchema) from `"key" => schema` pairs
//! - [`any_of!`]: a union of the listed schemas, in order
//! - [`all_of!`]: an intersection chain of the listed schemas

// ============================================================================
// OBJECT MACRO
// ============================================================================

/// Declares an object schema; fields keep the order they are written in.
///
/// Values may be any schema type, wrapped or not.
///
/// ```
/// use vellum_schema::prelude::*;
/// use serde_json::json;
///
/// let point = object!{
///     "x" => number(),
///     "y" => number(),
///     "label" => string().optional(),
/// };
/// assert!(point.is_valid(json!({"x": 1, "y": 2})));
/// ```
#[macro_export]
macro_rules! object {
    () => {
        $crate::ObjectSchema::new(::std::iter::empty::<(&str, $crate::Schema)>())
    };
    ($($key:expr => $schema:expr),+ $(,)?) => {
        $crate::ObjectSchema::new([
            $(($key, $crate::Schema::from($schema))),+
        ])
    };
}

// ============================================================================
// ANY_OF MACRO
// ============================================================================

/// Builds a union without erasing each alternative by hand.
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let flag = any_of![boolean(), literal("yes"), literal("no")];
/// assert!(flag.is_valid("yes"));
/// assert!(!flag.is_valid("maybe"));
/// ```
#[macro_export]
macro_rules! any_of {
    ($($schema:expr),+ $(,)?) => {
        $crate::UnionSchema::new([$($crate::Schema::from($schema)),+])
    };
}

// ============================================================================
// ALL_OF MACRO
// ============================================================================

/// Intersects the listed schemas left to right.
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let short_word = all_of![string().min(1), string().max(5), string().regex("^[a-z]+$").unwrap()];
/// assert!(short_word.is_valid("word"));
/// assert!(!short_word.is_valid("words!"));
/// ```
#[macro_export]
macro_rules! all_of {
    ($first:expr $(,)?) => {
        $crate::Schema::from($first)
    };
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {
        $crate::all_of!(
            $crate::IntersectionSchema::new(
                $crate::Schema::from($first),
                $crate::Schema::from($second),
            )
            $(, $rest)*
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::{IssueCode, Validate};
    use crate::value::Value;
    use crate::{ObjectSchema, boolean, number, string};
    use serde_json::json;

    #[test]
    fn test_object_macro_keeps_field_order() {
        let schema: ObjectSchema = object! {
            "b" => string(),
            "a" => number(),
        };
        let keys: Vec<_> = schema.shape().keys().cloned().collect();
        assert_eq!(keys, vec!["b".to_owned(), "a".to_owned()]);
        assert!(object! {}.is_valid(json!({})));
    }

    #[test]
    fn test_any_of_macro() {
        let schema = any_of![string(), boolean()];
        assert!(schema.is_valid(true));
        assert_eq!(schema.parse(1).unwrap_err().first().code, IssueCode::InvalidUnion);
    }

    #[test]
    fn test_all_of_macro() {
        let schema = all_of![number(), number().int(), number().positive()];
        assert_eq!(schema.parse(3).unwrap(), Value::from(3));
        assert!(!schema.is_valid(-3));
        assert!(!schema.is_valid(1.5));
    }
}
