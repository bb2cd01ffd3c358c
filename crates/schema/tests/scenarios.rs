//! End-to-end validation scenarios through the public API.

use std::thread;

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use vellum_schema::prelude::*;
use vellum_schema::{EnglishCatalog, Message, MessageCatalog};

// ============================================================================
// OBJECTS
// ============================================================================

fn account() -> vellum_schema::ObjectSchema {
    object! {
        "id" => string().uuid(),
        "age" => number().int().positive(),
    }
}

#[test]
fn object_reports_every_failing_field() {
    let result = account().safe_parse(json!({"id": "not-a-uuid", "age": -1}));
    let error = result.error().expect("both fields are invalid");

    assert_eq!(error.len(), 2);
    assert_eq!(error.issues()[0].path.as_slice(), &[PathSegment::from("id")]);
    assert_eq!(error.issues()[0].code, IssueCode::InvalidFormat);
    assert_eq!(error.issues()[1].path.as_slice(), &[PathSegment::from("age")]);
    assert_eq!(error.issues()[1].code, IssueCode::TooSmall);
}

#[test]
fn object_parse_stops_at_first_field() {
    let error = account()
        .parse(json!({"id": "not-a-uuid", "age": -1}))
        .unwrap_err();
    assert_eq!(error.len(), 1);
    assert_eq!(error.first().path_string(), "id");
}

#[test]
fn strict_boundary() {
    let input = json!({"id": "123e4567-e89b-12d3-a456-426614174000", "age": 30, "extra": 1});

    let stripped = account().parse(input.clone()).unwrap();
    assert!(stripped.get("extra").is_none());

    let error = account().strict().safe_parse(input).error().cloned().unwrap();
    assert_eq!(error.len(), 1);
    assert_eq!(error.first().code, IssueCode::UnrecognizedKeys);
    assert_eq!(error.first().param("keys"), Some("extra"));
}

#[test]
fn nested_paths_and_flatten() {
    let order = object! {
        "customer" => object! { "email" => string().email() },
        "items" => array(object! { "qty" => number().int().min(1.0) }).nonempty(),
    };
    let error = order
        .safe_parse(json!({
            "customer": {"email": "nope"},
            "items": [{"qty": 1}, {"qty": 0}],
        }))
        .error()
        .cloned()
        .unwrap();

    let paths: Vec<_> = error.issues().iter().map(|i| i.path_string()).collect();
    assert_eq!(paths, vec!["customer.email", "items[1].qty"]);

    let flat = error.flatten();
    assert!(flat.form_errors.is_empty());
    assert_eq!(flat.field_errors["customer"], vec!["Invalid email".to_owned()]);
    assert_eq!(flat.field_errors.len(), 2);

    let report = error.format_report();
    assert!(report.contains("✖ Invalid email\n  → at customer.email"));
}

#[test]
fn issues_serialize_to_json() {
    let error = number().max(3.0).parse(5).unwrap_err();
    assert_eq!(
        error.to_json_value(),
        json!([{
            "code": "too_big",
            "path": [],
            "message": "Number must be less than or equal to 3",
            "params": {"origin": "number", "maximum": "3", "inclusive": "true"},
        }])
    );
}

// ============================================================================
// ARRAYS
// ============================================================================

#[test]
fn oversized_json_integer_is_not_rounded_into_a_number() {
    let input: serde_json::Value = serde_json::from_str(r#"{"id": 9007199254740993}"#).unwrap();
    let schema = object! { "id" => number().int() };

    let error = schema.parse(input.clone()).unwrap_err();
    assert_eq!(error.first().code, IssueCode::InvalidType);
    assert_eq!(error.first().path_string(), "id");

    let exact = object! { "id" => bigint() }.parse(input).unwrap();
    assert_eq!(exact.get("id"), Some(&Value::BigInt(9_007_199_254_740_993)));
}

#[test]
fn array_min_scenario() {
    let schema = array(number()).min(2);

    let error = schema.safe_parse(vec![1]).error().cloned().unwrap();
    assert_eq!(error.first().code, IssueCode::TooSmall);
    assert_eq!(error.to_string(), "Array must contain at least 2 element(s)");

    assert_eq!(schema.parse(vec![1, 2]).unwrap(), Value::from(vec![1, 2]));
}

// ============================================================================
// COERCION
// ============================================================================

#[rstest]
#[case::trimmed_text(json!("  42  "), Some(42.0))]
#[case::boolean_true(json!(true), Some(1.0))]
#[case::boolean_false(json!(false), Some(0.0))]
#[case::hex(json!("0x10"), Some(16.0))]
#[case::signed_hex_body(json!("0x+1"), None)]
#[case::garbage(json!("abc"), None)]
#[case::empty(json!(""), None)]
#[case::null(json!(null), None)]
fn coerce_number_table(#[case] input: serde_json::Value, #[case] expected: Option<f64>) {
    let result = coerce::number().safe_parse(input);
    assert_eq!(result.data().and_then(Value::as_f64), expected);
}

#[rstest]
#[case("true", Some(true))]
#[case("YES", Some(true))]
#[case("on", Some(true))]
#[case("0", Some(false))]
#[case("Off", Some(false))]
#[case("maybe", None)]
fn coerce_boolean_table(#[case] input: &str, #[case] expected: Option<bool>) {
    let result = coerce::boolean().safe_parse(input);
    assert_eq!(result.data().and_then(Value::as_bool), expected);
}

#[rstest]
#[case::decimal(json!(1.5), "1.5")]
#[case::boolean(json!(true), "true")]
#[case::plain_object(json!({}), "[object Object]")]
#[case::array(json!([1, 2]), "1,2")]
fn coerce_string_table(#[case] input: serde_json::Value, #[case] expected: &str) {
    assert_eq!(coerce::string().parse(input).unwrap(), Value::from(expected));
}

#[test]
fn coerced_string_runs_length_checks() {
    let schema = coerce::string().min(4);
    assert_eq!(schema.parse(true).unwrap(), Value::from("true"));
    assert_eq!(schema.parse(1.5).unwrap_err().first().code, IssueCode::TooSmall);
}

#[rstest]
#[case::iso_text(Value::from("2024-06-01T12:00:00Z"))]
#[case::bare_day_and_time(Value::from("2024-06-01 12:00:00"))]
#[case::epoch_millis(Value::from(1_717_243_200_000_i64))]
#[case::native_date(Value::from(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()))]
fn coerce_date_table(#[case] input: Value) {
    let expected = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(coerce::date().parse(input).unwrap(), Value::Date(expected));
}

#[test]
fn coerce_date_rejects_other_kinds() {
    let error = coerce::date().parse(true).unwrap_err();
    assert_eq!(error.first().code, IssueCode::CoercionFailed);
    assert_eq!(
        coerce::date().parse("not a date").unwrap_err().first().code,
        IssueCode::InvalidDate
    );
}

#[test]
fn coercion_never_invents_presence() {
    for schema in [
        coerce::string().into_schema(),
        coerce::number().into_schema(),
        coerce::boolean().into_schema(),
        coerce::bigint().into_schema(),
        coerce::date().into_schema(),
    ] {
        assert!(!schema.is_valid(Value::Null));
        assert!(!schema.is_valid(Value::Undefined));
    }
}

#[test]
fn coerced_value_runs_ordinary_checks() {
    let schema = coerce::number().int().max(10.0);
    assert_eq!(schema.parse("7").unwrap(), Value::from(7));
    assert_eq!(schema.parse("11").unwrap_err().first().code, IssueCode::TooBig);
    assert_eq!(coerce::bigint().parse("12").unwrap(), Value::BigInt(12));
    assert!(coerce::bigint().parse(1.5).is_err());
}

// ============================================================================
// UNION & INTERSECTION
// ============================================================================

#[test]
fn union_prefers_declaration_order() {
    let schema = union([
        string().transform(|_| "first").into_schema(),
        string().trim().into_schema(),
    ]);
    assert_eq!(schema.parse(" x ").unwrap(), Value::from("first"));
}

#[test]
fn intersection_of_string_and_object_always_fails() {
    let schema = intersection(string(), object! { "a" => any() });
    for input in [json!("a"), json!({"a": 1}), json!([]), json!(0)] {
        assert!(!schema.safe_parse(input).is_success());
    }
}

// ============================================================================
// DATES
// ============================================================================

#[test]
fn past_check_is_fixed_at_construction() {
    let reference = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let schema = date().past_at(reference);

    let earlier = reference - Duration::seconds(1);
    let outcomes: Vec<bool> = (0..5).map(|_| schema.is_valid(earlier)).collect();
    assert_eq!(outcomes, vec![true; 5]);

    let at_reference: Vec<bool> = (0..5).map(|_| schema.is_valid(reference)).collect();
    assert!(at_reference.iter().all(|ok| *ok == at_reference[0]));
}

#[test]
fn unparsable_dates_are_distinct_from_bounds() {
    let schema = date().min(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(schema.parse("not a date").unwrap_err().first().code, IssueCode::InvalidDate);
    assert_eq!(schema.parse("2023-12-31").unwrap_err().first().code, IssueCode::TooSmall);
    assert!(schema.is_valid("2024-03-01"));
}

// ============================================================================
// SHARING
// ============================================================================

#[test]
fn schemas_are_shared_across_threads() {
    let schema = account().into_schema();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let schema = &schema;
                scope.spawn(move || {
                    let age = if n % 2 == 0 { 20 } else { -1 };
                    schema.is_valid(json!({"id": "123e4567-e89b-12d3-a456-426614174000", "age": age}))
                })
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, (0..8).map(|n| n % 2 == 0).collect::<Vec<_>>());
    });
}

// ============================================================================
// MESSAGES
// ============================================================================

struct Terse;

impl MessageCatalog for Terse {
    fn locale(&self) -> &str {
        "terse"
    }

    fn render(&self, message: &Message<'_>) -> String {
        match message {
            Message::InvalidType { expected, .. } => format!("want {expected}"),
            other => EnglishCatalog.render(other),
        }
    }
}

#[test]
fn catalog_is_chosen_per_call() {
    let options = ParseOptions::new().with_catalog(Terse);
    let schema = string();

    let localized = schema.parse_with(1, &options).unwrap_err();
    assert_eq!(localized.first().message, "want string");

    let default = schema.parse(1).unwrap_err();
    assert_eq!(default.first().message, "Expected string, received number");
}

#[test]
fn custom_messages_override_catalog() {
    let options = ParseOptions::new().with_catalog(Terse);
    let schema = string().min(3).message("too short");
    let error = schema.parse_with("a", &options).unwrap_err();
    assert_eq!(error.first().message, "too short");
}
