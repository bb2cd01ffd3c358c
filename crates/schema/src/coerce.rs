//! Coercing schemas
//!
//! A coercing schema first converts its input to the target kind, then runs
//! the ordinary checks. `Null` and `Undefined` never convert: coercion
//! bridges kinds, it does not invent presence.
//!
//! | target    | accepted sources                                              |
//! |-----------|---------------------------------------------------------------|
//! | `string`  | numbers, booleans, big integers, dates, symbols, collections  |
//! | `number`  | numeric text (trimmed), booleans, big integers, dates         |
//! | `boolean` | `true/1/yes/on`, `false/0/no/off` (any case), the numbers 1/0 |
//! | `bigint`  | integral numbers, integer text, booleans                      |
//! | `date`    | date text and epoch milliseconds                              |
//!
//! # Examples
//!
//! ```
//! use vellum_schema::{coerce, Validate, Value};
//!
//! assert_eq!(coerce::number().parse("  42  ").unwrap(), Value::from(42));
//! assert!(coerce::number().parse("abc").is_err());
//! assert_eq!(coerce::boolean().parse("Yes").unwrap(), Value::Bool(true));
//! ```

use crate::validators::{BigIntSchema, BooleanSchema, DateSchema, NumberSchema, StringSchema};
use crate::value::{Value, format_date, format_number};

/// A string schema that stringifies its input first.
pub fn string() -> StringSchema {
    StringSchema::new().coerced()
}

/// A number schema that parses its input first.
pub fn number() -> NumberSchema {
    NumberSchema::new().coerced()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new().coerced()
}

pub fn bigint() -> BigIntSchema {
    BigIntSchema::new().coerced()
}

pub fn date() -> DateSchema {
    DateSchema::new().coerced()
}

// ============================================================================
// CONVERSIONS
// ============================================================================

pub(crate) fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::Undefined | Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(format_number(*n)),
        Value::BigInt(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Date(d) => Some(format_date(d)),
        Value::Symbol(s) => Some(s.to_string()),
        Value::Array(items) => Some(join_elements(items)),
        Value::Object(_) => Some("[object Object]".to_owned()),
        Value::Set(_) => Some("[object Set]".to_owned()),
        Value::Map(_) => Some("[object Map]".to_owned()),
    }
}

/// Array stringification: elements joined by commas, absent ones empty.
fn join_elements(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Undefined | Value::Null => String::new(),
            other => to_string(other).unwrap_or_default(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_number(s),
        Value::BigInt(n) => Some(*n as f64),
        Value::Date(d) => Some(d.timestamp_millis() as f64),
        _ => None,
    }
}

/// Parses a numeric literal; empty or malformed text is `None`, never `NaN`.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if digits == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    let radix = match digits.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        // Prefixed literals carry no sign.
        if text.len() != digits.len() {
            return None;
        }
        let body = &digits[2..];
        if !body.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        return u64::from_str_radix(body, radix).ok().map(|n| n as f64);
    }

    let well_formed = !digits.is_empty()
        && digits
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        && digits.bytes().any(|b| b.is_ascii_digit());
    if !well_formed {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| !n.is_nan())
}

pub(crate) fn to_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) if *n == 1.0 => Some(true),
        Value::Number(n) if *n == 0.0 => Some(false),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Two to the 127th power, the first `f64` outside the `i128` range.
const I128_LIMIT: f64 = 1.701_411_834_604_692_3e38;

pub(crate) fn to_bigint(value: &Value) -> Option<i128> {
    match value {
        Value::BigInt(n) => Some(*n),
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < I128_LIMIT => {
            Some(*n as i128)
        }
        Value::Bool(b) => Some(i128::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<i128>().ok()
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, Validate};
    use crate::value::Symbol;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_text() {
        assert_eq!(parse_number("  42  "), Some(42.0));
        assert_eq!(parse_number("-1.5e3"), Some(-1500.0));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-0x10"), None);
        assert_eq!(parse_number("0x+1"), None);
        assert_eq!(parse_number("0b-1"), None);
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("."), None);
    }

    #[test]
    fn test_null_never_coerces() {
        for schema_result in [
            string().parse(Value::Null),
            number().parse(Value::Undefined),
            boolean().parse(Value::Null),
            bigint().parse(Value::Undefined),
            date().parse(Value::Null),
        ] {
            assert_eq!(schema_result.unwrap_err().first().code, IssueCode::CoercionFailed);
        }
    }

    #[test]
    fn test_stringification() {
        assert_eq!(to_string(&Value::from(1.5)), Some("1.5".to_owned()));
        assert_eq!(to_string(&Value::from(false)), Some("false".to_owned()));
        assert_eq!(
            to_string(&Value::from(vec![Value::from(1), Value::Null, Value::from("a")])),
            Some("1,,a".to_owned())
        );
        assert_eq!(
            to_string(&Value::Object(Default::default())),
            Some("[object Object]".to_owned())
        );
        assert_eq!(
            to_string(&Value::Symbol(Symbol::new("s"))),
            Some("Symbol(s)".to_owned())
        );
    }

    #[test]
    fn test_bigint_rejects_fractions() {
        assert_eq!(to_bigint(&Value::from(3.0)), Some(3));
        assert_eq!(to_bigint(&Value::from(3.5)), None);
        assert_eq!(to_bigint(&Value::from("12345678901234567890")), Some(12_345_678_901_234_567_890));
        assert_eq!(to_bigint(&Value::from("1.5")), None);
        assert_eq!(to_bigint(&Value::from(f64::INFINITY)), None);
    }

    #[test]
    fn test_coerced_checks_still_apply() {
        let schema = number().int().positive();
        assert_eq!(schema.parse("7").unwrap(), Value::from(7));
        assert_eq!(schema.parse("-7").unwrap_err().first().code, IssueCode::TooSmall);
        assert_eq!(schema.parse("7.5").unwrap_err().first().code, IssueCode::InvalidType);
    }
}
