//! Message catalog
//!
//! Validators never format text directly. They describe a failure as a
//! [`Message`] and hand it to the [`MessageCatalog`] installed on the current
//! [`ParseOptions`](crate::ParseOptions). [`EnglishCatalog`] is the default
//! table; another locale is a different catalog passed per call.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::foundation::error::IssueCode;
use crate::value::{Value, format_date, format_number};

/// What a size or bound check was measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    String,
    Number,
    BigInt,
    Array,
    Set,
    Date,
}

impl Origin {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::Array => "array",
            Self::Set => "set",
            Self::Date => "date",
        }
    }
}

/// The limit a bound check compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Count(usize),
    Number(f64),
    BigInt(i128),
    Date(DateTime<Utc>),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::BigInt(n) => write!(f, "{n}"),
            Self::Date(d) => f.write_str(&format_date(d)),
        }
    }
}

/// String formats checked by string schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format<'a> {
    Email,
    Url,
    Uuid,
    Ipv4,
    Ipv6,
    Ip,
    Datetime,
    Regex(&'a str),
    StartsWith(&'a str),
    EndsWith(&'a str),
    Includes(&'a str),
}

impl Format<'_> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Uuid => "uuid",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Ip => "ip",
            Self::Datetime => "datetime",
            Self::Regex(_) => "regex",
            Self::StartsWith(_) => "starts_with",
            Self::EndsWith(_) => "ends_with",
            Self::Includes(_) => "includes",
        }
    }
}

/// A failure description, independent of language.
#[derive(Debug, Clone, PartialEq)]
pub enum Message<'a> {
    InvalidType {
        expected: &'a str,
        received: &'a str,
    },
    TooSmall {
        origin: Origin,
        minimum: Bound,
        inclusive: bool,
        exact: bool,
    },
    TooBig {
        origin: Origin,
        maximum: Bound,
        inclusive: bool,
        exact: bool,
    },
    NotMultipleOf {
        origin: Origin,
        divisor: Bound,
    },
    NotFinite,
    InvalidFormat(Format<'a>),
    InvalidDate,
    InvalidLiteral {
        expected: &'a Value,
    },
    InvalidEnumValue {
        options: &'a [String],
        received: &'a Value,
    },
    UnrecognizedKeys {
        keys: &'a [String],
    },
    InvalidKey {
        key: &'a str,
    },
    /// No union alternative matched; carries each alternative's message.
    InvalidUnion {
        alternatives: &'a [String],
    },
    InvalidUnionDiscriminator {
        discriminator: &'a str,
        options: &'a [String],
    },
    InvalidIntersectionTypes,
    TupleLength {
        expected: usize,
        received: usize,
    },
    CoercionFailed {
        target: &'a str,
        received: &'a str,
    },
    TransformFailed {
        reason: &'a str,
    },
    Custom,
}

impl Message<'_> {
    /// Issue code this message is reported under.
    #[must_use]
    pub const fn code(&self) -> IssueCode {
        match self {
            Self::InvalidType { .. } => IssueCode::InvalidType,
            Self::TooSmall { .. } => IssueCode::TooSmall,
            Self::TooBig { .. } => IssueCode::TooBig,
            Self::NotMultipleOf { .. } => IssueCode::NotMultipleOf,
            Self::NotFinite => IssueCode::NotFinite,
            Self::InvalidFormat(_) => IssueCode::InvalidFormat,
            Self::InvalidDate => IssueCode::InvalidDate,
            Self::InvalidLiteral { .. } => IssueCode::InvalidLiteral,
            Self::InvalidEnumValue { .. } => IssueCode::InvalidEnumValue,
            Self::UnrecognizedKeys { .. } => IssueCode::UnrecognizedKeys,
            Self::InvalidKey { .. } => IssueCode::InvalidKey,
            Self::InvalidUnion { .. } => IssueCode::InvalidUnion,
            Self::InvalidUnionDiscriminator { .. } => IssueCode::InvalidUnionDiscriminator,
            Self::InvalidIntersectionTypes => IssueCode::InvalidIntersectionTypes,
            Self::TupleLength { .. } => IssueCode::TupleLength,
            Self::CoercionFailed { .. } => IssueCode::CoercionFailed,
            Self::TransformFailed { .. } => IssueCode::TransformFailed,
            Self::Custom => IssueCode::Custom,
        }
    }

    /// Structured detail attached to the resulting issue.
    #[must_use]
    pub fn params(&self) -> Vec<(Cow<'static, str>, String)> {
        let param = |key: &'static str, value: String| (Cow::Borrowed(key), value);
        match self {
            Self::InvalidType { expected, received }
            | Self::CoercionFailed {
                target: expected,
                received,
            } => vec![
                param("expected", (*expected).to_owned()),
                param("received", (*received).to_owned()),
            ],
            Self::TooSmall {
                origin,
                minimum,
                inclusive,
                ..
            } => vec![
                param("origin", origin.name().to_owned()),
                param("minimum", minimum.to_string()),
                param("inclusive", inclusive.to_string()),
            ],
            Self::TooBig {
                origin,
                maximum,
                inclusive,
                ..
            } => vec![
                param("origin", origin.name().to_owned()),
                param("maximum", maximum.to_string()),
                param("inclusive", inclusive.to_string()),
            ],
            Self::NotMultipleOf { divisor, .. } => vec![param("divisor", divisor.to_string())],
            Self::InvalidFormat(format) => {
                let mut params = vec![param("format", format.name().to_owned())];
                if let Format::Regex(pattern) = format {
                    params.push(param("pattern", (*pattern).to_owned()));
                }
                params
            }
            Self::InvalidLiteral { expected } => vec![param("expected", expected.to_string())],
            Self::InvalidEnumValue { options, received } => vec![
                param("options", options.join(" | ")),
                param("received", received.to_string()),
            ],
            Self::UnrecognizedKeys { keys } => vec![param("keys", keys.join(", "))],
            Self::InvalidKey { key } => vec![param("key", (*key).to_owned())],
            Self::InvalidUnionDiscriminator {
                discriminator,
                options,
            } => vec![
                param("discriminator", (*discriminator).to_owned()),
                param("options", options.join(" | ")),
            ],
            Self::TupleLength { expected, received } => vec![
                param("expected", expected.to_string()),
                param("received", received.to_string()),
            ],
            Self::NotFinite
            | Self::InvalidDate
            | Self::InvalidUnion { .. }
            | Self::InvalidIntersectionTypes
            | Self::TransformFailed { .. }
            | Self::Custom => Vec::new(),
        }
    }
}

/// Renders [`Message`]s into text for one locale.
pub trait MessageCatalog: Send + Sync {
    /// Locale tag, informational only.
    fn locale(&self) -> &str {
        "en"
    }

    fn render(&self, message: &Message<'_>) -> String;
}

/// The default English table.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

fn quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}

impl MessageCatalog for EnglishCatalog {
    fn render(&self, message: &Message<'_>) -> String {
        match message {
            Message::InvalidType { expected, received } => {
                if *received == "undefined" {
                    "Required".to_owned()
                } else {
                    format!("Expected {expected}, received {received}")
                }
            }
            Message::TooSmall {
                origin,
                minimum,
                inclusive,
                exact,
            } => match origin {
                Origin::String | Origin::Array | Origin::Set => {
                    let (subject, unit) = size_subject(*origin);
                    let relation = if *exact {
                        "exactly"
                    } else if *inclusive {
                        "at least"
                    } else {
                        "more than"
                    };
                    format!("{subject} must contain {relation} {minimum} {unit}(s)")
                }
                Origin::Number | Origin::BigInt | Origin::Date => {
                    let relation = if *exact {
                        "exactly equal to"
                    } else if *inclusive {
                        "greater than or equal to"
                    } else {
                        "greater than"
                    };
                    format!("{} must be {relation} {minimum}", value_subject(*origin))
                }
            },
            Message::TooBig {
                origin,
                maximum,
                inclusive,
                exact,
            } => match origin {
                Origin::String | Origin::Array | Origin::Set => {
                    let (subject, unit) = size_subject(*origin);
                    let relation = if *exact {
                        "exactly"
                    } else if *inclusive {
                        "at most"
                    } else {
                        "fewer than"
                    };
                    format!("{subject} must contain {relation} {maximum} {unit}(s)")
                }
                Origin::Number | Origin::BigInt | Origin::Date => {
                    let relation = if *exact {
                        "exactly equal to"
                    } else if *inclusive {
                        "less than or equal to"
                    } else {
                        "less than"
                    };
                    format!("{} must be {relation} {maximum}", value_subject(*origin))
                }
            },
            Message::NotMultipleOf { origin, divisor } => {
                format!("{} must be a multiple of {divisor}", value_subject(*origin))
            }
            Message::NotFinite => "Number must be finite".to_owned(),
            Message::InvalidFormat(format) => match format {
                Format::Regex(_) => "Invalid".to_owned(),
                Format::StartsWith(prefix) => format!("Invalid input: must start with \"{prefix}\""),
                Format::EndsWith(suffix) => format!("Invalid input: must end with \"{suffix}\""),
                Format::Includes(needle) => format!("Invalid input: must include \"{needle}\""),
                other => format!("Invalid {}", other.name()),
            },
            Message::InvalidDate => "Invalid date".to_owned(),
            Message::InvalidLiteral { expected } => {
                format!("Invalid literal value, expected {}", expected.to_json())
            }
            Message::InvalidEnumValue { options, received } => {
                let received = received
                    .as_str()
                    .map_or_else(|| received.to_string(), ToOwned::to_owned);
                format!(
                    "Invalid enum value. Expected {}, received '{received}'",
                    quoted(options)
                )
            }
            Message::UnrecognizedKeys { keys } => {
                let keys = keys
                    .iter()
                    .map(|key| format!("'{key}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Unrecognized key(s) in object: {keys}")
            }
            Message::InvalidKey { key } => format!("Invalid key in record: '{key}'"),
            Message::InvalidUnion { alternatives } => {
                if alternatives.is_empty() {
                    "Invalid input".to_owned()
                } else {
                    format!("Invalid input: {}", alternatives.join("; or "))
                }
            }
            Message::InvalidUnionDiscriminator { options, .. } => {
                format!("Invalid discriminator value. Expected {}", quoted(options))
            }
            Message::InvalidIntersectionTypes => {
                "Intersection results could not be merged".to_owned()
            }
            Message::TupleLength { expected, received } => {
                format!("Expected {expected} items, received {received}")
            }
            Message::CoercionFailed { target, received } => {
                format!("Could not coerce {received} to {target}")
            }
            Message::TransformFailed { reason } => format!("Transform failed: {reason}"),
            Message::Custom => "Invalid input".to_owned(),
        }
    }
}

const fn size_subject(origin: Origin) -> (&'static str, &'static str) {
    match origin {
        Origin::String => ("String", "character"),
        Origin::Set => ("Set", "element"),
        _ => ("Array", "element"),
    }
}

const fn value_subject(origin: Origin) -> &'static str {
    match origin {
        Origin::BigInt => "BigInt",
        Origin::Date => "Date",
        _ => "Number",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(message: &Message<'_>) -> String {
        EnglishCatalog.render(message)
    }

    #[test]
    fn test_size_messages() {
        assert_eq!(
            render(&Message::TooSmall {
                origin: Origin::String,
                minimum: Bound::Count(3),
                inclusive: true,
                exact: false,
            }),
            "String must contain at least 3 character(s)"
        );
        assert_eq!(
            render(&Message::TooBig {
                origin: Origin::Array,
                maximum: Bound::Count(2),
                inclusive: true,
                exact: true,
            }),
            "Array must contain exactly 2 element(s)"
        );
    }

    #[test]
    fn test_value_bound_messages() {
        assert_eq!(
            render(&Message::TooSmall {
                origin: Origin::Number,
                minimum: Bound::Number(0.0),
                inclusive: false,
                exact: false,
            }),
            "Number must be greater than 0"
        );
        assert_eq!(
            render(&Message::NotMultipleOf {
                origin: Origin::BigInt,
                divisor: Bound::BigInt(5),
            }),
            "BigInt must be a multiple of 5"
        );
    }

    #[test]
    fn test_missing_value_reads_as_required() {
        assert_eq!(
            render(&Message::InvalidType {
                expected: "string",
                received: "undefined",
            }),
            "Required"
        );
    }

    #[test]
    fn test_enum_and_keys() {
        let options = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(
            render(&Message::InvalidEnumValue {
                options: &options,
                received: &Value::from("c"),
            }),
            "Invalid enum value. Expected 'a' | 'b', received 'c'"
        );
        let keys = vec!["extra".to_owned()];
        assert_eq!(
            render(&Message::UnrecognizedKeys { keys: &keys }),
            "Unrecognized key(s) in object: 'extra'"
        );
    }

    #[test]
    fn test_params_carry_bounds() {
        let message = Message::TooSmall {
            origin: Origin::Array,
            minimum: Bound::Count(2),
            inclusive: true,
            exact: false,
        };
        assert_eq!(message.code(), IssueCode::TooSmall);
        assert!(message.params().contains(&(Cow::Borrowed("minimum"), "2".to_owned())));
    }
}
