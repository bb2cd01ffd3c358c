//! String schema
//!
//! Normalizing transforms (`trim`, `to_lowercase`, `to_uppercase`) run first,
//! in declaration order; checks then run in declaration order and the first
//! failing check is reported. Lengths count Unicode scalar values.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

use crate::coerce;
use crate::foundation::{
    Bound, Format, Message, Origin, Outcome, ParseContext, SchemaError, Validate,
};
use crate::validators::{Checks, coercion_failed, invalid_type};
use crate::value::Value;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern is valid")
});

#[derive(Debug, Clone)]
enum StringCheck {
    Min(usize),
    Max(usize),
    Length(usize),
    Email,
    Url,
    Uuid,
    Ipv4,
    Ipv6,
    Ip,
    Datetime,
    Pattern(Regex),
    StartsWith(String),
    EndsWith(String),
    Includes(String),
}

#[derive(Debug, Clone, Copy)]
enum StringTransform {
    Trim,
    Lowercase,
    Uppercase,
}

/// Validates text.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let username = string().trim().min(3).max(16);
///
/// assert_eq!(username.parse("  ada  ").unwrap(), Value::from("ada"));
/// assert!(username.parse("al").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StringSchema {
    transforms: Vec<StringTransform>,
    checks: Checks<StringCheck>,
    coerce: bool,
}

#[allow(clippy::new_without_default)]
impl StringSchema {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
            checks: Checks::new(),
            coerce: false,
        }
    }

    pub(crate) fn coerced(&self) -> Self {
        Self {
            coerce: true,
            ..self.clone()
        }
    }

    pub(crate) fn is_coerced(&self) -> bool {
        self.coerce
    }

    fn check(&self, check: StringCheck) -> Self {
        Self {
            checks: self.checks.with(check),
            ..self.clone()
        }
    }

    fn normalize(&self, transform: StringTransform) -> Self {
        let mut next = self.clone();
        next.transforms.push(transform);
        next
    }

    /// At least `n` characters.
    pub fn min(&self, n: usize) -> Self {
        self.check(StringCheck::Min(n))
    }

    /// At most `n` characters.
    pub fn max(&self, n: usize) -> Self {
        self.check(StringCheck::Max(n))
    }

    /// Exactly `n` characters.
    pub fn length(&self, n: usize) -> Self {
        self.check(StringCheck::Length(n))
    }

    pub fn nonempty(&self) -> Self {
        self.min(1)
    }

    pub fn email(&self) -> Self {
        self.check(StringCheck::Email)
    }

    /// An absolute URL with a scheme.
    pub fn url(&self) -> Self {
        self.check(StringCheck::Url)
    }

    pub fn uuid(&self) -> Self {
        self.check(StringCheck::Uuid)
    }

    pub fn ipv4(&self) -> Self {
        self.check(StringCheck::Ipv4)
    }

    pub fn ipv6(&self) -> Self {
        self.check(StringCheck::Ipv6)
    }

    /// Either IPv4 or IPv6.
    pub fn ip(&self) -> Self {
        self.check(StringCheck::Ip)
    }

    /// An RFC 3339 timestamp with offset.
    pub fn datetime(&self) -> Self {
        self.check(StringCheck::Datetime)
    }

    /// Must match `pattern`.
    pub fn regex(&self, pattern: &str) -> Result<Self, SchemaError> {
        Ok(self.matches(Regex::new(pattern)?))
    }

    /// Must match an already compiled pattern.
    pub fn matches(&self, pattern: Regex) -> Self {
        self.check(StringCheck::Pattern(pattern))
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Self {
        self.check(StringCheck::StartsWith(prefix.into()))
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Self {
        self.check(StringCheck::EndsWith(suffix.into()))
    }

    pub fn includes(&self, needle: impl Into<String>) -> Self {
        self.check(StringCheck::Includes(needle.into()))
    }

    /// Strips leading and trailing whitespace before checking.
    pub fn trim(&self) -> Self {
        self.normalize(StringTransform::Trim)
    }

    pub fn to_lowercase(&self) -> Self {
        self.normalize(StringTransform::Lowercase)
    }

    pub fn to_uppercase(&self) -> Self {
        self.normalize(StringTransform::Uppercase)
    }

    /// Replaces the message of the most recently declared check.
    pub fn message(&self, message: &str) -> Self {
        Self {
            checks: self.checks.with_message(message),
            ..self.clone()
        }
    }
}

fn failure<'a>(check: &'a StringCheck, text: &str) -> Option<Message<'a>> {
    let chars = || text.chars().count();
    let size = |small: bool, n: usize, exact: bool| {
        if small {
            Message::TooSmall {
                origin: Origin::String,
                minimum: Bound::Count(n),
                inclusive: true,
                exact,
            }
        } else {
            Message::TooBig {
                origin: Origin::String,
                maximum: Bound::Count(n),
                inclusive: true,
                exact,
            }
        }
    };
    let invalid = |ok: bool, format: Format<'a>| (!ok).then_some(Message::InvalidFormat(format));

    match check {
        StringCheck::Min(n) => (chars() < *n).then(|| size(true, *n, false)),
        StringCheck::Max(n) => (chars() > *n).then(|| size(false, *n, false)),
        StringCheck::Length(n) => {
            let len = chars();
            (len != *n).then(|| size(len < *n, *n, true))
        }
        StringCheck::Email => invalid(EMAIL_REGEX.is_match(text), Format::Email),
        StringCheck::Url => invalid(url::Url::parse(text).is_ok(), Format::Url),
        StringCheck::Uuid => invalid(UUID_REGEX.is_match(text), Format::Uuid),
        StringCheck::Ipv4 => invalid(text.parse::<Ipv4Addr>().is_ok(), Format::Ipv4),
        StringCheck::Ipv6 => invalid(text.parse::<Ipv6Addr>().is_ok(), Format::Ipv6),
        StringCheck::Ip => invalid(text.parse::<IpAddr>().is_ok(), Format::Ip),
        StringCheck::Datetime => {
            invalid(DateTime::parse_from_rfc3339(text).is_ok(), Format::Datetime)
        }
        StringCheck::Pattern(pattern) => {
            invalid(pattern.is_match(text), Format::Regex(pattern.as_str()))
        }
        StringCheck::StartsWith(prefix) => {
            invalid(text.starts_with(prefix.as_str()), Format::StartsWith(prefix))
        }
        StringCheck::EndsWith(suffix) => {
            invalid(text.ends_with(suffix.as_str()), Format::EndsWith(suffix))
        }
        StringCheck::Includes(needle) => {
            invalid(text.contains(needle.as_str()), Format::Includes(needle))
        }
    }
}

impl Validate for StringSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let mut text = match input {
            Value::String(text) => text.clone(),
            other if self.coerce => match coerce::to_string(other) {
                Some(text) => text,
                None => return coercion_failed(ctx, "string", other, self.checks.type_message()),
            },
            other => return invalid_type(ctx, "string", other, self.checks.type_message()),
        };

        for transform in &self.transforms {
            text = match transform {
                StringTransform::Trim => text.trim().to_owned(),
                StringTransform::Lowercase => text.to_lowercase(),
                StringTransform::Uppercase => text.to_uppercase(),
            };
        }

        for check in self.checks.iter() {
            if let Some(message) = failure(&check.kind, &text) {
                return Err(vec![ctx.issue_with(&message, check.message.as_deref())]);
            }
        }
        Ok(Value::String(text))
    }
}
