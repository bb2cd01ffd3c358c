//! Date schema
//!
//! Accepts a [`Value::Date`], or text / epoch milliseconds converted with
//! [`parse_date`]. A value that cannot be converted is an `invalid_date`
//! issue, distinct from a bounds failure.
//!
//! `past`, `future` and `today` read the clock once, when the check is
//! declared. A constructed schema therefore gives the same answer for the
//! same input on every call; rebuild the schema to move its reference point.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::foundation::{Bound, Message, Origin, Outcome, ParseContext, Validate};
use crate::validators::{Checks, coercion_failed, invalid_type};
use crate::value::Value;

/// Largest distance from the epoch, in milliseconds, a date may have.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

#[derive(Debug, Clone, Copy)]
enum DateCheck {
    Min(DateTime<Utc>),
    Max(DateTime<Utc>),
    Before(DateTime<Utc>),
    After(DateTime<Utc>),
    SameDay(NaiveDate),
}

/// Validates instants.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
/// use chrono::{TimeZone, Utc};
///
/// let reference = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
/// let schema = date().past_at(reference);
///
/// assert!(schema.is_valid("2024-05-31"));
/// assert!(!schema.is_valid("2024-06-02"));
/// ```
#[derive(Debug, Clone)]
pub struct DateSchema {
    checks: Checks<DateCheck>,
    coerce: bool,
}

#[allow(clippy::new_without_default)]
impl DateSchema {
    pub fn new() -> Self {
        Self {
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

    fn check(&self, check: DateCheck) -> Self {
        Self {
            checks: self.checks.with(check),
            ..self.clone()
        }
    }

    /// Not earlier than `min`.
    pub fn min(&self, min: DateTime<Utc>) -> Self {
        self.check(DateCheck::Min(min))
    }

    /// Not later than `max`.
    pub fn max(&self, max: DateTime<Utc>) -> Self {
        self.check(DateCheck::Max(max))
    }

    /// Strictly before the moment this check is declared.
    pub fn past(&self) -> Self {
        self.past_at(Utc::now())
    }

    /// Strictly after the moment this check is declared.
    pub fn future(&self) -> Self {
        self.future_at(Utc::now())
    }

    /// On the UTC calendar day this check is declared.
    pub fn today(&self) -> Self {
        self.today_at(Utc::now())
    }

    pub fn past_at(&self, reference: DateTime<Utc>) -> Self {
        self.check(DateCheck::Before(reference))
    }

    pub fn future_at(&self, reference: DateTime<Utc>) -> Self {
        self.check(DateCheck::After(reference))
    }

    pub fn today_at(&self, reference: DateTime<Utc>) -> Self {
        self.check(DateCheck::SameDay(reference.date_naive()))
    }

    /// Replaces the message of the most recently declared check.
    pub fn message(&self, message: &str) -> Self {
        Self {
            checks: self.checks.with_message(message),
            ..self.clone()
        }
    }
}

/// Converts text to an instant.
///
/// Accepted forms, tried in order: RFC 3339, a bare `YYYY-MM-DD` (midnight
/// UTC), a date and time without offset (read as UTC) and RFC 2822.
#[must_use]
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    DateTime::parse_from_rfc2822(text)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Converts epoch milliseconds to an instant; the fraction is truncated.
#[must_use]
pub fn date_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

/// Result of reading a value as a date.
pub(crate) enum DateInput {
    Valid(DateTime<Utc>),
    Unparsable,
    WrongKind,
}

pub(crate) fn read_date(input: &Value) -> DateInput {
    let parsed = match input {
        Value::Date(date) => Some(*date),
        Value::String(text) => parse_date(text),
        Value::Number(millis) => date_from_millis(*millis),
        _ => return DateInput::WrongKind,
    };
    parsed.map_or(DateInput::Unparsable, DateInput::Valid)
}

fn failure(check: DateCheck, date: DateTime<Utc>) -> Option<Message<'static>> {
    let small = |minimum, inclusive| Message::TooSmall {
        origin: Origin::Date,
        minimum: Bound::Date(minimum),
        inclusive,
        exact: false,
    };
    let big = |maximum, inclusive| Message::TooBig {
        origin: Origin::Date,
        maximum: Bound::Date(maximum),
        inclusive,
        exact: false,
    };
    match check {
        DateCheck::Min(min) => (date < min).then(|| small(min, true)),
        DateCheck::Max(max) => (date > max).then(|| big(max, true)),
        DateCheck::Before(reference) => (date >= reference).then(|| big(reference, false)),
        DateCheck::After(reference) => (date <= reference).then(|| small(reference, false)),
        DateCheck::SameDay(day) => {
            let start = Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN));
            let end = day
                .checked_add_days(Days::new(1))
                .map(|next| Utc.from_utc_datetime(&next.and_time(chrono::NaiveTime::MIN)));
            if date < start {
                Some(small(start, true))
            } else {
                end.filter(|end| date >= *end).map(|end| big(end, false))
            }
        }
    }
}

impl Validate for DateSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let date = match read_date(input) {
            DateInput::Valid(date) => date,
            DateInput::Unparsable => {
                return Err(vec![
                    ctx.issue_with(&Message::InvalidDate, self.checks.type_message()),
                ]);
            }
            DateInput::WrongKind if self.coerce => {
                return coercion_failed(ctx, "date", input, self.checks.type_message());
            }
            DateInput::WrongKind => {
                return invalid_type(ctx, "date", input, self.checks.type_message());
            }
        };

        for check in self.checks.iter() {
            if let Some(message) = failure(check.kind, date) {
                return Err(vec![ctx.issue_with(&message, check.message.as_deref())]);
            }
        }
        Ok(Value::Date(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date;
    use crate::foundation::IssueCode;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_accepted_inputs() {
        let expected = Value::Date(at(2024, 1, 2, 0));
        assert_eq!(date().parse("2024-01-02").unwrap(), expected);
        assert_eq!(date().parse("2024-01-02T00:00:00Z").unwrap(), expected);
        assert_eq!(date().parse(1_704_153_600_000_i64).unwrap(), expected);
        assert_eq!(date().parse(at(2024, 1, 2, 0)).unwrap(), expected);
    }

    #[test]
    fn test_unparsable_is_distinct_from_wrong_kind() {
        assert_eq!(
            date().parse("not a date").unwrap_err().first().code,
            IssueCode::InvalidDate
        );
        assert_eq!(
            date().parse(f64::NAN).unwrap_err().first().code,
            IssueCode::InvalidDate
        );
        assert_eq!(date().parse(true).unwrap_err().first().code, IssueCode::InvalidType);
    }

    #[test]
    fn test_bounds() {
        let schema = date().min(at(2024, 1, 1, 0)).max(at(2024, 12, 31, 0));
        assert!(schema.is_valid(at(2024, 6, 1, 0)));
        assert_eq!(
            schema.parse(at(2023, 6, 1, 0)).unwrap_err().first().code,
            IssueCode::TooSmall
        );
        assert_eq!(
            schema.parse(at(2025, 6, 1, 0)).unwrap_err().first().code,
            IssueCode::TooBig
        );
    }

    #[test]
    fn test_relative_checks_use_declared_reference() {
        let reference = at(2024, 6, 1, 12);
        let past = date().past_at(reference);
        assert!(past.is_valid(at(2024, 6, 1, 11)));
        assert!(!past.is_valid(reference));

        let future = date().future_at(reference);
        assert!(future.is_valid(at(2024, 6, 1, 13)));
        assert!(!future.is_valid(reference));

        let today = date().today_at(reference);
        assert!(today.is_valid(at(2024, 6, 1, 0)));
        assert!(today.is_valid(at(2024, 6, 1, 23)));
        assert!(!today.is_valid(at(2024, 6, 2, 0)));
        assert!(!today.is_valid(at(2024, 5, 31, 23)));
    }

    #[test]
    fn test_past_is_stable_across_calls() {
        let schema = date().past();
        let candidate = Utc::now() + chrono::Duration::milliseconds(5);
        let first = schema.is_valid(candidate);
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(schema.is_valid(candidate), first);
        assert!(!first);
    }
}
