//! Number schema
//!
//! The base check accepts any `f64` except `NaN`; infinities pass unless
//! [`NumberSchema::finite`] is declared.

use crate::coerce;
use crate::foundation::{Bound, Message, Origin, Outcome, ParseContext, Validate};
use crate::validators::{Checks, coercion_failed, invalid_type};
use crate::value::Value;

/// Largest integer an `f64` represents exactly, along with all smaller ones.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, Copy)]
enum NumberCheck {
    Gt(f64),
    Gte(f64),
    Lt(f64),
    Lte(f64),
    Int,
    MultipleOf(f64),
    Finite,
    Safe,
}

/// Validates numbers.
#[derive(Debug, Clone)]
pub struct NumberSchema {
    checks: Checks<NumberCheck>,
    coerce: bool,
}

#[allow(clippy::new_without_default)]
impl NumberSchema {
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

    pub(crate) fn is_coerced(&self) -> bool {
        self.coerce
    }

    fn check(&self, check: NumberCheck) -> Self {
        Self {
            checks: self.checks.with(check),
            ..self.clone()
        }
    }

    pub fn gt(&self, n: f64) -> Self {
        self.check(NumberCheck::Gt(n))
    }

    pub fn gte(&self, n: f64) -> Self {
        self.check(NumberCheck::Gte(n))
    }

    /// Alias of [`NumberSchema::gte`].
    pub fn min(&self, n: f64) -> Self {
        self.gte(n)
    }

    pub fn lt(&self, n: f64) -> Self {
        self.check(NumberCheck::Lt(n))
    }

    pub fn lte(&self, n: f64) -> Self {
        self.check(NumberCheck::Lte(n))
    }

    /// Alias of [`NumberSchema::lte`].
    pub fn max(&self, n: f64) -> Self {
        self.lte(n)
    }

    /// No fractional part; infinities are rejected.
    pub fn int(&self) -> Self {
        self.check(NumberCheck::Int)
    }

    pub fn positive(&self) -> Self {
        self.gt(0.0)
    }

    pub fn nonnegative(&self) -> Self {
        self.gte(0.0)
    }

    pub fn negative(&self) -> Self {
        self.lt(0.0)
    }

    pub fn nonpositive(&self) -> Self {
        self.lte(0.0)
    }

    /// Evenly divisible by `step`, tolerant of decimal representation error.
    pub fn multiple_of(&self, step: f64) -> Self {
        self.check(NumberCheck::MultipleOf(step))
    }

    pub fn finite(&self) -> Self {
        self.check(NumberCheck::Finite)
    }

    /// An integer within `±MAX_SAFE_INTEGER`.
    pub fn safe(&self) -> Self {
        self.check(NumberCheck::Safe)
    }

    /// Replaces the message of the most recently declared check.
    pub fn message(&self, message: &str) -> Self {
        Self {
            checks: self.checks.with_message(message),
            ..self.clone()
        }
    }
}

fn decimal_places(n: f64) -> i32 {
    n.to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as i32)
}

/// Remainder computed on scaled integers so that `0.3 % 0.1` is zero.
pub(crate) fn float_safe_remainder(value: f64, step: f64) -> f64 {
    let places = decimal_places(value).max(decimal_places(step)).min(15);
    let scale = 10f64.powi(places);
    let value = (value * scale).round();
    let step = (step * scale).round();
    (value % step) / scale
}

fn is_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

const fn too_small(minimum: f64, inclusive: bool) -> Message<'static> {
    Message::TooSmall {
        origin: Origin::Number,
        minimum: Bound::Number(minimum),
        inclusive,
        exact: false,
    }
}

const fn too_big(maximum: f64, inclusive: bool) -> Message<'static> {
    Message::TooBig {
        origin: Origin::Number,
        maximum: Bound::Number(maximum),
        inclusive,
        exact: false,
    }
}

const NOT_INTEGER: Message<'static> = Message::InvalidType {
    expected: "integer",
    received: "float",
};

fn failure(check: NumberCheck, n: f64) -> Option<Message<'static>> {
    match check {
        NumberCheck::Gt(min) => (n <= min).then_some(too_small(min, false)),
        NumberCheck::Gte(min) => (n < min).then_some(too_small(min, true)),
        NumberCheck::Lt(max) => (n >= max).then_some(too_big(max, false)),
        NumberCheck::Lte(max) => (n > max).then_some(too_big(max, true)),
        NumberCheck::Int => (!is_integer(n)).then_some(NOT_INTEGER),
        NumberCheck::MultipleOf(step) => (float_safe_remainder(n, step) != 0.0).then_some(
            Message::NotMultipleOf {
                origin: Origin::Number,
                divisor: Bound::Number(step),
            },
        ),
        NumberCheck::Finite => (!n.is_finite()).then_some(Message::NotFinite),
        NumberCheck::Safe => {
            if n < -MAX_SAFE_INTEGER {
                Some(too_small(-MAX_SAFE_INTEGER, true))
            } else if n > MAX_SAFE_INTEGER {
                Some(too_big(MAX_SAFE_INTEGER, true))
            } else if is_integer(n) {
                None
            } else {
                Some(NOT_INTEGER)
            }
        }
    }
}

impl Validate for NumberSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let n = match input {
            Value::Number(n) => *n,
            other if self.coerce => match coerce::to_number(other) {
                Some(n) => n,
                None => return coercion_failed(ctx, "number", other, self.checks.type_message()),
            },
            other => return invalid_type(ctx, "number", other, self.checks.type_message()),
        };
        if n.is_nan() {
            return invalid_type(ctx, "number", &Value::Number(n), self.checks.type_message());
        }

        for check in self.checks.iter() {
            if let Some(message) = failure(check.kind, n) {
                return Err(vec![ctx.issue_with(&message, check.message.as_deref())]);
            }
        }
        Ok(Value::Number(n))
    }
}
