//! Big integer schema
//!
//! Values are exact `i128`s. A plain [`Value::Number`] is not a big integer,
//! even when integral; use `coerce::bigint()` to bridge the two.

use crate::coerce;
use crate::foundation::{Bound, Message, Origin, Outcome, ParseContext, Validate};
use crate::validators::{Checks, coercion_failed, invalid_type};
use crate::value::Value;

#[derive(Debug, Clone, Copy)]
enum BigIntCheck {
    Gt(i128),
    Gte(i128),
    Lt(i128),
    Lte(i128),
    MultipleOf(i128),
}

/// Validates big integers.
#[derive(Debug, Clone)]
pub struct BigIntSchema {
    checks: Checks<BigIntCheck>,
    coerce: bool,
}

#[allow(clippy::new_without_default)]
impl BigIntSchema {
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

    fn check(&self, check: BigIntCheck) -> Self {
        Self {
            checks: self.checks.with(check),
            ..self.clone()
        }
    }

    pub fn gt(&self, n: i128) -> Self {
        self.check(BigIntCheck::Gt(n))
    }

    pub fn gte(&self, n: i128) -> Self {
        self.check(BigIntCheck::Gte(n))
    }

    pub fn min(&self, n: i128) -> Self {
        self.gte(n)
    }

    pub fn lt(&self, n: i128) -> Self {
        self.check(BigIntCheck::Lt(n))
    }

    pub fn lte(&self, n: i128) -> Self {
        self.check(BigIntCheck::Lte(n))
    }

    pub fn max(&self, n: i128) -> Self {
        self.lte(n)
    }

    pub fn positive(&self) -> Self {
        self.gt(0)
    }

    pub fn nonnegative(&self) -> Self {
        self.gte(0)
    }

    pub fn negative(&self) -> Self {
        self.lt(0)
    }

    pub fn nonpositive(&self) -> Self {
        self.lte(0)
    }

    /// A divisor of zero rejects every value.
    pub fn multiple_of(&self, divisor: i128) -> Self {
        self.check(BigIntCheck::MultipleOf(divisor))
    }

    /// Replaces the message of the most recently declared check.
    pub fn message(&self, message: &str) -> Self {
        Self {
            checks: self.checks.with_message(message),
            ..self.clone()
        }
    }
}

fn failure(check: BigIntCheck, n: i128) -> Option<Message<'static>> {
    let small = |minimum, inclusive| Message::TooSmall {
        origin: Origin::BigInt,
        minimum: Bound::BigInt(minimum),
        inclusive,
        exact: false,
    };
    let big = |maximum, inclusive| Message::TooBig {
        origin: Origin::BigInt,
        maximum: Bound::BigInt(maximum),
        inclusive,
        exact: false,
    };
    match check {
        BigIntCheck::Gt(min) => (n <= min).then(|| small(min, false)),
        BigIntCheck::Gte(min) => (n < min).then(|| small(min, true)),
        BigIntCheck::Lt(max) => (n >= max).then(|| big(max, false)),
        BigIntCheck::Lte(max) => (n > max).then(|| big(max, true)),
        BigIntCheck::MultipleOf(divisor) => {
            let divisible = match divisor {
                0 => false,
                -1 | 1 => true,
                d => n % d == 0,
            };
            (!divisible).then_some(Message::NotMultipleOf {
                origin: Origin::BigInt,
                divisor: Bound::BigInt(divisor),
            })
        }
    }
}

impl Validate for BigIntSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let n = match input {
            Value::BigInt(n) => *n,
            other if self.coerce => match coerce::to_bigint(other) {
                Some(n) => n,
                None => return coercion_failed(ctx, "bigint", other, self.checks.type_message()),
            },
            other => return invalid_type(ctx, "bigint", other, self.checks.type_message()),
        };

        for check in self.checks.iter() {
            if let Some(message) = failure(check.kind, n) {
                return Err(vec![ctx.issue_with(&message, check.message.as_deref())]);
            }
        }
        Ok(Value::BigInt(n))
    }
}
