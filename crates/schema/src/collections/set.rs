//! Set schema

use crate::collections::{SizeCheck, check_size, validate_child};
use crate::foundation::{Origin, Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::validators::{Checks, invalid_type};
use crate::value::Value;

/// Validates every element of a [`Value::Set`] and rebuilds the set from
/// the outputs. Elements that become equal after validation collapse.
#[derive(Debug, Clone)]
pub struct SetSchema {
    element: Schema,
    checks: Checks<SizeCheck>,
}

impl SetSchema {
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            element: element.into(),
            checks: Checks::new(),
        }
    }

    pub fn element(&self) -> &Schema {
        &self.element
    }

    fn check(&self, check: SizeCheck) -> Self {
        Self {
            element: self.element.clone(),
            checks: self.checks.with(check),
        }
    }

    pub fn min(&self, n: usize) -> Self {
        self.check(SizeCheck::Min(n))
    }

    pub fn max(&self, n: usize) -> Self {
        self.check(SizeCheck::Max(n))
    }

    pub fn size(&self, n: usize) -> Self {
        self.check(SizeCheck::Exact(n))
    }

    pub fn nonempty(&self) -> Self {
        self.min(1)
    }

    pub fn message(&self, message: &str) -> Self {
        Self {
            element: self.element.clone(),
            checks: self.checks.with_message(message),
        }
    }
}

impl Validate for SetSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        let Value::Set(elements) = input else {
            return invalid_type(ctx, "set", input, self.checks.type_message());
        };

        let mut output = Vec::with_capacity(elements.len());
        let mut issues = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            match validate_child(&self.element, element, index, ctx) {
                Ok(value) => output.push(value),
                Err(child) => {
                    issues.extend(child);
                    if ctx.fail_fast() {
                        return Err(issues);
                    }
                }
            }
        }

        // Bounds apply to the set that is returned, after equal outputs collapse.
        let output = Value::set(output);
        let size = match (&output, issues.is_empty()) {
            (Value::Set(unique), true) => unique.len(),
            _ => elements.len(),
        };
        if let Some(issue) = check_size(&self.checks, size, Origin::Set, ctx) {
            issues.push(issue);
        }

        if issues.is_empty() {
            Ok(output)
        } else {
            Err(issues)
        }
    }
}
