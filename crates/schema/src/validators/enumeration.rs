//! String enumeration schema

use std::sync::Arc;

use crate::foundation::{Message, Outcome, ParseContext, Validate};
use crate::value::Value;

/// Accepts one of a fixed set of strings.
///
/// An enumeration with no options accepts nothing.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let role = enumeration(["admin", "editor", "viewer"]);
/// let staff = role.exclude(["viewer"]);
///
/// assert!(staff.is_valid("editor"));
/// assert!(!staff.is_valid("viewer"));
/// ```
#[derive(Debug, Clone)]
pub struct EnumSchema {
    options: Arc<[String]>,
    message: Option<Arc<str>>,
}

impl EnumSchema {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for option in options {
            let option = option.into();
            if !unique.contains(&option) {
                unique.push(option);
            }
        }
        Self {
            options: unique.into(),
            message: None,
        }
    }

    /// Declared options, in order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }

    /// A new enumeration restricted to `keep`; unknown names are ignored.
    pub fn extract<I, S>(&self, keep: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keep: Vec<S> = keep.into_iter().collect();
        self.filtered(|option| keep.iter().any(|k| k.as_ref() == option))
    }

    /// A new enumeration without `drop`.
    pub fn exclude<I, S>(&self, drop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let drop: Vec<S> = drop.into_iter().collect();
        self.filtered(|option| !drop.iter().any(|d| d.as_ref() == option))
    }

    fn filtered(&self, keep: impl Fn(&str) -> bool) -> Self {
        Self {
            options: self
                .options
                .iter()
                .filter(|option| keep(option))
                .cloned()
                .collect(),
            message: self.message.clone(),
        }
    }

    pub fn message(&self, message: &str) -> Self {
        Self {
            message: Some(Arc::from(message)),
            ..self.clone()
        }
    }
}

impl Validate for EnumSchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        match input {
            Value::String(text) if self.contains(text) => Ok(input.clone()),
            _ => Err(vec![ctx.issue_with(
                &Message::InvalidEnumValue {
                    options: &self.options,
                    received: input,
                },
                self.message.as_deref(),
            )]),
        }
    }
}
