//! Per-call configuration
//!
//! Validators are immutable and shared; anything that varies between calls
//! (the message catalog, whether to stop at the first issue) travels in a
//! [`ParseOptions`] value and is threaded through every node as a
//! [`ParseContext`]. Nothing here is global.

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::foundation::error::{Issue, ValidationError};
use crate::foundation::messages::{EnglishCatalog, Message, MessageCatalog};
use crate::value::Value;

/// Result of validating one node: the output value or the issues found.
pub type Outcome = Result<Value, Vec<Issue>>;

static DEFAULT_OPTIONS: LazyLock<ParseOptions> = LazyLock::new(ParseOptions::new);

// ============================================================================
// OPTIONS
// ============================================================================

/// Caller-selected settings for one validation call.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let options = ParseOptions::new().abort_early(true);
/// let schema = object!{ "a" => string(), "b" => string() };
/// let result = schema.safe_parse_with(serde_json::json!({}), &options);
///
/// assert_eq!(result.error().map(|e| e.len()), Some(1));
/// ```
#[derive(Clone)]
pub struct ParseOptions {
    catalog: Arc<dyn MessageCatalog>,
    abort_early: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(EnglishCatalog),
            abort_early: false,
        }
    }

    /// Shared instance with default settings.
    #[must_use]
    pub fn shared() -> &'static Self {
        &DEFAULT_OPTIONS
    }

    /// Renders messages with `catalog` instead of the English table.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_catalog(mut self, catalog: impl MessageCatalog + 'static) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Makes the non-throwing entry points stop at the first issue too.
    #[must_use = "builder methods must be chained or built"]
    pub fn abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn MessageCatalog {
        self.catalog.as_ref()
    }

    #[must_use]
    pub fn is_abort_early(&self) -> bool {
        self.abort_early
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("locale", &self.catalog.locale())
            .field("abort_early", &self.abort_early)
            .finish()
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Whether composite validators stop at the first issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueMode {
    /// Stop at the first issue (the throwing entry points).
    FailFast,
    /// Keep going and report every issue found.
    Collect,
}

/// State threaded through one validation call.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    options: &'a ParseOptions,
    mode: IssueMode,
}

impl<'a> ParseContext<'a> {
    #[must_use]
    pub fn new(options: &'a ParseOptions, mode: IssueMode) -> Self {
        Self { options, mode }
    }

    #[must_use]
    pub fn options(&self) -> &'a ParseOptions {
        self.options
    }

    #[must_use]
    pub fn mode(&self) -> IssueMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn fail_fast(&self) -> bool {
        self.mode == IssueMode::FailFast
    }

    /// Builds an issue, rendering its text through the catalog.
    #[must_use]
    pub fn issue(&self, message: &Message<'_>) -> Issue {
        self.issue_with(message, None)
    }

    /// Like [`ParseContext::issue`], but a custom text wins over the catalog.
    #[must_use]
    pub fn issue_with(&self, message: &Message<'_>, custom: Option<&str>) -> Issue {
        let text = match custom {
            Some(text) => text.to_owned(),
            None => self.options.catalog.render(message),
        };
        let mut issue = Issue::new(message.code(), text);
        issue.params = message.params();
        issue
    }

    /// Single-issue failure.
    pub fn fail(&self, message: &Message<'_>) -> Outcome {
        Err(vec![self.issue(message)])
    }
}

// ============================================================================
// PARSE RESULT
// ============================================================================

/// Outcome of a non-throwing parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Success(Value),
    Failure(ValidationError),
}

impl ParseResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl From<Outcome> for ParseResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Ok(value) => Self::Success(value),
            Err(issues) => Self::Failure(ValidationError::collected(issues)),
        }
    }
}

impl From<ParseResult> for Result<Value, ValidationError> {
    fn from(result: ParseResult) -> Self {
        result.into_result()
    }
}
