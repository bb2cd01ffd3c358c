//! Issue and error types
//!
//! A failed validation produces one or more [`Issue`]s. Each issue carries a
//! stable [`IssueCode`], a [`Path`] into the original input, a rendered
//! message and optional structured detail. The non-empty collection of issues
//! returned to callers is a [`ValidationError`].
//!
//! Construction-time mistakes (an invalid regex, a discriminated union with no
//! usable discriminator) are reported separately through [`SchemaError`].

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

// ============================================================================
// ISSUE CODE
// ============================================================================

/// Closed taxonomy of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The value has the wrong dynamic kind.
    InvalidType,
    /// A lower bound (length, size, value, instant) was violated.
    TooSmall,
    /// An upper bound was violated.
    TooBig,
    NotMultipleOf,
    NotFinite,
    /// A string did not match a format (email, url, uuid, regex, ...).
    InvalidFormat,
    /// A date could not be parsed.
    InvalidDate,
    InvalidLiteral,
    InvalidEnumValue,
    /// An object in strict mode received keys outside its shape.
    UnrecognizedKeys,
    /// A record key was rejected by the key schema or the key guard.
    InvalidKey,
    InvalidUnion,
    InvalidUnionDiscriminator,
    /// The two sides of an intersection produced values that cannot merge.
    InvalidIntersectionTypes,
    TupleLength,
    CoercionFailed,
    TransformFailed,
    /// A user-supplied refinement failed.
    Custom,
}

impl IssueCode {
    /// Stable snake_case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::NotMultipleOf => "not_multiple_of",
            Self::NotFinite => "not_finite",
            Self::InvalidFormat => "invalid_format",
            Self::InvalidDate => "invalid_date",
            Self::InvalidLiteral => "invalid_literal",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::InvalidKey => "invalid_key",
            Self::InvalidUnion => "invalid_union",
            Self::InvalidUnionDiscriminator => "invalid_union_discriminator",
            Self::InvalidIntersectionTypes => "invalid_intersection_types",
            Self::TupleLength => "tuple_length",
            Self::CoercionFailed => "coercion_failed",
            Self::TransformFailed => "transform_failed",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PATH
// ============================================================================

/// One step into a nested input: an object key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of an issue inside the input; empty for the root.
///
/// Most inputs are shallow, so four segments live inline.
pub type Path = SmallVec<[PathSegment; 4]>;

/// Renders a path as `user.tags[0]`.
#[must_use]
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

// ============================================================================
// ISSUE
// ============================================================================

/// A single validation failure.
///
/// # Examples
///
/// ```
/// use vellum_schema::{Issue, IssueCode};
///
/// let issue = Issue::new(IssueCode::TooSmall, "String must contain at least 3 character(s)")
///     .with_param("minimum", "3")
///     .at("name");
///
/// assert_eq!(issue.path_string(), "name");
/// assert_eq!(issue.param("minimum"), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub code: IssueCode,
    pub path: Path,
    pub message: String,
    /// Structured detail such as `expected`, `received`, `minimum`, `keys`.
    #[serde(serialize_with = "serialize_params", skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<(Cow<'static, str>, String)>,
    /// Issues of sub-validations, e.g. every failed union alternative.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Issue>,
}

impl Issue {
    /// Creates an issue at the root path.
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            path: Path::new(),
            message: message.into(),
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, nested: Vec<Issue>) -> Self {
        self.nested = nested;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl IntoIterator<Item = PathSegment>) -> Self {
        self.path = path.into_iter().collect();
        self
    }

    /// Prepends a segment, placing this issue one level deeper.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Looks up a structured detail by name.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The path rendered as `a.b[0]`.
    #[must_use]
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path_string(), self.message)
        }
    }
}

fn serialize_params<S: Serializer>(
    params: &[(Cow<'static, str>, String)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(params.iter().map(|(k, v)| (k.as_ref(), v)))
}

/// Prepends `segment` to every issue in the list.
pub(crate) fn prefix_all(issues: Vec<Issue>, segment: &PathSegment) -> Vec<Issue> {
    issues
        .into_iter()
        .map(|issue| issue.at(segment.clone()))
        .collect()
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The non-empty, ordered list of issues produced by a failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    /// Wraps a single issue.
    pub fn new(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    /// Builds an error from a list of issues; `None` when the list is empty.
    #[must_use]
    pub fn from_issues(issues: Vec<Issue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    /// Internal constructor for failure branches, which always carry issues.
    pub(crate) fn collected(issues: Vec<Issue>) -> Self {
        debug_assert!(!issues.is_empty(), "failure without issues");
        Self { issues }
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// The first issue encountered.
    #[must_use]
    pub fn first(&self) -> &Issue {
        &self.issues[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Always `false`; kept for API symmetry with [`ValidationError::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Form-style view: root-level messages plus messages grouped by the
    /// first path segment.
    #[must_use]
    pub fn flatten(&self) -> FlattenedErrors {
        let mut flattened = FlattenedErrors::default();
        for issue in &self.issues {
            match issue.path.first() {
                None => flattened.form_errors.push(issue.message.clone()),
                Some(segment) => flattened
                    .field_errors
                    .entry(segment.to_string())
                    .or_default()
                    .push(issue.message.clone()),
            }
        }
        flattened
    }

    /// All issues as a JSON array.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(&self.issues).unwrap_or(serde_json::Value::Null)
    }

    /// Human-readable report, one line per issue with nested alternatives
    /// indented beneath it.
    #[must_use]
    pub fn format_report(&self) -> String {
        fn write_issue(out: &mut String, issue: &Issue, depth: usize) {
            out.push_str(&"  ".repeat(depth));
            out.push_str("✖ ");
            out.push_str(&issue.message);
            if !issue.path.is_empty() {
                out.push('\n');
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str("→ at ");
                out.push_str(&issue.path_string());
            }
            out.push('\n');
            for nested in &issue.nested {
                write_issue(out, nested, depth + 1);
            }
        }

        let mut out = String::new();
        for issue in &self.issues {
            write_issue(&mut out, issue, 0);
        }
        out
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [single] => f.write_str(&single.message),
            issues => write!(f, "{} validation issues", issues.len()),
        }
    }
}

impl From<Issue> for ValidationError {
    fn from(issue: Issue) -> Self {
        Self::new(issue)
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.issues.serialize(serializer)
    }
}

/// Output of [`ValidationError::flatten`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlattenedErrors {
    pub form_errors: Vec<String>,
    pub field_errors: IndexMap<String, Vec<String>>,
}

// ============================================================================
// CONSTRUCTION ERRORS
// ============================================================================

/// A schema could not be built.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("discriminated union option {index} has no literal `{discriminator}` field")]
    MissingDiscriminator { discriminator: String, index: usize },

    #[error("discriminator value {value} appears in more than one option")]
    DuplicateDiscriminator { value: String },
}

/// A codec call failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("codec has an async conversion; use parse_async or encode_async")]
    AsyncRequired,
}

impl CodecError {
    /// The validation failure, if that is what this is.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            Self::AsyncRequired => None,
        }
    }
}
