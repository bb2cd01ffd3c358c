//! Dynamic value model
//!
//! [`Value`] is the in-memory representation every schema validates. It
//! mirrors the shapes produced by deserializers (records, ordered sequences,
//! booleans, numbers, text) and adds the richer host types a validator has to
//! reason about: dates, big integers, symbols, sets and maps, and an explicit
//! [`Value::Undefined`] sentinel for absent values.
//!
//! # Examples
//!
//! ```
//! use vellum_schema::{Value, ValueKind};
//! use serde_json::json;
//!
//! let value = Value::from(json!({"name": "Ada", "tags": ["x"]}));
//! assert_eq!(value.kind(), ValueKind::Object);
//! assert_eq!(value.get("name"), Some(&Value::from("Ada")));
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Insertion-ordered record of named values.
pub type Object = IndexMap<String, Value>;

/// Shared absent sentinel handed to field schemas when a key is missing.
pub(crate) static UNDEFINED: Value = Value::Undefined;

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically typed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value (a missing key, an unset optional).
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// IEEE-754 double; may hold `NaN` and infinities.
    Number(f64),
    /// Exact integer beyond the safe-integer range of [`Value::Number`].
    BigInt(i128),
    /// UTF-8 text.
    String(String),
    /// Instant in UTC.
    Date(DateTime<Utc>),
    /// Identity-compared unique token.
    Symbol(Symbol),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Insertion-ordered record.
    Object(Object),
    /// Unique elements in insertion order.
    Set(Vec<Value>),
    /// Entries with unique keys in insertion order.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Builds a set, dropping elements equal to an earlier one.
    pub fn set<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for element in elements {
            let element = element.into();
            if !unique.iter().any(|existing| existing.same_value(&element)) {
                unique.push(element);
            }
        }
        Self::Set(unique)
    }

    /// Builds a map; a repeated key keeps its first position and takes the
    /// latest value.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut unique: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match unique.iter_mut().find(|(existing, _)| existing.same_value(&key)) {
                Some(slot) => slot.1 = value,
                None => unique.push((key, value)),
            }
        }
        Self::Map(unique)
    }

    /// Returns the kind tag of this value.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Date(_) => ValueKind::Date,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Set(_) => ValueKind::Set,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Name of the received type as reported in type-mismatch issues.
    ///
    /// Differs from [`ValueKind::name`] only for `NaN`, which is reported as
    /// `"nan"` so a rejected `NaN` reads differently from a wrong kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(n) if n.is_nan() => "nan",
            other => other.kind().name(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key when this value is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Structural equality where `NaN` equals `NaN` and `0.0` equals `-0.0`.
    ///
    /// Used for literal matching, set and map deduplication, and primitive
    /// intersection results.
    #[must_use]
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Array(a), Self::Array(b)) | (Self::Set(a), Self::Set(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_value(y))
            }
            (Self::Object(a), Self::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, x)| b.get(key).is_some_and(|y| x.same_value(y)))
            }
            (Self::Map(a), Self::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka.same_value(kb) && va.same_value(vb))
            }
            (a, b) => a == b,
        }
    }

    /// Converts to JSON following `JSON.stringify` conventions.
    ///
    /// Undefined and symbol entries are dropped from objects and become
    /// `null` elsewhere; non-finite numbers become `null`; big integers and
    /// dates become text; sets become arrays and maps become arrays of
    /// `[key, value]` pairs.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::Undefined | Self::Null | Self::Symbol(_) => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n).map_or(Json::Null, Json::Number),
            Self::BigInt(n) => Json::String(n.to_string()),
            Self::String(s) => Json::String(s.clone()),
            Self::Date(d) => Json::String(format_date(d)),
            Self::Array(items) | Self::Set(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Object(map) => Json::Object(
                map.iter()
                    .filter(|(_, v)| !matches!(v, Self::Undefined | Self::Symbol(_)))
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Map(entries) => Json::Array(
                entries
                    .iter()
                    .map(|(k, v)| Json::Array(vec![k.to_json(), v.to_json()]))
                    .collect(),
            ),
        }
    }
}

/// Formats a number the way a JavaScript host prints it.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        n.to_string()
    }
}

/// ISO-8601 form with millisecond precision, as `Date#toISOString` prints it.
pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Date(d) => f.write_str(&format_date(d)),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Array(_) | Self::Object(_) | Self::Set(_) | Self::Map(_) => {
                write!(f, "{}", self.to_json())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

// ============================================================================
// SYMBOL
// ============================================================================

/// A unique token; two symbols are equal only if they are the same instance.
#[derive(Clone)]
pub struct Symbol(Arc<Option<String>>);

impl Symbol {
    /// Creates a new symbol with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self(Arc::new(Some(description.into())))
    }

    /// Creates a new symbol without a description.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Arc::new(None))
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

// ============================================================================
// VALUE KIND
// ============================================================================

/// Lightweight classification of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Date,
    Symbol,
    Array,
    Object,
    Set,
    Map,
}

impl ValueKind {
    /// Lowercase name used in issue messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Date => "date",
            Self::Symbol => "symbol",
            Self::Array => "array",
            Self::Object => "object",
            Self::Set => "set",
            Self::Map => "map",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`ValueKind`]s, used as a union fast-reject hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct KindSet(u16);

impl KindSet {
    pub(crate) const EMPTY: Self = Self(0);

    pub(crate) fn of(kinds: &[ValueKind]) -> Self {
        Self(kinds.iter().fold(0, |bits, kind| bits | kind.bit()))
    }

    pub(crate) const fn with(self, kind: ValueKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub(crate) const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub(crate) const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub(crate) const fn contains(self, kind: ValueKind) -> bool {
        self.0 & kind.bit() != 0
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => from_json_number(&n),
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Largest integer an `f64` holds exactly, `2^53 - 1`.
const MAX_SAFE_INTEGER: i128 = 9_007_199_254_740_991;

/// Integers beyond the exact `f64` range become big integers instead of
/// being rounded.
fn from_json_number(n: &serde_json::Number) -> Value {
    let integer = n
        .as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from));
    match integer {
        Some(i) if i.abs() > MAX_SAFE_INTEGER => Value::BigInt(i),
        _ => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Number(n as f64)
                }
            }
        )+
    };
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl_from_number!(f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Self::BigInt(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Self::Object(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_conversion_preserves_structure() {
        let value = Value::from(json!({"a": [1, "x", null], "b": true}));
        assert_eq!(value.kind(), ValueKind::Object);
        assert_eq!(
            value.get("a"),
            Some(&Value::Array(vec![
                Value::Number(1.0),
                Value::from("x"),
                Value::Null
            ]))
        );
    }

    #[test]
    fn to_json_drops_undefined_entries() {
        let mut map = Object::new();
        map.insert("kept".into(), Value::from(1));
        map.insert("gone".into(), Value::Undefined);
        assert_eq!(Value::Object(map).to_json(), json!({"kept": 1.0}));
    }

    #[test]
    fn json_integers_beyond_f64_precision_become_bigints() {
        let value: serde_json::Value =
            serde_json::from_str("[9007199254740993, -9007199254740993, 9007199254740991]")
                .unwrap();
        assert_eq!(
            Value::from(value),
            Value::Array(vec![
                Value::BigInt(9_007_199_254_740_993),
                Value::BigInt(-9_007_199_254_740_993),
                Value::Number(9_007_199_254_740_991.0),
            ])
        );
        let huge: serde_json::Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(Value::from(huge), Value::BigInt(i128::from(u64::MAX)));
    }

    #[test]
    fn same_value_treats_nan_as_equal() {
        assert!(Value::Number(f64::NAN).same_value(&Value::Number(f64::NAN)));
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    }

    #[test]
    fn symbols_compare_by_identity() {
        let a = Symbol::new("id");
        let b = Symbol::new("id");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn set_and_map_deduplicate() {
        let set = Value::set([1, 2, 1]);
        assert_eq!(set, Value::Set(vec![Value::from(1), Value::from(2)]));

        let map = Value::map([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(
            map,
            Value::Map(vec![
                (Value::from("a"), Value::from(3)),
                (Value::from("b"), Value::from(2)),
            ])
        );
    }

    #[test]
    fn numbers_format_like_a_script_host() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn kind_set_membership() {
        let set = KindSet::of(&[ValueKind::String]).with(ValueKind::Undefined);
        assert!(set.contains(ValueKind::String));
        assert!(set.contains(ValueKind::Undefined));
        assert!(!set.contains(ValueKind::Number));
        assert!(!KindSet::EMPTY.contains(ValueKind::Null));
    }
}
