//! Bidirectional codecs
//!
//! A [`Codec`] pairs an input schema and an output schema with a `decode`
//! conversion (input to output) and an `encode` conversion (output to input).
//! Both directions validate on both sides of the conversion:
//!
//! - decode: input schema, `decode`, output schema
//! - encode: output schema, `encode`, input schema
//!
//! Conversions are either synchronous or boxed futures. A codec with an
//! async conversion refuses the synchronous entry points with
//! [`CodecError::AsyncRequired`] instead of blocking.

use std::fmt::{self, Display};
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::foundation::{
    CodecError, IssueMode, Message, ParseContext, ParseOptions, Validate, ValidationError,
};
use crate::schema::Schema;
use crate::value::Value;

type SyncConversion = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;
type AsyncConversion =
    Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, String>> + Send + Sync>;

#[derive(Clone)]
enum Conversion {
    Sync(SyncConversion),
    Async(AsyncConversion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Decode,
    Encode,
}

impl Direction {
    const fn name(self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::Encode => "encode",
        }
    }
}

/// Two schemas and the conversions between them.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let port = codec(
///     string(),
///     number().int().min(1.0).max(65535.0),
///     |text| text.as_str().unwrap_or_default().trim().parse::<f64>(),
///     |number| Ok::<_, std::convert::Infallible>(number.to_string()),
/// );
///
/// assert_eq!(port.parse("8080").unwrap(), Value::from(8080));
/// assert_eq!(port.encode(443).unwrap(), Value::from("443"));
/// assert!(port.parse("0").is_err());
/// ```
///
/// # Results
///
/// Unlike [`Validate::safe_parse`], which returns a
/// [`ParseResult`](crate::ParseResult), every codec entry point returns
/// `Result<Value, CodecError>`. A codec can fail without any issue at all:
/// a synchronous call on an async codec is [`CodecError::AsyncRequired`].
/// The `safe_*` forms differ from `parse` and `encode` only in collecting
/// every issue of the failing stage; [`CodecError::validation`] gives the
/// issues back.
///
/// ```
/// use vellum_schema::prelude::*;
///
/// let pair = codec(
///     object! { "a" => number(), "b" => number() },
///     any(),
///     Ok::<_, std::convert::Infallible>,
///     Ok::<_, std::convert::Infallible>,
/// );
///
/// let error = pair.safe_parse(serde_json::json!({"a": "x", "b": "y"})).unwrap_err();
/// assert_eq!(error.validation().map(ValidationError::len), Some(2));
///
/// let error = pair.parse(serde_json::json!({"a": "x", "b": "y"})).unwrap_err();
/// assert_eq!(error.validation().map(ValidationError::len), Some(1));
/// ```
#[derive(Clone)]
pub struct Codec {
    input: Schema,
    output: Schema,
    decode: Conversion,
    encode: Conversion,
}

fn sync_conversion<F, T, E>(convert: F) -> Conversion
where
    F: Fn(Value) -> Result<T, E> + Send + Sync + 'static,
    T: Into<Value>,
    E: Display,
{
    Conversion::Sync(Arc::new(move |value| {
        convert(value).map(Into::into).map_err(|error| error.to_string())
    }))
}

fn async_conversion<F, Fut, T, E>(convert: F) -> Conversion
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Into<Value>,
    E: Display,
{
    Conversion::Async(Arc::new(move |value| {
        convert(value)
            .map(|result| result.map(Into::into).map_err(|error| error.to_string()))
            .boxed()
    }))
}

impl Codec {
    /// A codec with synchronous conversions.
    pub fn new<D, E, DT, DE, ET, EE>(
        input: impl Into<Schema>,
        output: impl Into<Schema>,
        decode: D,
        encode: E,
    ) -> Self
    where
        D: Fn(Value) -> Result<DT, DE> + Send + Sync + 'static,
        E: Fn(Value) -> Result<ET, EE> + Send + Sync + 'static,
        DT: Into<Value>,
        ET: Into<Value>,
        DE: Display,
        EE: Display,
    {
        Self {
            input: input.into(),
            output: output.into(),
            decode: sync_conversion(decode),
            encode: sync_conversion(encode),
        }
    }

    /// A codec whose conversions return futures.
    pub fn new_async<D, DF, E, EF, DT, DE, ET, EE>(
        input: impl Into<Schema>,
        output: impl Into<Schema>,
        decode: D,
        encode: E,
    ) -> Self
    where
        D: Fn(Value) -> DF + Send + Sync + 'static,
        DF: Future<Output = Result<DT, DE>> + Send + 'static,
        E: Fn(Value) -> EF + Send + Sync + 'static,
        EF: Future<Output = Result<ET, EE>> + Send + 'static,
        DT: Into<Value>,
        ET: Into<Value>,
        DE: Display,
        EE: Display,
    {
        Self {
            input: input.into(),
            output: output.into(),
            decode: async_conversion(decode),
            encode: async_conversion(encode),
        }
    }

    pub fn input(&self) -> &Schema {
        &self.input
    }

    pub fn output(&self) -> &Schema {
        &self.output
    }

    /// `true` when the synchronous entry points are unavailable.
    pub fn is_async(&self) -> bool {
        matches!(self.decode, Conversion::Async(_)) || matches!(self.encode, Conversion::Async(_))
    }

    /// Decodes `input`, stopping at the first issue.
    pub fn parse(&self, input: impl Into<Value>) -> Result<Value, CodecError> {
        self.run(Direction::Decode, &input.into(), IssueMode::FailFast)
    }

    /// Decodes `input`, reporting every issue of the failing stage.
    pub fn safe_parse(&self, input: impl Into<Value>) -> Result<Value, CodecError> {
        self.run(Direction::Decode, &input.into(), IssueMode::Collect)
    }

    /// Encodes `output`, stopping at the first issue.
    pub fn encode(&self, output: impl Into<Value>) -> Result<Value, CodecError> {
        self.run(Direction::Encode, &output.into(), IssueMode::FailFast)
    }

    /// Encodes `output`, reporting every issue of the failing stage.
    pub fn safe_encode(&self, output: impl Into<Value>) -> Result<Value, CodecError> {
        self.run(Direction::Encode, &output.into(), IssueMode::Collect)
    }

    /// Decodes `input`, awaiting an async conversion if there is one.
    pub async fn parse_async(&self, input: impl Into<Value>) -> Result<Value, CodecError> {
        let input = input.into();
        self.run_async(Direction::Decode, &input, IssueMode::FailFast).await
    }

    /// Encodes `output`, awaiting an async conversion if there is one.
    pub async fn encode_async(&self, output: impl Into<Value>) -> Result<Value, CodecError> {
        let output = output.into();
        self.run_async(Direction::Encode, &output, IssueMode::FailFast).await
    }

    fn stage(&self, direction: Direction) -> (&Schema, &Conversion, &Schema) {
        match direction {
            Direction::Decode => (&self.input, &self.decode, &self.output),
            Direction::Encode => (&self.output, &self.encode, &self.input),
        }
    }

    fn run(&self, direction: Direction, value: &Value, mode: IssueMode) -> Result<Value, CodecError> {
        let (from, conversion, to) = self.stage(direction);
        let Conversion::Sync(convert) = conversion else {
            return Err(CodecError::AsyncRequired);
        };
        let ctx = ParseContext::new(ParseOptions::shared(), mode);

        let accepted = check(from, value, &ctx)?;
        tracing::debug!(direction = direction.name(), "running codec conversion");
        let converted = convert(accepted).map_err(|reason| conversion_failed(&ctx, &reason))?;
        check(to, &converted, &ctx)
    }

    async fn run_async(
        &self,
        direction: Direction,
        value: &Value,
        mode: IssueMode,
    ) -> Result<Value, CodecError> {
        let (from, conversion, to) = self.stage(direction);
        let ctx = ParseContext::new(ParseOptions::shared(), mode);

        let accepted = check(from, value, &ctx)?;
        tracing::debug!(direction = direction.name(), "running codec conversion");
        let converted = match conversion {
            Conversion::Sync(convert) => convert(accepted),
            Conversion::Async(convert) => convert(accepted).await,
        }
        .map_err(|reason| conversion_failed(&ctx, &reason))?;
        check(to, &converted, &ctx)
    }
}

fn check(schema: &Schema, value: &Value, ctx: &ParseContext<'_>) -> Result<Value, CodecError> {
    schema
        .validate(value, ctx)
        .map_err(|issues| CodecError::Validation(ValidationError::collected(issues)))
}

fn conversion_failed(ctx: &ParseContext<'_>, reason: &str) -> CodecError {
    CodecError::Validation(ValidationError::new(
        ctx.issue(&Message::TransformFailed { reason }),
    ))
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("is_async", &self.is_async())
            .finish()
    }
}

/// A codec with synchronous conversions. See [`Codec`].
pub fn codec<D, E, DT, DE, ET, EE>(
    input: impl Into<Schema>,
    output: impl Into<Schema>,
    decode: D,
    encode: E,
) -> Codec
where
    D: Fn(Value) -> Result<DT, DE> + Send + Sync + 'static,
    E: Fn(Value) -> Result<ET, EE> + Send + Sync + 'static,
    DT: Into<Value>,
    ET: Into<Value>,
    DE: Display,
    EE: Display,
{
    Codec::new(input, output, decode, encode)
}

/// A codec whose conversions return futures. See [`Codec`].
pub fn codec_async<D, DF, E, EF, DT, DE, ET, EE>(
    input: impl Into<Schema>,
    output: impl Into<Schema>,
    decode: D,
    encode: E,
) -> Codec
where
    D: Fn(Value) -> DF + Send + Sync + 'static,
    DF: Future<Output = Result<DT, DE>> + Send + 'static,
    E: Fn(Value) -> EF + Send + Sync + 'static,
    EF: Future<Output = Result<ET, EE>> + Send + 'static,
    DT: Into<Value>,
    ET: Into<Value>,
    DE: Display,
    EE: Display,
{
    Codec::new_async(input, output, decode, encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, ValidateExt};
    use crate::{date, number, string};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;

    fn iso_date() -> Codec {
        codec(
            string().datetime(),
            date(),
            |text| Ok::<_, Infallible>(Value::from(text.as_str().unwrap_or_default())),
            |value| match value {
                Value::Date(date) => Ok(date.to_rfc3339()),
                other => Err(format!("not a date: {other}")),
            },
        )
    }

    #[test]
    fn test_decode_validates_both_sides() {
        let decoded = iso_date().parse("2024-01-15T10:00:00Z").unwrap();
        assert_eq!(
            decoded,
            Value::Date(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())
        );

        let error = iso_date().parse("yesterday").unwrap_err();
        let issue = error.validation().unwrap().first();
        assert_eq!(issue.code, IssueCode::InvalidFormat);
    }

    #[test]
    fn test_encode_revalidates_input_shape() {
        let when = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let encoded = iso_date().encode(when).unwrap();
        assert!(string().datetime().is_valid(encoded.clone()));

        let round_trip = iso_date().parse(encoded).unwrap();
        assert_eq!(round_trip, Value::Date(when));
    }

    #[test]
    fn test_conversion_error_is_reported() {
        let halve = codec(
            number(),
            number().int(),
            |n| {
                let n = n.as_f64().unwrap_or_default();
                if n < 0.0 { Err("negative") } else { Ok(n / 2.0) }
            },
            |n| Ok::<_, Infallible>(n.as_f64().unwrap_or_default() * 2.0),
        );
        assert_eq!(halve.parse(4).unwrap(), Value::from(2));
        assert_eq!(
            halve.parse(-4).unwrap_err().validation().unwrap().first().code,
            IssueCode::TransformFailed
        );
        assert_eq!(
            halve.parse(3).unwrap_err().validation().unwrap().first().message,
            "Expected integer, received float"
        );
    }

    #[test]
    fn test_safe_parse_collects_stage_issues() {
        let pair = codec(
            crate::object([("a", string().into_schema()), ("b", string().into_schema())]),
            crate::any(),
            Ok::<_, Infallible>,
            Ok::<_, Infallible>,
        );
        let error = pair.safe_parse(serde_json::json!({})).unwrap_err();
        assert_eq!(error.validation().map(ValidationError::len), Some(2));
    }

    #[test]
    fn test_async_codec_rejects_sync_calls() {
        let slow = codec_async(
            number(),
            number(),
            |n| async move { Ok::<_, Infallible>(n) },
            |n| async move { Ok::<_, Infallible>(n) },
        );
        assert!(slow.is_async());
        assert_eq!(slow.parse(1).unwrap_err(), CodecError::AsyncRequired);
        assert_eq!(slow.encode(1).unwrap_err(), CodecError::AsyncRequired);
        assert_eq!(slow.safe_parse(1).unwrap_err(), CodecError::AsyncRequired);
        assert!(slow.safe_encode(1).unwrap_err().validation().is_none());
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let doubled = codec_async(
            number(),
            number(),
            |n| async move { Ok::<_, Infallible>(n.as_f64().unwrap_or_default() * 2.0) },
            |n| async move { Ok::<_, Infallible>(n.as_f64().unwrap_or_default() / 2.0) },
        );
        assert_eq!(doubled.parse_async(2).await.unwrap(), Value::from(4));
        assert_eq!(doubled.encode_async(4).await.unwrap(), Value::from(2));
        assert!(doubled.parse_async("2").await.is_err());
    }

    #[tokio::test]
    async fn test_sync_codec_works_through_async_entry_points() {
        let identity = codec(string(), string(), Ok::<_, Infallible>, Ok::<_, Infallible>);
        assert_eq!(identity.parse_async("a").await.unwrap(), Value::from("a"));
    }
}
