//! Parameter codec for widget callback requests.
//!
//! A callback request carries its payload as a flat query string. This module
//! provides:
//! - [`ParameterBag`]: the decoded name → raw value map of one request
//! - [`ParamValue`]: the scalar types that travel on the wire
//! - [`encode`] / [`decode`] / [`decode_or`]: the two directions of the codec
//!
//! Whether a missing field is fatal or falls back to a default is decided at
//! each decode site, never here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;


/// Errors raised while decoding a [`ParameterBag`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("missing parameter: {0}")]
    MissingParameter(String),
    #[error("parameter '{name}' is not a valid {expected}: {value:?}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        value: String,
    },
    #[error("unknown {kind} value: {value:?}")]
    UnknownEnumValue { kind: &'static str, value: String },
}

/// Raw parameters of one callback request.
///
/// Built once by the request substrate and only read afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    params: HashMap<String, String>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from name/value pairs. The first occurrence of a name wins.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = HashMap::new();
        for (name, value) in pairs {
            params.entry(name.into()).or_insert_with(|| value.into());
        }
        Self { params }
    }

    /// Parse a URL query string (`a=1&b=two`, with or without a leading `?`).
    ///
    /// Both names and values are percent-decoded and `+` is read as a space.
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn parse_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((name, value)) => (decode_component(name), decode_component(value)),
                None => (decode_component(segment), String::new()),
            });
        Self::from_pairs(pairs)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// A scalar that can travel as a single query parameter.
pub trait ParamValue: Sized {
    /// Human-readable type name used in [`DecodeError::TypeMismatch`].
    const KIND: &'static str;

    fn parse_param(raw: &str) -> Option<Self>;

    fn to_param(&self) -> String;
}

// Integers are plain decimal: surrounding whitespace is a mismatch, the same
// way booleans only accept their exact literals.
impl ParamValue for i64 {
    const KIND: &'static str = "64-bit integer";

    fn parse_param(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for i32 {
    const KIND: &'static str = "32-bit integer";

    fn parse_param(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for bool {
    const KIND: &'static str = "boolean";

    // Literal match only: "True" or "1" are type mismatches.
    fn parse_param(raw: &str) -> Option<Self> {
        match raw {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    const KIND: &'static str = "string";

    fn parse_param(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn to_param(&self) -> String {
        self.clone()
    }
}

/// Instants travel as decimal epoch milliseconds.
impl ParamValue for DateTime<Utc> {
    const KIND: &'static str = "epoch-millisecond instant";

    fn parse_param(raw: &str) -> Option<Self> {
        let millis = i64::parse_param(raw)?;
        DateTime::from_timestamp_millis(millis)
    }

    fn to_param(&self) -> String {
        self.timestamp_millis().to_string()
    }
}

/// Encode one parameter as a query fragment: `&name=value`.
pub fn encode<V: ParamValue>(name: &str, value: &V) -> String {
    format!(
        "&{}={}",
        urlencoding::encode(name),
        urlencoding::encode(&value.to_param())
    )
}

/// Decode a required parameter.
pub fn decode<V: ParamValue>(bag: &ParameterBag, name: &str) -> Result<V, DecodeError> {
    let raw = bag
        .get(name)
        .ok_or_else(|| DecodeError::MissingParameter(name.to_string()))?;

    V::parse_param(raw).ok_or_else(|| DecodeError::TypeMismatch {
        name: name.to_string(),
        expected: V::KIND,
        value: raw.to_string(),
    })
}

/// Decode a parameter that falls back to `default` when it is absent or unparsable.
pub fn decode_or<V: ParamValue>(bag: &ParameterBag, name: &str, default: V) -> V {
    match decode(bag, name) {
        Ok(value) => value,
        Err(DecodeError::MissingParameter(_)) => default,
        Err(err) => {
            tracing::debug!("{err}; using default");
            default
        }
    }
}

/// A closed set of names resolved from a decoded string.
///
/// Lookup tries an exact match first, then a case-insensitive one.
pub trait Discriminator: Sized + Copy + 'static {
    /// Name of the enumeration, used in [`DecodeError::UnknownEnumValue`].
    const KIND: &'static str;

    fn all() -> &'static [Self];

    fn as_str(&self) -> &'static str;

    fn lookup(name: &str) -> Result<Self, DecodeError> {
        let all = Self::all();
        all.iter()
            .find(|v| v.as_str() == name)
            .or_else(|| all.iter().find(|v| v.as_str().eq_ignore_ascii_case(name)))
            .copied()
            .ok_or_else(|| DecodeError::UnknownEnumValue {
                kind: Self::KIND,
                value: name.to_string(),
            })
    }
}

/// Decode a required discriminator parameter.
pub fn decode_enum<D: Discriminator>(bag: &ParameterBag, name: &str) -> Result<D, DecodeError> {
    let raw: String = decode(bag, name)?;
    D::lookup(&raw)
}

/// Encode a discriminator parameter by its canonical name.
pub fn encode_enum<D: Discriminator>(name: &str, value: D) -> String {
    encode(name, &value.as_str().to_string())
}
