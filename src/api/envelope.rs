//! Response envelope normalization
//!
//! The service answers some endpoints with the payload itself and others
//! with the payload nested under a `data` key. Every consumer of a response
//! body goes through this module so the wrapper convention lives in one
//! place instead of ad-hoc key checks at each call site.

use serde_json::Value;

/// Key under which wrapped responses nest their payload.
const WRAPPER_KEY: &str = "data";

/// A decoded response body, classified by envelope shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The value is the payload itself
    Direct(Value),
    /// The payload was nested under the wrapper key
    Wrapped(Value),
}

impl Envelope {
    /// Classify a decoded JSON value by envelope shape.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Object(mut map) => match map.remove(WRAPPER_KEY) {
                Some(inner) => Envelope::Wrapped(inner),
                None => Envelope::Direct(Value::Object(map)),
            },
            other => Envelope::Direct(other),
        }
    }

    /// Collapse to the underlying payload, dropping the shape tag.
    pub fn into_payload(self) -> Value {
        match self {
            Envelope::Direct(value) | Envelope::Wrapped(value) => value,
        }
    }
}

/// Unwrap a possibly-wrapped response body.
pub fn normalize(value: Value) -> Value {
    Envelope::classify(value).into_payload()
}

/// Look up `key` on the raw value first, then under the wrapper.
///
/// Returns `None` when neither shape carries the field. Callers must treat
/// that as a failed extraction, never substitute a default.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value
        .get(key)
        .or_else(|| value.get(WRAPPER_KEY).and_then(|inner| inner.get(key)))
}

/// View a possibly-wrapped payload as a collection.
pub fn collection(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get(WRAPPER_KEY).and_then(Value::as_array).map(Vec::as_slice),
        _ => None,
    }
}
