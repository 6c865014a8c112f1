//! Identifiers for remote resources

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An opaque resource identifier.
///
/// The service returns numeric ids, but older builds answered strings;
/// both compare and render transparently. Empty strings and nulls are
/// never valid identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Num(i64),
    Str(String),
}

impl ResourceId {
    /// Extract an identifier from a decoded JSON value.
    ///
    /// Returns `None` for anything that cannot serve as an id; callers
    /// treat that as a failed extraction.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(ResourceId::Num),
            Value::String(s) if !s.is_empty() => Some(ResourceId::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Num(n) => write!(f, "{n}"),
            ResourceId::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Identifier of a connectable data source registered with the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceRef {
    pub id: ResourceId,
}

/// Identifier of a created transformation pipeline.
///
/// Lifecycle: created, observed in a listing, deleted. Never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRef {
    pub id: ResourceId,
}
