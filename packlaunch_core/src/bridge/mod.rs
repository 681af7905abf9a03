//! Bridge data contract.
//!
//! Records exchanged with a UI or any other consumer are built from a loosely
//! typed [`Source`]: either an already-structured JSON mapping or its text
//! encoding. Decoding text is the only step that can fail. Field lookup never
//! does: a missing or mistyped key simply leaves the field unset.

use serde_json::{Map, Value};

mod payload;

pub use payload::Payload;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ContractError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Raw input handed to a record constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Structured(Map<String, Value>),
    Text(String),
    /// Encoded text as read from disk or the network. Must be valid UTF-8.
    Bytes(Vec<u8>),
}

impl Default for Source {
    fn default() -> Self {
        Source::Structured(Map::new())
    }
}

impl From<Map<String, Value>> for Source {
    fn from(map: Map<String, Value>) -> Self {
        Source::Structured(map)
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<&[u8]> for Source {
    fn from(bytes: &[u8]) -> Self {
        Source::Bytes(bytes.to_vec())
    }
}

/// Strings become text to decode, objects are used as-is. Any other JSON
/// value has no keys to look up and behaves like an empty mapping.
impl From<Value> for Source {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Source::Text(text),
            Value::Object(map) => Source::Structured(map),
            _ => Source::default(),
        }
    }
}

impl Source {
    pub fn decode(self) -> Result<Payload, ContractError> {
        match self {
            Source::Structured(map) => Ok(Payload::new(map)),
            Source::Text(text) => object_payload(serde_json::from_str(&text)),
            Source::Bytes(bytes) => object_payload(serde_json::from_slice(&bytes)),
        }
    }
}

fn object_payload(decoded: serde_json::Result<Value>) -> Result<Payload, ContractError> {
    match decoded {
        Ok(Value::Object(map)) => Ok(Payload::new(map)),
        Ok(other) => Err(ContractError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(err) => Err(ContractError::MalformedPayload(err.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A record that can be normalized from a [`Source`].
pub trait Contract: Sized {
    /// Reads every declared field from the payload. Never fails.
    fn from_payload(payload: &Payload) -> Self;

    fn construct<S: Into<Source>>(source: S) -> Result<Self, ContractError> {
        let payload = source.into().decode()?;
        Ok(Self::from_payload(&payload))
    }

    /// Factory form. `None` is the same as an empty mapping.
    fn create_from(source: Option<Source>) -> Result<Self, ContractError> {
        Self::construct(source.unwrap_or_default())
    }

    fn blank() -> Self {
        Self::from_payload(&Payload::default())
    }
}
