//! Response normalizer
//!
//! Extracts the structured payload an agent produced from its envelope.
//! Agents answer either with a `response.result` object or with a JSON
//! document encoded in `response.message`; the normalizer accepts both and
//! never fails. Anything it cannot read is reported as [`Payload::Absent`].

use crate::envelope::RawEnvelope;
use crate::records::Fields;
use serde_json::{Map, Value};

/// Normalized payload: a field mapping, or nothing usable
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// Decoded field mapping, no schema guaranteed
    Present(Map<String, Value>),
    /// The envelope carried no decodable data
    #[default]
    Absent,
}

impl Payload {
    /// Check if a payload was extracted
    #[inline]
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Underlying field mapping
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Present(map) => Some(map),
            Self::Absent => None,
        }
    }

    /// Raw value of a top-level field
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(field))
    }

    /// Typed field view used by the record builders
    #[inline]
    #[must_use]
    pub fn fields(&self) -> Fields<'_> {
        Fields::new(self.as_map())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self::Present(map)
    }
}

/// Extract the payload from an envelope
///
/// Order of preference:
/// 1. no response section → absent
/// 2. non-empty `response.result` object
/// 3. `response.message` decoded as a JSON object
/// 4. absent
#[must_use]
pub fn normalize(envelope: Option<&RawEnvelope>) -> Payload {
    let Some(section) = envelope.and_then(RawEnvelope::response_section) else {
        tracing::debug!("envelope has no response section");
        return Payload::Absent;
    };

    if let Some(Value::Object(result)) = section.get("result") {
        if !result.is_empty() {
            return Payload::Present(result.clone());
        }
    }

    match section.get("message").and_then(Value::as_str) {
        Some(message) if !message.is_empty() => decode_message(message),
        _ => Payload::Absent,
    }
}

fn decode_message(message: &str) -> Payload {
    match serde_json::from_str::<Value>(message) {
        Ok(Value::Object(map)) => Payload::Present(map),
        Ok(other) => {
            tracing::debug!(kind = value_kind(&other), "message decoded to a non-object");
            Payload::Absent
        }
        Err(e) => {
            tracing::debug!(error = %e, "message is not structured data");
            Payload::Absent
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
