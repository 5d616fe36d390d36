//! Raw gateway envelope
//!
//! The envelope is kept close to the wire: the sections whose shape varies
//! between agents stay as `serde_json::Value` and are only interpreted by the
//! normalizer and the artifact locator.

use crate::error::EnvelopeError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Response envelope returned by one agent invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEnvelope {
    /// Whether the gateway considers the call successful
    pub success: bool,
    /// Failure message, present when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response section: `result` object and/or `message` string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Gateway-side module outputs, including `artifact_files`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_outputs: Option<Value>,
    /// Unprocessed mirror of the whole response, string or object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<Value>,
}

impl RawEnvelope {
    /// Successful envelope with no sections
    #[inline]
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Failed envelope carrying a gateway message
    #[inline]
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Decode an envelope from JSON text
    ///
    /// # Errors
    /// - `EnvelopeError::Malformed` if the text is not JSON or a section has
    ///   the wrong type (`success` not a bool, `error` not a string)
    pub fn from_json(text: &str) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode an envelope from an already-parsed value
    ///
    /// # Errors
    /// - `EnvelopeError::Malformed` on a section with the wrong type
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_value(value)?)
    }

    /// With `response.result`
    #[must_use]
    pub fn with_result(mut self, result: Value) -> Self {
        self.insert_response_field("result", result);
        self
    }

    /// With `response.message`
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.insert_response_field("message", Value::String(message.into()));
        self
    }

    /// With top-level `module_outputs.artifact_files`
    #[must_use]
    pub fn with_artifact_files<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files: Vec<Value> = urls
            .into_iter()
            .map(|url| json!({ "file_url": url.into() }))
            .collect();
        self.module_outputs = Some(json!({ "artifact_files": files }));
        self
    }

    /// With `raw_response` mirror
    #[inline]
    #[must_use]
    pub fn with_raw_response(mut self, raw: Value) -> Self {
        self.raw_response = Some(raw);
        self
    }

    /// Response section, if it is an object
    #[inline]
    #[must_use]
    pub fn response_section(&self) -> Option<&Map<String, Value>> {
        self.response.as_ref().and_then(Value::as_object)
    }

    /// Top-level `module_outputs.artifact_files`, whatever its shape
    #[inline]
    #[must_use]
    pub fn artifact_files(&self) -> Option<&Value> {
        self.module_outputs
            .as_ref()
            .and_then(|outputs| outputs.get("artifact_files"))
    }

    /// Message to surface when the call failed
    #[inline]
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        if self.success {
            None
        } else {
            self.error.as_deref()
        }
    }

    fn insert_response_field(&mut self, key: &str, value: Value) {
        let mut section = match self.response.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        section.insert(key.to_string(), value);
        self.response = Some(Value::Object(section));
    }
}
