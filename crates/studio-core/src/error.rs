//! Error types for the studio
//!
//! Provides error handling for:
//! - Workflow failures surfaced to the user (gateway, parse, missing artifact)
//! - Transport failures reported by gateway implementations
//! - Envelope decoding
//! - Configuration loading

use crate::records::GraphicRecord;
use crate::types::WorkflowKind;
use std::path::PathBuf;

/// Shown when a graphic was produced without any image reference
pub const ARTIFACT_MISSING_MESSAGE: &str = "The graphic was processed but no image was returned. \
     This can happen with certain prompts. Please try rephrasing your description or try again.";

/// Workflow error, handled at the workflow boundary
///
/// Every variant's `Display` is the exact text shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Gateway reported `success: false` or the transport failed
    #[error("{message}")]
    GatewayFailure {
        /// Workflow that issued the request
        workflow: WorkflowKind,
        /// Gateway-provided message, or the workflow's fallback
        message: String,
    },

    /// Envelope carried no decodable payload
    #[error("{message}")]
    ParseFailure {
        /// Workflow that issued the request
        workflow: WorkflowKind,
        /// Generic per-workflow message
        message: String,
    },

    /// Graphic was built but no image reference could be located
    #[error("{}", ARTIFACT_MISSING_MESSAGE)]
    ArtifactMissing {
        /// Record shown transiently, never committed
        record: Box<GraphicRecord>,
    },

    /// Request had no primary input and was never issued
    #[error("{workflow} request has no input")]
    EmptyInput {
        /// Workflow that rejected the request
        workflow: WorkflowKind,
    },
}

impl WorkflowError {
    /// Gateway failure, falling back to the workflow's generic message
    ///
    /// A missing or empty message both take the fallback; any other text is
    /// kept verbatim.
    #[must_use]
    pub fn gateway(workflow: WorkflowKind, message: Option<&str>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| gateway_fallback(workflow));
        Self::GatewayFailure {
            workflow,
            message: message.to_string(),
        }
    }

    /// Parse failure with the workflow's generic message
    #[must_use]
    pub fn parse(workflow: WorkflowKind) -> Self {
        Self::ParseFailure {
            workflow,
            message: parse_failure_message(workflow).to_string(),
        }
    }

    /// Workflow the error belongs to
    #[inline]
    #[must_use]
    pub fn workflow(&self) -> WorkflowKind {
        match self {
            Self::GatewayFailure { workflow, .. }
            | Self::ParseFailure { workflow, .. }
            | Self::EmptyInput { workflow } => *workflow,
            Self::ArtifactMissing { .. } => WorkflowKind::Graphic,
        }
    }

    /// Check if the user is offered a retry
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::EmptyInput { .. })
    }

    /// Record shown alongside the error, if any
    #[inline]
    #[must_use]
    pub fn transient_record(&self) -> Option<&GraphicRecord> {
        match self {
            Self::ArtifactMissing { record } => Some(record),
            _ => None,
        }
    }
}

/// Generic message used when the gateway gives none
#[must_use]
pub fn gateway_fallback(workflow: WorkflowKind) -> &'static str {
    match workflow {
        WorkflowKind::Content => "An error occurred while generating content.",
        WorkflowKind::SeoAudit => "An error occurred during SEO analysis.",
        WorkflowKind::Graphic => {
            "An error occurred while generating the graphic. Please try again."
        }
    }
}

/// Generic message used when no payload could be decoded
#[must_use]
pub fn parse_failure_message(workflow: WorkflowKind) -> &'static str {
    match workflow {
        WorkflowKind::Content => "Could not parse the agent response. Please try again.",
        WorkflowKind::SeoAudit => "Could not parse SEO analysis response. Please try again.",
        WorkflowKind::Graphic => "Could not parse the graphic response. Please try again.",
    }
}

/// Failures raised by a gateway implementation before any envelope exists
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure
    #[error("{0}")]
    Transport(String),

    /// Gateway has no agent with this identifier
    #[error("unknown agent: {0}")]
    UnknownAgent(String),
}

/// Envelope decoding errors
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// Text is not a valid envelope
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML did not parse
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed but inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
