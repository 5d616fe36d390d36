//! Artifact locator
//!
//! Agents are inconsistent about where they put the reference to an image
//! they produced. The locator checks, in order, the gateway's canonical
//! `module_outputs`, the payload's own conventions, and finally the raw
//! response mirror. The first non-empty reference wins.

use crate::envelope::RawEnvelope;
use crate::normalizer::Payload;
use serde_json::Value;

/// Payload fields that may hold the reference directly, in priority order
const DIRECT_FIELDS: [&str; 3] = ["image_url", "url", "file_url"];

/// Where a reference was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Top-level `module_outputs.artifact_files`
    ModuleOutputs,
    /// A field or nested file list inside the payload
    Payload,
    /// The `raw_response` mirror
    RawMirror,
}

/// A located image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedArtifact {
    /// Image reference, never empty
    pub reference: String,
    /// Tier that produced it
    pub source: ArtifactSource,
}

/// Resolve the image reference, empty when none is found
///
/// Not finding a reference is not an error here; the graphic workflow
/// decides what it means.
#[must_use]
pub fn locate_artifact(envelope: &RawEnvelope, payload: &Payload) -> String {
    locate(envelope, payload)
        .map(|found| found.reference)
        .unwrap_or_default()
}

/// Resolve the image reference along with the tier that produced it
#[must_use]
pub fn locate(envelope: &RawEnvelope, payload: &Payload) -> Option<LocatedArtifact> {
    let found = first_file_url(envelope.artifact_files())
        .map(|r| (r, ArtifactSource::ModuleOutputs))
        .or_else(|| from_payload(payload).map(|r| (r, ArtifactSource::Payload)))
        .or_else(|| from_raw_mirror(envelope).map(|r| (r, ArtifactSource::RawMirror)));

    match found {
        Some((reference, source)) => {
            tracing::debug!(?source, %reference, "located artifact");
            Some(LocatedArtifact { reference, source })
        }
        None => {
            tracing::debug!("no artifact reference in envelope");
            None
        }
    }
}

fn from_payload(payload: &Payload) -> Option<String> {
    let map = payload.as_map()?;

    DIRECT_FIELDS
        .iter()
        .find_map(|field| non_empty_str(map.get(*field)))
        .or_else(|| first_file_url(nested_artifact_files(map.get("module_outputs"))))
}

fn from_raw_mirror(envelope: &RawEnvelope) -> Option<String> {
    let decoded;
    let mirror = match envelope.raw_response.as_ref()? {
        Value::String(text) if text.is_empty() => return None,
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                decoded = value;
                &decoded
            }
            Err(e) => {
                tracing::debug!(error = %e, "raw response mirror is not structured data");
                return None;
            }
        },
        other => other,
    };

    // A present top-level list is taken as-is, even when empty.
    let files = nested_artifact_files(mirror.get("module_outputs")).or_else(|| {
        nested_artifact_files(
            mirror
                .get("response")
                .and_then(|response| response.get("module_outputs")),
        )
    });
    first_file_url(files)
}

fn nested_artifact_files(module_outputs: Option<&Value>) -> Option<&Value> {
    module_outputs
        .and_then(|outputs| outputs.get("artifact_files"))
        .filter(|files| !files.is_null())
}

/// First entry's `file_url`, if the list is a non-empty array
fn first_file_url(files: Option<&Value>) -> Option<String> {
    let first = files?.as_array()?.first()?;
    non_empty_str(first.get("file_url"))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
