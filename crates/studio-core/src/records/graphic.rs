//! Graphic generation: request and record

use super::{private, Record, WorkflowRecord};
use crate::normalizer::Payload;
use crate::types::{RecordId, WorkflowKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Styles offered by the graphics studio
pub const STYLES: [&str; 4] = ["Modern", "Minimalist", "Bold", "Playful"];

/// Aspect ratios offered by the graphics studio
pub const ASPECT_RATIOS: [&str; 4] = ["1:1", "16:9", "9:16", "4:3"];

/// Parameters of a graphic request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicRequest {
    /// What the visual should show
    pub description: String,
    /// Visual style
    pub style: String,
    /// Aspect ratio, e.g. "16:9"
    pub aspect_ratio: String,
}

impl GraphicRequest {
    /// Request with the default style and ratio
    #[inline]
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// With style
    #[inline]
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// With aspect ratio
    #[inline]
    #[must_use]
    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = ratio.into();
        self
    }

    /// Check if there is anything to draw
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }

    /// Instruction text sent to the graphic agent
    #[must_use]
    pub fn instruction(&self) -> String {
        format!(
            "Create a {style} marketing visual with {ratio} aspect ratio.\n\n\
             Description: {description}\n\nStyle: {style}\n\
             Please generate a professional, high-quality marketing graphic.",
            style = self.style,
            ratio = self.aspect_ratio,
            description = self.description,
        )
    }
}

impl Default for GraphicRequest {
    fn default() -> Self {
        Self {
            description: String::new(),
            style: STYLES[0].to_string(),
            aspect_ratio: ASPECT_RATIOS[1].to_string(),
        }
    }
}

/// A generated graphic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicRecord {
    /// Record identifier
    pub id: RecordId,
    /// Resolved image reference, empty if none was found
    pub image_url: String,
    /// Agent's description of the image
    pub image_description: String,
    /// Style the agent applied
    pub style_applied: String,
    /// Aspect ratio produced
    pub aspect_ratio: String,
    /// Designer notes
    pub design_notes: String,
    /// Description from the request, verbatim
    pub description: String,
    /// Build time
    pub created_at: DateTime<Utc>,
}

impl GraphicRecord {
    /// Build a record from a payload and a reference resolved by the locator
    ///
    /// Missing or mistyped fields fall back to the request.
    #[must_use]
    pub fn build(payload: &Payload, request: &GraphicRequest, image_url: String) -> Self {
        let fields = payload.fields();
        Self {
            id: RecordId::new(),
            image_url,
            image_description: fields.text("image_description", &request.description),
            style_applied: fields.text("style_applied", &request.style),
            aspect_ratio: fields.text("aspect_ratio", &request.aspect_ratio),
            design_notes: fields.text("design_notes", ""),
            description: request.description.clone(),
            created_at: Utc::now(),
        }
    }

    /// Check if an image reference was resolved
    #[inline]
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

impl private::Sealed for GraphicRecord {}

impl Record for GraphicRecord {
    const WORKFLOW: WorkflowKind = WorkflowKind::Graphic;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Only graphics with an image reach history.
    fn is_committable(&self) -> bool {
        self.has_image()
    }

    fn into_workflow_record(self) -> WorkflowRecord {
        WorkflowRecord::Graphic(self)
    }
}
