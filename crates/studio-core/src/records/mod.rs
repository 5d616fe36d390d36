//! Workflow records and their builders
//!
//! One record type per workflow. Builders take a normalized payload and the
//! request and always succeed: every field the payload lacks, or
//! carries with the wrong shape, is defaulted.
//!
//! The record types form a closed set. [`Record`] is sealed and
//! [`WorkflowRecord`] enumerates every implementation, so history storage and
//! commit rules can be written once.

mod content;
mod fields;
mod graphic;
mod seo;

pub use content::{ContentRecord, ContentRequest, AUDIENCES, FORMATS, TONES};
pub use fields::Fields;
pub use graphic::{GraphicRecord, GraphicRequest, ASPECT_RATIOS, STYLES};
pub use seo::{
    clamp_score, HeadingStructure, KeywordAnalysis, KeywordStat, MetaSuggestions, Priority,
    Readability, Recommendation, ScoreBand, SeoAuditRecord, SeoRequest,
};

use crate::types::{RecordId, WorkflowKind};
use chrono::{DateTime, Utc};

/// Sealed trait to prevent external implementations
mod private {
    pub trait Sealed {}
}

/// A record produced by one workflow
pub trait Record: private::Sealed + Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Workflow that produces this record
    const WORKFLOW: WorkflowKind;

    /// Record identifier
    fn id(&self) -> RecordId;

    /// Build time
    fn created_at(&self) -> DateTime<Utc>;

    /// Commit predicate: whether this record may enter history
    fn is_committable(&self) -> bool {
        true
    }

    /// Wrap into the closed variant set
    fn into_workflow_record(self) -> WorkflowRecord;
}

/// Any record, tagged by workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowRecord {
    /// Drafted content
    Content(ContentRecord),
    /// SEO audit
    SeoAudit(SeoAuditRecord),
    /// Generated graphic
    Graphic(GraphicRecord),
}

impl WorkflowRecord {
    /// Workflow that produced the record
    #[inline]
    #[must_use]
    pub fn workflow(&self) -> WorkflowKind {
        match self {
            Self::Content(_) => ContentRecord::WORKFLOW,
            Self::SeoAudit(_) => SeoAuditRecord::WORKFLOW,
            Self::Graphic(_) => GraphicRecord::WORKFLOW,
        }
    }

    /// Record identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> RecordId {
        match self {
            Self::Content(r) => r.id(),
            Self::SeoAudit(r) => r.id(),
            Self::Graphic(r) => r.id(),
        }
    }

    /// Commit predicate of the wrapped record
    #[inline]
    #[must_use]
    pub fn is_committable(&self) -> bool {
        match self {
            Self::Content(r) => r.is_committable(),
            Self::SeoAudit(r) => r.is_committable(),
            Self::Graphic(r) => r.is_committable(),
        }
    }
}

impl From<ContentRecord> for WorkflowRecord {
    fn from(record: ContentRecord) -> Self {
        record.into_workflow_record()
    }
}

impl From<SeoAuditRecord> for WorkflowRecord {
    fn from(record: SeoAuditRecord) -> Self {
        record.into_workflow_record()
    }
}

impl From<GraphicRecord> for WorkflowRecord {
    fn from(record: GraphicRecord) -> Self {
        record.into_workflow_record()
    }
}
