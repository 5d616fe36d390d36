//! Studio Core - Marketing content workflow orchestration
//!
//! Runs three agent-backed workflows and keeps their results:
//! - Content drafting, with handoff of the draft to SEO analysis
//! - SEO auditing of arbitrary text
//! - Graphic generation, committed only when an image comes back
//!
//! Agent responses arrive as loosely shaped envelopes. The normalizer and
//! artifact locator turn them into a payload and an image reference, the
//! record builders default every missing field, and the coordinator owns the
//! per-workflow histories.
//!
//! # Example
//!
//! ```rust,ignore
//! use studio_core::{ContentRequest, Studio, StudioConfig};
//!
//! # async fn example(
//! #     gateway: impl studio_core::AgentGateway,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let studio = Studio::new(gateway, StudioConfig::new());
//!
//! let draft = studio
//!     .generate_content(&ContentRequest::new("AI in marketing"))
//!     .await?;
//! studio.send_to_seo(&draft);
//!
//! println!("{} content pieces", studio.dashboard().content_count);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod coordinator;
pub mod dashboard;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod history;
pub mod locator;
pub mod normalizer;
pub mod records;
pub mod samples;
pub mod studio;
pub mod types;

// Re-exports for convenience
pub use coordinator::{Applied, StateCommand, WorkflowCoordinator};
pub use dashboard::DashboardSummary;
pub use envelope::RawEnvelope;
pub use error::{ConfigError, EnvelopeError, GatewayError, WorkflowError};
pub use gateway::AgentGateway;
pub use history::History;
pub use locator::{locate, locate_artifact, ArtifactSource, LocatedArtifact};
pub use normalizer::{normalize, Payload};
pub use records::{
    ContentRecord, ContentRequest, GraphicRecord, GraphicRequest, Priority, Record, ScoreBand,
    SeoAuditRecord, SeoRequest, WorkflowRecord,
};
pub use studio::Studio;
pub use types::{AgentDirectory, AgentKind, RecordId, StudioConfig, View, WorkflowKind};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Studio Core
    pub use crate::{
        AgentGateway, ContentRecord, ContentRequest, GraphicRecord, GraphicRequest, RawEnvelope,
        SeoAuditRecord, SeoRequest, Studio, StudioConfig, View, WorkflowError, WorkflowKind,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
