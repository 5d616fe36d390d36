//! Studio workflow runner
//!
//! Drives one request end to end:
//! 1. Reject blank input before anything is issued
//! 2. Mark the agent as outstanding and invoke the gateway
//! 3. Normalize the envelope (and locate the artifact, for graphics)
//! 4. Build the record and commit it if its workflow allows
//!
//! Every failure is turned into a [`WorkflowError`] here; nothing escapes as
//! a panic.
//!
//! The coordinator sits behind a mutex that is only taken for synchronous
//! updates and never held across the gateway call. Requests to the same
//! workflow are neither serialized nor rejected: whichever completes last
//! takes the front of that workflow's history.

use crate::coordinator::{Applied, StateCommand, WorkflowCoordinator};
use crate::dashboard::DashboardSummary;
use crate::envelope::RawEnvelope;
use crate::error::WorkflowError;
use crate::gateway::AgentGateway;
use crate::locator::locate_artifact;
use crate::normalizer::{normalize, Payload};
use crate::records::{
    ContentRecord, ContentRequest, GraphicRecord, GraphicRequest, Record, SeoAuditRecord,
    SeoRequest,
};
use crate::types::{StudioConfig, View, WorkflowKind};
use parking_lot::Mutex;

/// Session: gateway, configuration and coordinated state
#[derive(Debug)]
pub struct Studio<G> {
    gateway: G,
    config: StudioConfig,
    state: Mutex<WorkflowCoordinator>,
}

impl<G: AgentGateway> Studio<G> {
    /// Create a session with empty state
    #[inline]
    #[must_use]
    pub fn new(gateway: G, config: StudioConfig) -> Self {
        Self {
            gateway,
            config,
            state: Mutex::new(WorkflowCoordinator::new()),
        }
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Gateway the session invokes
    #[inline]
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Draft content and commit it to history
    ///
    /// # Errors
    /// - `EmptyInput` for a blank topic
    /// - `GatewayFailure` if the gateway call failed
    /// - `ParseFailure` if the envelope carried no payload
    pub async fn generate_content(
        &self,
        request: &ContentRequest,
    ) -> Result<ContentRecord, WorkflowError> {
        let workflow = WorkflowKind::Content;
        if request.is_blank() {
            return Err(WorkflowError::EmptyInput { workflow });
        }

        let envelope = self.invoke(workflow, &request.instruction()).await?;
        let payload = self.require_payload(workflow, &envelope)?;

        let record = ContentRecord::build(&payload, request);
        self.commit(record.clone());
        Ok(record)
    }

    /// Audit text for SEO and commit the audit to history
    ///
    /// # Errors
    /// - `EmptyInput` for blank text
    /// - `GatewayFailure` if the gateway call failed
    /// - `ParseFailure` if the envelope carried no payload
    pub async fn analyze_seo(&self, request: &SeoRequest) -> Result<SeoAuditRecord, WorkflowError> {
        let workflow = WorkflowKind::SeoAudit;
        if request.is_blank() {
            return Err(WorkflowError::EmptyInput { workflow });
        }

        let envelope = self.invoke(workflow, &request.instruction()).await?;
        let payload = self.require_payload(workflow, &envelope)?;

        let record = SeoAuditRecord::build(&payload, request, self.config.preview_chars);
        self.commit(record.clone());
        Ok(record)
    }

    /// Generate a graphic and commit it if an image was produced
    ///
    /// An absent payload is not a failure here: the record is built from the
    /// request and stands or falls on the located image.
    ///
    /// # Errors
    /// - `EmptyInput` for a blank description
    /// - `GatewayFailure` if the gateway call failed
    /// - `ArtifactMissing` if no image reference was found; the record is
    ///   kept as the transient graphic until the next request or navigation
    pub async fn generate_graphic(
        &self,
        request: &GraphicRequest,
    ) -> Result<GraphicRecord, WorkflowError> {
        let workflow = WorkflowKind::Graphic;
        if request.is_blank() {
            return Err(WorkflowError::EmptyInput { workflow });
        }

        let envelope = self.invoke(workflow, &request.instruction()).await?;
        let payload = normalize(Some(&envelope));
        let image_url = locate_artifact(&envelope, &payload);
        let record = GraphicRecord::build(&payload, request, image_url);

        if record.is_committable() {
            self.commit(record.clone());
            return Ok(record);
        }

        tracing::warn!(id = %record.id, "graphic produced no image, shown without recording");
        let mut state = self.state.lock();
        state.show_transient(record.clone());
        state.end_request();
        Err(WorkflowError::ArtifactMissing {
            record: Box::new(record),
        })
    }

    /// Stage a content record's body as the next SEO input
    pub fn send_to_seo(&self, content: &ContentRecord) {
        self.handoff_to_seo(content.body.clone());
    }

    /// Stage text as the next SEO input and present the SEO view
    pub fn handoff_to_seo(&self, text: impl Into<String>) {
        self.state.lock().handoff_to_seo(text);
    }

    /// SEO request seeded from the pending handoff, consuming it
    pub fn seed_seo_request(&self) -> Option<SeoRequest> {
        self.state.lock().seed_seo_request()
    }

    /// Switch the presented view
    pub fn navigate(&self, view: View) {
        self.state.lock().navigate(view);
    }

    /// Read the coordinated state
    pub fn with_state<T>(&self, f: impl FnOnce(&WorkflowCoordinator) -> T) -> T {
        f(&self.state.lock())
    }

    /// Dashboard summary of the current state
    #[must_use]
    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_state(&self.state.lock(), &self.config)
    }

    async fn invoke(
        &self,
        workflow: WorkflowKind,
        instruction: &str,
    ) -> Result<RawEnvelope, WorkflowError> {
        let agent = workflow.agent();
        let agent_id = self.config.agents.id_for(agent);
        tracing::info!(%workflow, agent = agent.name(), "invoking agent");

        self.state.lock().begin_request(agent);
        let outcome = self.gateway.invoke(instruction, agent_id).await;

        match outcome {
            Ok(envelope) if envelope.success => Ok(envelope),
            Ok(envelope) => {
                tracing::warn!(%workflow, error = ?envelope.error, "gateway reported failure");
                self.state.lock().end_request();
                Err(WorkflowError::gateway(workflow, envelope.failure_message()))
            }
            Err(e) => {
                tracing::warn!(%workflow, error = %e, "gateway call failed");
                self.state.lock().end_request();
                Err(WorkflowError::gateway(workflow, Some(&e.to_string())))
            }
        }
    }

    fn require_payload(
        &self,
        workflow: WorkflowKind,
        envelope: &RawEnvelope,
    ) -> Result<Payload, WorkflowError> {
        let payload = normalize(Some(envelope));
        if payload.is_present() {
            Ok(payload)
        } else {
            tracing::warn!(%workflow, "envelope carried no payload");
            self.state.lock().end_request();
            Err(WorkflowError::parse(workflow))
        }
    }

    fn commit<R: Record>(&self, record: R) {
        let applied = self
            .state
            .lock()
            .apply(StateCommand::AppendRecord(record.into_workflow_record()));
        debug_assert!(matches!(applied, Applied::Committed { .. }));
    }
}
