//! Workflow state coordinator
//!
//! Owns everything a session accumulates:
//! - one history per workflow
//! - the content → SEO handoff slot
//! - the active-agent marker
//! - the presented view and any transient (uncommitted) graphic
//!
//! All mutation goes through [`StateCommand`]s applied by
//! [`WorkflowCoordinator::apply`]; the named operations are thin wrappers
//! over it. Histories only grow: the coordinator never removes or rewrites a
//! committed record.

use crate::history::History;
use crate::records::{ContentRecord, GraphicRecord, SeoAuditRecord, SeoRequest, WorkflowRecord};
use crate::types::{AgentKind, View, WorkflowKind};

/// State update accepted by the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum StateCommand {
    /// Prepend a record to its workflow's history and clear the active agent
    AppendRecord(WorkflowRecord),
    /// Stage text for the SEO workflow and present it
    SetHandoff(String),
    /// Set or clear the active-agent marker
    SetActiveAgent(Option<AgentKind>),
    /// Show a graphic that will not be committed
    ShowTransient(GraphicRecord),
    /// Switch the presented view
    Navigate(View),
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// Record entered history; `len` is the history length afterwards
    Committed {
        /// Workflow whose history grew
        workflow: WorkflowKind,
        /// History length after the insert
        len: usize,
    },
    /// Record failed its workflow's commit predicate and was handed back
    Rejected(WorkflowRecord),
    /// Non-record state changed
    Updated,
}

impl Applied {
    /// Check if a record was committed
    #[inline]
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Session-scoped workflow state
#[derive(Debug, Default)]
pub struct WorkflowCoordinator {
    content: History<ContentRecord>,
    seo: History<SeoAuditRecord>,
    graphics: History<GraphicRecord>,
    handoff: Option<String>,
    active_agent: Option<AgentKind>,
    view: View,
    transient_graphic: Option<GraphicRecord>,
}

impl WorkflowCoordinator {
    /// Create empty session state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one state command
    pub fn apply(&mut self, command: StateCommand) -> Applied {
        match command {
            StateCommand::AppendRecord(record) => self.append(record),
            StateCommand::SetHandoff(text) => {
                tracing::debug!(chars = text.chars().count(), "handoff staged for seo");
                self.handoff = Some(text);
                self.view = View::Seo;
                Applied::Updated
            }
            StateCommand::SetActiveAgent(agent) => {
                if agent == Some(AgentKind::GraphicGenerator) {
                    self.transient_graphic = None;
                }
                self.active_agent = agent;
                Applied::Updated
            }
            StateCommand::ShowTransient(record) => {
                self.transient_graphic = Some(record);
                Applied::Updated
            }
            StateCommand::Navigate(view) => {
                self.transient_graphic = None;
                self.view = view;
                Applied::Updated
            }
        }
    }

    fn append(&mut self, record: WorkflowRecord) -> Applied {
        if !record.is_committable() {
            tracing::warn!(
                workflow = %record.workflow(),
                id = %record.id(),
                "record failed commit predicate, not recorded"
            );
            return Applied::Rejected(record);
        }

        let workflow = record.workflow();
        let id = record.id();
        let len = match record {
            WorkflowRecord::Content(r) => {
                self.content.prepend(r);
                self.content.len()
            }
            WorkflowRecord::SeoAudit(r) => {
                self.seo.prepend(r);
                self.seo.len()
            }
            WorkflowRecord::Graphic(r) => {
                self.transient_graphic = None;
                self.graphics.prepend(r);
                self.graphics.len()
            }
        };
        self.active_agent = None;

        tracing::info!(%workflow, %id, len, "record committed");
        Applied::Committed { workflow, len }
    }

    /// Prepend drafted content
    pub fn record_content(&mut self, item: ContentRecord) -> Applied {
        self.apply(StateCommand::AppendRecord(item.into()))
    }

    /// Prepend an SEO audit
    pub fn record_seo_audit(&mut self, item: SeoAuditRecord) -> Applied {
        self.apply(StateCommand::AppendRecord(item.into()))
    }

    /// Prepend a graphic
    ///
    /// A graphic without an image reference is rejected and handed back.
    pub fn record_graphic(&mut self, item: GraphicRecord) -> Applied {
        self.apply(StateCommand::AppendRecord(item.into()))
    }

    /// Stage text for the SEO workflow and switch to it
    ///
    /// Existing SEO history is untouched; a pending handoff is overwritten.
    pub fn handoff_to_seo(&mut self, text: impl Into<String>) {
        self.apply(StateCommand::SetHandoff(text.into()));
    }

    /// Mark an agent as outstanding
    pub fn begin_request(&mut self, agent: AgentKind) {
        self.apply(StateCommand::SetActiveAgent(Some(agent)));
    }

    /// Clear the active-agent marker
    pub fn end_request(&mut self) {
        self.apply(StateCommand::SetActiveAgent(None));
    }

    /// Show a graphic that was built but not committed
    pub fn show_transient(&mut self, item: GraphicRecord) {
        self.apply(StateCommand::ShowTransient(item));
    }

    /// Switch the presented view
    pub fn navigate(&mut self, view: View) {
        self.apply(StateCommand::Navigate(view));
    }

    /// Pending handoff text
    #[inline]
    #[must_use]
    pub fn handoff(&self) -> Option<&str> {
        self.handoff.as_deref()
    }

    /// Consume the pending handoff
    pub fn take_handoff(&mut self) -> Option<String> {
        self.handoff.take()
    }

    /// SEO request seeded from a non-empty pending handoff, consuming it
    pub fn seed_seo_request(&mut self) -> Option<SeoRequest> {
        match self.handoff.take() {
            Some(text) if !text.is_empty() => Some(SeoRequest::new(text)),
            _ => None,
        }
    }

    /// Currently outstanding agent
    #[inline]
    #[must_use]
    pub fn active_agent(&self) -> Option<AgentKind> {
        self.active_agent
    }

    /// Check if any agent is outstanding
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.active_agent.is_some()
    }

    /// Presented view
    #[inline]
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Graphic shown but not committed
    #[inline]
    #[must_use]
    pub fn transient_graphic(&self) -> Option<&GraphicRecord> {
        self.transient_graphic.as_ref()
    }

    /// Content history
    #[inline]
    #[must_use]
    pub fn content_history(&self) -> &History<ContentRecord> {
        &self.content
    }

    /// SEO audit history
    #[inline]
    #[must_use]
    pub fn seo_history(&self) -> &History<SeoAuditRecord> {
        &self.seo
    }

    /// Graphic history
    #[inline]
    #[must_use]
    pub fn graphics_history(&self) -> &History<GraphicRecord> {
        &self.graphics
    }

    /// History length for a workflow
    #[must_use]
    pub fn history_len(&self, workflow: WorkflowKind) -> usize {
        match workflow {
            WorkflowKind::Content => self.content.len(),
            WorkflowKind::SeoAudit => self.seo.len(),
            WorkflowKind::Graphic => self.graphics.len(),
        }
    }
}
