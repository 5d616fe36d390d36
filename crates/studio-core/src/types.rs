//! Core types for the studio
//!
//! Defines the fundamental types shared by every workflow:
//! - Record identifiers
//! - Workflow and agent identities (the fixed agent registry)
//! - Presented views
//! - Studio configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use ulid::Ulid;

/// Unique record identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Ulid);

impl RecordId {
    /// Generate new record ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three workflows driven by the studio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    /// Content drafting
    Content,
    /// SEO audit of a piece of text
    SeoAudit,
    /// Marketing graphic generation
    Graphic,
}

impl WorkflowKind {
    /// All workflows, in presentation order
    pub const ALL: [WorkflowKind; 3] = [Self::Content, Self::SeoAudit, Self::Graphic];

    /// Short label used in logs
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowKind::Content => "content",
            WorkflowKind::SeoAudit => "seo",
            WorkflowKind::Graphic => "graphic",
        }
    }

    /// Agent bound to this workflow
    #[inline]
    #[must_use]
    pub fn agent(&self) -> AgentKind {
        match self {
            WorkflowKind::Content => AgentKind::ContentCoordinator,
            WorkflowKind::SeoAudit => AgentKind::SeoAnalyst,
            WorkflowKind::Graphic => AgentKind::GraphicGenerator,
        }
    }

    /// View that presents this workflow
    #[inline]
    #[must_use]
    pub fn view(&self) -> View {
        match self {
            WorkflowKind::Content => View::Content,
            WorkflowKind::SeoAudit => View::Seo,
            WorkflowKind::Graphic => View::Graphics,
        }
    }
}

impl std::fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed agents, bound one-to-one to the workflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Researches and writes marketing content
    ContentCoordinator,
    /// Audits content for search optimization
    SeoAnalyst,
    /// Produces marketing visuals
    GraphicGenerator,
}

impl AgentKind {
    /// All agents, in registry order
    pub const ALL: [AgentKind; 3] = [
        Self::ContentCoordinator,
        Self::SeoAnalyst,
        Self::GraphicGenerator,
    ];

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::ContentCoordinator => "Content Coordinator",
            AgentKind::SeoAnalyst => "SEO Analysis Agent",
            AgentKind::GraphicGenerator => "Graphic Generator",
        }
    }

    /// One-line purpose
    #[inline]
    #[must_use]
    pub fn purpose(&self) -> &'static str {
        match self {
            AgentKind::ContentCoordinator => "Researches and creates polished marketing content",
            AgentKind::SeoAnalyst => "Analyzes content for SEO optimization",
            AgentKind::GraphicGenerator => "Creates marketing visuals and graphics",
        }
    }

    /// Identifier the gateway knows this agent by, unless overridden
    #[inline]
    #[must_use]
    pub fn default_id(&self) -> &'static str {
        match self {
            AgentKind::ContentCoordinator => "6995967d1ca5cd36a5c31b03",
            AgentKind::SeoAnalyst => "699596a1f55ddf0ca0a37e8a",
            AgentKind::GraphicGenerator => "699596a130d90c5d3d534af1",
        }
    }

    /// Workflow served by this agent
    #[inline]
    #[must_use]
    pub fn workflow(&self) -> WorkflowKind {
        match self {
            AgentKind::ContentCoordinator => WorkflowKind::Content,
            AgentKind::SeoAnalyst => WorkflowKind::SeoAudit,
            AgentKind::GraphicGenerator => WorkflowKind::Graphic,
        }
    }
}

/// Views a presentation layer can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Overview of all histories
    #[default]
    Dashboard,
    /// Content studio
    Content,
    /// SEO analyzer
    Seo,
    /// Graphics studio
    Graphics,
}

/// Gateway identifiers for the three agents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentDirectory {
    /// Content coordinator id
    pub content: String,
    /// SEO analyst id
    pub seo: String,
    /// Graphic generator id
    pub graphic: String,
}

impl AgentDirectory {
    /// Identifier for an agent
    #[inline]
    #[must_use]
    pub fn id_for(&self, agent: AgentKind) -> &str {
        match agent {
            AgentKind::ContentCoordinator => &self.content,
            AgentKind::SeoAnalyst => &self.seo,
            AgentKind::GraphicGenerator => &self.graphic,
        }
    }

    /// Reverse lookup from a gateway identifier
    #[must_use]
    pub fn kind_of(&self, id: &str) -> Option<AgentKind> {
        AgentKind::ALL
            .into_iter()
            .find(|agent| self.id_for(*agent) == id)
    }
}

impl Default for AgentDirectory {
    fn default() -> Self {
        Self {
            content: AgentKind::ContentCoordinator.default_id().to_string(),
            seo: AgentKind::SeoAnalyst.default_id().to_string(),
            graphic: AgentKind::GraphicGenerator.default_id().to_string(),
        }
    }
}

/// Studio configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Agent identifiers
    pub agents: AgentDirectory,
    /// Characters of analyzed text kept in an SEO preview
    pub preview_chars: usize,
    /// Content entries shown on the dashboard
    pub recent_content_limit: usize,
    /// Graphic entries shown on the dashboard
    pub recent_graphics_limit: usize,
    /// Show sample records in place of empty histories
    pub show_sample: bool,
}

impl StudioConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With agent directory
    #[inline]
    #[must_use]
    pub fn with_agents(mut self, agents: AgentDirectory) -> Self {
        self.agents = agents;
        self
    }

    /// With preview length
    #[inline]
    #[must_use]
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// With sample toggle
    #[inline]
    #[must_use]
    pub fn with_sample(mut self, show: bool) -> Self {
        self.show_sample = show;
        self
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// - `ConfigError::Parse` on malformed TOML
    /// - `ConfigError::Invalid` if two agents share an identifier or one is blank
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - any error from [`StudioConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for agent in AgentKind::ALL {
            let id = self.agents.id_for(agent);
            if id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "agent id for {} is blank",
                    agent.name()
                )));
            }
            if self.agents.kind_of(id) != Some(agent) {
                return Err(ConfigError::Invalid(format!(
                    "agent id {id} is bound to more than one agent"
                )));
            }
        }
        Ok(())
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            agents: AgentDirectory::default(),
            preview_chars: 100,
            recent_content_limit: 5,
            recent_graphics_limit: 6,
            show_sample: false,
        }
    }
}
