//! Testing utilities for the Creative Studio workspace
//!
//! Shared gateway doubles and envelope fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use studio_core::{AgentGateway, AgentKind, GatewayError, RawEnvelope, Studio, StudioConfig};
use tokio::sync::oneshot;

/// One invocation seen by a [`ScriptedGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub instruction: String,
    pub agent_id: String,
}

enum Step {
    Respond(Result<RawEnvelope, GatewayError>),
    Hold(oneshot::Receiver<RawEnvelope>),
}

/// Gateway answering from per-agent queues of scripted responses
///
/// Calls to an agent with nothing queued fail with `UnknownAgent`.
#[derive(Default)]
pub struct ScriptedGateway {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an envelope for the agent's next call
    pub fn respond(&self, agent: AgentKind, envelope: RawEnvelope) -> &Self {
        self.push(agent, Step::Respond(Ok(envelope)));
        self
    }

    /// Queue a transport failure for the agent's next call
    pub fn fail(&self, agent: AgentKind, message: &str) -> &Self {
        self.push(
            agent,
            Step::Respond(Err(GatewayError::Transport(message.to_string()))),
        );
        self
    }

    /// Queue a response that is withheld until the returned sender fires
    pub fn hold(&self, agent: AgentKind) -> oneshot::Sender<RawEnvelope> {
        let (tx, rx) = oneshot::channel();
        self.push(agent, Step::Hold(rx));
        tx
    }

    /// Invocations seen so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn push(&self, agent: AgentKind, step: Step) {
        self.scripts
            .lock()
            .entry(agent.default_id().to_string())
            .or_default()
            .push_back(step);
    }
}

#[async_trait]
impl AgentGateway for ScriptedGateway {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> Result<RawEnvelope, GatewayError> {
        self.calls.lock().push(Call {
            instruction: instruction.to_string(),
            agent_id: agent_id.to_string(),
        });

        let step = self
            .scripts
            .lock()
            .get_mut(agent_id)
            .and_then(VecDeque::pop_front);

        match step {
            Some(Step::Respond(outcome)) => outcome,
            Some(Step::Hold(rx)) => rx
                .await
                .map_err(|_| GatewayError::Transport("held response was dropped".to_string())),
            None => Err(GatewayError::UnknownAgent(agent_id.to_string())),
        }
    }
}

/// Studio with default configuration over a scripted gateway
pub fn setup_test_studio() -> Studio<ScriptedGateway> {
    Studio::new(ScriptedGateway::new(), StudioConfig::new())
}

/// Successful envelope carrying `result`
pub fn result_envelope(result: Value) -> RawEnvelope {
    RawEnvelope::ok().with_result(result)
}

/// Successful envelope carrying a JSON document in `message`
pub fn message_envelope(message: &str) -> RawEnvelope {
    RawEnvelope::ok().with_message(message)
}

/// Content draft envelope
pub fn content_envelope(title: &str) -> RawEnvelope {
    result_envelope(json!({
        "title": title,
        "content": format!("## {title}\n\nBody."),
        "meta_description": "meta",
        "format_type": "Blog Post",
        "word_count": 120,
        "key_highlights": ["one", "two"],
    }))
}

/// SEO audit envelope with the given overall score
pub fn seo_envelope(score: i64) -> RawEnvelope {
    result_envelope(json!({
        "overall_seo_score": score,
        "keyword_analysis": {
            "target_keywords": [{ "keyword": "ai", "density": "2%", "occurrences": 3 }],
            "suggestions": ["add long-tail keywords"],
        },
        "recommendations": [
            { "priority": "High", "recommendation": "add alt text", "impact": "accessibility" },
        ],
    }))
}

/// Graphic envelope whose image sits in top-level module outputs
pub fn graphic_envelope(image_url: &str) -> RawEnvelope {
    result_envelope(json!({
        "image_description": "generated",
        "style_applied": "Bold",
        "aspect_ratio": "1:1",
        "design_notes": "notes",
    }))
    .with_artifact_files([image_url])
}
