//! Replaying gateway
//!
//! Answers each agent call with the next recorded envelope queued for that
//! agent. Envelopes are loaded from JSON files in the order given.

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use studio_core::{AgentGateway, GatewayError, RawEnvelope};

/// Gateway backed by recorded envelopes
#[derive(Debug, Default)]
pub(crate) struct ReplayGateway {
    queues: Mutex<HashMap<String, VecDeque<RawEnvelope>>>,
}

impl ReplayGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue envelopes read from `paths` for `agent_id`
    pub(crate) fn load(&self, agent_id: &str, paths: &[PathBuf]) -> Result<usize> {
        for path in paths {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read envelope {}", path.display()))?;
            let envelope = RawEnvelope::from_json(&text)
                .with_context(|| format!("cannot decode envelope {}", path.display()))?;
            self.push(agent_id, envelope);
        }
        tracing::debug!(agent_id, count = paths.len(), "envelopes queued");
        Ok(paths.len())
    }

    pub(crate) fn push(&self, agent_id: &str, envelope: RawEnvelope) {
        self.queues
            .lock()
            .entry(agent_id.to_string())
            .or_default()
            .push_back(envelope);
    }

    #[cfg(test)]
    pub(crate) fn remaining(&self, agent_id: &str) -> usize {
        self.queues.lock().get(agent_id).map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl AgentGateway for ReplayGateway {
    async fn invoke(
        &self,
        instruction: &str,
        agent_id: &str,
    ) -> Result<RawEnvelope, GatewayError> {
        tracing::debug!(agent_id, chars = instruction.chars().count(), "replaying call");
        self.queues
            .lock()
            .get_mut(agent_id)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| {
                GatewayError::Transport(format!("no recorded envelope left for {agent_id}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn replays_in_file_order() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        write!(
            first,
            r#"{{"success": true, "response": {{"result": {{"title": "one"}}}}}}"#
        )
        .unwrap();
        let mut second = tempfile::NamedTempFile::new().unwrap();
        write!(second, r#"{{"success": false, "error": "rate limited"}}"#).unwrap();

        let gateway = ReplayGateway::new();
        let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(gateway.load("agent", &paths).unwrap(), 2);

        let envelope = gateway.invoke("go", "agent").await.unwrap();
        assert!(envelope.success);
        let envelope = gateway.invoke("go", "agent").await.unwrap();
        assert_eq!(envelope.failure_message(), Some("rate limited"));
        assert_eq!(gateway.remaining("agent"), 0);

        let err = gateway.invoke("go", "agent").await.unwrap_err();
        assert!(err.to_string().contains("no recorded envelope"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"success": "yes"}}"#).unwrap();

        let gateway = ReplayGateway::new();
        let err = gateway
            .load("agent", &[file.path().to_path_buf()])
            .unwrap_err();
        assert!(err.to_string().starts_with("cannot decode envelope"));
    }
}
