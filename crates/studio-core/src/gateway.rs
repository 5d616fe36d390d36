//! Agent gateway seam
//!
//! The gateway is the only suspension point in a workflow. Implementations
//! own transport, retries and timeouts; the studio only sees the envelope.

use crate::envelope::RawEnvelope;
use crate::error::GatewayError;
use async_trait::async_trait;
use std::sync::Arc;

/// Invokes an agent with free-text instructions
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// Send `instruction` to the agent registered as `agent_id`
    ///
    /// # Errors
    /// - `GatewayError` when no envelope could be obtained at all. A call the
    ///   gateway itself reports as failed is an `Ok` envelope with
    ///   `success: false`.
    async fn invoke(&self, instruction: &str, agent_id: &str) -> Result<RawEnvelope, GatewayError>;
}

#[async_trait]
impl<G: AgentGateway + ?Sized> AgentGateway for Arc<G> {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> Result<RawEnvelope, GatewayError> {
        (**self).invoke(instruction, agent_id).await
    }
}
