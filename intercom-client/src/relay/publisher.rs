use crate::errors::RelaySendError;
use async_trait::async_trait;
use intercom_core::SignalMessage;

/// Outbound half of the relay: publish one signaling message through the
/// server-mediated trigger endpoint. The relay is at-least-effort, not
/// guaranteed; callers log failures and move on.
#[async_trait]
pub trait RelayPublisher: Send + Sync {
    async fn publish(&self, event: &str, payload: &SignalMessage) -> Result<(), RelaySendError>;
}
