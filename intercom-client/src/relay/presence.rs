use crate::errors::RelayAuthError;
use crate::relay::RelayEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Inbound half of the relay: a presence-capable subscription. The relay's
/// transport and authorization are external; implementations authenticate
/// with the caller-supplied display name, subscribe to the presence topic
/// and feed every membership and signaling event into the returned channel,
/// starting with [`RelayEvent::SubscriptionSucceeded`].
#[async_trait]
pub trait PresenceRelay: Send + Sync {
    async fn subscribe(
        &self,
        display_name: &str,
    ) -> Result<mpsc::Receiver<RelayEvent>, RelayAuthError>;

    /// Release the subscription. Must be safe to call during teardown even
    /// while events are still in flight.
    async fn unsubscribe(&self);
}
