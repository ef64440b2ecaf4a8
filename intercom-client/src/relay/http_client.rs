use crate::errors::RelaySendError;
use crate::relay::RelayPublisher;
use async_trait::async_trait;
use intercom_core::SignalMessage;
use serde::Serialize;

#[derive(Serialize)]
struct TriggerBody<'a> {
    event: &'a str,
    payload: &'a SignalMessage,
}

/// Production publisher: POSTs `{event, payload}` to the relay's trigger
/// endpoint. The relay disallows unauthenticated client-side publish, so all
/// outbound signaling goes through this server-side hop.
pub struct HttpRelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_owned(),
        }
    }
}

#[async_trait]
impl RelayPublisher for HttpRelayClient {
    async fn publish(&self, event: &str, payload: &SignalMessage) -> Result<(), RelaySendError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&TriggerBody { event, payload })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RelaySendError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}
