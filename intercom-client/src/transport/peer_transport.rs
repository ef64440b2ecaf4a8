use crate::audio::LocalAudioTrack;
use crate::errors::TransportError;
use crate::transport::TransportEvent;
use async_trait::async_trait;
use intercom_core::{CandidateInit, ParticipantId, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One bidirectional media transport towards a single remote participant.
/// `create_offer` / `create_answer` also install the result as the local
/// description, mirroring how the descriptions are produced on the wire.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription, TransportError>;
    async fn create_answer(&self) -> Result<SessionDescription, TransportError>;
    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), TransportError>;
    async fn add_candidate(&self, candidate: CandidateInit) -> Result<(), TransportError>;
    async fn close(&self) -> Result<(), TransportError>;
}

/// Builds transports on demand, one per remote participant. The local audio
/// track is attached at creation time and never re-added to an existing
/// transport.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn create(
        &self,
        remote_id: ParticipantId,
        audio: Arc<LocalAudioTrack>,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerTransport>, TransportError>;
}
