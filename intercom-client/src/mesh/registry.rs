use crate::audio::LocalAudioTrack;
use crate::errors::NegotiationError;
use crate::mesh::peer_session::{PeerSession, SessionState};
use crate::transport::{TransportEvent, TransportFactory};
use dashmap::DashMap;
use intercom_core::ParticipantId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Exclusive owner of the id -> session map. Only the dispatcher task holds
/// it, so every get-or-create is an atomic check-and-insert from the
/// engine's point of view. The `states` mirror gives the public handle a
/// read-only view of session states.
pub(crate) struct PeerRegistry {
    sessions: HashMap<ParticipantId, PeerSession>,
    factory: Arc<dyn TransportFactory>,
    audio: Arc<LocalAudioTrack>,
    events_tx: mpsc::Sender<TransportEvent>,
    states: Arc<DashMap<ParticipantId, SessionState>>,
}

impl PeerRegistry {
    pub(crate) fn new(
        factory: Arc<dyn TransportFactory>,
        audio: Arc<LocalAudioTrack>,
        events_tx: mpsc::Sender<TransportEvent>,
        states: Arc<DashMap<ParticipantId, SessionState>>,
    ) -> Self {
        Self {
            sessions: HashMap::new(),
            factory,
            audio,
            events_tx,
            states,
        }
    }

    /// Returns the session for `id`, building transport and session on first
    /// need. An existing session comes back untouched: the transport is not
    /// recreated and the audio track is not re-added.
    pub(crate) async fn get_or_create(
        &mut self,
        id: &ParticipantId,
    ) -> Result<&mut PeerSession, NegotiationError> {
        match self.sessions.entry(id.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!("Creating peer session for {}", id);
                let transport = self
                    .factory
                    .create(id.clone(), self.audio.clone(), self.events_tx.clone())
                    .await
                    .map_err(NegotiationError::Transport)?;
                Ok(entry.insert(PeerSession::new(
                    id.clone(),
                    transport,
                    self.states.clone(),
                )))
            }
        }
    }

    pub(crate) fn get_mut(&mut self, id: &ParticipantId) -> Option<&mut PeerSession> {
        self.sessions.get_mut(id)
    }

    /// Closes the underlying transport and drops the entry. Idempotent.
    pub(crate) async fn remove(&mut self, id: &ParticipantId) -> bool {
        let Some(mut session) = self.sessions.remove(id) else {
            return false;
        };
        debug!("Removing session for {} in state {:?}", id, session.state());
        session.close().await;
        self.states.remove(id);
        true
    }

    /// Unconditional teardown of every session, negotiated or not.
    pub(crate) async fn close_all(&mut self) {
        let count = self.sessions.len();
        for (_, mut session) in self.sessions.drain() {
            session.close().await;
        }
        self.states.clear();
        if count > 0 {
            info!("Closed {count} peer sessions");
        }
    }
}
