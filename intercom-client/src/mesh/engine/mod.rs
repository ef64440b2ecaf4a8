mod route_signal_impl;
mod transmit_impl;

use crate::audio::LocalAudioTrack;
use crate::config::SIGNAL_EVENT;
use crate::errors::NegotiationError;
use crate::mesh::candidate_queue::CandidateQueue;
use crate::mesh::command::EngineCommand;
use crate::mesh::peer_session::SessionState;
use crate::mesh::registry::PeerRegistry;
use crate::mesh::roster::Roster;
use crate::relay::{PresenceRelay, RelayEvent, RelayPublisher};
use crate::transport::{TransportEvent, TransportFactory};
use dashmap::DashMap;
use intercom_core::{Participant, ParticipantId, SignalBody, SignalMessage, SignalTarget};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// State shared between the dispatcher and the public handle. Written only
/// by the dispatcher.
#[derive(Clone)]
pub(crate) struct MeshShared {
    pub(crate) roster: Arc<DashMap<ParticipantId, Participant>>,
    pub(crate) session_states: Arc<DashMap<ParticipantId, SessionState>>,
    pub(crate) connected: Arc<AtomicBool>,
    pub(crate) transmitting: Arc<AtomicBool>,
}

impl MeshShared {
    pub(crate) fn new() -> Self {
        Self {
            roster: Arc::new(DashMap::new()),
            session_states: Arc::new(DashMap::new()),
            connected: Arc::new(AtomicBool::new(false)),
            transmitting: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// The single dispatcher behind one relay connection. Drains relay events,
/// peer transport events and handle commands one at a time; the registry and
/// candidate queue are owned here and mutated nowhere else. Handlers
/// re-validate state after every await rather than assuming atomicity across
/// suspension points.
pub(crate) struct MeshEngine {
    display_name: String,
    roster: Roster,
    registry: PeerRegistry,
    candidates: CandidateQueue,
    publisher: Arc<dyn RelayPublisher>,
    relay: Arc<dyn PresenceRelay>,
    audio: Arc<LocalAudioTrack>,
    relay_rx: mpsc::Receiver<RelayEvent>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    command_rx: mpsc::Receiver<EngineCommand>,
    connected: Arc<AtomicBool>,
    transmitting: Arc<AtomicBool>,
}

impl MeshEngine {
    pub(crate) fn new(
        display_name: String,
        relay: Arc<dyn PresenceRelay>,
        publisher: Arc<dyn RelayPublisher>,
        transports: Arc<dyn TransportFactory>,
        audio: Arc<LocalAudioTrack>,
        relay_rx: mpsc::Receiver<RelayEvent>,
        command_rx: mpsc::Receiver<EngineCommand>,
        shared: MeshShared,
    ) -> Self {
        let (transport_tx, transport_rx) = mpsc::channel(256);

        Self {
            display_name,
            roster: Roster::new(shared.roster),
            registry: PeerRegistry::new(transports, audio.clone(), transport_tx, shared.session_states),
            candidates: CandidateQueue::default(),
            publisher,
            relay,
            audio,
            relay_rx,
            transport_rx,
            command_rx,
            connected: shared.connected,
            transmitting: shared.transmitting,
        }
    }

    pub(crate) async fn run(mut self) {
        info!("Mesh dispatcher started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(EngineCommand::SetTransmitting(on)) => self.set_transmitting(on).await,
                        Some(EngineCommand::Shutdown(ack)) => {
                            self.shutdown().await;
                            let _ = ack.send(());
                            break;
                        }
                        None => {
                            info!("Handle dropped. Shutting down mesh.");
                            self.shutdown().await;
                            break;
                        }
                    }
                }

                evt = self.relay_rx.recv() => {
                    match evt {
                        Some(e) => self.handle_relay_event(e).await,
                        None => {
                            warn!("Relay event channel closed unexpectedly");
                            self.shutdown().await;
                            break;
                        }
                    }
                }

                evt = self.transport_rx.recv() => {
                    // the registry keeps a sender clone, so this arm
                    // never yields None while the engine is alive
                    if let Some(e) = evt {
                        self.handle_transport_event(e).await;
                    }
                }
            }
        }

        info!("Mesh dispatcher finished");
    }

    async fn handle_relay_event(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::SubscriptionSucceeded { local_id, members } => {
                info!("Subscription confirmed, local id {}", local_id);
                let others = self.roster.apply_snapshot(local_id.clone(), &members);
                self.connected.store(true, Ordering::SeqCst);

                // newcomers announce themselves to everyone already present,
                // which keeps the initiator side deterministic
                for member in others {
                    self.publish(
                        SignalTarget::Peer(member),
                        SignalBody::Join {
                            id: local_id.clone(),
                            name: self.display_name.clone(),
                        },
                    )
                    .await;
                }
            }

            RelayEvent::MemberAdded { id, info } => {
                if self.roster.is_local(&id) {
                    return;
                }
                // duplicate adds keep the existing entry (and its flags)
                if self.roster.contains(&id) {
                    return;
                }
                debug!("Member added: {}", id);
                self.roster.insert(id, info.name);
            }

            RelayEvent::MemberRemoved { id } => {
                info!("Member removed: {}", id);
                self.roster.remove(&id);
                self.registry.remove(&id).await;
                self.candidates.discard(&id);
            }

            RelayEvent::Signal(msg) => {
                if self.roster.local_id().is_none() {
                    warn!("Dropping signal received before subscription confirmation");
                    return;
                }
                self.route_signal(msg).await;
            }
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Established(id) => {
                if let Some(session) = self.registry.get_mut(&id) {
                    if let Err(e) = session.transport_established() {
                        debug!("Ignoring establish report for {}: {}", id, e);
                    }
                }
            }

            TransportEvent::Disconnected(id) => {
                info!("Transport for {} reported closed", id);
                if self.registry.remove(&id).await {
                    self.candidates.discard(&id);
                }
            }

            TransportEvent::CandidateGenerated(id, candidate) => {
                self.publish(SignalTarget::Peer(id), SignalBody::Candidate(candidate))
                    .await;
            }
        }
    }

    /// Ensure a session towards `id` exists and has an offer out. The offer
    /// guard inside the session makes this safe to call from overlapping
    /// join handling and transmit fan-out.
    pub(super) async fn offer_to(&mut self, id: &ParticipantId) -> Result<(), NegotiationError> {
        let session = self.registry.get_or_create(id).await?;
        if let Some(offer) = session.initiate().await? {
            self.publish(SignalTarget::Peer(id.clone()), SignalBody::Offer(offer))
                .await;
        }
        Ok(())
    }

    /// Sends one signaling message through the relay. Publish failures are
    /// logged and dropped; a later natural signaling event re-synchronizes.
    pub(super) async fn publish(&self, to: SignalTarget, body: SignalBody) {
        let Some(from) = self.roster.local_id() else {
            warn!("Dropping outbound signal: no local id yet");
            return;
        };
        let msg = SignalMessage {
            from: from.clone(),
            to,
            body,
        };
        if let Err(e) = self.publisher.publish(SIGNAL_EVENT, &msg).await {
            warn!("Relay publish failed: {}", e);
        }
    }

    /// Unconditional teardown: close every session (negotiated or not),
    /// drop all buffered candidates, release the relay subscription and
    /// silence the capture track.
    async fn shutdown(&mut self) {
        info!("Tearing down mesh");
        self.registry.close_all().await;
        self.candidates.clear();
        self.relay.unsubscribe().await;
        self.audio.set_enabled(false);
        self.roster.clear();
        self.connected.store(false, Ordering::SeqCst);
        self.transmitting.store(false, Ordering::SeqCst);
    }
}
