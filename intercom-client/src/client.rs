use crate::audio::{AudioSource, OpusTrackSource};
use crate::config::ClientConfig;
use crate::errors::ConnectError;
use crate::mesh::{EngineCommand, MeshEngine, MeshShared, SessionState};
use crate::relay::{HttpRelayClient, PresenceRelay, RelayPublisher};
use crate::transport::{TransportFactory, WebrtcTransportFactory};
use dashmap::DashMap;
use intercom_core::{Participant, ParticipantId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, oneshot};

const COMMAND_BUFFER: usize = 16;

/// Handle to one walkie connection: a full mesh of audio sessions towards
/// everyone else on the presence channel, negotiated through the relay.
///
/// Dropping the handle shuts the mesh down; [`Intercom::disconnect`] does
/// the same but waits until teardown finished.
#[derive(Debug)]
pub struct Intercom {
    cmd_tx: mpsc::Sender<EngineCommand>,
    roster: Arc<DashMap<ParticipantId, Participant>>,
    session_states: Arc<DashMap<ParticipantId, SessionState>>,
    connected: Arc<AtomicBool>,
    transmitting: Arc<AtomicBool>,
}

impl Intercom {
    /// Connects with the production collaborators wired from `config`: HTTP
    /// publisher against the trigger endpoint, native WebRTC transports with
    /// the configured ICE servers, and an Opus outbound track.
    ///
    /// The presence relay itself is the caller's: its transport and
    /// authorization live outside this crate.
    pub async fn connect(
        config: &ClientConfig,
        display_name: &str,
        relay: Arc<dyn PresenceRelay>,
    ) -> Result<Self, ConnectError> {
        Self::connect_with(
            display_name,
            relay,
            Arc::new(HttpRelayClient::new(&config.trigger_endpoint)),
            Arc::new(WebrtcTransportFactory::new(config.ice_servers.clone())),
            Arc::new(OpusTrackSource::default()),
        )
        .await
    }

    /// Connects with explicit collaborators. Acquires the audio capture
    /// resource first (it starts muted), then subscribes to the presence
    /// channel; negotiation begins once the relay confirms the subscription
    /// and assigns our id.
    pub async fn connect_with(
        display_name: &str,
        relay: Arc<dyn PresenceRelay>,
        publisher: Arc<dyn RelayPublisher>,
        transports: Arc<dyn TransportFactory>,
        audio: Arc<dyn AudioSource>,
    ) -> Result<Self, ConnectError> {
        let track = audio.acquire().await?;
        let relay_rx = relay.subscribe(display_name).await?;

        let shared = MeshShared::new();
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);

        let engine = MeshEngine::new(
            display_name.to_owned(),
            relay,
            publisher,
            transports,
            track,
            relay_rx,
            cmd_rx,
            shared.clone(),
        );
        tokio::spawn(engine.run());

        Ok(Self {
            cmd_tx,
            roster: shared.roster,
            session_states: shared.session_states,
            connected: shared.connected,
            transmitting: shared.transmitting,
        })
    }

    /// Enable outbound audio and tell the channel we are speaking. Sessions
    /// towards peers we have not negotiated with yet are established now.
    pub async fn start_transmitting(&self) {
        let _ = self.cmd_tx.send(EngineCommand::SetTransmitting(true)).await;
    }

    /// Mute outbound audio and broadcast the new speaking state.
    pub async fn stop_transmitting(&self) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::SetTransmitting(false))
            .await;
    }

    /// Tear down every session, release the relay subscription and the
    /// capture resource. Returns once teardown completed.
    pub async fn disconnect(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self
            .cmd_tx
            .send(EngineCommand::Shutdown(ack_tx))
            .await
            .is_ok()
        {
            let _ = ack_rx.await;
        }
    }

    /// Current membership of the presence channel, the local participant
    /// included.
    pub fn participants(&self) -> Vec<Participant> {
        self.roster.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn local_id(&self) -> Option<ParticipantId> {
        self.roster
            .iter()
            .find(|entry| entry.is_local)
            .map(|entry| entry.id.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn is_transmitting(&self) -> bool {
        self.transmitting.load(Ordering::SeqCst)
    }

    /// Negotiation state of the session towards `id`, if one exists.
    pub fn session_state(&self, id: &ParticipantId) -> Option<SessionState> {
        self.session_states.get(id).map(|entry| *entry)
    }

    /// Number of live peer sessions.
    pub fn session_count(&self) -> usize {
        self.session_states.len()
    }
}
