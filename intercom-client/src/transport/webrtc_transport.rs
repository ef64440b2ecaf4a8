use crate::audio::LocalAudioTrack;
use crate::errors::TransportError;
use crate::transport::{PeerTransport, TransportEvent, TransportFactory};
use async_trait::async_trait;
use intercom_core::{CandidateInit, IceServerConfig, ParticipantId, SdpKind, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_local::TrackLocal;

/// Production [`TransportFactory`] over the native WebRTC stack.
pub struct WebrtcTransportFactory {
    ice_servers: Vec<IceServerConfig>,
}

impl WebrtcTransportFactory {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self { ice_servers }
    }
}

#[async_trait]
impl TransportFactory for WebrtcTransportFactory {
    async fn create(
        &self,
        remote_id: ParticipantId,
        audio: Arc<LocalAudioTrack>,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerTransport>, TransportError> {
        let transport =
            WebrtcTransport::new(remote_id, self.ice_servers.clone(), audio, events).await?;
        Ok(Box::new(transport))
    }
}

pub struct WebrtcTransport {
    remote_id: ParticipantId,
    peer_connection: Arc<RTCPeerConnection>,
}

impl WebrtcTransport {
    /// Builds the peer connection, wires its state and trickle-ICE callbacks
    /// into `event_tx`, and attaches the shared outbound audio track.
    pub async fn new(
        remote_id: ParticipantId,
        ice_servers: Vec<IceServerConfig>,
        audio: Arc<LocalAudioTrack>,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self, TransportError> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        let registry = register_default_interceptors(Registry::new(), &mut m)
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: ice_servers
                .into_iter()
                .map(|s| RTCIceServer {
                    urls: s.urls,
                    username: s.username.unwrap_or_default(),
                    credential: s.credential.unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .map_err(|e| TransportError::Setup(e.to_string()))?,
        );

        let state_tx = event_tx.clone();
        let uid_state = remote_id.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                let uid = uid_state.clone();

                Box::pin(async move {
                    info!("Peer connection state changed for {}: {:?}", uid, s);
                    match s {
                        RTCPeerConnectionState::Connected => {
                            let _ = tx.send(TransportEvent::Established(uid)).await;
                        }
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => {
                            let _ = tx.send(TransportEvent::Disconnected(uid)).await;
                        }
                        _ => {}
                    }
                })
            },
        ));

        let ice_tx = event_tx.clone();
        let uid_ice = remote_id.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            let uid = uid_ice.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let init = CandidateInit {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_m_line_index: init.sdp_mline_index,
                };
                let _ = tx
                    .send(TransportEvent::CandidateGenerated(uid, init))
                    .await;
            })
        }));

        debug!("Attaching local audio track for {}", remote_id);
        peer_connection
            .add_track(audio.rtc_track() as Arc<dyn TrackLocal + Send + Sync>)
            .await
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self {
            remote_id,
            peer_connection,
        })
    }
}

#[async_trait]
impl PeerTransport for WebrtcTransport {
    async fn create_offer(&self) -> Result<SessionDescription, TransportError> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription, TransportError> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), TransportError> {
        let desc = match desc.kind {
            SdpKind::Offer => RTCSessionDescription::offer(desc.sdp)?,
            SdpKind::Answer => RTCSessionDescription::answer(desc.sdp)?,
        };
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    async fn add_candidate(&self, candidate: CandidateInit) -> Result<(), TransportError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: None,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .map_err(|e| TransportError::Candidate(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        debug!("Closing transport for {}", self.remote_id);
        self.peer_connection
            .close()
            .await
            .map_err(|e| TransportError::Close(e.to_string()))?;
        Ok(())
    }
}
