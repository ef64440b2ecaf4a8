use crate::errors::NegotiationError;
use crate::transport::PeerTransport;
use dashmap::DashMap;
use intercom_core::{CandidateInit, ParticipantId, SessionDescription};
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a peer session stands in the offer/answer exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    New,
    OfferSent,
    AnswerSent,
    Connected,
    Closed,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum SessionEvent {
    Initiate,
    RemoteOffer,
    RemoteAnswer,
    TransportEstablished,
    Close,
}

impl SessionEvent {
    fn name(self) -> &'static str {
        match self {
            Self::Initiate => "initiate",
            Self::RemoteOffer => "remote offer",
            Self::RemoteAnswer => "remote answer",
            Self::TransportEstablished => "transport established",
            Self::Close => "close",
        }
    }
}

impl SessionState {
    /// The negotiation transition table. Any combination outside it is an
    /// invalid transition and leaves the state untouched.
    pub(crate) fn advance(self, event: SessionEvent) -> Result<SessionState, NegotiationError> {
        use SessionState::*;

        match (self, event) {
            (New, SessionEvent::Initiate) => Ok(OfferSent),
            (New, SessionEvent::RemoteOffer) => Ok(AnswerSent),
            (OfferSent, SessionEvent::RemoteAnswer) => Ok(Connected),
            (AnswerSent, SessionEvent::TransportEstablished) => Ok(Connected),
            // the transport may report established again after the answer
            // already moved us there
            (Connected, SessionEvent::TransportEstablished) => Ok(Connected),
            (_, SessionEvent::Close) => Ok(Closed),
            (from, event) => Err(NegotiationError::InvalidTransition {
                from,
                event: event.name(),
            }),
        }
    }
}

/// One negotiation towards one remote participant: the state machine plus
/// the media transport it drives. Created lazily by the registry, destroyed
/// on remote departure or terminal transport failure.
pub(crate) struct PeerSession {
    remote_id: ParticipantId,
    state: SessionState,
    has_local_description: bool,
    has_remote_description: bool,
    transport: Box<dyn PeerTransport>,
    states: Arc<DashMap<ParticipantId, SessionState>>,
}

impl PeerSession {
    pub(crate) fn new(
        remote_id: ParticipantId,
        transport: Box<dyn PeerTransport>,
        states: Arc<DashMap<ParticipantId, SessionState>>,
    ) -> Self {
        states.insert(remote_id.clone(), SessionState::New);
        Self {
            remote_id,
            state: SessionState::New,
            has_local_description: false,
            has_remote_description: false,
            transport,
            states,
        }
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn has_remote_description(&self) -> bool {
        self.has_remote_description
    }

    fn set_state(&mut self, state: SessionState) {
        debug!(
            "Session {}: {:?} -> {:?}",
            self.remote_id, self.state, state
        );
        self.state = state;
        self.states.insert(self.remote_id.clone(), state);
    }

    /// Create and send-side-install a local offer. Guarded: a session that
    /// already holds a local description is never re-offered, no matter how
    /// many overlapping join signals arrive.
    pub(crate) async fn initiate(
        &mut self,
    ) -> Result<Option<SessionDescription>, NegotiationError> {
        if self.has_local_description {
            return Ok(None);
        }
        let next = self.state.advance(SessionEvent::Initiate)?;

        let offer = self.transport.create_offer().await?;
        self.has_local_description = true;
        self.set_state(next);
        Ok(Some(offer))
    }

    /// Apply a remote offer: install it, replay any buffered candidates in
    /// arrival order, then produce the local answer.
    pub(crate) async fn accept_offer(
        &mut self,
        offer: SessionDescription,
        pending: Vec<CandidateInit>,
    ) -> Result<SessionDescription, NegotiationError> {
        let next = self.state.advance(SessionEvent::RemoteOffer)?;

        self.transport.set_remote_description(offer).await?;
        self.has_remote_description = true;
        self.apply_pending(pending).await;

        let answer = self.transport.create_answer().await?;
        self.has_local_description = true;
        self.set_state(next);
        Ok(answer)
    }

    /// Apply a remote answer to an offer we sent, then replay buffered
    /// candidates.
    pub(crate) async fn accept_answer(
        &mut self,
        answer: SessionDescription,
        pending: Vec<CandidateInit>,
    ) -> Result<(), NegotiationError> {
        let next = self.state.advance(SessionEvent::RemoteAnswer)?;

        self.transport.set_remote_description(answer).await?;
        self.has_remote_description = true;
        self.apply_pending(pending).await;

        self.set_state(next);
        Ok(())
    }

    /// Apply a candidate immediately. Only valid once the remote description
    /// is set; the router buffers candidates that arrive earlier.
    pub(crate) async fn apply_candidate(
        &mut self,
        candidate: CandidateInit,
    ) -> Result<(), NegotiationError> {
        self.transport.add_candidate(candidate).await?;
        Ok(())
    }

    /// The transport reached its connected state.
    pub(crate) fn transport_established(&mut self) -> Result<(), NegotiationError> {
        let next = self.state.advance(SessionEvent::TransportEstablished)?;
        if next != self.state {
            self.set_state(next);
        }
        Ok(())
    }

    /// Close the transport and mark the session terminal. Every state may
    /// close; a transport that fails to close is logged and forgotten.
    pub(crate) async fn close(&mut self) {
        if let Ok(next) = self.state.advance(SessionEvent::Close) {
            if next != self.state {
                self.set_state(next);
            }
        }
        if let Err(e) = self.transport.close().await {
            debug!("Closing transport for {} failed: {}", self.remote_id, e);
        }
    }

    async fn apply_pending(&mut self, pending: Vec<CandidateInit>) {
        for candidate in pending {
            if let Err(e) = self.transport.add_candidate(candidate).await {
                warn!(
                    "Buffered candidate for {} failed to apply: {}",
                    self.remote_id, e
                );
            }
        }
    }
}
