use intercom_core::{CandidateInit, ParticipantId};

/// Events a peer transport reports back into the dispatcher loop.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// The underlying connection reached its connected state.
    Established(ParticipantId),
    /// The underlying connection closed, failed or disconnected.
    Disconnected(ParticipantId),
    /// Trickle: a local network-path candidate to forward to the peer.
    CandidateGenerated(ParticipantId, CandidateInit),
}
