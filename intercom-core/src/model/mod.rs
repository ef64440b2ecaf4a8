mod participant;
mod signaling;

pub use participant::{MemberInfo, Participant, ParticipantId};
pub use signaling::{
    CandidateInit, IceServerConfig, SdpKind, SessionDescription, SignalBody, SignalMessage,
    SignalTarget,
};
