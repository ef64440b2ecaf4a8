use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    /// Plain STUN entry with no credentials.
    pub fn stun(url: &str) -> Self {
        Self {
            urls: vec![url.to_owned()],
            username: None,
            credential: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SdpKind {
    Offer,
    Answer,
}

/// A local or remote session description as carried on the wire
/// (`{"type": "offer", "sdp": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: SdpKind,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: String) -> Self {
        Self {
            kind: SdpKind::Offer,
            sdp,
        }
    }

    pub fn answer(sdp: String) -> Self {
        Self {
            kind: SdpKind::Answer,
            sdp,
        }
    }
}

/// Network-path descriptor exchanged during negotiation. Field names follow
/// the RTCIceCandidateInit dictionary so payloads interoperate with browser
/// peers on the same channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateInit {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u16>,
}

/// Destination of a signaling message: one specific participant, or every
/// subscriber of the channel (`"*"` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SignalTarget {
    Broadcast,
    Peer(ParticipantId),
}

pub const BROADCAST_WILDCARD: &str = "*";

impl From<String> for SignalTarget {
    fn from(s: String) -> Self {
        if s == BROADCAST_WILDCARD {
            Self::Broadcast
        } else {
            Self::Peer(ParticipantId(s))
        }
    }
}

impl From<SignalTarget> for String {
    fn from(target: SignalTarget) -> Self {
        match target {
            SignalTarget::Broadcast => BROADCAST_WILDCARD.to_owned(),
            SignalTarget::Peer(id) => id.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum SignalBody {
    Join {
        id: ParticipantId,
        name: String,
    },
    Leave {
        id: ParticipantId,
    },
    Offer(SessionDescription),
    Answer(SessionDescription),
    Candidate(CandidateInit),
    Speaking {
        id: ParticipantId,
        speaking: bool,
    },
}

/// Out-of-band control message relayed between participants. On the wire this
/// is the flat `{from, to, type, payload}` object the relay carries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalMessage {
    pub from: ParticipantId,
    pub to: SignalTarget,
    #[serde(flatten)]
    pub body: SignalBody,
}
