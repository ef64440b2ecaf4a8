use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one participant on the presence channel.
///
/// Ids are minted by the relay's authorizer when the participant subscribes;
/// `random` exists for callers that generate the id locally instead.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presence payload attached to a member entry by the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: String,
}

pub const DEFAULT_DISPLAY_NAME: &str = "Guest";

impl Default for MemberInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_DISPLAY_NAME.to_owned(),
        }
    }
}

/// One roster entry. The roster holds every current member of the presence
/// channel, the local participant included (flagged with `is_local`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub is_local: bool,
    pub speaking: bool,
}

impl Participant {
    pub fn new(id: ParticipantId, name: String, is_local: bool) -> Self {
        Self {
            id,
            name,
            is_local,
            speaking: false,
        }
    }
}
