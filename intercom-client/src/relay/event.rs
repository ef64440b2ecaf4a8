use intercom_core::{MemberInfo, ParticipantId, SignalMessage};
use std::collections::HashMap;

/// Inbound events from the presence channel subscription. One receiver per
/// connection, drained by the engine's dispatcher task.
#[derive(Debug, Clone)]
pub enum RelayEvent {
    /// Subscription confirmed: the relay assigned our id and reported the
    /// current membership. No negotiation happens before this arrives.
    SubscriptionSucceeded {
        local_id: ParticipantId,
        members: HashMap<ParticipantId, MemberInfo>,
    },
    MemberAdded {
        id: ParticipantId,
        info: MemberInfo,
    },
    MemberRemoved {
        id: ParticipantId,
    },
    Signal(SignalMessage),
}
