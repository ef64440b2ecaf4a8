use dashmap::DashMap;
use intercom_core::{MemberInfo, Participant, ParticipantId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Tracks the live membership of the presence channel. The map is shared
/// read-only with the public handle; all writes happen on the dispatcher
/// task. Membership here is the single source of truth for which peer
/// sessions are allowed to exist.
pub(crate) struct Roster {
    participants: Arc<DashMap<ParticipantId, Participant>>,
    local_id: Option<ParticipantId>,
}

impl Roster {
    pub(crate) fn new(participants: Arc<DashMap<ParticipantId, Participant>>) -> Self {
        Self {
            participants,
            local_id: None,
        }
    }

    pub(crate) fn local_id(&self) -> Option<&ParticipantId> {
        self.local_id.as_ref()
    }

    pub(crate) fn is_local(&self, id: &ParticipantId) -> bool {
        self.local_id.as_ref() == Some(id)
    }

    /// Installs the membership snapshot delivered with subscription
    /// confirmation. Returns the ids of every member other than ourselves,
    /// in no particular order, so the caller can announce itself to each.
    pub(crate) fn apply_snapshot(
        &mut self,
        local_id: ParticipantId,
        members: &HashMap<ParticipantId, MemberInfo>,
    ) -> Vec<ParticipantId> {
        self.participants.clear();
        self.local_id = Some(local_id.clone());

        let mut others = Vec::new();
        for (id, info) in members {
            let is_local = *id == local_id;
            self.participants.insert(
                id.clone(),
                Participant::new(id.clone(), info.name.clone(), is_local),
            );
            if !is_local {
                others.push(id.clone());
            }
        }
        debug!(
            "Roster snapshot applied: {} members, {} peers",
            members.len(),
            others.len()
        );
        others
    }

    pub(crate) fn insert(&self, id: ParticipantId, name: String) {
        self.participants
            .insert(id.clone(), Participant::new(id, name, false));
    }

    /// Insert-or-update on an inbound announcement; keeps the speaking flag
    /// of an entry that already exists.
    pub(crate) fn upsert(&self, id: &ParticipantId, name: &str) {
        match self.participants.get_mut(id) {
            Some(mut entry) => entry.name = name.to_owned(),
            None => self.insert(id.clone(), name.to_owned()),
        }
    }

    pub(crate) fn remove(&self, id: &ParticipantId) -> bool {
        self.participants.remove(id).is_some()
    }

    /// Updates a participant's speaking flag. An unknown sender gets a
    /// placeholder entry rather than a dropped update.
    pub(crate) fn set_speaking(&self, id: &ParticipantId, speaking: bool) {
        match self.participants.get_mut(id) {
            Some(mut entry) => entry.speaking = speaking,
            None => {
                let mut participant =
                    Participant::new(id.clone(), MemberInfo::default().name, false);
                participant.speaking = speaking;
                self.participants.insert(id.clone(), participant);
            }
        }
    }

    pub(crate) fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.contains_key(id)
    }

    /// Every current member except ourselves.
    pub(crate) fn peer_ids(&self) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .filter(|entry| !entry.is_local)
            .map(|entry| entry.id.clone())
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.participants.clear();
        self.local_id = None;
    }
}
