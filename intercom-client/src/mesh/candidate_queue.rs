use intercom_core::{CandidateInit, ParticipantId};
use std::collections::HashMap;

/// Per-peer buffer of candidates that arrived before the remote description
/// was set. An entry exists only while that description is missing: the
/// whole buffer is drained (in arrival order) the moment it lands, and
/// discarded when the peer leaves.
#[derive(Default)]
pub(crate) struct CandidateQueue {
    queues: HashMap<ParticipantId, Vec<CandidateInit>>,
}

impl CandidateQueue {
    pub(crate) fn push(&mut self, id: ParticipantId, candidate: CandidateInit) {
        self.queues.entry(id).or_default().push(candidate);
    }

    /// Removes and returns everything buffered for `id`, oldest first.
    pub(crate) fn drain(&mut self, id: &ParticipantId) -> Vec<CandidateInit> {
        self.queues.remove(id).unwrap_or_default()
    }

    pub(crate) fn discard(&mut self, id: &ParticipantId) {
        self.queues.remove(id);
    }

    pub(crate) fn clear(&mut self) {
        self.queues.clear();
    }

    pub(crate) fn pending(&self, id: &ParticipantId) -> usize {
        self.queues.get(id).map(Vec::len).unwrap_or(0)
    }
}
