use crate::mesh::engine::MeshEngine;
use intercom_core::{SignalBody, SignalMessage, SignalTarget};
use tracing::{debug, info, warn};

impl MeshEngine {
    /// Dispatches one inbound signaling message. Messages not addressed to
    /// us (directly or via the broadcast wildcard) are ignored. A failure in
    /// any branch is confined to that one peer's session.
    pub(super) async fn route_signal(&mut self, msg: SignalMessage) {
        let Some(local_id) = self.roster.local_id().cloned() else {
            return;
        };
        if let SignalTarget::Peer(ref to) = msg.to {
            if *to != local_id {
                return;
            }
        }

        let from = msg.from;
        match msg.body {
            SignalBody::Join { id, name } => {
                if id == local_id {
                    return;
                }
                debug!("Join signal from {}", id);
                self.roster.upsert(&id, &name);
                if let Err(e) = self.offer_to(&id).await {
                    warn!("Negotiation with joining peer {} failed: {}", id, e);
                }
            }

            SignalBody::Offer(offer) => {
                debug!("Offer from {}", from);
                let session = match self.registry.get_or_create(&from).await {
                    Ok(session) => session,
                    Err(e) => {
                        warn!("No session for offer from {}: {}", from, e);
                        return;
                    }
                };
                let pending = self.candidates.drain(&from);
                match session.accept_offer(offer, pending).await {
                    Ok(answer) => {
                        self.publish(SignalTarget::Peer(from), SignalBody::Answer(answer))
                            .await;
                    }
                    Err(e) => warn!("Failed to answer offer from {}: {}", from, e),
                }
            }

            SignalBody::Answer(answer) => {
                // stale or duplicate answers may outlive their session
                let Some(session) = self.registry.get_mut(&from) else {
                    debug!("Ignoring answer from {} with no session", from);
                    return;
                };
                let pending = self.candidates.drain(&from);
                if let Err(e) = session.accept_answer(answer, pending).await {
                    warn!("Failed to apply answer from {}: {}", from, e);
                }
            }

            SignalBody::Candidate(candidate) => match self.registry.get_mut(&from) {
                Some(session) if session.has_remote_description() => {
                    if let Err(e) = session.apply_candidate(candidate).await {
                        warn!("Failed to apply candidate from {}: {}", from, e);
                    }
                }
                _ => {
                    self.candidates.push(from.clone(), candidate);
                    debug!(
                        "Buffered candidate #{} for {}",
                        self.candidates.pending(&from),
                        from
                    );
                }
            },

            SignalBody::Speaking { id, speaking } => {
                self.roster.set_speaking(&id, speaking);
            }

            SignalBody::Leave { id } => {
                if id == local_id {
                    return;
                }
                info!("Participant {} left", id);
                self.roster.remove(&id);
                self.registry.remove(&id).await;
                self.candidates.discard(&id);
            }
        }
    }
}
