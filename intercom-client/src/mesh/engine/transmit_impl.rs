use crate::mesh::engine::MeshEngine;
use intercom_core::{SignalBody, SignalTarget};
use std::sync::atomic::Ordering;
use tracing::{info, warn};

impl MeshEngine {
    /// Toggle local outbound transmission. Every toggle broadcasts the new
    /// speaking state; the rising edge additionally walks the roster and
    /// makes sure a session (with an offer out) exists towards every peer.
    /// Sessions stay unestablished until somebody actually wants to talk.
    pub(super) async fn set_transmitting(&mut self, on: bool) {
        let Some(local_id) = self.roster.local_id().cloned() else {
            warn!("Cannot toggle transmission before subscription confirmation");
            return;
        };

        let was = self.transmitting.swap(on, Ordering::SeqCst);
        self.audio.set_enabled(on);
        self.roster.set_speaking(&local_id, on);
        info!("Local transmission {}", if on { "enabled" } else { "disabled" });

        self.publish(
            SignalTarget::Broadcast,
            SignalBody::Speaking {
                id: local_id,
                speaking: on,
            },
        )
        .await;

        if on && !was {
            for id in self.roster.peer_ids() {
                if let Err(e) = self.offer_to(&id).await {
                    warn!("Negotiation with {} failed: {}", id, e);
                }
            }
        }
    }
}
