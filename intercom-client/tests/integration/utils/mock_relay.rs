use async_trait::async_trait;
use intercom_client::errors::{AcquisitionError, RelayAuthError, RelaySendError};
use intercom_client::audio::{AudioSource, LocalAudioTrack, OpusTrackSource};
use intercom_client::relay::{PresenceRelay, RelayEvent, RelayPublisher};
use intercom_core::{ParticipantId, SessionDescription, SignalBody, SignalMessage, SignalTarget};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, mpsc};

/// Presence relay driven by the test: `subscribe` hands the engine a fresh
/// event channel and the test injects events through `deliver`.
#[derive(Default)]
pub struct ScriptedRelay {
    tx: std::sync::Mutex<Option<mpsc::Sender<RelayEvent>>>,
    unsubscribed: AtomicBool,
}

#[async_trait]
impl PresenceRelay for ScriptedRelay {
    async fn subscribe(
        &self,
        _display_name: &str,
    ) -> Result<mpsc::Receiver<RelayEvent>, RelayAuthError> {
        let (tx, rx) = mpsc::channel(64);
        *self.tx.lock().unwrap() = Some(tx);
        Ok(rx)
    }

    async fn unsubscribe(&self) {
        self.unsubscribed.store(true, Ordering::SeqCst);
    }
}

impl ScriptedRelay {
    pub async fn deliver(&self, event: RelayEvent) {
        let tx = self
            .tx
            .lock()
            .unwrap()
            .clone()
            .expect("relay not subscribed yet");
        tx.send(event).await.expect("engine stopped receiving");
    }

    pub fn is_unsubscribed(&self) -> bool {
        self.unsubscribed.load(Ordering::SeqCst)
    }
}

/// Relay that rejects every subscription attempt.
pub struct RejectingRelay;

#[async_trait]
impl PresenceRelay for RejectingRelay {
    async fn subscribe(
        &self,
        _display_name: &str,
    ) -> Result<mpsc::Receiver<RelayEvent>, RelayAuthError> {
        Err(RelayAuthError::Rejected("forbidden".to_owned()))
    }

    async fn unsubscribe(&self) {}
}

/// Mock publisher that captures all outgoing signals, in the manner of a
/// signaling-output test double: stored for verification plus streamed over
/// a channel for ordered waits.
#[derive(Clone)]
pub struct MockPublisher {
    tx: mpsc::UnboundedSender<SignalMessage>,
    sent: Arc<Mutex<Vec<SignalMessage>>>,
    fail: Arc<AtomicBool>,
}

impl MockPublisher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SignalMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let publisher = Self {
            tx,
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(AtomicBool::new(false)),
        };
        (publisher, rx)
    }

    /// Make every publish fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<SignalMessage> {
        self.sent.lock().await.clone()
    }

    /// All offers addressed to a specific peer.
    pub async fn offers_to(&self, id: &ParticipantId) -> Vec<SessionDescription> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|msg| match (&msg.to, &msg.body) {
                (SignalTarget::Peer(to), SignalBody::Offer(desc)) if to == id => {
                    Some(desc.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub async fn answers_to(&self, id: &ParticipantId) -> Vec<SessionDescription> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|msg| match (&msg.to, &msg.body) {
                (SignalTarget::Peer(to), SignalBody::Answer(desc)) if to == id => {
                    Some(desc.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub async fn joins_to(&self, id: &ParticipantId) -> usize {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|msg| {
                matches!(&msg.to, SignalTarget::Peer(to) if to == id)
                    && matches!(msg.body, SignalBody::Join { .. })
            })
            .count()
    }

    /// Speaking broadcasts, in publish order.
    pub async fn speaking_broadcasts(&self) -> Vec<bool> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|msg| match (&msg.to, &msg.body) {
                (SignalTarget::Broadcast, SignalBody::Speaking { speaking, .. }) => {
                    Some(*speaking)
                }
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl RelayPublisher for MockPublisher {
    async fn publish(&self, event: &str, payload: &SignalMessage) -> Result<(), RelaySendError> {
        tracing::debug!("[MockPublisher] publish {} {:?}", event, payload.body);
        assert_eq!(event, "signal");

        if self.fail.load(Ordering::SeqCst) {
            return Err(RelaySendError::Status(500));
        }

        self.sent.lock().await.push(payload.clone());
        let _ = self.tx.send(payload.clone());
        Ok(())
    }
}

/// Audio source that keeps hold of the track it handed out, so tests can
/// observe the enabled flag.
#[derive(Default, Clone)]
pub struct TestAudioSource {
    slot: Arc<std::sync::Mutex<Option<Arc<LocalAudioTrack>>>>,
}

#[async_trait]
impl AudioSource for TestAudioSource {
    async fn acquire(&self) -> Result<Arc<LocalAudioTrack>, AcquisitionError> {
        let track = OpusTrackSource::default().acquire().await?;
        *self.slot.lock().unwrap() = Some(track.clone());
        Ok(track)
    }
}

impl TestAudioSource {
    pub fn track(&self) -> Arc<LocalAudioTrack> {
        self.slot
            .lock()
            .unwrap()
            .clone()
            .expect("track not acquired yet")
    }
}

/// Audio source whose device is never available.
pub struct FailingAudioSource;

#[async_trait]
impl AudioSource for FailingAudioSource {
    async fn acquire(&self) -> Result<Arc<LocalAudioTrack>, AcquisitionError> {
        Err(AcquisitionError::PermissionDenied)
    }
}
