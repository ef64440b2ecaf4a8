use crate::errors::AcquisitionError;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use webrtc::api::media_engine::MIME_TYPE_OPUS;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// The one outbound audio track, acquired at connect time and shared with
/// every peer transport. Toggling transmission flips `enabled` without
/// reacquiring the device; whatever feeds samples into the track consults
/// the flag.
pub struct LocalAudioTrack {
    track: Arc<TrackLocalStaticSample>,
    enabled: AtomicBool,
}

impl LocalAudioTrack {
    /// Wraps a track. Starts disabled: connecting must not transmit.
    pub fn new(track: Arc<TrackLocalStaticSample>) -> Self {
        Self {
            track,
            enabled: AtomicBool::new(false),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn rtc_track(&self) -> Arc<TrackLocalStaticSample> {
        self.track.clone()
    }
}

/// Provider of the local capture resource. Device handling itself lives
/// outside the core; implementations hand back the track the engine attaches
/// to every peer transport.
#[async_trait]
pub trait AudioSource: Send + Sync {
    async fn acquire(&self) -> Result<Arc<LocalAudioTrack>, AcquisitionError>;
}

/// Default source: creates an Opus sample track for the capture pipeline to
/// write into. Does not open any device by itself.
pub struct OpusTrackSource {
    track_id: String,
    stream_id: String,
}

impl OpusTrackSource {
    pub fn new(track_id: &str, stream_id: &str) -> Self {
        Self {
            track_id: track_id.to_owned(),
            stream_id: stream_id.to_owned(),
        }
    }
}

impl Default for OpusTrackSource {
    fn default() -> Self {
        Self::new("audio", "intercom")
    }
}

#[async_trait]
impl AudioSource for OpusTrackSource {
    async fn acquire(&self) -> Result<Arc<LocalAudioTrack>, AcquisitionError> {
        let track = TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                ..Default::default()
            },
            self.track_id.clone(),
            self.stream_id.clone(),
        );
        Ok(Arc::new(LocalAudioTrack::new(Arc::new(track))))
    }
}
