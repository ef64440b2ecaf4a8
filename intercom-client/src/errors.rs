use crate::mesh::SessionState;
use thiserror::Error;

/// The local audio capture resource could not be acquired.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("no audio input device available")]
    DeviceUnavailable,
    #[error("access to the audio input device was denied")]
    PermissionDenied,
    #[error("audio device error: {0}")]
    Device(String),
}

/// Subscribing to the presence channel failed. The caller may retry.
#[derive(Debug, Error)]
pub enum RelayAuthError {
    #[error("relay authorization rejected: {0}")]
    Rejected(String),
    #[error("relay subscription failed: {0}")]
    Subscription(String),
}

/// Why `connect` failed.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
    #[error(transparent)]
    RelayAuth(#[from] RelayAuthError),
}

/// A transport implementation failed to apply a description or candidate,
/// or to close.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to create peer transport: {0}")]
    Setup(String),
    #[error("description error: {0}")]
    Description(String),
    #[error("candidate error: {0}")]
    Candidate(String),
    #[error("close error: {0}")]
    Close(String),
}

impl From<webrtc::Error> for TransportError {
    fn from(e: webrtc::Error) -> Self {
        Self::Description(e.to_string())
    }
}

/// A per-peer negotiation step failed. Isolated to that one session; never
/// affects other sessions, the roster, or the connected state.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("invalid transition: {event} while {from:?}")]
    InvalidTransition {
        from: SessionState,
        event: &'static str,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Publishing through the relay trigger endpoint failed. Logged and dropped;
/// there is no retry queue.
#[derive(Debug, Error)]
pub enum RelaySendError {
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay trigger endpoint returned status {0}")]
    Status(u16),
}
