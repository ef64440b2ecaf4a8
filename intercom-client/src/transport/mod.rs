mod event;
mod peer_transport;
mod webrtc_transport;

pub use event::*;
pub use peer_transport::*;
pub use webrtc_transport::*;
