use intercom_core::IceServerConfig;

pub const SIGNAL_EVENT: &str = "signal";
pub const PRESENCE_CHANNEL: &str = "presence-walkie";

/// Static client configuration. The trigger endpoint is the server-mediated
/// publish URL (the relay disallows unauthenticated client-side publish); the
/// channel is the presence topic carrying membership and signaling traffic.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub trigger_endpoint: String,
    pub channel: String,
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            trigger_endpoint: "/api/pusher/trigger".to_owned(),
            channel: PRESENCE_CHANNEL.to_owned(),
            ice_servers: vec![IceServerConfig::stun("stun:stun.l.google.com:19302")],
        }
    }
}
