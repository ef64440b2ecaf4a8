//! Client engine for a push-to-talk voice mesh coordinated over an external
//! presence relay. Every participant negotiates one direct audio session
//! with every other current participant; the relay carries only membership
//! events and signaling messages, never media.

pub mod audio;
pub mod config;
pub mod errors;
pub mod mesh;
pub mod relay;
pub mod transport;

mod client;

pub use client::Intercom;
pub use config::ClientConfig;
pub use mesh::SessionState;
