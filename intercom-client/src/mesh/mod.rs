mod candidate_queue;
mod command;
mod engine;
mod peer_session;
mod registry;
mod roster;

pub use peer_session::SessionState;

pub(crate) use candidate_queue::CandidateQueue;
pub(crate) use command::EngineCommand;
pub(crate) use engine::{MeshEngine, MeshShared};
pub(crate) use peer_session::PeerSession;
pub(crate) use registry::PeerRegistry;
pub(crate) use roster::Roster;
