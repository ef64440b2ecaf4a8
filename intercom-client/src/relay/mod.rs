mod event;
mod http_client;
mod presence;
mod publisher;

pub use event::*;
pub use http_client::*;
pub use presence::*;
pub use publisher::*;
