use tokio::sync::oneshot;

/// Commands from the public handle into the dispatcher loop.
#[derive(Debug)]
pub(crate) enum EngineCommand {
    /// Toggle local outbound transmission.
    SetTransmitting(bool),
    /// Tear everything down; the sender is acked once teardown completed.
    Shutdown(oneshot::Sender<()>),
}
