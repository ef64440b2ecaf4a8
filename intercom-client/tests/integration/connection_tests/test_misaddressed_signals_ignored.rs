use crate::utils::{connect_mesh, join_body, offer_body, settle};

/// A unicast signal for some other participant never touches our sessions.
#[tokio::test]
async fn test_signal_addressed_elsewhere_is_ignored() {
    let mesh = connect_mesh().await;
    mesh.snapshot("a", &["a", "b", "c"]).await;

    mesh.signal("b", "c", offer_body("v=0 not-for-us")).await;

    settle().await;
    assert_eq!(mesh.client.session_count(), 0);
    assert!(mesh.transports.ops().await.is_empty());
}

/// Signals delivered before the subscription snapshot are dropped: no
/// negotiation happens before the relay assigns our id.
#[tokio::test]
async fn test_pre_snapshot_signals_dropped() {
    let mesh = connect_mesh().await;

    mesh.signal("b", "a", join_body("b")).await;
    settle().await;
    assert_eq!(mesh.client.session_count(), 0);
    assert!(mesh.publisher.sent().await.is_empty());

    mesh.snapshot("a", &["a"]).await;
    settle().await;
    // the dropped join is not replayed
    assert_eq!(mesh.client.session_count(), 0);
}
