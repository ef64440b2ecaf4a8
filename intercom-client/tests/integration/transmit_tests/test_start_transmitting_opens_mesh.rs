use crate::utils::{connect_mesh, settle, wait_until};
use intercom_core::ParticipantId;

/// With roster [A(local), B, C] and no prior sessions, starting to transmit
/// creates a session and sends exactly one offer to each peer, broadcasts
/// speaking=true, and unmutes the local track.
#[tokio::test]
async fn test_start_transmitting_opens_mesh() {
    let mesh = connect_mesh().await;
    mesh.snapshot("a", &["a", "b", "c"]).await;

    assert!(!mesh.audio.track().is_enabled());

    mesh.client.start_transmitting().await;

    assert!(
        wait_until(|| mesh.client.is_transmitting(), 2000).await,
        "transmitting flag never set"
    );
    assert!(
        wait_until(|| mesh.client.session_count() == 2, 2000).await,
        "sessions for both peers expected"
    );
    settle().await;

    let b = ParticipantId::from("b");
    let c = ParticipantId::from("c");
    assert_eq!(mesh.publisher.offers_to(&b).await.len(), 1);
    assert_eq!(mesh.publisher.offers_to(&c).await.len(), 1);
    assert_eq!(mesh.publisher.speaking_broadcasts().await, vec![true]);
    assert!(mesh.audio.track().is_enabled());

    mesh.client.stop_transmitting().await;
    assert!(
        wait_until(|| !mesh.client.is_transmitting(), 2000).await,
        "transmitting flag never cleared"
    );
    settle().await;
    assert_eq!(mesh.publisher.speaking_broadcasts().await, vec![true, false]);
    assert!(!mesh.audio.track().is_enabled());
    // muting does not tear sessions down
    assert_eq!(mesh.client.session_count(), 2);
}
