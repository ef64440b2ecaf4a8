use crate::utils::{connect_mesh, settle, wait_until};
use intercom_core::ParticipantId;

/// Talking again after a pause must not re-offer peers that already have a
/// session with a local description.
#[tokio::test]
async fn test_retransmit_does_not_reoffer() {
    let mesh = connect_mesh().await;
    mesh.snapshot("a", &["a", "b"]).await;

    let b = ParticipantId::from("b");

    mesh.client.start_transmitting().await;
    assert!(wait_until(|| mesh.client.session_count() == 1, 2000).await);

    mesh.client.stop_transmitting().await;
    mesh.client.start_transmitting().await;
    assert!(wait_until(|| mesh.client.is_transmitting(), 2000).await);
    settle().await;

    assert_eq!(mesh.publisher.offers_to(&b).await.len(), 1);
    assert_eq!(mesh.transports.created_count(&b).await, 1);
    assert_eq!(mesh.publisher.speaking_broadcasts().await, vec![true, false, true]);
}
