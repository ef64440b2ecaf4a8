use crate::utils::{connect_mesh, settle, wait_until};
use intercom_core::{ParticipantId, SignalBody};

/// Speaking signals flip the sender's flag and do nothing else: no session,
/// no outbound traffic.
#[tokio::test]
async fn test_speaking_updates_roster_only() {
    let mesh = connect_mesh().await;
    mesh.snapshot("a", &["a", "b"]).await;

    let b = ParticipantId::from("b");
    let speaking_of_b = |mesh: &crate::utils::TestMesh| {
        mesh.client
            .participants()
            .into_iter()
            .find(|p| p.id == b)
            .map(|p| p.speaking)
    };

    mesh.broadcast(
        "b",
        SignalBody::Speaking {
            id: b.clone(),
            speaking: true,
        },
    )
    .await;
    assert!(
        wait_until(|| speaking_of_b(&mesh) == Some(true), 2000).await,
        "speaking flag never set"
    );

    mesh.broadcast(
        "b",
        SignalBody::Speaking {
            id: b.clone(),
            speaking: false,
        },
    )
    .await;
    assert!(
        wait_until(|| speaking_of_b(&mesh) == Some(false), 2000).await,
        "speaking flag never cleared"
    );

    settle().await;
    assert_eq!(mesh.client.session_count(), 0);
    assert!(mesh.transports.ops().await.is_empty());
}
