use crate::utils::{
    SIGNAL_TIMEOUT_MS, STATE_TIMEOUT_MS, connect_mesh, offer_body, wait_for_signal, wait_until,
};
use intercom_client::SessionState;
use intercom_client::transport::TransportEvent;
use intercom_core::{ParticipantId, SignalBody};

/// An inbound offer creates the session on demand, produces exactly one
/// answer, and the session connects once the transport reports established.
#[tokio::test]
async fn test_inbound_offer_answered() {
    let mut mesh = connect_mesh().await;
    mesh.snapshot("a", &["a", "b"]).await;

    let b = ParticipantId::from("b");
    mesh.signal("b", "a", offer_body("v=0 offer-from-b")).await;

    let answer = wait_for_signal(
        &mut mesh.signal_rx,
        |msg| matches!(msg.body, SignalBody::Answer(_)),
        SIGNAL_TIMEOUT_MS,
    )
    .await
    .expect("no answer sent");
    assert_eq!(String::from(answer.to), "b");

    assert_eq!(mesh.publisher.answers_to(&b).await.len(), 1);
    assert_eq!(mesh.client.session_state(&b), Some(SessionState::AnswerSent));

    mesh.transports
        .emit(&b, TransportEvent::Established(b.clone()))
        .await;

    assert!(
        wait_until(
            || mesh.client.session_state(&b) == Some(SessionState::Connected),
            STATE_TIMEOUT_MS
        )
        .await,
        "session never connected after transport establish"
    );
}
