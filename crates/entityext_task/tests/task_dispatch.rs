use std::sync::Arc;
use std::time::Duration;

use entityext_task::{
    ActivationPhase, OperationalState, PendingRequest, Snapshot, StatusCode, TaskOwner,
};

#[tokio::test]
async fn observers_receive_state_and_activation_snapshots() {
    let owner = Arc::new(TaskOwner::new("camera_task", 32).unwrap());
    let mut rx = owner.subscribe();

    let mut camera = owner.reserve_entity("Camera").unwrap();
    camera.set_state(OperationalState::Normal, StatusCode::Idle);
    camera.request_activation();
    camera.request_deactivation();
    assert_eq!(camera.pending_request(), PendingRequest::WantInactive);
    camera.succeed_activation();

    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while let Ok(Ok(snapshot)) =
            tokio::time::timeout(Duration::from_millis(50), rx.recv()).await
        {
            seen.push(snapshot);
        }
        seen
    });
    let seen = observer.await.unwrap();

    match &seen[0] {
        Snapshot::State(s) => {
            assert_eq!(s.label, "Camera");
            assert_eq!(s.status.state, OperationalState::Normal);
            assert_eq!(s.status.description, "idle");
        }
        other => panic!("expected state snapshot first, got {other:?}"),
    }

    let phases: Vec<_> = seen
        .iter()
        .filter_map(|s| match s {
            Snapshot::Activation(a) => Some(a.status.phase),
            Snapshot::State(_) => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            ActivationPhase::Activating,
            ActivationPhase::Activating,
            ActivationPhase::ActivationDone,
            ActivationPhase::Active,
            ActivationPhase::Deactivating,
        ]
    );
    assert!(seen.iter().all(|s| s.entity().get() == 0));
}

#[test]
fn late_subscriber_resyncs_with_report() {
    let owner = Arc::new(TaskOwner::new("camera_task", 8).unwrap());
    let mut camera = owner.reserve_entity("Camera").unwrap();
    camera.request_activation();
    camera.succeed_activation();

    let mut rx = owner.subscribe();
    camera.report_activation_state();

    match rx.try_recv().expect("expected snapshot") {
        Snapshot::Activation(a) => assert_eq!(a.status.phase, ActivationPhase::Active),
        other => panic!("unexpected snapshot {other:?}"),
    }
}
