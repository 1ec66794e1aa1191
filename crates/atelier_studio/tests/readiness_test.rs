// Readiness gate tests.

mod test_utils;

use atelier_core::Readiness;
use atelier_studio::ReadinessGate;
use std::sync::Arc;
use std::time::Duration;
use test_utils::{InstantSleeper, TestCredentials};

#[tokio::test]
async fn test_probes_until_available_then_asks_once() {
    let credentials = Arc::new(TestCredentials::with_key("k").unavailable_for(3));
    let sleeper = Arc::new(InstantSleeper::default());
    let mut gate = ReadinessGate::new(
        credentials.clone(),
        sleeper.clone(),
        Duration::from_millis(100),
    );
    assert_eq!(gate.state(), Readiness::Checking);

    let readiness = gate.check().await;

    assert_eq!(readiness, Readiness::Ready);
    assert_eq!(sleeper.sleeps(), vec![Duration::from_millis(100); 3]);
    assert_eq!(credentials.has_credential_calls(), 1);
}

#[tokio::test]
async fn test_no_credential_keeps_gate_closed() {
    let credentials = Arc::new(TestCredentials::selectable("k"));
    let mut gate = ReadinessGate::new(
        credentials,
        Arc::new(InstantSleeper::default()),
        Duration::from_millis(100),
    );

    assert_eq!(gate.check().await, Readiness::NotReady);
    assert!(!gate.state().is_ready());
}

#[tokio::test]
async fn test_select_credential_opens_gate() {
    let credentials = Arc::new(TestCredentials::selectable("k"));
    let mut gate = ReadinessGate::new(
        credentials,
        Arc::new(InstantSleeper::default()),
        Duration::from_millis(100),
    );
    let mut changes = gate.subscribe();

    gate.check().await;
    gate.select_credential().await;

    assert_eq!(gate.state(), Readiness::Ready);
    assert!(changes.has_changed().unwrap());
    assert_eq!(*changes.borrow_and_update(), Readiness::Ready);

    gate.mark_not_ready();
    assert_eq!(gate.state(), Readiness::NotReady);
}
