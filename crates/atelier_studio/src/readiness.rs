//! API key readiness gate.

use atelier_core::Readiness;
use atelier_interface::{CredentialProvider, Sleeper};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

/// Tracks whether a usable credential is selected.
///
/// Starts in [`Readiness::Checking`]. [`check`](Self::check) waits for the
/// authorization collaborator to become available, probing at a fixed
/// interval, then asks it once whether a credential exists.
pub struct ReadinessGate {
    provider: Arc<dyn CredentialProvider>,
    sleeper: Arc<dyn Sleeper>,
    probe_interval: Duration,
    state: watch::Sender<Readiness>,
}

impl std::fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("state", &*self.state.borrow())
            .field("probe_interval", &self.probe_interval)
            .finish_non_exhaustive()
    }
}

impl ReadinessGate {
    /// Create a gate in the `Checking` state.
    pub fn new(
        provider: Arc<dyn CredentialProvider>,
        sleeper: Arc<dyn Sleeper>,
        probe_interval: Duration,
    ) -> Self {
        let (state, _) = watch::channel(Readiness::Checking);
        Self {
            provider,
            sleeper,
            probe_interval,
            state,
        }
    }

    /// Current state.
    pub fn state(&self) -> Readiness {
        *self.state.borrow()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.state.subscribe()
    }

    /// Resolve `Checking` into `Ready` or `NotReady`.
    #[instrument(skip(self))]
    pub async fn check(&mut self) -> Readiness {
        let mut probes = 0u32;
        while !self.provider.is_available().await {
            probes += 1;
            self.sleeper.sleep(self.probe_interval).await;
        }
        debug!(probes, "Authorization collaborator available");

        let next = if self.provider.has_credential().await {
            Readiness::Ready
        } else {
            Readiness::NotReady
        };
        self.set(next);
        next
    }

    /// Ask the collaborator to select a credential and assume it succeeded.
    #[instrument(skip(self))]
    pub async fn select_credential(&mut self) {
        self.provider.select_credential().await;
        self.set(Readiness::Ready);
    }

    /// Gate the user again after a missing-credential failure.
    pub fn mark_not_ready(&mut self) {
        self.set(Readiness::NotReady);
    }

    fn set(&self, next: Readiness) {
        let previous = self.state.send_replace(next);
        if previous != next {
            info!(from = %previous, to = %next, "Readiness changed");
        }
    }
}
