//! Scripted collaborators for studio tests.

use async_trait::async_trait;
use atelier_core::Credential;
use atelier_error::{GenerationError, Operation};
use atelier_interface::{AssetResponse, CredentialProvider, Sleeper};
use atelier_models::GeminiTransport;
use atelier_storage::{MemoryMediaStore, MemoryStore};
use atelier_studio::{Studio, StudioComponentsBuilder, StudioConfig};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Credential provider that becomes available after a number of probes.
pub struct TestCredentials {
    unavailable_probes: AtomicUsize,
    key: Mutex<Option<Credential>>,
    on_select: Option<Credential>,
    has_credential_calls: AtomicUsize,
}

#[allow(dead_code)]
impl TestCredentials {
    pub fn with_key(key: &str) -> Self {
        Self {
            unavailable_probes: AtomicUsize::new(0),
            key: Mutex::new(Some(Credential::new(key))),
            on_select: Some(Credential::new(key)),
            has_credential_calls: AtomicUsize::new(0),
        }
    }

    /// No key until one is selected.
    pub fn selectable(key: &str) -> Self {
        Self {
            unavailable_probes: AtomicUsize::new(0),
            key: Mutex::new(None),
            on_select: Some(Credential::new(key)),
            has_credential_calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable_for(self, probes: usize) -> Self {
        self.unavailable_probes.store(probes, Ordering::SeqCst);
        self
    }

    pub fn has_credential_calls(&self) -> usize {
        self.has_credential_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for TestCredentials {
    async fn is_available(&self) -> bool {
        self.unavailable_probes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }

    async fn has_credential(&self) -> bool {
        self.has_credential_calls.fetch_add(1, Ordering::SeqCst);
        self.key.lock().unwrap().is_some()
    }

    async fn select_credential(&self) {
        *self.key.lock().unwrap() = self.on_select.clone();
    }

    async fn credential(&self) -> Option<Credential> {
        self.key.lock().unwrap().clone()
    }
}

/// Sleeper that returns immediately and remembers what it was asked.
#[derive(Default)]
pub struct InstantSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

#[allow(dead_code)]
impl InstantSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Transport answering from queues.
#[derive(Default)]
pub struct MockTransport {
    json: Mutex<VecDeque<Value>>,
    assets: Mutex<VecDeque<AssetResponse>>,
    paths: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn push_json(&self, value: Value) {
        self.json.lock().unwrap().push_back(value);
    }

    pub fn push_asset(&self, asset: AssetResponse) {
        self.assets.lock().unwrap().push_back(asset);
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    fn next(&self, path: &str, operation: Operation) -> Result<Value, GenerationError> {
        self.paths.lock().unwrap().push(path.to_string());
        self.json
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GenerationError::upstream(operation, "no scripted response"))
    }
}

#[async_trait]
impl GeminiTransport for MockTransport {
    async fn post_json(
        &self,
        _credential: &Credential,
        path: &str,
        _body: Value,
        operation: Operation,
    ) -> Result<Value, GenerationError> {
        self.next(path, operation)
    }

    async fn get_json(
        &self,
        _credential: &Credential,
        path: &str,
        operation: Operation,
    ) -> Result<Value, GenerationError> {
        self.next(path, operation)
    }

    async fn get_bytes(
        &self,
        _credential: &Credential,
        uri: &str,
        operation: Operation,
    ) -> Result<AssetResponse, GenerationError> {
        self.paths.lock().unwrap().push(uri.to_string());
        self.assets
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GenerationError::upstream(operation, "no scripted asset"))
    }
}

/// A studio over in-memory collaborators.
#[allow(dead_code)]
pub struct Fixture {
    pub studio: Studio,
    pub transport: Arc<MockTransport>,
    pub credentials: Arc<TestCredentials>,
    pub sleeper: Arc<InstantSleeper>,
    pub kv: Arc<MemoryStore>,
    pub media: Arc<MemoryMediaStore>,
}

#[allow(dead_code)]
pub fn fixture(credentials: TestCredentials) -> Fixture {
    let transport = Arc::new(MockTransport::default());
    let credentials = Arc::new(credentials);
    let sleeper = Arc::new(InstantSleeper::default());
    let kv = Arc::new(MemoryStore::new());
    let media = Arc::new(MemoryMediaStore::new());

    let components = StudioComponentsBuilder::default()
        .config(StudioConfig::default())
        .credentials(credentials.clone())
        .transport(transport.clone())
        .key_value(kv.clone())
        .media(media.clone())
        .sleeper(sleeper.clone())
        .build()
        .unwrap();

    Fixture {
        studio: Studio::new(components).unwrap(),
        transport,
        credentials,
        sleeper,
        kv,
        media,
    }
}
