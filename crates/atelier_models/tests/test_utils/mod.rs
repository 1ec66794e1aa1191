//! Test utilities for the generation client.
//!
//! [`MockTransport`] replays scripted responses and records every request so
//! tests can assert on request shaping without a network.

use async_trait::async_trait;
use atelier_core::Credential;
use atelier_error::{GenerationError, Operation};
use atelier_interface::{AssetResponse, CredentialProvider};
use atelier_models::GeminiTransport;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A request seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub key: String,
    pub operation: Operation,
}

/// Transport that answers from a queue.
#[derive(Default)]
pub struct MockTransport {
    json: Mutex<VecDeque<Result<Value, GenerationError>>>,
    assets: Mutex<VecDeque<AssetResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, value: Value) {
        self.json.lock().unwrap().push_back(Ok(value));
    }

    pub fn push_error(&self, error: GenerationError) {
        self.json.lock().unwrap().push_back(Err(error));
    }

    pub fn push_asset(&self, asset: AssetResponse) {
        self.assets.lock().unwrap().push_back(asset);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
        credential: &Credential,
        operation: Operation,
    ) {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
            key: credential.expose().to_string(),
            operation,
        });
    }

    fn next_json(&self, operation: Operation) -> Result<Value, GenerationError> {
        self.json
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::upstream(operation, "no scripted response")))
    }
}

#[async_trait]
impl GeminiTransport for MockTransport {
    async fn post_json(
        &self,
        credential: &Credential,
        path: &str,
        body: Value,
        operation: Operation,
    ) -> Result<Value, GenerationError> {
        self.record("POST", path, Some(body), credential, operation);
        self.next_json(operation)
    }

    async fn get_json(
        &self,
        credential: &Credential,
        path: &str,
        operation: Operation,
    ) -> Result<Value, GenerationError> {
        self.record("GET", path, None, credential, operation);
        self.next_json(operation)
    }

    async fn get_bytes(
        &self,
        credential: &Credential,
        uri: &str,
        operation: Operation,
    ) -> Result<AssetResponse, GenerationError> {
        self.record("GET", uri, None, credential, operation);
        self.assets
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GenerationError::upstream(operation, "no scripted asset"))
    }
}

/// Credential provider holding a fixed key, or none.
pub struct FixedCredentials(pub Option<Credential>);

#[async_trait]
impl CredentialProvider for FixedCredentials {
    async fn has_credential(&self) -> bool {
        self.0.is_some()
    }

    async fn select_credential(&self) {}

    async fn credential(&self) -> Option<Credential> {
        self.0.clone()
    }
}

/// A `generateContent` response with the given parts.
#[allow(dead_code)]
pub fn content_response(parts: Value) -> Value {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": parts } }]
    })
}
