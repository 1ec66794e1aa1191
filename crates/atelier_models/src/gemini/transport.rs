//! HTTP seam between the generation client and the service.

use async_trait::async_trait;
use atelier_core::Credential;
use atelier_error::{GenerationError, Operation};
use atelier_interface::AssetResponse;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

/// Base URL of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Raw access to the Generative Language REST API.
///
/// Paths are relative to the API base (`models/x:predict`, `operations/y`);
/// asset URIs are absolute. Each method issues exactly one request.
#[async_trait]
pub trait GeminiTransport: Send + Sync {
    /// POST a JSON body and parse the JSON response.
    ///
    /// Non-success statuses fail with `Upstream("HTTP <code>: <body>")`.
    async fn post_json(
        &self,
        credential: &Credential,
        path: &str,
        body: Value,
        operation: Operation,
    ) -> Result<Value, GenerationError>;

    /// GET a JSON resource.
    async fn get_json(
        &self,
        credential: &Credential,
        path: &str,
        operation: Operation,
    ) -> Result<Value, GenerationError>;

    /// GET raw bytes from an absolute URI.
    ///
    /// The status is returned alongside the body without being judged.
    async fn get_bytes(
        &self,
        credential: &Credential,
        uri: &str,
        operation: Operation,
    ) -> Result<AssetResponse, GenerationError>;
}

/// [`GeminiTransport`] over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Transport against the public API endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Transport against a custom endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_json(
        response: reqwest::Response,
        operation: Operation,
    ) -> Result<Value, GenerationError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::upstream(
                operation,
                format!("HTTP {}: {}", status.as_u16(), body),
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            GenerationError::upstream(operation, format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl GeminiTransport for HttpTransport {
    #[instrument(skip(self, credential, body))]
    async fn post_json(
        &self,
        credential: &Credential,
        path: &str,
        body: Value,
        operation: Operation,
    ) -> Result<Value, GenerationError> {
        let url = self.url(path);
        debug!(url = %url, "Sending request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::upstream(operation, format!("Request failed: {}", e)))?;

        Self::read_json(response, operation).await
    }

    #[instrument(skip(self, credential))]
    async fn get_json(
        &self,
        credential: &Credential,
        path: &str,
        operation: Operation,
    ) -> Result<Value, GenerationError> {
        let url = self.url(path);
        debug!(url = %url, "Fetching resource");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, credential.expose())
            .send()
            .await
            .map_err(|e| GenerationError::upstream(operation, format!("Request failed: {}", e)))?;

        Self::read_json(response, operation).await
    }

    #[instrument(skip(self, credential))]
    async fn get_bytes(
        &self,
        credential: &Credential,
        uri: &str,
        operation: Operation,
    ) -> Result<AssetResponse, GenerationError> {
        let response = self
            .client
            .get(uri)
            .header(API_KEY_HEADER, credential.expose())
            .send()
            .await
            .map_err(|e| GenerationError::upstream(operation, format!("Request failed: {}", e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| GenerationError::upstream(operation, format!("Failed to read body: {}", e)))?;

        debug!(status = status.as_u16(), size = body.len(), "Fetched asset");
        Ok(AssetResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            content_type,
            body.to_vec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_paths_without_double_slashes() {
        let transport = HttpTransport::with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            transport.url("/models/veo:predictLongRunning"),
            "http://localhost:8080/v1beta/models/veo:predictLongRunning"
        );
    }
}
