//! Credential providers.

use async_trait::async_trait;
use atelier_core::Credential;
use atelier_interface::CredentialProvider;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Reads the API key from an environment variable.
///
/// The key is read once at construction and again on
/// [`select_credential`](CredentialProvider::select_credential), so a key
/// exported after startup is picked up when the user asks for it.
#[derive(Debug)]
pub struct EnvCredentialProvider {
    var: String,
    key: RwLock<Option<Credential>>,
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(API_KEY_VAR)
    }
}

impl EnvCredentialProvider {
    /// Provider reading `var`.
    pub fn new(var: impl Into<String>) -> Self {
        let var = var.into();
        let key = Self::read(&var);
        Self {
            var,
            key: RwLock::new(key),
        }
    }

    fn read(var: &str) -> Option<Credential> {
        std::env::var(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Credential::new)
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn has_credential(&self) -> bool {
        self.key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    async fn select_credential(&self) {
        let key = Self::read(&self.var);
        if key.is_some() {
            debug!(var = %self.var, "API key selected");
        } else {
            warn!(var = %self.var, "API key not set");
        }
        *self.key.write().unwrap_or_else(PoisonError::into_inner) = key;
    }

    async fn credential(&self) -> Option<Credential> {
        self.key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
