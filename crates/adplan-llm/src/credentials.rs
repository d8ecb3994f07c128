//! API credential resolution and local key-value storage
//!
//! The Gemini key is resolved from, in order: the client already built by a
//! [`ClientHandle`], the local store (`GEMINI_API_KEY`, then the legacy
//! `gemini_api_key`), an explicitly configured ambient key, and finally the
//! environment (`GEMINI_API_KEY` baked in at build time, then `GEMINI_API_KEY` /
//! `API_KEY` at run time).

use crate::cache::LLMCache;
use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use crate::provider::GeminiProvider;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Store key of the persisted API key
pub const API_KEY_STORE_KEY: &str = "GEMINI_API_KEY";

/// Legacy store key, read when the primary one is absent
pub const LEGACY_API_KEY_STORE_KEY: &str = "gemini_api_key";

const ENV_KEYS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const MISSING_KEY_MESSAGE: &str =
    "Missing Gemini API key. Set GEMINI_API_KEY or store a key with the planner before generating.";

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    fn set_string(&self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store
#[derive(Default)]
pub struct InMemoryStore {
    entries: DashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// A missing file reads as empty. Writes rewrite the whole file.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(LLMError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(LLMError::Storage(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_all()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LLMError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(entries))?;
        std::fs::write(&self.path, text).map_err(|e| {
            LLMError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

/// Where a resolved key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Store,
    Ambient,
    Environment,
}

/// Prioritized API key lookup
#[derive(Clone)]
pub struct CredentialChain {
    store: Option<Arc<dyn KeyValueStore>>,
    ambient_key: Option<String>,
    read_environment: bool,
}

impl Default for CredentialChain {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CredentialChain {
    pub fn new() -> Self {
        Self {
            store: None,
            ambient_key: None,
            read_environment: true,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_ambient_key(mut self, key: impl Into<String>) -> Self {
        self.ambient_key = non_empty(Some(key.into()));
        self
    }

    /// Skip the environment lookups
    pub fn without_environment(mut self) -> Self {
        self.read_environment = false;
        self
    }

    pub fn store(&self) -> Option<&Arc<dyn KeyValueStore>> {
        self.store.as_ref()
    }

    /// Resolve a key, `None` when no source has one
    ///
    /// Store read failures are logged and skipped.
    pub fn resolve(&self) -> Option<(String, KeySource)> {
        if let Some(store) = &self.store {
            for store_key in [API_KEY_STORE_KEY, LEGACY_API_KEY_STORE_KEY] {
                match store.get_string(store_key) {
                    Ok(value) => {
                        if let Some(key) = non_empty(value) {
                            return Some((key, KeySource::Store));
                        }
                    }
                    Err(e) => tracing::warn!("Credential store lookup failed: {}", e),
                }
            }
        }

        if let Some(key) = &self.ambient_key {
            return Some((key.clone(), KeySource::Ambient));
        }

        if self.read_environment {
            if let Some(key) = non_empty(option_env!("GEMINI_API_KEY").map(str::to_string)) {
                return Some((key, KeySource::Environment));
            }
            for name in ENV_KEYS {
                if let Some(key) = non_empty(std::env::var(name).ok()) {
                    return Some((key, KeySource::Environment));
                }
            }
        }

        None
    }

    /// Resolve a key or fail with a configuration error
    pub fn require(&self) -> Result<String> {
        self.resolve()
            .map(|(key, _)| key)
            .ok_or_else(|| LLMError::Configuration(MISSING_KEY_MESSAGE.to_string()))
    }

    /// Persist a key under the primary store key
    pub fn persist_key(&self, key: &str) -> Result<()> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| LLMError::Configuration("No key-value store configured".to_string()))?;
        store.set_string(API_KEY_STORE_KEY, key.trim())
    }
}

/// Explicit, shareable handle to the generation provider
///
/// Builds a [`GeminiProvider`] from the credential chain on first use and keeps
/// it for later calls. Calls made without a resolvable key fail with
/// [`LLMError::Configuration`] before anything is sent.
pub struct ClientHandle {
    chain: CredentialChain,
    cache: Option<Arc<dyn LLMCache>>,
    client: Mutex<Option<Arc<dyn LLMClient>>>,
}

impl ClientHandle {
    pub fn new(chain: CredentialChain) -> Self {
        Self {
            chain,
            cache: None,
            client: Mutex::new(None),
        }
    }

    /// Use an already built client (mock providers, custom endpoints)
    pub fn with_client(client: Arc<dyn LLMClient>) -> Self {
        Self {
            chain: CredentialChain::new().without_environment(),
            cache: None,
            client: Mutex::new(Some(client)),
        }
    }

    /// Seed the handle with a built client, keeping the chain for later keys
    pub fn with_built_client(mut self, client: Arc<dyn LLMClient>) -> Self {
        self.client = Mutex::new(Some(client));
        self
    }

    /// Attach a response cache to providers built by this handle
    pub fn with_cache(mut self, cache: Arc<dyn LLMCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn chain(&self) -> &CredentialChain {
        &self.chain
    }

    /// Whether a call would find a client
    pub fn is_configured(&self) -> bool {
        self.cached().is_some() || self.chain.resolve().is_some()
    }

    /// Persist a new key and drop the cached client
    pub fn set_api_key(&self, key: &str) -> Result<()> {
        self.chain.persist_key(key)?;
        *self.client.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn cached(&self) -> Option<Arc<dyn LLMClient>> {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The cached client, building it on first use
    pub fn client(&self) -> Result<Arc<dyn LLMClient>> {
        let mut slot = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let (key, source) = self
            .chain
            .resolve()
            .ok_or_else(|| LLMError::Configuration(MISSING_KEY_MESSAGE.to_string()))?;
        tracing::info!("Gemini client initialized from {:?} key", source);

        let provider = match &self.cache {
            Some(cache) => GeminiProvider::with_cache(key, cache.clone()),
            None => GeminiProvider::new(key),
        };
        let client: Arc<dyn LLMClient> = Arc::new(provider);
        *slot = Some(client.clone());
        Ok(client)
    }
}

#[async_trait]
impl LLMClient for ClientHandle {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        let client = self.client()?;
        client.call(request).await
    }

    fn name(&self) -> &str {
        "client-handle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;

    fn store_with(entries: &[(&str, &str)]) -> Arc<dyn KeyValueStore> {
        let store = InMemoryStore::new();
        for (k, v) in entries {
            store.set_string(k, v).unwrap();
        }
        Arc::new(store)
    }

    #[test]
    fn test_store_key_wins_over_ambient() {
        let chain = CredentialChain::new()
            .without_environment()
            .with_store(store_with(&[(LEGACY_API_KEY_STORE_KEY, " legacy ")]))
            .with_ambient_key("ambient");

        assert_eq!(
            chain.resolve(),
            Some(("legacy".to_string(), KeySource::Store))
        );
    }

    #[test]
    fn test_primary_store_key_before_legacy() {
        let chain = CredentialChain::new().without_environment().with_store(store_with(&[
            (LEGACY_API_KEY_STORE_KEY, "legacy"),
            (API_KEY_STORE_KEY, "primary"),
        ]));
        assert_eq!(chain.require().unwrap(), "primary");
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let chain = CredentialChain::new()
            .without_environment()
            .with_store(store_with(&[(API_KEY_STORE_KEY, "   ")]))
            .with_ambient_key("ambient");
        assert_eq!(chain.resolve().unwrap().1, KeySource::Ambient);
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let chain = CredentialChain::new().without_environment();
        let err = chain.require().unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_handle_without_key_fails_before_call() {
        let handle = ClientHandle::new(CredentialChain::new().without_environment());
        assert!(!handle.is_configured());

        let err = handle
            .call(LLMRequest::new("x".to_string(), "m".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_handle_with_client_delegates() {
        let mock = Arc::new(MockProvider::with_response("hello".to_string()));
        let handle = ClientHandle::with_client(mock.clone());
        assert!(handle.is_configured());

        let response = handle
            .call(LLMRequest::new("x".to_string(), "m".to_string()))
            .await
            .unwrap();
        assert_eq!(response.content, "hello");
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_handle_caches_built_client() {
        let handle = ClientHandle::new(
            CredentialChain::new()
                .without_environment()
                .with_ambient_key("k"),
        );
        let first = handle.client().unwrap();
        let second = handle.client().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_set_api_key_persists() {
        let store = store_with(&[]);
        let handle = ClientHandle::new(
            CredentialChain::new()
                .without_environment()
                .with_store(store.clone()),
        );
        assert!(!handle.is_configured());

        handle.set_api_key(" new-key ").unwrap();
        assert!(handle.is_configured());
        assert_eq!(
            store.get_string(API_KEY_STORE_KEY).unwrap().as_deref(),
            Some("new-key")
        );
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("store.json"));

        assert_eq!(store.get_string(API_KEY_STORE_KEY).unwrap(), None);
        store.set_string(API_KEY_STORE_KEY, "abc").unwrap();
        store.set_string("adplan_asset_library", "{}").unwrap();

        let reopened = JsonFileStore::new(store.path().to_path_buf());
        assert_eq!(
            reopened.get_string(API_KEY_STORE_KEY).unwrap().as_deref(),
            Some("abc")
        );
        assert_eq!(
            reopened.get_string("adplan_asset_library").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn test_json_file_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.get_string("k"),
            Err(LLMError::Storage(_))
        ));
    }
}
