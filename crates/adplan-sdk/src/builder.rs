//! Builder pattern for PlannerSession

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::library::AssetLibrary;
use crate::session::PlannerSession;
use adplan_llm::{
    ClientHandle, CredentialChain, InMemoryLLMCache, InMemoryStore, JsonFileStore, KeyValueStore,
    LLMClient, PlanGenerator,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for PlannerSession
///
/// # Example
///
/// ```rust,ignore
/// use adplan_sdk::{PlannerBuilder, PlannerConfig};
///
/// // From configuration files and ADPLAN_* variables
/// let session = PlannerBuilder::from_config(PlannerConfig::load()?).build()?;
///
/// // With a scripted provider (tests)
/// let session = PlannerBuilder::new()
///     .with_client(Arc::new(MockProvider::new()))
///     .build()?;
/// ```
pub struct PlannerBuilder {
    config: PlannerConfig,
    store: Option<Arc<dyn KeyValueStore>>,
    client: Option<Arc<dyn LLMClient>>,
    read_environment: bool,
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::from_config(PlannerConfig::default())
    }

    /// Start from a loaded configuration
    pub fn from_config(config: PlannerConfig) -> Self {
        Self {
            config,
            store: None,
            client: None,
            read_environment: true,
        }
    }

    /// Set the generation model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the ambient API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Persist keys and the asset library in a JSON file
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = Some(path.into());
        self
    }

    /// Use a custom key-value store
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use an already built provider client
    pub fn with_client(mut self, client: Arc<dyn LLMClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Enable the response cache
    pub fn enable_cache(mut self, enable: bool) -> Self {
        self.config.enable_cache = enable;
        self
    }

    /// Ignore `GEMINI_API_KEY` / `API_KEY` from the environment
    pub fn without_environment(mut self) -> Self {
        self.read_environment = false;
        self
    }

    /// Build the session
    pub fn build(self) -> Result<PlannerSession> {
        self.config.validate()?;

        let store: Arc<dyn KeyValueStore> = match (self.store, &self.config.store_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(JsonFileStore::new(path.clone())),
            (None, None) => Arc::new(InMemoryStore::new()),
        };

        let mut chain = CredentialChain::new().with_store(store.clone());
        if let Some(key) = &self.config.api_key {
            chain = chain.with_ambient_key(key.clone());
        }
        if !self.read_environment {
            chain = chain.without_environment();
        }

        let mut handle = ClientHandle::new(chain);
        if self.config.enable_cache {
            handle = handle.with_cache(Arc::new(InMemoryLLMCache::default()));
        }
        if let Some(client) = self.client {
            handle = handle.with_built_client(client);
        }
        let handle = Arc::new(handle);

        let generator = PlanGenerator::new(handle.clone(), self.config.generator_config());
        tracing::debug!("Planner built with model {}", self.config.model);

        Ok(PlannerSession::new(generator, handle, AssetLibrary::new(store)))
    }
}
