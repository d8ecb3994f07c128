//! AdPlan LLM Integration
//!
//! This crate turns a free-text creative brief into a multi-channel campaign
//! plan through a text-generation provider:
//! - Plan generation: summaries, full campaigns, single assets, Google helpers
//! - Credentials: key resolution and the lazily built provider client
//! - Providers: Gemini over HTTP and a scripted mock for tests
//!
//! Every stage is a single request/response call. Failures surface as
//! [`LLMError`] and are never retried here.

// Re-export core types
pub use cache::{InMemoryLLMCache, LLMCache};
pub use client::{LLMClient, LLMRequest, LLMResponse};
pub use credentials::{ClientHandle, CredentialChain, InMemoryStore, JsonFileStore, KeySource, KeyValueStore};
pub use error::{LLMError, Result, Stage};

// Re-export providers
pub use provider::{GeminiProvider, LLMProvider, MockProvider, DEFAULT_GEMINI_MODEL};

// Re-export generators
pub use generator::{
    AssetGenerator, AssetRequest, AssetType, DetailsGenerator, GeneratorConfig,
    GoogleAdsGenerator, ManualOverrides, PlanGenerator, SummaryGenerator,
};

pub mod cache;
pub mod client;
pub mod credentials;
pub mod error;
pub mod generator;
pub mod provider;
