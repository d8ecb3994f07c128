//! LLM response caching

use crate::client::{LLMRequest, LLMResponse};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Entries kept by [`InMemoryLLMCache::new`]
pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 256;

/// LLM cache trait
#[async_trait]
pub trait LLMCache: Send + Sync {
    /// Get a cached response
    async fn get(&self, request: &LLMRequest) -> Option<LLMResponse>;

    /// Store a response in cache
    async fn set(&self, request: LLMRequest, response: LLMResponse);

    /// Clear the cache
    async fn clear(&self);
}

/// In-memory LLM cache implementation
///
/// Holds at most `max_entries` responses; storing a new one when full
/// evicts the oldest.
pub struct InMemoryLLMCache {
    entries: DashMap<String, (u64, LLMResponse)>,
    max_entries: usize,
    next_seq: AtomicU64,
}

impl Default for InMemoryLLMCache {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_CACHE_ENTRIES)
    }
}

impl InMemoryLLMCache {
    /// Create a new in-memory cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `max_entries` responses (at least one)
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generate cache key from request
    ///
    /// Two requests share an entry only when model, sampling settings, system
    /// instruction, prompt and schema all match.
    fn cache_key(request: &LLMRequest) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}",
            request.model,
            request.max_tokens.unwrap_or(0),
            request.temperature.unwrap_or(0.0),
            request.system.as_deref().unwrap_or(""),
            request
                .response_schema
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            request.prompt,
        )
    }
}

#[async_trait]
impl LLMCache for InMemoryLLMCache {
    async fn get(&self, request: &LLMRequest) -> Option<LLMResponse> {
        let key = Self::cache_key(request);
        self.entries.get(&key).map(|entry| entry.value().1.clone())
    }

    async fn set(&self, request: LLMRequest, response: LLMResponse) {
        let key = Self::cache_key(&request);
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                // The iterator's shard locks must be released before removing
                let oldest = self
                    .entries
                    .iter()
                    .min_by_key(|entry| entry.value().0)
                    .map(|entry| entry.key().clone());
                match oldest {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                        tracing::debug!("LLM cache full, evicted oldest entry");
                    }
                    None => break,
                }
            }
        }
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(key, (seq, response));
    }

    async fn clear(&self) {
        self.entries.clear();
    }
}
