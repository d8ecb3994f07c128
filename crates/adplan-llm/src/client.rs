//! LLM client interface and types

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to an LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LLMRequest {
    /// The prompt to send to the LLM
    pub prompt: String,

    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Temperature for sampling (0.0 - 1.0)
    pub temperature: Option<f32>,

    /// System instruction
    pub system: Option<String>,

    /// Structured-output schema; when set the provider is asked for JSON
    pub response_schema: Option<Value>,

    /// Always call the provider and keep the answer out of any cache
    #[serde(default)]
    pub skip_cache: bool,
}

impl LLMRequest {
    /// Create a new LLM request
    pub fn new(prompt: String, model: String) -> Self {
        Self {
            prompt,
            model,
            max_tokens: None,
            temperature: None,
            system: None,
            response_schema: None,
            skip_cache: false,
        }
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set system instruction
    pub fn with_system(mut self, system: String) -> Self {
        self.system = Some(system);
        self
    }

    /// Request JSON output matching a provider-format schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Bypass the response cache for this request
    pub fn without_cache(mut self) -> Self {
        self.skip_cache = true;
        self
    }

    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// Response from an LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LLMResponse {
    /// The generated text
    pub content: String,

    /// Model that generated the response
    pub model: String,

    /// Number of tokens used
    pub tokens_used: u32,

    /// Finish reason (e.g., "STOP", "MAX_TOKENS")
    pub finish_reason: String,
}

impl LLMResponse {
    /// Create a new LLM response
    pub fn new(content: String, model: String) -> Self {
        Self {
            content,
            model,
            tokens_used: 0,
            finish_reason: "stop".to_string(),
        }
    }

    /// Set tokens used
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens_used = tokens;
        self
    }

    /// Set finish reason
    pub fn with_finish_reason(mut self, reason: String) -> Self {
        self.finish_reason = reason;
        self
    }
}

/// Async LLM client trait
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Call the LLM with a request
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse>;

    /// Get the name of this client
    fn name(&self) -> &str;
}
