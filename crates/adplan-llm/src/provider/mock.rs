//! Mock LLM provider for testing
//!
//! Replies come from a FIFO script of responses and failures; once the script
//! runs dry the default response is returned. Every request is recorded so tests
//! can assert on the composed prompts and schemas.

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mock LLM provider for testing
pub struct MockProvider {
    name: String,
    default_response: String,
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<LLMRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            default_response: "Mock LLM response".to_string(),
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create with custom default response
    pub fn with_response(response: String) -> Self {
        Self {
            default_response: response,
            ..Self::new()
        }
    }

    /// Create with a script of responses, returned in order
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        for response in responses {
            provider.queue_response(response);
        }
        provider
    }

    /// Queue a response for a later call
    pub fn queue_response(&self, response: impl Into<String>) {
        lock(&self.script).push_back(Ok(response.into()));
    }

    /// Queue an API failure for a later call
    pub fn queue_failure(&self, message: impl Into<String>) {
        lock(&self.script).push_back(Err(message.into()));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<LLMRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<LLMRequest> {
        lock(&self.requests).last().cloned()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        let model = request.model.clone();
        lock(&self.requests).push(request);

        let scripted = lock(&self.script).pop_front();
        let content = match scripted {
            Some(Ok(content)) => content,
            Some(Err(message)) => return Err(LLMError::ApiCallFailed(message)),
            None => self.default_response.clone(),
        };

        Ok(LLMResponse::new(content, model)
            .with_tokens(10)
            .with_finish_reason("stop".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LLMProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> LLMRequest {
        LLMRequest::new(prompt.to_string(), "mock-model".to_string())
    }

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockProvider::new();
        let response = provider.call(request("Test")).await.unwrap();
        assert_eq!(response.content, "Mock LLM response");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_script() {
        let provider = MockProvider::with_responses(["first", "second"]);
        provider.queue_failure("quota exceeded");

        assert_eq!(provider.call(request("a")).await.unwrap().content, "first");
        assert_eq!(provider.call(request("b")).await.unwrap().content, "second");
        let err = provider.call(request("c")).await.unwrap_err();
        assert!(matches!(err, LLMError::ApiCallFailed(ref m) if m == "quota exceeded"));
        assert_eq!(provider.call(request("d")).await.unwrap().content, "Mock LLM response");

        let prompts: Vec<String> = provider.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["a", "b", "c", "d"]);
        assert_eq!(provider.last_request().unwrap().prompt, "d");
    }
}
