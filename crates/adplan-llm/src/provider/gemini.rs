//! Google Gemini provider implementation

use crate::cache::LLMCache;
use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;

/// Model used when none is configured
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    cache: Option<Arc<dyn LLMCache>>,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            cache: None,
            client: Client::new(),
        }
    }

    /// Create with cache
    pub fn with_cache(api_key: String, cache: Arc<dyn LLMCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Self::new(api_key)
        }
    }

    /// Point at a different endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Cache consulted for this request, if any
    fn cache_for(&self, request: &LLMRequest) -> Option<&Arc<dyn LLMCache>> {
        if request.skip_cache {
            return None;
        }
        self.cache.as_ref()
    }

    /// Build the `generateContent` request body
    fn request_body(request: &LLMRequest) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
        });

        if let Some(system) = &request.system {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        let mut generation_config = serde_json::Map::new();
        if let Some(max_tokens) = request.max_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }
        if let Some(temperature) = request.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(schema) = &request.response_schema {
            generation_config.insert("responseMimeType".to_string(), json!("application/json"));
            generation_config.insert("responseSchema".to_string(), schema.clone());
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        body
    }

    /// Extract the candidate text, joining multi-part answers
    fn candidate_text(resp_json: &Value) -> Result<String> {
        let parts = resp_json["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| LLMError::InvalidResponse("No content in response".to_string()))?;

        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        if text.is_empty() {
            return Err(LLMError::InvalidResponse("No text in response parts".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl LLMClient for GeminiProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        // Check cache first
        if let Some(cache) = self.cache_for(&request) {
            if let Some(cached) = cache.get(&request).await {
                tracing::debug!("Gemini cache hit for model {}", request.model);
                return Ok(cached);
            }
        }

        let body = Self::request_body(&request);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, request.model, self.api_key
        );

        tracing::debug!(
            "Calling Gemini model {} (prompt {} chars, json: {})",
            request.model,
            request.prompt.len(),
            request.expects_json()
        );

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::ApiCallFailed(format!("Gemini API call failed: {}", e)))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| LLMError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LLMError::ApiCallFailed(format!(
                "Gemini API error ({}): {}",
                status, resp_text
            )));
        }

        let resp_json: Value = serde_json::from_str(&resp_text)
            .map_err(|e| LLMError::ApiCallFailed(format!("Failed to parse response: {}", e)))?;

        let content = Self::candidate_text(&resp_json)?;

        let finish_reason = resp_json["candidates"][0]["finishReason"]
            .as_str()
            .unwrap_or("STOP")
            .to_string();

        let tokens_used = resp_json["usageMetadata"]["totalTokenCount"]
            .as_u64()
            .unwrap_or(0) as u32;

        let response = LLMResponse::new(content, request.model.clone())
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason);

        if let Some(cache) = self.cache_for(&request) {
            cache.set(request, response.clone()).await;
        }

        Ok(response)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

impl LLMProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "Gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_with_schema() {
        let request = LLMRequest::new("Plan it".to_string(), DEFAULT_GEMINI_MODEL.to_string())
            .with_system("Strategist".to_string())
            .with_temperature(0.4)
            .with_schema(json!({ "type": "ARRAY", "items": { "type": "OBJECT" } }));

        let body = GeminiProvider::request_body(&request);

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan it");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Strategist");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(body["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_request_body_free_text() {
        let request = LLMRequest::new("One headline".to_string(), DEFAULT_GEMINI_MODEL.to_string());
        let body = GeminiProvider::request_body(&request);

        assert!(body.get("systemInstruction").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let resp = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"id\":" }, { "text": "\"c1\"}]" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(GeminiProvider::candidate_text(&resp).unwrap(), "[{\"id\":\"c1\"}]");
    }

    #[test]
    fn test_candidate_text_missing() {
        let resp = json!({ "candidates": [] });
        assert!(matches!(
            GeminiProvider::candidate_text(&resp),
            Err(LLMError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_skip_cache_goes_to_the_provider() {
        let cache = Arc::new(crate::cache::InMemoryLLMCache::new());
        // Nothing listens on the discard port, so a real call fails fast
        let provider = GeminiProvider::with_cache("key".to_string(), cache.clone())
            .with_base_url("http://127.0.0.1:9");
        let request = LLMRequest::new("One headline".to_string(), DEFAULT_GEMINI_MODEL.to_string());
        cache
            .set(
                request.clone(),
                LLMResponse::new("Sea View".to_string(), DEFAULT_GEMINI_MODEL.to_string()),
            )
            .await;

        let cached = provider.call(request.clone()).await.unwrap();
        assert_eq!(cached.content, "Sea View");

        let err = provider.call(request.without_cache()).await.unwrap_err();
        assert!(matches!(err, LLMError::ApiCallFailed(_)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let provider = GeminiProvider::new("key".to_string()).with_base_url("http://localhost:8080/");
        assert_eq!(provider.base_url, "http://localhost:8080");
        assert_eq!(provider.provider_name(), "Gemini");
    }
}
