//! JSON extraction utilities for cleaning LLM responses

use crate::error::{LLMError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)\A```[A-Za-z]*[ \t]*\r?\n?(.*?)\s*```\z").expect("fence pattern is valid")
    })
}

/// Remove one surrounding markdown code fence (```json ... ```), if any
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match fence_pattern().captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

/// Parse the JSON document in an LLM response
///
/// Handles surrounding whitespace and an optional markdown fence.
///
/// # Returns
/// * `Ok(Value)` - Parsed JSON
/// * `Err(LLMError::InvalidResponse)` - Empty or unparsable content
pub fn extract_json(llm_output: &str) -> Result<Value> {
    let content = strip_code_fence(llm_output);

    if content.is_empty() {
        return Err(LLMError::InvalidResponse(
            "Received an empty response from the model".to_string(),
        ));
    }

    serde_json::from_str(content)
        .map_err(|e| LLMError::InvalidResponse(format!("Invalid JSON: {}", e)))
}
