//! Structured call pipeline
//!
//! Every schema-bound stage runs the same steps on the provider reply:
//! fence strip, JSON parse, id repair, schema validation, typed decode. Any
//! failure along the way becomes a [`LLMError::GenerationFailed`] for the stage.

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result, Stage};
use crate::generator::composer::ComposedPrompt;
use crate::generator::config::GeneratorConfig;
use crate::generator::ids::assign_missing_ids;
use crate::generator::json_extractor::extract_json;
use adplan_core::types::Validator;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Build the provider request for a composed prompt
pub fn build_request(config: &GeneratorConfig, composed: &ComposedPrompt) -> LLMRequest {
    let mut request = LLMRequest::new(composed.prompt.clone(), config.model.clone())
        .with_system(composed.system.clone());
    if let Some(max_tokens) = config.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = config.temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(schema) = composed.provider_schema() {
        request = request.with_schema(schema);
    }
    if !composed.stage.is_cacheable() {
        request = request.without_cache();
    }
    request
}

/// Issue the call, attributing provider errors to the stage
pub async fn call(
    client: &dyn LLMClient,
    config: &GeneratorConfig,
    composed: &ComposedPrompt,
) -> Result<LLMResponse> {
    let request = build_request(config, composed);
    tracing::debug!(
        "Calling {} for {} (model {})",
        client.name(),
        composed.stage,
        request.model
    );
    client
        .call(request)
        .await
        .map_err(|e| e.in_stage(composed.stage))
}

/// Turn a raw reply into a schema-conformant JSON value
pub fn conform(stage: Stage, content: &str, composed: &ComposedPrompt) -> Result<Value> {
    let mut value = extract_json(content).map_err(|e| e.in_stage(stage))?;

    let Some(schema) = composed.schema.as_ref() else {
        return Ok(value);
    };

    let assigned = assign_missing_ids(&mut value, schema);
    if assigned > 0 {
        tracing::debug!("Assigned {} missing id(s) in {} response", assigned, stage);
    }

    Validator::new()
        .allow_unknown_fields(true)
        .validate_type(&value, schema)
        .map_err(|errors| {
            let details = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            LLMError::generation(stage, format!("response does not match schema: {}", details))
        })?;

    Ok(value)
}

/// Decode a conformant value into its typed form
pub fn decode<T: DeserializeOwned>(stage: Stage, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| LLMError::generation(stage, e.to_string()))
}

/// Call, conform and decode in one go, keeping the raw response
pub async fn request_structured<T: DeserializeOwned>(
    client: &dyn LLMClient,
    config: &GeneratorConfig,
    composed: &ComposedPrompt,
) -> Result<(T, LLMResponse)> {
    let response = call(client, config, composed).await?;
    let value = conform(composed.stage, &response.content, composed)?;
    Ok((decode(composed.stage, value)?, response))
}

/// Call a free-text stage and return the trimmed reply
pub async fn request_text(
    client: &dyn LLMClient,
    config: &GeneratorConfig,
    composed: &ComposedPrompt,
) -> Result<String> {
    let response = call(client, config, composed).await?;
    Ok(response.content.trim().to_string())
}
