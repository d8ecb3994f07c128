//! Error types for AdPlan LLM module

use std::fmt;
use thiserror::Error;

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Generation stage that issued a provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Brief to campaign summaries
    Summary,
    /// Summaries to full campaigns
    Details,
    /// Single free-text asset
    Asset,
    /// One new Google search ad
    GoogleAd,
    /// One new Google ad group
    GoogleAdGroup,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Summary => "summary",
            Stage::Details => "details",
            Stage::Asset => "asset",
            Stage::GoogleAd => "google ad",
            Stage::GoogleAdGroup => "google ad group",
        }
    }

    /// Whether a response may be served from the cache
    ///
    /// Stages that add one new item must reach the model on every call,
    /// otherwise a repeated request returns the same item again.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Stage::Summary | Stage::Details)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LLM module errors
#[derive(Debug, Error)]
pub enum LLMError {
    /// No usable credential or invalid setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A generation stage produced no usable result
    #[error("Failed to generate {stage}: {message}")]
    GenerationFailed { stage: Stage, message: String },

    /// External API call failed
    #[error("External API call failed: {0}")]
    ApiCallFailed(String),

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LLMError {
    /// Build a generation failure for a stage
    pub fn generation(stage: Stage, message: impl Into<String>) -> Self {
        LLMError::GenerationFailed {
            stage,
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, LLMError::Configuration(_))
    }

    pub fn is_generation_failure(&self) -> bool {
        matches!(self, LLMError::GenerationFailed { .. })
    }

    /// Attribute an error to the stage that issued the call
    ///
    /// Configuration errors and existing generation failures pass through.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            LLMError::Configuration(_) | LLMError::GenerationFailed { .. } => self,
            other => LLMError::generation(stage, other.to_string()),
        }
    }
}

impl From<String> for LLMError {
    fn from(s: String) -> Self {
        LLMError::Other(s)
    }
}

impl From<&str> for LLMError {
    fn from(s: &str) -> Self {
        LLMError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_stage_wraps_provider_errors() {
        let err = LLMError::ApiCallFailed("status 500".into()).in_stage(Stage::Details);
        assert!(err.is_generation_failure());
        assert_eq!(
            err.to_string(),
            "Failed to generate details: External API call failed: status 500"
        );
    }

    #[test]
    fn test_in_stage_keeps_configuration() {
        let err = LLMError::Configuration("missing key".into()).in_stage(Stage::Summary);
        assert!(err.is_configuration());
        assert!(!err.is_generation_failure());
    }

    #[test]
    fn test_in_stage_keeps_original_stage() {
        let err = LLMError::generation(Stage::GoogleAdGroup, "empty").in_stage(Stage::Details);
        match err {
            LLMError::GenerationFailed { stage, .. } => assert_eq!(stage, Stage::GoogleAdGroup),
            other => panic!("Expected GenerationFailed, got {:?}", other),
        }
    }
}
