//! SDK error types

use adplan_core::CoreError;
use adplan_llm::LLMError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generation or credential error
    #[error(transparent)]
    Llm(#[from] LLMError),

    /// Plan edit error
    #[error("Plan edit failed: {0}")]
    Core(#[from] CoreError),

    /// Operation not allowed in the current stage
    #[error("'{operation}' is not available in the {stage} stage")]
    InvalidStage {
        operation: &'static str,
        stage: &'static str,
    },

    /// Unknown campaign id
    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic SDK error
    #[error("SDK error: {0}")]
    GenericError(String),
}

impl SdkError {
    /// Whether the error comes from a missing or invalid credential
    pub fn is_configuration(&self) -> bool {
        match self {
            SdkError::ConfigError(_) => true,
            SdkError::Llm(e) => e.is_configuration(),
            _ => false,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
