//! Generator configuration

use crate::provider::DEFAULT_GEMINI_MODEL;

/// Configuration shared by the generation stages
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Model to use for generation (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Maximum tokens for response
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 1.0, lower = more deterministic)
    pub temperature: Option<f32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
