//! Planner configuration

use crate::error::{Result, SdkError};
use adplan_llm::{GeneratorConfig, DEFAULT_GEMINI_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Generation model
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (0.0 - 2.0)
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum tokens per response
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Ambient API key, used when no key is persisted
    #[serde(default)]
    pub api_key: Option<String>,

    /// JSON file backing the key-value store; in-memory when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Cache identical provider requests
    #[serde(default)]
    pub enable_cache: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: None,
            max_tokens: None,
            api_key: None,
            store_path: None,
            enable_cache: false,
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Reads `.env` if present, then `config/adplan.*` and `ADPLAN_*`
    /// variables. Falls back to defaults when nothing is found.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/adplan").required(false))
            .add_source(config::Environment::with_prefix("ADPLAN"))
            .build();

        match config_result {
            Ok(cfg) => Self::deserialize_checked(cfg),
            Err(e) => {
                tracing::info!("No usable config source ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from one file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()
            .map_err(|e| SdkError::ConfigError(format!("Failed to read config: {}", e)))?;
        Self::deserialize_checked(cfg)
    }

    fn deserialize_checked(cfg: config::Config) -> Result<Self> {
        let loaded: Self = cfg
            .try_deserialize()
            .map_err(|e| SdkError::ConfigError(format!("Failed to deserialize config: {}", e)))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(SdkError::ConfigError("model must not be empty".to_string()));
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(SdkError::ConfigError(format!(
                    "temperature {} is outside 0.0 - 2.0",
                    temperature
                )));
            }
        }
        if self.max_tokens == Some(0) {
            return Err(SdkError::ConfigError("max_tokens must be positive".to_string()));
        }
        Ok(())
    }

    /// Settings for the generation stages
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut generator = GeneratorConfig::new(self.model.clone());
        if let Some(max_tokens) = self.max_tokens {
            generator = generator.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            generator = generator.with_temperature(temperature);
        }
        generator
    }
}
