//! Tracing setup

use crate::config::PlannerConfig;
use crate::error::{Result, SdkError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!("adplan_sdk={level},adplan_llm={level},adplan_core={level}")
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level. Fails if a subscriber is
/// already installed.
pub fn init_tracing(config: &PlannerConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json_logs {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    result.map_err(|e| SdkError::ConfigError(format!("Failed to initialize tracing: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(
            default_filter("debug"),
            "adplan_sdk=debug,adplan_llm=debug,adplan_core=debug"
        );
    }
}
