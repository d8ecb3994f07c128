//! Campaign summary generation from a creative brief

use crate::client::{LLMClient, LLMResponse};
use crate::error::{LLMError, Result, Stage};
use crate::generator::composer::compose_summary;
use crate::generator::config::GeneratorConfig;
use crate::generator::pipeline;
use crate::generator::reconcile::{reconcile_summaries, ManualOverrides};
use adplan_core::types::{CampaignSummary, Channel};
use std::sync::Arc;

/// Summary generator using LLM
pub struct SummaryGenerator {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl SummaryGenerator {
    /// Create a new summary generator
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Generate campaign summaries from a brief
    ///
    /// # Arguments
    /// * `brief` - Free-text creative brief
    /// * `channels` - Channels to plan for; empty means all channels
    /// * `overrides` - Hand-picked markets and types, authoritative when active
    ///
    /// # Returns
    /// * `Ok(Vec<CampaignSummary>)` - Summaries with unique ids and one language each
    /// * `Err(LLMError)` - Configuration error or `GenerationFailed` for the summary stage
    ///
    /// # Example
    /// ```no_run
    /// use adplan_llm::{MockProvider, SummaryGenerator};
    /// use adplan_core::Channel;
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> adplan_llm::Result<()> {
    /// let provider = Arc::new(MockProvider::new());
    /// let generator = SummaryGenerator::with_defaults(provider);
    ///
    /// let summaries = generator
    ///     .generate("Launch our spa package in France", &[Channel::Google], None)
    ///     .await?;
    /// println!("{} campaigns", summaries.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(
        &self,
        brief: &str,
        channels: &[Channel],
        overrides: Option<&ManualOverrides>,
    ) -> Result<Vec<CampaignSummary>> {
        let (summaries, _) = self.generate_with_metadata(brief, channels, overrides).await?;
        Ok(summaries)
    }

    /// Generate summaries and return the raw LLM response alongside
    pub async fn generate_with_metadata(
        &self,
        brief: &str,
        channels: &[Channel],
        overrides: Option<&ManualOverrides>,
    ) -> Result<(Vec<CampaignSummary>, LLMResponse)> {
        if brief.trim().is_empty() {
            return Err(LLMError::generation(Stage::Summary, "brief is empty"));
        }
        let channels: &[Channel] = if channels.is_empty() {
            &Channel::ALL
        } else {
            channels
        };

        let composed = compose_summary(brief, channels, overrides);
        let (summaries, response): (Vec<CampaignSummary>, _) =
            pipeline::request_structured(self.client.as_ref(), &self.config, &composed).await?;

        let summaries = match overrides.filter(|o| o.is_active()) {
            Some(overrides) => reconcile_summaries(summaries, overrides, channels),
            None => summaries,
        };

        if summaries.is_empty() {
            return Err(LLMError::generation(Stage::Summary, "model returned no campaigns"));
        }

        tracing::info!("Generated {} campaign summaries", summaries.len());
        Ok((summaries, response))
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Update the configuration
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }
}
