//! One entry point for every generation stage
//!
//! Bundles the stage generators over a shared client and configuration:
//! - Summaries from a brief
//! - Full campaigns from summaries
//! - Single assets
//! - Google ads and ad groups

use crate::client::LLMClient;
use crate::error::Result;
use crate::generator::asset_generator::{AssetGenerator, AssetRequest};
use crate::generator::config::GeneratorConfig;
use crate::generator::details_generator::DetailsGenerator;
use crate::generator::google_generator::GoogleAdsGenerator;
use crate::generator::reconcile::ManualOverrides;
use crate::generator::summary_generator::SummaryGenerator;
use adplan_core::types::{Ad, AdGroup, CampaignSummary, Channel, FullCampaign};
use std::sync::Arc;

/// Campaign plan generator
pub struct PlanGenerator {
    summaries: SummaryGenerator,
    details: DetailsGenerator,
    assets: AssetGenerator,
    google: GoogleAdsGenerator,
    config: GeneratorConfig,
}

impl PlanGenerator {
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self {
            summaries: SummaryGenerator::new(client.clone(), config.clone()),
            details: DetailsGenerator::new(client.clone(), config.clone()),
            assets: AssetGenerator::new(client.clone(), config.clone()),
            google: GoogleAdsGenerator::new(client, config.clone()),
            config,
        }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Brief to campaign summaries
    pub async fn generate_summaries(
        &self,
        brief: &str,
        channels: &[Channel],
        overrides: Option<&ManualOverrides>,
    ) -> Result<Vec<CampaignSummary>> {
        self.summaries.generate(brief, channels, overrides).await
    }

    /// Summaries to full campaigns
    pub async fn generate_details(
        &self,
        brief: &str,
        summaries: &[CampaignSummary],
    ) -> Result<Vec<FullCampaign>> {
        self.details.generate(brief, summaries).await
    }

    /// One new or rewritten asset
    pub async fn generate_asset(&self, request: &AssetRequest<'_>) -> Result<String> {
        self.assets.generate(request).await
    }

    /// One new Google search ad
    pub async fn generate_google_ad(
        &self,
        brief: &str,
        campaign: &FullCampaign,
        ad_group: Option<&AdGroup>,
    ) -> Result<Ad> {
        self.google.generate_ad(brief, campaign, ad_group).await
    }

    /// One new Google ad group
    pub async fn generate_google_ad_group(
        &self,
        brief: &str,
        campaign: &FullCampaign,
    ) -> Result<AdGroup> {
        self.google.generate_ad_group(brief, campaign).await
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Update the configuration of every stage
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.summaries.set_config(config.clone());
        self.details.set_config(config.clone());
        self.assets.set_config(config.clone());
        self.google.set_config(config.clone());
        self.config = config;
    }
}
