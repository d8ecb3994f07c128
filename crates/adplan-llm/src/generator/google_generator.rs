//! Google search helpers: one new ad, one new ad group

use crate::client::LLMClient;
use crate::error::Result;
use crate::generator::composer::{compose_google_ad, compose_google_ad_group};
use crate::generator::config::GeneratorConfig;
use crate::generator::pipeline;
use adplan_core::types::{Ad, AdGroup, AssignmentTarget, FullCampaign};
use std::sync::Arc;

/// Generator for individual Google search structures
pub struct GoogleAdsGenerator {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl GoogleAdsGenerator {
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Generate one responsive search ad
    ///
    /// With `ad_group` the ad comes back already assigned to that group.
    pub async fn generate_ad(
        &self,
        brief: &str,
        campaign: &FullCampaign,
        ad_group: Option<&AdGroup>,
    ) -> Result<Ad> {
        let composed = compose_google_ad(brief, campaign, ad_group);
        let (mut ad, _): (Ad, _) =
            pipeline::request_structured(self.client.as_ref(), &self.config, &composed).await?;

        let groups: Vec<(String, String)> = campaign
            .google_ads
            .iter()
            .flat_map(|g| g.ad_groups())
            .map(|g| (g.id.clone(), g.name.clone()))
            .collect();
        ad.normalize_assignments(|id| {
            groups
                .iter()
                .find(|(group_id, _)| group_id == id)
                .map(|(_, name)| name.clone())
        });

        if let Some(group) = ad_group {
            ad.assign_to(AssignmentTarget::plan(group.id.as_str()).with_ad_group_name(group.name.as_str()));
        }

        tracing::debug!("Generated ad {} for campaign {}", ad.id, campaign.id);
        Ok(ad)
    }

    /// Generate one ad group, possibly with nested ads
    ///
    /// Nested ads are left in place; attach the group with
    /// [`attach_ad_group`](crate::generator::normalize::attach_ad_group).
    pub async fn generate_ad_group(&self, brief: &str, campaign: &FullCampaign) -> Result<AdGroup> {
        let composed = compose_google_ad_group(brief, campaign);
        let (group, _): (AdGroup, _) =
            pipeline::request_structured(self.client.as_ref(), &self.config, &composed).await?;

        tracing::debug!(
            "Generated ad group '{}' with {} ads for campaign {}",
            group.name,
            group.ads.len(),
            campaign.id
        );
        Ok(group)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }
}
