//! Full campaign generation from validated summaries

use crate::client::{LLMClient, LLMResponse};
use crate::error::{LLMError, Result, Stage};
use crate::generator::composer::{canonicalize_summaries, compose_details};
use crate::generator::config::GeneratorConfig;
use crate::generator::google_generator::GoogleAdsGenerator;
use crate::generator::normalize::{attach_ad_group, check_channel_payload, flatten_search_payload};
use crate::generator::pipeline;
use adplan_core::types::{CampaignKind, CampaignSummary, FullCampaign};
use std::sync::Arc;

/// Pair each detailed campaign with the summary it details
///
/// Replies are matched by id first, then the rest in order by position. A reply
/// matched by position takes the summary's id. The reply must hold exactly one
/// campaign per summary.
pub fn match_summaries(
    summaries: &[CampaignSummary],
    campaigns: Vec<FullCampaign>,
) -> Result<Vec<FullCampaign>> {
    if campaigns.len() != summaries.len() {
        return Err(LLMError::generation(
            Stage::Details,
            format!(
                "expected {} campaigns, got {}",
                summaries.len(),
                campaigns.len()
            ),
        ));
    }

    let mut slots: Vec<Option<FullCampaign>> = summaries.iter().map(|_| None).collect();
    let mut unmatched = Vec::new();
    for campaign in campaigns {
        let slot = summaries
            .iter()
            .position(|s| s.id == campaign.id)
            .filter(|&index| slots[index].is_none());
        match slot {
            Some(index) => slots[index] = Some(campaign),
            None => unmatched.push(campaign),
        }
    }

    let mut unmatched = unmatched.into_iter();
    for (summary, slot) in summaries.iter().zip(slots.iter_mut()) {
        if slot.is_some() {
            continue;
        }
        if let Some(mut campaign) = unmatched.next() {
            tracing::warn!(
                "Detailed campaign {} ('{}') matched to summary {} by position",
                campaign.id,
                campaign.campaign_name,
                summary.id
            );
            campaign.id = summary.id.clone();
            *slot = Some(campaign);
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Details generator using LLM
///
/// Turns validated summaries into campaigns with creative payloads. Google
/// search campaigns are brought to the flat ad model and get an ad group from
/// the helper stage when the model returned none.
pub struct DetailsGenerator {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
    google: GoogleAdsGenerator,
}

impl DetailsGenerator {
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        let google = GoogleAdsGenerator::new(client.clone(), config.clone());
        Self {
            client,
            config,
            google,
        }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Generate full campaigns for the given summaries
    ///
    /// # Returns
    /// * `Ok(Vec<FullCampaign>)` - One campaign per summary, in summary order and
    ///   carrying the summary's id
    /// * `Err(LLMError)` - `GenerationFailed` when the reply is unusable or a
    ///   campaign lacks its channel payload
    pub async fn generate(
        &self,
        brief: &str,
        summaries: &[CampaignSummary],
    ) -> Result<Vec<FullCampaign>> {
        let (campaigns, _) = self.generate_with_metadata(brief, summaries).await?;
        Ok(campaigns)
    }

    /// Generate campaigns and return the raw LLM response alongside
    pub async fn generate_with_metadata(
        &self,
        brief: &str,
        summaries: &[CampaignSummary],
    ) -> Result<(Vec<FullCampaign>, LLMResponse)> {
        if summaries.is_empty() {
            return Err(LLMError::generation(Stage::Details, "no campaigns to detail"));
        }

        let canonical = canonicalize_summaries(summaries);
        let composed = compose_details(brief, &canonical)?;
        let (campaigns, response): (Vec<FullCampaign>, _) =
            pipeline::request_structured(self.client.as_ref(), &self.config, &composed).await?;

        let campaigns = match_summaries(&canonical, campaigns)?;

        let mut detailed = Vec::with_capacity(campaigns.len());
        for campaign in campaigns {
            detailed.push(self.finish_campaign(brief, campaign).await?);
        }

        tracing::info!("Generated details for {} campaigns", detailed.len());
        Ok((detailed, response))
    }

    async fn finish_campaign(&self, brief: &str, mut campaign: FullCampaign) -> Result<FullCampaign> {
        check_channel_payload(&campaign)?;
        if campaign.kind() != CampaignKind::GoogleSearch {
            return Ok(campaign);
        }

        let google = campaign.google_ads.get_or_insert_with(Default::default);
        flatten_search_payload(google);
        if !google.ad_groups().is_empty() {
            return Ok(campaign);
        }

        tracing::info!(
            "Search campaign {} has no ad groups, requesting one",
            campaign.id
        );
        let group = self
            .google
            .generate_ad_group(brief, &campaign)
            .await
            .map_err(|e| match e {
                LLMError::Configuration(_) => e,
                other => LLMError::generation(Stage::Details, other.to_string()),
            })?;
        let google = campaign.google_ads.get_or_insert_with(Default::default);
        attach_ad_group(google, group);
        Ok(campaign)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.google.set_config(config.clone());
        self.config = config;
    }
}
