//! Planning session
//!
//! A session walks one plan through `Input -> Summary -> Details`. Generation
//! failures never touch the plan: the stage falls back and the error message is
//! kept for display.

use crate::error::{Result, SdkError};
use crate::library::AssetLibrary;
use adplan_core::path::get_at_path;
use adplan_core::types::{Ad, AdGroup, CampaignKind, Channel, FullCampaign};
use adplan_core::{CampaignPlan, PathSegment, Plan, SummaryPlan};
use adplan_llm::generator::attach_ad_group;
use adplan_llm::{AssetRequest, AssetType, ClientHandle, LLMError, ManualOverrides, PlanGenerator};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Stage of the planning workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStage {
    /// Collecting the brief
    Input,
    /// Summaries generated, awaiting confirmation
    Summary,
    /// Full campaigns generated
    Details,
}

impl PlanStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStage::Input => "input",
            PlanStage::Summary => "summary",
            PlanStage::Details => "details",
        }
    }
}

impl fmt::Display for PlanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn string_values(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Planning session
pub struct PlannerSession {
    generator: PlanGenerator,
    handle: Arc<ClientHandle>,
    library: AssetLibrary,
    stage: PlanStage,
    brief: String,
    channels: Vec<Channel>,
    overrides: Option<ManualOverrides>,
    summaries: SummaryPlan,
    campaigns: CampaignPlan,
    last_error: Option<String>,
}

impl PlannerSession {
    /// Create a session; see [`PlannerBuilder`](crate::PlannerBuilder)
    pub fn new(generator: PlanGenerator, handle: Arc<ClientHandle>, library: AssetLibrary) -> Self {
        Self {
            generator,
            handle,
            library,
            stage: PlanStage::Input,
            brief: String::new(),
            channels: Vec::new(),
            overrides: None,
            summaries: Plan::default(),
            campaigns: Plan::default(),
            last_error: None,
        }
    }

    // ========== State ==========

    pub fn stage(&self) -> PlanStage {
        self.stage
    }

    pub fn brief(&self) -> &str {
        &self.brief
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn overrides(&self) -> Option<&ManualOverrides> {
        self.overrides.as_ref()
    }

    pub fn summaries(&self) -> &SummaryPlan {
        &self.summaries
    }

    pub fn campaigns(&self) -> &CampaignPlan {
        &self.campaigns
    }

    /// Message of the last failed generation, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn library(&self) -> &AssetLibrary {
        &self.library
    }

    /// Whether a credential is resolvable
    pub fn is_configured(&self) -> bool {
        self.handle.is_configured()
    }

    /// Persist an API key for later calls
    pub fn set_api_key(&self, key: &str) -> Result<()> {
        self.handle.set_api_key(key)?;
        Ok(())
    }

    fn require_stage(&self, expected: PlanStage, operation: &'static str) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(SdkError::InvalidStage {
                operation,
                stage: self.stage.as_str(),
            })
        }
    }

    fn fail<T>(&mut self, operation: &str, error: LLMError) -> Result<T> {
        tracing::error!("{} failed: {}", operation, error);
        self.last_error = Some(error.to_string());
        Err(error.into())
    }

    fn campaign(&self, campaign_id: &str) -> Result<FullCampaign> {
        self.campaigns
            .get(campaign_id)
            .cloned()
            .ok_or_else(|| SdkError::CampaignNotFound(campaign_id.to_string()))
    }

    // ========== Generation stages ==========

    /// Generate summaries from a brief
    ///
    /// Starts a new plan from any stage. On failure the session is back at
    /// `Input` with the previous brief kept.
    pub async fn generate_summary(
        &mut self,
        brief: &str,
        channels: &[Channel],
        overrides: Option<ManualOverrides>,
    ) -> Result<&SummaryPlan> {
        self.brief = brief.trim().to_string();
        self.channels = channels.to_vec();
        self.overrides = overrides;
        self.campaigns = Plan::default();

        let result = self
            .generator
            .generate_summaries(&self.brief, &self.channels, self.overrides.as_ref())
            .await;

        match result {
            Ok(summaries) => {
                self.summaries = Plan::new(summaries);
                self.stage = PlanStage::Summary;
                self.last_error = None;
                Ok(&self.summaries)
            }
            Err(e) => {
                self.summaries = Plan::default();
                self.stage = PlanStage::Input;
                self.fail("Summary generation", e)
            }
        }
    }

    /// Confirm the summaries and generate full campaigns
    pub async fn confirm(&mut self) -> Result<&CampaignPlan> {
        self.require_stage(PlanStage::Summary, "confirm")?;

        let result = self
            .generator
            .generate_details(&self.brief, self.summaries.items())
            .await;

        match result {
            Ok(campaigns) => {
                self.campaigns = Plan::new(campaigns);
                self.stage = PlanStage::Details;
                self.last_error = None;
                Ok(&self.campaigns)
            }
            Err(e) => {
                self.campaigns = Plan::default();
                self.fail("Details generation", e)
            }
        }
    }

    /// Return to the summaries, dropping the generated campaigns
    pub fn back_to_summary(&mut self) {
        self.campaigns = Plan::default();
        self.stage = if self.summaries.is_empty() {
            PlanStage::Input
        } else {
            PlanStage::Summary
        };
    }

    /// Drop everything and start over
    pub fn reset(&mut self) {
        self.brief.clear();
        self.channels.clear();
        self.overrides = None;
        self.summaries = Plan::default();
        self.campaigns = Plan::default();
        self.last_error = None;
        self.stage = PlanStage::Input;
    }

    // ========== Plan editing ==========

    /// Set a value inside a summary
    pub fn edit_summary(&mut self, campaign_id: &str, path: &[PathSegment], value: Value) -> Result<()> {
        self.require_stage(PlanStage::Summary, "edit_summary")?;
        self.summaries = self.summaries.update(campaign_id, path, value)?;
        Ok(())
    }

    /// Set a value inside a full campaign
    pub fn edit_campaign(&mut self, campaign_id: &str, path: &[PathSegment], value: Value) -> Result<()> {
        self.require_stage(PlanStage::Details, "edit_campaign")?;
        self.campaigns = self.campaigns.update(campaign_id, path, value)?;
        Ok(())
    }

    /// Append to a list inside a full campaign
    pub fn add_to_campaign(&mut self, campaign_id: &str, path: &[PathSegment], value: Value) -> Result<()> {
        self.require_stage(PlanStage::Details, "add_to_campaign")?;
        self.campaigns = self.campaigns.add(campaign_id, path, value)?;
        Ok(())
    }

    /// Remove an element inside a full campaign
    pub fn delete_from_campaign(&mut self, campaign_id: &str, path: &[PathSegment]) -> Result<()> {
        self.require_stage(PlanStage::Details, "delete_from_campaign")?;
        self.campaigns = self.campaigns.delete(campaign_id, path)?;
        Ok(())
    }

    // ========== Asset generation ==========

    /// Replace the asset at `path` with a new one
    ///
    /// The other entries of the surrounding list are sent as assets to avoid.
    pub async fn regenerate_asset(
        &mut self,
        campaign_id: &str,
        path: &[PathSegment],
        asset_type: AssetType,
    ) -> Result<String> {
        self.replace_asset(campaign_id, path, asset_type, false).await
    }

    /// Rewrite the asset at `path`, keeping its intent
    pub async fn rewrite_asset(
        &mut self,
        campaign_id: &str,
        path: &[PathSegment],
        asset_type: AssetType,
    ) -> Result<String> {
        self.replace_asset(campaign_id, path, asset_type, true).await
    }

    async fn replace_asset(
        &mut self,
        campaign_id: &str,
        path: &[PathSegment],
        asset_type: AssetType,
        rewrite: bool,
    ) -> Result<String> {
        self.require_stage(PlanStage::Details, "regenerate_asset")?;
        let campaign = self.campaign(campaign_id)?;
        let tree = serde_json::to_value(&campaign)?;

        let current = get_at_path(&tree, path)
            .and_then(Value::as_str)
            .map(str::to_string);
        let existing: Vec<String> = match path.split_last() {
            Some((PathSegment::Index(index), parent)) => {
                let mut siblings = string_values(get_at_path(&tree, parent).cloned());
                if *index < siblings.len() {
                    siblings.remove(*index);
                }
                siblings
            }
            _ => Vec::new(),
        };

        let mut request =
            AssetRequest::new(&self.brief, &campaign, asset_type).with_existing(&existing);
        if rewrite {
            if let Some(current) = current.as_deref() {
                request = request.rewriting(current);
            }
        }

        let result = self.generator.generate_asset(&request).await;
        match result {
            Ok(asset) => {
                self.campaigns = self
                    .campaigns
                    .update(campaign_id, path, Value::String(asset.clone()))?;
                self.last_error = None;
                Ok(asset)
            }
            Err(e) => self.fail("Asset generation", e),
        }
    }

    /// Generate a new asset and append it to the list at `list_path`
    pub async fn generate_asset_into(
        &mut self,
        campaign_id: &str,
        list_path: &[PathSegment],
        asset_type: AssetType,
    ) -> Result<String> {
        self.require_stage(PlanStage::Details, "generate_asset_into")?;
        let campaign = self.campaign(campaign_id)?;
        let existing = string_values(self.campaigns.value_at(campaign_id, list_path));

        let request =
            AssetRequest::new(&self.brief, &campaign, asset_type).with_existing(&existing);

        let result = self.generator.generate_asset(&request).await;
        match result {
            Ok(asset) => {
                self.campaigns = self
                    .campaigns
                    .add(campaign_id, list_path, Value::String(asset.clone()))?;
                self.last_error = None;
                Ok(asset)
            }
            Err(e) => self.fail("Asset generation", e),
        }
    }

    // ========== Google search helpers ==========

    fn search_campaign(&self, campaign_id: &str) -> Result<FullCampaign> {
        let campaign = self.campaign(campaign_id)?;
        if campaign.kind() != CampaignKind::GoogleSearch {
            return Err(SdkError::GenericError(format!(
                "campaign '{}' is not a Google search campaign",
                campaign.campaign_name
            )));
        }
        Ok(campaign)
    }

    /// Generate an ad group and attach it to a search campaign
    pub async fn add_google_ad_group(&mut self, campaign_id: &str) -> Result<AdGroup> {
        self.require_stage(PlanStage::Details, "add_google_ad_group")?;
        let mut campaign = self.search_campaign(campaign_id)?;

        let result = self
            .generator
            .generate_google_ad_group(&self.brief, &campaign)
            .await;
        let group = match result {
            Ok(group) => group,
            Err(e) => return self.fail("Ad group generation", e),
        };

        let google = campaign.google_ads.get_or_insert_with(Default::default);
        let moved = attach_ad_group(google, group);
        let attached = google.ad_groups().last().cloned().unwrap_or_default();
        tracing::info!(
            "Added ad group '{}' with {} ads to campaign {}",
            attached.name,
            moved,
            campaign_id
        );

        self.campaigns = self.campaigns.replace(campaign);
        self.last_error = None;
        Ok(attached)
    }

    /// Generate an ad for a search campaign and put it first in the ad list
    ///
    /// Without `ad_group_id` the ad is assigned to the campaign's first ad
    /// group, if it has one.
    pub async fn add_google_ad(&mut self, campaign_id: &str, ad_group_id: Option<&str>) -> Result<Ad> {
        self.require_stage(PlanStage::Details, "add_google_ad")?;
        let mut campaign = self.search_campaign(campaign_id)?;

        let group = match ad_group_id {
            Some(id) => Some(
                campaign
                    .google_ads
                    .iter()
                    .flat_map(|g| g.ad_groups())
                    .find(|g| g.id == id)
                    .cloned()
                    .ok_or_else(|| SdkError::GenericError(format!("ad group not found: {}", id)))?,
            ),
            None => campaign
                .google_ads
                .iter()
                .flat_map(|g| g.ad_groups())
                .next()
                .cloned(),
        };

        let result = self
            .generator
            .generate_google_ad(&self.brief, &campaign, group.as_ref())
            .await;
        let ad = match result {
            Ok(ad) => ad,
            Err(e) => return self.fail("Ad generation", e),
        };

        campaign
            .google_ads
            .get_or_insert_with(Default::default)
            .ads
            .get_or_insert_with(Vec::new)
            .insert(0, ad.clone());

        self.campaigns = self.campaigns.replace(campaign);
        self.last_error = None;
        Ok(ad)
    }
}
