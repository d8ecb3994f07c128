//! Single creative asset generation

use crate::client::LLMClient;
use crate::error::{LLMError, Result, Stage};
use crate::generator::composer::compose_asset;
use crate::generator::config::GeneratorConfig;
use crate::generator::normalize::strip_quotes;
use crate::generator::pipeline;
use adplan_core::types::{limits, FullCampaign};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind of free-text asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetType {
    Headline,
    LongHeadline,
    Description,
    Keyword,
    /// Meta primary text
    PrimaryText,
    /// Meta headline
    MetaHeadline,
    /// Meta description
    MetaDescription,
    /// TikTok ad text
    AdText,
    AssetGroupName,
    /// Google ad group name
    AdGroupName,
    AdSetName,
    TikTokAdGroupName,
}

impl AssetType {
    /// Label used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Headline => "headline",
            AssetType::LongHeadline => "long headline",
            AssetType::Description => "description",
            AssetType::Keyword => "keyword",
            AssetType::PrimaryText => "primary text",
            AssetType::MetaHeadline => "headline",
            AssetType::MetaDescription => "link description",
            AssetType::AdText => "ad text",
            AssetType::AssetGroupName => "asset group name",
            AssetType::AdGroupName => "ad group name",
            AssetType::AdSetName => "ad set name",
            AssetType::TikTokAdGroupName => "TikTok ad group name",
        }
    }

    /// Character limit, `None` for names without one
    pub fn char_limit(&self) -> Option<usize> {
        match self {
            AssetType::Headline => Some(limits::HEADLINE_CHARS),
            AssetType::LongHeadline => Some(limits::LONG_HEADLINE_CHARS),
            AssetType::Description => Some(limits::DESCRIPTION_CHARS),
            AssetType::Keyword => Some(80),
            AssetType::PrimaryText => Some(125),
            AssetType::MetaHeadline => Some(40),
            AssetType::MetaDescription => Some(30),
            AssetType::AdText => Some(100),
            AssetType::TikTokAdGroupName => Some(limits::TIKTOK_AD_GROUP_NAME_CHARS),
            AssetType::AssetGroupName | AssetType::AdGroupName | AssetType::AdSetName => None,
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Context of one asset generation
#[derive(Debug, Clone, Copy)]
pub struct AssetRequest<'a> {
    pub brief: &'a str,
    pub campaign: &'a FullCampaign,
    pub asset_type: AssetType,
    /// Assets of the same type already in the container
    pub existing: &'a [String],
    /// Asset being rewritten, `None` for a new one
    pub current: Option<&'a str>,
}

impl<'a> AssetRequest<'a> {
    pub fn new(brief: &'a str, campaign: &'a FullCampaign, asset_type: AssetType) -> Self {
        Self {
            brief,
            campaign,
            asset_type,
            existing: &[],
            current: None,
        }
    }

    pub fn with_existing(mut self, existing: &'a [String]) -> Self {
        self.existing = existing;
        self
    }

    /// Rewrite `current` instead of producing a new asset
    pub fn rewriting(mut self, current: &'a str) -> Self {
        self.current = Some(current);
        self
    }
}

/// Free-text asset generator
pub struct AssetGenerator {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl AssetGenerator {
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Generate (or rewrite) one asset
    ///
    /// The reply is trimmed and one layer of wrapping quotes is removed. An empty
    /// result is a generation failure. Length limits are only requested, not
    /// enforced.
    pub async fn generate(&self, request: &AssetRequest<'_>) -> Result<String> {
        let composed = compose_asset(request);
        let text = pipeline::request_text(self.client.as_ref(), &self.config, &composed).await?;
        let asset = strip_quotes(&text);

        if asset.is_empty() {
            return Err(LLMError::generation(Stage::Asset, "model returned no text"));
        }

        if let Some(limit) = request.asset_type.char_limit() {
            let len = asset.chars().count();
            if len > limit {
                tracing::warn!("Generated {} has {} chars, limit is {}", request.asset_type, len, limit);
            }
        }
        Ok(asset)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }
}
