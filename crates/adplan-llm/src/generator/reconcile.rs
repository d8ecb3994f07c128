//! Manual override reconciliation
//!
//! When the caller picked markets and campaign types by hand, those picks are
//! authoritative: the returned summaries are padded up to the expected count and
//! every entry's channel, type and market are overwritten round-robin from the
//! manual lists. The model's output only contributes names and ordering.

use adplan_core::catalog::{
    cluster_market, default_market, language_code, market_for_iso, DEFAULT_CAMPAIGN_TYPE,
};
use adplan_core::types::{CampaignSummary, Channel, Market};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hand-picked markets and campaign types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualOverrides {
    /// Markets that each get their own campaigns
    #[serde(default)]
    pub primary_markets: Vec<Market>,
    /// Markets merged into one clustered campaign
    #[serde(default)]
    pub secondary_markets: Vec<Market>,
    #[serde(default)]
    pub campaign_types: Vec<String>,
}

fn dedupe_by<T: Clone, K: PartialEq>(items: &[T], key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.iter().any(|seen| key(seen) == key(item)) {
            out.push(item.clone());
        }
    }
    out
}

impl ManualOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from catalog codes; unknown codes are skipped
    pub fn from_iso_codes(primary: &[&str], secondary: &[&str], campaign_types: &[&str]) -> Self {
        Self {
            primary_markets: primary.iter().filter_map(|iso| market_for_iso(iso)).collect(),
            secondary_markets: secondary.iter().filter_map(|iso| market_for_iso(iso)).collect(),
            campaign_types: campaign_types.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_primary_markets(mut self, markets: Vec<Market>) -> Self {
        self.primary_markets = markets;
        self
    }

    pub fn with_secondary_markets(mut self, markets: Vec<Market>) -> Self {
        self.secondary_markets = markets;
        self
    }

    pub fn with_campaign_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.campaign_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Whether any manual selection was made
    pub fn is_active(&self) -> bool {
        !self.primary_markets.is_empty()
            || !self.secondary_markets.is_empty()
            || !self.campaign_types.is_empty()
    }

    /// Distinct primary markets followed by one `WW` cluster of the secondaries
    pub fn market_list(&self) -> Vec<Market> {
        let mut markets = dedupe_by(&self.primary_markets, |m| m.iso.clone());
        let secondary = dedupe_by(&self.secondary_markets, |m| m.iso.clone());
        if !secondary.is_empty() {
            markets.push(cluster_market(&secondary));
        }
        markets
    }

    pub fn distinct_campaign_types(&self) -> Vec<String> {
        let trimmed: Vec<String> = self
            .campaign_types
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        dedupe_by(&trimmed, String::clone)
    }
}

fn pick<T: Clone>(list: &[T], index: usize) -> Option<T> {
    if list.is_empty() {
        None
    } else {
        Some(list[index % list.len()].clone())
    }
}

fn campaign_name(market: &Market, campaign_type: &str, language: &str) -> String {
    format!(
        "[{}]-{}-{}",
        market.iso,
        campaign_type,
        language_code(language).to_uppercase()
    )
}

fn synthesize(index: usize, markets: &[Market], types: &[String], channels: &[Channel]) -> CampaignSummary {
    let market = pick(markets, index).unwrap_or_else(default_market);
    let campaign_type = pick(types, index).unwrap_or_else(|| DEFAULT_CAMPAIGN_TYPE.to_string());
    let channel = pick(channels, index).unwrap_or(Channel::Google);
    let language = market.primary_language().unwrap_or("en").to_string();

    CampaignSummary {
        id: Uuid::new_v4().to_string(),
        channel,
        campaign_name: campaign_name(&market, &campaign_type, &language),
        campaign_type,
        market,
        languages: vec![language],
    }
}

/// Make summaries conform to the manual selections
///
/// The result has `max(returned, types, markets, channels, 1)` entries. Lists
/// that are empty leave the corresponding field untouched. Inactive overrides
/// return the input unchanged.
pub fn reconcile_summaries(
    mut summaries: Vec<CampaignSummary>,
    overrides: &ManualOverrides,
    channels: &[Channel],
) -> Vec<CampaignSummary> {
    if !overrides.is_active() {
        return summaries;
    }

    let markets = overrides.market_list();
    let types = overrides.distinct_campaign_types();
    let channels = dedupe_by(channels, |c| *c);

    let returned = summaries.len();
    let target = returned
        .max(types.len())
        .max(markets.len())
        .max(channels.len())
        .max(1);

    while summaries.len() < target {
        let index = summaries.len();
        summaries.push(synthesize(index, &markets, &types, &channels));
    }
    if target > returned {
        tracing::warn!(
            "Model returned {} campaign(s), padded to {} to cover manual selections",
            returned,
            target
        );
    }

    let mut overwritten = 0;
    for (index, summary) in summaries.iter_mut().enumerate() {
        let before = (summary.channel, summary.campaign_type.clone(), summary.market.iso.clone());

        if let Some(channel) = pick(&channels, index) {
            summary.channel = channel;
        }
        if let Some(campaign_type) = pick(&types, index) {
            summary.campaign_type = campaign_type;
        }
        if let Some(market) = pick(&markets, index) {
            if let Some(language) = market.primary_language() {
                summary.languages = vec![language.to_string()];
            }
            summary.market = market;
        }

        if before != (summary.channel, summary.campaign_type.clone(), summary.market.iso.clone()) {
            overwritten += 1;
        }
    }
    if overwritten > 0 {
        tracing::debug!("Manual selections overwrote {} campaign(s)", overwritten);
    }

    summaries
}
