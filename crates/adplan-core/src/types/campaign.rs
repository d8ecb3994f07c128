//! Campaign plan model
//!
//! A plan starts as a list of [`CampaignSummary`] objects and, after the details
//! stage, becomes a list of [`FullCampaign`] objects carrying one per-channel
//! creative payload.
//!
//! Google search campaigns use a flat ad model: ad groups are named buckets and
//! every ad lives in `googleAds.ads`, pointing back at the group(s) it belongs to
//! through [`AssignmentTarget`]s.

use super::market::Market;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Conventional asset limits for the supported ad formats
pub mod limits {
    /// Maximum characters of a Google headline
    pub const HEADLINE_CHARS: usize = 30;
    /// Maximum characters of a Google long headline
    pub const LONG_HEADLINE_CHARS: usize = 90;
    /// Maximum characters of a Google description
    pub const DESCRIPTION_CHARS: usize = 90;
    /// Maximum characters of a TikTok ad group name
    pub const TIKTOK_AD_GROUP_NAME_CHARS: usize = 100;
    /// Maximum headlines of a Google responsive search ad
    pub const AD_HEADLINES: usize = 15;
    /// Maximum descriptions of a Google responsive search ad
    pub const AD_DESCRIPTIONS: usize = 4;
    /// Maximum images of an asset group
    pub const ASSET_GROUP_IMAGES: usize = 15;
    /// Maximum logos of an asset group
    pub const ASSET_GROUP_LOGOS: usize = 5;
    /// Maximum videos of an asset group
    pub const ASSET_GROUP_VIDEOS: usize = 5;
}

/// Advertising channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Google,
    Meta,
    TikTok,
}

impl Channel {
    /// All supported channels, in display order
    pub const ALL: [Channel; 3] = [Channel::Google, Channel::Meta, Channel::TikTok];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Google => "Google",
            Channel::Meta => "Meta",
            Channel::TikTok => "TikTok",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn asset_group_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)pmax|performance\s*max|hotel").expect("asset group pattern is valid")
    })
}

/// Canonical Google type for brand campaigns routed to the search branch
pub const BRAND_SEARCH_TYPE: &str = "Brand Search";

/// Which creative sub-structure a campaign carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignKind {
    /// Google PMax / Hotel: `googleAds.assetGroups`
    GoogleAssetGroups,
    /// Google Search / Brand: `googleAds.adGroups` + flat `googleAds.ads`
    GoogleSearch,
    /// Meta: `meta.adSets`
    MetaAdSets,
    /// TikTok: `tikTok.adGroups`
    TikTokAdGroups,
}

impl CampaignKind {
    /// Classify a campaign by channel and free-form type
    pub fn classify(channel: Channel, campaign_type: &str) -> Self {
        match channel {
            Channel::Google if is_asset_group_type(campaign_type) => {
                CampaignKind::GoogleAssetGroups
            }
            Channel::Google => CampaignKind::GoogleSearch,
            Channel::Meta => CampaignKind::MetaAdSets,
            Channel::TikTok => CampaignKind::TikTokAdGroups,
        }
    }
}

/// Whether a Google campaign type is served by asset groups (PMax, Hotel)
pub fn is_asset_group_type(campaign_type: &str) -> bool {
    asset_group_pattern().is_match(campaign_type)
}

/// Canonicalize loose Google brand types to `Brand Search`
///
/// Returns `None` when the type is left as is.
pub fn canonical_brand_type(channel: Channel, campaign_type: &str) -> Option<&'static str> {
    if channel != Channel::Google || is_asset_group_type(campaign_type) {
        return None;
    }
    if campaign_type.to_lowercase().contains("brand") && campaign_type != BRAND_SEARCH_TYPE {
        Some(BRAND_SEARCH_TYPE)
    } else {
        None
    }
}

/// High-level plan entry presented for user validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub id: String,
    pub channel: Channel,
    pub campaign_name: String,
    pub campaign_type: String,
    pub market: Market,
    /// Exactly one ad language
    pub languages: Vec<String>,
}

impl CampaignSummary {
    pub fn kind(&self) -> CampaignKind {
        CampaignKind::classify(self.channel, &self.campaign_type)
    }

    /// The single ad language of this campaign
    pub fn language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }
}

/// Assignment target kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentSource {
    /// An ad group inside this plan
    Plan,
    /// An ad group in a pre-existing (mocked) account
    External,
}

/// Reference from an ad to an ad group it is reported under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentTarget {
    pub source: AssignmentSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_group_name: Option<String>,
}

impl AssignmentTarget {
    /// Target an ad group of this plan
    pub fn plan(ad_group_id: impl Into<String>) -> Self {
        Self {
            source: AssignmentSource::Plan,
            ad_group_id: Some(ad_group_id.into()),
            campaign_name: None,
            ad_group_name: None,
        }
    }

    /// Target an ad group of an external account
    pub fn external(campaign_name: impl Into<String>, ad_group_name: impl Into<String>) -> Self {
        Self {
            source: AssignmentSource::External,
            ad_group_id: None,
            campaign_name: Some(campaign_name.into()),
            ad_group_name: Some(ad_group_name.into()),
        }
    }

    pub fn with_ad_group_name(mut self, name: impl Into<String>) -> Self {
        self.ad_group_name = Some(name.into());
        self
    }

    /// Whether both targets point at the same ad group
    pub fn same_destination(&self, other: &AssignmentTarget) -> bool {
        match (self.source, other.source) {
            (AssignmentSource::Plan, AssignmentSource::Plan) => self.ad_group_id == other.ad_group_id,
            (AssignmentSource::External, AssignmentSource::External) => {
                self.campaign_name == other.campaign_name && self.ad_group_name == other.ad_group_name
            }
            _ => false,
        }
    }
}

/// Legacy single external assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAssignment {
    pub campaign_name: String,
    pub ad_group_name: String,
}

/// Performance Max / Hotel asset group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetGroup {
    pub id: String,
    pub name: String,
    pub final_url: String,
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub long_headlines: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
}

fn push_capped(slot: &mut Option<Vec<String>>, urls: impl IntoIterator<Item = String>, cap: usize) {
    let list = slot.get_or_insert_with(Vec::new);
    list.extend(urls);
    list.truncate(cap);
}

impl AssetGroup {
    /// Add images, keeping at most 15
    pub fn push_images(&mut self, urls: impl IntoIterator<Item = String>) {
        push_capped(&mut self.images, urls, limits::ASSET_GROUP_IMAGES);
    }

    /// Add logos, keeping at most 5
    pub fn push_logos(&mut self, urls: impl IntoIterator<Item = String>) {
        push_capped(&mut self.logos, urls, limits::ASSET_GROUP_LOGOS);
    }

    /// Add videos, keeping at most 5
    pub fn push_videos(&mut self, urls: impl IntoIterator<Item = String>) {
        push_capped(&mut self.videos, urls, limits::ASSET_GROUP_VIDEOS);
    }
}

/// Google responsive search ad
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: String,
    pub final_url: String,
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Legacy single-group assignment, folded into `assigned_targets`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_ad_group_id: Option<String>,
    /// Legacy single external assignment, folded into `assigned_targets`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_external: Option<ExternalAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_targets: Option<Vec<AssignmentTarget>>,
}

impl Ad {
    pub fn targets(&self) -> &[AssignmentTarget] {
        self.assigned_targets.as_deref().unwrap_or(&[])
    }

    /// Add an assignment; returns false if an equivalent one exists
    pub fn assign_to(&mut self, target: AssignmentTarget) -> bool {
        let targets = self.assigned_targets.get_or_insert_with(Vec::new);
        if targets.iter().any(|t| t.same_destination(&target)) {
            return false;
        }
        targets.push(target);
        true
    }

    /// Remove every plan assignment to the given ad group
    pub fn unassign_group(&mut self, ad_group_id: &str) {
        if let Some(targets) = self.assigned_targets.as_mut() {
            targets.retain(|t| {
                !(t.source == AssignmentSource::Plan && t.ad_group_id.as_deref() == Some(ad_group_id))
            });
        }
        if self.assigned_ad_group_id.as_deref() == Some(ad_group_id) {
            self.assigned_ad_group_id = None;
        }
    }

    pub fn is_assigned_to_group(&self, ad_group_id: &str) -> bool {
        self.assigned_ad_group_id.as_deref() == Some(ad_group_id)
            || self.targets().iter().any(|t| {
                t.source == AssignmentSource::Plan && t.ad_group_id.as_deref() == Some(ad_group_id)
            })
    }

    /// Fold legacy single-target fields into `assigned_targets`
    ///
    /// `group_name` resolves a plan ad group id to its display name. Returns the
    /// number of targets added.
    pub fn normalize_assignments<F>(&mut self, group_name: F) -> usize
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut added = 0;
        if let Some(group_id) = self.assigned_ad_group_id.clone() {
            let mut target = AssignmentTarget::plan(group_id.as_str());
            if let Some(name) = group_name(&group_id) {
                target = target.with_ad_group_name(name);
            }
            if self.assign_to(target) {
                added += 1;
            }
        }
        if let Some(external) = self.assigned_external.clone() {
            let target = AssignmentTarget::external(external.campaign_name, external.ad_group_name);
            if self.assign_to(target) {
                added += 1;
            }
        }
        added
    }
}

/// Google ad group, an organizational bucket in the flat ad model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ads: Vec<Ad>,
}

/// Google creative payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_property_feed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_groups: Option<Vec<AssetGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_groups: Option<Vec<AdGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ads: Option<Vec<Ad>>,
}

impl GoogleAds {
    pub fn asset_groups(&self) -> &[AssetGroup] {
        self.asset_groups.as_deref().unwrap_or(&[])
    }

    pub fn ad_groups(&self) -> &[AdGroup] {
        self.ad_groups.as_deref().unwrap_or(&[])
    }

    pub fn ads(&self) -> &[Ad] {
        self.ads.as_deref().unwrap_or(&[])
    }

    /// Ads reported under the given plan ad group
    pub fn ads_for_group(&self, ad_group_id: &str) -> Vec<&Ad> {
        self.ads()
            .iter()
            .filter(|ad| ad.is_assigned_to_group(ad_group_id))
            .collect()
    }

    /// Move ads nested in ad groups into the flat `ads` list
    ///
    /// Lifted ads go after any flat ads already present, each stamped with its
    /// source group id. A nested ad whose id is already in the flat list is not
    /// duplicated; the flat copy is assigned to the group instead. Nested lists
    /// are left empty. Returns the number of lifted ads.
    pub fn lift_nested_ads(&mut self) -> usize {
        let Some(groups) = self.ad_groups.as_mut() else {
            return 0;
        };
        let had_flat_list = self.ads.is_some();
        let flat = self.ads.get_or_insert_with(Vec::new);
        let mut lifted = 0;
        for group in groups.iter_mut() {
            for mut ad in std::mem::take(&mut group.ads) {
                let existing = flat
                    .iter_mut()
                    .find(|flat_ad| !ad.id.is_empty() && flat_ad.id == ad.id);
                match existing {
                    Some(flat_ad) => {
                        flat_ad.assign_to(AssignmentTarget::plan(group.id.as_str()));
                    }
                    None => {
                        ad.assigned_ad_group_id = Some(group.id.clone());
                        flat.push(ad);
                        lifted += 1;
                    }
                }
            }
        }
        if flat.is_empty() && !had_flat_list {
            self.ads = None;
        }
        lifted
    }

    /// Fold legacy assignment fields of every flat ad into target lists
    pub fn normalize_assignments(&mut self) -> usize {
        let names: Vec<(String, String)> = self
            .ad_groups()
            .iter()
            .map(|g| (g.id.clone(), g.name.clone()))
            .collect();
        let lookup = |id: &str| {
            names
                .iter()
                .find(|(group_id, _)| group_id == id)
                .map(|(_, name)| name.clone())
        };
        self.ads
            .iter_mut()
            .flatten()
            .map(|ad| ad.normalize_assignments(&lookup))
            .sum()
    }
}

/// Meta ad
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaAd {
    pub id: String,
    pub primary_text: String,
    pub headline: String,
    pub description: String,
}

/// Meta ad set, owns its ads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaAdSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ads: Vec<MetaAd>,
}

/// Meta creative payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaCampaign {
    #[serde(default)]
    pub ad_sets: Vec<MetaAdSet>,
}

/// TikTok ad
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokAd {
    pub id: String,
    pub ad_text: String,
}

/// TikTok ad group, owns its ads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokAdGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ads: Vec<TikTokAd>,
}

/// TikTok creative payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokCampaign {
    #[serde(default)]
    pub ad_groups: Vec<TikTokAdGroup>,
}

/// Campaign with its generated creative assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullCampaign {
    pub id: String,
    pub channel: Channel,
    pub campaign_name: String,
    pub campaign_type: String,
    pub market: Market,
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_ads: Option<GoogleAds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaCampaign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tik_tok: Option<TikTokCampaign>,
}

impl FullCampaign {
    pub fn kind(&self) -> CampaignKind {
        CampaignKind::classify(self.channel, &self.campaign_type)
    }

    pub fn language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }

    /// The summary part of this campaign
    pub fn summary(&self) -> CampaignSummary {
        CampaignSummary {
            id: self.id.clone(),
            channel: self.channel,
            campaign_name: self.campaign_name.clone(),
            campaign_type: self.campaign_type.clone(),
            market: self.market.clone(),
            languages: self.languages.clone(),
        }
    }
}

impl From<CampaignSummary> for FullCampaign {
    fn from(summary: CampaignSummary) -> Self {
        Self {
            id: summary.id,
            channel: summary.channel,
            campaign_name: summary.campaign_name,
            campaign_type: summary.campaign_type,
            market: summary.market,
            languages: summary.languages,
            google_ads: None,
            meta: None,
            tik_tok: None,
        }
    }
}

/// A Google ad group of the plan an ad can be assigned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanAdGroupRef {
    pub campaign_id: String,
    pub campaign_name: String,
    pub ad_group_id: String,
    pub ad_group_name: String,
}

/// Every (campaign, ad group) pair of the plan's Google campaigns
pub fn plan_ad_group_targets(campaigns: &[FullCampaign]) -> Vec<PlanAdGroupRef> {
    campaigns
        .iter()
        .filter(|c| c.channel == Channel::Google)
        .flat_map(|c| {
            c.google_ads
                .iter()
                .flat_map(|g| g.ad_groups())
                .map(move |group| PlanAdGroupRef {
                    campaign_id: c.id.clone(),
                    campaign_name: c.campaign_name.clone(),
                    ad_group_id: group.id.clone(),
                    ad_group_name: group.name.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(id: &str) -> Ad {
        Ad {
            id: id.to_string(),
            final_url: "https://example.com".to_string(),
            headlines: vec!["Book direct".to_string()],
            descriptions: vec!["Best rate guaranteed".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_campaign_kind() {
        assert_eq!(
            CampaignKind::classify(Channel::Google, "PMax"),
            CampaignKind::GoogleAssetGroups
        );
        assert_eq!(
            CampaignKind::classify(Channel::Google, "Performance  Max"),
            CampaignKind::GoogleAssetGroups
        );
        assert_eq!(
            CampaignKind::classify(Channel::Google, "Hotel Ads"),
            CampaignKind::GoogleAssetGroups
        );
        assert_eq!(
            CampaignKind::classify(Channel::Google, "Brand Search"),
            CampaignKind::GoogleSearch
        );
        assert_eq!(
            CampaignKind::classify(Channel::Meta, "PMax"),
            CampaignKind::MetaAdSets
        );
        assert_eq!(
            CampaignKind::classify(Channel::TikTok, "Video Views"),
            CampaignKind::TikTokAdGroups
        );
    }

    #[test]
    fn test_canonical_brand_type() {
        assert_eq!(canonical_brand_type(Channel::Google, "Brand"), Some("Brand Search"));
        assert_eq!(canonical_brand_type(Channel::Google, "BRAND awareness"), Some("Brand Search"));
        assert_eq!(canonical_brand_type(Channel::Google, "Brand Search"), None);
        assert_eq!(canonical_brand_type(Channel::Google, "Brand PMax"), None);
        assert_eq!(canonical_brand_type(Channel::Google, "Hotel Brand"), None);
        assert_eq!(canonical_brand_type(Channel::Google, "Retargeting"), None);
        assert_eq!(canonical_brand_type(Channel::Meta, "Brand"), None);
    }

    #[test]
    fn test_channel_serde() {
        assert_eq!(serde_json::to_value(Channel::TikTok).unwrap(), "TikTok");
        let channel: Channel = serde_json::from_value(serde_json::json!("Meta")).unwrap();
        assert_eq!(channel, Channel::Meta);
    }

    #[test]
    fn test_lift_nested_ads() {
        let mut google = GoogleAds {
            ad_groups: Some(vec![
                AdGroup {
                    id: "g1".into(),
                    name: "Brand".into(),
                    ads: vec![ad("a1"), ad("a2")],
                },
                AdGroup {
                    id: "g2".into(),
                    name: "Generic".into(),
                    ads: vec![ad("a3")],
                },
            ]),
            ..Default::default()
        };

        assert_eq!(google.lift_nested_ads(), 3);
        assert_eq!(google.ads().len(), 3);
        assert_eq!(google.ads()[0].assigned_ad_group_id.as_deref(), Some("g1"));
        assert_eq!(google.ads()[2].assigned_ad_group_id.as_deref(), Some("g2"));
        assert!(google.ad_groups().iter().all(|g| g.ads.is_empty()));
    }

    #[test]
    fn test_lift_appends_after_existing_flat_ads() {
        let mut google = GoogleAds {
            ad_groups: Some(vec![
                AdGroup {
                    id: "g1".into(),
                    name: "Brand".into(),
                    ads: vec![ad("nested"), ad("flat")],
                },
                AdGroup {
                    id: "g2".into(),
                    name: "Generic".into(),
                    ads: vec![],
                },
            ]),
            ads: Some(vec![ad("flat")]),
            ..Default::default()
        };

        assert_eq!(google.lift_nested_ads(), 1);
        let ids: Vec<&str> = google.ads().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["flat", "nested"]);
        assert_eq!(google.ads()[1].assigned_ad_group_id.as_deref(), Some("g1"));
        assert!(google.ads()[0].is_assigned_to_group("g1"));
        assert!(google.ad_groups().iter().all(|g| g.ads.is_empty()));
    }

    #[test]
    fn test_lift_without_nested_ads_keeps_payload() {
        let mut google = GoogleAds {
            ad_groups: Some(vec![AdGroup {
                id: "g1".into(),
                name: "Brand".into(),
                ads: vec![],
            }]),
            ..Default::default()
        };

        assert_eq!(google.lift_nested_ads(), 0);
        assert!(google.ads.is_none());
    }

    #[test]
    fn test_normalize_assignments() {
        let mut legacy = ad("a1");
        legacy.assigned_ad_group_id = Some("g1".into());
        legacy.assigned_external = Some(ExternalAssignment {
            campaign_name: "Existing Brand".into(),
            ad_group_name: "Core Terms".into(),
        });
        let mut google = GoogleAds {
            ad_groups: Some(vec![AdGroup {
                id: "g1".into(),
                name: "Brand Terms".into(),
                ads: vec![],
            }]),
            ads: Some(vec![legacy]),
            ..Default::default()
        };

        assert_eq!(google.normalize_assignments(), 2);
        let targets = google.ads()[0].targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].source, AssignmentSource::Plan);
        assert_eq!(targets[0].ad_group_name.as_deref(), Some("Brand Terms"));
        assert_eq!(targets[1].source, AssignmentSource::External);

        // Idempotent
        assert_eq!(google.normalize_assignments(), 0);
        assert_eq!(google.ads()[0].targets().len(), 2);
    }

    #[test]
    fn test_ad_fan_out_assignment() {
        let mut a = ad("a1");
        assert!(a.assign_to(AssignmentTarget::plan("g1")));
        assert!(a.assign_to(AssignmentTarget::plan("g2")));
        assert!(!a.assign_to(AssignmentTarget::plan("g1")));

        let google = GoogleAds {
            ads: Some(vec![a.clone()]),
            ..Default::default()
        };
        assert_eq!(google.ads_for_group("g1").len(), 1);
        assert_eq!(google.ads_for_group("g2").len(), 1);
        assert!(google.ads_for_group("g3").is_empty());

        a.unassign_group("g1");
        assert!(!a.is_assigned_to_group("g1"));
        assert!(a.is_assigned_to_group("g2"));
    }

    #[test]
    fn test_asset_group_media_caps() {
        let mut group = AssetGroup::default();
        group.push_images((0..20).map(|i| format!("img{}.png", i)));
        group.push_logos((0..3).map(|i| format!("logo{}.png", i)));
        group.push_logos((0..3).map(|i| format!("logo-b{}.png", i)));

        assert_eq!(group.images.as_ref().unwrap().len(), 15);
        assert_eq!(group.logos.as_ref().unwrap().len(), 5);
        assert!(group.videos.is_none());
    }

    #[test]
    fn test_full_campaign_camel_case_keys() {
        let campaign = FullCampaign {
            id: "c1".into(),
            channel: Channel::TikTok,
            campaign_name: "[US]-Video-EN".into(),
            campaign_type: "Video Views".into(),
            market: Market::new("United States", "US", vec!["en-US".into()]),
            languages: vec!["en".into()],
            google_ads: None,
            meta: None,
            tik_tok: Some(TikTokCampaign {
                ad_groups: vec![TikTokAdGroup {
                    id: "t1".into(),
                    name: "Prospecting".into(),
                    ads: vec![TikTokAd {
                        id: "ta1".into(),
                        ad_text: "Summer is calling".into(),
                    }],
                }],
            }),
        };

        let json = serde_json::to_value(&campaign).unwrap();
        assert_eq!(json["campaignName"], "[US]-Video-EN");
        assert_eq!(json["tikTok"]["adGroups"][0]["ads"][0]["adText"], "Summer is calling");
        assert!(json.get("googleAds").is_none());
    }

    #[test]
    fn test_plan_ad_group_targets() {
        let mut google: FullCampaign = CampaignSummary {
            id: "c1".into(),
            channel: Channel::Google,
            campaign_name: "Brand".into(),
            campaign_type: "Brand Search".into(),
            market: Market::new("France", "FR", vec!["fr-FR".into()]),
            languages: vec!["fr".into()],
        }
        .into();
        google.google_ads = Some(GoogleAds {
            ad_groups: Some(vec![
                AdGroup { id: "g1".into(), name: "Core".into(), ads: vec![] },
                AdGroup { id: "g2".into(), name: "Competitor".into(), ads: vec![] },
            ]),
            ..Default::default()
        });
        let mut meta = google.clone();
        meta.id = "c2".into();
        meta.channel = Channel::Meta;

        let combos = plan_ad_group_targets(&[google, meta]);
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[1].ad_group_name, "Competitor");
        assert!(combos.iter().all(|c| c.campaign_id == "c1"));
    }
}
