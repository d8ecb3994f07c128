//! Post-processing of generated creatives

use crate::error::{LLMError, Result, Stage};
use adplan_core::types::{AdGroup, CampaignKind, FullCampaign, GoogleAds};

const QUOTE_CHARS: [char; 7] = ['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '`'];

/// Strip one wrapping quote on each side of a free-text asset
pub fn strip_quotes(text: &str) -> String {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix(QUOTE_CHARS) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(QUOTE_CHARS) {
        text = rest;
    }
    text.trim().to_string()
}

/// Add a generated ad group to the flat search model
///
/// The group's nested ads move into `ads`, each assigned to the new group.
/// Returns the number of moved ads.
pub fn attach_ad_group(google: &mut GoogleAds, mut group: AdGroup) -> usize {
    let nested = std::mem::take(&mut group.ads);
    let moved = nested.len();
    let group_id = group.id.clone();

    google.ad_groups.get_or_insert_with(Vec::new).push(group);
    google
        .ads
        .get_or_insert_with(Vec::new)
        .extend(nested.into_iter().map(|mut ad| {
            ad.assigned_ad_group_id = Some(group_id.clone());
            ad
        }));
    google.normalize_assignments();
    moved
}

/// Bring a search payload to the flat ad model
pub fn flatten_search_payload(google: &mut GoogleAds) {
    let lifted = google.lift_nested_ads();
    let normalized = google.normalize_assignments();
    if lifted > 0 || normalized > 0 {
        tracing::debug!(
            "Flattened search payload: {} ads lifted, {} assignments normalized",
            lifted,
            normalized
        );
    }
}

/// Check that a campaign carries the payload its kind requires
///
/// Google search campaigns are exempt: a missing structure there is repaired
/// by the details stage.
pub fn check_channel_payload(campaign: &FullCampaign) -> Result<()> {
    let missing = match campaign.kind() {
        CampaignKind::GoogleAssetGroups => campaign
            .google_ads
            .as_ref()
            .map_or(true, |g| g.asset_groups().is_empty())
            .then_some("googleAds.assetGroups"),
        CampaignKind::MetaAdSets => campaign
            .meta
            .as_ref()
            .map_or(true, |m| m.ad_sets.is_empty())
            .then_some("meta.adSets"),
        CampaignKind::TikTokAdGroups => campaign
            .tik_tok
            .as_ref()
            .map_or(true, |t| t.ad_groups.is_empty())
            .then_some("tikTok.adGroups"),
        CampaignKind::GoogleSearch => None,
    };

    match missing {
        Some(path) => Err(LLMError::generation(
            Stage::Details,
            format!("campaign '{}' ({}) has no {}", campaign.campaign_name, campaign.id, path),
        )),
        None => Ok(()),
    }
}
