//! Unit tests for the campaign plan model, catalog and plan editor

use adplan_core::catalog::{self, cluster_browser_langs, cluster_market, market_for_iso};
use adplan_core::types::{plan_ad_group_targets, CampaignKind};
use adplan_core::{
    path, AssignmentSource, CampaignPlan, CampaignSummary, Channel, CoreError, FullCampaign,
    Market, Plan, SummaryPlan,
};
use serde_json::json;

fn summary(id: &str, channel: Channel, campaign_type: &str, iso: &str) -> CampaignSummary {
    let market = market_for_iso(iso).unwrap();
    CampaignSummary {
        id: id.to_string(),
        channel,
        campaign_name: format!("[{}]-{}", iso, campaign_type),
        campaign_type: campaign_type.to_string(),
        languages: vec![market.primary_language().unwrap().to_string()],
        market,
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn test_ww_cluster_langs_match_constituents() {
    for codes in [vec!["ES", "IT"], vec!["CA", "CH", "BE"], vec!["US", "GB", "IE", "NZ"]] {
        let markets: Vec<Market> = codes.iter().filter_map(|c| market_for_iso(c)).collect();
        let cluster = cluster_market(&markets);
        assert_eq!(cluster.iso, "WW");
        assert_eq!(cluster.browser_langs, cluster_browser_langs(&cluster.name));
    }
}

#[test]
fn test_catalog_covers_campaign_types() {
    assert_eq!(catalog::ALL_CAMPAIGN_TYPES.len(), 4);
    assert!(catalog::ALL_CAMPAIGN_TYPES.contains(&catalog::DEFAULT_CAMPAIGN_TYPE));
    assert_eq!(catalog::countries().len(), 24);
}

// =============================================================================
// Model
// =============================================================================

#[test]
fn test_summary_deserializes_from_provider_shape() {
    let value = json!({
        "id": "c1",
        "channel": "Meta",
        "campaignName": "[WW]-Prospecting-ES",
        "campaignType": "Prospecting",
        "market": { "name": "Spain, Italy", "iso": "WW", "browserLangs": ["es-ES", "it-IT"] },
        "languages": ["es-ES"]
    });
    let summary: CampaignSummary = serde_json::from_value(value).unwrap();
    assert!(summary.market.is_cluster());
    assert_eq!(summary.language(), Some("es-ES"));
    assert_eq!(summary.kind(), CampaignKind::MetaAdSets);
}

#[test]
fn test_full_campaign_keeps_summary_identity() {
    let base = summary("c9", Channel::Google, "Hotel Ads", "FR");
    let full: FullCampaign = base.clone().into();
    assert_eq!(full.summary(), base);
    assert_eq!(full.kind(), CampaignKind::GoogleAssetGroups);
}

// =============================================================================
// Plan editor
// =============================================================================

#[test]
fn test_edit_summary_plan() {
    let plan: SummaryPlan = Plan::new(vec![
        summary("c1", Channel::Google, "PMax", "FR"),
        summary("c2", Channel::Google, "PMax", "DE"),
    ]);

    let next = plan
        .campaign("c2")
        .update(&path!["campaignType"], json!("Brand"))
        .unwrap();

    assert_eq!(next.get("c2").unwrap().campaign_type, "Brand");
    assert_eq!(plan.get("c2").unwrap().campaign_type, "PMax");
    assert_eq!(next.ids(), plan.ids());
}

#[test]
fn test_assign_ad_to_second_group_through_editor() {
    let mut campaign: FullCampaign = summary("c1", Channel::Google, "Brand Search", "FR").into();
    campaign.google_ads = serde_json::from_value(json!({
        "adGroups": [
            { "id": "g1", "name": "Core", "ads": [] },
            { "id": "g2", "name": "Competitors", "ads": [] }
        ],
        "ads": [{
            "id": "a1",
            "finalUrl": "https://summerresort.example",
            "assignedTargets": [{ "source": "plan", "adGroupId": "g1" }]
        }]
    }))
    .unwrap();
    let plan: CampaignPlan = Plan::new(vec![campaign]);

    let next = plan
        .campaign("c1")
        .add(
            &path!["googleAds", "ads", 0, "assignedTargets"],
            json!({ "source": "plan", "adGroupId": "g2", "adGroupName": "Competitors" }),
        )
        .unwrap();

    let google = next.get("c1").unwrap().google_ads.as_ref().unwrap();
    assert_eq!(google.ads_for_group("g1").len(), 1);
    assert_eq!(google.ads_for_group("g2").len(), 1);
    assert_eq!(google.ads()[0].targets()[1].source, AssignmentSource::Plan);

    let combos = plan_ad_group_targets(next.items());
    assert_eq!(combos.len(), 2);
}

#[test]
fn test_delete_on_unknown_campaign_is_silent() {
    let plan: CampaignPlan = Plan::new(vec![summary("c1", Channel::TikTok, "Video", "US").into()]);
    let next = plan
        .delete("missing", &path!["tikTok", "adGroups", 0])
        .unwrap();
    assert_eq!(next, plan);
}

#[test]
fn test_out_of_range_index_edit_is_rejected() {
    let plan: SummaryPlan = Plan::new(vec![summary("c1", Channel::Google, "PMax", "FR")]);

    for index in [usize::MAX, 10_000] {
        let result = plan.update("c1", &path!["market", "browserLangs", index], json!("en-FR"));
        assert!(matches!(result, Err(CoreError::InvalidPath(_))), "index {}", index);
    }
    let next = plan
        .update("c1", &path!["market", "browserLangs", 1], json!("en-FR"))
        .unwrap();
    assert_eq!(next.get("c1").unwrap().market.browser_langs, vec!["fr-FR", "en-FR"]);
}
