//! Common test utilities for SDK integration tests

use adplan_core::catalog::market_for_iso;
use adplan_core::CampaignSummary;
use adplan_core::Channel;
use adplan_llm::MockProvider;
use adplan_sdk::{PlannerBuilder, PlannerSession};
use serde_json::{json, Value};
use std::sync::Arc;

pub const BRIEF: &str = "Promote SummerResort in France and Germany";

/// Session over a scripted provider
pub fn scripted_session(responses: Vec<Value>) -> (PlannerSession, Arc<MockProvider>) {
    let provider = Arc::new(MockProvider::with_responses(
        responses.into_iter().map(|v| v.to_string()),
    ));
    let session = PlannerBuilder::new()
        .without_environment()
        .with_client(provider.clone())
        .build()
        .expect("session builds");
    (session, provider)
}

/// Summary JSON for a catalog market
pub fn summary_json(id: &str, channel: Channel, campaign_type: &str, iso: &str) -> Value {
    let market = market_for_iso(iso).expect("catalog market");
    let language = market.browser_langs[0].clone();
    serde_json::to_value(CampaignSummary {
        id: id.to_string(),
        channel,
        campaign_name: format!("[{}]-{}", iso, campaign_type),
        campaign_type: campaign_type.to_string(),
        market,
        languages: vec![language],
    })
    .expect("summary serializes")
}

/// Full campaign JSON: a summary plus one payload field
pub fn with_payload(mut summary: Value, field: &str, payload: Value) -> Value {
    summary[field] = payload;
    summary
}

pub fn ad_json(headline: &str) -> Value {
    json!({
        "finalUrl": "https://summerresort.example",
        "headlines": [headline, "Sea View Rooms"],
        "descriptions": ["Book direct for the best rate."]
    })
}

pub fn asset_group_json(name: &str) -> Value {
    json!({
        "id": format!("ag-{}", name),
        "name": name,
        "finalUrl": "https://summerresort.example",
        "headlines": ["Sea View", "Book Direct", "Summer 2025"],
        "longHeadlines": ["Seaside suites for your summer escape"],
        "descriptions": ["Breakfast included.", "Free cancellation."]
    })
}

/// A PMax campaign and a Brand Search campaign with one ad group
pub fn google_plan() -> (Value, Value) {
    let summaries = json!([
        summary_json("pmax", Channel::Google, "PMax", "FR"),
        summary_json("brand", Channel::Google, "Brand Search", "FR"),
    ]);
    let details = json!([
        with_payload(
            summary_json("pmax", Channel::Google, "PMax", "FR"),
            "googleAds",
            json!({ "assetGroups": [asset_group_json("Suites")] })
        ),
        with_payload(
            summary_json("brand", Channel::Google, "Brand Search", "FR"),
            "googleAds",
            json!({
                "adGroups": [{ "id": "g1", "name": "Core Brand" }],
                "ads": [{
                    "id": "a1",
                    "finalUrl": "https://summerresort.example",
                    "headlines": ["SummerResort Officiel"],
                    "descriptions": ["Réservez en direct."],
                    "assignedAdGroupId": "g1"
                }]
            })
        ),
    ]);
    (summaries, details)
}
