//! End-to-end campaign planning example
//!
//! This example demonstrates:
//! - Loading planner settings from `config/adplan.*` and `ADPLAN_*` variables
//! - Generating campaign summaries from a brief
//! - Confirming them into full campaigns
//!
//! With a Gemini key available (`GEMINI_API_KEY`) the real model is used;
//! otherwise the run falls back to scripted responses.

use adplan_llm::MockProvider;
use adplan_sdk::{init_tracing, Channel, PlannerBuilder, PlannerConfig};
use serde_json::json;
use std::sync::Arc;

const BRIEF: &str = "Launch summer bookings for SummerResort, a seaside hotel in Nice. \
                     Target families in France and Germany, budget 20k EUR per month.";

fn scripted_provider() -> Arc<MockProvider> {
    let market = json!({ "name": "France", "iso": "FR", "browserLangs": ["fr-FR"] });
    let summaries = json!([
        { "channel": "Google", "campaignName": "[FR]-PMax-FR", "campaignType": "PMax",
          "market": market, "languages": ["fr-FR"] },
        { "channel": "Meta", "campaignName": "[FR]-Conversions-FR", "campaignType": "Conversions",
          "market": market, "languages": ["fr-FR"] }
    ]);
    Arc::new(MockProvider::with_responses([summaries.to_string()]))
}

fn scripted_details(summaries: &[adplan_core::CampaignSummary]) -> String {
    let campaigns: Vec<_> = summaries
        .iter()
        .map(|s| {
            let mut campaign = serde_json::to_value(s).unwrap_or_default();
            match s.channel {
                Channel::Google => campaign["googleAds"] = json!({ "assetGroups": [{
                    "name": "Family Suites",
                    "finalUrl": "https://summerresort.example",
                    "headlines": ["Seaside Family Suites", "Kids Club Included", "Book Direct"],
                    "longHeadlines": ["Seaside suites in Nice with a kids club and pool"],
                    "descriptions": ["Free cancellation.", "Breakfast for the whole family."]
                }]}),
                _ => campaign["meta"] = json!({ "adSets": [{
                    "name": "Families FR",
                    "ads": [{
                        "primaryText": "Your summer by the sea starts here.",
                        "headline": "Family Suites in Nice",
                        "description": "Book direct and save"
                    }]
                }]}),
            }
            campaign
        })
        .collect();
    serde_json::Value::Array(campaigns).to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PlannerConfig::load()?;
    init_tracing(&config)?;

    println!("=== Campaign Planning Example ===\n");

    let live = PlannerBuilder::from_config(config.clone()).build()?;
    let scripted = (!live.is_configured()).then(scripted_provider);

    let mut builder = PlannerBuilder::from_config(config);
    if let Some(provider) = &scripted {
        println!("No Gemini key found, using scripted responses\n");
        builder = builder.with_client(provider.clone());
    }
    let mut session = builder.build()?;

    // Stage 1: summaries
    let summaries = session
        .generate_summary(BRIEF, &[Channel::Google, Channel::Meta], None)
        .await?;
    println!("Summaries ({}):", summaries.len());
    for summary in summaries.items() {
        println!(
            "  {} | {} | {} | {}",
            summary.channel, summary.campaign_name, summary.campaign_type, summary.market.iso
        );
    }

    if let Some(provider) = &scripted {
        provider.queue_response(scripted_details(session.summaries().items()));
    }

    // Stage 2: full campaigns
    let campaigns = session.confirm().await?;
    println!("\nCampaigns ({}):", campaigns.len());
    for campaign in campaigns.items() {
        println!("  {} ({})", campaign.campaign_name, campaign.id);
        if let Some(google) = &campaign.google_ads {
            for group in google.asset_groups() {
                println!("    asset group '{}': {} headlines", group.name, group.headlines.len());
            }
            for group in google.ad_groups() {
                println!("    ad group '{}': {} ads", group.name, google.ads_for_group(&group.id).len());
            }
        }
        if let Some(meta) = &campaign.meta {
            for ad_set in &meta.ad_sets {
                println!("    ad set '{}': {} ads", ad_set.name, ad_set.ads.len());
            }
        }
    }

    println!("\nStage: {}", session.stage());
    Ok(())
}
