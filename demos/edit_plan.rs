//! Plan editing example
//!
//! This example demonstrates:
//! - Editing summaries and campaigns by tree path
//! - Regenerating and rewriting a single headline
//! - Extending a search campaign with a generated ad group and ad
//!
//! Runs offline against scripted provider responses.

use adplan_llm::MockProvider;
use adplan_sdk::{init_tracing, path, AssetType, Channel, PlannerBuilder, PlannerConfig};
use serde_json::json;
use std::sync::Arc;

const BRIEF: &str = "Protect SummerResort brand searches in France.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&PlannerConfig::default())?;

    println!("=== Plan Editing Example ===\n");

    let summary = json!({
        "id": "brand-fr",
        "channel": "Google",
        "campaignName": "[FR]-Brand-FR",
        "campaignType": "Brand",
        "market": { "name": "France", "iso": "FR", "browserLangs": ["fr-FR"] },
        "languages": ["fr-FR"]
    });
    let mut campaign = summary.clone();
    campaign["campaignType"] = json!("Brand Search");
    campaign["googleAds"] = json!({
        "adGroups": [{
            "id": "core",
            "name": "Core Brand",
            "ads": [{
                "finalUrl": "https://summerresort.example",
                "headlines": ["SummerResort Nice", "Site Officiel"],
                "descriptions": ["Réservez en direct au meilleur prix."]
            }]
        }]
    });

    let provider = Arc::new(MockProvider::with_responses([
        json!([summary]).to_string(),
        json!([campaign]).to_string(),
    ]));
    let mut session = PlannerBuilder::new()
        .without_environment()
        .with_client(provider.clone())
        .build()?;

    session.generate_summary(BRIEF, &[Channel::Google], None).await?;
    session.edit_summary("brand-fr", &path!["campaignName"], json!("[FR]-Brand-Search-FR"))?;
    let plan = session.confirm().await?;
    println!("Confirmed: {:?}\n", plan.ids());

    // Ads nested in the ad group were lifted into the flat list
    let headline = path!["googleAds", "ads", 0, "headlines", 1];
    println!(
        "Headline before: {}",
        session.campaigns().value_at("brand-fr", &headline).unwrap_or_default()
    );

    provider.queue_response("\"Hôtel Officiel Nice\"");
    let fresh = session.regenerate_asset("brand-fr", &headline, AssetType::Headline).await?;
    println!("Regenerated:     {}", fresh);

    provider.queue_response("Hôtel Officiel à Nice");
    let rewritten = session.rewrite_asset("brand-fr", &headline, AssetType::Headline).await?;
    println!("Rewritten:       {}\n", rewritten);

    provider.queue_response(
        json!({
            "name": "Brand + Spa",
            "ads": [{
                "finalUrl": "https://summerresort.example/spa",
                "headlines": ["SummerResort Spa"],
                "descriptions": ["Spa et piscine face à la mer."]
            }]
        })
        .to_string(),
    );
    let group = session.add_google_ad_group("brand-fr").await?;
    println!("Added ad group '{}' ({})", group.name, group.id);

    provider.queue_response(
        json!({
            "finalUrl": "https://summerresort.example",
            "headlines": ["Offres Été SummerResort"],
            "descriptions": ["Séjours famille à Nice."]
        })
        .to_string(),
    );
    let ad = session.add_google_ad("brand-fr", Some("core")).await?;
    println!("Added ad {} to 'Core Brand'\n", ad.id);

    session.delete_from_campaign("brand-fr", &path!["googleAds", "ads", 0, "headlines", 0])?;

    let google = session
        .campaigns()
        .get("brand-fr")
        .and_then(|c| c.google_ads.clone())
        .unwrap_or_default();
    for group in google.ad_groups() {
        println!("Ad group '{}':", group.name);
        for ad in google.ads_for_group(&group.id) {
            println!("  {:?}", ad.headlines);
        }
    }

    println!("\nProvider calls: {}", provider.call_count());
    Ok(())
}
