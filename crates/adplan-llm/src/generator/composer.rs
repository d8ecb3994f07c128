//! Prompt composition
//!
//! Builds the instruction text and, for the structured stages, the response
//! schema of every generation call. Composition is deterministic: the same
//! inputs always give the same prompt.

use crate::error::{LLMError, Result, Stage};
use crate::generator::asset_generator::AssetRequest;
use crate::generator::prompt_templates::*;
use crate::generator::reconcile::ManualOverrides;
use crate::generator::schemas;
use adplan_core::types::{
    canonical_brand_type, AdGroup, CampaignSummary, Channel, FieldType, FullCampaign, Market,
};
use serde_json::Value;

/// A composed generation call
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub stage: Stage,
    pub system: String,
    pub prompt: String,
    /// Response schema, `None` for free-text stages
    pub schema: Option<FieldType>,
}

impl ComposedPrompt {
    /// Schema in the provider's structured-output format
    pub fn provider_schema(&self) -> Option<Value> {
        self.schema.as_ref().map(FieldType::to_provider_schema)
    }
}

fn join_channels(channels: &[Channel]) -> String {
    channels
        .iter()
        .map(Channel::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_market_names(markets: &[Market]) -> String {
    markets
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_market(market: &Market) -> String {
    format!("{} ({})", market.name, market.iso)
}

fn campaign_language(campaign: &FullCampaign) -> &str {
    campaign.language().unwrap_or("en")
}

/// Fill `{name}` placeholders in a single pass
///
/// Inserted values are not scanned again, so a brief that itself contains
/// `{campaigns}` or `{existing}` reaches the model verbatim. Placeholders
/// with no value are kept as written.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let filled = after.find('}').and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match filled {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Operation A: brief to campaign summaries
pub fn compose_summary(
    brief: &str,
    channels: &[Channel],
    overrides: Option<&ManualOverrides>,
) -> ComposedPrompt {
    let prompt = match overrides.filter(|o| o.is_active()) {
        Some(overrides) => {
            let secondary = adplan_core::catalog::cluster_market(&overrides.secondary_markets);
            fill_template(
                SUMMARY_MANUAL_PROMPT,
                &[
                    ("channels", join_channels(channels).as_str()),
                    ("primary_markets", join_market_names(&overrides.primary_markets).as_str()),
                    ("secondary_markets", join_market_names(&overrides.secondary_markets).as_str()),
                    ("campaign_types", overrides.distinct_campaign_types().join(", ").as_str()),
                    ("secondary_langs", secondary.browser_langs.join(", ").as_str()),
                    ("brief", brief.trim()),
                ],
            )
        }
        None => fill_template(
            SUMMARY_INFERRED_PROMPT,
            &[("channels", join_channels(channels).as_str()), ("brief", brief.trim())],
        ),
    };

    ComposedPrompt {
        stage: Stage::Summary,
        system: SUMMARY_SYSTEM_INSTRUCTION.to_string(),
        prompt,
        schema: Some(schemas::summary_plan_schema()),
    }
}

/// Route loose Google brand types to the search branch
pub fn canonicalize_summaries(summaries: &[CampaignSummary]) -> Vec<CampaignSummary> {
    summaries
        .iter()
        .map(|summary| {
            let mut summary = summary.clone();
            if let Some(canonical) = canonical_brand_type(summary.channel, &summary.campaign_type) {
                tracing::debug!(
                    "Campaign {} type '{}' canonicalized to '{}'",
                    summary.id,
                    summary.campaign_type,
                    canonical
                );
                summary.campaign_type = canonical.to_string();
            }
            summary
        })
        .collect()
}

/// Operation B: summaries to full campaigns
///
/// Expects summaries already passed through [`canonicalize_summaries`].
pub fn compose_details(brief: &str, summaries: &[CampaignSummary]) -> Result<ComposedPrompt> {
    let campaigns = serde_json::to_string_pretty(summaries)
        .map_err(|e| LLMError::generation(Stage::Details, e.to_string()))?;

    Ok(ComposedPrompt {
        stage: Stage::Details,
        system: DETAILS_SYSTEM_INSTRUCTION.to_string(),
        prompt: fill_template(
            DETAILS_PROMPT,
            &[("campaigns", campaigns.as_str()), ("brief", brief.trim())],
        ),
        schema: Some(schemas::details_plan_schema()),
    })
}

/// Operation C: one free-text asset
pub fn compose_asset(request: &AssetRequest<'_>) -> ComposedPrompt {
    let campaign = request.campaign;
    let template = match request.current {
        Some(_) => ASSET_REWRITE_PROMPT,
        None => ASSET_NEW_PROMPT,
    };
    let limit = match request.asset_type.char_limit() {
        Some(max) => format!("Keep it under {} characters.", max),
        None => String::new(),
    };

    let prompt = fill_template(
        template,
        &[
            ("asset_type", request.asset_type.label()),
            ("limit", limit.as_str()),
            ("current", request.current.unwrap_or_default()),
            ("campaign_name", campaign.campaign_name.as_str()),
            ("channel", campaign.channel.as_str()),
            ("campaign_type", campaign.campaign_type.as_str()),
            ("market", describe_market(&campaign.market).as_str()),
            ("language", campaign_language(campaign)),
            ("existing", bullet_list(request.existing).as_str()),
            ("brief", request.brief.trim()),
        ],
    );

    ComposedPrompt {
        stage: Stage::Asset,
        system: ASSET_SYSTEM_INSTRUCTION.to_string(),
        prompt,
        schema: None,
    }
}

/// Helper: one new Google search ad
pub fn compose_google_ad(
    brief: &str,
    campaign: &FullCampaign,
    ad_group: Option<&AdGroup>,
) -> ComposedPrompt {
    let ad_group_line = match ad_group {
        Some(group) => format!("The ad belongs to the ad group '{}'.\n", group.name),
        None => String::new(),
    };

    let prompt = fill_template(
        GOOGLE_AD_PROMPT,
        &[
            ("campaign_name", campaign.campaign_name.as_str()),
            ("campaign_type", campaign.campaign_type.as_str()),
            ("market", describe_market(&campaign.market).as_str()),
            ("language", campaign_language(campaign)),
            ("ad_group", ad_group_line.as_str()),
            ("brief", brief.trim()),
        ],
    );

    ComposedPrompt {
        stage: Stage::GoogleAd,
        system: GOOGLE_HELPER_SYSTEM_INSTRUCTION.to_string(),
        prompt,
        schema: Some(FieldType::object(schemas::ad_schema())),
    }
}

/// Helper: one new Google ad group
pub fn compose_google_ad_group(brief: &str, campaign: &FullCampaign) -> ComposedPrompt {
    let existing: Vec<String> = campaign
        .google_ads
        .iter()
        .flat_map(|g| g.ad_groups())
        .map(|g| g.name.clone())
        .collect();
    let existing = if existing.is_empty() {
        "(none)".to_string()
    } else {
        existing.join(", ")
    };

    let prompt = fill_template(
        GOOGLE_AD_GROUP_PROMPT,
        &[
            ("campaign_name", campaign.campaign_name.as_str()),
            ("campaign_type", campaign.campaign_type.as_str()),
            ("market", describe_market(&campaign.market).as_str()),
            ("language", campaign_language(campaign)),
            ("existing_groups", existing.as_str()),
            ("brief", brief.trim()),
        ],
    );

    ComposedPrompt {
        stage: Stage::GoogleAdGroup,
        system: GOOGLE_HELPER_SYSTEM_INSTRUCTION.to_string(),
        prompt,
        schema: Some(FieldType::object(schemas::ad_group_schema())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::asset_generator::AssetType;
    use adplan_core::catalog::market_for_iso;

    const BRIEF: &str = "Promote SummerResort in France and Germany";

    fn campaign(channel: Channel, campaign_type: &str) -> FullCampaign {
        let market = market_for_iso("FR").unwrap();
        CampaignSummary {
            id: "c1".into(),
            channel,
            campaign_name: "[FR]-Brand Search-FR".into(),
            campaign_type: campaign_type.into(),
            languages: vec!["fr-FR".into()],
            market,
        }
        .into()
    }

    #[test]
    fn test_summary_manual_branch() {
        let overrides = ManualOverrides::from_iso_codes(&["FR", "DE"], &["ES", "IT"], &["PMax"]);
        let composed = compose_summary(BRIEF, &[Channel::Google, Channel::Meta], Some(&overrides));

        assert_eq!(composed.stage, Stage::Summary);
        assert!(composed.prompt.starts_with("Primary Channels: Google, Meta"));
        assert!(composed
            .prompt
            .contains("- Primary Markets (create separate campaigns for each): France, Germany"));
        assert!(composed
            .prompt
            .contains("- Secondary Markets (cluster into one campaign): Spain, Italy"));
        assert!(composed.prompt.contains("es-ES, it-IT"));
        assert!(composed.prompt.contains("- Campaign Types: PMax"));
        assert!(composed.prompt.ends_with(BRIEF));
        assert!(composed.system.contains("exactly one language code"));
        assert_eq!(composed.provider_schema().unwrap()["type"], "ARRAY");
    }

    #[test]
    fn test_summary_inferred_branch() {
        let composed = compose_summary(BRIEF, &[Channel::TikTok], Some(&ManualOverrides::new()));
        assert!(composed.prompt.starts_with("Primary Channels: TikTok."));
        assert!(composed.prompt.contains("Infer the markets"));
        assert!(!composed.prompt.contains("Manual Parameters"));
        assert_eq!(composed, compose_summary(BRIEF, &[Channel::TikTok], None));
    }

    #[test]
    fn test_canonicalize_brand() {
        let summaries = vec![
            campaign(Channel::Google, "Brand").summary(),
            campaign(Channel::Google, "Hotel Ads").summary(),
            campaign(Channel::Meta, "Brand").summary(),
        ];
        let canonical = canonicalize_summaries(&summaries);
        assert_eq!(canonical[0].campaign_type, "Brand Search");
        assert_eq!(canonical[1].campaign_type, "Hotel Ads");
        assert_eq!(canonical[2].campaign_type, "Brand");
    }

    #[test]
    fn test_details_prompt_carries_ids() {
        let summaries = vec![campaign(Channel::Google, "Brand Search").summary()];
        let composed = compose_details(BRIEF, &summaries).unwrap();
        assert!(composed.prompt.contains("\"id\": \"c1\""));
        assert!(composed.system.contains("copy its 'id' verbatim"));
        assert!(composed.schema.is_some());
    }

    #[test]
    fn test_asset_new_vs_rewrite() {
        let campaign = campaign(Channel::Google, "Brand Search");
        let existing = vec!["Réservez en direct".to_string()];

        let new = compose_asset(
            &AssetRequest::new(BRIEF, &campaign, AssetType::Headline).with_existing(&existing),
        );
        assert!(new.prompt.starts_with("Generate one new headline"));
        assert!(new.prompt.contains("under 30 characters"));
        assert!(new.prompt.contains("- Réservez en direct"));
        assert!(new.prompt.contains("write in fr-FR"));
        assert!(new.schema.is_none());

        let rewrite = compose_asset(
            &AssetRequest::new(BRIEF, &campaign, AssetType::Headline)
                .with_existing(&existing)
                .rewriting("Réservez en direct"),
        );
        assert!(rewrite
            .prompt
            .starts_with("Rewrite this exact headline for this context, keeping its intent: \"Réservez en direct\""));
    }

    #[test]
    fn test_tiktok_ad_group_name_carries_limit() {
        let campaign = campaign(Channel::TikTok, "Traffic");
        let composed =
            compose_asset(&AssetRequest::new(BRIEF, &campaign, AssetType::TikTokAdGroupName));
        assert!(composed.prompt.starts_with("Generate one new TikTok ad group name"));
        assert!(composed.prompt.contains("under 100 characters"));
    }

    #[test]
    fn test_google_helpers() {
        let mut campaign = campaign(Channel::Google, "Brand Search");
        campaign.google_ads = Some(adplan_core::GoogleAds {
            ad_groups: Some(vec![AdGroup {
                id: "g1".into(),
                name: "Core Brand".into(),
                ads: vec![],
            }]),
            ..Default::default()
        });

        let group = compose_google_ad_group(BRIEF, &campaign);
        assert_eq!(group.stage, Stage::GoogleAdGroup);
        assert!(group.prompt.contains("Existing ad groups: Core Brand"));

        let ad = compose_google_ad(BRIEF, &campaign, campaign.google_ads.as_ref().map(|g| &g.ad_groups()[0]));
        assert!(ad.prompt.contains("ad group 'Core Brand'"));
        assert_eq!(ad.provider_schema().unwrap()["type"], "OBJECT");
    }

    #[test]
    fn test_fill_template_single_pass() {
        let filled = fill_template(
            "{a} and {b}, {unknown} {",
            &[("a", "{b}"), ("b", "two")],
        );
        assert_eq!(filled, "{b} and two, {unknown} {");
    }

    #[test]
    fn test_placeholders_in_brief_stay_verbatim() {
        let brief = "Use {campaigns} and {existing} as literal hashtags";
        let summaries = vec![campaign(Channel::Google, "Brand Search").summary()];

        let details = compose_details(brief, &summaries).unwrap();
        assert!(details.prompt.contains(brief));
        assert_eq!(details.prompt.matches("\"id\": \"c1\"").count(), 1);

        let campaign = campaign(Channel::Google, "Brand Search");
        let existing = vec!["Réservez en direct".to_string()];
        let asset = compose_asset(
            &AssetRequest::new(brief, &campaign, AssetType::Headline).with_existing(&existing),
        );
        assert!(asset.prompt.ends_with(brief));
        assert_eq!(asset.prompt.matches("- Réservez en direct").count(), 1);

        let mut named = campaign.clone();
        named.campaign_name = "[FR]-{brief}".into();
        let ad = compose_google_ad("Summer", &named, None);
        assert!(ad.prompt.contains("'[FR]-{brief}'"));
    }
}
