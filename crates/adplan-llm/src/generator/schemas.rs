//! Response schemas for the generation stages
//!
//! Each schema is sent to the provider as the structured-output contract and
//! reused to repair ids and validate what comes back.

use adplan_core::types::{limits, FieldType, Schema, SchemaField};

fn id_field() -> SchemaField {
    SchemaField::new("id", FieldType::String)
        .required()
        .with_description("A unique identifier for this object, can be a random string.")
}

fn strings() -> FieldType {
    FieldType::array(FieldType::String)
}

fn channel_field() -> SchemaField {
    SchemaField::new("channel", FieldType::enumeration(["Google", "Meta", "TikTok"]))
        .required()
        .with_description("The advertising channel for the campaign.")
}

pub fn market_schema() -> Schema {
    Schema::new("Market")
        .with_description("The market this specific campaign is targeting.")
        .add_field(
            SchemaField::new("name", FieldType::String)
                .required()
                .with_description("Full name of the country or a comma-separated list for multi-country campaigns, e.g., 'United States' or 'France, Germany, Spain'."),
        )
        .add_field(
            SchemaField::new("iso", FieldType::String)
                .required()
                .with_description("Two-letter ISO 3166-1 alpha-2 country code, e.g., 'US', or 'WW' for multi-country campaigns."),
        )
        .add_field(
            SchemaField::new("browserLangs", strings())
                .required()
                .with_description("List of the browser language targets for this market, e.g., ['en-US', 'en-GB']"),
        )
}

/// Fields shared by summaries and full campaigns
fn campaign_fields(schema: Schema) -> Schema {
    schema
        .add_field(id_field())
        .add_field(channel_field())
        .add_field(
            SchemaField::new("campaignName", FieldType::String)
                .required()
                .with_description("A structured campaign name, e.g., '[US]-Hotel-PMax-EN' or '[FR]-Conversions-Brand-FR'."),
        )
        .add_field(
            SchemaField::new("campaignType", FieldType::String)
                .required()
                .with_description("The specific type of the campaign, e.g., for Google: 'PMax', 'Brand Search'; for Meta: 'Conversions', 'Awareness'; for TikTok: 'Video Views'."),
        )
        .add_field(SchemaField::new("market", FieldType::object(market_schema())).required())
        .add_field(
            SchemaField::new("languages", FieldType::bounded_array(FieldType::String, 1, 1))
                .required()
                .with_description("A list containing exactly one language code for the ad copy, e.g., ['en']"),
        )
}

pub fn summary_schema() -> Schema {
    campaign_fields(Schema::new("CampaignSummary"))
}

/// Operation A output: an array of summaries
pub fn summary_plan_schema() -> FieldType {
    FieldType::array(FieldType::object(summary_schema()))
}

pub fn asset_group_schema() -> Schema {
    Schema::new("AssetGroup")
        .add_field(id_field())
        .add_field(SchemaField::new("name", FieldType::String).required())
        .add_field(SchemaField::new("finalUrl", FieldType::String).required())
        .add_field(
            SchemaField::new("headlines", FieldType::bounded_array(FieldType::String, 3, 5))
                .required()
                .with_description("3-5 headlines, each under 30 characters."),
        )
        .add_field(
            SchemaField::new("longHeadlines", FieldType::bounded_array(FieldType::String, 1, 3))
                .required()
                .with_description("1-3 long headlines, each under 90 characters."),
        )
        .add_field(
            SchemaField::new("descriptions", FieldType::bounded_array(FieldType::String, 2, 4))
                .required()
                .with_description("2-4 descriptions, each under 90 characters."),
        )
}

fn assignment_target_schema() -> Schema {
    Schema::new("AssignmentTarget")
        .add_field(SchemaField::new("source", FieldType::enumeration(["plan", "external"])).required())
        .add_field(SchemaField::new("adGroupId", FieldType::String))
        .add_field(SchemaField::new("campaignName", FieldType::String))
        .add_field(SchemaField::new("adGroupName", FieldType::String))
}

fn external_assignment_schema() -> Schema {
    Schema::new("ExternalAssignment")
        .add_field(SchemaField::new("campaignName", FieldType::String).required())
        .add_field(SchemaField::new("adGroupName", FieldType::String).required())
}

/// A Google responsive search ad
pub fn ad_schema() -> Schema {
    Schema::new("Ad")
        .add_field(id_field())
        .add_field(SchemaField::new("finalUrl", FieldType::String).required())
        .add_field(
            SchemaField::new(
                "headlines",
                FieldType::bounded_array(FieldType::String, 1, limits::AD_HEADLINES),
            )
            .required()
            .with_description("Up to 15 headlines, each under 30 characters."),
        )
        .add_field(
            SchemaField::new(
                "descriptions",
                FieldType::bounded_array(FieldType::String, 1, limits::AD_DESCRIPTIONS),
            )
            .required()
            .with_description("Up to 4 descriptions, each under 90 characters."),
        )
        .add_field(SchemaField::new("keywords", strings()))
        .add_field(
            SchemaField::new("assignedAdGroupId", FieldType::String)
                .with_description("Id of the ad group this ad belongs to."),
        )
        .add_field(SchemaField::new(
            "assignedExternal",
            FieldType::object(external_assignment_schema()),
        ))
        .add_field(SchemaField::new(
            "assignedTargets",
            FieldType::array(FieldType::object(assignment_target_schema())),
        ))
}

/// A Google ad group; nested ads are accepted and later lifted
pub fn ad_group_schema() -> Schema {
    Schema::new("AdGroup")
        .add_field(id_field())
        .add_field(SchemaField::new("name", FieldType::String).required())
        .add_field(SchemaField::new(
            "ads",
            FieldType::array(FieldType::object(ad_schema())),
        ))
}

pub fn google_ads_schema() -> Schema {
    Schema::new("GoogleAds")
        .add_field(SchemaField::new("hotelPropertyFeed", FieldType::String))
        .add_field(SchemaField::new(
            "assetGroups",
            FieldType::array(FieldType::object(asset_group_schema())),
        ))
        .add_field(SchemaField::new(
            "adGroups",
            FieldType::array(FieldType::object(ad_group_schema())),
        ))
        .add_field(SchemaField::new(
            "ads",
            FieldType::array(FieldType::object(ad_schema())),
        ))
}

fn meta_schema() -> Schema {
    let ad = Schema::new("MetaAd")
        .add_field(id_field())
        .add_field(SchemaField::new("primaryText", FieldType::String).required())
        .add_field(SchemaField::new("headline", FieldType::String).required())
        .add_field(SchemaField::new("description", FieldType::String).required());
    let ad_set = Schema::new("MetaAdSet")
        .add_field(id_field())
        .add_field(SchemaField::new("name", FieldType::String).required())
        .add_field(
            SchemaField::new("ads", FieldType::array_min(FieldType::object(ad), 1)).required(),
        );
    Schema::new("MetaCampaign").add_field(
        SchemaField::new("adSets", FieldType::array(FieldType::object(ad_set))).required(),
    )
}

fn tiktok_schema() -> Schema {
    let ad = Schema::new("TikTokAd")
        .add_field(id_field())
        .add_field(SchemaField::new("adText", FieldType::String).required());
    let ad_group = Schema::new("TikTokAdGroup")
        .add_field(id_field())
        .add_field(SchemaField::new("name", FieldType::String).required())
        .add_field(
            SchemaField::new("ads", FieldType::array_min(FieldType::object(ad), 1)).required(),
        );
    Schema::new("TikTokCampaign").add_field(
        SchemaField::new("adGroups", FieldType::array(FieldType::object(ad_group))).required(),
    )
}

pub fn full_campaign_schema() -> Schema {
    campaign_fields(Schema::new("FullCampaign"))
        .add_field(SchemaField::new("googleAds", FieldType::object(google_ads_schema())))
        .add_field(SchemaField::new("meta", FieldType::object(meta_schema())))
        .add_field(SchemaField::new("tikTok", FieldType::object(tiktok_schema())))
}

/// Operation B output: an array of full campaigns
pub fn details_plan_schema() -> FieldType {
    FieldType::array(FieldType::object(full_campaign_schema()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_schema_requires_single_language() {
        let schema = summary_schema();
        assert!(schema.requires_id());
        let languages = schema.get_field("languages").unwrap();
        assert_eq!(
            languages.field_type,
            FieldType::bounded_array(FieldType::String, 1, 1)
        );
    }

    #[test]
    fn test_summary_plan_provider_format() {
        let rendered = summary_plan_schema().to_provider_schema();
        assert_eq!(rendered["type"], "ARRAY");
        assert_eq!(rendered["items"]["properties"]["channel"]["enum"][2], "TikTok");
        assert_eq!(
            rendered["items"]["properties"]["market"]["required"],
            serde_json::json!(["name", "iso", "browserLangs"])
        );
    }

    #[test]
    fn test_every_creative_object_requires_id() {
        assert!(asset_group_schema().requires_id());
        assert!(ad_group_schema().requires_id());
        assert!(ad_schema().requires_id());
        assert!(full_campaign_schema().requires_id());
        assert!(!google_ads_schema().requires_id());
    }
}
