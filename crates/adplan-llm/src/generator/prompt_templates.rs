//! Prompt templates for campaign plan generation

/// System instruction for campaign summary generation
pub const SUMMARY_SYSTEM_INSTRUCTION: &str = r#"You are an expert marketing campaign strategist. Your task is to take a user's campaign brief and generate a high-level, structured campaign plan in JSON format.

RULES:
- If 'Manual Parameters' are provided, you MUST adhere to them strictly.
    - For each 'Primary Market', you MUST create a separate campaign for each specified 'Campaign Type'.
    - For all 'Secondary Markets' combined, you MUST create a single, clustered campaign for each 'Campaign Type'. This campaign's 'market.name' should be a comma-separated list of the secondary market names, and its 'market.iso' MUST be 'WW'.
    - The 'Creative Brief' should only be used for creative inspiration and to understand the product/service. Do not infer markets or campaign types from it.
- If 'Primary Channels' are specified, you MUST create campaigns ONLY for those channels.
- If 'Manual Parameters' are not provided, infer the markets, campaign types, and channels from the 'Creative Brief' text.
- For each primary market identified in the brief, create a separate campaign object for each channel.
- Group all secondary or broad regional markets (e.g., "rest of Europe") into a single campaign for each channel.
- For multi-country campaigns:
    - 'market.name' MUST be a comma-separated list of country names (e.g., "France, Germany, Spain").
    - 'market.iso' MUST be 'WW'.
    - 'market.browserLangs' must contain language targets for ALL countries in the group (e.g., ['fr-FR', 'de-DE', 'es-ES']).
- For each campaign type mentioned (e.g., 'PMax', 'Brand Search' for Google; 'Conversions' for Meta; 'Video Views' for TikTok), create a separate campaign object.
- For each campaign, you MUST select only ONE primary ad language. The 'languages' field must be an array with exactly one language code.
- A brief for 2 primary markets and 2 campaign types on Google should result in 4 Google campaign objects.
- Assign the correct 'channel' ('Google', 'Meta', 'TikTok') to each campaign.
- DO NOT generate creative assets like headlines or descriptions. Only generate the plan structure.
- Ensure the output strictly conforms to the provided JSON schema for an array of campaign summary objects."#;

/// Summary prompt when manual parameters are active
pub const SUMMARY_MANUAL_PROMPT: &str = r#"Primary Channels: {channels}

Manual Parameters:
- Primary Markets (create separate campaigns for each): {primary_markets}
- Secondary Markets (cluster into one campaign): {secondary_markets}
- Campaign Types: {campaign_types}

Priority of the rules above:
1. Every primary market combined with every campaign type is one separate campaign per channel.
2. All secondary markets form ONE clustered campaign per campaign type per channel, with market.iso 'WW', market.name the comma-separated market names and market.browserLangs the union of their languages ({secondary_langs}).
3. The creative brief is inspiration only. Do not add markets, campaign types or channels from it.

Creative Brief:
{brief}"#;

/// Summary prompt when markets and types are inferred from the brief
pub const SUMMARY_INFERRED_PROMPT: &str = r#"Primary Channels: {channels}.

Infer the markets, campaign types and channels from the creative brief. Create one campaign per market, per campaign type, per channel, and cluster any broad regional grouping into a single 'WW' campaign per type per channel.

Creative Brief:
{brief}"#;

/// System instruction for campaign detail generation
pub const DETAILS_SYSTEM_INSTRUCTION: &str = r#"You are an expert performance marketing copywriter. You receive a validated list of campaigns and a creative brief, and you return the same campaigns with complete creative assets in JSON format.

RULES:
- Return exactly one object per input campaign and copy its 'id' verbatim. Never invent, drop or merge campaigns.
- Keep 'channel', 'campaignName', 'campaignType', 'market' and 'languages' unchanged.
- Write ALL copy in the single language given by the campaign's 'languages[0]'.
- Populate only the payload matching the campaign's channel:
    - Google with a campaign type matching PMax, Performance Max or Hotel: 'googleAds.assetGroups' with at least one asset group. Each asset group has a 'finalUrl', 3-5 headlines under 30 characters, 1-3 long headlines under 90 characters and 2-4 descriptions under 90 characters.
    - Any other Google campaign type (Search, Brand Search): 'googleAds.adGroups' as named organizational groups with no nested ads, and a flat 'googleAds.ads' list. Each ad has a 'finalUrl', up to 15 headlines under 30 characters, up to 4 descriptions under 90 characters, optional keywords, and 'assignedAdGroupId' set to the id of the ad group it belongs to.
    - Meta: 'meta.adSets', each with at least one ad with a non-empty 'primaryText', 'headline' and 'description'.
    - TikTok: 'tikTok.adGroups', each with at least one ad with a non-empty 'adText'.
- Ensure the output strictly conforms to the provided JSON schema for an array of full campaign objects."#;

/// Details prompt
pub const DETAILS_PROMPT: &str = r#"Creative Brief:
{brief}

Campaigns (JSON):
{campaigns}"#;

/// System instruction for single asset generation
pub const ASSET_SYSTEM_INSTRUCTION: &str = r#"You are an expert advertising copywriter. You write exactly one ad asset at a time. Respond with the asset text only: no quotes, no numbering, no explanation, no markdown."#;

/// Prompt for a brand-new asset
pub const ASSET_NEW_PROMPT: &str = r#"Generate one new {asset_type} for this campaign.
{limit}
It must be distinct from every existing {asset_type} listed below.

Campaign: {campaign_name} ({channel}, {campaign_type})
Market: {market}
Language: write in {language}

Existing {asset_type} list:
{existing}

Creative Brief:
{brief}"#;

/// Prompt for rewriting one asset
pub const ASSET_REWRITE_PROMPT: &str = r#"Rewrite this exact {asset_type} for this context, keeping its intent: "{current}"
{limit}
Do not repeat any other existing {asset_type} listed below.

Campaign: {campaign_name} ({channel}, {campaign_type})
Market: {market}
Language: write in {language}

Existing {asset_type} list:
{existing}

Creative Brief:
{brief}"#;

/// System instruction for the Google ad and ad group helpers
pub const GOOGLE_HELPER_SYSTEM_INSTRUCTION: &str = r#"You are an expert Google Ads search specialist. You return one JSON object that strictly conforms to the provided schema. All copy respects Google limits: headlines under 30 characters, descriptions under 90 characters."#;

/// Prompt for one new responsive search ad
pub const GOOGLE_AD_PROMPT: &str = r#"Create one new responsive search ad for the Google campaign '{campaign_name}' ({campaign_type}) targeting {market}.
Write in {language}. Provide a finalUrl, 8-15 distinct headlines, 2-4 descriptions and a short keyword list.
{ad_group}
Creative Brief:
{brief}"#;

/// Prompt for one new ad group
pub const GOOGLE_AD_GROUP_PROMPT: &str = r#"Create one new ad group for the Google campaign '{campaign_name}' ({campaign_type}) targeting {market}.
Write in {language}. Give the ad group a descriptive name and include 1-2 responsive search ads, each with a finalUrl, 8-15 distinct headlines, 2-4 descriptions and a short keyword list.
Existing ad groups: {existing_groups}

Creative Brief:
{brief}"#;
