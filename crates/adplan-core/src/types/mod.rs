//! Type system for AdPlan
//!
//! This module contains the campaign plan model and the schema machinery used
//! at the generation boundary:
//! - Markets and campaign structures
//! - Response schema definitions
//! - Value validators

pub mod campaign;
pub mod market;
pub mod schema;
pub mod validator;

pub use campaign::{
    canonical_brand_type, is_asset_group_type, limits, plan_ad_group_targets, Ad, AdGroup,
    AssetGroup, AssignmentSource, AssignmentTarget, CampaignKind, CampaignSummary, Channel,
    ExternalAssignment, FullCampaign, GoogleAds, MetaAd, MetaAdSet, MetaCampaign, PlanAdGroupRef,
    TikTokAd, TikTokAdGroup, TikTokCampaign, BRAND_SEARCH_TYPE,
};
pub use market::{Market, CLUSTER_ISO};
pub use schema::{FieldType, Schema, SchemaField};
pub use validator::{value_type_name, ValidationError, Validator};
