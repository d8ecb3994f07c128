//! AdPlan Core - Campaign plan model and editing primitives
//!
//! This crate provides the fundamental types shared by the AdPlan crates:
//! - Market / language catalog
//! - Campaign plan model (summaries and full per-channel campaigns)
//! - Provider-facing response schemas and their validator
//! - Path-based mutation engine and the plan editor built on it
//! - Error types

pub mod catalog;
pub mod error;
pub mod path;
pub mod plan;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use path::{append_at_path, delete_at_path, get_at_path, set_at_path, PathSegment};
pub use plan::{CampaignHandle, CampaignPlan, Plan, PlanItem, SummaryPlan};
pub use types::{
    Ad, AdGroup, AssetGroup, AssignmentSource, AssignmentTarget, CampaignKind, CampaignSummary,
    Channel, ExternalAssignment, FullCampaign, GoogleAds, Market, MetaAd, MetaAdSet, MetaCampaign,
    TikTokAd, TikTokAdGroup, TikTokCampaign,
};
