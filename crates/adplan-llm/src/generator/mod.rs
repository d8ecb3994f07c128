//! Campaign plan generation
//!
//! LLM-backed stages of the planning workflow:
//! - Summaries: brief to a list of campaigns to validate
//! - Details: validated campaigns to full creative payloads
//! - Assets: one headline, description or name at a time
//! - Google helpers: one search ad or ad group at a time
//!
//! Structured stages share one pipeline: the composed prompt carries a
//! response schema, and the reply is fence-stripped, parsed, id-repaired and
//! validated against that schema before it is decoded.
//!
//! # Example
//! ```no_run
//! use adplan_llm::{GeneratorConfig, ManualOverrides, MockProvider, PlanGenerator};
//! use adplan_core::Channel;
//! use std::sync::Arc;
//!
//! # async fn example() -> adplan_llm::Result<()> {
//! let provider = Arc::new(MockProvider::new());
//! let generator = PlanGenerator::new(provider, GeneratorConfig::default().with_temperature(0.4));
//!
//! let overrides = ManualOverrides::from_iso_codes(&["FR", "DE"], &[], &["PMax"]);
//! let brief = "Summer promotion for our seaside resort";
//! let summaries = generator
//!     .generate_summaries(brief, &[Channel::Google], Some(&overrides))
//!     .await?;
//! let campaigns = generator.generate_details(brief, &summaries).await?;
//!
//! println!("Planned {} campaigns", campaigns.len());
//! # Ok(())
//! # }
//! ```

pub mod asset_generator;
pub mod composer;
pub mod config;
pub mod details_generator;
pub mod google_generator;
pub mod ids;
pub mod json_extractor;
pub mod normalize;
pub mod pipeline;
pub mod plan_generator;
pub mod prompt_templates;
pub mod reconcile;
pub mod schemas;
pub mod summary_generator;

// Re-export main types
pub use asset_generator::{AssetGenerator, AssetRequest, AssetType};
pub use composer::ComposedPrompt;
pub use config::GeneratorConfig;
pub use details_generator::DetailsGenerator;
pub use google_generator::GoogleAdsGenerator;
pub use json_extractor::{extract_json, strip_code_fence};
pub use normalize::attach_ad_group;
pub use plan_generator::PlanGenerator;
pub use reconcile::{reconcile_summaries, ManualOverrides};
pub use summary_generator::SummaryGenerator;
