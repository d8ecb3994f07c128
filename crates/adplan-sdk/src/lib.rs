//! AdPlan SDK
//!
//! High-level API for planning multi-channel ad campaigns from a creative
//! brief: a [`PlannerSession`] walks a plan through the summary and details
//! stages and edits it in place, a [`PlannerBuilder`] wires it to
//! configuration, credentials and the provider.

pub mod builder;
pub mod config;
pub mod error;
pub mod library;
pub mod session;
pub mod telemetry;

// Re-export main types
pub use builder::PlannerBuilder;
pub use config::PlannerConfig;
pub use error::{Result, SdkError};
pub use library::{AssetLibrary, LibraryContents, ASSET_LIBRARY_STORE_KEY};
pub use session::{PlanStage, PlannerSession};
pub use telemetry::init_tracing;

// Re-export commonly used types from dependencies
pub use adplan_core::{path, CampaignPlan, Channel, PathSegment, SummaryPlan};
pub use adplan_llm::{AssetType, ManualOverrides};
