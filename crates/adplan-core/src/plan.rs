//! Plan editor
//!
//! An immutable list of campaigns edited by campaign id + tree path. Edits run
//! through the path primitives on the campaign's JSON form and the result is
//! deserialized back into the typed item, so an edit that breaks the campaign's
//! shape is rejected instead of stored.

use crate::error::Result;
use crate::path::{append_at_path, delete_at_path, get_at_path, set_at_path, PathSegment};
use crate::types::{CampaignSummary, FullCampaign};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An entry of a plan, addressable by id
pub trait PlanItem: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
}

impl PlanItem for CampaignSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PlanItem for FullCampaign {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Immutable ordered list of campaigns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan<T> {
    items: Vec<T>,
}

/// Plan of the summary stage
pub type SummaryPlan = Plan<CampaignSummary>;

/// Plan of the details stage
pub type CampaignPlan = Plan<FullCampaign>;

impl<T> Default for Plan<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Plan<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: PlanItem> Plan<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(PlanItem::id).collect()
    }

    /// Read a value inside a campaign
    pub fn value_at(&self, id: &str, path: &[PathSegment]) -> Option<Value> {
        let item = self.get(id)?;
        let tree = serde_json::to_value(item).ok()?;
        get_at_path(&tree, path).cloned()
    }

    /// Set the value at `path` inside campaign `id`
    pub fn update(&self, id: &str, path: &[PathSegment], value: Value) -> Result<Self> {
        self.edit(id, |tree| set_at_path(tree, path, value))
    }

    /// Append `value` to the array at `path` inside campaign `id`
    pub fn add(&self, id: &str, path: &[PathSegment], value: Value) -> Result<Self> {
        self.edit(id, |tree| append_at_path(tree, path, value))
    }

    /// Remove the element at `path` inside campaign `id`
    pub fn delete(&self, id: &str, path: &[PathSegment]) -> Result<Self> {
        self.edit(id, |tree| delete_at_path(tree, path))
    }

    /// Swap in a whole campaign with the same id
    pub fn replace(&self, item: T) -> Self {
        let items = self
            .items
            .iter()
            .map(|existing| {
                if existing.id() == item.id() {
                    item.clone()
                } else {
                    existing.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// Bind a campaign id for repeated edits
    pub fn campaign<'a>(&'a self, id: &'a str) -> CampaignHandle<'a, T> {
        CampaignHandle { plan: self, id }
    }

    fn edit<F>(&self, id: &str, op: F) -> Result<Self>
    where
        F: FnOnce(&Value) -> Result<Value>,
    {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            tracing::debug!("Campaign {} not in plan, edit ignored", id);
            return Ok(self.clone());
        };

        let tree = serde_json::to_value(&self.items[index])?;
        let edited: T = serde_json::from_value(op(&tree)?)?;

        let mut items = self.items.clone();
        items[index] = edited;
        Ok(Self { items })
    }
}

/// A plan bound to one campaign id
#[derive(Debug)]
pub struct CampaignHandle<'a, T> {
    plan: &'a Plan<T>,
    id: &'a str,
}

impl<'a, T: PlanItem> CampaignHandle<'a, T> {
    pub fn id(&self) -> &str {
        self.id
    }

    pub fn exists(&self) -> bool {
        self.plan.get(self.id).is_some()
    }

    pub fn get(&self) -> Option<&'a T> {
        self.plan.get(self.id)
    }

    pub fn update(&self, path: &[PathSegment], value: Value) -> Result<Plan<T>> {
        self.plan.update(self.id, path, value)
    }

    pub fn add(&self, path: &[PathSegment], value: Value) -> Result<Plan<T>> {
        self.plan.add(self.id, path, value)
    }

    pub fn delete(&self, path: &[PathSegment]) -> Result<Plan<T>> {
        self.plan.delete(self.id, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::path;
    use crate::types::{Channel, Market};
    use serde_json::json;

    fn summary(id: &str, channel: Channel) -> CampaignSummary {
        CampaignSummary {
            id: id.to_string(),
            channel,
            campaign_name: format!("[FR]-{}", id),
            campaign_type: "PMax".to_string(),
            market: Market::new("France", "FR", vec!["fr-FR".into()]),
            languages: vec!["fr-FR".to_string()],
        }
    }

    fn create_test_plan() -> SummaryPlan {
        Plan::new(vec![summary("c1", Channel::Google), summary("c2", Channel::Meta)])
    }

    #[test]
    fn test_update_field() {
        let plan = create_test_plan();
        let next = plan
            .update("c1", &path!["campaignName"], json!("Renamed"))
            .unwrap();

        assert_eq!(next.get("c1").unwrap().campaign_name, "Renamed");
        assert_eq!(plan.get("c1").unwrap().campaign_name, "[FR]-c1");
        assert_eq!(next.get("c2"), plan.get("c2"));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let plan = create_test_plan();
        let next = plan.update("zzz", &path!["campaignName"], json!("X")).unwrap();
        assert_eq!(next, plan);
        assert_eq!(plan.delete("zzz", &path!["languages", 0]).unwrap(), plan);
    }

    #[test]
    fn test_edit_breaking_shape_is_rejected() {
        let plan = create_test_plan();
        let result = plan.update("c1", &path!["channel"], json!("Bing"));
        assert!(matches!(result, Err(CoreError::Serialization(_))));

        let result = plan.update("c1", &path!["market", "iso", "x"], json!(1));
        assert!(matches!(result, Err(CoreError::InvalidPath(_))));
    }

    #[test]
    fn test_add_and_delete() {
        let plan = create_test_plan();
        let next = plan
            .add("c2", &path!["market", "browserLangs"], json!("en-FR"))
            .unwrap();
        assert_eq!(
            next.get("c2").unwrap().market.browser_langs,
            vec!["fr-FR", "en-FR"]
        );

        let next = next
            .delete("c2", &path!["market", "browserLangs", 0])
            .unwrap();
        assert_eq!(next.get("c2").unwrap().market.browser_langs, vec!["en-FR"]);
    }

    #[test]
    fn test_campaign_handle() {
        let plan: CampaignPlan = Plan::new(vec![summary("c1", Channel::Google).into()]);
        let handle = plan.campaign("c1");
        assert!(handle.exists());

        let next = handle
            .add(
                &path!["googleAds", "adGroups"],
                json!({ "id": "g1", "name": "Brand Core" }),
            )
            .unwrap();
        let google = next.get("c1").unwrap().google_ads.as_ref().unwrap();
        assert_eq!(google.ad_groups()[0].name, "Brand Core");

        let next = next
            .campaign("c1")
            .update(&path!["googleAds", "adGroups", 0, "name"], json!("Brand Generic"))
            .unwrap();
        assert_eq!(
            next.value_at("c1", &path!["googleAds", "adGroups", 0, "name"]),
            Some(json!("Brand Generic"))
        );

        assert!(!plan.campaign("nope").exists());
    }

    #[test]
    fn test_replace_ids_and_serde() {
        let plan = create_test_plan();
        let mut renamed = summary("c2", Channel::TikTok);
        renamed.campaign_name = "TikTok FR".into();

        let next = plan.replace(renamed);
        assert_eq!(next.ids(), vec!["c1", "c2"]);
        assert_eq!(next.get("c2").unwrap().channel, Channel::TikTok);

        let json = serde_json::to_value(&next).unwrap();
        assert!(json.is_array());
        let back: SummaryPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, next);
        assert_eq!(back.into_items().len(), 2);
    }
}
