//! Market definitions
//!
//! A market is either a single country or a multi-country cluster. Clusters use
//! the `WW` code (or a `+`-joined composite code for ad-hoc groupings) and carry
//! the union of their constituents' browser languages.

use serde::{Deserialize, Serialize};

/// ISO code used for multi-country clustered campaigns
pub const CLUSTER_ISO: &str = "WW";

/// Separator used in composite ad-hoc cluster codes, e.g. `FR+DE`
pub const COMPOSITE_SEPARATOR: char = '+';

/// A targeted market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Display name, comma-joined for clusters
    pub name: String,

    /// ISO 3166-1 alpha-2 code, `WW`, or a composite code
    pub iso: String,

    /// Browser language targets (BCP-47), de-duplicated, insertion ordered
    #[serde(default)]
    pub browser_langs: Vec<String>,
}

impl Market {
    /// Create a new market
    pub fn new(name: impl Into<String>, iso: impl Into<String>, browser_langs: Vec<String>) -> Self {
        let mut market = Self {
            name: name.into(),
            iso: iso.into(),
            browser_langs: Vec::with_capacity(browser_langs.len()),
        };
        market.extend_langs(browser_langs);
        market
    }

    /// Whether this market groups several countries
    pub fn is_cluster(&self) -> bool {
        self.iso == CLUSTER_ISO || self.iso.contains(COMPOSITE_SEPARATOR)
    }

    /// Constituent country names as encoded in `name`
    pub fn constituent_names(&self) -> Vec<&str> {
        self.name
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// First browser language tag, the default ad language for this market
    pub fn primary_language(&self) -> Option<&str> {
        self.browser_langs.first().map(String::as_str)
    }

    /// Append language tags, skipping ones already present
    pub fn extend_langs<I, S>(&mut self, langs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for lang in langs {
            let lang = lang.into();
            if !self.browser_langs.contains(&lang) {
                self.browser_langs.push(lang);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_dedupes_langs_in_order() {
        let market = Market::new(
            "Switzerland",
            "CH",
            vec!["de-CH".into(), "fr-CH".into(), "de-CH".into(), "it-CH".into()],
        );
        assert_eq!(market.browser_langs, vec!["de-CH", "fr-CH", "it-CH"]);
        assert_eq!(market.primary_language(), Some("de-CH"));
    }

    #[test]
    fn test_cluster_detection() {
        let single = Market::new("France", "FR", vec!["fr-FR".into()]);
        let ww = Market::new("Spain, Italy", "WW", vec![]);
        let composite = Market::new("France, Germany", "FR+DE", vec![]);

        assert!(!single.is_cluster());
        assert!(ww.is_cluster());
        assert!(composite.is_cluster());
    }

    #[test]
    fn test_constituent_names() {
        let market = Market::new("Spain,  Italy , ", "WW", vec![]);
        assert_eq!(market.constituent_names(), vec!["Spain", "Italy"]);
    }

    #[test]
    fn test_market_serde_uses_browser_langs_key() {
        let market = Market::new("Japan", "JP", vec!["ja-JP".into()]);
        let json = serde_json::to_value(&market).unwrap();
        assert_eq!(json["browserLangs"][0], "ja-JP");

        let back: Market = serde_json::from_value(json).unwrap();
        assert_eq!(back, market);
    }
}
