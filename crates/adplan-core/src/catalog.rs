//! Market / language catalog
//!
//! Static reference data mapping country codes to display names and default
//! browser-language tags, plus helpers that build single-country, clustered
//! (`WW`) and composite (`FR+DE`) markets from it.

use crate::types::market::{Market, CLUSTER_ISO, COMPOSITE_SEPARATOR};

/// Campaign types offered for manual selection
pub const ALL_CAMPAIGN_TYPES: [&str; 4] = ["PMax", "Brand", "Retargeting", "Hotel Ads"];

/// Campaign type used when a manual type list is empty
pub const DEFAULT_CAMPAIGN_TYPE: &str = "PMax";

/// ISO code of the market used when a manual market list is empty
pub const DEFAULT_MARKET_ISO: &str = "US";

/// A catalog country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    pub iso: &'static str,
    pub browser_langs: &'static [&'static str],
}

impl Country {
    /// Build a single-country market
    pub fn to_market(&self) -> Market {
        Market::new(
            self.name,
            self.iso,
            self.browser_langs.iter().map(|l| l.to_string()).collect(),
        )
    }
}

const COUNTRIES: &[Country] = &[
    Country { name: "United States", iso: "US", browser_langs: &["en-US"] },
    Country { name: "United Kingdom", iso: "GB", browser_langs: &["en-GB"] },
    Country { name: "Germany", iso: "DE", browser_langs: &["de-DE"] },
    Country { name: "France", iso: "FR", browser_langs: &["fr-FR"] },
    Country { name: "Canada", iso: "CA", browser_langs: &["en-CA", "fr-CA"] },
    Country { name: "Australia", iso: "AU", browser_langs: &["en-AU"] },
    Country { name: "Japan", iso: "JP", browser_langs: &["ja-JP"] },
    Country { name: "India", iso: "IN", browser_langs: &["en-IN", "hi-IN"] },
    Country { name: "Brazil", iso: "BR", browser_langs: &["pt-BR"] },
    Country { name: "Mexico", iso: "MX", browser_langs: &["es-MX"] },
    Country { name: "Spain", iso: "ES", browser_langs: &["es-ES"] },
    Country { name: "Italy", iso: "IT", browser_langs: &["it-IT"] },
    Country { name: "Netherlands", iso: "NL", browser_langs: &["nl-NL"] },
    Country { name: "Sweden", iso: "SE", browser_langs: &["sv-SE"] },
    Country { name: "Switzerland", iso: "CH", browser_langs: &["de-CH", "fr-CH", "it-CH"] },
    Country { name: "Norway", iso: "NO", browser_langs: &["no-NO"] },
    Country { name: "Denmark", iso: "DK", browser_langs: &["da-DK"] },
    Country { name: "Finland", iso: "FI", browser_langs: &["fi-FI"] },
    Country { name: "Austria", iso: "AT", browser_langs: &["de-AT"] },
    Country { name: "Belgium", iso: "BE", browser_langs: &["nl-BE", "fr-BE"] },
    Country { name: "Ireland", iso: "IE", browser_langs: &["en-IE"] },
    Country { name: "New Zealand", iso: "NZ", browser_langs: &["en-NZ"] },
    Country { name: "Singapore", iso: "SG", browser_langs: &["en-SG"] },
    Country { name: "Hong Kong", iso: "HK", browser_langs: &["en-HK", "zh-HK"] },
];

/// All catalog countries sorted by display name
pub fn countries() -> Vec<&'static Country> {
    let mut sorted: Vec<&'static Country> = COUNTRIES.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(b.name));
    sorted
}

/// Look up a country by ISO code (case-insensitive)
pub fn country_by_iso(iso: &str) -> Option<&'static Country> {
    let iso = iso.trim();
    COUNTRIES.iter().find(|c| c.iso.eq_ignore_ascii_case(iso))
}

/// Look up a country by display name (case-insensitive)
pub fn country_by_name(name: &str) -> Option<&'static Country> {
    let name = name.trim();
    COUNTRIES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Default browser languages of a country, empty when unknown
pub fn browser_langs_for(iso: &str) -> Vec<String> {
    country_by_iso(iso)
        .map(|c| c.browser_langs.iter().map(|l| l.to_string()).collect())
        .unwrap_or_default()
}

/// Resolve a market code
///
/// Single codes map to the catalog country; composite codes (`FR+DE`) map to an
/// ad-hoc cluster of the known constituents.
pub fn market_for_iso(iso: &str) -> Option<Market> {
    if iso.contains(COMPOSITE_SEPARATOR) {
        let mut parts: Vec<Market> = Vec::new();
        for code in iso.split(COMPOSITE_SEPARATOR) {
            match country_by_iso(code) {
                Some(country) => parts.push(country.to_market()),
                None => tracing::debug!("Unknown market code '{}' in '{}' skipped", code, iso),
            }
        }
        if parts.is_empty() {
            return None;
        }
        return Some(composite_market(&parts));
    }
    let market = country_by_iso(iso).map(Country::to_market);
    if market.is_none() {
        tracing::debug!("Unknown market code '{}'", iso);
    }
    market
}

/// The market used when no manual market is selected
pub fn default_market() -> Market {
    market_for_iso(DEFAULT_MARKET_ISO)
        .unwrap_or_else(|| Market::new("United States", DEFAULT_MARKET_ISO, vec!["en-US".into()]))
}

fn merge(markets: &[Market], iso: String) -> Market {
    let name = markets
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let mut merged = Market::new(name, iso, Vec::new());
    for market in markets {
        merged.extend_langs(market.browser_langs.iter().cloned());
    }
    merged
}

/// Merge markets into one `WW` cluster
///
/// The name is the comma-joined constituent names and the browser languages are
/// the de-duplicated union in first-seen order.
pub fn cluster_market(markets: &[Market]) -> Market {
    merge(markets, CLUSTER_ISO.to_string())
}

/// Merge markets into an ad-hoc cluster with a `+`-joined code
pub fn composite_market(markets: &[Market]) -> Market {
    let iso = markets
        .iter()
        .map(|m| m.iso.as_str())
        .collect::<Vec<_>>()
        .join(&COMPOSITE_SEPARATOR.to_string());
    merge(markets, iso)
}

/// Browser languages implied by a comma-separated cluster name
///
/// Unknown country names contribute nothing.
pub fn cluster_browser_langs(name: &str) -> Vec<String> {
    let mut langs: Vec<String> = Vec::new();
    for part in name.split(',') {
        if let Some(country) = country_by_name(part) {
            for lang in country.browser_langs {
                if !langs.iter().any(|l| l == lang) {
                    langs.push(lang.to_string());
                }
            }
        }
    }
    langs
}

/// Primary subtag of a BCP-47 tag, e.g. `fr` for `fr-CA`
pub fn language_code(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}
