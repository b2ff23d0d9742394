//! A/B Variant Engine
//!
//! Reads `ab_*` query parameters once at page-ready time, rewrites the
//! targeted page regions, and reports what was applied in a single
//! `ab_variant_applied` event.
//!
//! Each key is independent and targets disjoint elements. Missing target
//! elements make that key a silent no-op. Recording rules are per key and
//! deliberately asymmetric:
//!
//! | key              | recorded when                          |
//! |------------------|----------------------------------------|
//! | `ab_h1`          | value is `B` and the heading exists     |
//! | `ab_secondary`   | value is `whitepaper` or `demo`        |
//! | `ab_form_fields` | the extended field is shown            |
//! | `ab_trust`       | value is `metrics` or `logos`          |
//! | `ab_pricing`     | any non-empty value                    |

use crate::config::Config;
use crate::error::PageError;
use crate::query::{select, select_all_in_document, select_in_document};
use crate::tracker::{Payload, Tracker};
use lm_dom::Document;
use serde_json::Value;

/// Prefix shared by every variant parameter
pub const VARIANT_PREFIX: &str = "ab_";

/// Event emitted once per page load when any variant applied
pub const VARIANT_EVENT: &str = "ab_variant_applied";

const HERO_HEADING: &str = ".hero-content h1";
const SECONDARY_CTA: &str = "[data-secondary-cta]";
const EXTENDED_FIELD: &str = "[data-variant-field='extended']";
const TRUST_LOGOS: &str = ".hero-trust-logos";
const TRUST_METRICS: &str = ".hero-trust-metrics";
const PRICE: &str = "#pricing .price";

/// Recognized variant keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantKey {
    H1,
    Secondary,
    FormFields,
    Trust,
    Pricing,
}

impl VariantKey {
    pub const ALL: [VariantKey; 5] = [
        VariantKey::H1,
        VariantKey::Secondary,
        VariantKey::FormFields,
        VariantKey::Trust,
        VariantKey::Pricing,
    ];

    /// Query parameter name
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKey::H1 => "ab_h1",
            VariantKey::Secondary => "ab_secondary",
            VariantKey::FormFields => "ab_form_fields",
            VariantKey::Trust => "ab_trust",
            VariantKey::Pricing => "ab_pricing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded query string (`URLSearchParams`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`)
    pub fn parse(query: &str) -> Self {
        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Query parameters of a full URL
    pub fn from_url(url: &str) -> Result<Self, PageError> {
        let parsed = url::Url::parse(url).map_err(|source| PageError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self::parse(parsed.query().unwrap_or_default()))
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// Check if any key carries the variant prefix
    pub fn has_variant_keys(&self) -> bool {
        self.keys().any(|k| k.starts_with(VARIANT_PREFIX))
    }
}

/// Variants actually applied on this page load, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    entries: Vec<(VariantKey, String)>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, key: VariantKey, value: impl Into<String>) {
        self.entries.push((key, value.into()));
    }

    pub fn get(&self, key: VariantKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: VariantKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariantKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Tracking payload: `{ "ab_h1": "B", ... }`
    pub fn to_payload(&self) -> Payload {
        self.iter()
            .map(|(k, v)| (k.as_str().to_string(), Value::String(v.to_string())))
            .collect()
    }
}

/// Apply every recognized variant and emit the aggregated event
///
/// Returns the assignment set; it is empty (and nothing is touched or
/// emitted) when no parameter starts with `ab_`.
pub fn apply_variants(
    doc: &mut Document,
    params: &QueryParams,
    config: &Config,
    tracker: &mut Tracker,
) -> Assignments {
    let mut changes = Assignments::new();
    if !params.has_variant_keys() {
        return changes;
    }

    if let Some(v) = apply_hero_heading(doc, params.get(VariantKey::H1.as_str()), config) {
        changes.record(VariantKey::H1, v);
    }
    if let Some(v) = apply_secondary_cta(doc, params.get(VariantKey::Secondary.as_str()), config) {
        changes.record(VariantKey::Secondary, v);
    }
    if let Some(v) = apply_form_fields(doc, params.get(VariantKey::FormFields.as_str()), config) {
        changes.record(VariantKey::FormFields, v);
    }
    if let Some(v) = apply_trust(doc, params.get(VariantKey::Trust.as_str()), config) {
        changes.record(VariantKey::Trust, v);
    }
    if let Some(v) = apply_pricing(doc, params.get(VariantKey::Pricing.as_str()), config) {
        changes.record(VariantKey::Pricing, v);
    }

    if changes.is_empty() {
        tracing::debug!("variant parameters present but none applied");
    } else {
        tracker.track(VARIANT_EVENT, changes.to_payload());
    }
    changes
}

fn apply_hero_heading(doc: &mut Document, value: Option<&str>, config: &Config) -> Option<&'static str> {
    let heading = select_in_document(doc, HERO_HEADING)?;
    if value != Some("B") {
        return None;
    }
    doc.tree.set_text_content(heading, &config.hero_heading_b);
    Some("B")
}

fn apply_secondary_cta(doc: &mut Document, value: Option<&str>, config: &Config) -> Option<&'static str> {
    let (variant, label, track) = match value.filter(|v| !v.is_empty())? {
        "whitepaper" => ("whitepaper", config.whitepaper_label.as_str(), "whitepaper_download"),
        "demo" => ("demo", config.demo_label.as_str(), "demo_request"),
        other => {
            tracing::debug!("unknown ab_secondary value {:?}", other);
            return None;
        }
    };
    for button in select_all_in_document(doc, SECONDARY_CTA) {
        doc.tree.set_text_content(button, label);
        doc.tree.dataset_set(button, "track", track);
    }
    Some(variant)
}

fn apply_form_fields(doc: &mut Document, value: Option<&str>, config: &Config) -> Option<String> {
    let field = select_in_document(doc, EXTENDED_FIELD)?;
    let input = select(doc, "input", field);

    let show = matches!(value, Some("5" | "extended"));
    if show {
        doc.tree.remove_class(field, &config.hidden_class);
    } else {
        doc.tree.add_class(field, &config.hidden_class);
    }
    // The extended input is optional in both branches, shown or not.
    if let Some(input) = input {
        doc.tree.remove_attribute(input, "required");
    }

    show.then(|| value.unwrap_or_default().to_string())
}

fn apply_trust(doc: &mut Document, value: Option<&str>, config: &Config) -> Option<&'static str> {
    let logos = select_in_document(doc, TRUST_LOGOS)?;
    let metrics = select_in_document(doc, TRUST_METRICS)?;

    let (shown, hidden, variant) = match value? {
        "metrics" => (metrics, logos, "metrics"),
        "logos" => (logos, metrics, "logos"),
        _ => return None,
    };
    doc.tree.remove_class(shown, &config.hidden_class);
    doc.tree.add_class(hidden, &config.hidden_class);
    doc.tree.set_attribute(shown, "aria-hidden", "false");
    doc.tree.set_attribute(hidden, "aria-hidden", "true");
    Some(variant)
}

fn apply_pricing(doc: &mut Document, value: Option<&str>, config: &Config) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;

    for price in select_all_in_document(doc, PRICE) {
        let cached = doc
            .tree
            .dataset_get(price, "originalPrice")
            .is_some_and(|p| !p.is_empty());
        if !cached {
            let original = doc.tree.text_content(price).trim().to_string();
            doc.tree.dataset_set(price, "originalPrice", &original);
        }

        if value == "hidden" {
            doc.tree.set_text_content(price, &config.pricing_hidden_label);
        } else if let Some(original) = doc
            .tree
            .dataset_get(price, "originalPrice")
            .filter(|p| !p.is_empty())
            .map(str::to_string)
        {
            doc.tree.set_text_content(price, &original);
        }
    }

    // Any non-empty value counts as an assignment, including restores.
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_first_value_wins() {
        let params = QueryParams::parse("ab_h1=B&ab_h1=A&utm_source=x");
        assert_eq!(params.get("ab_h1"), Some("B"));
        assert!(params.has_variant_keys());
    }

    #[test]
    fn test_query_params_decoding() {
        let params = QueryParams::parse("ab_pricing=contact+us&x=%E8%81%94");
        assert_eq!(params.get("ab_pricing"), Some("contact us"));
        assert_eq!(params.get("x"), Some("联"));
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert!(!QueryParams::parse("AB_h1=B&lab_x=1").has_variant_keys());
        assert!(QueryParams::parse("ab_unknown=1").has_variant_keys());
    }

    #[test]
    fn test_from_url() {
        let params = QueryParams::from_url("https://lianmai.example/?ab_trust=metrics#pricing").unwrap();
        assert_eq!(params.get("ab_trust"), Some("metrics"));
        assert!(QueryParams::from_url("about:blank").unwrap().keys().next().is_none());
        assert!(QueryParams::from_url("not a url").is_err());
    }

    #[test]
    fn test_variant_key_names() {
        for key in VariantKey::ALL {
            assert_eq!(VariantKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(VariantKey::parse("ab_other"), None);
    }

    #[test]
    fn test_assignment_payload() {
        let mut set = Assignments::new();
        set.record(VariantKey::H1, "B");
        set.record(VariantKey::Pricing, "hidden");
        let payload = set.to_payload();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload["ab_pricing"], "hidden");
    }
}
