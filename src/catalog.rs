//! The API catalog and the cards built from it.
//!
//! Every card is gated by a feature flag: `categories.<key>` for category
//! cards, `hosted_apis.<url_fragment>` for API cards. Flags that are not set
//! count as disabled.

use crate::error::ExplorerError;
use serde::Deserialize;
use serde_json::{Map, Value};

const CATEGORY_FLAG_PREFIX: &str = "categories";
const HOSTED_API_FLAG_PREFIX: &str = "hosted_apis";
const FLAG_SEPARATOR: char = '.';
const EXPLORE_ROOT: &str = "/explore";
const HOME_NAME_PREFIX: &str = "VA ";
const NO_AUTHORIZATION_CARD_CATEGORY: &str = "Benefits API";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiDescription {
    pub name: String,
    pub description: String,
    pub url_fragment: String,
    #[serde(default)]
    pub va_internal_only: bool,
    #[serde(default)]
    pub trusted_partner_only: bool,
    #[serde(default)]
    pub oauth: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiCategory {
    pub key: String,
    pub name: String,
    pub short_description: String,
    #[serde(default)]
    pub placard_text: String,
    #[serde(default)]
    pub apis: Vec<ApiDescription>,
}

/// Categories in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiCatalog {
    pub categories: Vec<ApiCategory>,
}

impl ApiCatalog {
    pub fn new(categories: Vec<ApiCategory>) -> Self {
        Self { categories }
    }

    pub fn from_json_str(content: &str) -> Result<Self, ExplorerError> {
        serde_json::from_str(content).map_err(|e| ExplorerError::invalid_json(&e))
    }

    pub fn category(&self, key: &str) -> Option<&ApiCategory> {
        self.categories.iter().find(|category| category.key == key)
    }
}

pub trait FeatureFlags: Send + Sync {
    fn is_enabled(&self, name: &str) -> bool;
}

/// Flags held in a nested JSON object, e.g.
/// `{"categories": {"benefits": true}, "hosted_apis": {"claims": false}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticFlags {
    flags: Map<String, Value>,
}

impl StaticFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> Result<Self, ExplorerError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ExplorerError::invalid_json(&e))?;
        match value {
            Value::Object(flags) => Ok(Self { flags }),
            _ => Err(ExplorerError::invalid_config("feature flags must be a JSON object")),
        }
    }

    /// Sets a dotted flag name, creating intermediate objects as needed.
    pub fn set(mut self, name: &str, enabled: bool) -> Self {
        insert_flag(&mut self.flags, name, enabled);
        self
    }
}

fn insert_flag(flags: &mut Map<String, Value>, name: &str, enabled: bool) {
    match name.split_once(FLAG_SEPARATOR) {
        None => {
            flags.insert(name.to_string(), Value::Bool(enabled));
        }
        Some((head, rest)) => {
            let entry = flags
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                insert_flag(nested, rest, enabled);
            }
        }
    }
}

impl FeatureFlags for StaticFlags {
    fn is_enabled(&self, name: &str) -> bool {
        let mut segments = name.split(FLAG_SEPARATOR);
        let Some(first) = segments.next() else {
            return false;
        };
        let mut current = self.flags.get(first);
        for segment in segments {
            current = current.and_then(|value| value.get(segment));
        }
        matches!(current, Some(Value::Bool(true)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnlyTag {
    VaInternalOnly,
    TrustedPartnerOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLink {
    pub name: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<OnlyTag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPage {
    pub key: String,
    pub name: String,
    /// Shown ahead of the API cards.
    pub authorization_card: bool,
    pub api_cards: Vec<CardLink>,
}

fn category_url(key: &str) -> String {
    format!("{}/{}", EXPLORE_ROOT, key)
}

fn category_flag(key: &str) -> String {
    format!("{}{}{}", CATEGORY_FLAG_PREFIX, FLAG_SEPARATOR, key)
}

fn hosted_api_flag(url_fragment: &str) -> String {
    format!("{}{}{}", HOSTED_API_FLAG_PREFIX, FLAG_SEPARATOR, url_fragment)
}

/// Cards for the documentation overview, in catalog order.
pub fn overview_cards(catalog: &ApiCatalog, flags: &dyn FeatureFlags) -> Vec<CardLink> {
    catalog
        .categories
        .iter()
        .filter(|category| flags.is_enabled(&category_flag(&category.key)))
        .map(|category| CardLink {
            name: category.name.clone(),
            url: category_url(&category.key),
            description: category.short_description.clone(),
            tags: Vec::new(),
        })
        .collect()
}

/// Cards for the home page list: same gating as the overview, placard text
/// as the description.
pub fn home_cards(catalog: &ApiCatalog, flags: &dyn FeatureFlags) -> Vec<CardLink> {
    catalog
        .categories
        .iter()
        .filter(|category| flags.is_enabled(&category_flag(&category.key)))
        .map(|category| CardLink {
            name: format!("{}{}", HOME_NAME_PREFIX, category.name),
            url: category_url(&category.key),
            description: category.placard_text.clone(),
            tags: Vec::new(),
        })
        .collect()
}

/// The page for one category, or `None` for an unknown key.
pub fn category_page(
    catalog: &ApiCatalog,
    key: &str,
    flags: &dyn FeatureFlags,
) -> Option<CategoryPage> {
    let Some(category) = catalog.category(key) else {
        log::debug!("No API category {}", key);
        return None;
    };
    let api_cards = category
        .apis
        .iter()
        .filter(|api| flags.is_enabled(&hosted_api_flag(&api.url_fragment)))
        .map(|api| {
            let mut tags = Vec::new();
            if api.va_internal_only {
                tags.push(OnlyTag::VaInternalOnly);
            }
            if api.trusted_partner_only {
                tags.push(OnlyTag::TrustedPartnerOnly);
            }
            CardLink {
                name: api.name.clone(),
                url: format!("{}/docs/{}", category_url(key), api.url_fragment),
                description: api.description.clone(),
                tags,
            }
        })
        .collect();
    let authorization_card = category.apis.iter().any(|api| api.oauth)
        && category.name != NO_AUTHORIZATION_CARD_CATEGORY;
    Some(CategoryPage {
        key: category.key.clone(),
        name: category.name.clone(),
        authorization_card,
        api_cards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ApiCatalog {
        ApiCatalog::from_json_str(
            r#"{
                "categories": [
                    {
                        "key": "benefits",
                        "name": "Benefits API",
                        "short_description": "Submit and track claims",
                        "placard_text": "Build tools to help Veterans",
                        "apis": [
                            {"name": "Claims API", "description": "Submit claims", "url_fragment": "claims", "oauth": true},
                            {"name": "Loan Guaranty API", "description": "Loans", "url_fragment": "loan_guaranty", "va_internal_only": true}
                        ]
                    },
                    {
                        "key": "health",
                        "name": "Health API",
                        "short_description": "Access health records",
                        "apis": [
                            {"name": "Veterans Health API (FHIR)", "description": "FHIR", "url_fragment": "fhir", "oauth": true, "trusted_partner_only": true},
                            {"name": "Community Care API", "description": "Eligibility", "url_fragment": "community_care"}
                        ]
                    },
                    {
                        "key": "facilities",
                        "name": "Facilities API",
                        "short_description": "Find facilities"
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    fn flags() -> StaticFlags {
        StaticFlags::from_json_str(
            r#"{
                "categories": {"benefits": true, "health": true, "facilities": false},
                "hosted_apis": {"claims": true, "loan_guaranty": true, "fhir": true}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_static_flags() {
        let flags = flags();
        assert!(flags.is_enabled("categories.benefits"));
        assert!(!flags.is_enabled("categories.facilities"));
        assert!(!flags.is_enabled("categories.unknown"));
        assert!(!flags.is_enabled("categories"));
        assert!(!flags.is_enabled(""));
    }

    #[test]
    fn test_static_flags_set() {
        let flags = StaticFlags::new()
            .set("hosted_apis.fhir", true)
            .set("categories.health", true)
            .set("categories.health", false);
        assert!(flags.is_enabled("hosted_apis.fhir"));
        assert!(!flags.is_enabled("categories.health"));
    }

    #[test]
    fn test_static_flags_rejects_non_object() {
        assert!(matches!(
            StaticFlags::from_json_str("[]"),
            Err(ExplorerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_overview_cards() {
        let cards = overview_cards(&catalog(), &flags());
        let names: Vec<&str> = cards.iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names, vec!["Benefits API", "Health API"]);
        assert_eq!(cards[1].url, "/explore/health");
        assert_eq!(cards[1].description, "Access health records");
    }

    #[test]
    fn test_home_cards() {
        let cards = home_cards(&catalog(), &flags());
        assert_eq!(cards[0].name, "VA Benefits API");
        assert_eq!(cards[0].description, "Build tools to help Veterans");
    }

    #[test]
    fn test_category_page_filters_apis() {
        let page = category_page(&catalog(), "health", &flags()).unwrap();
        assert_eq!(page.api_cards.len(), 1);
        let card = &page.api_cards[0];
        assert_eq!(card.url, "/explore/health/docs/fhir");
        assert_eq!(card.tags, vec![OnlyTag::TrustedPartnerOnly]);
        assert!(page.authorization_card);
    }

    #[test]
    fn test_category_page_benefits_has_no_authorization_card() {
        let page = category_page(&catalog(), "benefits", &flags()).unwrap();
        assert!(!page.authorization_card);
        assert_eq!(page.api_cards[1].tags, vec![OnlyTag::VaInternalOnly]);
    }

    #[test]
    fn test_category_page_without_apis() {
        let page = category_page(&catalog(), "facilities", &flags()).unwrap();
        assert!(page.api_cards.is_empty());
        assert!(!page.authorization_card);
    }

    #[test]
    fn test_category_page_unknown_key() {
        assert!(category_page(&catalog(), "unknown", &flags()).is_none());
    }
}
