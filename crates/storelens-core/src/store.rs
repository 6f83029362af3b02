//! Contract types for the `analyze-store` endpoint.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::contract::number_as_f64;

/// Request body for `POST /analyze-store`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAnalysisRequest {
    pub website_url: String,
}

/// A product as extracted from a storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Display price exactly as the store renders it, e.g. `"$24.99"`.
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Catalog price bounds. Kept as JSON numbers so `0` and `0.0` re-encode
/// exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Number,
    pub max: Number,
}

impl PriceRange {
    #[must_use]
    pub fn min_f64(&self) -> f64 {
        number_as_f64(&self.min)
    }

    #[must_use]
    pub fn max_f64(&self) -> f64 {
        number_as_f64(&self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub total_products: u64,
    /// Categories in display order.
    pub categories: Vec<String>,
    pub price_range: PriceRange,
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Width of the catalog's price range.
    #[must_use]
    pub fn price_spread(&self) -> f64 {
        self.price_range.max_f64() - self.price_range.min_f64()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

impl SocialHandles {
    /// Returns `(network, handle)` pairs for every handle that is present.
    #[must_use]
    pub fn present(&self) -> Vec<(&'static str, &str)> {
        [
            ("instagram", self.instagram.as_deref()),
            ("facebook", self.facebook.as_deref()),
            ("tiktok", self.tiktok.as_deref()),
            ("twitter", self.twitter.as_deref()),
        ]
        .into_iter()
        .filter_map(|(network, handle)| handle.map(|h| (network, h)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantLink {
    pub name: String,
    pub url: String,
}

/// Full analysis of a single storefront, as returned by `POST /analyze-store`.
///
/// Policy texts and brand context are `None` when the analyzer could not find
/// them; they are never defaulted to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInsights {
    pub url: String,
    pub product_catalog: ProductCatalog,
    pub hero_products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_policy: Option<String>,
    pub faqs: Vec<Faq>,
    pub social_handles: SocialHandles,
    pub contact_details: ContactDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_context: Option<String>,
    pub important_links: Vec<ImportantLink>,
    /// ISO-8601 timestamp, kept exactly as received.
    pub analysis_date: String,
}

impl StoreInsights {
    /// Parses [`analysis_date`](Self::analysis_date) as a UTC timestamp.
    ///
    /// Accepts RFC 3339 as well as offset-less ISO-8601 (which is read as
    /// UTC). Returns `None` if neither form matches.
    #[must_use]
    pub fn analysis_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_iso8601(&self.analysis_date)
    }
}

fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
