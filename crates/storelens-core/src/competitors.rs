//! Contract types for the `analyze-competitors` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::contract::number_as_f64;

/// Request body for `POST /analyze-competitors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorAnalysisRequest {
    pub target_store_url: String,
}

/// A competing store found for the analyzed target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub url: String,
    /// Number of products listed by the competitor.
    pub products: u64,
    pub avg_price: Number,
    /// Aggregate review rating, normally on a 0–5 scale.
    pub rating: Number,
    pub category: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl Competitor {
    #[must_use]
    pub fn avg_price_f64(&self) -> f64 {
        number_as_f64(&self.avg_price)
    }

    #[must_use]
    pub fn rating_f64(&self) -> f64 {
        number_as_f64(&self.rating)
    }

    /// Returns `true` if `rating` lies on the expected 0–5 scale.
    #[must_use]
    pub fn rating_in_range(&self) -> bool {
        (0.0..=5.0).contains(&self.rating_f64())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorAnalysisResult {
    pub competitors: Vec<Competitor>,
    /// Total matches on the server side. May exceed `competitors.len()`
    /// when the server caps the returned list.
    pub total_found: u64,
}

impl CompetitorAnalysisResult {
    /// Returns `true` if the server found more competitors than it returned.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        match usize::try_from(self.total_found) {
            Ok(total) => total > self.competitors.len(),
            Err(_) => true,
        }
    }
}
