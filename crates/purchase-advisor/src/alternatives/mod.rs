//! Seam for cheaper-alternative lookups.
//!
//! A finder backend proposes one candidate product; this module validates the price, cleans the
//! link and computes what the buyer would save.

mod product_url;

pub use product_url::{
    ensure_valid_product_url, is_product_url, retailer_from_url, FALLBACK_RETAILER,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Share of the original price assumed when a candidate arrives without one.
pub const ESTIMATED_PRICE_RATIO: f64 = 0.7;

/// Raw suggestion returned by a finder backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlternativeCandidate {
    pub name: String,
    pub price: Option<f64>,
    pub url: String,
    pub retailer: Option<String>,
    /// Pages the backend consulted, used when `url` is not a product page.
    pub sources: Vec<String>,
}

/// Validated cheaper alternative attached to advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub name: String,
    pub price: f64,
    pub url: String,
    pub retailer: String,
    pub savings: Savings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    /// Price difference, rounded to cents.
    pub amount: f64,
    /// Difference as a share of the original price, one decimal place.
    pub percent: f64,
}

impl Savings {
    /// `None` unless the alternative is strictly cheaper than a positive original price.
    pub fn between(original: f64, alternative: f64) -> Option<Self> {
        if original <= 0.0 || alternative < 0.0 || alternative >= original {
            return None;
        }
        let amount = original - alternative;
        Some(Self {
            amount: round_to(amount, 100.0),
            percent: round_to(amount / original * 100.0, 10.0),
        })
    }
}

impl AlternativeCandidate {
    /// Turn a suggestion into an [`Alternative`], or `None` when it is unnamed, linkless or
    /// not cheaper than `item_cost`.
    pub fn resolve(self, item_cost: f64) -> Option<Alternative> {
        let name = self.name.trim().to_string();
        if name.is_empty() || self.url.trim().is_empty() {
            debug!("alternative candidate lacks a name or link");
            return None;
        }

        let price = self
            .price
            .filter(|price| price.is_finite())
            .unwrap_or_else(|| round_to(item_cost * ESTIMATED_PRICE_RATIO, 100.0));
        let Some(savings) = Savings::between(item_cost, price) else {
            debug!(price, item_cost, "alternative candidate is not cheaper");
            return None;
        };

        let mut url = ensure_valid_product_url(&self.url);
        if !is_product_url(&url) {
            if let Some(source) = self.sources.iter().find(|source| is_product_url(source)) {
                url = ensure_valid_product_url(source);
            }
        }

        let retailer = self
            .retailer
            .map(|retailer| retailer.trim().to_string())
            .filter(|retailer| !retailer.is_empty())
            .or_else(|| retailer_from_url(&url))
            .unwrap_or_else(|| FALLBACK_RETAILER.to_string());

        Some(Alternative {
            name,
            price,
            url,
            retailer,
            savings,
        })
    }
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

/// Looks up a cheaper product comparable to the one being considered.
pub trait AlternativeFinder: Send + Sync {
    fn find_cheaper(
        &self,
        item_name: &str,
        item_cost: f64,
    ) -> Result<Option<AlternativeCandidate>, AlternativeError>;
}

/// Error raised by finder adapters.
#[derive(Debug, thiserror::Error)]
pub enum AlternativeError {
    #[error("alternative search unavailable: {0}")]
    Unavailable(String),
}
