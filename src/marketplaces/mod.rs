pub mod ebay;
pub mod etsy;
pub mod oauth;
pub mod stockx;

use crate::listing::Marketplace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-marketplace OAuth client credentials and endpoints, injected from the
/// environment at startup. Nothing here is ever compiled into the binary.
#[derive(Debug, Clone)]
pub struct MarketplaceCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
}

/// Proof that a listing landed on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingReceipt {
    pub marketplace: Marketplace,
    pub listing_id: String,
    pub listed_at: DateTime<Utc>,
}

/// Result of one listing-creation call. Rejections carry the marketplace's
/// raw error description; there is no retry.
#[derive(Debug)]
pub enum SubmitOutcome {
    Created(ListingReceipt),
    Rejected { status: u16, details: Value },
}

pub(crate) fn rejection_details(error_text: String) -> Value {
    serde_json::from_str::<Value>(&error_text).unwrap_or(Value::String(error_text))
}

pub(crate) fn extract_listing_id(reply: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match &reply[*key] {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
