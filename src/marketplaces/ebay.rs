use crate::listing::{Marketplace, MarketplaceListing};
use crate::marketplaces::{
    ListingReceipt, MarketplaceCredentials, SubmitOutcome, extract_listing_id, rejection_details,
};
use anyhow::{Error, anyhow};
use chrono::Utc;
use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Creates a fixed-price eBay offer from an eBay-shaped listing. One POST,
/// no retry; a rejected offer carries eBay's error body verbatim.
pub async fn create_listing(
    client: &Client,
    creds: &MarketplaceCredentials,
    access_token: &str,
    listing: &MarketplaceListing,
) -> Result<SubmitOutcome, Error> {
    let MarketplaceListing::Ebay {
        base,
        condition_id,
        category_id,
        listing_format,
    } = listing
    else {
        return Err(anyhow!("expected an ebay listing"));
    };

    // Fresh merchant SKU per submission attempt
    let sku = format!("qf-{}", Uuid::new_v4());
    let body = json!({
        "sku": sku,
        "marketplaceId": "EBAY_US",
        "format": listing_format,
        "categoryId": category_id,
        "availableQuantity": 1,
        "title": base.title,
        "listingDescription": base.description,
        "condition": condition_id,
        "pricingSummary": {
            "price": { "value": format!("{:.2}", base.price_range.max), "currency": "USD" }
        }
    });

    let url = format!("{}/sell/inventory/v1/offer", creds.api_url.trim_end_matches('/'));
    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!("eBay listing rejected: {} - {}", status, error_text);
        return Ok(SubmitOutcome::Rejected {
            status: status.as_u16(),
            details: rejection_details(error_text),
        });
    }

    let reply: Value = response.json().await?;
    let listing_id = extract_listing_id(&reply, &["offerId", "listingId"]).unwrap_or(sku);

    Ok(SubmitOutcome::Created(ListingReceipt {
        marketplace: Marketplace::Ebay,
        listing_id,
        listed_at: Utc::now(),
    }))
}
