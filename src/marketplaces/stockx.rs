use crate::listing::heuristics::stockx_accepts_condition;
use crate::listing::{Marketplace, MarketplaceListing};
use crate::marketplaces::{
    ListingReceipt, MarketplaceCredentials, SubmitOutcome, extract_listing_id, rejection_details,
};
use anyhow::{Error, anyhow};
use chrono::Utc;
use reqwest::Client;
use serde_json::{Value, json};

/// Creates a StockX ask. StockX trades deadstock only, so a non-new item is
/// rejected locally without an API call.
pub async fn create_listing(
    client: &Client,
    creds: &MarketplaceCredentials,
    access_token: &str,
    listing: &MarketplaceListing,
) -> Result<SubmitOutcome, Error> {
    let MarketplaceListing::StockX {
        base,
        brand,
        size,
        style_id,
    } = listing
    else {
        return Err(anyhow!("expected a stockx listing"));
    };

    if !stockx_accepts_condition(&base.condition) {
        return Ok(SubmitOutcome::Rejected {
            status: 400,
            details: Value::String("StockX only accepts new, unworn items".to_string()),
        });
    }

    let body = json!({
        "productName": base.title,
        "brand": brand,
        "size": size,
        "styleId": style_id,
        "amount": format!("{:.0}", base.price_range.max),
        "currencyCode": "USD"
    });

    let url = format!(
        "{}/v2/selling/listings",
        creds.api_url.trim_end_matches('/')
    );
    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("x-api-key", &creds.client_id)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!("StockX ask rejected: {} - {}", status, error_text);
        return Ok(SubmitOutcome::Rejected {
            status: status.as_u16(),
            details: rejection_details(error_text),
        });
    }

    let reply: Value = response.json().await?;
    let listing_id = extract_listing_id(&reply, &["listingId", "id"])
        .ok_or_else(|| anyhow!("StockX reply did not contain a listing id"))?;

    Ok(SubmitOutcome::Created(ListingReceipt {
        marketplace: Marketplace::StockX,
        listing_id,
        listed_at: Utc::now(),
    }))
}
