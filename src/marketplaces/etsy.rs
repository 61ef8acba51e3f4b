use crate::listing::{Marketplace, MarketplaceListing};
use crate::marketplaces::{
    ListingReceipt, MarketplaceCredentials, SubmitOutcome, extract_listing_id, rejection_details,
};
use anyhow::{Error, anyhow};
use chrono::Utc;
use reqwest::Client;
use serde_json::{Value, json};

/// Creates a draft Etsy listing. Etsy wants the app's keystring on every
/// call alongside the bearer token.
pub async fn create_listing(
    client: &Client,
    creds: &MarketplaceCredentials,
    access_token: &str,
    listing: &MarketplaceListing,
) -> Result<SubmitOutcome, Error> {
    let MarketplaceListing::Etsy {
        base,
        who_made,
        when_made,
        is_vintage,
        taxonomy_id,
        tags,
    } = listing
    else {
        return Err(anyhow!("expected an etsy listing"));
    };

    let body = json!({
        "title": base.title,
        "description": base.description,
        "who_made": who_made,
        "when_made": when_made,
        "is_vintage": is_vintage,
        "taxonomy_id": taxonomy_id,
        "tags": tags,
        "quantity": 1,
        "price": base.price_range.max,
        "state": "draft"
    });

    let url = format!(
        "{}/v3/application/listings",
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
        tracing::error!("Etsy listing rejected: {} - {}", status, error_text);
        return Ok(SubmitOutcome::Rejected {
            status: status.as_u16(),
            details: rejection_details(error_text),
        });
    }

    let reply: Value = response.json().await?;
    let listing_id = extract_listing_id(&reply, &["listing_id", "listingId"])
        .ok_or_else(|| anyhow!("Etsy reply did not contain a listing id"))?;

    Ok(SubmitOutcome::Created(ListingReceipt {
        marketplace: Marketplace::Etsy,
        listing_id,
        listed_at: Utc::now(),
    }))
}
