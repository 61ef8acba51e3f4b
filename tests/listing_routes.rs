mod common;

use common::{mock_credentials, spawn_app, spawn_upstream, test_state};
use quickflip_server::analysis::parser::ScannedItemAnalysis;
use quickflip_server::listing::{Marketplace, MarketplaceListing};
use serde_json::{Value, json};
use std::collections::BTreeMap;

fn sample_analysis() -> ScannedItemAnalysis {
    let mut attributes = BTreeMap::new();
    attributes.insert("size".to_string(), "10.5".to_string());
    ScannedItemAnalysis {
        item_name: "Nike Air Jordan 1 Retro High".to_string(),
        category: "Shoes".to_string(),
        condition: "New".to_string(),
        description: "Classic high-top sneakers, deadstock in box.".to_string(),
        estimated_value_range: "$100 - $200".to_string(),
        attributes,
    }
}

#[tokio::test]
async fn parse_analysis_roundtrip() {
    let app = spawn_app(test_state("http://127.0.0.1:9")).await;
    let client = reqwest::Client::new();

    let content = "ITEM: Red Mug\nCATEGORY: Home\nCONDITION: Good\nDESCRIPTION: A mug.\nVALUE: $5 - $10\nATTRIBUTES: {\"color\": \"red\"}";
    let response = client
        .post(format!("{}/parse-analysis", app))
        .json(&json!({"content": content}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let reply: Value = response.json().await.unwrap();
    assert_eq!(reply["itemName"], "Red Mug");
    assert_eq!(reply["estimatedValueRange"], "$5 - $10");
    assert_eq!(reply["attributes"]["color"], "red");

    let response = client
        .post(format!("{}/parse-analysis", app))
        .json(&json!({"content": "Sorry, I can't tell what this is."}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
    let reply: Value = response.json().await.unwrap();
    assert!(reply["error"].is_string());
}

#[tokio::test]
async fn listing_route_projects_for_each_marketplace() {
    let app = spawn_app(test_state("http://127.0.0.1:9")).await;
    let client = reqwest::Client::new();

    for marketplace in Marketplace::ALL {
        let response = client
            .post(format!("{}/listings/{}", app, marketplace))
            .json(&sample_analysis())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let reply: Value = response.json().await.unwrap();
        assert_eq!(reply["marketplace"], marketplace.as_str());
        assert_eq!(reply["title"], "Nike Air Jordan 1 Retro High");
    }

    let response = client
        .post(format!("{}/listings/craigslist", app))
        .json(&sample_analysis())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn handoff_route_covers_clipboard_marketplaces_only() {
    let app = spawn_app(test_state("http://127.0.0.1:9")).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/handoff/mercari", app))
        .json(&sample_analysis())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let reply: Value = response.json().await.unwrap();
    assert!(
        reply["clipboardText"]
            .as_str()
            .unwrap()
            .starts_with("Nike Air Jordan 1 Retro High")
    );
    assert_eq!(reply["url"], "https://www.mercari.com/sell/");

    let response = client
        .post(format!("{}/handoff/ebay", app))
        .json(&sample_analysis())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn submit_requires_api_marketplace_token_and_credentials() {
    let app = spawn_app(test_state("http://127.0.0.1:9")).await;
    let client = reqwest::Client::new();
    let listing = MarketplaceListing::from_analysis(Marketplace::Ebay, &sample_analysis());

    // Clipboard platform: no listing API
    let facebook = MarketplaceListing::from_analysis(Marketplace::Facebook, &sample_analysis());
    let response = client
        .post(format!("{}/submit/facebook", app))
        .bearer_auth("user-token")
        .json(&facebook)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // No bearer token
    let response = client
        .post(format!("{}/submit/ebay", app))
        .json(&listing)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Token present but credentials never configured
    let response = client
        .post(format!("{}/submit/ebay", app))
        .bearer_auth("user-token")
        .json(&listing)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn submit_rejects_a_listing_shaped_for_another_marketplace() {
    let marketplace_api = spawn_upstream(200, json!({"offerId": "offer-123"})).await;
    let mut state = test_state("http://127.0.0.1:9");
    state.ebay = Some(mock_credentials(&marketplace_api.url));
    let app = spawn_app(state).await;

    let stockx_listing = MarketplaceListing::from_analysis(Marketplace::StockX, &sample_analysis());
    let response = reqwest::Client::new()
        .post(format!("{}/submit/ebay", app))
        .bearer_auth("user-token")
        .json(&stockx_listing)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(marketplace_api.request_count(), 0);
}

#[tokio::test]
async fn submit_creates_an_ebay_offer_and_returns_a_receipt() {
    let marketplace_api = spawn_upstream(200, json!({"offerId": "offer-123"})).await;
    let mut state = test_state("http://127.0.0.1:9");
    state.ebay = Some(mock_credentials(&marketplace_api.url));
    let app = spawn_app(state).await;

    let listing = MarketplaceListing::from_analysis(Marketplace::Ebay, &sample_analysis());
    let response = reqwest::Client::new()
        .post(format!("{}/submit/ebay", app))
        .bearer_auth("user-token")
        .json(&listing)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let receipt: Value = response.json().await.unwrap();
    assert_eq!(receipt["marketplace"], "ebay");
    assert_eq!(receipt["listingId"], "offer-123");

    let outbound = marketplace_api.request(0);
    assert_eq!(outbound["title"], "Nike Air Jordan 1 Retro High");
    assert_eq!(outbound["categoryId"], "93427");
    assert_eq!(outbound["condition"], 1000);
    assert_eq!(outbound["pricingSummary"]["price"]["value"], "200.00");
}

#[tokio::test]
async fn marketplace_rejection_is_surfaced_raw_as_bad_gateway() {
    let marketplace_api = spawn_upstream(
        400,
        json!({"errors": [{"message": "Invalid category"}]}),
    )
    .await;
    let mut state = test_state("http://127.0.0.1:9");
    state.etsy = Some(mock_credentials(&marketplace_api.url));
    let app = spawn_app(state).await;

    let listing = MarketplaceListing::from_analysis(Marketplace::Etsy, &sample_analysis());
    let response = reqwest::Client::new()
        .post(format!("{}/submit/etsy", app))
        .bearer_auth("user-token")
        .json(&listing)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let reply: Value = response.json().await.unwrap();
    assert!(reply["error"].is_string());
    assert_eq!(reply["status"], 400);
    assert_eq!(reply["details"]["errors"][0]["message"], "Invalid category");
}

#[tokio::test]
async fn stockx_refuses_used_items_before_calling_the_api() {
    let marketplace_api = spawn_upstream(200, json!({"listingId": "ask-1"})).await;
    let mut state = test_state("http://127.0.0.1:9");
    state.stockx = Some(mock_credentials(&marketplace_api.url));
    let app = spawn_app(state).await;

    let mut analysis = sample_analysis();
    analysis.condition = "Good".to_string();
    let listing = MarketplaceListing::from_analysis(Marketplace::StockX, &analysis);
    let response = reqwest::Client::new()
        .post(format!("{}/submit/stockx", app))
        .bearer_auth("user-token")
        .json(&listing)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    assert_eq!(marketplace_api.request_count(), 0);
}

#[tokio::test]
async fn oauth_token_exchange_relays_the_grant() {
    let token_api = spawn_upstream(
        200,
        json!({"access_token": "tok-1", "refresh_token": "ref-1", "expires_in": 7200}),
    )
    .await;
    let mut state = test_state("http://127.0.0.1:9");
    state.ebay = Some(mock_credentials(&token_api.url));
    let app = spawn_app(state).await;

    let response = reqwest::Client::new()
        .post(format!("{}/oauth/ebay/token", app))
        .json(&json!({"code": "auth-code-1", "redirectUri": "quickflip://oauth"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let reply: Value = response.json().await.unwrap();
    assert_eq!(reply["accessToken"], "tok-1");
    assert_eq!(reply["refreshToken"], "ref-1");
    assert_eq!(reply["expiresIn"], 7200);

    // The code went out form-encoded
    let outbound = token_api.request(0);
    let form = outbound.as_str().unwrap();
    assert!(form.contains("grant_type=authorization_code"));
    assert!(form.contains("code=auth-code-1"));

    // Denied exchange passes the marketplace's status through
    let denied_api = spawn_upstream(401, json!({"error": "invalid_grant"})).await;
    let mut state = test_state("http://127.0.0.1:9");
    state.ebay = Some(mock_credentials(&denied_api.url));
    let app = spawn_app(state).await;

    let response = reqwest::Client::new()
        .post(format!("{}/oauth/ebay/token", app))
        .json(&json!({"code": "bad-code", "redirectUri": "quickflip://oauth"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let reply: Value = response.json().await.unwrap();
    assert_eq!(reply["details"]["error"], "invalid_grant");
}
