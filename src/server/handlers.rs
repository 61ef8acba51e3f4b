use crate::analysis::openai::{AnalysisParams, UpstreamOutcome, request_analysis};
use crate::analysis::parser::{ScannedItemAnalysis, parse_analysis};
use crate::listing::handoff::handoff_payload;
use crate::listing::{Marketplace, MarketplaceListing};
use crate::marketplaces::oauth::{TokenOutcome, exchange_authorization_code};
use crate::marketplaces::{MarketplaceCredentials, SubmitOutcome, ebay, etsy, stockx};
use crate::server::types::{AnalyzeRequest, AnalyzeResponse, AppState, OauthTokenRequest, ParseRequest};
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;

// server status handler
pub async fn server_status_handler() -> Json<Value> {
    Json(json!({"status": "running"}))
}

/// The analyze-single-item-v2 contract: validate the image, make exactly one
/// upstream call, relay the reply verbatim. No retries, no caching, no
/// validation of the model's output shape.
pub async fn analyze_single_item_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let base64_image = match request.base64_image {
        Some(image) if !image.is_empty() => image,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "base64Image is required"})),
            )
                .into_response();
        }
    };

    let params = AnalysisParams {
        base64_image,
        model: request.model,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    };

    match request_analysis(
        &state.http_client,
        &state.openai_api_url,
        &state.openai_api_key,
        &params,
    )
    .await
    {
        Ok(UpstreamOutcome::Content(content)) => {
            (StatusCode::OK, Json(AnalyzeResponse { content })).into_response()
        }
        Ok(UpstreamOutcome::Empty) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "No content in OpenAI response"})),
        )
            .into_response(),
        Ok(UpstreamOutcome::UpstreamError { status, details }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({"error": "OpenAI API error", "details": details})),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("analysis request failed: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Analysis request failed: {}", err)})),
            )
                .into_response()
        }
    }
}

/// Client-side half of the contract: turn a raw six-field reply into a
/// scanned item record.
pub async fn parse_analysis_handler(Json(request): Json<ParseRequest>) -> impl IntoResponse {
    match parse_analysis(&request.content) {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": err.to_string()})),
        )
            .into_response(),
    }
}

pub async fn build_listing_handler(
    Path(marketplace): Path<String>,
    Json(analysis): Json<ScannedItemAnalysis>,
) -> impl IntoResponse {
    let marketplace = match marketplace.parse::<Marketplace>() {
        Ok(m) => m,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": err.to_string()})))
                .into_response();
        }
    };

    let listing = MarketplaceListing::from_analysis(marketplace, &analysis);
    (StatusCode::OK, Json(listing)).into_response()
}

pub async fn handoff_handler(
    Path(marketplace): Path<String>,
    Json(analysis): Json<ScannedItemAnalysis>,
) -> impl IntoResponse {
    let marketplace = match marketplace.parse::<Marketplace>() {
        Ok(m) => m,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": err.to_string()})))
                .into_response();
        }
    };

    match handoff_payload(marketplace, &analysis) {
        Some(payload) => (StatusCode::OK, Json(payload)).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("{} listings go through /submit/{}", marketplace, marketplace)
            })),
        )
            .into_response(),
    }
}

pub async fn submit_listing_handler(
    State(state): State<Arc<AppState>>,
    Path(marketplace): Path<String>,
    headers: HeaderMap,
    Json(listing): Json<MarketplaceListing>,
) -> impl IntoResponse {
    let marketplace = match marketplace.parse::<Marketplace>() {
        Ok(m) => m,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": err.to_string()})))
                .into_response();
        }
    };

    if !marketplace.is_api_integrated() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("{} has no listing API, use /handoff/{}", marketplace, marketplace)
            })),
        )
            .into_response();
    }

    let Some(access_token) = bearer_token(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "missing bearer token"})),
        )
            .into_response();
    };

    if listing.marketplace() != marketplace {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!(
                    "listing is shaped for {}, not {}",
                    listing.marketplace(),
                    marketplace
                )
            })),
        )
            .into_response();
    }

    let Some(creds) = marketplace_credentials(&state, marketplace) else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": format!("{} credentials are not configured", marketplace)
            })),
        )
            .into_response();
    };

    let result = match marketplace {
        Marketplace::Ebay => {
            ebay::create_listing(&state.http_client, &creds, &access_token, &listing).await
        }
        Marketplace::Etsy => {
            etsy::create_listing(&state.http_client, &creds, &access_token, &listing).await
        }
        Marketplace::StockX => {
            stockx::create_listing(&state.http_client, &creds, &access_token, &listing).await
        }
        _ => unreachable!("non-api marketplaces are rejected above"),
    };

    match result {
        Ok(SubmitOutcome::Created(receipt)) => (StatusCode::OK, Json(receipt)).into_response(),
        Ok(SubmitOutcome::Rejected { status, details }) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "error": format!("{} rejected the listing", marketplace),
                "status": status,
                "details": details
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("listing submission failed: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Listing submission failed: {}", err)})),
            )
                .into_response()
        }
    }
}

pub async fn oauth_token_handler(
    State(state): State<Arc<AppState>>,
    Path(marketplace): Path<String>,
    Json(request): Json<OauthTokenRequest>,
) -> impl IntoResponse {
    let marketplace = match marketplace.parse::<Marketplace>() {
        Ok(m) => m,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": err.to_string()})))
                .into_response();
        }
    };

    if !marketplace.is_api_integrated() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("{} does not use OAuth here", marketplace)
            })),
        )
            .into_response();
    }

    let Some(creds) = marketplace_credentials(&state, marketplace) else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": format!("{} credentials are not configured", marketplace)
            })),
        )
            .into_response();
    };

    match exchange_authorization_code(
        &state.http_client,
        &creds,
        &request.code,
        &request.redirect_uri,
    )
    .await
    {
        Ok(TokenOutcome::Granted(token)) => (StatusCode::OK, Json(token)).into_response(),
        Ok(TokenOutcome::Denied { status, details }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(json!({"error": "token exchange failed", "details": details})),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("token exchange failed: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Token exchange failed: {}", err)})),
            )
                .into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(String::from)
        .filter(|t| !t.is_empty())
}

fn marketplace_credentials(
    state: &AppState,
    marketplace: Marketplace,
) -> Option<MarketplaceCredentials> {
    match marketplace {
        Marketplace::Ebay => state.ebay.clone(),
        Marketplace::Etsy => state.etsy.clone(),
        Marketplace::StockX => state.stockx.clone(),
        _ => None,
    }
}
