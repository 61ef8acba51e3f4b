pub mod handlers;
pub mod types;

use crate::server::handlers::{
    analyze_single_item_handler, build_listing_handler, handoff_handler, oauth_token_handler,
    parse_analysis_handler, server_status_handler, submit_listing_handler,
};
use crate::server::types::AppState;
use crate::utils::constants::SERVER_REQUEST_BODY_LIMIT;
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = TimeoutLayer::new(Duration::from_secs(120));
    let request_body_limit = RequestBodyLimitLayer::new(SERVER_REQUEST_BODY_LIMIT);

    Router::new()
        .route("/", get(server_status_handler))
        .route("/analyze-single-item-v2", post(analyze_single_item_handler))
        .route("/parse-analysis", post(parse_analysis_handler))
        .route("/listings/{marketplace}", post(build_listing_handler))
        .route("/handoff/{marketplace}", post(handoff_handler))
        .route("/submit/{marketplace}", post(submit_listing_handler))
        .route("/oauth/{marketplace}/token", post(oauth_token_handler))
        .layer(timeout)
        .layer(cors)
        .layer(request_body_limit)
        .with_state(state)
}
