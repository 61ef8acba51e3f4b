use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, Router, http::StatusCode};
use quickflip_server::marketplaces::MarketplaceCredentials;
use quickflip_server::server::build_router;
use quickflip_server::server::types::AppState;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A canned upstream API: records every request body it sees and answers
/// with one fixed status and JSON reply, whatever the path.
pub struct MockUpstream {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl MockUpstream {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> Value {
        self.requests.lock().unwrap()[index].clone()
    }
}

struct MockState {
    status: u16,
    reply: Value,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn mock_handler(
    State(state): State<Arc<MockState>>,
    body: String,
) -> impl IntoResponse {
    let recorded = serde_json::from_str(&body).unwrap_or(Value::String(body));
    state.requests.lock().unwrap().push(recorded);
    (
        StatusCode::from_u16(state.status).unwrap(),
        Json(state.reply.clone()),
    )
}

pub async fn spawn_upstream(status: u16, reply: Value) -> MockUpstream {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = Arc::new(MockState {
        status,
        reply,
        requests: requests.clone(),
    });
    let router = Router::new().fallback(mock_handler).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockUpstream {
        url: format!("http://{}", addr),
        requests,
    }
}

pub fn mock_credentials(api_url: &str) -> MarketplaceCredentials {
    MarketplaceCredentials {
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        token_url: format!("{}/oauth/token", api_url),
        api_url: api_url.to_string(),
    }
}

pub fn test_state(openai_api_url: &str) -> AppState {
    AppState {
        http_client: reqwest::Client::new(),
        openai_api_url: openai_api_url.to_string(),
        openai_api_key: "test-key".to_string(),
        ebay: None,
        etsy: None,
        stockx: None,
    }
}

/// Boots the real router on an ephemeral port and returns its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let router = build_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
