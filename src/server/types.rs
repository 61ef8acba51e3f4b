use crate::marketplaces::MarketplaceCredentials;
use crate::utils::constants::DEFAULT_OPENAI_API_URL;
use crate::utils::get_env::{get_env_var, get_env_var_or, get_optional_env_var};
use anyhow::Error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
    pub openai_api_url: String,
    pub openai_api_key: String,
    pub ebay: Option<MarketplaceCredentials>,
    pub etsy: Option<MarketplaceCredentials>,
    pub stockx: Option<MarketplaceCredentials>,
}

impl AppState {
    /// Assembles the state from environment variables. Only the OpenAI key
    /// is required; a marketplace with incomplete credentials stays
    /// unconfigured and its `/submit` route answers 503.
    pub fn from_env() -> Result<AppState, Error> {
        let openai_api_key = get_env_var("OPENAI_API_KEY")?;
        let openai_api_url = get_env_var_or("OPENAI_API_URL", DEFAULT_OPENAI_API_URL);

        Ok(AppState {
            http_client: Client::new(),
            openai_api_url,
            openai_api_key,
            ebay: credentials_from_env("EBAY"),
            etsy: credentials_from_env("ETSY"),
            stockx: credentials_from_env("STOCKX"),
        })
    }
}

fn credentials_from_env(prefix: &str) -> Option<MarketplaceCredentials> {
    Some(MarketplaceCredentials {
        client_id: get_optional_env_var(&format!("{}_CLIENT_ID", prefix))?,
        client_secret: get_optional_env_var(&format!("{}_CLIENT_SECRET", prefix))?,
        token_url: get_optional_env_var(&format!("{}_TOKEN_URL", prefix))?,
        api_url: get_optional_env_var(&format!("{}_API_URL", prefix))?,
    })
}

/// Body of `POST /analyze-single-item-v2`. Everything is optional at the
/// serde layer so a missing image becomes our 400, not a deserializer error.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub base64_image: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalyzeResponse {
    pub content: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ParseRequest {
    pub content: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OauthTokenRequest {
    pub code: String,
    pub redirect_uri: String,
}
