use crate::marketplaces::{MarketplaceCredentials, rejection_details};
use anyhow::Error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

// Token endpoints reply with standard OAuth snake_case fields.
#[derive(Deserialize)]
struct TokenReply {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: u64,
}

#[derive(Debug)]
pub enum TokenOutcome {
    Granted(AccessToken),
    Denied { status: u16, details: Value },
}

/// The one OAuth step this service performs: swapping an authorization code
/// for an access token at the marketplace's token endpoint. The browser
/// consent flow happens entirely client-side.
pub async fn exchange_authorization_code(
    client: &Client,
    creds: &MarketplaceCredentials,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenOutcome, Error> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri),
    ];

    let response = client
        .post(&creds.token_url)
        .basic_auth(&creds.client_id, Some(&creds.client_secret))
        .form(&params)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!("token exchange failed: {} - {}", status, error_text);
        return Ok(TokenOutcome::Denied {
            status: status.as_u16(),
            details: rejection_details(error_text),
        });
    }

    let reply: TokenReply = response.json().await?;
    Ok(TokenOutcome::Granted(AccessToken {
        access_token: reply.access_token,
        refresh_token: reply.refresh_token,
        expires_in: reply.expires_in,
    }))
}
