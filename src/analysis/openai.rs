use crate::analysis::prompt::{ANALYSIS_PROMPT, image_data_url};
use crate::utils::constants::{
    DEFAULT_ANALYSIS_MAX_TOKENS, DEFAULT_ANALYSIS_MODEL, DEFAULT_ANALYSIS_TEMPERATURE,
};
use anyhow::Error;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

/// Parameters of one analysis call, already validated (image present).
/// Optional knobs fall back to the fixed defaults when absent.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub base64_image: String,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

/// What came back from the vision API, before any client-side parsing.
#[derive(Debug)]
pub enum UpstreamOutcome {
    /// 2xx with non-empty first-choice message content, relayed verbatim.
    Content(String),
    /// 2xx but no usable content in the reply.
    Empty,
    /// Non-2xx; status and body are passed through to the caller unchanged.
    UpstreamError { status: u16, details: Value },
}

#[derive(Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Issues exactly one chat-completions call with the image attached as a
/// data-URL. No retries, no caching; a transport failure surfaces as `Err`.
pub async fn request_analysis(
    client: &Client,
    api_url: &str,
    api_key: &str,
    params: &AnalysisParams,
) -> Result<UpstreamOutcome, Error> {
    let model = params
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_ANALYSIS_MODEL.to_string());
    let max_tokens = params.max_tokens.unwrap_or(DEFAULT_ANALYSIS_MAX_TOKENS);
    let temperature = params.temperature.unwrap_or(DEFAULT_ANALYSIS_TEMPERATURE);

    let body = json!({
        "model": model,
        "max_tokens": max_tokens,
        "temperature": temperature,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": ANALYSIS_PROMPT },
                {
                    "type": "image_url",
                    "image_url": { "url": image_data_url(&params.base64_image) }
                }
            ]
        }]
    });

    let url = format!("{}/v1/chat/completions", api_url.trim_end_matches('/'));
    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!("OpenAI API error: {} - {}", status, error_text);
        let details = serde_json::from_str::<Value>(&error_text)
            .unwrap_or_else(|_| Value::String(error_text));
        return Ok(UpstreamOutcome::UpstreamError {
            status: status.as_u16(),
            details,
        });
    }

    let reply: ChatCompletionReply = response.json().await?;
    let content = reply
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.is_empty());

    match content {
        Some(content) => Ok(UpstreamOutcome::Content(content)),
        None => Ok(UpstreamOutcome::Empty),
    }
}
