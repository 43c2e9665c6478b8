//! Gemini REST implementation of [`Generator`].
//!
//! One `generateContent` call per attempt. Retry and fallback live in
//! [`crate::ModelRouter`]; this client only maps HTTP to [`GeneratorError`].

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ff_config::GeminiConfig;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::GeneratorError;
use crate::generator::{Generator, InlineImage};

const USER_AGENT: &str = concat!("fieldfix/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from the `gemini` config section.
    ///
    /// # Errors
    ///
    /// Returns an `Unknown` [`GeneratorError`] if no API key is configured or
    /// the HTTP client fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeneratorError> {
        if !config.is_configured() {
            return Err(GeneratorError::unknown("gemini.api_key is not set"));
        }
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, GeneratorError> {
        let body = request_body(prompt, image);
        tracing::debug!(model, with_image = image.is_some(), "gemini generateContent");

        let resp = self
            .http
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let parsed: GenerateResponse = resp.json().await?;
        response_text(parsed)
    }
}

/// `generateContent` body: the prompt text, then the image part if any.
fn request_body(prompt: &str, image: Option<&InlineImage>) -> Value {
    let mut parts = vec![json!({ "text": prompt })];
    if let Some(image) = image {
        parts.push(json!({
            "inline_data": {
                "mime_type": image.mime_type,
                "data": STANDARD.encode(&image.data),
            }
        }));
    }
    json!({ "contents": [{ "role": "user", "parts": parts }] })
}

/// Non-success statuses become a classified [`GeneratorError`] carrying the
/// response body as its message.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GeneratorError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(GeneratorError::classified(Some(status.as_u16()), message))
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenated text parts of the first candidate.
fn response_text(resp: GenerateResponse) -> Result<String, GeneratorError> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(GeneratorError::unknown("response contained no text"));
    }
    Ok(text)
}
