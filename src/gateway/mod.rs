//! Shared transport for the Gemini `generateContent` endpoint.
//!
//! One [`Gateway`] is built at startup from an environment-provided
//! credential and handed to both the SEO and thumbnail clients; cloning is
//! cheap and shares the underlying HTTP connection pool.

mod wire;

pub use wire::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part, PartPayload, PromptFeedback, ResponseContent, ResponsePart, Schema,
    SchemaType,
};

use std::time::Duration;

use crate::error::{Result, TubeRankError};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini model variants used by this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeminiModel {
    /// Text model used for structured SEO generation.
    #[default]
    Flash,
    /// Image model used for thumbnail editing.
    FlashImage,
}

impl GeminiModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flash => "gemini-2.5-flash",
            Self::FlashImage => "gemini-2.5-flash-image",
        }
    }
}

/// Builder for [`Gateway`].
#[derive(Debug, Clone, Default)]
pub struct GatewayBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl GatewayBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to the `GEMINI_API_KEY` then
    /// `GOOGLE_API_KEY` env vars.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the API base URL (tests, proxies).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the gateway, resolving the API key.
    ///
    /// Fails eagerly with [`TubeRankError::Auth`] when no credential is
    /// found, so no later call ever attempts a network round trip without
    /// one.
    pub fn build(self) -> Result<Gateway> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                TubeRankError::Auth("GEMINI_API_KEY not set and no API key provided".into())
            })?;

        Ok(Gateway {
            client: reqwest::Client::new(),
            api_key,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Transport to the hosted generative model.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl Gateway {
    /// Creates a new [`GatewayBuilder`].
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Issues a single-shot `generateContent` call against the given model.
    pub async fn generate_content(
        &self,
        model: GeminiModel,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url,
            model.as_str()
        );
        tracing::debug!(model = model.as_str(), "dispatching generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text, &headers));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        // Prompt blocks come back as HTTP 200 with feedback attached.
        if let Some(feedback) = &parsed.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                let message = feedback
                    .block_reason_message
                    .clone()
                    .unwrap_or_else(|| format!("prompt blocked: {reason}"));
                return Err(TubeRankError::ContentBlocked(message));
            }
        }

        Ok(parsed)
    }
}

fn parse_error(status: u16, body: &str, headers: &reqwest::header::HeaderMap) -> TubeRankError {
    let message = sanitize_error_body(body);
    match status {
        401 | 403 => TubeRankError::Auth(message),
        404 => TubeRankError::InvalidRequest(
            "model not found, verify the model name is correct".into(),
        ),
        429 => TubeRankError::RateLimited {
            retry_after: parse_retry_after(headers),
        },
        _ => {
            let lower = message.to_lowercase();
            if lower.contains("safety") || lower.contains("blocked") || lower.contains("prohibited")
            {
                TubeRankError::ContentBlocked(message)
            } else {
                TubeRankError::Api { status, message }
            }
        }
    }
}

/// Extracts the message from Google's error envelope, falling back to a
/// truncated raw body.
fn sanitize_error_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.pointer("/error/message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    match trimmed.char_indices().nth(500) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
