//! Structured SEO metadata generation.

use async_trait::async_trait;

use crate::error::{Result, TubeRankError};
use crate::gateway::{
    Gateway, GeminiModel, GenerateContentRequest, GenerationConfig, Part, Schema,
};
use crate::seo::types::SeoRecord;

/// Sampling temperature favoring creative variety over determinism.
const TEMPERATURE: f32 = 0.7;

/// Trait for SEO metadata sources.
#[async_trait]
pub trait SeoProvider: Send + Sync {
    /// Generates a full metadata record for the given topic.
    ///
    /// All-or-nothing: either a record with all eight fields, or an error.
    /// The caller is expected to reject empty topics before calling.
    async fn generate(&self, topic: &str) -> Result<SeoRecord>;
}

/// SEO metadata client backed by the Gemini text model.
pub struct SeoClient {
    gateway: Gateway,
    model: GeminiModel,
}

impl SeoClient {
    /// Creates a client over the given gateway.
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            model: GeminiModel::Flash,
        }
    }

    /// Overrides the model variant.
    pub fn with_model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl SeoProvider for SeoClient {
    async fn generate(&self, topic: &str) -> Result<SeoRecord> {
        let request = build_request(topic);
        let response = self.gateway.generate_content(self.model, &request).await?;

        let text = response.text().ok_or_else(|| {
            TubeRankError::EmptyResponse("no text payload in generation response".into())
        })?;

        let record: SeoRecord = serde_json::from_str(&text)?;
        tracing::debug!(
            titles = record.titles.len(),
            hashtags = record.hashtags.len(),
            "decoded seo record"
        );
        Ok(record)
    }
}

fn build_request(topic: &str) -> GenerateContentRequest {
    GenerateContentRequest::single_shot(vec![Part::text(seo_prompt(topic))]).with_config(
        GenerationConfig {
            temperature: Some(TEMPERATURE),
            response_mime_type: Some("application/json".into()),
            response_schema: Some(seo_schema()),
        },
    )
}

/// The generation prompt. The topic is embedded verbatim; the gateway's
/// adherence to the response schema is the only guard against hostile
/// topic text.
fn seo_prompt(topic: &str) -> String {
    format!(
        r#"You are a YouTube SEO expert specialized in the Indian market (Hindi + Hinglish).

My video topic: "{topic}"

Generate the following strictly in JSON format:
1. 5 high-CTR, clickbait titles (mix of Hindi + English)
2. 1 long SEO-optimized description (150-200 words, keyword enriched, viral tone)
3. 25 best SEO hashtags (starting with #)
4. 30 YouTube tags / keywords
5. 5 thumbnail text ideas (short, punchy, 4-5 words max)
6. 3 hook lines for the first 3 seconds (must be engaging)
7. 1 short search title (under 50 characters, for filename or quick search)
8. Related search queries people search on YouTube

Language: Hindi + Hinglish
Style: viral, engaging, high retention
Goal: ranking, CTR boost, suggested videos, Shorts feed visibility."#
    )
}

fn seo_schema() -> Schema {
    Schema::object(vec![
        (
            "titles",
            Schema::string_array("5 high-CTR, clickbait titles in Hindi/Hinglish"),
        ),
        (
            "description",
            Schema::string("1 long SEO-optimized description (150-200 words) in Hindi/Hinglish"),
        ),
        ("hashtags", Schema::string_array("25 best SEO hashtags")),
        ("tags", Schema::string_array("30 YouTube tags / keywords")),
        (
            "thumbnailTexts",
            Schema::string_array("5 thumbnail text ideas (4-5 words only)"),
        ),
        (
            "hooks",
            Schema::string_array("3 hook lines for the first 3 seconds"),
        ),
        (
            "shortTitle",
            Schema::string("1 short search title (under 50 characters)"),
        ),
        (
            "relatedQueries",
            Schema::string_array("related search queries people search on YouTube"),
        ),
    ])
}
