//! The structured SEO metadata record.

use serde::{Deserialize, Serialize};

/// SEO metadata generated for one video topic.
///
/// All eight fields are mandatory in the gateway contract; deserialization
/// fails on a missing field or a wrong container shape, so a decoded
/// record is never partially populated. The per-field count targets
/// (5 titles, 25 hashtags, ...) are advisory to the model, not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoRecord {
    /// High-CTR video titles, 5 expected.
    pub titles: Vec<String>,
    /// One long SEO-optimized description, 150-200 words expected.
    pub description: String,
    /// SEO hashtags, 25 expected, each `#`-prefixed by convention.
    pub hashtags: Vec<String>,
    /// YouTube tags / keywords, 30 expected.
    pub tags: Vec<String>,
    /// Short thumbnail text ideas, 5 expected.
    pub thumbnail_texts: Vec<String>,
    /// Hook lines for the first seconds of the video, 3 expected.
    pub hooks: Vec<String>,
    /// One short search title, intended under 50 characters.
    pub short_title: String,
    /// Related search queries, unbounded count.
    pub related_queries: Vec<String>,
}
