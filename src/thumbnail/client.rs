//! Thumbnail editing against the Gemini image model.

use async_trait::async_trait;
use base64::Engine;

use crate::error::{Result, TubeRankError};
use crate::gateway::{
    Candidate, Gateway, GeminiModel, GenerateContentRequest, Part, PartPayload, ResponsePart,
};
use crate::thumbnail::types::{EditRequest, EditedImage};

/// Trait for image edit sources.
#[async_trait]
pub trait ThumbnailEditor: Send + Sync {
    /// Edits the source image per the request's instruction.
    ///
    /// Returns either one complete image or an error; there is no partial
    /// output. A response carrying only text parts (a refusal or a
    /// clarification) fails with [`TubeRankError::NoImage`], distinct from
    /// transport failures.
    async fn edit(&self, request: &EditRequest) -> Result<EditedImage>;
}

/// Thumbnail editing client backed by the Gemini image model.
pub struct ThumbnailClient {
    gateway: Gateway,
    model: GeminiModel,
}

impl ThumbnailClient {
    /// Creates a client over the given gateway.
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            model: GeminiModel::FlashImage,
        }
    }

    /// Overrides the model variant.
    pub fn with_model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl ThumbnailEditor for ThumbnailClient {
    async fn edit(&self, request: &EditRequest) -> Result<EditedImage> {
        let wire = build_request(request);
        let response = self.gateway.generate_content(self.model, &wire).await?;

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            TubeRankError::EmptyResponse("no candidates in edit response".into())
        })?;

        let data = extract_image(candidate)?;
        tracing::debug!(bytes = data.len(), "edited image received");
        Ok(EditedImage::new(data))
    }
}

/// One content block: the inline source image first, the instruction after.
fn build_request(request: &EditRequest) -> GenerateContentRequest {
    GenerateContentRequest::single_shot(vec![
        Part::inline_image(&request.image, &request.mime_type),
        Part::text(request.instruction.clone()),
    ])
}

/// Returns the decoded bytes of the first inline-image part.
///
/// Any further image parts are silently discarded.
fn extract_image(candidate: Candidate) -> Result<Vec<u8>> {
    let content = candidate
        .content
        .ok_or_else(|| TubeRankError::EmptyResponse("no content in edit candidate".into()))?;

    let encoded = content
        .parts
        .into_iter()
        .filter_map(ResponsePart::into_payload)
        .find_map(|payload| match payload {
            PartPayload::InlineBinary { data, .. } => Some(data),
            PartPayload::Text(_) => None,
        })
        .ok_or(TubeRankError::NoImage)?;

    let data = base64::engine::general_purpose::STANDARD
        .decode(&encoded)
        .map_err(|e| TubeRankError::Decode(e.to_string()))?;

    if data.is_empty() {
        return Err(TubeRankError::Decode("decoded image payload is empty".into()));
    }

    Ok(data)
}
