//! View-state model for the two-pane studio.
//!
//! Mirrors the hosting UI's contract: two independent panes (metadata
//! generator and thumbnail editor), each with an input capture step, a
//! trigger gated on input validity and an in-flight flag, and a
//! result-or-error state. Failures collapse to one fixed user-facing
//! message per operation; the underlying error detail goes to `tracing`.

use std::path::{Path, PathBuf};

use crate::error::{Result, TubeRankError};
use crate::seo::{SeoProvider, SeoRecord};
use crate::thumbnail::{EditRequest, EditedImage, ThumbnailEditor};

/// Generic user-facing message for a failed metadata generation.
pub const GENERATION_FAILED_MESSAGE: &str = "Unable to generate metadata.";

/// Generic user-facing message for a failed image edit.
pub const EDIT_FAILED_MESSAGE: &str = "Unable to process image.";

/// Fixed filename the edited thumbnail is saved under.
pub const DOWNLOAD_FILE_NAME: &str = "tuberank-edited-thumbnail.png";

/// Observable state of one asynchronous gateway operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationState<T> {
    /// No operation has run yet.
    Idle,
    /// An operation is in flight; re-submission is blocked.
    Pending,
    /// The last operation succeeded.
    Succeeded(T),
    /// The last operation failed, with the user-facing message.
    Failed(String),
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> OperationState<T> {
    /// Returns true while an operation is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the held result, if the last operation succeeded.
    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the user-facing message, if the last operation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The two mutually exclusive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneKind {
    /// The metadata generator view.
    #[default]
    Metadata,
    /// The thumbnail editor view.
    Editor,
}

/// Why a trigger did not start an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Required input is missing or blank.
    #[error("required input is missing or blank")]
    EmptyInput,
    /// The pane already has an operation in flight.
    #[error("operation already in flight")]
    Busy,
}

/// An uploaded source image held by the editor pane.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// MIME type of the upload.
    pub mime_type: String,
}

#[derive(Debug, Default)]
struct MetadataPane {
    topic: String,
    state: OperationState<SeoRecord>,
}

#[derive(Debug, Default)]
struct EditorPane {
    image: Option<SourceImage>,
    instruction: String,
    state: OperationState<EditedImage>,
}

/// Two-pane view state: metadata generator and thumbnail editor.
///
/// The panes are independent; switching the active pane never clears the
/// other pane's state, and an in-flight operation in one pane does not
/// block the other.
#[derive(Debug, Default)]
pub struct Studio {
    active: PaneKind,
    metadata: MetadataPane,
    editor: EditorPane,
}

impl Studio {
    /// Creates a studio with both panes idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active pane.
    pub fn active(&self) -> PaneKind {
        self.active
    }

    /// Switches the active pane. The other pane's state is untouched.
    pub fn select(&mut self, pane: PaneKind) {
        self.active = pane;
    }

    // --- metadata pane ---

    /// Sets the topic input.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.metadata.topic = topic.into();
    }

    /// Returns the current topic input.
    pub fn topic(&self) -> &str {
        &self.metadata.topic
    }

    /// Returns the metadata pane's operation state.
    pub fn metadata(&self) -> &OperationState<SeoRecord> {
        &self.metadata.state
    }

    /// Validates the trigger preconditions and marks the pane in flight.
    ///
    /// Returns the trimmed topic to submit. A blank topic or an in-flight
    /// operation is rejected before any gateway call is issued.
    pub fn begin_generation(&mut self) -> std::result::Result<String, SubmitError> {
        if self.metadata.state.is_pending() {
            return Err(SubmitError::Busy);
        }
        let topic = self.metadata.topic.trim();
        if topic.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        let topic = topic.to_string();
        self.metadata.state = OperationState::Pending;
        Ok(topic)
    }

    /// Runs one metadata generation against the given provider.
    ///
    /// `Err` means the trigger was rejected and no call was issued; `Ok`
    /// means the pane now holds either the record or the generic failure
    /// message.
    pub async fn run_generation<P>(&mut self, provider: &P) -> std::result::Result<(), SubmitError>
    where
        P: SeoProvider + ?Sized,
    {
        let topic = self.begin_generation()?;
        match provider.generate(&topic).await {
            Ok(record) => {
                self.metadata.state = OperationState::Succeeded(record);
            }
            Err(error) => {
                tracing::error!(%error, "metadata generation failed");
                self.metadata.state =
                    OperationState::Failed(GENERATION_FAILED_MESSAGE.to_string());
            }
        }
        Ok(())
    }

    // --- editor pane ---

    /// Captures an uploaded source image, clearing any previous result or
    /// error.
    pub fn attach_image(&mut self, data: Vec<u8>, mime_type: impl Into<String>) {
        self.editor.image = Some(SourceImage {
            data,
            mime_type: mime_type.into(),
        });
        self.editor.state = OperationState::Idle;
    }

    /// Returns the uploaded source image, if any.
    pub fn source_image(&self) -> Option<&SourceImage> {
        self.editor.image.as_ref()
    }

    /// Sets the edit instruction input.
    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        self.editor.instruction = instruction.into();
    }

    /// Returns the current edit instruction input.
    pub fn instruction(&self) -> &str {
        &self.editor.instruction
    }

    /// Returns the editor pane's operation state.
    pub fn edited(&self) -> &OperationState<EditedImage> {
        &self.editor.state
    }

    /// Validates the trigger preconditions and marks the pane in flight.
    ///
    /// Returns the edit request to submit. A missing image, blank
    /// instruction, or in-flight operation is rejected before any gateway
    /// call is issued.
    pub fn begin_edit(&mut self) -> std::result::Result<EditRequest, SubmitError> {
        if self.editor.state.is_pending() {
            return Err(SubmitError::Busy);
        }
        let image = self.editor.image.clone().ok_or(SubmitError::EmptyInput)?;
        let request =
            EditRequest::new(image.data, image.mime_type, self.editor.instruction.clone())
                .map_err(|_| SubmitError::EmptyInput)?;
        self.editor.state = OperationState::Pending;
        Ok(request)
    }

    /// Runs one image edit against the given editor.
    pub async fn run_edit<E>(&mut self, editor: &E) -> std::result::Result<(), SubmitError>
    where
        E: ThumbnailEditor + ?Sized,
    {
        let request = self.begin_edit()?;
        match editor.edit(&request).await {
            Ok(image) => {
                self.editor.state = OperationState::Succeeded(image);
            }
            Err(error) => {
                tracing::error!(%error, "image edit failed");
                self.editor.state = OperationState::Failed(EDIT_FAILED_MESSAGE.to_string());
            }
        }
        Ok(())
    }

    /// Saves the held edit result under [`DOWNLOAD_FILE_NAME`] in `dir`.
    ///
    /// Re-packages the already-held bytes; no gateway call is made.
    pub fn save_edited(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let image = self.editor.state.result().ok_or_else(|| {
            TubeRankError::InvalidRequest("no edited image to save".into())
        })?;
        let path = dir.as_ref().join(DOWNLOAD_FILE_NAME);
        image.save(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_record() -> SeoRecord {
        serde_json::from_value(serde_json::json!({
            "titles": ["t1", "t2", "t3", "t4", "t5"],
            "description": "desc",
            "hashtags": ["#a"],
            "tags": ["a"],
            "thumbnailTexts": ["BIG"],
            "hooks": ["hook"],
            "shortTitle": "short",
            "relatedQueries": ["q"]
        }))
        .unwrap()
    }

    #[derive(Default)]
    struct CountingSeo {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SeoProvider for CountingSeo {
        async fn generate(&self, _topic: &str) -> Result<SeoRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(TubeRankError::Api {
                    status: 500,
                    message: "boom".into(),
                })
            } else {
                Ok(sample_record())
            }
        }
    }

    #[derive(Default)]
    struct CountingEditor {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ThumbnailEditor for CountingEditor {
        async fn edit(&self, _request: &EditRequest) -> Result<EditedImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(TubeRankError::NoImage)
            } else {
                Ok(EditedImage::new(vec![1, 2, 3]))
            }
        }
    }

    #[tokio::test]
    async fn test_blank_topic_never_reaches_provider() {
        let provider = CountingSeo::default();
        let mut studio = Studio::new();

        studio.set_topic("   ");
        let outcome = studio.run_generation(&provider).await;
        assert_eq!(outcome, Err(SubmitError::EmptyInput));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(*studio.metadata(), OperationState::Idle);
    }

    #[tokio::test]
    async fn test_generation_success() {
        let provider = CountingSeo::default();
        let mut studio = Studio::new();

        studio.set_topic("  Momos Recipe  ");
        studio.run_generation(&provider).await.unwrap();

        let record = studio.metadata().result().unwrap();
        assert_eq!(record.titles.len(), 5);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_collapses_to_generic_message() {
        let provider = CountingSeo {
            fail: true,
            ..Default::default()
        };
        let mut studio = Studio::new();

        studio.set_topic("Momos Recipe");
        studio.run_generation(&provider).await.unwrap();

        assert_eq!(studio.metadata().error(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_in_flight_guard_blocks_second_submission() {
        let provider = CountingSeo::default();
        let mut studio = Studio::new();

        studio.set_topic("Momos Recipe");
        studio.begin_generation().unwrap();
        assert!(studio.metadata().is_pending());

        let outcome = studio.run_generation(&provider).await;
        assert_eq!(outcome, Err(SubmitError::Busy));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_edit_requires_image_and_instruction() {
        let editor = CountingEditor::default();
        let mut studio = Studio::new();

        studio.set_instruction("brighten it");
        assert_eq!(studio.run_edit(&editor).await, Err(SubmitError::EmptyInput));

        studio.attach_image(vec![1, 2, 3], "image/png");
        studio.set_instruction("  ");
        assert_eq!(studio.run_edit(&editor).await, Err(SubmitError::EmptyInput));
        assert_eq!(editor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_edit_success_and_save() {
        let editor = CountingEditor::default();
        let mut studio = Studio::new();

        studio.attach_image(vec![9, 9, 9], "image/png");
        studio.set_instruction("brighten it");
        studio.run_edit(&editor).await.unwrap();

        assert_eq!(studio.edited().result().unwrap().size(), 3);

        let dir = tempfile::tempdir().unwrap();
        let path = studio.save_edited(dir.path()).unwrap();
        assert!(path.ends_with(DOWNLOAD_FILE_NAME));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_edit_failure_collapses_to_generic_message() {
        let editor = CountingEditor {
            fail: true,
            ..Default::default()
        };
        let mut studio = Studio::new();

        studio.attach_image(vec![1], "image/png");
        studio.set_instruction("brighten it");
        studio.run_edit(&editor).await.unwrap();

        assert_eq!(studio.edited().error(), Some(EDIT_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_attach_image_clears_previous_result() {
        let editor = CountingEditor::default();
        let mut studio = Studio::new();

        studio.attach_image(vec![1], "image/png");
        studio.set_instruction("brighten it");
        studio.run_edit(&editor).await.unwrap();
        assert!(studio.edited().result().is_some());

        studio.attach_image(vec![2], "image/jpeg");
        assert_eq!(*studio.edited(), OperationState::Idle);
    }

    #[tokio::test]
    async fn test_panes_are_independent() {
        let provider = CountingSeo::default();
        let editor = CountingEditor {
            fail: true,
            ..Default::default()
        };
        let mut studio = Studio::new();

        studio.set_topic("Momos Recipe");
        studio.run_generation(&provider).await.unwrap();

        studio.select(PaneKind::Editor);
        studio.attach_image(vec![1], "image/png");
        studio.set_instruction("brighten it");
        studio.run_edit(&editor).await.unwrap();

        // The failed edit leaves the metadata result untouched.
        assert!(studio.metadata().result().is_some());
        assert!(studio.edited().error().is_some());
        assert_eq!(studio.active(), PaneKind::Editor);

        studio.select(PaneKind::Metadata);
        assert!(studio.edited().error().is_some());
    }

    #[test]
    fn test_save_without_result_fails() {
        let studio = Studio::new();
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            studio.save_edited(dir.path()),
            Err(TubeRankError::InvalidRequest(_))
        ));
    }
}
