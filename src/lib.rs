#![warn(missing_docs)]
//! TubeRank - YouTube SEO metadata generation and thumbnail editing.
//!
//! This crate wraps the Gemini `generateContent` endpoint with two thin
//! clients: one that turns a video topic into a structured SEO record,
//! and one that edits an uploaded thumbnail image according to a
//! natural-language instruction.
//!
//! # Quick Start - SEO metadata
//!
//! ```no_run
//! use tuberank::{Gateway, SeoClient, SeoProvider};
//!
//! #[tokio::main]
//! async fn main() -> tuberank::Result<()> {
//!     let gateway = Gateway::builder().build()?;
//!     let client = SeoClient::new(gateway);
//!     let record = client.generate("Momos Recipe").await?;
//!     println!("{}", record.short_title);
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - thumbnail editing
//!
//! ```no_run
//! use tuberank::{EditRequest, Gateway, ThumbnailClient, ThumbnailEditor};
//!
//! #[tokio::main]
//! async fn main() -> tuberank::Result<()> {
//!     let gateway = Gateway::builder().build()?;
//!     let client = ThumbnailClient::new(gateway);
//!     let image = std::fs::read("thumbnail.png")?;
//!     let request = EditRequest::new(image, "image/png", "Make the colors pop")?;
//!     let edited = client.edit(&request).await?;
//!     edited.save("tuberank-edited-thumbnail.png")?;
//!     Ok(())
//! }
//! ```
//!
//! The credential is resolved once at [`Gateway`] construction from the
//! `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) environment variable; a missing
//! key fails construction eagerly rather than failing each call.

mod error;

pub mod gateway;
pub mod seo;
pub mod session;
pub mod thumbnail;

// Re-export error types at crate root
pub use error::{Result, TubeRankError};

// Re-export commonly used types
pub use gateway::{Gateway, GatewayBuilder, GeminiModel};
pub use seo::{SeoClient, SeoProvider, SeoRecord};
pub use session::{OperationState, PaneKind, Studio, SubmitError};
pub use thumbnail::{EditRequest, EditedImage, ImageFormat, ThumbnailClient, ThumbnailEditor};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, TubeRankError};
    pub use crate::gateway::Gateway;
    pub use crate::seo::{SeoClient, SeoProvider, SeoRecord};
    pub use crate::session::{OperationState, Studio};
    pub use crate::thumbnail::{EditRequest, EditedImage, ThumbnailClient, ThumbnailEditor};
}
