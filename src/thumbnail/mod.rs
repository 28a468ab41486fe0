//! Thumbnail editing module.

mod client;
mod types;

pub use client::{ThumbnailClient, ThumbnailEditor};
pub use types::{EditRequest, EditedImage, ImageFormat, OUTPUT_MIME_TYPE};
