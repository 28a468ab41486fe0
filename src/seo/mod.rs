//! Structured SEO metadata generation.

mod client;
mod types;

pub use client::{SeoClient, SeoProvider};
pub use types::SeoRecord;
