//! YouTube Data API v3 client and the catalog query pipeline.
//!
//! Wraps the four read-only endpoints this tool needs (search, videos,
//! channels, commentThreads) behind a typed client, and composes the
//! three-step search → item-statistics → channel-statistics chain into
//! joined [`viralens_core::CatalogItem`] records with the derived
//! view-to-subscriber ratio.

pub mod client;
pub mod error;
pub mod pipeline;
pub mod types;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use pipeline::{lookup_item, search_catalog};
