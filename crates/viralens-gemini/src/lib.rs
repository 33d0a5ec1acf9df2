//! Gemini generative-language client for the narrative analysis stage.
//!
//! Submits one video's descriptive text plus its fetched comments to the
//! `generateContent` endpoint under a fixed JSON response schema, and
//! expands extracted keywords into script outlines on demand. The remote
//! schema declaration is not trusted: every required field and array
//! cardinality is re-validated after parsing, and any deviation is a typed
//! failure rather than a partial result.

pub mod analysis;
pub mod client;
pub mod error;
pub mod outline;
mod types;

pub use analysis::analyze_content;
pub use client::GeminiClient;
pub use error::InsightError;
pub use outline::generate_script_outline;
