//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! One POST per invocation, no retries. The API key travels in the
//! `x-goog-api-key` header and is a separate credential from the catalog
//! key — the catalog key never reaches this service. Failures are reduced
//! to a reason string; the analysis and outline callers wrap it into their
//! own typed error.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Client for the Gemini generative-language API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

impl GeminiClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns the underlying construction failure as a reason string, in
    /// line with how every other failure of this client surfaces.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, String> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns a reason string if the HTTP client cannot be constructed or
    /// `base_url` is not a valid URL.
    pub fn with_base_url(api_key: &str, timeout_secs: u64, base_url: &str) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("viralens/0.1 (content-research)")
            .build()
            .map_err(|e| format!("could not build HTTP client: {e}"))?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| format!("invalid base URL '{base_url}': {e}"))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: DEFAULT_MODEL.to_owned(),
        })
    }

    /// Sends one schema-constrained generation request and returns the
    /// model's output parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns a reason string for transport failures, service-reported
    /// errors, an empty candidate body, or output that is not valid JSON.
    pub(crate) async fn generate_json(
        &self,
        prompt: &str,
        response_schema: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let url = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| format!("invalid model path: {e}"))?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            },
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("could not read response body: {e}"))?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| format!("response was not JSON: {e}"))?;

        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
        {
            return Err(format!("service error: {message}"));
        }
        if !status.is_success() {
            return Err(format!("unexpected HTTP status {status}"));
        }

        let parsed: GenerateContentResponse = serde_json::from_value(value)
            .map_err(|e| format!("unexpected response shape: {e}"))?;
        let text = parsed
            .first_candidate_text()
            .ok_or_else(|| "empty response body".to_string())?;

        serde_json::from_str(&text).map_err(|e| format!("candidate text was not valid JSON: {e}"))
    }
}
