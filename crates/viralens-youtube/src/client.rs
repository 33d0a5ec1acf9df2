//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API-key handling and typed response
//! deserialization. The API signals failures through an `{"error": {...}}`
//! envelope (often alongside a 4xx status); every endpoint checks the
//! envelope first so the service's own message reaches the caller verbatim.

use std::time::Duration;

use reqwest::{Client, Url};
use viralens_core::{DurationBucket, EngagementComment};

use crate::error::YoutubeError;
use crate::types::{
    ChannelItem, ChannelListResponse, CommentThreadListResponse, SearchListResponse, VideoItem,
    VideoListResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Search results per catalog query.
const SEARCH_BATCH_SIZE: u32 = 25;
/// Top-level comments fetched per analysis request.
const COMMENT_BATCH_SIZE: u32 = 50;

/// Client for the YouTube Data API v3.
///
/// Holds the HTTP client, the user-supplied API key, and the base URL. Use
/// [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::Service`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("viralens/0.1 (content-research)")
            .build()?;

        // Normalise: a trailing slash makes Url::join treat the last path
        // segment as a directory, so "videos" lands under /youtube/v3/.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YoutubeError::Service(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Step 1 of the catalog chain: candidate video ids for a query.
    ///
    /// Calls `search.list` constrained to videos, 25 results, the given
    /// duration bucket. An empty hit list is not an error.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::MissingCredential`] if no API key was supplied.
    /// - [`YoutubeError::Service`] if the API returns an error envelope.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Malformed`] if the payload shape is unusable.
    pub async fn search(
        &self,
        query: &str,
        duration: DurationBucket,
    ) -> Result<Vec<String>, YoutubeError> {
        self.ensure_credential()?;
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("maxResults", &SEARCH_BATCH_SIZE.to_string()),
                ("q", query),
                ("type", "video"),
                ("videoDuration", duration.as_param()),
            ],
        );
        let body = self.request_json(&url, "search").await?;

        let parsed: SearchListResponse = Self::decode(body, "search")?;
        Ok(parsed
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    /// Step 2: per-item counters and snippet metadata for a batch of ids
    /// (comma-joined, single call).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`YoutubeClient::search`].
    pub async fn video_stats(&self, ids: &[String]) -> Result<Vec<VideoItem>, YoutubeError> {
        self.ensure_credential()?;
        let url = self.build_url(
            "videos",
            &[("part", "statistics,snippet"), ("id", &ids.join(","))],
        );
        let body = self.request_json(&url, "videos").await?;

        let parsed: VideoListResponse = Self::decode(body, "videos")?;
        Ok(parsed.items)
    }

    /// Step 3: subscriber counters for a batch of distinct channel ids
    /// (comma-joined, single call).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`YoutubeClient::search`].
    pub async fn channel_stats(&self, ids: &[String]) -> Result<Vec<ChannelItem>, YoutubeError> {
        self.ensure_credential()?;
        let url = self.build_url("channels", &[("part", "statistics"), ("id", &ids.join(","))]);
        let body = self.request_json(&url, "channels").await?;

        let parsed: ChannelListResponse = Self::decode(body, "channels")?;
        Ok(parsed.items)
    }

    /// Top-level comments for one video, batch size 50, mapped straight to
    /// domain records.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`YoutubeClient::search`].
    pub async fn comment_threads(
        &self,
        video_id: &str,
    ) -> Result<Vec<EngagementComment>, YoutubeError> {
        self.ensure_credential()?;
        let url = self.build_url(
            "commentThreads",
            &[
                ("part", "snippet"),
                ("maxResults", &COMMENT_BATCH_SIZE.to_string()),
                ("videoId", video_id),
            ],
        );
        let body = self.request_json(&url, "commentThreads").await?;

        let parsed: CommentThreadListResponse = Self::decode(body, "commentThreads")?;
        Ok(parsed
            .items
            .into_iter()
            .map(|thread| {
                let snippet = thread.snippet.top_level_comment.snippet;
                EngagementComment {
                    text: snippet.text_display,
                    author: snippet.author_display_name,
                    like_count: snippet.like_count,
                }
            })
            .collect())
    }

    fn ensure_credential(&self) -> Result<(), YoutubeError> {
        if self.api_key.is_empty() {
            return Err(YoutubeError::MissingCredential);
        }
        Ok(())
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, appending the API key last.
    fn build_url(&self, resource: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(resource)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, parses the body as JSON, and checks the error
    /// envelope before the HTTP status so the API's own message wins.
    ///
    /// `context` is the resource name; the full URL carries the key and is
    /// kept out of errors.
    async fn request_json(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| YoutubeError::Malformed {
                context: context.to_string(),
                source: e,
            })?;

        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
        {
            return Err(YoutubeError::Service(message.to_string()));
        }
        if !status.is_success() {
            return Err(YoutubeError::Service(format!(
                "unexpected HTTP status {status}"
            )));
        }
        Ok(value)
    }

    fn decode<T: serde::de::DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, YoutubeError> {
        serde_json::from_value(body).map_err(|e| YoutubeError::Malformed {
            context: context.to_string(),
            source: e,
        })
    }
}
