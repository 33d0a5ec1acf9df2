use thiserror::Error;

/// Errors returned by the YouTube Data API client and pipeline.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// No API key was supplied; the network chain is never attempted.
    #[error("YouTube API key is missing")]
    MissingCredential,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service itself reported an error payload; the message is the
    /// service's own, surfaced verbatim.
    #[error("YouTube API error: {0}")]
    Service(String),

    /// Transport succeeded but the payload shape was unusable.
    #[error("unusable YouTube response for {context}: {source}")]
    Malformed {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
