use std::path::PathBuf;

/// Runtime configuration resolved from the environment.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Catalog-service key from the environment; falls back to the key
    /// store when absent.
    pub youtube_api_key: Option<String>,
    /// Generative-service key. Required only for analysis/outline calls,
    /// never written to the key store.
    pub gemini_api_key: Option<String>,
    pub http_timeout_secs: u64,
    /// Location of the persisted catalog-service key.
    pub key_path: PathBuf,
    /// Default viral-ratio threshold applied after a search.
    pub min_ratio: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("key_path", &self.key_path)
            .field("min_ratio", &self.min_ratio)
            .finish()
    }
}
