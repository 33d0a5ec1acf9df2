use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the real environment so it
/// can be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("VIRALENS_LOG_LEVEL", "info");
    let youtube_api_key = lookup("YOUTUBE_API_KEY").ok().filter(|k| !k.is_empty());
    let gemini_api_key = lookup("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
    let http_timeout_secs = parse_u64("VIRALENS_HTTP_TIMEOUT_SECS", "30")?;

    let key_path = match lookup("VIRALENS_KEY_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => default_key_path(&lookup),
    };

    let min_ratio = parse_f64("VIRALENS_MIN_RATIO", "1.0")?;
    if min_ratio < 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VIRALENS_MIN_RATIO".to_string(),
            reason: "threshold must be non-negative".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        youtube_api_key,
        gemini_api_key,
        http_timeout_secs,
        key_path,
        min_ratio,
    })
}

/// `~/.config/viralens/youtube_api_key`, or a working-directory file when
/// no home directory is visible.
fn default_key_path<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    match lookup("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".config")
            .join("viralens")
            .join("youtube_api_key"),
        Err(_) => PathBuf::from("youtube_api_key"),
    }
}
