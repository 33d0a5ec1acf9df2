//! `key` subcommand: the one piece of persisted state.

use viralens_core::{AppConfig, FileKeyStore, KeyStore};

pub(crate) fn run_key_set(config: &AppConfig, value: &str) -> anyhow::Result<()> {
    let store = FileKeyStore::new(&config.key_path);
    store.save(value)?;
    println!("stored YouTube API key at {}", store.path().display());
    Ok(())
}

pub(crate) fn run_key_show(config: &AppConfig) -> anyhow::Result<()> {
    let store = FileKeyStore::new(&config.key_path);
    match store.load()? {
        Some(key) => println!("{} ({})", mask(&key), store.path().display()),
        None => println!(
            "no key stored at {}; run `viralens key set <key>`",
            store.path().display()
        ),
    }
    Ok(())
}

/// First few characters only; the full key never hits the terminal.
fn mask(key: &str) -> String {
    let visible: String = key.chars().take(6).collect();
    format!("{visible}\u{2026}")
}

/// Catalog-service key resolution order: environment, then the key store.
pub(crate) fn resolve_youtube_key(config: &AppConfig) -> anyhow::Result<String> {
    if let Some(key) = &config.youtube_api_key {
        return Ok(key.clone());
    }
    FileKeyStore::new(&config.key_path)
        .load()?
        .ok_or_else(|| {
            anyhow::anyhow!("no YouTube API key; set YOUTUBE_API_KEY or run `viralens key set <key>`")
        })
}
