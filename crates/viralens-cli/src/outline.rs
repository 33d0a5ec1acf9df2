//! `outline` subcommand: one keyword plus a context title into a script
//! blueprint.

use anyhow::Context;
use viralens_core::AppConfig;
use viralens_gemini::{generate_script_outline, GeminiClient};

pub(crate) async fn run_outline(
    config: &AppConfig,
    keyword: &str,
    context_title: &str,
) -> anyhow::Result<()> {
    let gemini_key = config
        .gemini_api_key
        .as_deref()
        .context("GEMINI_API_KEY is not set; outlines need the generative service")?;
    let gemini = GeminiClient::new(gemini_key, config.http_timeout_secs)
        .map_err(|reason| anyhow::anyhow!(reason))?;

    let outline = generate_script_outline(&gemini, keyword, context_title).await?;

    println!("{}", outline.title);
    println!("{}", "=".repeat(outline.title.chars().count()));
    for (index, section) in outline.sections.iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, section.heading);
        println!("   {}", section.content);
    }
    Ok(())
}
