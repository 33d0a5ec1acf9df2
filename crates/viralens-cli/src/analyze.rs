//! `analyze` subcommand: statistics snapshot → comment thread → narrative
//! analysis, printed as a report.

use anyhow::Context;
use viralens_core::AppConfig;
use viralens_gemini::{analyze_content, GeminiClient};
use viralens_youtube::{lookup_item, YoutubeClient};

use crate::key::resolve_youtube_key;

pub(crate) async fn run_analyze(config: &AppConfig, video_id: &str) -> anyhow::Result<()> {
    let youtube_key = resolve_youtube_key(config)?;
    let gemini_key = config
        .gemini_api_key
        .as_deref()
        .context("GEMINI_API_KEY is not set; analysis needs the generative service")?;

    let youtube = YoutubeClient::new(&youtube_key, config.http_timeout_secs)?;
    let gemini = GeminiClient::new(gemini_key, config.http_timeout_secs)
        .map_err(|reason| anyhow::anyhow!(reason))?;

    let item = lookup_item(&youtube, video_id)
        .await?
        .with_context(|| format!("video '{video_id}' not found"))?;

    let comments = youtube.comment_threads(video_id).await?;
    tracing::info!(video = video_id, comments = comments.len(), "comments fetched");

    let result = analyze_content(&gemini, &item, &comments).await?;

    println!("analysis for '{}' ({})", item.title, item.channel_title);
    println!();
    println!("summary:");
    println!("  {}", result.summary);
    println!();
    println!("audience sentiment: {}", result.audience_sentiment);

    if !result.common_questions.is_empty() {
        println!();
        println!("common questions:");
        for question in &result.common_questions {
            println!("  - {question}");
        }
    }

    println!();
    println!("top keywords:");
    for (index, keyword) in result.top_keywords.iter().enumerate() {
        println!("  {}. {keyword}", index + 1);
    }

    println!();
    println!("suggested topics:");
    for topic in &result.suggested_topics {
        println!("  {}", topic.title);
        println!("    why:  {}", topic.reasoning);
        println!("    hook: {}", topic.hook_idea);
    }

    println!();
    println!(
        "expand a keyword with: viralens outline \"<keyword>\" --context \"{}\"",
        item.title
    );
    Ok(())
}
