//! Narrative analysis requester.
//!
//! One schema-constrained generation call per invocation, producing an
//! [`AnalysisResult`] from a catalog item's descriptive text and its
//! fetched comments. The comment block is capped at 6000 characters before
//! it enters the prompt; that bounds request size, it is not a
//! summarization step.

use viralens_core::{AnalysisResult, CatalogItem, EngagementComment};

use crate::client::GeminiClient;
use crate::error::InsightError;

/// Hard cap on the assembled comment block, in characters.
const COMMENT_BLOCK_LIMIT: usize = 6000;

const EXPECTED_KEYWORDS: usize = 5;
const EXPECTED_TOPICS: usize = 3;
const MAX_QUESTIONS: usize = 3;

/// Request a structured audience analysis for one catalog item.
///
/// Exactly one attempt; nothing is retried and no partial result is
/// returned.
///
/// # Errors
///
/// Returns [`InsightError::AnalysisFailed`] if the remote call errors,
/// returns an empty or unparseable body, or returns JSON that violates the
/// field cardinality contract.
pub async fn analyze_content(
    client: &GeminiClient,
    item: &CatalogItem,
    comments: &[EngagementComment],
) -> Result<AnalysisResult, InsightError> {
    let prompt = build_prompt(&item.title, &item.description, &comment_block(comments));

    let value = client
        .generate_json(&prompt, analysis_schema())
        .await
        .map_err(InsightError::AnalysisFailed)?;

    let result: AnalysisResult = serde_json::from_value(value)
        .map_err(|e| InsightError::AnalysisFailed(format!("schema violation: {e}")))?;
    validate(&result).map_err(InsightError::AnalysisFailed)?;

    tracing::info!(
        video = %item.id,
        keywords = result.top_keywords.len(),
        "analysis completed"
    );
    Ok(result)
}

/// One comment per line, truncated to the first [`COMMENT_BLOCK_LIMIT`]
/// characters.
fn comment_block(comments: &[EngagementComment]) -> String {
    let joined = comments
        .iter()
        .map(|c| format!("- {}", c.text))
        .collect::<Vec<_>>()
        .join("\n");
    truncate_chars(joined, COMMENT_BLOCK_LIMIT)
}

/// Truncate to `limit` Unicode scalar values without splitting a character.
fn truncate_chars(text: String, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text,
    }
}

fn build_prompt(title: &str, description: &str, comments: &str) -> String {
    format!(
        "You are a YouTube Audience Analyst and Content Strategist.\n\
         Analyze the following video data and comments to answer these specific user needs:\n\
         1. How are people reacting? (Overall sentiment and specific vibes)\n\
         2. What are the most frequent keywords/topics mentioned in the comments?\n\
         3. What specific video topics should be created next to satisfy this audience?\n\
         \n\
         Video Title: {title}\n\
         Description: {description}\n\
         \n\
         Comments to Analyze:\n\
         {comments}\n\
         \n\
         Output EXACTLY in JSON format with these fields:\n\
         - summary: A detailed summary of audience reactions (what they liked, what they complained about).\n\
         - commonQuestions: Top 3 actual questions from the comments.\n\
         - audienceSentiment: A specific phrase describing the audience mood.\n\
         - topKeywords: Exactly 5 \"Strong Recommendation\" keywords that represent high-demand topics.\n\
         - suggestedTopics: 3 specific video ideas based on the analysis (title, reasoning, and a hook)."
    )
}

fn analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "commonQuestions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "audienceSentiment": { "type": "STRING" },
            "topKeywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "suggestedTopics": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "reasoning": { "type": "STRING" },
                        "hookIdea": { "type": "STRING" }
                    },
                    "required": ["title", "reasoning", "hookIdea"]
                }
            }
        },
        "required": [
            "summary",
            "commonQuestions",
            "audienceSentiment",
            "topKeywords",
            "suggestedTopics"
        ]
    })
}

/// Enforce the cardinality the schema declares; the remote side is not
/// trusted to have done so.
fn validate(result: &AnalysisResult) -> Result<(), String> {
    if result.top_keywords.len() != EXPECTED_KEYWORDS {
        return Err(format!(
            "schema violation: expected exactly {EXPECTED_KEYWORDS} keywords, got {}",
            result.top_keywords.len()
        ));
    }
    if result.suggested_topics.len() != EXPECTED_TOPICS {
        return Err(format!(
            "schema violation: expected exactly {EXPECTED_TOPICS} suggested topics, got {}",
            result.suggested_topics.len()
        ));
    }
    if result.common_questions.len() > MAX_QUESTIONS {
        return Err(format!(
            "schema violation: expected at most {MAX_QUESTIONS} questions, got {}",
            result.common_questions.len()
        ));
    }
    Ok(())
}
