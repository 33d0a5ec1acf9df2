//! Outline expander.
//!
//! Expands one previously extracted keyword into a structured script
//! outline, using the origin video's title as context. Each call is
//! independent; outlines are never cached.

use viralens_core::ScriptOutline;

use crate::client::GeminiClient;
use crate::error::InsightError;

const MIN_SECTIONS: usize = 4;
const MAX_SECTIONS: usize = 5;

/// Request a script outline for `keyword`, framed for the audience of the
/// video titled `context_title`.
///
/// # Errors
///
/// Returns [`InsightError::OutlineFailed`] if `keyword` is empty, the
/// remote call errors, the body is empty or unparseable, or the outline
/// does not carry 4–5 sections.
pub async fn generate_script_outline(
    client: &GeminiClient,
    keyword: &str,
    context_title: &str,
) -> Result<ScriptOutline, InsightError> {
    if keyword.trim().is_empty() {
        return Err(InsightError::OutlineFailed(
            "keyword must not be empty".to_string(),
        ));
    }

    let prompt = build_prompt(keyword, context_title);
    let value = client
        .generate_json(&prompt, outline_schema())
        .await
        .map_err(InsightError::OutlineFailed)?;

    let outline: ScriptOutline = serde_json::from_value(value)
        .map_err(|e| InsightError::OutlineFailed(format!("schema violation: {e}")))?;
    validate(&outline).map_err(InsightError::OutlineFailed)?;

    tracing::info!(keyword, sections = outline.sections.len(), "outline generated");
    Ok(outline)
}

fn build_prompt(keyword: &str, context_title: &str) -> String {
    format!(
        "Create a highly engaging YouTube Script Outline (Table of Contents) based on the keyword: \"{keyword}\".\n\
         Context: The audience of a video titled \"{context_title}\" is specifically interested in this keyword.\n\
         \n\
         The outline should be practical and ready for filming.\n\
         Provide a Title and 4-5 Sections (e.g., Intro, Core Problem, Solution, Advanced Tip, Conclusion/CTA)."
    )
}

fn outline_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "heading": { "type": "STRING" },
                        "content": { "type": "STRING" }
                    },
                    "required": ["heading", "content"]
                }
            }
        },
        "required": ["title", "sections"]
    })
}

fn validate(outline: &ScriptOutline) -> Result<(), String> {
    let count = outline.sections.len();
    if !(MIN_SECTIONS..=MAX_SECTIONS).contains(&count) {
        return Err(format!(
            "schema violation: expected {MIN_SECTIONS}-{MAX_SECTIONS} sections, got {count}"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use viralens_core::OutlineSection;

    use super::*;

    fn outline_with_sections(count: usize) -> ScriptOutline {
        ScriptOutline {
            title: "t".to_string(),
            sections: (0..count)
                .map(|i| OutlineSection {
                    heading: format!("h{i}"),
                    content: "c".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn validate_accepts_four_and_five_sections() {
        assert!(validate(&outline_with_sections(4)).is_ok());
        assert!(validate(&outline_with_sections(5)).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_section_counts() {
        assert!(validate(&outline_with_sections(3)).is_err());
        assert!(validate(&outline_with_sections(6)).is_err());
        assert!(validate(&outline_with_sections(0)).is_err());
    }

    #[test]
    fn prompt_carries_keyword_and_context() {
        let prompt = build_prompt("air fryer", "10 Kitchen Mistakes");
        assert!(prompt.contains("\"air fryer\""));
        assert!(prompt.contains("\"10 Kitchen Mistakes\""));
    }
}
