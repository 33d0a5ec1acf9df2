//! Domain records produced by the catalog pipeline and the analysis calls.
//!
//! All types are value-like: constructed once by a pipeline stage, consumed
//! by the next stage or the display layer, never mutated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse video-length filter passed to the catalog search.
///
/// The remote API defines `short` as under 4 minutes, `medium` as 4–20
/// minutes, and `long` as over 20 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationBucket {
    #[default]
    Any,
    Short,
    Medium,
    Long,
}

impl DurationBucket {
    /// The value sent as the `videoDuration` request parameter.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            DurationBucket::Any => "any",
            DurationBucket::Short => "short",
            DurationBucket::Medium => "medium",
            DurationBucket::Long => "long",
        }
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_param())
    }
}

impl std::str::FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(DurationBucket::Any),
            "short" => Ok(DurationBucket::Short),
            "medium" => Ok(DurationBucket::Medium),
            "long" => Ok(DurationBucket::Long),
            other => Err(format!(
                "unknown duration '{other}' (expected any, short, medium, or long)"
            )),
        }
    }
}

/// Per-video counters from the catalog item-statistics call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VideoStatistics {
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

/// Per-channel counters from the catalog channel-statistics call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChannelStatistics {
    pub subscriber_count: u64,
}

/// One video record joined with its channel's subscriber count and the
/// derived view-to-subscriber ratio.
///
/// `performance_ratio`, when present, equals `view_count` divided by the
/// subscriber count floored at 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub statistics: Option<VideoStatistics>,
    pub channel_statistics: Option<ChannelStatistics>,
    pub performance_ratio: Option<f64>,
}

/// A top-level comment fetched for one video ahead of analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementComment {
    pub text: String,
    pub author: String,
    pub like_count: u64,
}

/// A single video idea inside an [`AnalysisResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedTopic {
    pub title: String,
    pub reasoning: String,
    pub hook_idea: String,
}

/// The structured audience report returned by the generative analysis call.
///
/// Cardinality is part of the remote contract: exactly 5 keywords, exactly
/// 3 suggested topics, at most 3 questions. Deviations are rejected by the
/// requester rather than repaired locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub common_questions: Vec<String>,
    pub audience_sentiment: String,
    pub top_keywords: Vec<String>,
    pub suggested_topics: Vec<SuggestedTopic>,
}

/// One section of a generated script outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineSection {
    pub heading: String,
    pub content: String,
}

/// A script blueprint generated from one keyword plus a context title.
/// The remote contract calls for 4–5 sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptOutline {
    pub title: String,
    pub sections: Vec<OutlineSection>,
}

/// Display label for a viral-ratio band, matching the card badges of the
/// research UI: >10 "Mega Viral", >3 "Breakout", >1 "Healthy", else
/// "Baseline".
#[must_use]
pub fn viral_tier(ratio: f64) -> &'static str {
    if ratio > 10.0 {
        "Mega Viral"
    } else if ratio > 3.0 {
        "Breakout"
    } else if ratio > 1.0 {
        "Healthy"
    } else {
        "Baseline"
    }
}

/// Compact counter formatting for listings: `1_234_567` → `"1.2M"`,
/// `45_600` → `"45.6K"`, small values printed as-is.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}
