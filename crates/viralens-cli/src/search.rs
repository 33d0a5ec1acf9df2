//! `search` subcommand: run the catalog pipeline, apply the viral-ratio
//! threshold, and render the listing plus an efficiency summary.

use viralens_core::{
    filter_by_ratio, format_count, rank_by_ratio, viral_tier, AppConfig, CatalogItem,
    DurationBucket,
};
use viralens_youtube::{search_catalog, YoutubeClient};

use crate::key::resolve_youtube_key;

/// Widest bar in the efficiency summary.
const BAR_WIDTH: f64 = 40.0;
/// Ratios at or above this render a full-width bar.
const BAR_CEILING: f64 = 10.0;

pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    duration: DurationBucket,
    min_ratio: Option<f64>,
) -> anyhow::Result<()> {
    let api_key = resolve_youtube_key(config)?;
    let client = YoutubeClient::new(&api_key, config.http_timeout_secs)?;

    let items = search_catalog(&client, query, duration).await?;
    if items.is_empty() {
        println!("no videos found for '{query}' ({duration} duration)");
        return Ok(());
    }

    let threshold = min_ratio.unwrap_or(config.min_ratio);
    let kept = filter_by_ratio(&items, threshold);
    if kept.is_empty() {
        println!(
            "none of the {} results met the {threshold:.1}x viral-ratio threshold; try lowering it",
            items.len()
        );
        return Ok(());
    }

    print_listing(&kept);
    println!();
    print_efficiency_chart(&kept);
    Ok(())
}

fn print_listing(items: &[CatalogItem]) {
    println!(
        "{:<14}{:<44}{:<22}{:>8}{:>8}{:>8}  TIER",
        "VIDEO", "TITLE", "CHANNEL", "VIEWS", "SUBS", "RATIO"
    );
    for item in items {
        println!("{}", listing_row(item));
    }
}

fn listing_row(item: &CatalogItem) -> String {
    let ratio = item.performance_ratio.unwrap_or(0.0);
    let views = item.statistics.map_or(0, |s| s.view_count);
    let subs = item.channel_statistics.map_or(0, |s| s.subscriber_count);
    format!(
        "{:<14}{:<44}{:<22}{:>8}{:>8}{:>8.1}  {}",
        item.id,
        clip(&item.title, 42),
        clip(&item.channel_title, 20),
        format_count(views),
        format_count(subs),
        ratio,
        viral_tier(ratio)
    )
}

/// Descending-ratio bars over a sorted copy; the listing above keeps the
/// catalog order.
fn print_efficiency_chart(items: &[CatalogItem]) {
    println!("viral efficiency (views per subscriber):");
    for item in rank_by_ratio(items) {
        let ratio = item.performance_ratio.unwrap_or(0.0);
        println!(
            "{:>8}  {:<7.1} {}",
            chart_label(&item.channel_title),
            ratio,
            bar(ratio)
        );
    }
}

/// Channel label for the chart axis, shortened past 8 characters.
fn chart_label(channel_title: &str) -> String {
    if channel_title.chars().count() > 8 {
        let head: String = channel_title.chars().take(6).collect();
        format!("{head}..")
    } else {
        channel_title.to_string()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(ratio: f64) -> String {
    let filled = (ratio.min(BAR_CEILING) / BAR_CEILING * BAR_WIDTH).round() as usize;
    "#".repeat(filled.max(1))
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 1).collect();
        format!("{head}\u{2026}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use viralens_core::{ChannelStatistics, VideoStatistics};

    use super::*;

    #[test]
    fn listing_row_renders_compact_counts_and_tier() {
        let item = CatalogItem {
            id: "v1".to_string(),
            title: "I Tried Every Air Fryer".to_string(),
            description: String::new(),
            thumbnail: String::new(),
            channel_id: "c1".to_string(),
            channel_title: "Kitchen Lab".to_string(),
            published_at: "2026-05-01T12:00:00Z".parse().unwrap(),
            statistics: Some(VideoStatistics {
                view_count: 1_234_567,
                like_count: 0,
                comment_count: 0,
            }),
            channel_statistics: Some(ChannelStatistics {
                subscriber_count: 45_600,
            }),
            performance_ratio: Some(27.1),
        };

        let row = listing_row(&item);
        assert!(row.contains("1.2M"), "row: {row}");
        assert!(row.contains("45.6K"), "row: {row}");
        assert!(row.ends_with("Mega Viral"), "row: {row}");
    }

    #[test]
    fn chart_label_shortens_long_channel_names() {
        assert_eq!(chart_label("Kitchen Laboratory"), "Kitche..");
        assert_eq!(chart_label("KL"), "KL");
        assert_eq!(chart_label("Exactly8"), "Exactly8");
    }

    #[test]
    fn bar_scales_and_caps_at_the_ceiling() {
        assert_eq!(bar(10.0).len(), 40);
        assert_eq!(bar(250.0).len(), 40);
        assert_eq!(bar(5.0).len(), 20);
        // Tiny but surviving ratios still render something visible.
        assert_eq!(bar(0.0).len(), 1);
    }

    #[test]
    fn clip_appends_ellipsis_past_the_limit() {
        assert_eq!(clip("abcdef", 6), "abcdef");
        assert_eq!(clip("abcdefg", 6), "abcde\u{2026}");
    }
}
