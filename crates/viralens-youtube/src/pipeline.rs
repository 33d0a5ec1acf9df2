//! Catalog query composition.
//!
//! Turns (query text, duration bucket) into joined [`CatalogItem`] records
//! through the three-step remote chain:
//!
//! 1. `search` — up to 25 candidate video ids for the query.
//! 2. `videos` — one batched call for counters and snippet metadata.
//! 3. `channels` — one batched call for the distinct referenced channels'
//!    subscriber counts.
//!
//! Each step depends on the previous step's output; nothing runs in
//! parallel and nothing is retried. Output order is the step-2 order —
//! ranking is the caller's concern.

use std::collections::HashMap;

use viralens_core::{
    performance_ratio, CatalogItem, ChannelStatistics, DurationBucket, VideoStatistics,
};

use crate::client::YoutubeClient;
use crate::error::YoutubeError;
use crate::types::{parse_count, VideoItem};

/// Run the full catalog query for one search.
///
/// Zero search hits yield an empty vector, not an error. Items whose
/// channel is missing from the step-3 response still get a defined ratio
/// via the subscriber floor of 1.
///
/// # Errors
///
/// - [`YoutubeError::MissingCredential`] before any network call when the
///   client has no API key.
/// - [`YoutubeError::Service`], [`YoutubeError::Http`], or
///   [`YoutubeError::Malformed`] from whichever step fails; the chain
///   stops there and no partial list is returned.
pub async fn search_catalog(
    client: &YoutubeClient,
    query: &str,
    duration: DurationBucket,
) -> Result<Vec<CatalogItem>, YoutubeError> {
    let video_ids = client.search(query, duration).await?;
    if video_ids.is_empty() {
        tracing::info!(query, "search returned no candidates");
        return Ok(Vec::new());
    }

    let videos = client.video_stats(&video_ids).await?;
    if videos.is_empty() {
        return Ok(Vec::new());
    }

    // Distinct channel ids, first-seen order.
    let mut channel_ids: Vec<String> = Vec::new();
    for video in &videos {
        if !channel_ids.contains(&video.snippet.channel_id) {
            channel_ids.push(video.snippet.channel_id.clone());
        }
    }

    let channels = client.channel_stats(&channel_ids).await?;
    let subscribers_by_channel: HashMap<String, u64> = channels
        .into_iter()
        .map(|channel| {
            let subs = channel
                .statistics
                .as_ref()
                .map_or(0, |s| parse_count(s.subscriber_count.as_ref()));
            (channel.id, subs)
        })
        .collect();

    tracing::info!(
        query,
        videos = videos.len(),
        channels = subscribers_by_channel.len(),
        "catalog query joined"
    );

    Ok(videos
        .into_iter()
        .map(|video| join_item(video, &subscribers_by_channel))
        .collect())
}

/// Fetch a single video's statistics snapshot and join it with its
/// channel's subscriber count, for analysis driven from a known id.
///
/// Returns `None` when the id matches nothing.
///
/// # Errors
///
/// Same failure modes as [`search_catalog`].
pub async fn lookup_item(
    client: &YoutubeClient,
    video_id: &str,
) -> Result<Option<CatalogItem>, YoutubeError> {
    let videos = client.video_stats(&[video_id.to_string()]).await?;
    let Some(video) = videos.into_iter().next() else {
        return Ok(None);
    };

    let channels = client
        .channel_stats(&[video.snippet.channel_id.clone()])
        .await?;
    let subscribers_by_channel: HashMap<String, u64> = channels
        .into_iter()
        .map(|channel| {
            let subs = channel
                .statistics
                .as_ref()
                .map_or(0, |s| parse_count(s.subscriber_count.as_ref()));
            (channel.id, subs)
        })
        .collect();

    Ok(Some(join_item(video, &subscribers_by_channel)))
}

/// Attach channel statistics and the derived ratio to one step-2 record.
///
/// A missing channel entry leaves `channel_statistics` unset but still
/// produces a ratio, with the denominator floored at 1.
fn join_item(video: VideoItem, subscribers_by_channel: &HashMap<String, u64>) -> CatalogItem {
    let statistics = video.statistics.as_ref().map(|counters| VideoStatistics {
        view_count: parse_count(counters.view_count.as_ref()),
        like_count: parse_count(counters.like_count.as_ref()),
        comment_count: parse_count(counters.comment_count.as_ref()),
    });

    let subscriber_count = subscribers_by_channel
        .get(&video.snippet.channel_id)
        .copied();
    let view_count = statistics.map_or(0, |s| s.view_count);
    let ratio = performance_ratio(view_count, subscriber_count.unwrap_or(0));

    CatalogItem {
        id: video.id,
        title: video.snippet.title,
        description: video.snippet.description,
        thumbnail: video.snippet.thumbnails.best_url(),
        channel_id: video.snippet.channel_id,
        channel_title: video.snippet.channel_title,
        published_at: video.snippet.published_at,
        statistics,
        channel_statistics: subscriber_count.map(|subscriber_count| ChannelStatistics {
            subscriber_count,
        }),
        performance_ratio: Some(ratio),
    }
}
