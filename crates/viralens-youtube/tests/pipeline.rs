//! Integration tests for the catalog query pipeline using wiremock HTTP mocks.

use viralens_core::{filter_by_ratio, DurationBucket};
use viralens_youtube::{search_catalog, YoutubeClient, YoutubeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn search_body(ids: &[&str]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({ "id": { "videoId": id } }))
        .collect();
    serde_json::json!({ "items": items })
}

fn video_body(entries: &[(&str, &str, u64)]) -> serde_json::Value {
    // (video id, channel id, view count)
    let items: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, channel, views)| {
            serde_json::json!({
                "id": id,
                "snippet": {
                    "title": format!("video {id}"),
                    "description": "a test video",
                    "channelId": channel,
                    "channelTitle": format!("channel {channel}"),
                    "publishedAt": "2026-05-01T12:00:00Z",
                    "thumbnails": {
                        "high": { "url": format!("https://i.ytimg.com/{id}.jpg") }
                    }
                },
                "statistics": {
                    "viewCount": views.to_string(),
                    "likeCount": "10",
                    "commentCount": "3"
                }
            })
        })
        .collect();
    serde_json::json!({ "items": items })
}

fn channel_body(entries: &[(&str, u64)]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, subs)| {
            serde_json::json!({
                "id": id,
                "statistics": { "subscriberCount": subs.to_string() }
            })
        })
        .collect();
    serde_json::json!({ "items": items })
}

async fn mount_chain(
    server: &MockServer,
    search: serde_json::Value,
    videos: serde_json::Value,
    channels: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&videos))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&channels))
        .mount(server)
        .await;
}

#[tokio::test]
async fn cooking_shorts_scenario_joins_ratios_and_filters() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        search_body(&["v1", "v2"]),
        video_body(&[("v1", "c1", 50_000), ("v2", "c2", 200)]),
        channel_body(&[("c1", 1_000), ("c2", 500)]),
    )
    .await;

    let client = test_client(&server.uri());
    let items = search_catalog(&client, "cooking shorts", DurationBucket::Short)
        .await
        .expect("pipeline should succeed");

    assert_eq!(items.len(), 2);
    assert!((items[0].performance_ratio.unwrap() - 50.0).abs() < f64::EPSILON);
    assert!((items[1].performance_ratio.unwrap() - 0.4).abs() < f64::EPSILON);

    let filtered = filter_by_ratio(&items, 1.0);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "v1");
}

#[tokio::test]
async fn search_request_carries_fixed_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "tech review"))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "25"))
        .and(query_param("videoDuration", "long"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_body(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = search_catalog(&client, "tech review", DurationBucket::Long)
        .await
        .expect("empty result set is not an error");
    assert!(items.is_empty());
}

#[tokio::test]
async fn empty_credential_fails_before_any_network_call() {
    let server = MockServer::start().await;

    let client = YoutubeClient::with_base_url("", 30, &server.uri()).unwrap();
    let result = search_catalog(&client, "cooking shorts", DurationBucket::Any).await;

    assert!(matches!(result, Err(YoutubeError::MissingCredential)));
    let requests = server.received_requests().await.unwrap();
    assert!(
        requests.is_empty(),
        "expected zero outbound calls, saw {}",
        requests.len()
    );
}

#[tokio::test]
async fn zero_search_results_yield_empty_sequence_and_stop_the_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_body(&[])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = search_catalog(&client, "ultra niche", DurationBucket::Medium)
        .await
        .expect("empty search is not an error");
    assert!(items.is_empty());

    // Only the search call went out; steps 2 and 3 never ran.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn missing_channel_entry_floors_subscriber_denominator() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        search_body(&["v1", "v2"]),
        video_body(&[("v1", "c1", 300), ("v2", "c-unknown", 300)]),
        channel_body(&[("c1", 100)]),
    )
    .await;

    let client = test_client(&server.uri());
    let items = search_catalog(&client, "niche", DurationBucket::Any)
        .await
        .unwrap();

    assert!((items[0].performance_ratio.unwrap() - 3.0).abs() < f64::EPSILON);
    assert!(items[0].channel_statistics.is_some());

    // No channel record: ratio still defined, denominator floored at 1.
    assert!((items[1].performance_ratio.unwrap() - 300.0).abs() < f64::EPSILON);
    assert!(items[1].channel_statistics.is_none());
}

#[tokio::test]
async fn zero_subscriber_channel_keeps_statistics_but_floors_ratio() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        search_body(&["v1"]),
        video_body(&[("v1", "c1", 42)]),
        channel_body(&[("c1", 0)]),
    )
    .await;

    let client = test_client(&server.uri());
    let items = search_catalog(&client, "brand new channel", DurationBucket::Any)
        .await
        .unwrap();

    assert_eq!(items[0].channel_statistics.unwrap().subscriber_count, 0);
    assert!((items[0].performance_ratio.unwrap() - 42.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn batched_calls_join_ids_with_commas_and_dedupe_channels() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_body(&["v1", "v2", "v3"])))
        .mount(&server)
        .await;
    // Two of the three videos share a channel; the channel batch must carry
    // each id once.
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "v1,v2,v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&video_body(&[
            ("v1", "c1", 10),
            ("v2", "c1", 20),
            ("v3", "c2", 30),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", "c1,c2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&channel_body(&[("c1", 5), ("c2", 5)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = search_catalog(&client, "niche", DurationBucket::Any)
        .await
        .unwrap();

    // Step-2 order preserved, no re-sort.
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["v1", "v2", "v3"]);
}

#[tokio::test]
async fn service_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 403,
            "message": "The request is missing a valid API key."
        }
    });
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = search_catalog(&client, "anything", DurationBucket::Any).await;

    match result {
        Err(YoutubeError::Service(message)) => {
            assert_eq!(message, "The request is missing a valid API key.");
        }
        other => panic!("expected Service error, got: {other:?}"),
    }
}

#[tokio::test]
async fn unusable_payload_shape_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&search_body(&["v1"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&serde_json::json!({ "items": "nope" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = search_catalog(&client, "anything", DurationBucket::Any).await;
    assert!(matches!(result, Err(YoutubeError::Malformed { .. })));
}

#[tokio::test]
async fn comment_threads_map_to_engagement_comments() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "textDisplay": "Loved the pacing!",
                            "authorDisplayName": "viewer-one",
                            "likeCount": 12
                        }
                    }
                }
            },
            {
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "textDisplay": "What camera do you use?",
                            "authorDisplayName": "viewer-two",
                            "likeCount": 4
                        }
                    }
                }
            }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", "v1"))
        .and(query_param("maxResults", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let comments = client.comment_threads("v1").await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "Loved the pacing!");
    assert_eq!(comments[0].author, "viewer-one");
    assert_eq!(comments[0].like_count, 12);
}

#[tokio::test]
async fn comment_fetch_without_credential_makes_no_calls() {
    let server = MockServer::start().await;
    let client = YoutubeClient::with_base_url("", 30, &server.uri()).unwrap();

    let result = client.comment_threads("v1").await;
    assert!(matches!(result, Err(YoutubeError::MissingCredential)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
