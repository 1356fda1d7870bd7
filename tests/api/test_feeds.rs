use crate::helpers::{get, test_router, Catalog};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;

fn catalog_with_global_videos(count: i64) -> Catalog {
    let mut catalog = Catalog::default().with_account(1, "uploader");
    for id in 1..=count {
        catalog = catalog.with_video(id, 1);
    }
    catalog
}

#[tokio::test]
async fn atom_extension_yields_an_atom_feed() {
    let router = test_router(catalog_with_global_videos(3));

    let response = get(&router, "/feeds/videos.atom").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type(), "application/atom+xml");
    assert!(response.body.contains("<feed"));
    assert_eq!(response.body.matches("<entry>").count(), 3);
}

#[tokio::test]
async fn listing_is_capped_at_ten_newest_first() {
    let router = test_router(catalog_with_global_videos(12));

    let response = get(&router, "/feeds/videos.atom").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.matches("<entry>").count(), 10);
    // Higher ids publish later; the newest video must come first and the two
    // oldest must be cut off.
    let first_entry = response.body.find("videos/watch/12").unwrap();
    let later_entry = response.body.find("videos/watch/3").unwrap();
    assert!(first_entry < later_entry);
    assert!(!response.body.contains("videos/watch/1\""));
    assert!(!response.body.contains("videos/watch/2</id>"));
}

#[tokio::test]
async fn xml_extension_defaults_to_rss() {
    let router = test_router(catalog_with_global_videos(2));

    let response = get(&router, "/feeds/videos.xml").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type(), "application/rss+xml");
    assert!(response.body.contains("<rss"));
    assert_eq!(response.body.matches("<item>").count(), 2);
}

#[tokio::test]
async fn xml_extension_with_json_query_yields_json_feed() {
    let router = test_router(catalog_with_global_videos(1));

    let response = get(&router, "/feeds/videos.xml?format=json1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type(), "application/json");
    let value = response.json();
    assert_eq!(value["version"], "https://jsonfeed.org/version/1");
}

#[tokio::test]
async fn unambiguous_extension_beats_conflicting_query() {
    let router = test_router(catalog_with_global_videos(1));

    let response = get(&router, "/feeds/videos.atom?format=json1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type(), "application/atom+xml");
    assert!(response.body.contains("<feed"));
}

#[tokio::test]
async fn unknown_account_name_is_a_404_without_a_feed_body() {
    let router = test_router(catalog_with_global_videos(1));

    let response = get(&router, "/feeds/videos.rss?accountName=doesnotexist").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.content_type(), "application/json");
    assert!(!response.body.contains("<rss"));
    assert!(response.json()["message"]
        .as_str()
        .unwrap()
        .contains("not found"));
}

#[tokio::test]
async fn scoped_json_feed_lists_the_accounts_videos_with_attachments() {
    let catalog = Catalog::default()
        .with_account(42, "spacefan")
        .with_account(7, "other")
        .with_video(1, 42)
        .with_video(2, 42)
        .with_video(3, 42)
        .with_video(4, 7);
    let router = test_router(catalog);

    let response = get(&router, "/feeds/videos.json?accountId=42").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type(), "application/json");
    let value = response.json();
    let items = value["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for item in items {
        assert_eq!(
            item["author"]["url"],
            "https://tube.example.com/accounts/spacefan"
        );
        let attachments = item["attachments"].as_array().unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0]["mime_type"], "video/mp4");
        assert!(item["image"]
            .as_str()
            .unwrap()
            .starts_with("https://tube.example.com/static/thumbnails/"));
    }
}

#[tokio::test]
async fn account_id_wins_over_account_name() {
    let catalog = Catalog::default()
        .with_account(42, "spacefan")
        .with_account(7, "other")
        .with_video(1, 42)
        .with_video(2, 7);
    let router = test_router(catalog);

    let response = get(&router, "/feeds/videos.json?accountId=42&accountName=other").await;

    assert_eq!(response.status, StatusCode::OK);
    let value = response.json();
    let items = value["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0]["author"]["url"],
        "https://tube.example.com/accounts/spacefan"
    );
}

#[tokio::test]
async fn malformed_format_token_is_a_400_naming_the_field() {
    let router = test_router(catalog_with_global_videos(1));

    let response = get(&router, "/feeds/videos.xml?format=yaml").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["message"].as_str().unwrap().contains("format"));
}

#[tokio::test]
async fn malformed_account_id_is_a_400_naming_the_field() {
    let router = test_router(catalog_with_global_videos(1));

    let response = get(&router, "/feeds/videos.xml?accountId=not-an-id").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["message"]
        .as_str()
        .unwrap()
        .contains("accountId"));
}

#[tokio::test]
async fn unknown_extension_is_a_routing_miss() {
    let router = test_router(catalog_with_global_videos(1));

    let response = get(&router, "/feeds/videos.yaml").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repeated_requests_yield_byte_identical_bodies() {
    let router = test_router(catalog_with_global_videos(5));

    for uri in [
        "/feeds/videos.xml",
        "/feeds/videos.atom",
        "/feeds/videos.json",
    ] {
        let first = get(&router, uri).await;
        let second = get(&router, uri).await;
        assert_eq!(first.body, second.body, "{} should be idempotent", uri);
    }
}

#[tokio::test]
async fn local_filter_is_accepted_and_unknown_filter_rejected() {
    let router = test_router(catalog_with_global_videos(2));

    let ok = get(&router, "/feeds/videos.xml?filter=local").await;
    assert_eq!(ok.status, StatusCode::OK);

    let bad = get(&router, "/feeds/videos.xml?filter=remote").await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert!(bad.json()["message"].as_str().unwrap().contains("filter"));
}

#[tokio::test]
async fn caller_supplied_pagination_is_ignored() {
    let router = test_router(catalog_with_global_videos(12));

    let plain = get(&router, "/feeds/videos.xml").await;
    let paged = get(&router, "/feeds/videos.xml?start=5&count=2").await;

    assert_eq!(paged.status, StatusCode::OK);
    assert_eq!(plain.body, paged.body);
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let router = test_router(catalog_with_global_videos(1));

    let response = get(&router, "/feeds/videos.xml").await;

    assert!(response.headers.contains_key("x-request-id"));
}
