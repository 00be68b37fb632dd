mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{init_logging, RecordingSink};
use feed_core::{CatalogKey, MediaRef, Page};
use feed_engine::{
    CatalogClient, CatalogSettings, FailureKind, FeedSession, FeedSettings, ReqwestCatalogClient,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"{"message":{"W":[],"X":[],"Y":["sub"]},"status":"success"}"#;

fn client_for(server: &MockServer) -> ReqwestCatalogClient {
    ReqwestCatalogClient::new(CatalogSettings {
        base_url: server.uri(),
        ..CatalogSettings::default()
    })
    .expect("client")
}

async fn mount_json(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_owned(), "application/json"))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(
            r#"{"status":"error","message":"Breed not found"}"#,
            "application/json",
        ))
        .mount(server)
        .await;
}

fn key_names(keys: Vec<CatalogKey>) -> Vec<String> {
    keys.into_iter().map(|key| key.to_string()).collect()
}

#[tokio::test]
async fn listing_returns_keys_in_response_order() {
    init_logging();
    let server = MockServer::start().await;
    mount_json(&server, "/breeds/list/all", LISTING).await;

    let client = client_for(&server);
    assert_eq!(key_names(client.list_keys().await), vec!["W", "X", "Y"]);
}

#[tokio::test]
async fn listing_failure_degrades_to_empty() {
    init_logging();
    let server = MockServer::start().await;
    mount_status(&server, "/breeds/list/all", 503).await;

    let client = client_for(&server);
    let err = client.try_list_keys().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert!(client.list_keys().await.is_empty());
}

#[tokio::test]
async fn malformed_listing_degrades_to_empty() {
    init_logging();
    let server = MockServer::start().await;
    mount_json(&server, "/breeds/list/all", "<html>maintenance</html>").await;

    let client = client_for(&server);
    let err = client.try_list_keys().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(client.list_keys().await.is_empty());
}

#[tokio::test]
async fn media_resolution_returns_all_or_first() {
    init_logging();
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/breed/W/images",
        r#"{"message":["https://img/w1.jpg","https://img/w2.jpg"],"status":"success"}"#,
    )
    .await;

    let client = client_for(&server);
    let key = CatalogKey::new("W");
    assert_eq!(
        client.resolve_media(&key).await,
        vec![
            MediaRef::new("https://img/w1.jpg"),
            MediaRef::new("https://img/w2.jpg"),
        ]
    );
    assert_eq!(
        client.resolve_first_media(&key).await,
        MediaRef::new("https://img/w1.jpg")
    );
}

#[tokio::test]
async fn missing_media_resolves_to_placeholder() {
    init_logging();
    let server = MockServer::start().await;
    mount_status(&server, "/breed/X/images", 404).await;
    mount_json(&server, "/breed/Z/images", r#"{"message":[],"status":"success"}"#).await;

    let client = client_for(&server);
    assert_eq!(
        client.resolve_first_media(&CatalogKey::new("X")).await,
        MediaRef::placeholder()
    );
    assert_eq!(
        client.resolve_first_media(&CatalogKey::new("Z")).await,
        MediaRef::placeholder()
    );
}

#[tokio::test]
async fn transport_errors_degrade_to_empty() {
    init_logging();
    let client = ReqwestCatalogClient::new(CatalogSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        ..CatalogSettings::default()
    })
    .unwrap();

    assert!(client.try_list_keys().await.is_err());
    assert!(client.list_keys().await.is_empty());
    assert!(client.resolve_media(&CatalogKey::new("W")).await.is_empty());
}

#[tokio::test]
async fn slow_response_times_out() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/breeds/list/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(LISTING, "application/json"),
        )
        .mount(&server)
        .await;

    let client = ReqwestCatalogClient::new(CatalogSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..CatalogSettings::default()
    })
    .unwrap();

    let err = client.try_list_keys().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    init_logging();
    let server = MockServer::start().await;
    mount_json(&server, "/breeds/list/all", LISTING).await;

    let client = ReqwestCatalogClient::new(CatalogSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..CatalogSettings::default()
    })
    .unwrap();

    let err = client.try_list_keys().await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 10, .. }
    ));
}

#[tokio::test]
async fn failed_media_in_a_batch_renders_placeholder_and_continues() {
    init_logging();
    let server = MockServer::start().await;
    mount_json(&server, "/breeds/list/all", LISTING).await;
    mount_json(
        &server,
        "/breed/W/images",
        r#"{"message":["https://img/w.jpg"],"status":"success"}"#,
    )
    .await;
    mount_status(&server, "/breed/X/images", 500).await;
    mount_json(
        &server,
        "/breed/Y/images",
        r#"{"message":["https://img/y.jpg"],"status":"success"}"#,
    )
    .await;

    let sink = Arc::new(RecordingSink::default());
    let session = Arc::new(FeedSession::new(
        Arc::new(client_for(&server)),
        sink.clone(),
        FeedSettings::default(),
    ));

    let report = session.start(&Page::Index).await.unwrap();

    assert_eq!(
        sink.rendered(),
        vec![
            ("W".to_string(), MediaRef::new("https://img/w.jpg")),
            ("X".to_string(), MediaRef::placeholder()),
            ("Y".to_string(), MediaRef::new("https://img/y.jpg")),
        ]
    );
    assert_eq!(report.fetched, 3);
    assert_eq!(report.placeholders, 1);
    assert!(session.queue().is_empty());
}
