// End-to-end cycles against the in-crate mock source and a capturing webhook,
// both served over real sockets on ephemeral ports.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{any, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

use news_watcher::detector::{ChangeDetector, Classification};
use news_watcher::domain::NewsItem;
use news_watcher::mock_source::{self, MockSource};
use news_watcher::services::{
    FetchService, NotificationService, SnapshotService, WatchService, WebhookAlertSink,
};
use news_watcher::sources::{CollectionSource, HttpCollectionSource};
use news_watcher::storage::{JsonFileStore, SnapshotStore};

type Captured = Arc<Mutex<Vec<Value>>>;
type CapturedRequest = Arc<Mutex<Option<(Method, HeaderMap, Bytes)>>>;
type Watch = WatchService<HttpCollectionSource, JsonFileStore, WebhookAlertSink>;

async fn spawn_mock(source: MockSource) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_source::serve(listener, source, std::future::pending::<()>()));
    format!("http://{}/api/news", addr)
}

async fn capture(State(captured): State<Captured>, Json(body): Json<Value>) -> StatusCode {
    captured.lock().unwrap().push(body);
    StatusCode::OK
}

async fn spawn_webhook(status: StatusCode) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let app = if status.is_success() {
        Router::new()
            .route("/hook", post(capture))
            .with_state(captured.clone())
    } else {
        Router::new().route("/hook", post(move || async move { status }))
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/hook", addr), captured)
}

fn watcher(url: &str, store: JsonFileStore, webhook: Option<&str>) -> Watch {
    let source = HttpCollectionSource::new(url, &json!({"reception": "garden"}), "items", None).unwrap();
    let sink = webhook.map(|hook| WebhookAlertSink::new(hook, None).unwrap());

    WatchService::new(
        FetchService::new(source),
        SnapshotService::new(store, url.to_string()),
        ChangeDetector::new("id_news"),
        NotificationService::new(sink),
    )
}

#[tokio::test]
async fn detects_pushed_items_and_fires_webhook() {
    let source = MockSource::seeded("id_news", "items");
    let url = spawn_mock(source.clone()).await;
    let (hook, captured) = spawn_webhook(StatusCode::OK).await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("data"), "latest_news.json");

    let mut watch = watcher(&url, store.clone(), Some(&hook));

    let first = watch.check_for_new_items().await;
    assert_eq!(first.classification, Classification::FirstObservation);
    assert_eq!(first.fetch_count, 5);

    source.push_synthetic();
    source.push_synthetic();

    let second = watch.check_for_new_items().await;
    assert_eq!(second.classification, Classification::NewItems);
    assert_eq!(second.new_items, 2);
    assert!(second.notified);

    let third = watch.check_for_new_items().await;
    assert_eq!(third.classification, Classification::NoChange);

    let payloads = captured.lock().unwrap().clone();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["value1"], "New news items detected!");
    assert_eq!(payloads[0]["value2"], "Count: 5 → 7 (+2)");
    assert_eq!(payloads[0]["value3"], "Latest ID: 130 → 132");

    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved.fetch_count, 7);
    assert_eq!(saved.source_url, url);
    assert_eq!(saved.items[0].id("id_news"), Some("132".to_string()));
}

#[tokio::test]
async fn failed_fetch_writes_empty_snapshot_and_keeps_state() {
    let source = MockSource::seeded("id_news", "items");
    let url = spawn_mock(source.clone()).await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path(), "latest_news.json");

    let mut watch = watcher(&url, store.clone(), None);
    watch.check_for_new_items().await;
    let before = watch.state().clone();

    source.fail_with(Some(StatusCode::INTERNAL_SERVER_ERROR));
    let failed = watch.check_for_new_items().await;

    assert_eq!(failed.classification, Classification::NoData);
    assert_eq!(failed.fetch_count, 0);
    assert_eq!(watch.state(), &before);
    assert_eq!(store.load().await.unwrap().unwrap().fetch_count, 0);

    source.fail_with(None);
    let recovered = watch.check_for_new_items().await;
    assert_eq!(recovered.classification, Classification::NoChange);
}

#[tokio::test]
async fn reordering_is_not_reported_as_new() {
    let source = MockSource::seeded("id_news", "items");
    let url = spawn_mock(source.clone()).await;
    let (hook, captured) = spawn_webhook(StatusCode::OK).await;
    let temp_dir = TempDir::new().unwrap();

    let mut watch = watcher(&url, JsonFileStore::new(temp_dir.path(), "latest_news.json"), Some(&hook));
    watch.check_for_new_items().await;

    let mut items = source.items();
    items.swap(0, 1);
    source.set_items(items);

    let report = watch.check_for_new_items().await;
    assert_eq!(report.classification, Classification::Reordered);
    assert_eq!(watch.state().last_seen_id(), Some("129"));
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn webhook_failure_does_not_break_next_cycle() {
    let source = MockSource::seeded("id_news", "items");
    let url = spawn_mock(source.clone()).await;
    let (hook, _) = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
    let temp_dir = TempDir::new().unwrap();

    let mut watch = watcher(&url, JsonFileStore::new(temp_dir.path(), "latest_news.json"), Some(&hook));
    watch.check_for_new_items().await;

    source.push_synthetic();
    let report = watch.check_for_new_items().await;
    assert_eq!(report.classification, Classification::NewItems);
    assert!(!report.notified);

    source.push_synthetic();
    let next = watch.check_for_new_items().await;
    assert_eq!(next.classification, Classification::NewItems);
    assert_eq!(next.new_items, 1);
}

#[tokio::test]
async fn custom_list_field_and_passthrough_fields() {
    let source = MockSource::seeded("id_news", "news");
    source.set_items(vec![NewsItem::default()
        .with_field("id_news", "1")
        .with_field("extra", json!({"tags": ["a", "b"]}))]);
    let url = spawn_mock(source.clone()).await;

    let fetcher = HttpCollectionSource::new(&url, &json!({}), "news", None).unwrap();
    let items = FetchService::new(fetcher).fetch().await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].fields()["extra"]["tags"][1], "b");
}

#[tokio::test]
async fn mock_source_serves_get_and_push() {
    let source = MockSource::seeded("id_news", "items");
    let url = spawn_mock(source).await;
    let client = reqwest::Client::new();

    let pushed: Value = client
        .post(format!("{}/push", url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pushed["id_news"], "131");

    let body: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["id_news"], "131");
}

async fn record_request(
    State(captured): State<CapturedRequest>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    *captured.lock().unwrap() = Some((method, headers, body));
    Json(json!({"items": [{"id_news": "1"}]}))
}

#[tokio::test]
async fn fetch_posts_configured_body_with_fixed_headers() {
    let captured: CapturedRequest = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route("/api/news", any(record_request))
        .with_state(captured.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let url = format!("http://{}/api/news", addr);
    let fetcher =
        HttpCollectionSource::new(&url, &json!({"reception": "garden"}), "items", None).unwrap();
    let items = fetcher.fetch().await.unwrap();
    assert_eq!(items.len(), 1);

    let (method, headers, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(method, Method::POST);
    assert_eq!(&body[..], br#"{"reception":"garden"}"#);
    assert_eq!(headers["accept"], "application/json, text/plain, */*");
    assert_eq!(headers["accept-language"], "en-US,en;q=0.9");
    assert_eq!(headers["content-type"], "text/plain");
    assert!(headers.get("sec-fetch-mode").is_none());
}
