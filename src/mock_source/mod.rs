//! In-process stand-in for the remote news API.
//!
//! Serves a seeded list at `GET/POST /api/news` and prepends a synthetic item
//! with the next id whenever [`MockSource::push_synthetic`] is called (or
//! `POST /api/news/push` is hit).

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tracing::info;

use crate::domain::NewsItem;

pub const DEFAULT_PORT: u16 = 3000;

const SEED: [(&str, &str, &str); 5] = [
    ("130", "11.08.2025", "Notice to parents"),
    ("129", "28.07.2025", "Free places for children in mandatory pre-school education"),
    ("128", "27.06.2025", "Notice to parents"),
    ("127", "12.05.2025", "Free places in municipal kindergartens and nursery groups"),
    ("126", "28.04.2025", "Free places in municipal kindergartens and nursery groups 28.04.2025"),
];

const SAMPLE_TITLES: [&str; 6] = [
    "Important information for all parents",
    "New rules for kindergartens",
    "Special programs for children",
    "Updates to the education system",
    "Holiday events in the kindergarten",
    "Health measures and recommendations",
];

const SAMPLE_DATES: [&str; 6] = [
    "15.08.2025",
    "20.08.2025",
    "25.08.2025",
    "01.09.2025",
    "05.09.2025",
    "10.09.2025",
];

struct MockNews {
    items: Vec<NewsItem>,
    next_id: u64,
    failure: Option<StatusCode>,
}

#[derive(Clone)]
pub struct MockSource {
    id_field: String,
    list_field: String,
    news: Arc<Mutex<MockNews>>,
}

impl MockSource {
    /// Five items, ids 130 down to 126; the next synthetic id is 131
    pub fn seeded(id_field: &str, list_field: &str) -> Self {
        let items = SEED
            .iter()
            .map(|(id, date, title)| {
                NewsItem::default()
                    .with_field(id_field, *id)
                    .with_field("data", *date)
                    .with_field("title", *title)
            })
            .collect();

        Self {
            id_field: id_field.to_string(),
            list_field: list_field.to_string(),
            news: Arc::new(Mutex::new(MockNews {
                items,
                next_id: 131,
                failure: None,
            })),
        }
    }

    fn news(&self) -> MutexGuard<'_, MockNews> {
        self.news.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn items(&self) -> Vec<NewsItem> {
        self.news().items.clone()
    }

    pub fn set_items(&self, items: Vec<NewsItem>) {
        self.news().items = items;
    }

    /// Make `/api/news` answer with `status` until cleared with `None`
    pub fn fail_with(&self, status: Option<StatusCode>) {
        self.news().failure = status;
    }

    /// Prepend a new item with the next id and return it
    pub fn push_synthetic(&self) -> NewsItem {
        let mut news = self.news();
        let id = news.next_id;
        let slot = ((id - 131) as usize) % SAMPLE_TITLES.len();

        let item = NewsItem::default()
            .with_field(&self.id_field, id.to_string())
            .with_field("data", SAMPLE_DATES[slot])
            .with_field("title", SAMPLE_TITLES[slot]);

        news.items.insert(0, item.clone());
        news.next_id += 1;

        info!(
            id,
            total = news.items.len(),
            title = SAMPLE_TITLES[slot],
            "Added new news item"
        );
        item
    }

    fn body(&self) -> Result<Value, StatusCode> {
        let news = self.news();
        if let Some(status) = news.failure {
            return Err(status);
        }

        let items = news
            .items
            .iter()
            .map(|item| Value::Object(item.fields().clone()))
            .collect();

        let mut body = Map::new();
        body.insert(self.list_field.clone(), Value::Array(items));
        Ok(Value::Object(body))
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/api/news", get(list_news).post(list_news))
            .route("/api/news/push", post(push_news))
            .with_state(self.clone())
    }
}

async fn list_news(State(source): State<MockSource>) -> Response {
    info!("API request received");
    match source.body() {
        Ok(body) => Json(body).into_response(),
        Err(status) => (status, "simulated failure").into_response(),
    }
}

async fn push_news(State(source): State<MockSource>) -> Json<NewsItem> {
    Json(source.push_synthetic())
}

async fn index(State(source): State<MockSource>) -> Html<String> {
    let items = source.items();
    let latest: String = items
        .iter()
        .take(5)
        .map(|item| {
            format!(
                "<li><strong>ID {}</strong> ({}): {}</li>",
                item.id(&source.id_field).unwrap_or_default(),
                item.date().unwrap_or("-"),
                item.title().unwrap_or("")
            )
        })
        .collect();

    Html(format!(
        "<h1>Example News Server</h1>\
         <ul><li><strong>POST /api/news</strong></li><li><strong>GET /api/news</strong></li></ul>\
         <h2>Current News Count:</h2><p><strong>{}</strong> items available</p>\
         <h2>Latest Items:</h2><ul>{}</ul>",
        items.len(),
        latest
    ))
}

/// Serve `source` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, source: MockSource, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, source.router())
        .with_graceful_shutdown(shutdown)
        .await
}
