use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NewsItem;

/// On-disk record of the most recent fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    pub last_updated: DateTime<Utc>,
    pub source_url: String,
    pub fetch_count: usize,
    pub items: Vec<NewsItem>,
}

impl PersistedSnapshot {
    pub fn new(items: Vec<NewsItem>, last_updated: DateTime<Utc>, source_url: String) -> Self {
        Self {
            last_updated,
            source_url,
            fetch_count: items.len(),
            items,
        }
    }
}
