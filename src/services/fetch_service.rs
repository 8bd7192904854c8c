use tracing::{debug, error};

use crate::domain::NewsItem;
use crate::sources::CollectionSource;

/// Fetcher: turns every failure into an empty collection
pub struct FetchService<S: CollectionSource> {
    source: S,
}

impl<S: CollectionSource> FetchService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch the current collection. Errors are logged and reported as
    /// "no data this cycle" with an empty list.
    pub async fn fetch(&self) -> Vec<NewsItem> {
        match self.source.fetch().await {
            Ok(items) => {
                debug!(count = items.len(), "Fetched news items");
                items
            }
            Err(e) => {
                error!(error = %e, "Error fetching news");
                Vec::new()
            }
        }
    }
}
