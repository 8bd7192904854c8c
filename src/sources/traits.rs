use async_trait::async_trait;

use crate::domain::NewsItem;
use crate::errors::WatcherResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch the current collection, most recent item first
    async fn fetch(&self) -> WatcherResult<Vec<NewsItem>>;
}
