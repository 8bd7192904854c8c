use async_trait::async_trait;

use crate::domain::PersistedSnapshot;
use crate::errors::WatcherResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace the stored snapshot
    async fn save(&self, snapshot: &PersistedSnapshot) -> WatcherResult<()>;
    async fn load(&self) -> WatcherResult<Option<PersistedSnapshot>>;
}
