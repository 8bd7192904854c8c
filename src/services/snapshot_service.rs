use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::domain::{NewsItem, PersistedSnapshot};
use crate::storage::SnapshotStore;

/// Snapshot writer: persists every fetch result, empty ones included
pub struct SnapshotService<T: SnapshotStore> {
    store: T,
    source_url: String,
}

impl<T: SnapshotStore> SnapshotService<T> {
    pub fn new(store: T, source_url: String) -> Self {
        Self { store, source_url }
    }

    /// Returns whether the snapshot was written. Failures are logged only.
    pub async fn persist(&self, items: &[NewsItem], timestamp: DateTime<Utc>) -> bool {
        let snapshot = PersistedSnapshot::new(items.to_vec(), timestamp, self.source_url.clone());

        match self.store.save(&snapshot).await {
            Ok(()) => {
                debug!(fetch_count = snapshot.fetch_count, "Updated snapshot");
                true
            }
            Err(e) => {
                error!(error = %e, "Error saving snapshot");
                false
            }
        }
    }
}
