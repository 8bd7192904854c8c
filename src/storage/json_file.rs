use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::PersistedSnapshot;
use crate::errors::WatcherResult;
use crate::storage::traits::SnapshotStore;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATA_FILE: &str = "latest_news.json";

/// Keeps the latest snapshot as a single pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P, file_name: &str) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let path = dir.join(file_name);
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn save(&self, snapshot: &PersistedSnapshot) -> WatcherResult<()> {
        fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn load(&self) -> WatcherResult<Option<PersistedSnapshot>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
