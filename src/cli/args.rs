use std::path::PathBuf;

use clap::Parser;

use crate::storage::json_file::{DEFAULT_DATA_DIR, DEFAULT_DATA_FILE};

#[derive(Parser, Debug)]
#[command(name = "news-watcher")]
#[command(about = "Monitor a news API for new items and fire a webhook when they appear")]
#[command(version)]
pub struct Cli {
    /// API URL to monitor
    #[arg(short, long, env = "WATCHER_URL")]
    pub url: String,

    /// Field name used to compare items (e.g. id_news)
    #[arg(short = 'f', long, env = "WATCHER_ID_FIELD", default_value = "id_news")]
    pub id_field: String,

    /// Request body as a JSON string (e.g. '{"reception":"garden"}')
    #[arg(short, long, env = "WATCHER_BODY")]
    pub body: String,

    /// Check interval in seconds
    #[arg(short, long, env = "WATCHER_INTERVAL", default_value_t = 10)]
    pub interval: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Response field that holds the list of items
    #[arg(long, env = "WATCHER_LIST_FIELD", default_value = "items")]
    pub list_field: String,

    /// Directory the latest snapshot is written to
    #[arg(long, env = "WATCHER_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// File name of the latest snapshot
    #[arg(long, env = "WATCHER_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: String,

    /// Timeout in seconds for the poll and webhook requests
    #[arg(long, env = "WATCHER_TIMEOUT")]
    pub timeout: Option<u64>,
}
