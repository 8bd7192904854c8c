use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::cli::Cli;
use crate::errors::{WatcherError, WatcherResult};

pub const WEBHOOK_URL_VAR: &str = "IFTTT_WEBHOOK_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub id_field: String,
    pub list_field: String,
    pub request_body: Value,
    pub interval: Duration,
    pub verbose: bool,
    pub webhook_url: Option<String>,
    pub data_dir: PathBuf,
    pub data_file: String,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Load `.env` from the executable's directory, then the current directory.
    /// Call before parsing the CLI so `env` fallbacks see the values.
    pub fn load_dotenv() {
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        dotenvy::dotenv().ok();
    }

    pub fn from_cli(cli: &Cli) -> WatcherResult<Self> {
        let webhook_url = std::env::var(WEBHOOK_URL_VAR).ok();
        Self::from_parts(cli, webhook_url)
    }

    pub fn from_parts(cli: &Cli, webhook_url: Option<String>) -> WatcherResult<Self> {
        Url::parse(&cli.url).map_err(|e| WatcherError::InvalidUrl(format!("{}: {}", cli.url, e)))?;

        let request_body: Value = serde_json::from_str(&cli.body)
            .map_err(|e| WatcherError::InvalidBody(e.to_string()))?;

        if cli.interval == 0 {
            return Err(WatcherError::Config(
                "interval must be at least 1 second".to_string(),
            ));
        }

        if cli.id_field.trim().is_empty() {
            return Err(WatcherError::Config("id field must not be empty".to_string()));
        }

        if cli.list_field.trim().is_empty() {
            return Err(WatcherError::Config("list field must not be empty".to_string()));
        }

        let webhook_url = webhook_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        if let Some(ref hook) = webhook_url {
            Url::parse(hook)
                .map_err(|e| WatcherError::InvalidUrl(format!("{}: {}", WEBHOOK_URL_VAR, e)))?;
        }

        Ok(Self {
            url: cli.url.clone(),
            id_field: cli.id_field.clone(),
            list_field: cli.list_field.clone(),
            request_body,
            interval: Duration::from_secs(cli.interval),
            verbose: cli.verbose,
            webhook_url,
            data_dir: cli.data_dir.clone(),
            data_file: cli.data_file.clone(),
            timeout: cli.timeout.filter(|s| *s > 0).map(Duration::from_secs),
        })
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }
}
