use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use news_watcher::cli::Cli;
use news_watcher::config::Config;
use news_watcher::detector::ChangeDetector;
use news_watcher::errors::WatcherResult;
use news_watcher::scheduler::{shutdown_signal, Scheduler};
use news_watcher::services::{
    FetchService, NotificationService, SnapshotService, WatchService, WebhookAlertSink,
};
use news_watcher::sources::HttpCollectionSource;
use news_watcher::storage::JsonFileStore;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "news_watcher=debug,webhook=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run() -> WatcherResult<()> {
    Config::load_dotenv();
    let cli = Cli::parse();

    // Configuration errors are fatal before anything starts
    let config = Config::from_cli(&cli)?;
    init_tracing(config.verbose);

    let source = HttpCollectionSource::new(
        &config.url,
        &config.request_body,
        &config.list_field,
        config.timeout,
    )?;
    let store = JsonFileStore::new(&config.data_dir, &config.data_file);
    let sink = config
        .webhook_url
        .as_deref()
        .map(|url| WebhookAlertSink::new(url, config.timeout))
        .transpose()?;

    info!("Starting news monitor...");
    info!("Checking every {} seconds", config.interval.as_secs());
    info!("API endpoint: {}", source.url());
    info!("ID field: {}", config.id_field);
    info!("Request body: {}", config.request_body);
    info!("Data will be saved to {}", config.data_path().display());
    if let Some(sink) = &sink {
        info!(
            host = sink.host().as_deref().unwrap_or("unknown"),
            "Webhook enabled"
        );
    }

    let mut watch = WatchService::new(
        FetchService::new(source),
        SnapshotService::new(store, config.url.clone()),
        ChangeDetector::new(config.id_field.clone()),
        NotificationService::new(sink),
    );

    let mut scheduler = Scheduler::new(config.interval);
    scheduler.run(&mut watch, shutdown_signal()).await;

    Ok(())
}
