//! Example news server for trying the watcher locally.
//! Press Enter to add a news item; Ctrl+C to exit.

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing::info;

use news_watcher::mock_source::{self, MockSource, DEFAULT_PORT};
use news_watcher::scheduler::shutdown_signal;

#[derive(Parser, Debug)]
#[command(name = "mock-source")]
#[command(about = "Serve dummy news at /api/news for local testing")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Field name holding each item's id
    #[arg(short = 'f', long, default_value = "id_news")]
    id_field: String,

    /// Response field holding the list of items
    #[arg(long, default_value = "items")]
    list_field: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    let source = MockSource::seeded(&args.id_field, &args.list_field);
    let listener = TcpListener::bind(("127.0.0.1", args.port))
        .await
        .with_context(|| format!("bind port {}", args.port))?;

    info!("Server listening on http://localhost:{}", args.port);
    info!("Initial news count: {}", source.items().len());
    info!("Press Enter to add a news item, Ctrl+C to exit");

    let trigger = source.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            trigger.push_synthetic();
        }
    });

    mock_source::serve(listener, source, shutdown_signal())
        .await
        .context("serve mock source")?;

    info!("Shutting down server...");
    Ok(())
}
