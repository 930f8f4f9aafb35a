//! Run the URL checks from the command line and print one line per URL.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pingapp::check::{CheckRun, run_checks};
use pingapp::cli::BackendOptions;
use pingapp::config::setup_logging;
use pingapp::ping::PingClient;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
/// Check comma-separated URLs for an assertion through the ping backend
struct PingUrlsOptions {
    #[clap(long, help = "Enable debug logging", env = "PINGAPP_DEBUG")]
    debug: bool,
    #[clap(flatten)]
    backend: BackendOptions,
    /// Comma-separated URLs to check
    urls: String,
    /// Text each page has to contain
    assertion: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = PingUrlsOptions::parse();
    setup_logging(cli.debug)
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {err}"))?;

    let client = PingClient::new(&cli.backend.api_url, cli.backend.timeout())?;
    let run = CheckRun::submit(&cli.urls, &cli.assertion);
    if !run.input_errors.is_empty() {
        for message in [&run.input_errors.url, &run.input_errors.assertion] {
            if !message.is_empty() {
                eprintln!("{message}");
            }
        }
        anyhow::bail!("Nothing to check.");
    }

    let run = Arc::new(RwLock::new(run));
    run_checks(&client, &run).await;

    let run = run.read().await;
    for check in &run.statuses {
        println!("{} {} {}", check.status.icon(), check.status, check.url);
    }
    if let Some(error) = &run.error {
        anyhow::bail!("{error}");
    }
    Ok(())
}
