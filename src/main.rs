use std::process::ExitCode;

use clap::Parser;
use pingapp::config::setup_logging;
use pingapp::ping::PingClient;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = pingapp::cli::CliOptions::parse();

    if let Err(err) = setup_logging(cli.debug) {
        eprintln!("Logging setup failed, not starting: {}", err);
        return ExitCode::FAILURE;
    }

    let client = match PingClient::new(&cli.backend.api_url, cli.backend.timeout()) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to set up the ping client: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = pingapp::web::setup_server(&cli.listen_address, cli.port, client).await {
        error!("Application error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
