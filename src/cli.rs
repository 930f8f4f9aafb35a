//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "PINGAPP_DEBUG")]
    /// Enable debug logging. Env: PINGAPP_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "9000", env = "PINGAPP_PORT")]
    /// http listener, defaults to `9000`.
    /// Env: PINGAPP_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "PINGAPP_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: PINGAPP_LISTEN_ADDRESS
    pub listen_address: String,
    #[clap(flatten)]
    /// Where the ping backend lives.
    pub backend: BackendOptions,
}

#[derive(clap::Args, Debug, Clone)]
/// Options for reaching the backend ping service, shared by the binaries.
pub struct BackendOptions {
    #[clap(
        long,
        short,
        default_value = "http://localhost:3333/",
        env = "PINGAPP_API_URL"
    )]
    /// Base URL of the ping API, `url/ping` is resolved against it.
    /// Env: PINGAPP_API_URL
    pub api_url: url::Url,
    #[clap(long, default_value = "30", env = "PINGAPP_REQUEST_TIMEOUT")]
    /// Timeout in seconds for a single ping request.
    /// Env: PINGAPP_REQUEST_TIMEOUT
    pub request_timeout: u64,
}

impl BackendOptions {
    /// The request timeout as a [std::time::Duration]
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout)
    }
}
