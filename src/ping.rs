//! Client for the backend `url/ping` endpoint.
//!
//! The backend fetches the URL and looks for the assertion text in it. A 2xx
//! answer means it was found, a 5xx answer means the page was fetched but the
//! assertion is missing, anything else means the check itself didn't happen.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::constants::PING_ENDPOINT;
use crate::error::PingAppError;

#[derive(Serialize, Debug)]
struct PingRequest<'a> {
    url: &'a str,
    assertion: &'a str,
}

/// Why a ping didn't succeed.
#[derive(Debug)]
pub enum PingError {
    /// The backend answered with a server error, the assertion wasn't found.
    AssertionNotFound(StatusCode),
    /// The backend refused the request with a non-2xx, non-5xx status.
    Rejected(StatusCode),
    /// The request never got an answer.
    Transport(reqwest::Error),
}

impl PingError {
    /// The message shown to the user when checking `url` fails.
    pub fn user_message(&self, url: &str, assertion: &str) -> String {
        match self {
            Self::AssertionNotFound(_) => format!("\"{assertion}\" not found on \"{url}\"."),
            Self::Rejected(_) | Self::Transport(_) => {
                format!("Check failed for \"{url}\", please try again.")
            }
        }
    }
}

impl std::fmt::Display for PingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssertionNotFound(status) => {
                write!(f, "Backend reported a failed assertion ({status})")
            }
            Self::Rejected(status) => write!(f, "Backend rejected the ping ({status})"),
            Self::Transport(err) => write!(f, "Ping request failed: {err}"),
        }
    }
}

impl std::error::Error for PingError {}

/// Sends ping requests to the backend.
#[derive(Clone, Debug)]
pub struct PingClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PingClient {
    /// Build a client for the API living under `api_base`.
    pub fn new(api_base: &Url, timeout: Duration) -> Result<Self, PingAppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: ping_endpoint(api_base)?,
        })
    }

    /// The full URL pings are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Ask the backend whether `assertion` can be found on `url`.
    pub async fn ping(&self, url: &str, assertion: &str) -> Result<(), PingError> {
        debug!("Pinging {url} via {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&PingRequest { url, assertion })
            .send()
            .await
            .map_err(PingError::Transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.is_server_error() {
            Err(PingError::AssertionNotFound(status))
        } else {
            Err(PingError::Rejected(status))
        }
    }
}

/// Resolve [PING_ENDPOINT] against the base, treating the base as a directory.
fn ping_endpoint(api_base: &Url) -> Result<Url, PingAppError> {
    if api_base.cannot_be_a_base() {
        return Err(PingAppError::ConfigError(format!(
            "API URL {api_base} can't be used as a base"
        )));
    }
    let mut base = api_base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(PING_ENDPOINT)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("http://api.example.org/v1").unwrap();
        assert_eq!(
            ping_endpoint(&base).unwrap().as_str(),
            "http://api.example.org/v1/url/ping"
        );

        let base = Url::parse("http://api.example.org/v1/").unwrap();
        assert_eq!(
            ping_endpoint(&base).unwrap().as_str(),
            "http://api.example.org/v1/url/ping"
        );

        let base = Url::parse("http://localhost:3333").unwrap();
        assert_eq!(
            ping_endpoint(&base).unwrap().as_str(),
            "http://localhost:3333/url/ping"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        let base = Url::parse("mailto:someone@example.org").unwrap();
        assert!(matches!(
            ping_endpoint(&base),
            Err(PingAppError::ConfigError(_))
        ));
    }

    #[test]
    fn user_messages_depend_on_failure_kind() {
        let not_found = PingError::AssertionNotFound(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            not_found.user_message("http://example.org", "hello"),
            "\"hello\" not found on \"http://example.org\"."
        );
        let rejected = PingError::Rejected(StatusCode::BAD_REQUEST);
        assert_eq!(
            rejected.user_message("http://example.org", "hello"),
            "Check failed for \"http://example.org\", please try again."
        );
    }
}
