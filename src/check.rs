//! Check runs: input validation, the sequential ping loop and the per-URL statuses.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::constants::{MISSING_ASSERTION_MESSAGE, MISSING_URL_MESSAGE, URL_MATCHER};
use crate::ping::PingClient;

/// Where a single URL is in its check.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrlStatus {
    /// The ping is in flight.
    Checking,
    /// The assertion was found.
    Success,
    /// The check failed.
    Error,
}

impl UrlStatus {
    /// Glyph drawn next to the URL.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Checking => "\u{27F3}",
            Self::Success => "\u{2713}",
            Self::Error => "\u{2717}",
        }
    }

    /// Icon colour.
    pub fn color(self) -> &'static str {
        match self {
            Self::Checking => "blue",
            Self::Success => "green",
            Self::Error => "red",
        }
    }

    /// Whether the icon spins.
    pub fn spin(self) -> bool {
        matches!(self, Self::Checking)
    }

    /// CSS modifier for the icon.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for UrlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Checking => "CHECKING",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// One row of the status list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UrlCheck {
    /// The URL as it appeared in the comma-separated field.
    pub url: String,
    /// Its current status.
    pub status: UrlStatus,
}

/// Per-field validation messages, an empty string means the field is fine.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct InputErrors {
    /// Problem with the URL field.
    pub url: String,
    /// Problem with the assertion field.
    pub assertion: String,
}

impl InputErrors {
    /// No field has an error.
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.assertion.is_empty()
    }
}

/// Checks both fields were filled in.
pub fn validate_inputs(urls: &str, assertion: &str) -> InputErrors {
    let mut errors = InputErrors::default();
    if urls.is_empty() {
        errors.url = MISSING_URL_MESSAGE.to_string();
    }
    if assertion.is_empty() {
        errors.assertion = MISSING_ASSERTION_MESSAGE.to_string();
    }
    errors
}

/// Splits the URL field on commas. Entries keep their surrounding whitespace.
pub fn split_urls(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
}

/// Whether `candidate` looks like an ftp/http/https URL.
pub fn is_valid_url(candidate: &str) -> bool {
    URL_MATCHER.is_match(candidate.trim())
}

/// Message shown when a URL fails [is_valid_url].
pub fn invalid_url_message(url: &str) -> String {
    format!("\"{url}\" is invalid. Please provide only valid urls!")
}

/// Everything the page shows about the latest submission.
#[derive(Clone, Debug, Serialize)]
pub struct CheckRun {
    /// The URL field as submitted.
    pub urls: String,
    /// The assertion as submitted.
    pub assertion: String,
    /// The message that stopped the run, if any.
    pub error: Option<String>,
    /// Field-level validation problems.
    pub input_errors: InputErrors,
    /// Checks are still going.
    pub loading: bool,
    /// Status of every URL reached so far, in submission order.
    pub statuses: Vec<UrlCheck>,
    /// When the run was submitted.
    pub started_at: DateTime<Utc>,
}

impl Default for CheckRun {
    fn default() -> Self {
        Self {
            urls: String::new(),
            assertion: String::new(),
            error: None,
            input_errors: InputErrors::default(),
            loading: false,
            statuses: Vec::new(),
            started_at: Utc::now(),
        }
    }
}

impl CheckRun {
    /// Starts a fresh run for a form submission.
    ///
    /// If either field is missing the run is born finished, carrying the field errors.
    pub fn submit(urls: &str, assertion: &str) -> Self {
        let input_errors = validate_inputs(urls, assertion);
        Self {
            urls: urls.to_string(),
            assertion: assertion.to_string(),
            loading: input_errors.is_empty(),
            input_errors,
            ..Default::default()
        }
    }

    /// Appends a URL in [UrlStatus::Checking] and returns its position.
    pub fn push_checking(&mut self, url: &str) -> usize {
        self.statuses.push(UrlCheck {
            url: url.to_string(),
            status: UrlStatus::Checking,
        });
        self.statuses.len() - 1
    }

    /// Updates the status of the entry at `index`.
    pub fn set_status(&mut self, index: usize, status: UrlStatus) {
        if let Some(check) = self.statuses.get_mut(index) {
            check.status = status;
        }
    }

    /// Stops the run with an error message.
    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// Marks the run as done.
    pub fn finish(&mut self) {
        self.loading = false;
    }
}

/// A run shared between the page handlers and the task doing the checks.
pub type SharedRun = Arc<RwLock<CheckRun>>;

/// Pings every URL of the run in order, stopping at the first invalid URL or failed check.
pub async fn run_checks(client: &PingClient, run: &SharedRun) {
    let (urls, assertion) = {
        let run = run.read().await;
        if !run.loading {
            return;
        }
        (run.urls.clone(), run.assertion.clone())
    };

    for url in split_urls(&urls) {
        if !is_valid_url(url) {
            info!("Refusing to ping invalid url {url:?}");
            run.write().await.fail(invalid_url_message(url));
            return;
        }

        let index = run.write().await.push_checking(url);
        match client.ping(url, &assertion).await {
            Ok(()) => {
                info!("{url} passed");
                run.write().await.set_status(index, UrlStatus::Success);
            }
            Err(err) => {
                warn!("{url} failed: {err}");
                let mut run = run.write().await;
                run.set_status(index, UrlStatus::Error);
                run.fail(err.user_message(url, &assertion));
                return;
            }
        }
    }

    run.write().await.finish();
}
