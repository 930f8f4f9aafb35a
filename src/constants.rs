//! Shared constants/setters for things
//!

use std::sync::LazyLock;

use regex::Regex;

/// Path of the ping endpoint, relative to the configured API base URL.
pub const PING_ENDPOINT: &str = "url/ping";

/// Pattern a URL has to match before it is sent to the backend.
pub const URL_PATTERN: &str =
    r"(ftp|http|https)://(\w+:{0,1}\w*@)?(\S+)(:[0-9]+)?(/|/([\w#!:.?+=&%@/-]))?";

/// Compiled [URL_PATTERN].
#[allow(clippy::expect_used)]
pub static URL_MATCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("URL_PATTERN is a valid regex"));

/// Shown when the URL field is left empty.
pub const MISSING_URL_MESSAGE: &str = "Please provide an url";

/// Shown when the assertion field is left empty.
pub const MISSING_ASSERTION_MESSAGE: &str = "Please provide an assertion";

/// Seconds between page refreshes while a run is in progress.
pub const REFRESH_INTERVAL_SECONDS: u64 = 1;

/// Finished runs older than this are dropped from the registry.
pub const RUN_RETENTION_SECONDS: i64 = 60 * 60;

/// Sessions expire after this much inactivity.
pub const SESSION_INACTIVITY_SECONDS: i64 = 60 * 60 * 24;
