use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::{FetchSettings, JOB_PATH_MARKER};

pub const DEFAULT_PAGE_URL: &str = "https://sainsburys.jobs/jobs?full_time=&part_time=on&fixed_term=&filter_by=&location=eh14+4as&keywords=";
pub const DEFAULT_BASE_ORIGIN: &str = "https://sainsburys.jobs";
pub const DEFAULT_SOURCE_LABEL: &str = "Sainsbury's";
pub const DEFAULT_STATE_FILE: &str = "seen_jobs.json";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

pub const TOKEN_VAR: &str = "TG_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TG_CHAT_ID";
pub const TEST_NOTIFICATION_VAR: &str = "SEND_TEST_NOTIFICATION";
pub const JOBS_URL_VAR: &str = "JOBS_URL";
pub const SEEN_STATE_FILE_VAR: &str = "SEEN_STATE_FILE";
pub const TELEGRAM_API_BASE_VAR: &str = "TELEGRAM_API_BASE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required setting {0} is missing or empty")]
    Missing(&'static str),
    #[error("setting {name} is not a valid url: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
}

/// Everything one run needs. Built at the process edge and passed in, so the
/// engine never reads the environment itself.
#[derive(Clone)]
pub struct WatchConfig {
    pub page_url: String,
    pub base_origin: String,
    pub path_marker: String,
    pub source_label: String,
    pub state_path: PathBuf,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub telegram_api_base: String,
    pub send_test_notification: bool,
    pub fetch: FetchSettings,
    pub notify_timeout: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            path_marker: JOB_PATH_MARKER.to_string(),
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            state_path: PathBuf::from(DEFAULT_STATE_FILE),
            bot_token: None,
            chat_id: None,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            send_test_notification: false,
            fetch: FetchSettings::default(),
            notify_timeout: Duration::from_secs(25),
        }
    }
}

impl WatchConfig {
    /// Reads settings through `lookup` (for the binary, `std::env::var`).
    ///
    /// Missing credentials are kept as `None` here; they are rejected when
    /// the run is set up, before any request goes out.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            page_url: non_empty(JOBS_URL_VAR).unwrap_or(defaults.page_url),
            state_path: non_empty(SEEN_STATE_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.state_path),
            bot_token: lookup(TOKEN_VAR),
            chat_id: lookup(CHAT_ID_VAR),
            telegram_api_base: non_empty(TELEGRAM_API_BASE_VAR).unwrap_or(defaults.telegram_api_base),
            send_test_notification: lookup(TEST_NOTIFICATION_VAR).as_deref() == Some("1"),
            ..defaults
        }
    }
}

impl std::fmt::Debug for WatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchConfig")
            .field("page_url", &self.page_url)
            .field("base_origin", &self.base_origin)
            .field("path_marker", &self.path_marker)
            .field("source_label", &self.source_label)
            .field("state_path", &self.state_path)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("send_test_notification", &self.send_test_notification)
            .field("fetch", &self.fetch)
            .field("notify_timeout", &self.notify_timeout)
            .finish()
    }
}
