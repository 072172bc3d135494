//! Jobwatch engine: IO pipeline and run orchestration.
mod config;
mod decode;
mod error;
mod extract;
mod fetch;
mod notify;
mod persist;
mod types;
mod watch;

pub use config::{
    ConfigError, WatchConfig, CHAT_ID_VAR, DEFAULT_BASE_ORIGIN, DEFAULT_PAGE_URL, DEFAULT_SOURCE_LABEL,
    DEFAULT_STATE_FILE, DEFAULT_TELEGRAM_API_BASE, JOBS_URL_VAR, SEEN_STATE_FILE_VAR,
    TELEGRAM_API_BASE_VAR, TEST_NOTIFICATION_VAR, TOKEN_VAR,
};
pub use decode::{decode_html, DecodeError, DecodedHtml, EncodingSource};
pub use error::{ErrorKind, RunError};
pub use extract::{ExtractError, Extractor, JobLinkExtractor, JOB_PATH_MARKER};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use notify::{Notifier, NotifyError, TelegramCredentials, TelegramNotifier};
pub use persist::{AtomicFileWriter, SeenStore, StoreError};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
pub use watch::{RunReport, Watcher};
