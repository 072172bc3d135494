use jobwatch_core::{format_new_postings, format_test_message};
use jobwatch_logging::{watch_debug, watch_info};
use url::Url;

use crate::config::{ConfigError, WatchConfig, JOBS_URL_VAR};
use crate::{
    decode_html, Extractor, Fetcher, JobLinkExtractor, Notifier, ReqwestFetcher, RunError,
    SeenStore, TelegramCredentials, TelegramNotifier,
};

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Distinct postings on the page.
    pub found: usize,
    /// Postings not seen on an earlier run.
    pub fresh: usize,
    /// Postings listed individually in the notification.
    pub listed: usize,
    pub test_notification_sent: bool,
    pub state_saved: bool,
}

/// One scrape-diff-notify-persist pass over the listings page.
pub struct Watcher {
    fetcher: Box<dyn Fetcher>,
    extractor: Box<dyn Extractor>,
    notifier: Box<dyn Notifier>,
    store: SeenStore,
    page_url: String,
    source_label: String,
    send_test_notification: bool,
}

impl Watcher {
    /// Validates the configuration and wires the default components.
    /// No network activity happens here.
    pub fn from_config(config: WatchConfig) -> Result<Self, RunError> {
        let credentials =
            TelegramCredentials::new(config.bot_token.as_deref(), config.chat_id.as_deref())?;
        Url::parse(&config.page_url).map_err(|err| ConfigError::InvalidUrl {
            name: JOBS_URL_VAR,
            reason: err.to_string(),
        })?;
        let base_origin = Url::parse(&config.base_origin).map_err(|err| ConfigError::InvalidUrl {
            name: "base origin",
            reason: err.to_string(),
        })?;

        Ok(Self {
            fetcher: Box::new(ReqwestFetcher::new(config.fetch)),
            extractor: Box::new(JobLinkExtractor::new(base_origin, config.path_marker)),
            notifier: Box::new(TelegramNotifier::new(
                config.telegram_api_base,
                credentials,
                config.notify_timeout,
            )),
            store: SeenStore::new(config.state_path),
            page_url: config.page_url,
            source_label: config.source_label,
            send_test_notification: config.send_test_notification,
        })
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Runs every step in order and stops at the first error. The seen
    /// state is written only after a notification went out.
    pub async fn run_once(&self) -> Result<RunReport, RunError> {
        let mut seen = self.store.load().map_err(RunError::Load)?;
        watch_info!(
            "Loaded {} seen postings from {:?}",
            seen.len(),
            self.store.path()
        );

        let mut report = RunReport::default();
        if self.send_test_notification {
            let text = format_test_message(&self.source_label, &self.page_url);
            self.notifier.notify(&text).await?;
            report.test_notification_sent = true;
        }

        let page = self
            .fetcher
            .fetch(&self.page_url)
            .await
            .map_err(|source| RunError::Fetch {
                url: self.page_url.clone(),
                source,
            })?;
        let decoded = decode_html(&page.bytes, page.metadata.content_type.as_deref())?;
        watch_debug!(
            "Decoded {} bytes as {} (from {})",
            page.metadata.byte_len,
            decoded.encoding_label,
            decoded.encoding_source
        );

        let postings = self.extractor.extract(&decoded.html)?;
        report.found = postings.len();

        let partition = seen.partition(postings);
        report.fresh = partition.fresh.len();
        watch_info!(
            "Found {} postings: {} new, {} already seen",
            report.found,
            report.fresh,
            partition.known.len()
        );
        if partition.fresh.is_empty() {
            watch_info!("No new postings");
            return Ok(report);
        }

        let message = format_new_postings(&self.source_label, &partition.fresh);
        self.notifier.notify(&message.text).await?;
        report.listed = message.listed;

        seen.mark_seen(&partition.fresh);
        self.store.save(&seen).map_err(RunError::Save)?;
        report.state_saved = true;

        Ok(report)
    }
}
