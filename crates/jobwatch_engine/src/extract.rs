use std::collections::HashSet;

use jobwatch_core::Posting;
use jobwatch_logging::watch_debug;
use scraper::{Html, Selector};
use url::Url;

/// Path segment that marks a link to an individual job posting.
pub const JOB_PATH_MARKER: &str = "/jobs/";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("page is empty")]
    EmptyDocument,
    #[error("page contains no markup tags")]
    NotMarkup,
    #[error("invalid selector: {0}")]
    Selector(String),
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<Vec<Posting>, ExtractError>;
}

/// Collects postings from anchors whose `href` contains the job path marker.
///
/// - origin-relative links (`/jobs/..`) are joined onto the base origin,
///   anything else is kept verbatim, including protocol-relative `//host/..`
///   references so they never take the base origin's place
/// - titles come from the anchor text
/// - repeated identities keep their first occurrence
#[derive(Debug, Clone)]
pub struct JobLinkExtractor {
    base_origin: Url,
    path_marker: String,
}

impl JobLinkExtractor {
    pub fn new(base_origin: Url, path_marker: impl Into<String>) -> Self {
        Self {
            base_origin,
            path_marker: path_marker.into(),
        }
    }

    fn resolve_link(&self, href: &str) -> String {
        if href.starts_with('/') && !href.starts_with("//") {
            if let Ok(url) = self.base_origin.join(href) {
                return url.into();
            }
        }
        href.to_string()
    }
}

impl Extractor for JobLinkExtractor {
    fn extract(&self, html: &str) -> Result<Vec<Posting>, ExtractError> {
        if html.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }

        if !has_tag(html) {
            return Err(ExtractError::NotMarkup);
        }
        let doc = Html::parse_document(html);

        let anchors =
            Selector::parse("a[href]").map_err(|err| ExtractError::Selector(format!("{err:?}")))?;

        let mut seen = HashSet::new();
        let mut postings = Vec::new();
        for anchor in doc.select(&anchors) {
            let Some(href) = anchor.value().attr("href").map(str::trim) else {
                continue;
            };
            if !href.contains(self.path_marker.as_str()) {
                continue;
            }

            let link = self.resolve_link(href);
            let text: String = anchor.text().collect();
            let posting = Posting::new(&text, &link);
            if seen.insert(posting.identity.clone()) {
                postings.push(posting);
            } else {
                watch_debug!("Skipping duplicate job link {}", posting.link);
            }
        }

        Ok(postings)
    }
}

/// True when the input holds at least one tag, comment or doctype: a `<`
/// followed by a letter, `!` or `/`. html5ever wraps any input in an
/// html/head/body skeleton, so the parsed tree cannot tell a bare shell page
/// from plain text or JSON.
fn has_tag(input: &str) -> bool {
    input
        .as_bytes()
        .windows(2)
        .any(|pair| {
            pair[0] == b'<' && (pair[1].is_ascii_alphabetic() || matches!(pair[1], b'!' | b'/'))
        })
}
