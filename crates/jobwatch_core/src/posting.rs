use crate::identity::{identity, Identity};

/// Title used when a job link has no visible text.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled job";

/// One job listing found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub title: String,
    pub link: String,
    pub identity: Identity,
}

impl Posting {
    /// Builds a posting from raw link text and an absolute link.
    ///
    /// The title is whitespace-normalized and replaced by
    /// [`UNTITLED_PLACEHOLDER`] when nothing is left; the link is trimmed.
    pub fn new(raw_title: &str, link: &str) -> Self {
        let mut title = normalize_whitespace(raw_title);
        if title.is_empty() {
            title = UNTITLED_PLACEHOLDER.to_string();
        }
        let link = link.trim().to_string();
        let identity = identity(&title, &link);
        Self {
            title,
            link,
            identity,
        }
    }
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for word in input.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
