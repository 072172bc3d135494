//! Jobwatch core: pure posting model, identities, seen-set and message formatting.
mod identity;
mod message;
mod posting;
mod seen;

pub use identity::{identity, Identity};
pub use message::{
    format_new_postings, format_test_message, NotificationMessage, MAX_LISTED_POSTINGS,
    MAX_MESSAGE_LEN, MAX_TITLE_CHARS,
};
pub use posting::{normalize_whitespace, Posting, UNTITLED_PLACEHOLDER};
pub use seen::{Partition, SeenSet};
