use crate::Posting;

/// Upper bound on postings listed in one message.
pub const MAX_LISTED_POSTINGS: usize = 10;

/// Telegram rejects `sendMessage` text longer than this.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Listed titles are cut to this many characters.
pub const MAX_TITLE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub text: String,
    /// Postings with their own block in `text`.
    pub listed: usize,
    /// All postings the message announces.
    pub total: usize,
}

/// Formats the announcement for a batch of new postings.
///
/// Layout: a header line, a blank line, then `title\nlink` blocks separated
/// by blank lines. At most [`MAX_LISTED_POSTINGS`] get a block, and fewer if
/// the next block would push the text past [`MAX_MESSAGE_LEN`]. The rest are
/// summarised in a closing line.
pub fn format_new_postings(source_label: &str, postings: &[Posting]) -> NotificationMessage {
    let total = postings.len();

    // Room for the longest header and trailer this batch could need.
    let reserved = message_len(&header(source_label, total, 0))
        + message_len(&format!(" (showing first {total})"))
        + message_len(&trailer(total));

    let mut blocks = String::new();
    let mut listed = 0;
    for posting in postings.iter().take(MAX_LISTED_POSTINGS) {
        let block = format!("\n{}\n{}\n", truncate_title(&posting.title), posting.link);
        if reserved + message_len(&blocks) + message_len(&block) > MAX_MESSAGE_LEN {
            break;
        }
        blocks.push_str(&block);
        listed += 1;
    }

    let mut text = header(source_label, total, listed);
    text.push_str(&blocks);
    if listed < total {
        text.push_str(&trailer(total - listed));
    }

    NotificationMessage {
        text,
        listed,
        total,
    }
}

pub fn format_test_message(source_label: &str, page_url: &str) -> String {
    format!("🔔 Test notification: {source_label} job watcher is running.\n{page_url}\n")
}

fn header(source_label: &str, total: usize, listed: usize) -> String {
    let noun = if total == 1 { "job" } else { "jobs" };
    let mut text = format!("✅ {total} new {source_label} {noun} found");
    if listed > 0 && listed < total {
        text.push_str(&format!(" (showing first {listed})"));
    }
    text.push_str(":\n");
    text
}

fn trailer(unlisted: usize) -> String {
    format!("\n…and {unlisted} more not listed\n")
}

fn truncate_title(title: &str) -> String {
    match title.char_indices().nth(MAX_TITLE_CHARS - 1) {
        Some((cut, _)) if title.chars().count() > MAX_TITLE_CHARS => {
            format!("{}…", &title[..cut])
        }
        _ => title.to_string(),
    }
}

// Telegram measures text length in UTF-16 code units.
fn message_len(text: &str) -> usize {
    text.encode_utf16().count()
}
