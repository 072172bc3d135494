use std::fmt;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use jobwatch_logging::watch_warn;

/// Where the encoding of a listings page was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    ByteOrderMark,
    ContentType,
    /// No usable declaration; the bytes were already valid UTF-8.
    Utf8Body,
    /// No usable declaration; guessed by chardetng.
    Detected,
}

impl fmt::Display for EncodingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingSource::ByteOrderMark => write!(f, "byte order mark"),
            EncodingSource::ContentType => write!(f, "Content-Type charset"),
            EncodingSource::Utf8Body => write!(f, "valid UTF-8 body"),
            EncodingSource::Detected => write!(f, "detection"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    pub encoding_source: EncodingSource,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("page bytes are not valid {encoding} (encoding from {encoding_source})")]
    Malformed {
        encoding: String,
        encoding_source: EncodingSource,
    },
}

/// Turns the fetched listings page into text.
///
/// A BOM wins, then a charset the server declared. Without either, a body
/// that is valid UTF-8 is taken as such and anything else goes to chardetng.
/// A declared charset that `encoding_rs` does not know is logged and
/// ignored. Bytes that do not decode cleanly under the chosen encoding are
/// an error rather than a page full of replacement characters, since those
/// would end up in posting titles and identities.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding, EncodingSource::ByteOrderMark);
    }

    if let Some(label) = content_type.and_then(charset_param) {
        match Encoding::for_label(label.as_bytes()) {
            Some(enc) => return decode_with(bytes, enc, EncodingSource::ContentType),
            None => watch_warn!("Ignoring unknown page charset {:?}", label),
        }
    }

    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(bytes, UTF_8, EncodingSource::Utf8Body);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc, EncodingSource::Detected)
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (name, value) = part.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(&['"', '\''][..]).to_string())
    })
}

fn decode_with(
    bytes: &[u8],
    enc: &'static Encoding,
    encoding_source: EncodingSource,
) -> Result<DecodedHtml, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: enc.name().to_string(),
            encoding_source,
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
        encoding_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_param_is_case_insensitive_and_unquoted() {
        assert_eq!(
            charset_param("text/html; Charset=\"UTF-8\"").as_deref(),
            Some("UTF-8")
        );
        assert_eq!(charset_param("text/html"), None);
    }

    #[test]
    fn invalid_utf8_under_declared_charset_is_rejected() {
        let err = decode_html(b"<p>\xff\xfe\xfd</p>", Some("text/html; charset=utf-8")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed {
                encoding: "UTF-8".to_string(),
                encoding_source: EncodingSource::ContentType,
            }
        );
        assert!(err.to_string().contains("Content-Type charset"));
    }

    #[test]
    fn undeclared_utf8_body_skips_detection() {
        let decoded = decode_html("<a>Café</a>".as_bytes(), Some("text/html")).unwrap();
        assert_eq!(decoded.encoding_source, EncodingSource::Utf8Body);
        assert_eq!(decoded.html, "<a>Café</a>");
    }

    #[test]
    fn unknown_charset_falls_back_to_the_body() {
        let decoded = decode_html(b"<a>ok</a>", Some("text/html; charset=x-made-up")).unwrap();
        assert_eq!(decoded.encoding_source, EncodingSource::Utf8Body);
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn undeclared_legacy_bytes_are_detected() {
        let decoded = decode_html(
            b"<p>Caf\xe9 Assistant, employ\xe9 de caisse, pr\xe9paration des commandes</p>",
            None,
        )
        .unwrap();
        assert_eq!(decoded.encoding_source, EncodingSource::Detected);
        assert!(decoded.html.contains("Assistant"));
    }

    #[test]
    fn bom_overrides_declared_charset() {
        let decoded =
            decode_html(b"\xEF\xBB\xBF<a>ok</a>", Some("text/html; charset=ISO-8859-1")).unwrap();
        assert_eq!(decoded.encoding_source, EncodingSource::ByteOrderMark);
        assert_eq!(decoded.html, "<a>ok</a>");
    }
}
