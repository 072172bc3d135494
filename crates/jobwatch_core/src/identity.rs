use std::fmt;

use sha2::{Digest, Sha256};

/// Separates title and link in the hashed input. HTML parsing never yields
/// NUL in text or attribute values, so no (title, link) pair can shift bytes
/// across the boundary.
const FIELD_SEPARATOR: u8 = 0x00;

/// Content-derived key of a posting: lowercase hex SHA-256 of its title and link.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(String);

impl Identity {
    /// Accepts a previously rendered digest. Rejects anything that is not a
    /// non-empty, even-length, lowercase hex string.
    pub fn from_hex(value: &str) -> Option<Self> {
        let well_formed = !value.is_empty()
            && value.len() % 2 == 0
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identity for a posting. Callers pass already normalized fields.
pub fn identity(title: &str, link: &str) -> Identity {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update([FIELD_SEPARATOR]);
    hasher.update(link.as_bytes());
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    Identity(hex)
}
