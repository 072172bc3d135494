use std::fmt;

use thiserror::Error;

use crate::{ConfigError, DecodeError, ExtractError, FetchError, NotifyError, StoreError};

/// Failure classes a caller can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    StateCorruption,
    Parse,
    Persistence,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration error"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::StateCorruption => write!(f, "state corruption"),
            ErrorKind::Parse => write!(f, "parse error"),
            ErrorKind::Persistence => write!(f, "persistence error"),
        }
    }
}

/// A fatal error that ended a run, tagged with the step it happened in.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("loading seen state: {0}")]
    Load(#[source] StoreError),
    #[error("fetching {url}: {source}")]
    Fetch { url: String, source: FetchError },
    #[error("decoding page: {0}")]
    Decode(#[from] DecodeError),
    #[error("extracting postings: {0}")]
    Extract(#[from] ExtractError),
    #[error("sending notification: {0}")]
    Notify(#[from] NotifyError),
    #[error("saving seen state: {0}")]
    Save(#[source] StoreError),
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Configuration(_) => ErrorKind::Configuration,
            RunError::Load(_) => ErrorKind::StateCorruption,
            RunError::Fetch { .. } | RunError::Notify(_) => ErrorKind::Transport,
            RunError::Decode(_) | RunError::Extract(_) => ErrorKind::Parse,
            RunError::Save(_) => ErrorKind::Persistence,
        }
    }
}
