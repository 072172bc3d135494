//! Process-level settings that sit outside the engine: logging only.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::LevelFilter;

pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_FILE_VAR: &str = "LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let level = match lookup(LOG_LEVEL_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => LevelFilter::from_str(raw.trim())
                .map_err(|_| anyhow!("{LOG_LEVEL_VAR}={raw:?} is not a log level"))?,
            None => LevelFilter::Info,
        };
        let file = lookup(LOG_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self { level, file })
    }
}
