use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jobwatch_core::{Identity, SeenSet};
use jobwatch_logging::{watch_debug, watch_info};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("seen state {path:?} could not be read: {source}")]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("seen state {path:?} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("seen state {path:?} could not be written: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Durable seen-set: a pretty-printed JSON array of sorted hex digests.
///
/// A missing file is the normal first-run state and loads as an empty set.
#[derive(Debug, Clone)]
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SeenSet, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                watch_info!("No seen state at {:?}; starting empty", self.path);
                return Ok(SeenSet::new());
            }
            Err(source) => {
                return Err(StoreError::Unreadable {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let entries: Vec<String> =
            serde_json::from_str(&content).map_err(|err| self.corrupt(err.to_string()))?;
        let seen = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Identity::from_hex(entry)
                    .ok_or_else(|| self.corrupt(format!("entry {index} is not a hex digest: {entry:?}")))
            })
            .collect::<Result<SeenSet, _>>()?;

        watch_debug!("Loaded {} seen identities from {:?}", seen.len(), self.path);
        Ok(seen)
    }

    /// Replaces the stored state with `seen`. Equal sets serialize to
    /// identical bytes.
    pub fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        let entries: Vec<&str> = seen.iter().map(Identity::as_str).collect();
        let mut content = serde_json::to_string_pretty(&entries).map_err(|err| StoreError::Write {
            path: self.path.clone(),
            source: io::Error::other(err),
        })?;
        content.push('\n');

        let (dir, filename) = split_target(&self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        AtomicFileWriter::new(dir)
            .write(&filename, &content)
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        watch_info!("Saved {} seen identities to {:?}", seen.len(), self.path);
        Ok(())
    }

    fn corrupt(&self, reason: String) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

fn split_target(path: &Path) -> io::Result<(PathBuf, String)> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "state path has no file name"))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, filename))
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> io::Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(target)
    }
}
