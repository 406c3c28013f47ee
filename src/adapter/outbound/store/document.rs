//! Single-document JSON store.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::write_atomic;
use crate::domain::{Holding, LogEntry};
use crate::error::{Error, Result};
use crate::port::Store;

/// On-disk layout: `{"portfolio": [...], "logs": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub portfolio: Vec<Holding>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// Store that rewrites one JSON document on every mutation.
///
/// The document is cached in memory; each write replaces the file
/// atomically. A failed write rolls the cache back so memory and disk agree.
pub struct DocumentStore {
    path: PathBuf,
    document: Mutex<Document>,
}

impl DocumentStore {
    /// Open `path`, creating it with empty defaults if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = Self::read(&path)?;

        let store = Self {
            path,
            document: Mutex::new(document),
        };
        store.flush(&store.document.lock())?;

        debug!(path = %store.path.display(), "Opened document store");
        Ok(store)
    }

    fn read(path: &Path) -> Result<Document> {
        if !path.exists() {
            return Ok(Document::default());
        }
        let bytes = fs::read(path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::default());
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Store(format!("{}: {e}", path.display())))
    }

    fn flush(&self, document: &Document) -> Result<()> {
        let json = serde_json::to_vec_pretty(document)?;
        write_atomic(&self.path, &json)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for DocumentStore {
    fn replace_portfolio(&self, holdings: &[Holding]) -> Result<()> {
        let mut document = self.document.lock();
        let previous = std::mem::replace(&mut document.portfolio, holdings.to_vec());
        if let Err(e) = self.flush(&document) {
            document.portfolio = previous;
            return Err(e);
        }
        Ok(())
    }

    fn append_log(&self, entry: &LogEntry) -> Result<()> {
        let mut document = self.document.lock();
        document.logs.push(entry.clone());
        if let Err(e) = self.flush(&document) {
            document.logs.pop();
            return Err(e);
        }
        Ok(())
    }

    fn last_log(&self) -> Result<Option<LogEntry>> {
        Ok(self.document.lock().logs.last().cloned())
    }

    fn portfolio(&self) -> Result<Vec<Holding>> {
        Ok(self.document.lock().portfolio.clone())
    }

    fn logs(&self) -> Result<Vec<LogEntry>> {
        Ok(self.document.lock().logs.clone())
    }
}
