//! In-memory store.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::adapter::outbound::store::Document;
use crate::domain::{Holding, LogEntry};
use crate::error::{Error, Result};
use crate::port::Store;

/// [`Store`] kept entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Document>,
    fail_appends: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `append_log` fail.
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }
}

impl Store for MemoryStore {
    fn replace_portfolio(&self, holdings: &[Holding]) -> Result<()> {
        self.document.lock().portfolio = holdings.to_vec();
        Ok(())
    }

    fn append_log(&self, entry: &LogEntry) -> Result<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(Error::Store("append rejected".into()));
        }
        self.document.lock().logs.push(entry.clone());
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
