//! Persistence port for the portfolio snapshot and valuation log.

use crate::domain::{Holding, LogEntry};
use crate::error::Result;

/// Storage for the latest holdings and the append-only valuation log.
///
/// Calls are synchronous and may block on disk I/O; async callers run them
/// on the blocking pool. Implementations must never leave a partially written
/// log entry behind.
pub trait Store: Send + Sync {
    /// Replace the stored portfolio snapshot.
    fn replace_portfolio(&self, holdings: &[Holding]) -> Result<()>;

    /// Append one entry to the log.
    fn append_log(&self, entry: &LogEntry) -> Result<()>;

    /// The most recently appended entry, if any.
    fn last_log(&self) -> Result<Option<LogEntry>>;

    /// The stored portfolio snapshot.
    fn portfolio(&self) -> Result<Vec<Holding>>;

    /// Every log entry, oldest first.
    fn logs(&self) -> Result<Vec<LogEntry>>;
}
