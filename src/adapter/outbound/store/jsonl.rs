//! Append-only JSON-lines store.
//!
//! Layout under the store directory:
//! - `portfolio.json` - latest holdings, replaced atomically
//! - `logs.jsonl` - one [`LogEntry`] per line, only ever appended to
//!
//! Appending costs one line regardless of history length. A trailing line that
//! fails to parse is treated as a torn write: [`JsonLinesStore::open`] cuts the
//! file back to the end of the last complete entry before anything is appended.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::write_atomic;
use crate::domain::{Holding, LogEntry};
use crate::error::{Error, Result};
use crate::port::Store;

const PORTFOLIO_FILE: &str = "portfolio.json";
const LOGS_FILE: &str = "logs.jsonl";

pub struct JsonLinesStore {
    portfolio_path: PathBuf,
    logs_path: PathBuf,
    /// Cached tail of the log; also serializes appends.
    last: Mutex<Option<LogEntry>>,
}

impl JsonLinesStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let logs_path = dir.join(LOGS_FILE);
        let scan = scan_logs(&logs_path)?;
        repair_tail(&logs_path, &scan)?;
        let last = scan.entries.last().cloned();

        debug!(dir = %dir.display(), "Opened JSON-lines store");
        Ok(Self {
            portfolio_path: dir.join(PORTFOLIO_FILE),
            logs_path,
            last: Mutex::new(last),
        })
    }
}

impl Store for JsonLinesStore {
    fn replace_portfolio(&self, holdings: &[Holding]) -> Result<()> {
        let json = serde_json::to_vec_pretty(holdings)?;
        write_atomic(&self.portfolio_path, &json)
    }

    fn append_log(&self, entry: &LogEntry) -> Result<()> {
        let mut last = self.last.lock();

        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.logs_path)?;
        let len = file.metadata()?.len();
        if let Err(e) = file.write_all(&line).and_then(|()| file.sync_data()) {
            // Drop whatever part of the line made it to disk.
            let _ = file.set_len(len);
            return Err(e.into());
        }

        *last = Some(entry.clone());
        Ok(())
    }

    fn last_log(&self) -> Result<Option<LogEntry>> {
        Ok(self.last.lock().clone())
    }

    fn portfolio(&self) -> Result<Vec<Holding>> {
        if !self.portfolio_path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.portfolio_path)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Store(format!("{}: {e}", self.portfolio_path.display())))
    }

    fn logs(&self) -> Result<Vec<LogEntry>> {
        let _guard = self.last.lock();
        Ok(scan_logs(&self.logs_path)?.entries)
    }
}

/// Parsed log file.
#[derive(Debug, Default)]
struct LogScan {
    entries: Vec<LogEntry>,
    /// Byte length of the file up to and including the last complete entry.
    valid_len: u64,
    /// Whether the last complete entry is missing its newline.
    unterminated: bool,
    /// Whether anything follows the last complete entry.
    torn: bool,
}

fn scan_logs(path: &Path) -> Result<LogScan> {
    if !path.exists() {
        return Ok(LogScan::default());
    }

    let bytes = fs::read(path)?;
    let mut lines = Vec::new();
    let mut offset = 0;
    for (number, line) in bytes.split(|b| *b == b'\n').enumerate() {
        let end = offset + line.len();
        if !line.iter().all(u8::is_ascii_whitespace) {
            lines.push((number, line, end));
        }
        offset = end + 1;
    }

    let mut scan = LogScan::default();
    let count = lines.len();
    for (position, (number, line, end)) in lines.into_iter().enumerate() {
        match serde_json::from_slice::<LogEntry>(line) {
            Ok(entry) => {
                scan.entries.push(entry);
                scan.unterminated = end == bytes.len();
                scan.valid_len = (end + usize::from(!scan.unterminated)) as u64;
            }
            Err(e) if position + 1 == count => {
                warn!(line = number + 1, error = %e, "Ignoring torn trailing log line");
                scan.torn = true;
            }
            Err(e) => {
                return Err(Error::Store(format!(
                    "{} line {}: {e}",
                    path.display(),
                    number + 1
                )));
            }
        }
    }
    Ok(scan)
}

/// Truncate a torn tail, or terminate an unterminated last entry, so the next
/// append starts on a fresh line.
fn repair_tail(path: &Path, scan: &LogScan) -> Result<()> {
    if scan.torn {
        let file = OpenOptions::new().write(true).open(path)?;
        file.set_len(scan.valid_len)?;
        file.sync_data()?;
        warn!(path = %path.display(), len = scan.valid_len, "Truncated torn log tail");
    } else if scan.unterminated {
        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(b"\n")?;
        file.sync_data()?;
    }
    Ok(())
}
