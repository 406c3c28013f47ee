//! File-backed implementations of the [`Store`] port.
//!
//! - [`DocumentStore`] - a single JSON document with `portfolio` and `logs`
//! - [`JsonLinesStore`] - `portfolio.json` plus an append-only `logs.jsonl`

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::app::config::{StoreConfig, StoreFormat};
use crate::error::Result;
use crate::port::Store;

mod document;
mod jsonl;

pub use document::{Document, DocumentStore};
pub use jsonl::JsonLinesStore;

/// Open the store described by `config`.
pub fn open(config: &StoreConfig) -> Result<Arc<dyn Store>> {
    let path = config.resolved_path();
    let store: Arc<dyn Store> = match config.format {
        StoreFormat::Document => Arc::new(DocumentStore::open(&path)?),
        StoreFormat::Jsonl => Arc::new(JsonLinesStore::open(&path)?),
    };
    Ok(store)
}

/// Replace `path` with `bytes` via write-to-temp-then-rename.
///
/// Creates the parent directory if it doesn't exist.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;

    let cleanup_and_err = |e| {
        let _ = fs::remove_file(&temp_path);
        e
    };

    file.write_all(bytes).map_err(cleanup_and_err)?;
    file.sync_all().map_err(cleanup_and_err)?;
    drop(file);

    fs::rename(&temp_path, path).map_err(cleanup_and_err)?;
    Ok(())
}
