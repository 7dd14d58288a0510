//! Persistence for the daily cast store.
//!
//! Two files live under the data directory:
//! - `today.json` — the single current-day slot, overwritten atomically
//!   (temp file + exclusive lock + rename)
//! - `history.jsonl` — append-only archive, one serialized entry per line,
//!   never rewritten or compacted
//!
//! A missing or corrupt slot is treated as "no prior record" and never
//! surfaces as a user-visible error.

use crate::{DailyRecord, Error, HistoryEntry, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File locations for one data directory.
#[derive(Clone, Debug)]
pub struct StorePaths {
    pub current: PathBuf,
    pub history: PathBuf,
}

impl StorePaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            current: dir.join("today.json"),
            history: dir.join("history.jsonl"),
        }
    }
}

/// Load the current-day slot with a shared lock.
///
/// Returns `None` for a missing, unreadable, or unparseable file; each
/// failure mode logs a warning and falls back to the fresh-cast path.
pub fn load_current(path: &Path) -> Option<DailyRecord> {
    if !path.exists() {
        tracing::info!("no current-day slot at {:?}", path);
        return None;
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("unable to open slot {:?}: {}. Treating as absent.", path, e);
            return None;
        }
    };

    if let Err(e) = file.lock_shared() {
        tracing::warn!("unable to lock slot {:?}: {}. Treating as absent.", path, e);
        return None;
    }

    let mut contents = String::new();
    let mut reader = BufReader::new(&file);
    if let Err(e) = reader.read_to_string(&mut contents) {
        let _ = file.unlock();
        tracing::warn!("failed to read slot {:?}: {}. Treating as absent.", path, e);
        return None;
    }
    let _ = file.unlock();

    match serde_json::from_str::<DailyRecord>(&contents) {
        Ok(record) => {
            tracing::debug!("loaded record for {} from {:?}", record.date, path);
            Some(record)
        }
        Err(e) => {
            tracing::warn!("corrupt slot {:?}: {}. Treating as absent.", path, e);
            None
        }
    }
}

/// Save the current-day slot atomically.
///
/// Writes to a locked temp file in the same directory, syncs, then renames
/// over the slot so readers never observe a half-written record.
pub fn save_current(path: &Path, record: &DailyRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "slot path missing parent")
    })?)?;

    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(record)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("saved record for {} to {:?}", record.date, path);
    Ok(())
}

/// Append one archive entry to the history log under an exclusive lock.
pub fn append_history(path: &Path, entry: &HistoryEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;

    let mut writer = std::io::BufWriter::new(&file);
    let line = serde_json::to_string(entry)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    file.unlock()?;

    tracing::debug!("archived cast for {} to {:?}", entry.date, path);
    Ok(())
}

/// Read all archive entries in append order, skipping unparseable lines.
pub fn read_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<HistoryEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("unparseable history line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("read {} history entries from {:?}", entries.len(), path);
    Ok(entries)
}
