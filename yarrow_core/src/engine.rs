//! Invocation orchestration: load, roll over, reveal, persist.
//!
//! The engine is a pure load → transform → store pipeline. The calendar
//! date and the entropy source come in as explicit arguments so every
//! path is reachable from tests without touching a clock or the OS RNG.

use crate::entropy::Entropy;
use crate::reveal::RevealConfig;
use crate::store::StorePaths;
use crate::types::{DailyRecord, HistoryEntry};
use crate::{caster, derivation, reveal, store, texts, Result};
use chrono::NaiveDate;

/// Run one invocation against the store, returning the emitted line, if any.
///
/// Day rollover: a stored record dated before (or after) `today` is
/// archived to the history log and replaced by a freshly cast record;
/// the fresh record's first reveal fires in the same invocation.
pub fn run_invocation(
    paths: &StorePaths,
    cfg: &RevealConfig,
    entropy: &mut dyn Entropy,
    today: NaiveDate,
) -> Result<Option<String>> {
    let mut record = match store::load_current(&paths.current) {
        Some(record) if record.date == today => record,
        stale => {
            if let Some(old) = stale {
                store::append_history(
                    &paths.history,
                    &HistoryEntry {
                        date: old.date,
                        cast: old.cast,
                    },
                )?;
                tracing::info!("archived cast for {}", old.date);
            }
            let lines = caster::cast_lines(entropy)?;
            let cast = derivation::derive_cast(lines);
            tracing::info!(primary = cast.primary, "fresh cast for {}", today);
            DailyRecord {
                date: today,
                cast,
                revealed: false,
            }
        }
    };

    let reading = reveal::schedule(&record, cfg, entropy)?;
    if !record.revealed {
        record.revealed = true;
    }

    store::save_current(&paths.current, &record)?;

    Ok(reading.map(|r| texts::render(&record.cast, &r)))
}
