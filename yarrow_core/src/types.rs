//! Core domain types for the yarrow daily hexagram system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Lines (the six binary-with-metastability units of a hexagram)
//! - Casts (a full hexagram plus its derived identifiers)
//! - Daily records and append-only history entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single hexagram line, carrying both polarity and a "changing" flag.
///
/// The raw values follow the traditional three-token toss: the sum of three
/// tokens worth 2 (tails) or 3 (heads) each, landing in 6..=9.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum Line {
    /// 6 — yin, changing
    OldYin,
    /// 7 — yang, stable
    YoungYang,
    /// 8 — yin, stable
    YoungYin,
    /// 9 — yang, changing
    OldYang,
}

impl Line {
    /// The raw toss value (6..=9)
    pub fn value(self) -> u8 {
        match self {
            Line::OldYin => 6,
            Line::YoungYang => 7,
            Line::YoungYin => 8,
            Line::OldYang => 9,
        }
    }

    /// Whether this line is yang (solid)
    pub fn is_yang(self) -> bool {
        matches!(self, Line::YoungYang | Line::OldYang)
    }

    /// Whether this line is changing (old yin / old yang)
    pub fn is_changing(self) -> bool {
        matches!(self, Line::OldYin | Line::OldYang)
    }
}

impl TryFrom<u8> for Line {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            6 => Ok(Line::OldYin),
            7 => Ok(Line::YoungYang),
            8 => Ok(Line::YoungYin),
            9 => Ok(Line::OldYang),
            other => Err(format!("invalid line value {} (expected 6..=9)", other)),
        }
    }
}

impl From<Line> for u8 {
    fn from(line: Line) -> u8 {
        line.value()
    }
}

/// A complete cast: six lines (bottom to top) plus every derived identifier.
///
/// Created once per calendar day and immutable thereafter; only the
/// reveal flag on the surrounding [`DailyRecord`] ever changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cast {
    /// The six lines, index 0 = bottom
    pub lines: [Line; 6],
    /// Canonical King Wen identifier of the cast hexagram (1..=64)
    pub primary: u8,
    /// Present iff at least one line is changing
    pub becoming: Option<u8>,
    /// 1-based positions of changing lines, bottom = 1
    pub changing_positions: Vec<u8>,
    /// Hexagram built from positions [2,3,4,2,3,4] of the original
    pub nuclear: u8,
    /// Hexagram with every polarity inverted
    pub shadow: u8,
    /// Hexagram with the line order reversed
    pub mirror: u8,
    /// Mirror equals primary (vertically symmetric pattern)
    pub self_mirroring: bool,
    /// Mirror equals shadow (reciprocal locked pair)
    pub locked_pair: bool,
}

/// The single mutable slot: today's cast and whether it has been revealed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub cast: Cast,
    pub revealed: bool,
}

/// A write-once archive entry, appended when a record's date rolls over.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub cast: Cast,
}
