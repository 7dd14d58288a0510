//! Per-day progressive reveal scheduling.
//!
//! A day's record starts `Fresh`; the first invocation always emits the
//! primary reading in the big-image style and moves it to `Revealed`.
//! Every later invocation that day draws one uniform value and looks it
//! up in a cumulative partition of [0,1): a data table, so retuning the
//! probabilities never touches control flow.

use crate::entropy::Entropy;
use crate::types::DailyRecord;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Commentary styles. `Image` (the "big image") is the style of every
/// first-of-the-day reveal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Image,
    Judgment,
    Movement,
    Counsel,
    Omen,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Image,
        Style::Judgment,
        Style::Movement,
        Style::Counsel,
        Style::Omen,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Style::Image => "the image says",
            Style::Judgment => "the judgment says",
            Style::Movement => "the moving lines say",
            Style::Counsel => "the counsel says",
            Style::Omen => "the omen says",
        }
    }
}

/// What kind of reading an invocation emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadingKind {
    Primary,
    Nuclear,
    Shadow,
    Mirror,
    /// Mirror band landed on a self-mirroring cast: the reading carries the
    /// primary's own text under a distinguishing label.
    SelfMirror,
    Becoming,
}

/// A scheduled reading, rendered to text by [`crate::texts::render`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    pub kind: ReadingKind,
    pub id: u8,
    pub style: Style,
}

/// One band of the reveal partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Style(u8),
    Nuclear,
    Shadow,
    Mirror,
    Becoming,
    Silent,
}

/// Reveal probability configuration.
///
/// Defaults: 5 style bands at 4% (20% total) + 4 derived bands at 2.5%
/// (10% total) = 30% chance of any output, 70% silent.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_style_band")]
    pub style_band: f64,

    #[serde(default = "default_derived_band")]
    pub derived_band: f64,
}

fn default_style_band() -> f64 {
    0.04
}

fn default_derived_band() -> f64 {
    0.025
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            style_band: default_style_band(),
            derived_band: default_derived_band(),
        }
    }
}

impl RevealConfig {
    /// Reject partitions that are negative or spill past 1.0.
    pub fn validate(&self) -> crate::Result<()> {
        if self.style_band < 0.0 || self.derived_band < 0.0 {
            return Err(crate::Error::Config(
                "reveal bands must be non-negative".into(),
            ));
        }
        let total = 5.0 * self.style_band + 4.0 * self.derived_band;
        if total > 1.0 {
            return Err(crate::Error::Config(format!(
                "reveal bands sum to {} (> 1.0)",
                total
            )));
        }
        Ok(())
    }

    /// The ordered cumulative partition of [0,1). Anything past the last
    /// threshold is silence.
    pub fn partition(&self) -> Vec<(f64, Band)> {
        let mut bands = Vec::with_capacity(9);
        let mut edge = 0.0;
        for i in 0..Style::ALL.len() {
            edge += self.style_band;
            bands.push((edge, Band::Style(i as u8)));
        }
        for derived in [Band::Nuclear, Band::Shadow, Band::Mirror, Band::Becoming] {
            edge += self.derived_band;
            bands.push((edge, derived));
        }
        bands
    }
}

/// Draw one band from the partition with a single uniform value.
pub fn draw_band(cfg: &RevealConfig, entropy: &mut dyn Entropy) -> Result<Band> {
    let u = entropy.unit()?;
    for (threshold, band) in cfg.partition() {
        if u < threshold {
            return Ok(band);
        }
    }
    Ok(Band::Silent)
}

/// Pick a commentary style uniformly via rejection sampling (5 does not
/// divide 256, so a plain modulo would bias toward the low styles).
pub fn pick_style(entropy: &mut dyn Entropy) -> Result<Style> {
    let i = entropy.uniform(Style::ALL.len() as u8)?;
    Ok(Style::ALL[i as usize])
}

/// Decide what this invocation reveals, if anything.
///
/// Does not mutate the record; the caller flips `revealed` and persists.
pub fn schedule(
    record: &DailyRecord,
    cfg: &RevealConfig,
    entropy: &mut dyn Entropy,
) -> Result<Option<Reading>> {
    let cast = &record.cast;

    if !record.revealed {
        tracing::info!(primary = cast.primary, "first reveal of the day");
        return Ok(Some(Reading {
            kind: ReadingKind::Primary,
            id: cast.primary,
            style: Style::Image,
        }));
    }

    let band = draw_band(cfg, entropy)?;
    tracing::debug!(?band, "reveal draw");

    let reading = match band {
        Band::Silent => None,
        Band::Style(i) => Some(Reading {
            kind: ReadingKind::Primary,
            id: cast.primary,
            style: Style::ALL[i as usize],
        }),
        Band::Nuclear => Some(Reading {
            kind: ReadingKind::Nuclear,
            id: cast.nuclear,
            style: pick_style(entropy)?,
        }),
        Band::Shadow => Some(Reading {
            kind: ReadingKind::Shadow,
            id: cast.shadow,
            style: pick_style(entropy)?,
        }),
        Band::Mirror => {
            let style = pick_style(entropy)?;
            if cast.self_mirroring {
                // "mirror of X" literally is X; say so instead of
                // pretending a distinct reading exists
                Some(Reading {
                    kind: ReadingKind::SelfMirror,
                    id: cast.primary,
                    style,
                })
            } else {
                Some(Reading {
                    kind: ReadingKind::Mirror,
                    id: cast.mirror,
                    style,
                })
            }
        }
        Band::Becoming => match cast.becoming {
            Some(id) => Some(Reading {
                kind: ReadingKind::Becoming,
                id,
                style: pick_style(entropy)?,
            }),
            // the draw landed in the becoming band but nothing is changing
            None => None,
        },
    };

    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::derive_cast;
    use crate::types::Line;
    use chrono::NaiveDate;

    struct Tape {
        data: Vec<u8>,
        pos: usize,
    }

    impl Entropy for Tape {
        fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
            for b in buf.iter_mut() {
                *b = self.data[self.pos % self.data.len()];
                self.pos += 1;
            }
            Ok(())
        }
    }

    fn record(lines: [Line; 6], revealed: bool) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
            cast: derive_cast(lines),
            revealed,
        }
    }

    /// Bytes that make `unit()` land just inside the band starting at `lo`.
    /// The nudge clears float rounding in the cumulative thresholds while
    /// staying far below the narrowest band width.
    fn bytes_for_unit(lo: f64) -> Vec<u8> {
        let mantissa = ((lo + 1e-9) * (1u64 << 53) as f64) as u64;
        (mantissa << 11).to_le_bytes().to_vec()
    }

    #[test]
    fn test_fresh_record_always_reveals_primary_big_image() {
        let rec = record([Line::YoungYang; 6], false);
        // no entropy should be consumed at all
        let mut tape = Tape { data: vec![0], pos: 0 };
        let reading = schedule(&rec, &RevealConfig::default(), &mut tape)
            .unwrap()
            .unwrap();
        assert_eq!(reading.kind, ReadingKind::Primary);
        assert_eq!(reading.id, 1);
        assert_eq!(reading.style, Style::Image);
        assert_eq!(tape.pos, 0);
    }

    #[test]
    fn test_revealed_record_high_draw_is_silent() {
        let rec = record([Line::YoungYang; 6], true);
        let mut tape = Tape { data: vec![0xFF], pos: 0 };
        let reading = schedule(&rec, &RevealConfig::default(), &mut tape).unwrap();
        assert!(reading.is_none());
    }

    #[test]
    fn test_style_bands_select_each_style() {
        let cfg = RevealConfig::default();
        for (i, style) in Style::ALL.iter().enumerate() {
            let rec = record([Line::YoungYang; 6], true);
            let mut tape = Tape {
                data: bytes_for_unit(i as f64 * cfg.style_band),
                pos: 0,
            };
            let reading = schedule(&rec, &cfg, &mut tape).unwrap().unwrap();
            assert_eq!(reading.kind, ReadingKind::Primary);
            assert_eq!(reading.style, *style);
        }
    }

    #[test]
    fn test_derived_bands_use_derived_identifiers() {
        let cfg = RevealConfig::default();
        // Peace (11): nuclear 58, shadow == mirror == 12
        let lines = [
            Line::YoungYang,
            Line::YoungYang,
            Line::YoungYang,
            Line::YoungYin,
            Line::YoungYin,
            Line::YoungYin,
        ];

        let rec = record(lines, true);
        let mut bytes = bytes_for_unit(5.0 * cfg.style_band);
        bytes.push(0); // style draw for the derived reading
        let mut tape = Tape { data: bytes, pos: 0 };
        let reading = schedule(&rec, &cfg, &mut tape).unwrap().unwrap();
        assert_eq!(reading.kind, ReadingKind::Nuclear);
        assert_eq!(reading.id, rec.cast.nuclear);

        let mut bytes = bytes_for_unit(5.0 * cfg.style_band + cfg.derived_band);
        bytes.push(0);
        let mut tape = Tape { data: bytes, pos: 0 };
        let reading = schedule(&rec, &cfg, &mut tape).unwrap().unwrap();
        assert_eq!(reading.kind, ReadingKind::Shadow);
        assert_eq!(reading.id, 12);
    }

    #[test]
    fn test_self_mirroring_mirror_band_reads_primary() {
        let cfg = RevealConfig::default();
        // all-yang is vertically symmetric
        let rec = record([Line::YoungYang; 6], true);
        assert!(rec.cast.self_mirroring);

        let mut bytes = bytes_for_unit(5.0 * cfg.style_band + 2.0 * cfg.derived_band);
        bytes.push(0);
        let mut tape = Tape { data: bytes, pos: 0 };
        let reading = schedule(&rec, &cfg, &mut tape).unwrap().unwrap();
        assert_eq!(reading.kind, ReadingKind::SelfMirror);
        assert_eq!(reading.id, rec.cast.primary);
    }

    #[test]
    fn test_becoming_band_without_becoming_is_silent() {
        let cfg = RevealConfig::default();
        let rec = record([Line::YoungYang; 6], true);
        assert!(rec.cast.becoming.is_none());

        let mut tape = Tape {
            data: bytes_for_unit(5.0 * cfg.style_band + 3.0 * cfg.derived_band),
            pos: 0,
        };
        let reading = schedule(&rec, &cfg, &mut tape).unwrap();
        assert!(reading.is_none());
    }

    #[test]
    fn test_becoming_band_with_becoming() {
        let cfg = RevealConfig::default();
        let mut lines = [Line::YoungYang; 6];
        lines[0] = Line::OldYang;
        let rec = record(lines, true);
        let expected = rec.cast.becoming.unwrap();

        let mut bytes = bytes_for_unit(5.0 * cfg.style_band + 3.0 * cfg.derived_band);
        bytes.push(0);
        let mut tape = Tape { data: bytes, pos: 0 };
        let reading = schedule(&rec, &cfg, &mut tape).unwrap().unwrap();
        assert_eq!(reading.kind, ReadingKind::Becoming);
        assert_eq!(reading.id, expected);
    }

    #[test]
    fn test_pick_style_uniform_over_scripted_tape() {
        let mut tape = Tape {
            data: (0u8..255).collect(),
            pos: 0,
        };
        let mut counts = [0usize; 5];
        for _ in 0..255 {
            let style = pick_style(&mut tape).unwrap();
            let idx = Style::ALL.iter().position(|s| *s == style).unwrap();
            counts[idx] += 1;
        }
        assert_eq!(counts, [51; 5]);
    }

    #[test]
    fn test_partition_is_ordered_and_bounded() {
        let cfg = RevealConfig::default();
        cfg.validate().unwrap();
        let partition = cfg.partition();
        assert_eq!(partition.len(), 9);
        let mut last = 0.0;
        for (threshold, _) in &partition {
            assert!(*threshold > last);
            last = *threshold;
        }
        assert!((last - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_overfull_partition() {
        let cfg = RevealConfig {
            style_band: 0.2,
            derived_band: 0.2,
        };
        assert!(cfg.validate().is_err());
    }
}
