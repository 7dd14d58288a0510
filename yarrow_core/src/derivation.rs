//! Derivation of related hexagrams from a cast's six lines.
//!
//! Four fixed line transformations produce the derived identifiers:
//! - nuclear: new sequence = original 1-based positions [2,3,4,2,3,4]
//! - shadow: every polarity inverted
//! - mirror: line order reversed
//! - becoming: exactly the changing lines flipped (absent when none change)
//!
//! Two edge cases are surfaced as flags rather than silently folded into
//! the generic readings: self-mirroring (mirror == primary, 8 of 64) and
//! locked pairs (mirror == shadow, 8 of 64 in 4 reciprocal pairs).

use crate::codec;
use crate::types::{Cast, Line};

/// Compute a full [`Cast`] from six lines (bottom to top).
///
/// Infallible by construction: the fixed-length array makes a wrong line
/// count unrepresentable, and invalid line values are rejected when a
/// [`Line`] is built.
pub fn derive_cast(lines: [Line; 6]) -> Cast {
    let primary_bin = codec::encode(&lines);
    let primary = codec::to_canonical(primary_bin);

    let nuclear = codec::to_canonical(codec::encode(&nuclear_lines(&lines)));
    let shadow = codec::to_canonical(!primary_bin & 0x3f);
    let mirror = codec::to_canonical(reverse_pattern(primary_bin));

    let changing_positions: Vec<u8> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.is_changing())
        .map(|(i, _)| (i + 1) as u8)
        .collect();

    let becoming = if changing_positions.is_empty() {
        None
    } else {
        let becoming_bin = lines.iter().enumerate().fold(0u8, |acc, (i, line)| {
            let yang = line.is_yang() != line.is_changing();
            if yang {
                acc | (1 << i)
            } else {
                acc
            }
        });
        Some(codec::to_canonical(becoming_bin))
    };

    Cast {
        lines,
        primary,
        becoming,
        changing_positions,
        nuclear,
        shadow,
        mirror,
        self_mirroring: mirror == primary,
        locked_pair: mirror == shadow,
    }
}

/// Shadow-then-mirror of a canonical identifier (the order commutes).
pub fn diagonal(id: u8) -> u8 {
    codec::to_canonical(reverse_pattern(!codec::to_binary(id) & 0x3f))
}

/// The two overlapping inner triples: original positions 2,3,4 twice.
fn nuclear_lines(lines: &[Line; 6]) -> [Line; 6] {
    [lines[1], lines[2], lines[3], lines[1], lines[2], lines[3]]
}

/// Reverse the six line bits (bit 0 swaps with bit 5, etc.).
fn reverse_pattern(binary: u8) -> u8 {
    (0..6).fold(0u8, |acc, i| acc | (((binary >> i) & 1) << (5 - i)))
}
