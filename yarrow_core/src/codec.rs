//! Hexagram encoding and the King Wen sequence table.
//!
//! A hexagram's 6-bit pattern puts the bottom line in bit 0, with 1 = yang.
//! The mapping from that pattern to the canonical 1..=64 identifier is the
//! traditional King Wen ordering: a historical convention that cannot be
//! derived, only shipped as a literal table and self-checked.

use crate::types::Line;
use once_cell::sync::Lazy;

/// King Wen sequence: index = 6-bit line pattern, value = canonical id.
pub const KING_WEN: [u8; 64] = [
    2, 24, 7, 19, 15, 36, 46, 11, //
    16, 51, 40, 54, 62, 55, 32, 34, //
    8, 3, 29, 60, 39, 63, 48, 5, //
    45, 17, 47, 58, 31, 49, 28, 43, //
    23, 27, 4, 41, 52, 22, 18, 26, //
    35, 21, 64, 38, 56, 30, 50, 14, //
    20, 42, 59, 61, 53, 37, 57, 9, //
    12, 25, 6, 10, 33, 13, 44, 1, //
];

/// Inverse permutation, built once: canonical id -> 6-bit pattern.
static BINARY_OF: Lazy<[u8; 64]> = Lazy::new(|| {
    let mut inverse = [0u8; 64];
    for (binary, &id) in KING_WEN.iter().enumerate() {
        inverse[(id - 1) as usize] = binary as u8;
    }
    inverse
});

/// Encode six lines into their 6-bit pattern (bit 0 = bottom, 1 = yang).
pub fn encode(lines: &[Line; 6]) -> u8 {
    lines
        .iter()
        .enumerate()
        .fold(0u8, |acc, (i, line)| {
            if line.is_yang() {
                acc | (1 << i)
            } else {
                acc
            }
        })
}

/// Map a 6-bit pattern to its canonical King Wen identifier (1..=64).
pub fn to_canonical(binary: u8) -> u8 {
    assert!(binary < 64, "line pattern out of range: {}", binary);
    KING_WEN[binary as usize]
}

/// Map a canonical identifier back to its 6-bit pattern.
pub fn to_binary(id: u8) -> u8 {
    assert!((1..=64).contains(&id), "identifier out of range: {}", id);
    BINARY_OF[(id - 1) as usize]
}

/// Self-check that the table is a true bijection of 0..=63 onto 1..=64.
///
/// Returns a list of human-readable problems; empty means the table is sound.
pub fn verify_table() -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = [false; 64];

    for (binary, &id) in KING_WEN.iter().enumerate() {
        if !(1..=64).contains(&id) {
            errors.push(format!(
                "pattern {:#08b} maps to out-of-range identifier {}",
                binary, id
            ));
            continue;
        }
        if seen[(id - 1) as usize] {
            errors.push(format!("identifier {} appears more than once", id));
        }
        seen[(id - 1) as usize] = true;
    }

    for (i, present) in seen.iter().enumerate() {
        if !present {
            errors.push(format!("identifier {} never appears", i + 1));
        }
    }

    errors
}
