//! Line casting via the simulated three-token toss.
//!
//! Each line is the sum of three independent fair tokens worth 2 (tails)
//! or 3 (heads), which lands in {6,7,8,9} with probabilities
//! {1/8, 3/8, 3/8, 1/8} by construction. The binomial construction itself
//! is the contract; do not replace it with a weighted table.

use crate::entropy::Entropy;
use crate::types::Line;
use crate::{Error, Result};

/// Cast a single line from three independent token tosses.
pub fn cast_line(entropy: &mut dyn Entropy) -> Result<Line> {
    let mut value = 0u8;
    for _ in 0..3 {
        value += if entropy.bit()? { 3 } else { 2 };
    }
    Line::try_from(value).map_err(Error::Cast)
}

/// Cast six lines in order, bottom (index 0) to top.
pub fn cast_lines(entropy: &mut dyn Entropy) -> Result<[Line; 6]> {
    let mut lines = [Line::YoungYin; 6];
    for slot in lines.iter_mut() {
        *slot = cast_line(entropy)?;
    }
    Ok(lines)
}
