//! Entropy sourcing for casting and reveal draws.
//!
//! All randomness flows through the [`Entropy`] trait so the engine stays
//! deterministic under test. The only production implementation wraps the
//! OS CSPRNG; a failing platform entropy call is fatal to the invocation
//! and is propagated, never replaced with a pseudo-random fallback.

use crate::{Error, Result};

/// Source of cryptographically strong random bytes.
pub trait Entropy {
    /// Fill `buf` with random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Draw a single random byte.
    fn byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    /// Draw a single fair bit.
    fn bit(&mut self) -> Result<bool> {
        Ok(self.byte()? & 1 == 1)
    }

    /// Draw a uniform `f64` in `[0, 1)` from 53 random mantissa bits.
    fn unit(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        let mantissa = u64::from_le_bytes(buf) >> 11;
        Ok(mantissa as f64 / (1u64 << 53) as f64)
    }

    /// Draw a uniform value in `0..n` via rejection sampling.
    ///
    /// Bytes at or above `256 - (256 % n)` are discarded, so the final
    /// modulo cannot bias the distribution when `n` does not divide 256.
    fn uniform(&mut self, n: u8) -> Result<u8> {
        debug_assert!(n > 0, "uniform draw over an empty set");
        let limit = 256u16 - (256u16 % n as u16);
        loop {
            let b = self.byte()? as u16;
            if b < limit {
                return Ok((b % n as u16) as u8);
            }
        }
    }
}

/// OS CSPRNG entropy source.
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        getrandom::fill(buf).map_err(|e| Error::Entropy(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed byte sequence, cycling when exhausted.
    struct Tape {
        data: Vec<u8>,
        pos: usize,
    }

    impl Tape {
        fn new(data: Vec<u8>) -> Self {
            Self { data, pos: 0 }
        }
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

    #[test]
    fn test_uniform_exact_counts_over_accepted_range() {
        // 0..255 contains no rejected byte for n=5 (limit is 255)
        let mut tape = Tape::new((0u8..255).collect());
        let mut counts = [0usize; 5];
        for _ in 0..255 {
            let v = tape.uniform(5).unwrap();
            assert!(v < 5);
            counts[v as usize] += 1;
        }
        assert_eq!(counts, [51; 5]);
    }

    #[test]
    fn test_uniform_rejects_biasing_bytes() {
        // 255 >= limit for n=5, so it must be skipped; 7 % 5 == 2
        let mut tape = Tape::new(vec![255, 7]);
        assert_eq!(tape.uniform(5).unwrap(), 2);
    }

    #[test]
    fn test_uniform_accepts_full_range_for_powers_of_two() {
        // n=4 divides 256: no byte is ever rejected
        let mut tape = Tape::new(vec![255]);
        assert_eq!(tape.uniform(4).unwrap(), 3);
    }

    #[test]
    fn test_unit_range() {
        let mut tape = Tape::new(vec![0xFF]);
        let hi = tape.unit().unwrap();
        assert!(hi < 1.0);
        let mut tape = Tape::new(vec![0x00]);
        assert_eq!(tape.unit().unwrap(), 0.0);
    }

    #[test]
    fn test_os_entropy_fills() {
        let mut entropy = OsEntropy;
        let mut buf = [0u8; 32];
        entropy.fill(&mut buf).unwrap();
        // 32 zero bytes from a working CSPRNG is a 2^-256 event
        assert!(buf.iter().any(|&b| b != 0));
    }
}
