//! Small deterministic 32-bit generator used for scenario digits.
//!
//! Mulberry32: one `u32` of state, a Weyl increment and an avalanche mix.
//! Not suitable for anything security related; it only needs to be fast,
//! reproducible across platforms, and evenly spread over small digit ranges.

use rand::{RngCore, SeedableRng};

const WEYL_INCREMENT: u32 = 0x6D2B_79F5;

/// Mulberry32 pseudo-random stream.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Start a stream from `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn mix(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.mix()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.mix());
        let hi = u64::from(self.mix());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.mix().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
