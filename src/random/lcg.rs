use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 1_664_525;
const INCREMENT: u64 = 1_013_904_332;
const MASK_32: u64 = 0xFFFF_FFFF;

/// Deterministic seeded generator for reproducible runs.
///
/// Each 64-bit draw chains two 32-bit linear congruential steps
/// `v -> (1664525 * v + 1013904332) mod 2^32`; the first result fills the low
/// word and the second the high word. The state kept for the next draw is the
/// second result reduced modulo `2^32 - 1`, which keeps sequences identical to
/// historical runs.
///
/// This generator is NOT cryptographically secure and has a short period. Use
/// it for repeatable experiments and tests only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Generator whose state starts at `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current 32-bit state; the next draw starts from it.
    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(v: u64) -> u64 {
        (MULTIPLIER * v + INCREMENT) & MASK_32
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let w1 = Self::step(u64::from(self.state));
        let w2 = Self::step(w1);
        self.state = (w2 % MASK_32) as u32;
        w1 ^ (w2 << 32)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
