pub mod lcg;

pub use lcg::Lcg;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Source of randomness consumed by the clustering engine.
///
/// Only [`next_bits`](RandomSource::next_bits) has to be provided; the other
/// draws are derived from it so that any implementation produces the same
/// sequence of decisions for the same stream of bits.
///
/// Every [`rand::RngCore`] is a `RandomSource`, so `ChaCha20Rng`, `StdRng`
/// and the seeded [`Lcg`] can all be handed to the engine.
pub trait RandomSource {
    /// Uniform 64-bit draw.
    fn next_bits(&mut self) -> u64;

    /// Uniform draw in `[0, 1)` built from the top 53 bits of a 64-bit draw.
    fn next_unit(&mut self) -> f64 {
        (self.next_bits() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// Uses a widening multiply with rejection, so there is no modulo bias.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is 0.
    fn next_index(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "cannot draw an index from an empty range");
        let range = bound as u64;
        let zone = (range << range.leading_zeros()).wrapping_sub(1);
        loop {
            let wide = u128::from(self.next_bits()) * u128::from(range);
            let (hi, lo) = ((wide >> 64) as u64, wide as u64);
            if lo <= zone {
                return hi as usize;
            }
        }
    }

    /// Fisher-Yates shuffle in place.
    fn shuffle(&mut self, values: &mut [usize]) {
        for i in (1..values.len()).rev() {
            let j = self.next_index(i + 1);
            values.swap(i, j);
        }
    }

    /// Picks an index with probability proportional to its weight.
    ///
    /// Returns 0 when every weight is zero (or the slice is empty), and the
    /// last index if rounding leaves the cumulative sum short of the draw.
    fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0.0;
        for &w in weights {
            total += w;
            cumulative.push(total);
        }

        let u = self.next_unit();
        if total == 0.0 {
            return 0;
        }
        cumulative
            .iter()
            .position(|&c| c / total > u)
            .unwrap_or(weights.len() - 1)
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_bits(&mut self) -> u64 {
        self.next_u64()
    }
}

/// Non-deterministic source seeded from operating-system entropy.
pub fn entropy() -> ChaCha20Rng {
    ChaCha20Rng::from_entropy()
}
