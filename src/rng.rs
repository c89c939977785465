//! Internal random number generator based on PCG32.
//!
//! Sequence generation is the only source of randomness in the crate, and it
//! runs through this one seedable generator so that whole games are
//! reproducible from a single seed (see
//! [`SequencerBuilder::with_seed`](crate::SequencerBuilder::with_seed)).
//! Carrying a small PCG32 implementation instead of the `rand` crate keeps
//! the dependency tree flat; the generator is statistically solid for game
//! use but NOT cryptographically secure.
//!
//! Reference: <https://www.pcg-random.org/>

use std::sync::atomic::{AtomicU64, Ordering};
use web_time::SystemTime;

// Standard constants from the PCG paper (PCG-XSH-RR, 64-bit state).
const PCG_MULTIPLIER: u64 = 6364136223846793005;
const PCG_DEFAULT_INCREMENT: u64 = 1442695040888963407;

/// PCG32 random number generator (PCG-XSH-RR variant, 64-bit state,
/// 32-bit output, period 2^64).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Creates a generator from a seed and a stream selector.
    ///
    /// Different streams produce statistically independent sequences even
    /// for the same seed. The increment derived from the stream is forced
    /// odd, as the algorithm requires.
    #[must_use]
    pub const fn new(seed: u64, stream: u64) -> Self {
        let inc = (stream << 1) | 1;
        // Standard PCG seeding: step once from zero state, mix in the seed,
        // step again.
        let mut state = inc.wrapping_add(seed);
        state = state.wrapping_mul(PCG_MULTIPLIER).wrapping_add(inc);
        Self { state, inc }
    }

    /// Creates a generator on the default stream from a 64-bit seed.
    ///
    /// The same seed always yields the same sequence of values.
    #[must_use]
    pub const fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed, PCG_DEFAULT_INCREMENT)
    }

    /// Creates a generator seeded from system time and a process-wide
    /// counter. Sufficient entropy for a game, nothing more.
    #[must_use]
    pub fn from_entropy() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let salt = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::seed_from_u64(nanos ^ salt.rotate_left(32))
    }

    /// Generates the next 32-bit value.
    #[inline]
    #[must_use]
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old.wrapping_mul(PCG_MULTIPLIER).wrapping_add(self.inc);
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generates a uniform value in `[low, high)`.
    ///
    /// Uses rejection sampling to avoid modulo bias. Returns `low` when the
    /// range is empty.
    #[must_use]
    pub fn gen_range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = high - low;
        // Reject values in the biased tail of the u32 domain.
        let zone = u32::MAX - u32::MAX % span;
        loop {
            let value = self.next_u32();
            if value < zone {
                return low + value % span;
            }
        }
    }

    /// Generates a uniform value in `[low, high]` (both inclusive).
    #[must_use]
    pub fn gen_range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        if low == 0 && high == u32::MAX {
            return self.next_u32();
        }
        self.gen_range(low, high + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Pcg32::seed_from_u64(1);
        let mut b = Pcg32::seed_from_u64(2);
        let diverged = (0..10).any(|_| a.next_u32() != b.next_u32());
        assert!(diverged);
    }

    #[test]
    fn different_streams_diverge() {
        let mut a = Pcg32::new(42, 1);
        let mut b = Pcg32::new(42, 2);
        let diverged = (0..10).any(|_| a.next_u32() != b.next_u32());
        assert!(diverged);
    }

    #[test]
    fn gen_range_stays_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..10_000 {
            let value = rng.gen_range(3, 9);
            assert!((3..9).contains(&value));
        }
    }

    #[test]
    fn gen_range_inclusive_hits_both_ends() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 2];
        for _ in 0..1_000 {
            match rng.gen_range_inclusive(3, 4) {
                3 => seen[0] = true,
                4 => seen[1] = true,
                other => panic!("out of range: {other}"),
            }
        }
        assert!(seen[0] && seen[1]);
    }

    #[test]
    fn empty_range_returns_low() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(rng.gen_range(5, 5), 5);
        assert_eq!(rng.gen_range_inclusive(5, 5), 5);
    }

    #[test]
    fn small_ranges_cover_all_values() {
        let mut rng = Pcg32::seed_from_u64(123);
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            seen[rng.gen_range(0, 4) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn entropy_seeds_differ() {
        let a = Pcg32::from_entropy();
        let b = Pcg32::from_entropy();
        // The process counter alone guarantees distinct seeds.
        assert_ne!(a, b);
    }
}
