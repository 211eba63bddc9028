//! Seedable random stream behind every randomized decision in the core.
//!
//! Everything draws from `GameRng` rather than thread-local randomness, so a
//! run seed fully determines mazes, placements, and obstacle behaviour.

use std::fmt;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Clone)]
pub struct GameRng(ChaCha8Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    /// Uniform-ish value in `0..bound`.
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "below() needs a non-empty range");
        (self.next_u64() % bound as u64) as usize
    }

    pub fn range_inclusive(&mut self, min_value: u64, max_value: u64) -> u64 {
        debug_assert!(min_value <= max_value);
        let span = max_value - min_value;
        if span == u64::MAX {
            return self.next_u64();
        }
        min_value + self.next_u64() % (span + 1)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn unit_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }

    pub fn range_f32(&mut self, min_value: f32, max_value: f32) -> f32 {
        min_value + (max_value - min_value) * self.unit_f64() as f32
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit_f64() < probability
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.below(items.len());
        items.get(index)
    }

    /// Fisher-Yates.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for upper in (1..items.len()).rev() {
            let swap_with = self.below(upper + 1);
            items.swap(upper, swap_with);
        }
    }
}

impl fmt::Debug for GameRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameRng").finish_non_exhaustive()
    }
}

/// Per-level seed so any level can be regenerated without replaying earlier ones.
pub fn derive_level_seed(run_seed: u64, level: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(level).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
