//! Seeded random stream shared by maze generation, spawning and agent policy.
//! Every random draw in a match goes through one `ArenaRng` so a seed replays the whole run.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::config::SecondsRange;

pub struct ArenaRng {
    inner: ChaCha8Rng,
}

impl ArenaRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform draw in `[0, 1)` with 24 bits of precision.
    pub fn unit(&mut self) -> f32 {
        (self.inner.next_u32() >> 8) as f32 / (1_u32 << 24) as f32
    }

    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.unit()
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        min + (self.inner.next_u64() % span) as i32
    }

    pub fn seconds(&mut self, range: SecondsRange) -> f32 {
        self.range_f32(range.min, range.max)
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.unit() < probability
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = (self.inner.next_u64() % items.len() as u64) as usize;
        Some(items[index])
    }
}
