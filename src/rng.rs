//! Thread-safe uniform integer source over `[0, 100)` for the workers' probabilistic
//! branching (paint selection, QC pass/fail).
//!
//! Grounded in `original_source/console_utils.c`'s `thread_safe_rand` (a mutex around libc
//! `rand()`) — same discipline, `rand::rngs::StdRng` behind a [`Mutex`] instead of a raw
//! generator.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct UniformRng {
    inner: Mutex<StdRng>,
}

impl UniformRng {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Mutex::new(StdRng::from_entropy()) }
    }

    /// Draws a uniform integer in `[0, 100)`.
    pub fn uniform_0_100(&self) -> u8 {
        self.inner.lock().expect("rng mutex poisoned").gen_range(0..100)
    }
}

impl Default for UniformRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let rng = UniformRng::new();
        for _ in 0..1000 {
            assert!(rng.uniform_0_100() < 100);
        }
    }
}
