//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for different purposes, so
//!   AI choices never perturb deck order
//! - **Explicit Fisher–Yates**: `shuffle` walks from the last index down to 1
//!
//! ```
//! use bartok_engine::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut shuffle = rng.for_context("shuffle");
//! let mut again = GameRng::new(42).for_context("shuffle");
//!
//! assert_eq!(shuffle.index_inclusive(51), again.index_inclusive(51));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform index in `[0, upper]`.
    pub fn index_inclusive(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..=upper)
    }

    /// Draw a fresh seed, e.g. for the next session after a restart.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Fisher–Yates shuffle in place.
    ///
    /// For `i` from the last index down to 1, swaps element `i` with a
    /// uniformly chosen element in `[0, i]`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.index_inclusive(i);
            slice.swap(i, j);
        }
    }

    /// Choose a uniformly random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let i = self.index_inclusive(slice.len() - 1);
        slice.get(i)
    }
}
