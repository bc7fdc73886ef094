//! Seedable session randomness.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical shuffles and rolls
//! - **Explicit shuffle**: Fisher-Yates from the last index down to index 1
//!
//! ```
//! use tabletop_sync::core::SessionRng;
//!
//! let mut a = SessionRng::new(7);
//! let mut b = SessionRng::new(7);
//!
//! let mut left = vec![1, 2, 3, 4, 5];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Session RNG backed by ChaCha8.
///
/// Every shuffle and server-side roll in a session draws from one instance,
/// owned by the session aggregate.
#[derive(Clone, Debug)]
pub struct SessionRng {
    inner: ChaCha8Rng,
}

impl SessionRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Uniformly permute a slice in place.
    ///
    /// Walks from the last index down to index 1, swapping each position
    /// with a uniformly chosen position at or below it. Slices of length
    /// zero or one are left untouched.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.inner.gen_range(0..=i);
            slice.swap(i, j);
        }
    }

    /// Uniform integer within an inclusive range.
    ///
    /// Returns `None` for an empty range.
    pub fn roll(&mut self, range: RangeInclusive<i32>) -> Option<i32> {
        if range.is_empty() {
            return None;
        }
        Some(self.inner.gen_range(range))
    }
}
