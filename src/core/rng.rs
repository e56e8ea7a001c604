//! Deterministic random number generation for deck shuffling.
//!
//! The same seed always produces the same deal. Each deck shuffles from its
//! own context stream, so adding a shuffle to one deck never changes the
//! order of another.
//!
//! ```
//! use burnpile::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut red = rng.for_context("red");
//! let mut blue = rng.for_context("blue");
//!
//! let mut a: Vec<u32> = (0..20).collect();
//! let mut b = a.clone();
//! red.shuffle(&mut a);
//! blue.shuffle(&mut b);
//! assert_ne!(a, b);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream for one deck.
    ///
    /// Derived from the seed alone, so draws on `self` never move it.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut cards: Vec<u32> = (0..52).collect();
        rng.shuffle(&mut cards);
        cards
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = shuffled(&mut GameRng::new(42));
        let b = shuffled(&mut GameRng::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds() {
        let a = shuffled(&mut GameRng::new(1));
        let b = shuffled(&mut GameRng::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_context_ignores_parent_draws() {
        let mut parent = GameRng::new(9);
        let before = shuffled(&mut parent.for_context("blue"));
        shuffled(&mut parent);
        let after = shuffled(&mut parent.for_context("blue"));

        assert_eq!(before, after);
        assert_eq!(parent.seed(), 9);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut cards = shuffled(&mut GameRng::new(7).for_context("playing"));
        cards.sort_unstable();
        assert_eq!(cards, (0..52).collect::<Vec<_>>());
    }
}
