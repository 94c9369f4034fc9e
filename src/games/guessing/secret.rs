//! Sources of secret numbers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws secrets for new games.
pub trait SecretSource {
    /// Returns a number in `1..=range_max`.
    fn draw(&mut self, range_max: u32) -> u32;
}

impl<S: SecretSource + ?Sized> SecretSource for &mut S {
    fn draw(&mut self, range_max: u32) -> u32 {
        (**self).draw(range_max)
    }
}

/// Uniform secrets from a random number generator.
#[derive(Debug, Clone)]
pub struct RandomSecret<R = StdRng> {
    rng: R,
}

impl RandomSecret<StdRng> {
    /// Creates a source seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomSecret<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSecret<R> {
    /// Wraps an existing generator.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SecretSource for RandomSecret<R> {
    fn draw(&mut self, range_max: u32) -> u32 {
        self.rng.gen_range(1..=range_max)
    }
}

/// Always returns the same secret. Used to script games in tests and demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSecret(pub u32);

impl SecretSource for FixedSecret {
    fn draw(&mut self, _range_max: u32) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret_stays_in_range() {
        let mut source = RandomSecret::seeded(7);
        for range_max in [2, 3, 10, 100, 10_000] {
            for _ in 0..500 {
                let secret = source.draw(range_max);
                assert!((1..=range_max).contains(&secret));
            }
        }
    }

    #[test]
    fn test_random_secret_covers_small_range() {
        let mut source = RandomSecret::seeded(11);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[(source.draw(3) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomSecret::seeded(99);
        let mut b = RandomSecret::seeded(99);
        let xs: Vec<_> = (0..20).map(|_| a.draw(1000)).collect();
        let ys: Vec<_> = (0..20).map(|_| b.draw(1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_fixed_secret() {
        let mut source = FixedSecret(42);
        assert_eq!(source.draw(100), 42);
        assert_eq!((&mut source).draw(100), 42);
    }
}
