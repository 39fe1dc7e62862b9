//! Presents under the tree.
//!
//! Builds the unsorted list of gifts that the linear search walks through.
//! Randomness is always passed in, so each session draws from its own
//! generator and tests can supply a seeded one.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Filler gifts Santa picks from when wrapping presents.
pub const DEFAULT_GIFT_POOL: [&str; 8] = [
    "Toy Car",
    "Book",
    "Headphones",
    "Puzzle",
    "Lego Set",
    "Board Game",
    "Stuffed Animal",
    "Video Game",
];

/// Fewest presents that can appear under the tree.
pub const MIN_GIFTS: usize = 5;

/// Most presents that can appear under the tree.
pub const MAX_GIFTS: usize = 12;

/// Chance that Santa brings the wished-for gift.
pub const WISH_CHANCE: f64 = 0.65;

/// Error type for corpus configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorpusError {
    #[error("Gift pool is empty")]
    EmptyPool,
    #[error("Invalid gift range: {min}..={max}")]
    InvalidRange { min: usize, max: usize },
    #[error("Wish chance must be between 0 and 1, got {0}")]
    InvalidChance(f64),
}

/// How presents are generated for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Names sampled (with replacement) to fill the tree.
    pub gift_pool: Vec<String>,
    /// Smallest number of presents.
    pub min_gifts: usize,
    /// Largest number of presents.
    pub max_gifts: usize,
    /// Probability that the wish is placed under the tree.
    pub wish_chance: f64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            gift_pool: DEFAULT_GIFT_POOL.iter().map(|g| g.to_string()).collect(),
            min_gifts: MIN_GIFTS,
            max_gifts: MAX_GIFTS,
            wish_chance: WISH_CHANCE,
        }
    }
}

impl CorpusConfig {
    /// Check the configuration before any presents are generated.
    pub fn validate(&self) -> Result<(), CorpusError> {
        if self.gift_pool.is_empty() {
            return Err(CorpusError::EmptyPool);
        }
        if self.min_gifts == 0 || self.min_gifts > self.max_gifts {
            return Err(CorpusError::InvalidRange {
                min: self.min_gifts,
                max: self.max_gifts,
            });
        }
        if !(0.0..=1.0).contains(&self.wish_chance) {
            return Err(CorpusError::InvalidChance(self.wish_chance));
        }
        Ok(())
    }

    /// Pick how many presents are under the tree, uniformly in the range.
    pub fn sample_count_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min_gifts..=self.max_gifts)
    }

    /// Wrap `count` presents, maybe including `wish`.
    ///
    /// Each present is drawn from the pool independently. With probability
    /// `wish_chance` exactly one present is swapped for the wish, then the
    /// whole pile is shuffled so position says nothing about how it got there.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        wish: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, CorpusError> {
        self.validate()?;

        let mut presents: Vec<String> = (0..count)
            .map(|_| self.gift_pool[rng.gen_range(0..self.gift_pool.len())].clone())
            .collect();

        let santa_brings_wish = rng.gen_bool(self.wish_chance);
        if santa_brings_wish && count > 0 {
            let wish_index = rng.gen_range(0..count);
            presents[wish_index] = wish.to_string();
        }

        presents.shuffle(rng);
        Ok(presents)
    }
}

/// Generate presents with the default pool and probabilities.
pub fn generate_with_rng<R: Rng + ?Sized>(
    wish: &str,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, CorpusError> {
    CorpusConfig::default().generate_with_rng(wish, count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_config_is_valid() {
        let config = CorpusConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gift_pool.len(), 8);
        assert_eq!(config.min_gifts, 5);
        assert_eq!(config.max_gifts, 12);
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut config = CorpusConfig::default();
        config.gift_pool.clear();
        assert_eq!(config.validate(), Err(CorpusError::EmptyPool));

        let config = CorpusConfig {
            min_gifts: 9,
            max_gifts: 4,
            ..CorpusConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CorpusError::InvalidRange { min: 9, max: 4 })
        ));

        let config = CorpusConfig {
            wish_chance: 1.5,
            ..CorpusConfig::default()
        };
        assert!(matches!(config.validate(), Err(CorpusError::InvalidChance(_))));
    }

    #[test]
    fn test_count_in_range() {
        let config = CorpusConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let count = config.sample_count_with_rng(&mut rng);
            assert!((MIN_GIFTS..=MAX_GIFTS).contains(&count));
        }
    }

    #[test]
    fn test_generate_length_and_pool() {
        let config = CorpusConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for count in MIN_GIFTS..=MAX_GIFTS {
            let presents = config.generate_with_rng("Basketball", count, &mut rng).unwrap();
            assert_eq!(presents.len(), count);
            for gift in &presents {
                assert!(gift == "Basketball" || config.gift_pool.contains(gift));
            }
            // At most one wish is ever injected
            assert!(presents.iter().filter(|g| *g == "Basketball").count() <= 1);
        }
    }

    #[test]
    fn test_wish_always_present_at_full_chance() {
        let config = CorpusConfig {
            wish_chance: 1.0,
            ..CorpusConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let presents = config.generate_with_rng("Basketball", 6, &mut rng).unwrap();
            assert!(presents.iter().any(|g| g == "Basketball"));
        }
    }

    #[test]
    fn test_wish_never_present_at_zero_chance() {
        let config = CorpusConfig {
            wish_chance: 0.0,
            ..CorpusConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let presents = config.generate_with_rng("Basketball", 6, &mut rng).unwrap();
            assert!(!presents.iter().any(|g| g == "Basketball"));
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_with_rng("Basketball", 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_same_seed_same_presents() {
        let config = CorpusConfig::default();
        let a = config.generate_with_rng("Kite", 10, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = config.generate_with_rng("Kite", 10, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_rejects_empty_pool() {
        let config = CorpusConfig {
            gift_pool: Vec::new(),
            ..CorpusConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            config.generate_with_rng("Kite", 5, &mut rng),
            Err(CorpusError::EmptyPool)
        );
    }

    #[test]
    fn test_generate_rejects_chance_out_of_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for chance in [2.0, -0.5, f64::NAN] {
            let config = CorpusConfig {
                wish_chance: chance,
                ..CorpusConfig::default()
            };
            assert!(matches!(
                config.generate_with_rng("Kite", 5, &mut rng),
                Err(CorpusError::InvalidChance(_))
            ));
        }
    }
}
