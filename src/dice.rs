//! Dice primitives: the two-die roll value and the roller that produces it.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Result of rolling two dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
}

impl DiceRoll {
    pub fn new(die1: u8, die2: u8) -> Result<Self> {
        if !(1..=6).contains(&die1) {
            return Err(Error::InvalidDie(die1));
        }
        if !(1..=6).contains(&die2) {
            return Err(Error::InvalidDie(die2));
        }
        Ok(Self { die1, die2 })
    }

    /// The sum is what matters in craps: 2 through 12.
    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    /// Come-out winners: 7 or 11.
    pub fn is_natural(&self) -> bool {
        matches!(self.total(), 7 | 11)
    }

    /// Come-out losers: 2, 3, or 12.
    pub fn is_craps(&self) -> bool {
        matches!(self.total(), 2 | 3 | 12)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} = {}", self.die1, self.die2, self.total())
    }
}

/// Produces dice rolls from an injected random source.
///
/// The source is explicit so sessions can be replayed: two rollers built
/// from the same seed produce the same sequence.
pub struct DiceRoller<R = StdRng> {
    rng: R,
}

impl DiceRoller<StdRng> {
    /// Roller seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Roller with a fixed seed, for reproducible sessions.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> DiceRoller<R> {
    /// Wrap any random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Roll two dice, each uniform over 1-6.
    pub fn roll(&mut self) -> DiceRoll {
        DiceRoll {
            die1: self.rng.gen_range(1..=6),
            die2: self.rng.gen_range(1..=6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_roll_validation() {
        assert!(DiceRoll::new(1, 6).is_ok());
        assert!(matches!(DiceRoll::new(0, 3), Err(Error::InvalidDie(0))));
        assert!(matches!(DiceRoll::new(3, 7), Err(Error::InvalidDie(7))));
    }

    #[test]
    fn test_dice_roll_predicates() {
        let roll = DiceRoll::new(3, 4).unwrap();
        assert_eq!(roll.total(), 7);
        assert!(roll.is_natural());
        assert!(!roll.is_craps());

        let roll = DiceRoll::new(1, 1).unwrap();
        assert_eq!(roll.total(), 2);
        assert!(roll.is_craps());
    }

    #[test]
    fn test_sum_distribution_is_triangular() {
        // All 36 (d1, d2) pairs, counted by total.
        let mut ways = [0u8; 13];
        for d1 in 1..=6u8 {
            for d2 in 1..=6u8 {
                ways[DiceRoll::new(d1, d2).unwrap().total() as usize] += 1;
            }
        }
        assert_eq!(ways, [0, 0, 1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_roller_range() {
        let mut roller = DiceRoller::from_entropy();
        for _ in 0..1000 {
            let roll = roller.roll();
            assert!((1..=6).contains(&roll.die1));
            assert!((1..=6).contains(&roll.die2));
        }
    }

    #[test]
    fn test_roller_deterministic_with_seed() {
        let mut a = DiceRoller::from_seed(42);
        let mut b = DiceRoller::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_roller_different_seeds_diverge() {
        let mut a = DiceRoller::from_seed(1);
        let mut b = DiceRoller::from_seed(2);
        let seq_a: Vec<DiceRoll> = (0..20).map(|_| a.roll()).collect();
        let seq_b: Vec<DiceRoll> = (0..20).map(|_| b.roll()).collect();
        assert_ne!(seq_a, seq_b);
    }
}
