//! Module for the weighted reels. Every reel holds the same 50 entry symbol
//! population; a spin draws one uniformly random entry per reel, so a symbol's
//! frequency in the population is exactly its probability of landing.

use crate::symbol::Symbol;
use crate::{SlotGameError, NUM_REELS, REEL_SIZE};
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Display;
use std::ops::Index;

lazy_static! {
    /// The standard reel population, one shared composition replicated onto
    /// every reel.
    pub static ref STANDARD_POPULATION: Vec<Symbol> = build_population();
}

/// Builds the standard weighted population in a fixed layout: every Cherry
/// entry first, then Lemon, through the single Seven last. The layout has no
/// effect on the draw probabilities, but keeping it reproducible lets seeded
/// draws land on known positions.
pub fn build_population() -> Vec<Symbol> {
    let mut population = Vec::with_capacity(REEL_SIZE);
    for symbol in Symbol::ALL {
        for _ in 0..symbol.weight() {
            population.push(symbol);
        }
    }
    population
}

/// The ordered result of spinning every reel once. Owned by the current round
/// and discarded once its winnings are computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    symbols: Vec<Symbol>,
}

impl SpinOutcome {
    pub fn new(symbols: Vec<Symbol>) -> SpinOutcome {
        SpinOutcome { symbols }
    }

    /// The number of reels that produced this outcome.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbols in reel order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}

impl Index<usize> for SpinOutcome {
    type Output = Symbol;

    fn index(&self, reel: usize) -> &Symbol {
        &self.symbols[reel]
    }
}

impl Display for SpinOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row = self
            .symbols
            .iter()
            .map(|s| s.display())
            .collect::<Vec<&str>>()
            .join("    ");
        write!(f, "{}", row)
    }
}

/// Struct holding the per reel symbol populations and the random source used
/// to draw from them. The populations are built once and never mutated; only
/// the random source advances between spins.
pub struct ReelBank {
    reels: Vec<Vec<Symbol>>,
    rng: StdRng,
}

impl ReelBank {
    /// Associated function to create a new `ReelBank` with the standard
    /// population on every reel, seeded from OS entropy.
    pub fn new() -> ReelBank {
        ReelBank::with_rng(StdRng::from_entropy())
    }

    /// Associated function to create a `ReelBank` whose draw sequence is fully
    /// determined by `seed`, for reproducible sessions and tests.
    pub fn with_seed(seed: u64) -> ReelBank {
        ReelBank::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> ReelBank {
        let reels = (0..NUM_REELS).map(|_| STANDARD_POPULATION.clone()).collect();
        ReelBank { reels, rng }
    }

    /// Associated function to create a `ReelBank` from a custom population,
    /// replicated across `num_reels` reels. An empty population or a bank with
    /// no reels is a configuration mistake and is rejected here rather than
    /// discovered mid spin.
    pub fn from_population(
        population: Vec<Symbol>,
        num_reels: usize,
    ) -> Result<ReelBank, SlotGameError> {
        if population.is_empty() {
            return Err(SlotGameError::new(
                "reel population must not be empty".to_string(),
            ));
        }
        if num_reels == 0 {
            return Err(SlotGameError::new(
                "a reel bank needs at least one reel".to_string(),
            ));
        }
        let reels = (0..num_reels).map(|_| population.clone()).collect();
        Ok(ReelBank {
            reels,
            rng: StdRng::from_entropy(),
        })
    }

    /// The number of reels in the bank.
    pub fn num_reels(&self) -> usize {
        self.reels.len()
    }

    /// Method to draw one symbol from the given reel. The index is uniform
    /// over the full population, not over the distinct symbol set.
    pub fn draw_reel(&mut self, reel: usize) -> Symbol {
        let position = self.rng.gen_range(0..self.reels[reel].len());
        self.reels[reel][position]
    }

    /// Method to spin every reel once, independently, producing the symbols in
    /// reel order.
    pub fn spin(&mut self) -> SpinOutcome {
        let symbols = (0..self.reels.len())
            .map(|reel| self.draw_reel(reel))
            .collect();
        SpinOutcome::new(symbols)
    }
}

impl Default for ReelBank {
    fn default() -> Self {
        ReelBank::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_layout_is_reproducible() {
        let population = build_population();
        assert_eq!(population.len(), REEL_SIZE);
        assert!(population[..15].iter().all(|&s| s == Symbol::Cherry));
        assert_eq!(population[15], Symbol::Lemon);
        assert_eq!(population[REEL_SIZE - 1], Symbol::Seven);
        // Exactly one Seven per reel, so three Sevens stay reachable
        let sevens = population.iter().filter(|&&s| s == Symbol::Seven).count();
        assert_eq!(sevens, 1);
    }

    #[test]
    fn spin_draws_one_symbol_per_reel() {
        let mut bank = ReelBank::with_seed(3);
        for _ in 0..100 {
            assert_eq!(bank.spin().len(), NUM_REELS);
        }
    }

    #[test]
    fn equal_seeds_give_equal_sequences() {
        let mut left = ReelBank::with_seed(42);
        let mut right = ReelBank::with_seed(42);
        for _ in 0..25 {
            assert_eq!(left.spin(), right.spin());
        }
    }

    #[test]
    fn draw_frequencies_track_population_weights() {
        let mut bank = ReelBank::with_seed(7);
        const TRIALS: usize = 50_000;
        let mut cherries = 0usize;
        let mut sevens = 0usize;
        for _ in 0..TRIALS {
            match bank.draw_reel(0) {
                Symbol::Cherry => cherries += 1,
                Symbol::Seven => sevens += 1,
                _ => {}
            }
        }
        let cherry_freq = cherries as f64 / TRIALS as f64;
        let seven_freq = sevens as f64 / TRIALS as f64;
        assert!(
            (cherry_freq - 0.30).abs() < 0.02,
            "cherry frequency {cherry_freq} strayed from 30%"
        );
        assert!(
            (seven_freq - 0.02).abs() < 0.01,
            "seven frequency {seven_freq} strayed from 2%"
        );
    }

    #[test]
    fn empty_population_is_rejected() {
        assert!(ReelBank::from_population(vec![], NUM_REELS).is_err());
        assert!(ReelBank::from_population(vec![Symbol::Cherry], 0).is_err());
    }

    #[test]
    fn custom_population_spins() {
        let mut bank = ReelBank::from_population(vec![Symbol::Bar], 5).unwrap();
        let outcome = bank.spin();
        assert_eq!(outcome.len(), 5);
        assert!(outcome.iter().all(|&s| s == Symbol::Bar));
    }
}
