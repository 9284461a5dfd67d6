//! Module for the closed set of symbols a reel can land on. Each symbol
//! carries a display glyph, the multiplier applied to the bet when a full line
//! of it pays, and the number of entries it occupies on a standard reel.

use std::fmt::Display;

/// A slot machine symbol. The set is closed and ordered by rarity: the payout
/// multiplier rises as the population weight falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Cherry,
    Lemon,
    Orange,
    Bell,
    Bar,
    Seven,
}

impl Symbol {
    /// Every symbol, most common first.
    pub const ALL: [Symbol; 6] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Bell,
        Symbol::Bar,
        Symbol::Seven,
    ];

    /// The glyph used when rendering the symbol.
    pub fn display(&self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Orange => "🍊",
            Symbol::Bell => "🔔",
            Symbol::Bar => "⭐",
            Symbol::Seven => "7️⃣",
        }
    }

    /// Multiplier applied to the bet when a full line of this symbol pays.
    pub fn multiplier(&self) -> u32 {
        match self {
            Symbol::Cherry => 2,
            Symbol::Lemon => 3,
            Symbol::Orange => 4,
            Symbol::Bell => 5,
            Symbol::Bar => 10,
            Symbol::Seven => 20,
        }
    }

    /// How many entries this symbol occupies on a standard reel.
    pub fn weight(&self) -> u32 {
        match self {
            Symbol::Cherry => 15,
            Symbol::Lemon => 12,
            Symbol::Orange => 10,
            Symbol::Bell => 8,
            Symbol::Bar => 4,
            Symbol::Seven => 1,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::REEL_SIZE;

    #[test]
    fn multipliers_rise_with_rarity() {
        for pair in Symbol::ALL.windows(2) {
            assert!(
                pair[0].multiplier() < pair[1].multiplier(),
                "{:?} should pay less than {:?}",
                pair[0],
                pair[1]
            );
            assert!(
                pair[0].weight() > pair[1].weight(),
                "{:?} should be more common than {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn weights_fill_a_reel() {
        let total: u32 = Symbol::ALL.iter().map(|s| s.weight()).sum();
        assert_eq!(total as usize, REEL_SIZE);
    }
}
