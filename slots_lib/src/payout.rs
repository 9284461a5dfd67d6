//! Module for win lines and payout evaluation. A `PayoutEngine` is a pure
//! function of a finished spin and a bet; it keeps no state between rounds.

use crate::reel::SpinOutcome;
use crate::symbol::Symbol;
use crate::{SlotGameError, JACKPOT_MULTIPLIER, NUM_REELS};

/// A named set of reel positions that must all land on the same symbol for
/// the line to pay.
#[derive(Debug, Clone)]
pub struct WinLine {
    name: String,
    positions: Vec<usize>,
}

impl WinLine {
    /// Associated function to create a new `WinLine` over the given reel
    /// positions, in the order they are checked.
    pub fn new(name: String, positions: Vec<usize>) -> WinLine {
        WinLine { name, positions }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
}

/// Record of a single matched line within an evaluated spin, kept for display
/// purposes. `jackpot_bonus` is zero unless the line matched on Seven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWin {
    pub line_name: String,
    pub symbol: Symbol,
    pub line_winnings: u32,
    pub jackpot_bonus: u32,
}

/// Struct that evaluates finished spins against the configured win lines and
/// computes total winnings for a bet.
pub struct PayoutEngine {
    win_lines: Vec<WinLine>,
}

impl PayoutEngine {
    /// Associated function to create a `PayoutEngine` with the standard single
    /// horizontal line spanning all reels.
    pub fn new() -> PayoutEngine {
        PayoutEngine {
            win_lines: vec![WinLine::new(
                "Horizontal".to_string(),
                (0..NUM_REELS).collect(),
            )],
        }
    }

    /// Associated function to create a `PayoutEngine` with a custom set of win
    /// lines. Every line must list at least one position and every position
    /// must fall within `num_reels`; anything else is a configuration mistake
    /// rejected up front.
    pub fn with_win_lines(
        win_lines: Vec<WinLine>,
        num_reels: usize,
    ) -> Result<PayoutEngine, SlotGameError> {
        for line in &win_lines {
            if line.positions.is_empty() {
                return Err(SlotGameError::new(format!(
                    "win line {} lists no positions",
                    line.name
                )));
            }
            if let Some(&position) = line.positions.iter().find(|&&p| p >= num_reels) {
                return Err(SlotGameError::new(format!(
                    "win line {} position {} is outside the {} reels",
                    line.name, position, num_reels
                )));
            }
        }
        Ok(PayoutEngine { win_lines })
    }

    /// The win lines in evaluation order.
    pub fn win_lines(&self) -> &[WinLine] {
        &self.win_lines
    }

    /// Method to evaluate a finished spin against every win line for the given
    /// bet. A line matches when every one of its positions shows the symbol at
    /// its first position; a matched line pays `bet * multiplier`, and a line
    /// of Sevens adds the flat jackpot bonus of `bet * 50` on top of the line
    /// winnings. Lines are evaluated independently and their winnings summed.
    pub fn evaluate(&self, outcome: &SpinOutcome, bet: u32) -> (u32, Vec<LineWin>) {
        let mut total_winnings = 0;
        let mut matched_lines = Vec::new();

        for line in &self.win_lines {
            let candidate = outcome[line.positions[0]];
            if line
                .positions
                .iter()
                .any(|&position| outcome[position] != candidate)
            {
                continue;
            }

            let line_winnings = bet * candidate.multiplier();
            total_winnings += line_winnings;

            let jackpot_bonus = if candidate == Symbol::Seven {
                bet * JACKPOT_MULTIPLIER
            } else {
                0
            };
            total_winnings += jackpot_bonus;

            matched_lines.push(LineWin {
                line_name: line.name.clone(),
                symbol: candidate,
                line_winnings,
                jackpot_bonus,
            });
        }

        (total_winnings, matched_lines)
    }
}

impl Default for PayoutEngine {
    fn default() -> Self {
        PayoutEngine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(symbols: [Symbol; NUM_REELS]) -> SpinOutcome {
        SpinOutcome::new(symbols.to_vec())
    }

    #[test]
    fn three_sevens_pay_the_line_and_the_jackpot() {
        let engine = PayoutEngine::new();
        let (total, lines) =
            engine.evaluate(&outcome([Symbol::Seven, Symbol::Seven, Symbol::Seven]), 10);
        assert_eq!(total, 700);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_name, "Horizontal");
        assert_eq!(lines[0].symbol, Symbol::Seven);
        assert_eq!(lines[0].line_winnings, 200);
        assert_eq!(lines[0].jackpot_bonus, 500);
    }

    #[test]
    fn three_cherries_pay_the_multiplier_only() {
        let engine = PayoutEngine::new();
        let (total, lines) = engine.evaluate(
            &outcome([Symbol::Cherry, Symbol::Cherry, Symbol::Cherry]),
            5,
        );
        assert_eq!(total, 10);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].jackpot_bonus, 0);
    }

    #[test]
    fn mixed_symbols_pay_nothing() {
        let engine = PayoutEngine::new();
        let (total, lines) =
            engine.evaluate(&outcome([Symbol::Cherry, Symbol::Lemon, Symbol::Orange]), 5);
        assert_eq!(total, 0);
        assert!(lines.is_empty());
    }

    #[test]
    fn every_symbol_pays_its_own_multiplier() {
        let engine = PayoutEngine::new();
        for symbol in Symbol::ALL {
            let (total, lines) = engine.evaluate(&outcome([symbol, symbol, symbol]), 7);
            let expected_jackpot = if symbol == Symbol::Seven { 7 * 50 } else { 0 };
            assert_eq!(total, 7 * symbol.multiplier() + expected_jackpot);
            assert_eq!(lines[0].line_winnings, 7 * symbol.multiplier());
        }
    }

    #[test]
    fn evaluation_is_pure() {
        let engine = PayoutEngine::new();
        let spin = outcome([Symbol::Bar, Symbol::Bar, Symbol::Bar]);
        let first = engine.evaluate(&spin, 4);
        let second = engine.evaluate(&spin, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn multiple_matched_lines_sum_independently() {
        let lines = vec![
            WinLine::new("Horizontal".to_string(), vec![0, 1, 2]),
            WinLine::new("Outer".to_string(), vec![0, 2]),
        ];
        let engine = PayoutEngine::with_win_lines(lines, NUM_REELS).unwrap();
        let (total, matched) =
            engine.evaluate(&outcome([Symbol::Bell, Symbol::Bell, Symbol::Bell]), 2);
        // Both lines match on Bell: 2 * 5 each
        assert_eq!(total, 20);
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn misconfigured_lines_are_rejected() {
        let out_of_range = vec![WinLine::new("Bad".to_string(), vec![0, 3])];
        assert!(PayoutEngine::with_win_lines(out_of_range, NUM_REELS).is_err());

        let empty = vec![WinLine::new("Empty".to_string(), vec![])];
        assert!(PayoutEngine::with_win_lines(empty, NUM_REELS).is_err());
    }
}
