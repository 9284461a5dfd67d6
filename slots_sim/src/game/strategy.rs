//! Module for betting strategies. A slot round offers no decisions once the
//! reels are spinning, so sizing the next bet from observed results is the
//! whole strategy surface.

/// Trait for a generic betting strategy. Allows the simulation to be run
/// against any bet sizing scheme without changing the game loop.
pub trait BettingStrategy {
    /// Returns the bet for the next round given the player's current balance.
    /// Implementations never return more than the balance; a return of 0 means
    /// the strategy cannot produce a playable bet.
    fn bet(&self, balance: u32) -> u32;

    /// Observes the net result of the settled round, winnings minus the bet.
    fn update(&mut self, net: i64);

    /// Method for resetting any internal state, so the strategy can be reused
    /// across simulations.
    fn reset(&mut self);

    /// A short label describing the strategy, for reporting.
    fn label(&self) -> String;
}

/// Boxed strategies chosen at runtime drive a simulation the same way concrete
/// ones do.
impl<T: BettingStrategy + ?Sized> BettingStrategy for Box<T> {
    fn bet(&self, balance: u32) -> u32 {
        (**self).bet(balance)
    }

    fn update(&mut self, net: i64) {
        (**self).update(net)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// Struct for the simplest sizing scheme: the same bet every round, capped by
/// the balance.
pub struct FlatBetting {
    bet: u32,
}

impl FlatBetting {
    /// Associated method for returning a new `FlatBetting` struct
    pub fn new(bet: u32) -> FlatBetting {
        FlatBetting { bet }
    }
}

impl BettingStrategy for FlatBetting {
    fn bet(&self, balance: u32) -> u32 {
        u32::min(balance, self.bet)
    }

    fn update(&mut self, _net: i64) {}

    fn reset(&mut self) {}

    fn label(&self) -> String {
        format!("flat {}", self.bet)
    }
}

/// Struct that encapsulates the classic double-on-loss scheme: every losing
/// round doubles the next bet, any winning round falls back to the base bet.
pub struct MartingaleBetting {
    base_bet: u32,
    current_bet: u32,
}

impl MartingaleBetting {
    /// Associated method for returning a new `MartingaleBetting` struct
    pub fn new(base_bet: u32) -> MartingaleBetting {
        MartingaleBetting {
            base_bet,
            current_bet: base_bet,
        }
    }
}

impl BettingStrategy for MartingaleBetting {
    /// Returns the current bet in the doubling progression, capped by the
    /// balance.
    fn bet(&self, balance: u32) -> u32 {
        u32::min(balance, self.current_bet)
    }

    fn update(&mut self, net: i64) {
        if net < 0 {
            self.current_bet = self.current_bet.saturating_mul(2);
        } else {
            self.current_bet = self.base_bet;
        }
    }

    fn reset(&mut self) {
        self.current_bet = self.base_bet;
    }

    fn label(&self) -> String {
        format!("martingale {}", self.base_bet)
    }
}

/// Struct that encapsulates a margin based press scheme: each consecutive
/// winning round scales the base bet by the margin, and any loss drops back to
/// the base bet.
pub struct MarginBetting {
    margin: f32,
    base_bet: u32,
    streak: u32,
}

impl MarginBetting {
    /// Associated method for returning a new `MarginBetting` struct
    pub fn new(margin: f32, base_bet: u32) -> MarginBetting {
        MarginBetting {
            margin,
            base_bet,
            streak: 0,
        }
    }
}

impl BettingStrategy for MarginBetting {
    /// Returns the bet based on the current winning streak: the base bet
    /// scaled by the margin once per consecutive win, capped by the balance.
    fn bet(&self, balance: u32) -> u32 {
        let scalar = self.margin.powi(self.streak as i32);
        u32::min(balance, ((self.base_bet as f32) * scalar) as u32)
    }

    fn update(&mut self, net: i64) {
        if net > 0 {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
    }

    fn reset(&mut self) {
        self.streak = 0;
    }

    fn label(&self) -> String {
        format!("margin {:.1} base {}", self.margin, self.base_bet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_betting_never_exceeds_the_balance() {
        let strategy = FlatBetting::new(10);
        assert_eq!(strategy.bet(100), 10);
        assert_eq!(strategy.bet(4), 4);
    }

    #[test]
    fn martingale_doubles_on_loss_and_resets_on_win() {
        let mut strategy = MartingaleBetting::new(5);
        assert_eq!(strategy.bet(1_000), 5);
        strategy.update(-5);
        assert_eq!(strategy.bet(1_000), 10);
        strategy.update(-10);
        assert_eq!(strategy.bet(1_000), 20);
        strategy.update(30);
        assert_eq!(strategy.bet(1_000), 5);
    }

    #[test]
    fn martingale_is_capped_by_the_balance() {
        let mut strategy = MartingaleBetting::new(5);
        strategy.update(-5);
        strategy.update(-10);
        assert_eq!(strategy.bet(12), 12);
    }

    #[test]
    fn margin_betting_presses_consecutive_wins() {
        let mut strategy = MarginBetting::new(2.0, 5);
        assert_eq!(strategy.bet(1_000), 5);
        strategy.update(10);
        assert_eq!(strategy.bet(1_000), 10);
        strategy.update(20);
        assert_eq!(strategy.bet(1_000), 20);
        strategy.update(-20);
        assert_eq!(strategy.bet(1_000), 5);
    }

    #[test]
    fn boxed_strategies_behave_like_their_inner_value() {
        let mut boxed: Box<dyn BettingStrategy + Send> = Box::new(MartingaleBetting::new(3));
        assert_eq!(boxed.bet(100), 3);
        boxed.update(-3);
        assert_eq!(boxed.bet(100), 6);
        assert_eq!(boxed.label(), "martingale 3");
    }
}
