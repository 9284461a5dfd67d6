use crate::game::strategy::BettingStrategy;
use slots_lib::{PlayerAccount, SlotGameError};

/// Struct for a simulated player: a core credit account driven by a betting
/// strategy instead of terminal prompts.
pub struct PlayerSim<S: BettingStrategy> {
    account: PlayerAccount,
    strategy: S,
}

impl<S: BettingStrategy> PlayerSim<S> {
    /// Associated function to create a new `PlayerSim` struct.
    pub fn new(starting_balance: u32, strategy: S) -> PlayerSim<S> {
        PlayerSim {
            account: PlayerAccount::new("sim".to_string(), starting_balance),
            strategy,
        }
    }

    /// Method for determining whether the player can continue to play or not
    pub fn continue_play(&self, min_bet: u32) -> bool {
        self.account.credits() >= min_bet
    }

    /// Getter method for the players current balance.
    pub fn balance(&self) -> u32 {
        self.account.credits()
    }

    /// Getter method for the bet currently in escrow.
    pub fn current_bet(&self) -> u32 {
        self.account.current_bet()
    }

    /// Function for getting the bet the strategy wants to place this round.
    pub fn bet(&self) -> Result<u32, SlotGameError> {
        let bet = self.strategy.bet(self.account.credits());
        if bet == 0 {
            return Err(SlotGameError::new("out of funds".to_string()));
        }
        Ok(bet)
    }

    /// Method to place a bet through the account, debiting the balance up
    /// front. The account enforces `0 < bet <= balance`.
    pub fn place_bet(&mut self, bet: u32) -> Result<(), SlotGameError> {
        self.account.place_bet(bet)
    }

    /// Method to settle the round, crediting any winnings back to the account.
    pub fn collect_winnings(&mut self, winnings: u32) {
        self.account.settle(winnings);
    }

    /// Method that lets the strategy observe the settled round's net result.
    pub fn update_strategy(&mut self, net: i64) {
        self.strategy.update(net);
    }

    /// Method to get a string that describes the players strategy
    pub fn label(&self) -> String {
        self.strategy.label()
    }

    pub fn reset_strategy(&mut self) {
        self.strategy.reset();
    }

    /// Method for resetting the player for another simulation: a fresh balance
    /// and a strategy back in its starting state.
    pub fn reset(&mut self, new_balance: u32) {
        self.account = PlayerAccount::new(self.account.name().to_string(), new_balance);
        self.strategy.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::strategy::FlatBetting;

    #[test]
    fn bets_flow_through_the_account_escrow() {
        let mut player = PlayerSim::new(100, FlatBetting::new(5));
        let bet = player.bet().unwrap();
        assert_eq!(bet, 5);
        player.place_bet(bet).unwrap();
        assert_eq!(player.balance(), 95);
        assert_eq!(player.current_bet(), 5);
        player.collect_winnings(10);
        assert_eq!(player.balance(), 105);
        assert_eq!(player.current_bet(), 0);
    }

    #[test]
    fn a_broke_player_cannot_produce_a_bet() {
        let player = PlayerSim::new(0, FlatBetting::new(5));
        assert!(player.bet().is_err());
        assert!(!player.continue_play(1));
    }

    #[test]
    fn reset_restores_the_balance() {
        let mut player = PlayerSim::new(50, FlatBetting::new(5));
        player.place_bet(5).unwrap();
        player.collect_winnings(0);
        player.reset(50);
        assert_eq!(player.balance(), 50);
    }
}
