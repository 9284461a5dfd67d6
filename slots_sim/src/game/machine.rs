use crate::game::player::PlayerSim;
use crate::game::strategy::BettingStrategy;
use slots_lib::{LineWin, PayoutEngine, ReelBank, SlotGameError, SpinOutcome};

/// Struct for a simulated slot machine: the core reel bank and payout engine
/// plus the per round bookkeeping the simulation layer reads off after each
/// spin.
pub struct SlotMachineSim {
    reels: ReelBank,
    payouts: PayoutEngine,
    /// (rounds won, rounds lost, net winnings) for the last settled round.
    pub round_log: Option<(i32, i32, i64)>,
    pub num_jackpots: i32,
    last_outcome: Option<SpinOutcome>,
    last_line_wins: Vec<LineWin>,
}

impl SlotMachineSim {
    /// Associated function to create a new machine with entropy seeded reels.
    pub fn new() -> SlotMachineSim {
        SlotMachineSim::from_parts(ReelBank::new(), PayoutEngine::new())
    }

    /// Associated function to create a machine whose spin sequence is fully
    /// determined by `seed`.
    pub fn with_seed(seed: u64) -> SlotMachineSim {
        SlotMachineSim::from_parts(ReelBank::with_seed(seed), PayoutEngine::new())
    }

    fn from_parts(reels: ReelBank, payouts: PayoutEngine) -> SlotMachineSim {
        SlotMachineSim {
            reels,
            payouts,
            round_log: None,
            num_jackpots: 0,
            last_outcome: None,
            last_line_wins: Vec::new(),
        }
    }

    /// Method that plays one full round for `player`: spins the reels,
    /// evaluates the escrowed bet and settles the winnings. The player must
    /// have placed a bet before the round starts.
    pub fn play_round<S: BettingStrategy>(
        &mut self,
        player: &mut PlayerSim<S>,
    ) -> Result<(), SlotGameError> {
        let bet = player.current_bet();
        if bet == 0 {
            return Err(SlotGameError::new(
                "no bet has been placed for this round".to_string(),
            ));
        }

        let outcome = self.reels.spin();
        let (total_winnings, line_wins) = self.payouts.evaluate(&outcome, bet);

        self.num_jackpots += line_wins
            .iter()
            .filter(|line| line.jackpot_bonus > 0)
            .count() as i32;

        player.collect_winnings(total_winnings);

        let net = total_winnings as i64 - bet as i64;
        let (wins, losses) = if total_winnings > 0 { (1, 0) } else { (0, 1) };
        self.round_log = Some((wins, losses, net));
        self.last_outcome = Some(outcome);
        self.last_line_wins = line_wins;
        Ok(())
    }

    /// Getter for the outcome of the last round played.
    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    /// Getter for the line wins of the last round played.
    pub fn last_line_wins(&self) -> &[LineWin] {
        &self.last_line_wins
    }

    /// Method for resetting the per round state. The reels and payout table
    /// carry over unchanged.
    pub fn reset(&mut self) {
        self.round_log = None;
        self.num_jackpots = 0;
        self.last_outcome = None;
        self.last_line_wins.clear();
    }
}

impl Default for SlotMachineSim {
    fn default() -> Self {
        SlotMachineSim::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::strategy::FlatBetting;

    #[test]
    fn a_round_needs_an_escrowed_bet() {
        let mut machine = SlotMachineSim::with_seed(1);
        let mut player = PlayerSim::new(100, FlatBetting::new(5));
        assert!(machine.play_round(&mut player).is_err());
    }

    #[test]
    fn a_settled_round_logs_its_net_result() {
        let mut machine = SlotMachineSim::with_seed(1);
        let mut player = PlayerSim::new(100, FlatBetting::new(5));
        player.place_bet(5).unwrap();
        machine.play_round(&mut player).unwrap();

        let (wins, losses, net) = machine.round_log.unwrap();
        assert_eq!(wins + losses, 1);
        assert_eq!(player.balance() as i64, 95 + 5 + net);
        assert_eq!(player.current_bet(), 0);
        assert!(machine.last_outcome().is_some());
    }

    #[test]
    fn seeded_machines_replay_the_same_rounds() {
        let mut left = SlotMachineSim::with_seed(9);
        let mut right = SlotMachineSim::with_seed(9);
        let mut player_left = PlayerSim::new(1_000, FlatBetting::new(2));
        let mut player_right = PlayerSim::new(1_000, FlatBetting::new(2));

        for _ in 0..50 {
            player_left.place_bet(2).unwrap();
            player_right.place_bet(2).unwrap();
            left.play_round(&mut player_left).unwrap();
            right.play_round(&mut player_right).unwrap();
            assert_eq!(left.round_log, right.round_log);
            left.reset();
            right.reset();
        }
        assert_eq!(player_left.balance(), player_right.balance());
    }
}
