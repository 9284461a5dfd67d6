//! Module for the interactive console shell. Everything here is presentation
//! glue around the core: it reads a name and bets from the terminal, drives
//! one round at a time and renders the results. No game rule lives here.

use crate::payout::PayoutEngine;
use crate::player::PlayerAccount;
use crate::reel::ReelBank;
use crate::STARTING_CREDITS;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

const SPIN_ANIMATION_TICKS: usize = 3;
const SPIN_ANIMATION_DELAY: Duration = Duration::from_millis(500);

/// Struct wiring the core machine to an interactive terminal session.
pub struct SlotConsoleGame {
    reels: ReelBank,
    payouts: PayoutEngine,
}

impl SlotConsoleGame {
    /// Associated function to create a new console game with the standard
    /// machine.
    pub fn new() -> SlotConsoleGame {
        SlotConsoleGame {
            reels: ReelBank::new(),
            payouts: PayoutEngine::new(),
        }
    }

    /// Method that runs the full interactive session: welcome banner, player
    /// creation, the round loop and the final summary.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();

        display_welcome(&mut out)?;
        let mut player = create_player(&mut input, &mut out)?;
        self.game_loop(&mut input, &mut out, &mut player)?;
        end_game(&mut out, &player)
    }

    fn game_loop(
        &mut self,
        input: &mut impl BufRead,
        out: &mut impl Write,
        player: &mut PlayerAccount,
    ) -> io::Result<()> {
        while player.has_credits() {
            writeln!(out, "\n{}", "=".repeat(50))?;
            writeln!(out, "Player: {} | Credits: {}", player.name(), player.credits())?;

            let bet = match prompt_bet(input, out, player)? {
                Some(bet) => bet,
                None => break,
            };

            self.play_round(out, player, bet)?;

            if !player.has_credits() {
                writeln!(out, "\n💸 You're out of credits! Game Over!")?;
                break;
            }
            if !prompt_play_again(input, out)? {
                break;
            }
        }
        Ok(())
    }

    fn play_round(
        &mut self,
        out: &mut impl Write,
        player: &mut PlayerAccount,
        bet: u32,
    ) -> io::Result<()> {
        writeln!(out, "\n🎰 Spinning the reels... 🎰")?;
        for _ in 0..SPIN_ANIMATION_TICKS {
            thread::sleep(SPIN_ANIMATION_DELAY);
            write!(out, ".")?;
            out.flush()?;
        }
        writeln!(out, "\n")?;

        let outcome = self.reels.spin();

        writeln!(out, "╔═══════════════════════════════════════╗")?;
        writeln!(out, "║              SLOT MACHINE             ║")?;
        writeln!(out, "╠═══════════════════════════════════════╣")?;
        writeln!(out, "║         {}                     ║", outcome)?;
        writeln!(out, "╚═══════════════════════════════════════╝")?;

        let (total_winnings, line_wins) = self.payouts.evaluate(&outcome, bet);

        for line in &line_wins {
            writeln!(
                out,
                "🎉 WINNER! {} line - {} x{}",
                line.line_name,
                line.symbol,
                self.reels.num_reels()
            )?;
            writeln!(out, "💰 Line winnings: {} credits", line.line_winnings)?;
            if line.jackpot_bonus > 0 {
                writeln!(out, "🏆 JACKPOT BONUS! +{} credits!", line.jackpot_bonus)?;
            }
        }
        if line_wins.is_empty() {
            writeln!(out, "😞 No winning combinations. Better luck next time!")?;
        }

        player.settle(total_winnings);
        if total_winnings > 0 {
            writeln!(out, "🎊 Total winnings: {} credits!", total_winnings)?;
        }
        Ok(())
    }
}

impl Default for SlotConsoleGame {
    fn default() -> Self {
        SlotConsoleGame::new()
    }
}

fn display_welcome(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "╔═══════════════════════════════════════════════════════╗")?;
    writeln!(out, "║               🎰 SLOT MACHINE GAME 🎰                 ║")?;
    writeln!(out, "║                  Welcome to Vegas!                    ║")?;
    writeln!(out, "╠═══════════════════════════════════════════════════════╣")?;
    writeln!(out, "║ Symbols and Multipliers:                              ║")?;
    writeln!(out, "║ 🍒 Cherry x2  🍋 Lemon x3  🍊 Orange x4               ║")?;
    writeln!(out, "║ 🔔 Bell x5    ⭐ Bar x10   7️⃣ Seven x20 (+Jackpot!)   ║")?;
    writeln!(out, "╚═══════════════════════════════════════════════════════╝")
}

fn create_player(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<PlayerAccount> {
    write!(out, "\nEnter your name: ")?;
    out.flush()?;
    let mut name = String::new();
    input.read_line(&mut name)?;
    let mut name = name.trim().to_string();
    if name.is_empty() {
        name.push_str("Player");
    }
    writeln!(
        out,
        "Welcome, {}! You start with {} credits.",
        name, STARTING_CREDITS
    )?;
    Ok(PlayerAccount::new(name, STARTING_CREDITS))
}

/// Prompts until the player enters a bet the account accepts. Returns `None`
/// when the player quits with a bet of 0. A rejected or unparseable bet never
/// touches the balance.
fn prompt_bet(
    input: &mut impl BufRead,
    out: &mut impl Write,
    player: &mut PlayerAccount,
) -> io::Result<Option<u32>> {
    loop {
        write!(
            out,
            "Enter your bet (1-{}) or 0 to quit: ",
            player.credits()
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let bet = match line.trim().parse::<u32>() {
            Ok(bet) => bet,
            Err(_) => {
                writeln!(out, "❌ Please enter a valid number.")?;
                continue;
            }
        };
        if bet == 0 {
            return Ok(None);
        }

        match player.place_bet(bet) {
            Ok(()) => {
                writeln!(out, "Bet placed: {} credits", bet)?;
                return Ok(Some(bet));
            }
            Err(_) => {
                writeln!(out, "❌ Invalid bet amount. Please try again.")?;
            }
        }
    }
}

fn prompt_play_again(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "\nPlay again? (y/n): ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    let choice = line.trim().to_lowercase();
    Ok(choice == "y" || choice == "yes")
}

fn end_game(out: &mut impl Write, player: &PlayerAccount) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "🎰 Thanks for playing! 🎰")?;
    writeln!(out, "Player: {} | Credits: {}", player.name(), player.credits())?;

    if player.credits() > STARTING_CREDITS {
        writeln!(out, "🎉 Congratulations! You finished with a profit!")?;
    } else if player.credits() == STARTING_CREDITS {
        writeln!(out, "😊 You broke even! Not bad!")?;
    } else {
        writeln!(out, "😅 Better luck next time!")?;
    }

    writeln!(out, "Come back soon!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quitting_without_betting_keeps_the_balance() {
        let mut player = PlayerAccount::new("Ben".to_string(), STARTING_CREDITS);
        let mut out = Vec::new();
        let bet = prompt_bet(&mut "0\n".as_bytes(), &mut out, &mut player).unwrap();
        assert!(bet.is_none());
        assert_eq!(player.credits(), STARTING_CREDITS);
    }

    #[test]
    fn invalid_input_reprompts_without_a_partial_debit() {
        let mut player = PlayerAccount::new("Ben".to_string(), 15);
        let mut out = Vec::new();
        // Garbage, then an oversized bet, then a valid one
        let bet = prompt_bet(&mut "abc\n20\n5\n".as_bytes(), &mut out, &mut player)
            .unwrap()
            .unwrap();
        assert_eq!(bet, 5);
        assert_eq!(player.credits(), 10);
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("valid number"));
        assert!(transcript.contains("Invalid bet amount"));
    }
}
