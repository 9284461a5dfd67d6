//! Core library for a three reel slot machine: the symbol model, the weighted
//! reel bank, win line evaluation with the jackpot bonus, the player's credit
//! account, and the interactive console shell that drives a session.

pub mod console;
pub mod payout;
pub mod player;
pub mod reel;
pub mod symbol;

pub use payout::{LineWin, PayoutEngine, WinLine};
pub use player::PlayerAccount;
pub use reel::{build_population, ReelBank, SpinOutcome, STANDARD_POPULATION};
pub use symbol::Symbol;

use std::error::Error;
use std::fmt::Display;

/// The number of reels on the machine.
pub const NUM_REELS: usize = 3;

/// The number of symbol entries on a single reel.
pub const REEL_SIZE: usize = 50;

/// The credits a new player account starts a session with.
pub const STARTING_CREDITS: u32 = 100;

/// Flat multiplier applied to the bet, on top of the line winnings, when every
/// position of a line shows a Seven.
pub const JACKPOT_MULTIPLIER: u32 = 50;

/// The error type shared across the core: rejected bets and fatal
/// configuration mistakes caught at construction time.
#[derive(Debug)]
pub struct SlotGameError {
    pub message: String,
}

impl SlotGameError {
    pub fn new(message: String) -> SlotGameError {
        SlotGameError { message }
    }
}

impl Display for SlotGameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for SlotGameError {}
