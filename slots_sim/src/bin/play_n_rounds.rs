use clap::Parser;
use slots_sim::game::player::PlayerSim;
use slots_sim::game::machine::SlotMachineSim;
use slots_sim::game::strategy::FlatBetting;

/// Plays an automated flat betting session and prints every round.
#[derive(Parser)]
#[command(name = "play_n_rounds")]
struct Args {
    /// Number of rounds to play
    rounds: u32,

    /// Starting credit balance
    #[arg(long, default_value_t = 100)]
    balance: u32,

    /// Bet placed every round
    #[arg(long, default_value_t = 1)]
    bet: u32,

    /// Minimum bet the machine accepts
    #[arg(long, default_value_t = 1)]
    min_bet: u32,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let mut machine = match args.seed {
        Some(seed) => SlotMachineSim::with_seed(seed),
        None => SlotMachineSim::new(),
    };
    let mut player = PlayerSim::new(args.balance, FlatBetting::new(args.bet));

    let (mut total_wins, mut total_losses, mut total_winnings) = (0, 0, 0i64);
    let mut rounds_left = args.rounds;

    while rounds_left > 0 && player.continue_play(args.min_bet) {
        // Get bet from player
        let bet = match player.bet() {
            Ok(b) if b >= args.min_bet => b,
            Ok(b) => {
                eprintln!(
                    "error: {b} is not a valid bet with a minimum bet of {}",
                    args.min_bet
                );
                return;
            }
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        };

        if let Err(e) = player.place_bet(bet) {
            eprintln!("error: {e}");
            return;
        }

        if let Err(e) = machine.play_round(&mut player) {
            eprintln!("error: {e}");
            return;
        }

        if let Some(outcome) = machine.last_outcome() {
            println!(
                "round {:>5}: {}   bet {:>3}   balance {:>6}",
                args.rounds - rounds_left + 1,
                outcome,
                bet,
                player.balance()
            );
        }
        for line in machine.last_line_wins() {
            println!(
                "  {} line pays {} credits on {} x{}",
                line.line_name,
                line.line_winnings,
                line.symbol,
                line.symbol.multiplier()
            );
            if line.jackpot_bonus > 0 {
                println!("  jackpot bonus +{} credits", line.jackpot_bonus);
            }
        }

        if let Some((wins, losses, net)) = machine.round_log {
            total_wins += wins;
            total_losses += losses;
            total_winnings += net;
            player.update_strategy(net);
        }

        machine.reset();
        rounds_left -= 1;
    }

    println!();
    println!("rounds won:     {total_wins}");
    println!("rounds lost:    {total_losses}");
    println!("net winnings:   {total_winnings}");
    println!("final balance:  {}", player.balance());
}
