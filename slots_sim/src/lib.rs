//! Simulation harness for the slot machine core. Provides a per-session game
//! simulation driven by pluggable betting strategies, a simulator that runs
//! many sessions for one strategy, and a multi strategy simulator that tests
//! several strategies in parallel and aggregates their summaries.

pub mod game;
pub mod write;

pub use game::prelude::*;

use game::strategy::BettingStrategy;
use slots_lib::{SlotGameError, STARTING_CREDITS};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use std::iter::FromIterator;
use std::sync::mpsc::{self, Receiver};
use std::thread;

pub mod prelude {
    pub use super::{
        MulStrategySlotSimulator, MulStrategySlotSimulatorBuilder, SimulationError,
        SimulationSummary, SlotSimulation, SlotSimulator, SlotSimulatorConfig,
        SlotSimulatorConfigBuilder,
    };
    pub use crate::game::strategy::{
        BettingStrategy, FlatBetting, MarginBetting, MartingaleBetting,
    };
}

/// Simple struct for recording all of the interesting data points accumulated
/// during a simulation
pub struct SimulationSummary {
    pub wins: i32,
    pub losses: i32,
    pub winnings: i64,
    pub jackpots: i32,
    pub early_endings: i32,
    pub num_rounds: u32,
    pub label: String,
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const width: usize = 80;
        const text_width: usize = "number of early endings".len() + 20;
        const num_width: usize = width - text_width;
        let total_rounds = self.wins + self.losses;
        let body = format!(
            "{}{}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$.2}\n\
        {:<text_width$}{:>num_width$.2}\n",
            "strategy: ",
            self.label,
            "rounds won",
            self.wins,
            "rounds lost",
            self.losses,
            "net winnings",
            self.winnings,
            "number of jackpots",
            self.jackpots,
            "number of early endings",
            self.early_endings,
            "total rounds played",
            total_rounds,
            "win percentage",
            (self.wins as f32) / (total_rounds as f32),
            "average winnings per round",
            (self.winnings as f32) / (total_rounds as f32)
        );
        write!(f, "{}", body)
    }
}

#[derive(Debug)]
pub enum SimulationError {
    GameError(String),
    SendingError(String),
    WriteError(String),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::GameError(s)
            | SimulationError::SendingError(s)
            | SimulationError::WriteError(s) => write!(f, "{}", s),
        }
    }
}

impl Error for SimulationError {}

pub trait SlotSimulation: Send {
    /// Required method, the method that will be called to run all simulations.
    fn run(&mut self) -> Result<(), SlotGameError>;
    /// Required method, the method that will be called to run a single simulation.
    fn run_single_simulation(&mut self) -> Result<(), SlotGameError>;
    /// Required method, the method that will display the stats recorded for a given simulation.
    fn display_stats(&self);
    /// Required method, the method that will reset the simulation
    fn reset(&mut self);
    /// Required method, the method for producing output statistics/data recorded during the simulation
    fn summary(&self) -> SimulationSummary;
}

/// Struct for running a number of simulations for a specific betting strategy.
/// Acts as a wrapper for the structs needed to run a slot machine simulation:
/// it controls the parameters a player at a real machine would face, such as
/// the starting balance, the number of rounds per session and the minimum bet.
pub struct SlotSimulator<S>
where
    S: BettingStrategy,
{
    game: SlotGameSim<S>,
    player_starting_balance: u32,
    num_simulations: u32,
    accumulated_wins: i32,
    accumulated_losses: i32,
    accumulated_winnings: i64,
    accumulated_jackpots: i32,
    num_early_endings: i32,
    silent: bool,
}

impl<S: BettingStrategy> SlotSimulator<S> {
    pub fn new(
        strategy: S,
        player_starting_balance: u32,
        num_simulations: u32,
        rounds_per_simulation: u32,
        min_bet: u32,
        silent: bool,
    ) -> Self {
        let player = PlayerSim::new(player_starting_balance, strategy);
        let machine = SlotMachineSim::new();
        let game = SlotGameSim::new(machine, player, rounds_per_simulation, min_bet);
        Self {
            game,
            player_starting_balance,
            num_simulations,
            accumulated_wins: 0,
            accumulated_losses: 0,
            accumulated_winnings: 0,
            accumulated_jackpots: 0,
            num_early_endings: 0,
            silent,
        }
    }

    fn record_game_stats(&mut self) {
        self.accumulated_wins += self.game.total_wins;
        self.accumulated_losses += self.game.total_losses;
        self.accumulated_winnings += self.game.total_winnings;
        self.accumulated_jackpots += self.game.num_jackpots;
        if self.game.ended_early {
            self.num_early_endings += 1;
        }
    }
}

impl<S: BettingStrategy + Send> SlotSimulation for SlotSimulator<S> {
    /// Method that will run the simulation the number of times configured,
    /// recording the necessary data. Returns a `Result<(), SlotGameError>` if
    /// an error occurs during any simulation.
    fn run(&mut self) -> Result<(), SlotGameError> {
        for i in 0..self.num_simulations {
            if let Err(e) = self.game.run() {
                return Err(e);
            }
            // Record data from simulation
            self.record_game_stats();
            if !self.silent {
                println!("simulation #{}", i + 1);
                let _ = self.game.display_stats();
            }

            // Reset balance for next simulation
            self.game.simulation_reset(self.player_starting_balance);
        }
        Ok(())
    }

    /// Method to run a single simulation. The state of the simulation is not
    /// reset afterwards, nor is any output displayed to the console.
    fn run_single_simulation(&mut self) -> Result<(), SlotGameError> {
        if let Err(e) = self.game.run() {
            return Err(e);
        }
        // Record the data from the simulation
        self.record_game_stats();
        if !self.silent {
            let _ = self.game.display_stats();
        }
        Ok(())
    }

    /// Method that will display the accumulated data recorded from running all
    /// simulations.
    fn display_stats(&self) {
        const width: usize = 80;
        const text_width: usize = "number of early endings:".len() + 20;
        const numeric_width: usize = width - text_width;

        println!("{}", "-".repeat(width));
        println!(
            "{:-^width$}",
            format!("running {} simulations", self.num_simulations)
        );
        println!(
            "{:<text_width$}{:>numeric_width$}",
            "total rounds won:", self.accumulated_wins
        );
        println!(
            "{:<text_width$}{:>numeric_width$}",
            "total rounds lost:", self.accumulated_losses
        );
        println!(
            "{:<text_width$}{:>numeric_width$}",
            "total net winnings:", self.accumulated_winnings
        );
        println!(
            "{:<text_width$}{:>numeric_width$}",
            "number of jackpots:", self.accumulated_jackpots
        );
        println!(
            "{:<text_width$}{:>numeric_width$}",
            "number of early endings:", self.num_early_endings
        );
        println!("{}", "-".repeat(width));
    }

    /// Method to get a `SimulationSummary` object derived from the current data
    /// recorded in `self`.
    fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            wins: self.accumulated_wins,
            losses: self.accumulated_losses,
            winnings: self.accumulated_winnings,
            jackpots: self.accumulated_jackpots,
            early_endings: self.num_early_endings,
            num_rounds: (self.accumulated_wins + self.accumulated_losses) as u32,
            label: self.game.label(),
        }
    }

    /// Method for resetting the state of the simulation, so it can be run
    /// again. A simulation must be reset between runs, otherwise the recorded
    /// data overlaps.
    fn reset(&mut self) {
        self.game.simulation_reset(self.player_starting_balance);
        self.accumulated_wins = 0;
        self.accumulated_losses = 0;
        self.accumulated_winnings = 0;
        self.accumulated_jackpots = 0;
        self.num_early_endings = 0;
    }
}

/// This struct is for testing multiple betting strategies at once. Each
/// strategy gets tested in parallel to speed up computation, with the recorded
/// summaries funnelled over a channel to a single writer.
pub struct MulStrategySlotSimulator {
    simulations: Vec<Box<dyn SlotSimulation>>,
    pub config: SlotSimulatorConfig,
}

impl MulStrategySlotSimulator {
    /// Method that returns a new `MulStrategySlotSimulatorBuilder` object.
    pub fn new(config: SlotSimulatorConfig) -> MulStrategySlotSimulatorBuilder {
        MulStrategySlotSimulatorBuilder {
            simulations: None,
            config,
        }
    }

    /// The method that will run each of the strategies in a configured
    /// simulation. Each strategy gets tested in a new thread, the output of
    /// each simulation gets sent to the write module for writing a summary of
    /// results to the chosen destination.
    pub fn run(&mut self, file_out: Box<dyn Write + Send + 'static>) -> Result<(), SimulationError> {
        // Open channel
        let (write_sender, write_receiver) = mpsc::channel::<(Option<SimulationSummary>, usize)>();

        // Collect thread handles
        let mut handles = vec![];
        self.simulations.reverse();
        let mut id = 1usize;

        // Create unique id's for each simulation, that way the writing thread
        // knows when one simulation is done
        let ids = HashSet::from_iter(1..=self.simulations.len());

        // Spawn thread for writing recorded information
        let write_handle = thread::spawn(move || write::write_summaries(write_receiver, ids, file_out));

        while let Some(mut simulation) = self.simulations.pop() {
            // Clone the sender to the write_receiver
            let write_sender_clone = write_sender.clone();
            let num_simulations = self.config.num_simulations;

            // Spawn the thread for each simulation
            let handle = thread::spawn(move || {
                for _i in 0..num_simulations {
                    if let Err(e) = simulation.run_single_simulation() {
                        return Err(SimulationError::GameError(e.message));
                    }
                    // record data from simulation
                    let summary = simulation.summary();
                    // send data to the write module
                    if let Err(e) = write_sender_clone.send((Some(summary), id)) {
                        return Err(SimulationError::SendingError(format!("{}", e)));
                    }
                    // reset simulation
                    simulation.reset();
                }
                // Tell the writing thread we are finished with this simulation
                if let Err(e) = write_sender_clone.send((None, id)) {
                    return Err(SimulationError::SendingError(format!("{}", e)));
                }
                Ok(())
            });

            handles.push(handle);
            id += 1;
        }

        for (i, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.join().unwrap() {
                eprintln!("error occured for simulation #{i}");
                return Err(e);
            }
        }

        // Make sure write_handle has finished as well
        if let Err(e) = write_handle.join().unwrap() {
            return Err(SimulationError::WriteError(format!("{}", e)));
        }

        Ok(())
    }

    /// Variant of `run` that hands the receiving end of the summary channel to
    /// a caller supplied collector and returns whatever output the collector
    /// produces. Used by the HTTP control surface to aggregate results as JSON.
    pub fn run_return_out(
        &mut self,
        collector: Box<
            dyn FnOnce(
                    Receiver<(Option<SimulationSummary>, usize)>,
                    HashSet<usize>,
                ) -> Result<String, Box<dyn Error + Send + 'static>>
                + Send
                + 'static,
        >,
    ) -> Result<String, SimulationError> {
        let (write_sender, write_receiver) = mpsc::channel::<(Option<SimulationSummary>, usize)>();

        let mut handles = vec![];
        self.simulations.reverse();
        let mut id = 1usize;

        let ids = HashSet::from_iter(1..=self.simulations.len());

        // Spawn the collector thread in place of the writer
        let collect_handle = thread::spawn(move || collector(write_receiver, ids));

        while let Some(mut simulation) = self.simulations.pop() {
            let write_sender_clone = write_sender.clone();
            let num_simulations = self.config.num_simulations;

            let handle = thread::spawn(move || {
                for _i in 0..num_simulations {
                    if let Err(e) = simulation.run_single_simulation() {
                        return Err(SimulationError::GameError(e.message));
                    }
                    let summary = simulation.summary();
                    if let Err(e) = write_sender_clone.send((Some(summary), id)) {
                        return Err(SimulationError::SendingError(format!("{}", e)));
                    }
                    simulation.reset();
                }
                if let Err(e) = write_sender_clone.send((None, id)) {
                    return Err(SimulationError::SendingError(format!("{}", e)));
                }
                Ok(())
            });

            handles.push(handle);
            id += 1;
        }

        for (i, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.join().unwrap() {
                eprintln!("error occured for simulation #{i}");
                return Err(e);
            }
        }

        match collect_handle.join().unwrap() {
            Ok(out) => Ok(out),
            Err(e) => Err(SimulationError::WriteError(format!("{}", e))),
        }
    }

    /// A method for adding a simulation to the simulator at runtime, takes a
    /// boxed `strategy` and then creates a new simulation which is represented
    /// as a trait object of type `SlotSimulation`, then adds it to
    /// `self.simulations`.
    pub fn add_simulation(&mut self, strategy: Box<dyn BettingStrategy + Send + 'static>) {
        // Create trait object
        let simulation: Box<dyn SlotSimulation> = Box::new(SlotSimulator::new(
            strategy,
            self.config.player_starting_balance,
            self.config.num_simulations,
            self.config.rounds_per_simulation,
            self.config.min_bet,
            self.config.silent,
        ));
        self.simulations.push(simulation);
    }

    /// Getter for the simulations currently added.
    pub fn simulations(&self) -> &[Box<dyn SlotSimulation>] {
        &self.simulations
    }
}

/// Struct for building a `MulStrategySlotSimulator` object
pub struct MulStrategySlotSimulatorBuilder {
    simulations: Option<Vec<Box<dyn SlotSimulation>>>,
    config: SlotSimulatorConfig,
}

impl MulStrategySlotSimulatorBuilder {
    /// Method for adding a new simulation to the vector of simulations, the
    /// only required input is a struct that implements the `BettingStrategy`
    /// trait, the rest of the configuration is taken from the preset
    /// `SlotSimulatorConfig` object that was passed during object creation.
    pub fn simulation<S: BettingStrategy + Send + 'static>(&mut self, strategy: S) -> &mut Self {
        let simulation = Box::new(SlotSimulator::new(
            strategy,
            self.config.player_starting_balance,
            self.config.num_simulations,
            self.config.rounds_per_simulation,
            self.config.min_bet,
            self.config.silent,
        ));
        if let Some(ref mut sim_vec) = self.simulations {
            sim_vec.push(simulation);
        } else {
            self.simulations = Some(vec![simulation]);
        }
        self
    }

    /// Method that builds a `MulStrategySlotSimulator` object
    pub fn build(&mut self) -> MulStrategySlotSimulator {
        MulStrategySlotSimulator {
            simulations: self.simulations.take().unwrap_or(vec![]),
            config: self.config,
        }
    }
}

/// Struct for configuring a single `SlotSimulator` object
#[derive(Clone, Copy)]
pub struct SlotSimulatorConfig {
    pub player_starting_balance: u32,
    pub num_simulations: u32,
    pub rounds_per_simulation: u32,
    pub min_bet: u32,
    pub silent: bool,
}

impl SlotSimulatorConfig {
    /// Associated method for returning a new `SlotSimulatorConfigBuilder`
    /// object. Allows the user to choose the parameters of the simulation such
    /// as the player's starting balance, the number of simulations run, the
    /// rounds per session and the minimum bet per round.
    pub fn new() -> SlotSimulatorConfigBuilder {
        SlotSimulatorConfigBuilder {
            player_starting_balance: None,
            num_simulations: None,
            rounds_per_simulation: None,
            min_bet: None,
            silent: None,
        }
    }
}

impl Default for SlotSimulatorConfig {
    /// Returns the standard configuration for a session at the machine.
    fn default() -> Self {
        SlotSimulatorConfig::new().build()
    }
}

/// Struct to implement builder pattern for `SlotSimulatorConfig`
#[derive(Clone, Copy)]
pub struct SlotSimulatorConfigBuilder {
    player_starting_balance: Option<u32>,
    num_simulations: Option<u32>,
    rounds_per_simulation: Option<u32>,
    min_bet: Option<u32>,
    silent: Option<bool>,
}

impl SlotSimulatorConfigBuilder {
    /// Method for changing the starting balance of the player.
    pub fn player_starting_balance(&mut self, balance: u32) -> &mut Self {
        self.player_starting_balance = Some(balance);
        self
    }

    /// Method for setting the number of simulations run.
    pub fn num_simulations(&mut self, n: u32) -> &mut Self {
        self.num_simulations = Some(n);
        self
    }

    /// Method for setting the maximum number of rounds that will be played for
    /// each simulation.
    pub fn rounds_per_simulation(&mut self, rounds: u32) -> &mut Self {
        self.rounds_per_simulation = Some(rounds);
        self
    }

    /// Method for setting the minimum bet for the machine.
    pub fn min_bet(&mut self, bet: u32) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    /// Method for setting a boolean flag, if set to false the `SlotSimulator`
    /// that is configured with these configurations will display its summary
    /// output for each simulation run, otherwise it will remain silent.
    pub fn silent(&mut self, silent: bool) -> &mut Self {
        self.silent = Some(silent);
        self
    }

    /// Method for building a `SlotSimulatorConfig` object from the given
    /// `SlotSimulatorConfigBuilder` object.
    pub fn build(&mut self) -> SlotSimulatorConfig {
        SlotSimulatorConfig {
            player_starting_balance: self.player_starting_balance.unwrap_or(STARTING_CREDITS),
            num_simulations: self.num_simulations.unwrap_or(100),
            rounds_per_simulation: self.rounds_per_simulation.unwrap_or(50),
            min_bet: self.min_bet.unwrap_or(1),
            silent: self.silent.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::strategy::{FlatBetting, MarginBetting, MartingaleBetting};

    #[test]
    fn simple_simulation_test() {
        let mut simulator = SlotSimulator::new(MartingaleBetting::new(1), 100, 50, 100, 1, true);

        if let Err(e) = simulator.run() {
            panic!("error: {}", e);
        }

        let summary = simulator.summary();
        assert_eq!(summary.num_rounds, (summary.wins + summary.losses) as u32);
        assert!(summary.num_rounds <= 50 * 100);
        assert_eq!(summary.label, "martingale 1");

        simulator.display_stats();
    }

    #[test]
    fn reset_wipes_the_accumulated_stats() {
        let mut simulator = SlotSimulator::new(FlatBetting::new(2), 100, 5, 50, 1, true);
        simulator.run().unwrap();
        simulator.reset();
        let summary = simulator.summary();
        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.winnings, 0);
    }

    #[test]
    fn run_multiple_simulations() {
        let mut simulator = MulStrategySlotSimulator::new(SlotSimulatorConfig::default())
            .simulation(FlatBetting::new(1))
            .simulation(MartingaleBetting::new(1))
            .simulation(MarginBetting::new(2.0, 1))
            .build();

        if let Err(e) = simulator.run(Box::new(std::io::stdout())) {
            eprintln!("{}", e);
            panic!();
        }
    }

    #[test]
    fn run_return_out_hands_back_the_collector_output() {
        let mut simulator = MulStrategySlotSimulator::new(
            SlotSimulatorConfig::new().num_simulations(3).build(),
        )
        .simulation(FlatBetting::new(1))
        .build();

        let out = simulator
            .run_return_out(Box::new(|receiver, mut ids| {
                let mut count = 0usize;
                while let Ok((summary, id)) = receiver.recv() {
                    match summary {
                        Some(_) => count += 1,
                        None => {
                            ids.remove(&id);
                            if ids.is_empty() {
                                break;
                            }
                        }
                    }
                }
                Ok(count.to_string())
            }))
            .unwrap();

        assert_eq!(out, "3");
    }
}
