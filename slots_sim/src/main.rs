use slots_sim::game::strategy::{FlatBetting, MarginBetting, MartingaleBetting};

use slots_sim::{MulStrategySlotSimulator, SlotSimulatorConfig};

fn main() {
    let mut simulator = MulStrategySlotSimulator::new(SlotSimulatorConfig::default())
        .simulation(FlatBetting::new(1))
        .simulation(FlatBetting::new(2))
        .simulation(FlatBetting::new(5))
        .simulation(MartingaleBetting::new(1))
        .simulation(MartingaleBetting::new(2))
        .simulation(MarginBetting::new(2.0, 1))
        .simulation(MarginBetting::new(2.0, 2))
        .simulation(MarginBetting::new(3.0, 1))
        .build();

    if let Err(e) = simulator.run(Box::new(std::io::stdout())) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
