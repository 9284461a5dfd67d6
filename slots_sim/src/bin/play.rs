use slots_lib::console::SlotConsoleGame;

fn main() {
    let mut game = SlotConsoleGame::new();
    if let Err(e) = game.run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
