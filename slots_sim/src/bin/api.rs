use actix_web::{
    body::BoxBody,
    error, get,
    http::{header::ContentType, StatusCode},
    post, web, App, HttpResponse, HttpServer,
};
use serde::{Deserialize, Serialize};
use slots_sim::game::strategy::{BettingStrategy, FlatBetting, MarginBetting, MartingaleBetting};
use slots_sim::{MulStrategySlotSimulator, SimulationSummary, SlotSimulatorConfig};
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::Receiver;
use std::sync::Mutex;

/// A struct for handling the configurations of the simulator. Meant to be
/// deserialized from JSON.
#[derive(Debug, Deserialize)]
struct GameConfig {
    player_starting_balance: Option<u32>,
    num_simulations: u32,
    rounds_per_simulation: u32,
    min_bet: Option<u32>,
}

impl From<GameConfig> for SlotSimulatorConfig {
    fn from(value: GameConfig) -> Self {
        SlotSimulatorConfig::new()
            .player_starting_balance(value.player_starting_balance.unwrap_or(100))
            .num_simulations(value.num_simulations)
            .rounds_per_simulation(value.rounds_per_simulation)
            .min_bet(value.min_bet.unwrap_or(1))
            .silent(true)
            .build()
    }
}

/// A struct for deserializing the strategy configuration from json.
#[derive(Deserialize)]
struct SimConfig {
    betting_strategy: String,
    base_bet: Option<u32>,
    betting_margin: Option<f32>,
}

/// An enum that will handle user facing errors
#[derive(Debug)]
enum UserError {
    InternalError,
    SimulationCreationError(String),
    SimulatorNotCreated,
    BadInput(String),
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserError::InternalError => write!(f, "{}", "an internal error occured"),
            UserError::SimulationCreationError(ref s) => write!(f, "{}", s),
            UserError::SimulatorNotCreated => write!(
                f,
                "{}",
                "unable to add simulation, a simulator has not been created"
            ),
            UserError::BadInput(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for UserError {}

impl error::ResponseError for UserError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            UserError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            UserError::SimulationCreationError(_) => StatusCode::BAD_REQUEST,
            UserError::SimulatorNotCreated => StatusCode::BAD_REQUEST,
            UserError::BadInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// A struct for collecting `SimulationSummary` data into something that can
/// serialize into JSON
#[derive(Serialize)]
struct SimulationSummaryJson {
    pub betting_strategy: String,
    pub wins: i32,
    pub losses: i32,
    pub winnings: i64,
    pub jackpots: i32,
    pub early_endings: i32,
    pub total_rounds_played: u32,
    pub win_pct: f32,
    pub avg_winnings_per_round: f32,
}

impl SimulationSummaryJson {
    fn new(betting_strategy: String) -> Self {
        SimulationSummaryJson {
            betting_strategy,
            wins: 0,
            losses: 0,
            winnings: 0,
            jackpots: 0,
            early_endings: 0,
            total_rounds_played: 0,
            win_pct: 0.0,
            avg_winnings_per_round: 0.0,
        }
    }
}

/// A struct for collecting all of the simulation summaries into one JSON body
#[derive(Serialize)]
struct SimulationSummaryMap {
    summaries: HashMap<usize, SimulationSummaryJson>,
}

impl SimulationSummaryMap {
    fn new() -> Self {
        SimulationSummaryMap {
            summaries: HashMap::new(),
        }
    }
}

/// A function for collecting summary data off the channel, passed to the
/// `MulStrategySlotSimulator` run_return_out method.
fn write_simulation_summary_as_json(
    receiver: Receiver<(Option<SimulationSummary>, usize)>,
    mut ids: HashSet<usize>,
) -> Result<String, Box<dyn std::error::Error + Send + 'static>> {
    let mut summaries_map = SimulationSummaryMap::new();

    while let Ok(message) = receiver.recv() {
        match message {
            (Some(cur_summary), id) => {
                let summary = summaries_map
                    .summaries
                    .entry(id)
                    .or_insert(SimulationSummaryJson::new(cur_summary.label));
                summary.wins += cur_summary.wins;
                summary.losses += cur_summary.losses;
                summary.winnings += cur_summary.winnings;
                summary.jackpots += cur_summary.jackpots;
                summary.early_endings += cur_summary.early_endings;
            }
            (None, id) => {
                // Remove from ids
                ids.remove(&id);
                // Check if we are done processing simulations
                if ids.is_empty() {
                    break;
                }
            }
        }
    }

    // Compute final statistics
    for (_, v) in &mut summaries_map.summaries {
        let total_rounds_played = v.wins + v.losses;
        v.total_rounds_played = total_rounds_played as u32;
        v.win_pct = (v.wins as f32) / (total_rounds_played as f32);
        v.avg_winnings_per_round = (v.winnings as f32) / (total_rounds_played as f32);
    }

    match serde_json::to_string(&summaries_map) {
        Ok(res) => Ok(res),
        Err(_) => Err(Box::new(UserError::InternalError)),
    }
}

/// Helper function to create a betting strategy at runtime i.e. a
/// `BettingStrategy` trait object.
fn create_betting_strategy<S: AsRef<str>>(
    name: S,
    base_bet: u32,
    margin: Option<f32>,
) -> Result<Box<dyn BettingStrategy + Send + 'static>, &'static str> {
    let betting_strategy: Box<dyn BettingStrategy + Send + 'static> = match name.as_ref() {
        "Flat" => Box::new(FlatBetting::new(base_bet)),
        "Martingale" => Box::new(MartingaleBetting::new(base_bet)),
        "Margin" => Box::new(MarginBetting::new(margin.unwrap_or(2.0), base_bet)),
        _ => return Err("betting strategy not recognized"),
    };

    Ok(betting_strategy)
}

/// A handler that will configure and build a new `MulStrategySlotSimulator`
/// using the parameters in the body of the request
#[post("/config-game-params")]
async fn configure_simulation_parameters(
    params: web::Json<GameConfig>,
    app_sim: web::Data<Mutex<Option<MulStrategySlotSimulator>>>,
) -> Result<HttpResponse, UserError> {
    let config = SlotSimulatorConfig::from(params.into_inner());
    let mut guard = if let Ok(g) = app_sim.lock() {
        g
    } else {
        return Err(UserError::InternalError);
    };

    *guard = Some(MulStrategySlotSimulator::new(config).build());
    Ok(HttpResponse::Ok().body("simulator created successfully"))
}

/// A handler that will add a simulation to the simulator.
#[post("/add-sim")]
async fn add_simulation(
    sim_params: web::Json<SimConfig>,
    app_sim: web::Data<Mutex<Option<MulStrategySlotSimulator>>>,
) -> Result<HttpResponse, UserError> {
    let mut guard = if let Ok(g) = app_sim.lock() {
        g
    } else {
        return Err(UserError::InternalError);
    };

    if let Some(simulator) = guard.as_mut() {
        let min_bet = simulator.config.min_bet;
        let (betting_strategy, base_bet, margin) = (
            sim_params.betting_strategy.as_str(),
            sim_params.base_bet.unwrap_or(min_bet),
            sim_params.betting_margin,
        );

        match create_betting_strategy(betting_strategy, base_bet, margin) {
            Ok(s) => {
                simulator.add_simulation(s);
                return Ok(HttpResponse::Ok().body("simulation added successfully"));
            }
            Err(msg) => return Err(UserError::SimulationCreationError(msg.to_owned())),
        }
    }

    Err(UserError::SimulatorNotCreated)
}

/// A handler that will run the simulation given the configurations.
/// Will return an error response if the simulator has not been configured
/// and/or no simulations have been added.
#[get("/run-sim")]
async fn run_simulation(
    app_sim: web::Data<Mutex<Option<MulStrategySlotSimulator>>>,
) -> Result<HttpResponse, UserError> {
    // Attempt to lock the mutex
    if let Ok(mut guard) = app_sim.lock() {
        // Check if we have a valid simulator
        if let Some(simulator) = guard.as_mut() {
            if simulator.simulations().is_empty() {
                return Err(UserError::BadInput(String::from(
                    "no simulations have been added, unable to run.",
                )));
            }
            match simulator.run_return_out(Box::new(write_simulation_summary_as_json)) {
                Ok(res_as_json) => {
                    return Ok(HttpResponse::Ok()
                        .content_type(ContentType::json())
                        .body(res_as_json));
                }
                Err(_e) => return Err(UserError::InternalError),
            }
        }
    }

    Err(UserError::InternalError)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let address = "127.0.0.1";
    let port = 8080;
    println!("Listening at {}:{}...", address, port);

    let app_sim: web::Data<Mutex<Option<MulStrategySlotSimulator>>> =
        web::Data::new(Mutex::new(None));

    HttpServer::new(move || {
        App::new()
            .app_data(app_sim.clone())
            .service(configure_simulation_parameters)
            .service(add_simulation)
            .service(run_simulation)
    })
    .bind((address, port))?
    .run()
    .await
}
