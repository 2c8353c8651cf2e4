//! Headless Skirmish Runner
//!
//! Runs a scenario to completion with both sides on the opponent policy and
//! prints the turn log and result.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use grid_skirmish::battle::{
    choose_action, demo_roster, Action, BattleEngine, BattleStatus, Scenario,
};
use grid_skirmish::core::error::Result;
use grid_skirmish::core::types::Faction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// One unit acts per turn, drawn from the speed order
    Turns,
    /// Every unit acts each step
    Realtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Headless Skirmish Runner - scripted battles on a grid
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run a grid skirmish and print the turn log")]
struct Args {
    /// Scenario TOML file; the built-in demo roster is used if omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Maximum turns (or real-time steps) before stopping undecided
    #[arg(long, default_value_t = 20)]
    max_turns: u32,

    #[arg(long, value_enum, default_value_t = Mode::Turns)]
    mode: Mode,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct SkirmishResult {
    turns: u32,
    winner: Option<Faction>,
    log: Vec<String>,
    status: BattleStatus,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut engine = match &args.scenario {
        Some(path) => Scenario::load(path)?.start()?,
        None => {
            let (players, enemies) = demo_roster();
            BattleEngine::start_battle(players, enemies, [])?
        }
    };

    let turns = match args.mode {
        Mode::Turns => run_turns(&mut engine, args.max_turns),
        Mode::Realtime => run_realtime(&mut engine, args.max_turns),
    };

    let status = engine.battle_status();
    match args.format {
        Format::Json => {
            let result = SkirmishResult {
                turns,
                winner: status.winner,
                log: engine.turn_logs().map(str::to_string).collect(),
                status,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Text => {
            for line in engine.turn_logs() {
                println!("{}", line);
            }
            println!();
            let obstacles = engine.field().obstacles();
            if !obstacles.is_empty() {
                let cells: Vec<String> = obstacles.iter().map(ToString::to_string).collect();
                println!("  obstacles: {}", cells.join(" "));
            }
            for unit in &status.units {
                println!(
                    "  {:<8} {:<6} hp={:<4} at {}",
                    unit.name, unit.faction, unit.hp, unit.position
                );
            }
            match status.winner {
                Some(winner) => println!("Winner: {} after {} turns", winner, turns),
                None => println!("No winner after {} turns", turns),
            }
        }
    }

    Ok(())
}

/// Draw units from the turn order until someone wins or the cap is hit
fn run_turns(engine: &mut BattleEngine, max_turns: u32) -> u32 {
    let mut turns = 0;
    while turns < max_turns && !engine.is_concluded() {
        let Some(unit) = engine.next_unit() else {
            break;
        };
        turns += 1;
        let action = choose_action(engine.field(), unit).unwrap_or(Action::Pass);
        engine.take_turn(unit, action);
    }
    turns
}

/// Drive player units with the same policy the enemy uses
fn run_realtime(engine: &mut BattleEngine, max_steps: u32) -> u32 {
    let mut steps = 0;
    while steps < max_steps && !engine.is_concluded() {
        steps += 1;
        let commands: Vec<_> = engine
            .field()
            .units_of(Faction::Player)
            .into_iter()
            .filter_map(|unit| choose_action(engine.field(), unit).map(|action| (unit, action)))
            .collect();
        engine.real_time_step(commands);
    }
    steps
}
