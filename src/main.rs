//! Köppen Realms - headless turn runner
//!
//! Sets up a game on a climate map and either plays a command script for
//! the human civ or lets the turns run with the player idle.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;

use koppen_realms::civ::CivFactory;
use koppen_realms::core::error::{GameError, Result};
use koppen_realms::core::GameConfig;
use koppen_realms::game::{CommandOutcome, CommandSession, Game, GameEvent};
use koppen_realms::units::standard_registry;
use koppen_realms::world::{ClimateMap, WorldGrid};

/// Köppen Realms - territorial strategy on a climate map
#[derive(Parser, Debug)]
#[command(name = "koppen_realms")]
#[command(about = "Run a headless game of Köppen Realms")]
struct Args {
    /// Random seed for reproducible runs (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Turns to run when no script is given
    #[arg(long, default_value_t = 20)]
    turns: u32,

    /// Map width when no raster is given
    #[arg(long, default_value_t = 40)]
    width: usize,

    /// Map height when no raster is given
    #[arg(long, default_value_t = 30)]
    height: usize,

    /// Civilization played by the human
    #[arg(long, default_value = "Greenland")]
    civ: String,

    /// Number of AI opponents
    #[arg(long, default_value_t = 4)]
    ai_count: u32,

    /// Game config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Climate raster (grayscale image or JSON document)
    #[arg(long)]
    raster: Option<PathBuf>,

    /// Raster downsample factor
    #[arg(long, default_value_t = 1)]
    downsample: usize,

    /// Command script for the human civ, one command per line
    #[arg(long)]
    script: Option<PathBuf>,

    /// Civilization manifest TOML replacing the built-in one
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("koppen_realms=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate().map_err(GameError::Config)?;

    let climate = match &args.raster {
        Some(path) => ClimateMap::load(path, args.downsample)?,
        None => ClimateMap::latitude_bands(args.width, args.height),
    };
    tracing::info!(
        "Map {}x{} with {} land tiles",
        climate.width(),
        climate.height(),
        climate.land_count()
    );

    let factory = match &args.manifest {
        Some(path) => CivFactory::load(path)?,
        None => CivFactory::builtin()?,
    }
    .with_initial_population(config.initial_population);
    tracing::info!("{} civilization definitions available", factory.definitions().len());
    let mut civs = vec![factory.create(&args.civ, BTreeMap::new(), true)];
    for i in 1..=args.ai_count {
        civs.push(factory.create(&format!("Base_Civ {}", i), BTreeMap::new(), false));
    }

    let mut game = Game::new(WorldGrid::init_map(climate), config, standard_registry());
    let setup = game.init_civs(civs);
    for err in &setup.exhausted {
        println!("warning: {}", err);
    }

    match &args.script {
        Some(path) => run_script(&mut game, &std::fs::read_to_string(path)?),
        None => run_idle(&mut game, args.turns),
    }

    println!();
    for civ in game.civs() {
        println!(
            "{:<12} {:<4} alive={:<5} pop={:<6} tiles={:<4} units={}",
            civ.name,
            civ.code,
            civ.alive,
            civ.population,
            civ.territory.len(),
            civ.units.len()
        );
    }
    Ok(())
}

fn run_script(game: &mut Game, script: &str) {
    let mut session = CommandSession::new();
    let lines = script
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    for line in lines {
        match session.run_line(game, line) {
            Ok(CommandOutcome::TurnEnded(report)) => {
                println!(
                    "> {}: turn {} ({}), {} events, {} combats",
                    line,
                    report.turn,
                    report.season,
                    report.events.len(),
                    report.combats()
                );
                print_notable(&report.events);
            }
            Ok(CommandOutcome::Status(status)) => println!("> {}: {}", line, status),
            Ok(outcome) => println!("> {}: {:?}", line, outcome),
            Err(err) => println!("> {}: {}", line, err),
        }
    }
}

fn run_idle(game: &mut Game, turns: u32) {
    for _ in 0..turns {
        let report = game.end_turn();
        println!(
            "Turn {:>3} | {:<11} | {} events, {} combats",
            report.turn,
            report.season.label(),
            report.events.len(),
            report.combats()
        );
        print_notable(&report.events);
    }
}

fn print_notable(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::CivEliminated { .. } | GameEvent::Annexed { .. } | GameEvent::SeasonChanged { .. } => {
                println!("    {:?}", event)
            }
            _ => {}
        }
    }
}
