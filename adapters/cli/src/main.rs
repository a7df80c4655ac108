#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for the telekinetic maze helper.

mod config;
mod layout_transfer;
mod simulation;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use telekinesis_core::Cell;
use telekinesis_system_guidance::select_guidance;
use telekinesis_system_solver::{solve, Path as Route};
use telekinesis_world::{Layout, Maze};

use crate::{
    config::load_config,
    layout_transfer::MazeTransfer,
    simulation::{Outcome, Simulation},
};

const LOG_FILTER_ENV: &str = "TELEKINESIS_LOG";
const LOG_STYLE_ENV: &str = "TELEKINESIS_LOG_STYLE";

/// Telekinetic maze solver and guidance helper.
#[derive(Debug, Parser)]
#[command(name = "telekinesis", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solves a text layout and prints the slides and casting guidance.
    Solve {
        /// Text layout file.
        layout: PathBuf,
        /// Guardian start as `x,y`; defaults to the `G` tile.
        #[arg(long, value_parser = parse_cell)]
        start: Option<Cell>,
        /// Player cell as `x,y`; defaults to the `P` tile.
        #[arg(long, value_parser = parse_cell)]
        player: Option<Cell>,
    },
    /// Plays the room with a scripted player that follows the overlay.
    Simulate {
        /// Text layout file.
        layout: PathBuf,
        /// TOML file with room toggles.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Upper bound on simulated game ticks.
        #[arg(long, default_value_t = 200)]
        max_ticks: u32,
    },
    /// Converts a text layout into a single-line transfer string.
    Encode {
        /// Text layout file.
        layout: PathBuf,
    },
    /// Converts a transfer string back into a text layout.
    Decode {
        /// Transfer string produced by `encode`.
        transfer: String,
    },
}

/// Entry point for the telekinesis command-line interface.
fn main() -> Result<()> {
    init_logging();

    match Cli::parse().command {
        Command::Solve {
            layout,
            start,
            player,
        } => run_solve(&layout, start, player),
        Command::Simulate {
            layout,
            config,
            max_ticks,
        } => run_simulate(&layout, config.as_deref(), max_ticks),
        Command::Encode { layout } => {
            let layout = read_layout(&layout)?;
            let encoded = MazeTransfer::from_layout(&layout)
                .encode()
                .context("failed to encode layout")?;
            println!("{encoded}");
            Ok(())
        }
        Command::Decode { transfer } => {
            let layout = MazeTransfer::decode(&transfer)
                .and_then(|transfer| transfer.to_layout())
                .context("failed to decode transfer string")?;
            println!("{}", layout.render(&[]));
            Ok(())
        }
    }
}

fn init_logging() {
    let env = env_logger::Env::new()
        .filter(LOG_FILTER_ENV)
        .write_style(LOG_STYLE_ENV);
    let _ = env_logger::try_init_from_env(env);
}

fn read_layout(path: &Path) -> Result<Layout> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout at {}", path.display()))?;
    Layout::parse(&text).with_context(|| format!("invalid layout at {}", path.display()))
}

fn run_solve(path: &Path, start: Option<Cell>, player: Option<Cell>) -> Result<()> {
    let layout = read_layout(path)?;
    let maze = layout.maze().context("layout does not describe a maze")?;
    let route = plan_route(&layout, &maze, start)?;
    let start = route.start();

    println!("{} slide(s) from {start} to {}", route.moves(), maze.finish());
    for (index, direction) in route.directions().iter().enumerate() {
        println!(
            "{:>3}. {direction:?} to {}",
            index + 1,
            route.waypoints()[index + 1]
        );
    }

    let marks: Vec<(Cell, char)> = route
        .waypoints()
        .iter()
        .enumerate()
        .skip(1)
        .map(|(index, &cell)| (cell, waypoint_mark(index)))
        .collect();
    println!("{}", layout.render(&marks));

    if let Some(player) = player.or(layout.player()) {
        match select_guidance(&maze.bounds(), route.directions(), player) {
            Some(guidance) => {
                let follow_up = guidance
                    .follow_up
                    .map_or_else(|| "none".to_owned(), |cell| cell.to_string());
                println!(
                    "cast from {} (follow-up {follow_up}); player on the right side: {}",
                    guidance.target, guidance.valid
                );
            }
            None => println!("no casting guidance for {player}"),
        }
    }

    Ok(())
}

/// Solves from `start`, or from the layout's `G` tile when none is given.
///
/// An unreachable finish is an error; a start on the finish yields an empty
/// path.
fn plan_route(layout: &Layout, maze: &Maze, start: Option<Cell>) -> Result<Route> {
    let Some(start) = start.or(layout.guardian()) else {
        bail!("no guardian start; add a `G` tile or pass --start");
    };

    let route = solve(maze, start).context("maze is not enclosed")?;
    if route.is_empty() && start != maze.finish() {
        bail!("finish {} is unreachable from {start}", maze.finish());
    }
    Ok(route)
}

fn run_simulate(path: &Path, config: Option<&Path>, max_ticks: u32) -> Result<()> {
    let layout = read_layout(path)?;
    let config = load_config(config)?;
    let mut simulation = Simulation::new(layout, config)?;

    let outcome = simulation.run(max_ticks, |tick, out| {
        for command in out {
            println!("tick {tick:>4}: {command:?}");
        }
    })?;
    println!("{}", simulation.render());

    match outcome {
        Outcome::Finished { ticks, casts } => {
            println!("guardian reached the finish after {casts} cast(s) in {ticks} tick(s)");
            Ok(())
        }
        Outcome::Stalled { ticks } => bail!("room stopped guiding after {ticks} tick(s)"),
        Outcome::OutOfTicks => bail!("finish not reached within {max_ticks} tick(s)"),
    }
}

fn waypoint_mark(index: usize) -> char {
    u32::try_from(index % 36)
        .ok()
        .and_then(|digit| char::from_digit(digit, 36))
        .unwrap_or('*')
}

fn parse_cell(value: &str) -> Result<Cell, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, found `{value}`"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid x coordinate `{x}`: {error}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid y coordinate `{y}`: {error}"))?;
    Ok(Cell::new(x, y))
}
