/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazegrid.

Mazegrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazegrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazegrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! The command line is a small front end for developers: it generates a maze, applies moves,
//! shows the shortest path, or plays the auto-solve animation in the terminal.
//!
//! # Examples
//!
//! Generate a 11x7 maze and show the shortest path, marked with dots:
//!
//! ```text
//! $ mazegrid -W 11 -H 7 --path
//! ```
//!
//! Apply some moves, then watch the agent walk to the target:
//!
//! ```text
//! $ mazegrid -s 42 -m right,right,down --animate
//! ```
//!
//! Keep the size and seed of a maze in a settings file, and reuse it later:
//!
//! ```text
//! $ mazegrid -W 31 -H 15 -s 7 --save-config maze.json
//! $ mazegrid -c maze.json --path
//! ```
//!
//! Generate 100 mazes and print some statistics:
//!
//! ```text
//! $ mazegrid -n 100 --summary
//! ```

use clap::Parser;
use log::debug;
use std::env;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use mazegrid::config::MazeConfig;
use mazegrid::draw;
use mazegrid::error::Result;
use mazegrid::generator::maze::count_dead_ends;
use mazegrid::position::Direction;
use mazegrid::session::MazeSession;

/// Generate random mazes and solve them.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Number of columns (odd, at least 3)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Number of rows (odd, at least 3)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Seed for the random source (the wall clock is used otherwise)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the resulting settings to a JSON file
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// Comma-separated moves to apply to the agent (up, down, left, right)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    moves: Vec<Direction>,

    /// Highlight the shortest path from the agent to the target
    #[arg(short, long, default_value_t = false)]
    path: bool,

    /// Play the auto-solve animation
    #[arg(short, long, default_value_t = false, conflicts_with = "count")]
    animate: bool,

    /// Print the maze state as JSON
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Number of mazes to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Print some statistics after generating the mazes
    #[arg(short = 'S', long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the process exit status.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Build the settings from the settings file and the command-line overrides.
fn build_config(args: &Args) -> Result<MazeConfig> {
    let mut config: MazeConfig = match &args.config {
        Some(file) => match MazeConfig::load(file)? {
            Some(c) => c,
            None => {
                eprintln!("Settings file {file:?} not found, using defaults");
                MazeConfig::default()
            }
        },
        None => MazeConfig::default(),
    };

    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config: MazeConfig = build_config(args)?;
    if let Some(file) = &args.save_config {
        config.save(file)?;
        debug!("Settings saved to {file:?}");
    }
    let mut session: MazeSession = MazeSession::new(config)?;

    if args.count > 1 || args.summary {
        return summary(args, &mut session);
    }

    for direction in &args.moves {
        if !session.try_move(*direction)? {
            eprintln!("Cannot move {direction} from {}", session.agent());
        }
    }

    if args.path && !session.request_solve()? {
        eprintln!("No path from {} to {}", session.agent(), session.target());
    }

    if args.animate {
        if !session.prepare_auto_solve()? {
            eprintln!("No path from {} to {}", session.agent(), session.target());
        }
        let mut step: usize = 0;
        while session.is_animating() {
            print_frame(&session, args.json)?;
            thread::sleep(session.step_interval());
            if !session.advance_animation()?.moved {
                break;
            }
            step += 1;
            debug!("Animation step {step}");
        }
    }

    print_frame(&session, args.json)
}

/// Print the maze, as text or as one line of JSON.
fn print_frame(session: &MazeSession, json: bool) -> Result<()> {
    let snapshot = session.snapshot();
    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        println!("{}\n", draw::draw(&snapshot));
    }
    Ok(())
}

/// Generate several mazes and print statistics about them.
fn summary(args: &Args, session: &mut MazeSession) -> Result<()> {
    let start: Instant = Instant::now();
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut path_cells: usize = 0;
    let mut dead_ends: usize = 0;
    let count: usize = args.count.max(1);

    for i in 0..count {
        debug!("Iteration {i}");
        if i > 0 {
            session.generate_new()?;
        }
        let duration: f32 = session.generator().duration;
        total += duration;
        if duration > max {
            max = duration;
        }
        dead_ends += count_dead_ends(session.grid());
        if session.request_solve()? {
            path_cells += session.highlighted_path().len();
        }
        if !args.summary {
            println!("{}\n", draw::draw(&session.snapshot()));
        }
    }

    if args.summary {
        println!(
            "
            mazes = {}
       total time = {}s
     average time = {}s
         max time = {}s
average path size = {}
 average dead end = {}
     elapsed time = {}s",
            count,
            total,
            total / count as f32,
            max,
            path_cells as f32 / count as f32,
            dead_ends as f32 / count as f32,
            start.elapsed().as_secs_f32()
        );
    }
    Ok(())
}
