/*
session.rs

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

//! Manage the maze being played.
//!
//! [`MazeSession`] owns the grid, the random source, the agent, and the last computed path.
//! Input, timer, and rendering code hold the session and call into it; the session never
//! draws, waits, or prints.
//!
//! The session is not thread-safe. A multi-threaded host must serialize every call, for example
//! by keeping the session behind a single mutex.

use log::{Level, debug, info, log_enabled};
use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::time::Duration;

use crate::agent::{AgentController, MoveOutcome, StepOutcome};
use crate::config::MazeConfig;
use crate::draw;
use crate::error::{MazeError, Result};
use crate::generator::maze::MazeGenerator;
use crate::generator::path::Path;
use crate::grid::{Cell, CellKind, Grid, Occupancy};
use crate::pathfinder;
use crate::position::{Direction, Position};

/// What a renderer needs to know about a cell.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellView {
    pub kind: CellKind,
    pub occupancy: Occupancy,

    /// Whether the cell is on the highlighted path.
    pub on_path: bool,
}

/// Read-only copy of the session state, taken once per frame by renderers.
#[derive(Serialize, Debug, Clone)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,

    /// Cells, row by row.
    pub rows: Vec<Vec<CellView>>,
    pub agent: Position,
    pub target: Position,

    /// Highlighted path, empty when no path is shown.
    pub path: Vec<Position>,
    pub animating: bool,
    pub path_found: bool,
}

/// Maze session.
pub struct MazeSession<R: Rng = StdRng> {
    /// Settings the session was created with.
    config: MazeConfig,

    /// Maze topology and overlays.
    grid: Grid,

    /// Maze generator and its random source.
    generator: MazeGenerator<R>,

    /// Agent, target, and auto-solve animation.
    controller: AgentController,

    /// Last computed path, shown to the player.
    path: Path,

    /// Whether [`MazeSession::path`] holds a valid path.
    path_found: bool,
}

impl MazeSession<StdRng> {
    /// Create a session and generate its first maze.
    ///
    /// The random source is seeded from the configuration or, when no seed is set, from the
    /// wall clock.
    pub fn new(config: MazeConfig) -> Result<Self> {
        config.validate()?;
        let generator: MazeGenerator<StdRng> = match config.seed {
            Some(seed) => MazeGenerator::with_seed(seed),
            None => MazeGenerator::from_clock(),
        };
        Self::with_generator(config, generator)
    }
}

impl<R: Rng> MazeSession<R> {
    /// Create a session that uses the given generator, and generate its first maze.
    pub fn with_generator(config: MazeConfig, generator: MazeGenerator<R>) -> Result<Self> {
        let grid: Grid = Grid::new(config.width, config.height)?;
        let controller: AgentController = AgentController::new(grid.first_room(), grid.last_room());
        let mut session: Self = Self {
            config,
            grid,
            generator,
            controller,
            path: Path::default(),
            path_found: false,
        };
        session.rebuild()?;
        Ok(session)
    }

    /// Build a new maze and put the agent and the target back to their corners.
    pub fn generate_new(&mut self) -> Result<()> {
        info!("Generate new maze");
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<()> {
        self.controller.stop();
        self.generator.generate(&mut self.grid)?;
        self.restart()?;
        if log_enabled!(Level::Debug) {
            debug!("New maze:\n{}", draw::draw(&self.snapshot()));
        }
        Ok(())
    }

    /// Put the agent and the target back to their corners without changing the maze.
    ///
    /// Any animation in progress is aborted and the highlighted path is cleared.
    pub fn reset(&mut self) -> Result<()> {
        info!("Reset maze");
        self.restart()
    }

    fn restart(&mut self) -> Result<()> {
        self.grid.clear_visited();
        self.clear_path();
        let agent: Position = self.grid.first_room();
        let target: Position = self.grid.last_room();
        self.controller.place(&mut self.grid, agent, target)
    }

    fn clear_path(&mut self) {
        self.path.clear();
        self.path_found = false;
    }

    /// Move the agent one cell in the given direction.
    ///
    /// Return `false` when the move is refused: wall, edge of the grid, or animation running.
    pub fn try_move(&mut self, direction: Direction) -> Result<bool> {
        let (dx, dy) = direction.delta();
        self.try_move_by(dx, dy)
    }

    /// Move the agent by an arbitrary offset. Only unit cardinal offsets are accepted.
    pub fn try_move_by(&mut self, dx: i32, dy: i32) -> Result<bool> {
        match self.controller.try_move(&mut self.grid, dx, dy)? {
            MoveOutcome::Moved(pos) => {
                debug!("Agent moved to {pos}");
                // The highlighted path started at the previous position
                self.clear_path();
                Ok(true)
            }
            MoveOutcome::Rejected(reason) => {
                debug!("Move ({dx}, {dy}) from {} rejected: {reason}", self.agent());
                Ok(false)
            }
        }
    }

    /// Compute the shortest path from the agent to the target and keep it for display.
    ///
    /// The agent does not move. Return whether a path exists.
    pub fn request_solve(&mut self) -> Result<bool> {
        info!("Show shortest path");
        match pathfinder::find_shortest_path(&self.grid, self.agent(), self.target()) {
            Ok(path) => {
                self.path = path;
                self.path_found = true;
            }
            Err(MazeError::NoPath { .. }) => self.clear_path(),
            Err(e) => return Err(e),
        }
        Ok(self.path_found)
    }

    /// Start the auto-solve animation. Return whether a path to the target exists.
    pub fn prepare_auto_solve(&mut self) -> Result<bool> {
        info!("Start auto-solve");
        if self.controller.prepare_auto_solve(&self.grid)? {
            self.path = self.controller.animation_path().cloned().unwrap_or_default();
            self.path_found = true;
        } else {
            self.clear_path();
        }
        Ok(self.path_found)
    }

    /// Perform one step of the auto-solve animation.
    pub fn advance_animation(&mut self) -> Result<StepOutcome> {
        let outcome: StepOutcome = self.controller.advance(&mut self.grid)?;
        if outcome.reached_target {
            info!("Target reached");
        }
        Ok(outcome)
    }

    /// Whether the auto-solve animation is running.
    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    /// Whether a path is currently highlighted.
    pub fn is_path_found(&self) -> bool {
        self.path_found
    }

    /// Current agent position.
    pub fn agent(&self) -> Position {
        self.controller.agent()
    }

    /// Target position.
    pub fn target(&self) -> Position {
        self.controller.target()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Return the cell at the given coordinates.
    pub fn cell(&self, x: i32, y: i32) -> Result<&Cell> {
        self.grid.cell(x, y)
    }

    /// Read-only access to the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Highlighted path, empty when no path is shown.
    pub fn highlighted_path(&self) -> &[Position] {
        if self.path_found { self.path.get() } else { &[] }
    }

    /// Settings the session was created with.
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Delay the caller should wait between two calls to [`MazeSession::advance_animation`].
    pub fn step_interval(&self) -> Duration {
        self.config.step_interval()
    }

    /// Generator statistics for the last maze.
    pub fn generator(&self) -> &MazeGenerator<R> {
        &self.generator
    }

    /// Copy the state that renderers need.
    pub fn snapshot(&self) -> Snapshot {
        let rows: Vec<Vec<CellView>> = self
            .grid
            .rows()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, c)| CellView {
                        kind: c.kind,
                        occupancy: c.occupancy,
                        on_path: self.path_found
                            && self.path.contains(Position::new(x as i32, y as i32)),
                    })
                    .collect()
            })
            .collect();

        Snapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            rows,
            agent: self.agent(),
            target: self.target(),
            path: self.highlighted_path().to_vec(),
            animating: self.is_animating(),
            path_found: self.path_found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> MazeSession {
        MazeSession::new(MazeConfig {
            width: 11,
            height: 11,
            seed: Some(seed),
            ..MazeConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_in_the_corners() {
        let s = session(1);
        assert_eq!(s.agent(), Position::new(1, 1));
        assert_eq!(s.target(), Position::new(9, 9));
        assert_eq!(s.cell(1, 1).unwrap().occupancy, Occupancy::Agent);
        assert_eq!(s.cell(9, 9).unwrap().occupancy, Occupancy::Target);
        assert!(!s.is_animating());
        assert!(!s.is_path_found());
        assert!(s.highlighted_path().is_empty());
        // Generation scratch flags are cleared
        assert!(s.grid().rows().all(|r| r.iter().all(|c| !c.visited)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let res = MazeSession::new(MazeConfig {
            width: 10,
            ..MazeConfig::default()
        });
        assert!(matches!(res, Err(MazeError::InvalidDimensions { .. })));
    }

    #[test]
    fn request_solve_does_not_move_the_agent() {
        let mut s = session(2);
        assert!(s.request_solve().unwrap());
        assert!(s.request_solve().unwrap());
        assert_eq!(s.agent(), Position::new(1, 1));
        let path = s.highlighted_path();
        assert_eq!(path.first(), Some(&s.agent()));
        assert_eq!(path.last(), Some(&s.target()));
        assert!(!s.is_animating());
    }

    #[test]
    fn manual_move_clears_the_highlighted_path() {
        let mut s = session(3);
        s.request_solve().unwrap();
        let next = s.highlighted_path()[1];
        let d = Direction::from_delta(next.x - 1, next.y - 1).unwrap();
        assert!(s.try_move(d).unwrap());
        assert!(!s.is_path_found());
        assert!(s.highlighted_path().is_empty());
    }

    #[test]
    fn reset_aborts_the_animation() {
        let mut s = session(4);
        assert!(s.prepare_auto_solve().unwrap());
        assert!(s.advance_animation().unwrap().moved);
        s.reset().unwrap();
        assert!(!s.is_animating());
        assert!(!s.is_path_found());
        assert_eq!(s.agent(), Position::new(1, 1));
        assert!(!s.advance_animation().unwrap().moved);
    }

    #[test]
    fn generate_new_aborts_the_animation() {
        let mut s = session(5);
        s.prepare_auto_solve().unwrap();
        s.advance_animation().unwrap();
        s.generate_new().unwrap();
        assert!(!s.is_animating());
        assert_eq!(s.agent(), Position::new(1, 1));
        assert_eq!(s.cell(9, 9).unwrap().occupancy, Occupancy::Target);
    }

    /// Close the two cells around the bottom-right corner so that the target is unreachable.
    fn wall_off_target(s: &mut MazeSession) {
        s.grid.set_kind(8, 9, CellKind::Wall).unwrap();
        s.grid.set_kind(9, 8, CellKind::Wall).unwrap();
    }

    #[test]
    fn request_solve_without_path_clears_the_highlight() {
        let mut s = session(7);
        assert!(s.request_solve().unwrap());
        assert!(!s.highlighted_path().is_empty());

        wall_off_target(&mut s);
        assert!(!s.request_solve().unwrap());
        assert!(!s.is_path_found());
        assert!(s.highlighted_path().is_empty());
        assert!(s.snapshot().path.is_empty());
        assert_eq!(s.agent(), Position::new(1, 1));
    }

    #[test]
    fn auto_solve_without_path_stays_idle() {
        let mut s = session(8);
        wall_off_target(&mut s);
        assert!(!s.prepare_auto_solve().unwrap());
        assert!(!s.is_animating());
        assert!(!s.is_path_found());
        assert!(s.highlighted_path().is_empty());
        assert!(!s.advance_animation().unwrap().moved);
        assert_eq!(s.agent(), Position::new(1, 1));
    }

    #[test]
    fn snapshot_marks_the_path() {
        let mut s = session(6);
        s.request_solve().unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.rows.len(), 11);
        assert!(snap.rows.iter().all(|r| r.len() == 11));
        let marked: usize = snap
            .rows
            .iter()
            .map(|r| r.iter().filter(|c| c.on_path).count())
            .sum();
        assert_eq!(marked, snap.path.len());
        assert!(snap.path_found);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["width"], 11);
        assert_eq!(json["agent"]["x"], 1);
    }
}
