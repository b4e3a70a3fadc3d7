/*
agent.rs

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

//! Agent moves and the auto-solve animation.
//!
//! The controller is either idle, where the player can move the agent one cell at a time, or
//! animating, where each call to [`AgentController::advance`] walks the agent one cell further
//! along the solution. The caller decides how often to call it.

use log::debug;
use strum_macros::Display;

use crate::error::{MazeError, Result};
use crate::generator::path::Path;
use crate::grid::{CellKind, Grid, Occupancy};
use crate::pathfinder;
use crate::position::{Direction, Position};

/// Why a manual move was refused. A refused move changes nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MoveRejection {
    /// The auto-solve animation is running.
    Animating,

    /// The offset is not one of the four unit vectors.
    NotCardinal,

    /// The destination is outside the grid.
    OutOfBounds,

    /// The destination is a wall.
    Wall,
}

/// Result of a manual move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The agent is now at the given position.
    Moved(Position),

    /// The move was refused.
    Rejected(MoveRejection),
}

impl MoveOutcome {
    /// Whether the agent moved.
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

/// Result of one animation step.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the agent moved during this step.
    pub moved: bool,

    /// Whether the agent reached the target during this step.
    pub reached_target: bool,
}

/// Controller states.
#[derive(Debug, Clone, Default)]
pub enum AnimationState {
    #[default]
    Idle,

    /// Walking `path`. The agent sits on `path[cursor]`.
    Animating { path: Path, cursor: usize },
}

/// Track the agent and the target and move the agent.
#[derive(Debug, Clone)]
pub struct AgentController {
    agent: Position,
    target: Position,
    state: AnimationState,
}

impl AgentController {
    /// Create an idle controller. Nothing is written to the grid until [`AgentController::place`].
    pub fn new(agent: Position, target: Position) -> Self {
        Self {
            agent,
            target,
            state: AnimationState::Idle,
        }
    }

    /// Current agent position.
    pub fn agent(&self) -> Position {
        self.agent
    }

    /// Target position.
    pub fn target(&self) -> Position {
        self.target
    }

    /// Whether the auto-solve animation is running.
    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating { .. })
    }

    /// Path being walked by the animation, if any.
    pub fn animation_path(&self) -> Option<&Path> {
        match &self.state {
            AnimationState::Animating { path, .. } => Some(path),
            AnimationState::Idle => None,
        }
    }

    /// Put the agent and the target on the grid, removing any previous overlay, and stop the
    /// animation.
    ///
    /// # Errors
    ///
    /// Both positions must be open cells of the grid.
    pub fn place(&mut self, grid: &mut Grid, agent: Position, target: Position) -> Result<()> {
        for p in [agent, target] {
            if !grid.is_open(p)? {
                return Err(MazeError::NotOpen { x: p.x, y: p.y });
            }
        }
        self.stop();
        grid.clear_occupancy();
        grid.set_occupancy(target.x, target.y, Occupancy::Target)?;
        grid.set_occupancy(agent.x, agent.y, Occupancy::Agent)?;
        self.agent = agent;
        self.target = target;
        Ok(())
    }

    /// Abort the animation, if any.
    pub fn stop(&mut self) {
        self.state = AnimationState::Idle;
    }

    /// Move the agent by one cell.
    ///
    /// The offset must be a unit cardinal vector and the destination an open cell of the grid.
    /// Moves are refused while the animation is running.
    pub fn try_move(&mut self, grid: &mut Grid, dx: i32, dy: i32) -> Result<MoveOutcome> {
        if self.is_animating() {
            return Ok(MoveOutcome::Rejected(MoveRejection::Animating));
        }
        let Some(direction) = Direction::from_delta(dx, dy) else {
            return Ok(MoveOutcome::Rejected(MoveRejection::NotCardinal));
        };
        let to: Position = self.agent.step(direction);
        if !grid.contains(to) {
            return Ok(MoveOutcome::Rejected(MoveRejection::OutOfBounds));
        }
        if grid.kind_at(to.x, to.y)? == CellKind::Wall {
            return Ok(MoveOutcome::Rejected(MoveRejection::Wall));
        }
        self.relocate(grid, to)?;
        Ok(MoveOutcome::Moved(to))
    }

    /// Move the agent overlay to an open cell. The vacated cell gets the target back if the
    /// agent was standing on it.
    fn relocate(&mut self, grid: &mut Grid, to: Position) -> Result<()> {
        let from: Position = self.agent;
        let left_behind: Occupancy = if from == self.target {
            Occupancy::Target
        } else {
            Occupancy::None
        };
        // Check the destination first so that a failure leaves both cells untouched
        if !grid.is_open(to)? {
            return Err(MazeError::NotOpen { x: to.x, y: to.y });
        }
        grid.set_occupancy(from.x, from.y, left_behind)?;
        grid.set_occupancy(to.x, to.y, Occupancy::Agent)?;
        self.agent = to;
        Ok(())
    }

    /// Search the shortest path to the target and start walking it.
    ///
    /// Return `false`, and stay idle, when the target cannot be reached.
    pub fn prepare_auto_solve(&mut self, grid: &Grid) -> Result<bool> {
        match pathfinder::find_shortest_path(grid, self.agent, self.target) {
            Ok(path) => {
                debug!("Auto-solve: {} steps to the target", path.edges());
                self.state = AnimationState::Animating { path, cursor: 0 };
                Ok(true)
            }
            Err(MazeError::NoPath { .. }) => {
                self.stop();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Walk one cell along the animation path.
    ///
    /// Going back to idle happens either when the target is reached or when the path is
    /// exhausted. Calling this while idle does nothing.
    pub fn advance(&mut self, grid: &mut Grid) -> Result<StepOutcome> {
        let next: Position = match &mut self.state {
            AnimationState::Idle => return Ok(StepOutcome::default()),
            AnimationState::Animating { path, cursor } => {
                if *cursor + 1 >= path.len() {
                    self.state = AnimationState::Idle;
                    return Ok(StepOutcome::default());
                }
                *cursor += 1;
                match path.at(*cursor) {
                    Some(p) => p,
                    None => {
                        self.state = AnimationState::Idle;
                        return Ok(StepOutcome::default());
                    }
                }
            }
        };

        self.relocate(grid, next)?;
        let reached_target: bool = next == self.target;
        if reached_target {
            debug!("Auto-solve: target {} reached", self.target);
            self.state = AnimationState::Idle;
        }
        Ok(StepOutcome {
            moved: true,
            reached_target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::maze::MazeGenerator;

    /// 5x5 grid where the bottom connector between (1, 3) and (3, 3) is a wall.
    fn small_grid() -> Grid {
        let mut grid = Grid::new(5, 5).unwrap();
        for (x, y) in [(1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (1, 2), (1, 3)] {
            grid.set_kind(x, y, CellKind::Open).unwrap();
        }
        grid
    }

    fn placed(grid: &mut Grid) -> AgentController {
        let (agent, target) = (grid.first_room(), grid.last_room());
        let mut c = AgentController::new(agent, target);
        c.place(grid, agent, target).unwrap();
        c
    }

    #[test]
    fn place_sets_overlays() {
        let mut grid = small_grid();
        let c = placed(&mut grid);
        assert_eq!(grid.occupancy_at(1, 1).unwrap(), Occupancy::Agent);
        assert_eq!(grid.occupancy_at(3, 3).unwrap(), Occupancy::Target);
        assert!(!c.is_animating());
    }

    #[test]
    fn place_on_wall_is_refused() {
        let mut grid = small_grid();
        let mut c = AgentController::new(Position::new(1, 1), Position::new(3, 3));
        let res = c.place(&mut grid, Position::new(2, 2), Position::new(3, 3));
        assert!(matches!(res, Err(MazeError::NotOpen { x: 2, y: 2 })));
    }

    #[test]
    fn moves_to_open_cells_only() {
        let mut grid = small_grid();
        let mut c = placed(&mut grid);

        assert_eq!(
            c.try_move(&mut grid, 0, -1).unwrap(),
            MoveOutcome::Rejected(MoveRejection::Wall)
        );
        assert_eq!(
            c.try_move(&mut grid, 1, 1).unwrap(),
            MoveOutcome::Rejected(MoveRejection::NotCardinal)
        );
        assert_eq!(
            c.try_move(&mut grid, 0, 0).unwrap(),
            MoveOutcome::Rejected(MoveRejection::NotCardinal)
        );
        assert_eq!(c.agent(), Position::new(1, 1));

        assert_eq!(
            c.try_move(&mut grid, 1, 0).unwrap(),
            MoveOutcome::Moved(Position::new(2, 1))
        );
        assert_eq!(grid.occupancy_at(1, 1).unwrap(), Occupancy::None);
        assert_eq!(grid.occupancy_at(2, 1).unwrap(), Occupancy::Agent);
    }

    #[test]
    fn huge_offsets_are_not_cardinal() {
        let mut grid = small_grid();
        let mut c = placed(&mut grid);
        for (dx, dy) in [(i32::MIN, 0), (i32::MAX, 1), (0, i32::MIN), (i32::MIN, i32::MIN)] {
            assert_eq!(
                c.try_move(&mut grid, dx, dy).unwrap(),
                MoveOutcome::Rejected(MoveRejection::NotCardinal)
            );
        }
        assert_eq!(c.agent(), Position::new(1, 1));
        assert_eq!(grid.occupancy_at(1, 1).unwrap(), Occupancy::Agent);
    }

    #[test]
    fn leaving_the_target_restores_it() {
        let mut grid = small_grid();
        let mut c = placed(&mut grid);
        for (dx, dy) in [(1, 0), (1, 0), (0, 1), (0, 1)] {
            assert!(c.try_move(&mut grid, dx, dy).unwrap().is_moved());
        }
        assert_eq!(c.agent(), c.target());
        assert_eq!(grid.occupancy_at(3, 3).unwrap(), Occupancy::Agent);
        assert!(c.try_move(&mut grid, 0, -1).unwrap().is_moved());
        assert_eq!(grid.occupancy_at(3, 3).unwrap(), Occupancy::Target);
    }

    #[test]
    fn animation_walks_to_the_target() {
        let mut grid = small_grid();
        let mut c = placed(&mut grid);

        assert!(c.prepare_auto_solve(&grid).unwrap());
        assert!(c.is_animating());
        assert_eq!(
            c.try_move(&mut grid, 1, 0).unwrap(),
            MoveOutcome::Rejected(MoveRejection::Animating)
        );

        let steps = c.animation_path().map(|p| p.edges()).unwrap();
        assert_eq!(steps, 4);
        let mut outcomes = Vec::new();
        loop {
            let o = c.advance(&mut grid).unwrap();
            if !o.moved {
                break;
            }
            outcomes.push(o);
        }
        assert_eq!(outcomes.len(), steps);
        assert!(outcomes.last().unwrap().reached_target);
        assert!(outcomes[..steps - 1].iter().all(|o| !o.reached_target));
        assert_eq!(c.agent(), c.target());
        assert!(!c.is_animating());
    }

    #[test]
    fn advance_while_idle_does_nothing() {
        let mut grid = small_grid();
        let mut c = placed(&mut grid);
        assert_eq!(c.advance(&mut grid).unwrap(), StepOutcome::default());
        assert_eq!(c.agent(), Position::new(1, 1));
    }

    #[test]
    fn already_on_target() {
        let mut grid = small_grid();
        let mut c = AgentController::new(Position::new(1, 1), Position::new(1, 1));
        c.place(&mut grid, Position::new(1, 1), Position::new(1, 1)).unwrap();
        assert!(c.prepare_auto_solve(&grid).unwrap());
        assert!(c.is_animating());
        assert!(!c.advance(&mut grid).unwrap().moved);
        assert!(!c.is_animating());
    }

    #[test]
    fn unreachable_target_stays_idle() {
        let mut grid = small_grid();
        let mut c = placed(&mut grid);
        grid.set_kind(3, 2, CellKind::Wall).unwrap();
        grid.set_kind(1, 2, CellKind::Wall).unwrap();
        assert!(!c.prepare_auto_solve(&grid).unwrap());
        assert!(!c.is_animating());
    }

    #[test]
    fn stop_aborts_the_animation() {
        let mut grid = Grid::new(9, 9).unwrap();
        MazeGenerator::with_seed(1).generate(&mut grid).unwrap();
        let mut c = placed(&mut grid);
        assert!(c.prepare_auto_solve(&grid).unwrap());
        assert!(c.advance(&mut grid).unwrap().moved);
        c.stop();
        assert!(c.animation_path().is_none());
        assert!(!c.advance(&mut grid).unwrap().moved);
    }
}
