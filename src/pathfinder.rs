/*
pathfinder.rs

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

//! Shortest path between two cells with a breadth-first search.
//!
//! The search keeps its own visited set, so it does not depend on the state of the grid
//! `visited` flags that the maze generator leaves behind.

use log::debug;
use std::collections::{HashMap, VecDeque};

use crate::error::{MazeError, Result};
use crate::generator::path::Path;
use crate::grid::{CellKind, Grid};
use crate::position::{Direction, Position};

/// Return the shortest path from `start` to `goal`, both included.
///
/// # Errors
///
/// [`MazeError::OutOfBounds`] if `start` or `goal` is outside the grid, and
/// [`MazeError::NoPath`] if `goal` cannot be reached from `start`.
pub fn find_shortest_path(grid: &Grid, start: Position, goal: Position) -> Result<Path> {
    // Validate both ends before searching
    grid.cell(start.x, start.y)?;
    grid.cell(goal.x, goal.y)?;

    let width: usize = grid.width();
    let index = |p: Position| p.y as usize * width + p.x as usize;

    let mut visited: Vec<bool> = vec![false; width * grid.height()];
    let mut parents: HashMap<Position, Position> = HashMap::new();
    let mut frontier: VecDeque<Position> = VecDeque::new();

    visited[index(start)] = true;
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            let path: Path = rebuild_path(&parents, start, goal);
            debug!(
                "Path from {start} to {goal}: {} cells, {} explored",
                path.len(),
                parents.len() + 1
            );
            return Ok(path);
        }

        for direction in Direction::ALL {
            let next: Position = current.step(direction);
            if !grid.contains(next) || visited[index(next)] {
                continue;
            }
            if grid.kind_at(next.x, next.y)? != CellKind::Open {
                continue;
            }
            visited[index(next)] = true;
            parents.insert(next, current);
            frontier.push_back(next);
        }
    }

    debug!("No path from {start} to {goal}");
    Err(MazeError::NoPath {
        from: start,
        to: goal,
    })
}

/// Walk the parent links back from the goal, then reverse.
fn rebuild_path(parents: &HashMap<Position, Position>, start: Position, goal: Position) -> Path {
    let mut path: Path = Path::new(parents.len() + 1);
    let mut current: Position = goal;

    path.push(current);
    while current != start {
        match parents.get(&current) {
            Some(p) => current = *p,
            None => break,
        }
        path.push(current);
    }
    path.reverse();
    path
}

/// Number of moves from `start` to every reachable open cell.
///
/// The returned map contains `start` itself at distance 0.
pub fn distances_from(grid: &Grid, start: Position) -> Result<HashMap<Position, usize>> {
    grid.cell(start.x, start.y)?;

    let mut distances: HashMap<Position, usize> = HashMap::new();
    let mut frontier: VecDeque<Position> = VecDeque::new();

    distances.insert(start, 0);
    frontier.push_back(start);
    while let Some(current) = frontier.pop_front() {
        let d: usize = distances[&current];
        for next in grid.open_neighbors(current) {
            if !distances.contains_key(&next) {
                distances.insert(next, d + 1);
                frontier.push_back(next);
            }
        }
    }
    Ok(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::maze::MazeGenerator;

    fn corridor() -> Grid {
        // #######
        // #.....#
        // #.###.#
        // #.....#
        // #######
        let mut grid = Grid::new(7, 5).unwrap();
        for x in 1..=5 {
            grid.set_kind(x, 1, CellKind::Open).unwrap();
            grid.set_kind(x, 3, CellKind::Open).unwrap();
        }
        grid.set_kind(1, 2, CellKind::Open).unwrap();
        grid.set_kind(5, 2, CellKind::Open).unwrap();
        grid
    }

    #[test]
    fn shortest_of_two_routes() {
        let grid = corridor();
        let path = find_shortest_path(&grid, Position::new(2, 1), Position::new(1, 3)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.get_first(), Some(Position::new(2, 1)));
        assert_eq!(path.get_last(), Some(Position::new(1, 3)));
        assert!(path.is_walkable(&grid));
    }

    #[test]
    fn start_equals_goal() {
        let grid = corridor();
        let p = Position::new(3, 3);
        let path = find_shortest_path(&grid, p, p).unwrap();
        assert_eq!(path.get(), &[p]);
    }

    #[test]
    fn unreachable_goal_is_reported() {
        let mut grid = corridor();
        grid.set_kind(1, 2, CellKind::Wall).unwrap();
        grid.set_kind(5, 2, CellKind::Wall).unwrap();
        let res = find_shortest_path(&grid, Position::new(1, 1), Position::new(1, 3));
        assert!(matches!(res, Err(MazeError::NoPath { .. })));
    }

    #[test]
    fn out_of_bounds_ends_are_rejected() {
        let grid = corridor();
        let res = find_shortest_path(&grid, Position::new(-1, 1), Position::new(1, 3));
        assert!(matches!(res, Err(MazeError::OutOfBounds { x: -1, y: 1 })));
        let res = find_shortest_path(&grid, Position::new(1, 1), Position::new(7, 3));
        assert!(matches!(res, Err(MazeError::OutOfBounds { x: 7, y: 3 })));
    }

    #[test]
    fn ignores_stale_visited_flags() {
        let mut grid = Grid::new(11, 11).unwrap();
        MazeGenerator::with_seed(5).generate(&mut grid).unwrap();
        // The generator leaves every room marked visited
        assert!(grid.is_visited(1, 1).unwrap());
        let path = find_shortest_path(&grid, grid.first_room(), grid.last_room()).unwrap();
        assert!(path.is_walkable(&grid));
    }

    #[test]
    fn length_matches_distance_map() {
        let mut grid = Grid::new(15, 15).unwrap();
        MazeGenerator::with_seed(11).generate(&mut grid).unwrap();
        let start = grid.first_room();
        let distances = distances_from(&grid, start).unwrap();
        assert_eq!(distances.len(), grid.open_cells().len());
        for goal in grid.open_cells() {
            let path = find_shortest_path(&grid, start, goal).unwrap();
            assert_eq!(path.edges(), distances[&goal]);
        }
    }
}
