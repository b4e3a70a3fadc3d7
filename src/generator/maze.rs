/*
maze.rs

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

//! Generate a random perfect maze.

use chrono::Utc;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use crate::error::Result;
use crate::grid::{CellKind, Grid};
use crate::position::Position;

/// Offsets from a room to the four rooms around it. The connector is half way.
const ROOM_STEPS: [(i32, i32); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

/// [`MazeGenerator`] object.
///
/// The generator owns the random source. The source is seeded once and keeps evolving from one
/// maze to the next.
pub struct MazeGenerator<R: Rng = StdRng> {
    /// Random source used to pick the next room.
    rng: R,

    /// Number of loop iterations it took to generate the last maze.
    pub iteration: usize,

    /// Number of rooms carved during the last generation, the starting room included.
    pub rooms: usize,

    /// Duration in seconds it took to generate the last maze.
    pub duration: f32,
}

impl MazeGenerator<StdRng> {
    /// Create a generator with a reproducible random source.
    pub fn with_seed(seed: u64) -> Self {
        debug!("Maze generator seed = {seed}");
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Create a generator seeded from the wall clock.
    pub fn from_clock() -> Self {
        let now = Utc::now();
        let seed: i64 = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp());
        Self::with_seed(seed as u64)
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Create the object from any random source.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            iteration: 0,
            rooms: 0,
            duration: 0.0,
        }
    }

    /// Rebuild every cell of the grid as a perfect maze.
    ///
    /// The walk starts at the top-left room and carves towards a random unvisited room until
    /// it gets stuck, then backtracks. All the interior rooms end up open and the open cells form
    /// a tree.
    ///
    /// The `visited` flags are left set. Clear them with [`Grid::clear_visited`] before reusing
    /// them.
    pub fn generate(&mut self, grid: &mut Grid) -> Result<()> {
        let start_time: Instant = Instant::now();
        self.iteration = 0;
        self.rooms = 1;

        grid.fill_walls();

        let start: Position = grid.first_room();
        let last: Position = grid.last_room();
        grid.set_kind(start.x, start.y, CellKind::Open)?;
        grid.set_kind(last.x, last.y, CellKind::Open)?;
        grid.set_visited(start.x, start.y)?;

        let mut stack: Vec<Position> = Vec::with_capacity(grid.width() * grid.height() / 4);
        stack.push(start);

        while let Some(&current) = stack.last() {
            self.iteration += 1;

            let neighbors: Vec<Position> = Self::unvisited_rooms(grid, current)?;
            if neighbors.is_empty() {
                stack.pop();
                continue;
            }

            let next: Position = neighbors[self.rng.random_range(0..neighbors.len())];
            let connector: Position =
                Position::new((current.x + next.x) / 2, (current.y + next.y) / 2);

            grid.set_kind(connector.x, connector.y, CellKind::Open)?;
            grid.set_kind(next.x, next.y, CellKind::Open)?;
            grid.set_visited(next.x, next.y)?;
            stack.push(next);
            self.rooms += 1;
        }

        self.duration = start_time.elapsed().as_secs_f32();
        debug!(
            "Maze {}x{}: rooms = {}  iterations = {}  duration = {}s",
            grid.width(),
            grid.height(),
            self.rooms,
            self.iteration,
            self.duration
        );
        Ok(())
    }

    /// Rooms two cells away from `pos` that are inside the border and not visited yet.
    fn unvisited_rooms(grid: &Grid, pos: Position) -> Result<Vec<Position>> {
        let max_x: i32 = grid.width() as i32 - 1;
        let max_y: i32 = grid.height() as i32 - 1;
        let mut rooms: Vec<Position> = Vec::with_capacity(ROOM_STEPS.len());

        for (dx, dy) in ROOM_STEPS {
            let next: Position = pos.offset(dx, dy);
            if next.x >= 1
                && next.x < max_x
                && next.y >= 1
                && next.y < max_y
                && !grid.is_visited(next.x, next.y)?
            {
                rooms.push(next);
            }
        }
        Ok(rooms)
    }
}

/// Number of open cells with a single open neighbor.
pub fn count_dead_ends(grid: &Grid) -> usize {
    grid.open_cells()
        .into_iter()
        .filter(|p| grid.open_neighbors(*p).len() == 1)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Random source that always draws zero, so the first candidate room is always chosen.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn open_map(grid: &Grid) -> Vec<String> {
        grid.rows()
            .map(|row| {
                row.iter()
                    .map(|c| if c.kind == CellKind::Open { '.' } else { '#' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn zero_draws_carve_a_fixed_maze() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut generator = MazeGenerator::new(ZeroRng);
        generator.generate(&mut grid).unwrap();

        assert_eq!(
            open_map(&grid),
            vec!["#####", "#...#", "###.#", "#...#", "#####"]
        );
        assert_eq!(generator.rooms, 4);
        // 3 pushes plus 4 pops
        assert_eq!(generator.iteration, 7);
    }

    #[test]
    fn every_room_is_open() {
        let mut grid = Grid::new(15, 9).unwrap();
        let mut generator = MazeGenerator::with_seed(7);
        generator.generate(&mut grid).unwrap();

        for y in (1..9).step_by(2) {
            for x in (1..15).step_by(2) {
                assert_eq!(grid.kind_at(x, y).unwrap(), CellKind::Open, "room ({x}, {y})");
            }
        }
        // Rooms never touch diagonally through an even/even cell
        for y in (2..8).step_by(2) {
            for x in (2..14).step_by(2) {
                assert_eq!(grid.kind_at(x, y).unwrap(), CellKind::Wall);
            }
        }
        assert_eq!(generator.rooms, 7 * 4);
    }

    #[test]
    fn border_stays_walled() {
        let mut grid = Grid::new(11, 7).unwrap();
        MazeGenerator::with_seed(3).generate(&mut grid).unwrap();
        for x in 0..11 {
            assert_eq!(grid.kind_at(x, 0).unwrap(), CellKind::Wall);
            assert_eq!(grid.kind_at(x, 6).unwrap(), CellKind::Wall);
        }
        for y in 0..7 {
            assert_eq!(grid.kind_at(0, y).unwrap(), CellKind::Wall);
            assert_eq!(grid.kind_at(10, y).unwrap(), CellKind::Wall);
        }
    }

    #[test]
    fn tree_has_one_edge_less_than_cells() {
        let mut grid = Grid::new(21, 21).unwrap();
        let mut generator = MazeGenerator::with_seed(2025);
        for _ in 0..5 {
            generator.generate(&mut grid).unwrap();
            let open = grid.open_cells();
            let edges: usize = open
                .iter()
                .map(|p| grid.open_neighbors(*p).len())
                .sum::<usize>()
                / 2;
            assert_eq!(edges + 1, open.len());
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let mut a = Grid::new(21, 15).unwrap();
        let mut b = Grid::new(21, 15).unwrap();
        MazeGenerator::with_seed(99).generate(&mut a).unwrap();
        MazeGenerator::with_seed(99).generate(&mut b).unwrap();
        assert_eq!(open_map(&a), open_map(&b));
    }

    #[test]
    fn smallest_grid_has_a_single_room() {
        let mut grid = Grid::new(3, 3).unwrap();
        MazeGenerator::new(ZeroRng).generate(&mut grid).unwrap();
        assert_eq!(grid.open_cells(), vec![Position::new(1, 1)]);
        assert_eq!(count_dead_ends(&grid), 0);
    }

    #[test]
    fn dead_ends_of_fixed_maze() {
        let mut grid = Grid::new(5, 5).unwrap();
        MazeGenerator::new(ZeroRng).generate(&mut grid).unwrap();
        // (1, 1) and (1, 3) are the two ends of the corridor
        assert_eq!(count_dead_ends(&grid), 2);
    }
}
