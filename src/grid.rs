/*
grid.rs

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

//! Rectangular cell lattice.
//!
//! The grid has a one-cell border of walls. Cells with odd coordinates are the "rooms" of the
//! maze and cells between two rooms are the connectors that the generator opens to join them.
//!
//! Every accessor rejects coordinates outside the grid with [`MazeError::OutOfBounds`].

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::position::{Direction, Position};

/// Structural state of a cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CellKind {
    #[default]
    Wall,
    Open,
}

/// What sits on top of an open cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Occupancy {
    #[default]
    None,
    Agent,
    Target,
}

/// One cell of the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Wall or open. Survives resets and solves.
    pub kind: CellKind,

    /// Agent or target overlay. Only ever set on open cells.
    pub occupancy: Occupancy,

    /// Scratch flag for the maze generator. Cleared by [`Grid::clear_visited`].
    #[serde(skip)]
    pub visited: bool,
}

/// Grid object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,

    /// Row-major cells.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell is a wall.
    ///
    /// # Errors
    ///
    /// Both dimensions must be odd and at least 3, otherwise [`MazeError::InvalidDimensions`]
    /// is returned.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < 3 || height < 3 || width % 2 == 0 || height % 2 == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the coordinates designate a cell of the grid.
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Same as [`Grid::is_in_bounds`] for a [`Position`].
    pub fn contains(&self, pos: Position) -> bool {
        self.is_in_bounds(pos.x, pos.y)
    }

    /// Index of the cell in the row-major vector.
    fn index(&self, x: i32, y: i32) -> Result<usize> {
        if self.is_in_bounds(x, y) {
            Ok(y as usize * self.width + x as usize)
        } else {
            Err(MazeError::OutOfBounds { x, y })
        }
    }

    /// Return the cell at the given coordinates.
    pub fn cell(&self, x: i32, y: i32) -> Result<&Cell> {
        let i: usize = self.index(x, y)?;
        Ok(&self.cells[i])
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Result<&mut Cell> {
        let i: usize = self.index(x, y)?;
        Ok(&mut self.cells[i])
    }

    /// Return the structural state of a cell.
    pub fn kind_at(&self, x: i32, y: i32) -> Result<CellKind> {
        Ok(self.cell(x, y)?.kind)
    }

    /// Change the structural state of a cell. Turning a cell into a wall drops its overlay.
    pub fn set_kind(&mut self, x: i32, y: i32, kind: CellKind) -> Result<()> {
        let cell: &mut Cell = self.cell_mut(x, y)?;
        cell.kind = kind;
        if kind == CellKind::Wall {
            cell.occupancy = Occupancy::None;
        }
        Ok(())
    }

    /// Whether the cell is open. Out-of-bounds cells are reported as errors, not walls.
    pub fn is_open(&self, pos: Position) -> Result<bool> {
        Ok(self.kind_at(pos.x, pos.y)? == CellKind::Open)
    }

    /// Return the overlay of a cell.
    pub fn occupancy_at(&self, x: i32, y: i32) -> Result<Occupancy> {
        Ok(self.cell(x, y)?.occupancy)
    }

    /// Set the overlay of a cell.
    ///
    /// # Errors
    ///
    /// Placing the agent or the target on a wall returns [`MazeError::NotOpen`].
    pub fn set_occupancy(&mut self, x: i32, y: i32, occupancy: Occupancy) -> Result<()> {
        let cell: &mut Cell = self.cell_mut(x, y)?;
        if cell.kind == CellKind::Wall && occupancy != Occupancy::None {
            return Err(MazeError::NotOpen { x, y });
        }
        cell.occupancy = occupancy;
        Ok(())
    }

    /// Whether the generator already visited the cell.
    pub fn is_visited(&self, x: i32, y: i32) -> Result<bool> {
        Ok(self.cell(x, y)?.visited)
    }

    /// Mark the cell visited.
    pub fn set_visited(&mut self, x: i32, y: i32) -> Result<()> {
        self.cell_mut(x, y)?.visited = true;
        Ok(())
    }

    /// Reset the scratch flag of every cell.
    pub fn clear_visited(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.visited = false;
        }
    }

    /// Remove the agent and target from every cell.
    pub fn clear_occupancy(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.occupancy = Occupancy::None;
        }
    }

    /// Turn every cell into a wall and clear all the flags.
    pub fn fill_walls(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Return the positions of all the open cells, row by row.
    pub fn open_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == CellKind::Open)
            .map(|(i, _)| Position::new((i % self.width) as i32, (i / self.width) as i32))
            .collect()
    }

    /// Return the open 4-connected neighbors of a position.
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        Direction::ALL
            .iter()
            .map(|d| pos.step(*d))
            .filter(|p| matches!(self.kind_at(p.x, p.y), Ok(CellKind::Open)))
            .collect()
    }

    /// Top-left interior cell. The agent starts here.
    pub fn first_room(&self) -> Position {
        Position::new(1, 1)
    }

    /// Bottom-right interior cell. The target sits here.
    pub fn last_room(&self) -> Position {
        Position::new(self.width as i32 - 2, self.height as i32 - 2)
    }
}
