/*
path.rs

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

//! Path through the maze.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::grid::{CellKind, Grid};
use crate::position::Position;

/// Path object.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of positions, start and goal included.
    path: Vec<Position>,

    /// Positions in the path.
    /// Instead of looking for the position in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    #[serde(skip)]
    members: HashSet<Position>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`Path`] object from a slice of positions.
    pub fn from_positions(path: &[Position]) -> Self {
        Self {
            path: path.to_vec(),
            members: path.iter().copied().collect(),
        }
    }

    /// Remove all the positions from the path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.members.clear();
    }

    /// Add a position at the end of the path.
    pub fn push(&mut self, pos: Position) {
        self.path.push(pos);
        self.members.insert(pos);
    }

    /// Get the number of positions in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path has no position.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the position is in the path or not.
    pub fn contains(&self, pos: Position) -> bool {
        if self.members.len() != self.path.len() {
            // Deserialized paths do not carry the lookup set
            return self.path.contains(&pos);
        }
        self.members.contains(&pos)
    }

    /// Return a reference to the positions.
    pub fn get(&self) -> &[Position] {
        &self.path
    }

    /// Return the position at the given index.
    pub fn at(&self, index: usize) -> Option<Position> {
        self.path.get(index).copied()
    }

    /// Return the first position in the path.
    pub fn get_first(&self) -> Option<Position> {
        self.path.first().copied()
    }

    /// Return the last position in the path.
    pub fn get_last(&self) -> Option<Position> {
        self.path.last().copied()
    }

    /// Number of moves needed to walk the path.
    pub fn edges(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Reverse the path in place.
    pub fn reverse(&mut self) {
        self.path.reverse();
    }

    /// Whether consecutive positions are 4-connected and every position is an open cell of the
    /// grid.
    pub fn is_walkable(&self, grid: &Grid) -> bool {
        let cells_ok: bool = self
            .path
            .iter()
            .all(|p| matches!(grid.kind_at(p.x, p.y), Ok(CellKind::Open)));
        cells_ok && self.path.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }
}
